//! Divide and conquer alignment in linear memory.
//!
//! The first sequence is split in the middle.
//! A forward row scan over the top half and a backward row scan over the bottom half meet in the middle row,
//! which every path reaches at exactly one column, either by a match or by a deletion.
//! The best such column and state split the problem into two independent halves.

use generic_semiring::{SelectiveSemiring, Semiring};
use log::{debug, trace};

use crate::{
    alignment::{Alignment, Side},
    alphabet::{EncodedSequence, GAP},
    config::AlignmentConfig,
    error::{Error, Result},
    recurrence::{Recurrence, State, StateSet},
};


pub struct LinearMemoryAligner<'matrix, S: Semiring> {
    recurrence: Recurrence<'matrix, S>,
    recursion_limit: usize,
}

/// Where an alignment first reaches the middle row, and by which state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Split {
    column: usize,
    state: State,
}

impl<'matrix, S: SelectiveSemiring + Clone> LinearMemoryAligner<'matrix, S> {
    pub fn new(recurrence: Recurrence<'matrix, S>, config: &AlignmentConfig) -> Self {
        Self {
            recurrence,
            recursion_limit: config.recursion_limit,
        }
    }

    pub fn recurrence(&self) -> &Recurrence<'matrix, S> {
        &self.recurrence
    }

    /// One optimal global alignment.
    pub fn align(&self, first: &[u8], second: &[u8]) -> Result<Alignment> {
        self.align_constrained(first, second, StateSet::MATCH, StateSet::ALL)
    }

    /// One optimal alignment that starts after any of `start_states` and ends in any of `end_states`.
    pub fn align_constrained(
        &self,
        first: &[u8],
        second: &[u8],
        start_states: StateSet,
        end_states: StateSet,
    ) -> Result<Alignment> {
        debug!(
            "Aligning sequences of lengths {} and {} in linear memory",
            first.len(),
            second.len()
        );
        let (first_codes, second_codes) = self.recurrence.encode(first, second)?;
        self.align_single(
            &self.recurrence,
            EncodedSequence::new(first, &first_codes),
            EncodedSequence::new(second, &second_codes),
            start_states,
            end_states,
            0,
        )
    }

    /// All optimal global alignments.
    ///
    /// The number of optimal alignments can grow exponentially with the sequence lengths.
    /// Use [`Recurrence::count_optimal_alignments`] to check it beforehand.
    pub fn align_all(&self, first: &[u8], second: &[u8]) -> Result<Vec<Alignment>> {
        self.align_all_constrained(first, second, StateSet::MATCH, StateSet::ALL)
    }

    pub fn align_all_constrained(
        &self,
        first: &[u8],
        second: &[u8],
        start_states: StateSet,
        end_states: StateSet,
    ) -> Result<Vec<Alignment>> {
        debug!(
            "Enumerating optimal alignments of sequences of lengths {} and {}",
            first.len(),
            second.len()
        );
        let (first_codes, second_codes) = self.recurrence.encode(first, second)?;
        let alignments = self.align_enumerate(
            &self.recurrence,
            EncodedSequence::new(first, &first_codes),
            EncodedSequence::new(second, &second_codes),
            start_states,
            end_states,
            0,
        )?;
        debug!("Found {} optimal alignments", alignments.len());
        Ok(alignments)
    }

    fn align_single(
        &self,
        recurrence: &Recurrence<'matrix, S>,
        first: EncodedSequence<'_>,
        second: EncodedSequence<'_>,
        start_states: StateSet,
        end_states: StateSet,
        depth: usize,
    ) -> Result<Alignment> {
        self.check_depth(depth)?;

        if let Some(alignment) = gap_only_alignment(first, second) {
            return Ok(alignment);
        }

        if first.len() == 1 && second.len() == 1 {
            let semiring = recurrence.semiring();
            let [
                (match_alignment, match_score),
                (deletion_first, deletion_first_score),
                (insertion_first, insertion_first_score),
            ] = single_pair_candidates(recurrence, first, second, start_states, end_states);

            return Ok(
                if semiring.compare(&match_score, &deletion_first_score).is_ge()
                    && semiring.compare(&match_score, &insertion_first_score).is_ge()
                {
                    match_alignment
                } else if semiring
                    .compare(&deletion_first_score, &insertion_first_score)
                    .is_ge()
                {
                    deletion_first
                } else {
                    insertion_first
                },
            );
        }

        if first.len() == 1 {
            return self
                .align_single(
                    &recurrence.flipped(),
                    second,
                    first,
                    start_states.flipped(),
                    end_states.flipped(),
                    depth + 1,
                )
                .map(Alignment::flipped);
        }

        let (middle, candidates) =
            split_candidates(recurrence, first, second, start_states, end_states);
        let split = best_split(recurrence.semiring(), &candidates);
        trace!("Splitting at row {middle} and {split:?}");
        let (first_top, first_bottom) = first.split_at(middle);
        let (second_top, second_bottom) = second.split_at(split.column);

        let top = self.align_single(
            recurrence,
            first_top,
            second_top,
            start_states,
            split.state.into(),
            depth + 1,
        )?;
        let bottom = self.align_single(
            recurrence,
            first_bottom,
            second_bottom,
            split.state.into(),
            end_states,
            depth + 1,
        )?;

        Ok(top.concat(&bottom))
    }

    fn align_enumerate(
        &self,
        recurrence: &Recurrence<'matrix, S>,
        first: EncodedSequence<'_>,
        second: EncodedSequence<'_>,
        start_states: StateSet,
        end_states: StateSet,
        depth: usize,
    ) -> Result<Vec<Alignment>> {
        self.check_depth(depth)?;

        if let Some(alignment) = gap_only_alignment(first, second) {
            return Ok(vec![alignment]);
        }

        if first.len() == 1 && second.len() == 1 {
            let candidates =
                single_pair_candidates(recurrence, first, second, start_states, end_states);
            let semiring = recurrence.semiring();
            let best = semiring.sum_all(candidates.iter().map(|(_, score)| score));
            if semiring.is_zero(&best) {
                return Ok(Vec::new());
            }

            return Ok(candidates
                .into_iter()
                .filter(|(_, score)| semiring.is_equal(score, &best))
                .map(|(alignment, _)| alignment)
                .collect());
        }

        if first.len() == 1 {
            return Ok(self
                .align_enumerate(
                    &recurrence.flipped(),
                    second,
                    first,
                    start_states.flipped(),
                    end_states.flipped(),
                    depth + 1,
                )?
                .into_iter()
                .map(Alignment::flipped)
                .collect());
        }

        let (middle, candidates) =
            split_candidates(recurrence, first, second, start_states, end_states);
        let semiring = recurrence.semiring();
        let best = semiring.sum_all(candidates.iter().map(|(_, score)| score));
        if semiring.is_zero(&best) {
            return Ok(Vec::new());
        }

        let mut alignments = Vec::new();
        for (split, _) in candidates
            .iter()
            .filter(|(_, score)| semiring.is_equal(score, &best))
        {
            trace!("Enumerating split at row {middle} and {split:?}");
            let (first_top, first_bottom) = first.split_at(middle);
            let (second_top, second_bottom) = second.split_at(split.column);
            let tops = self.align_enumerate(
                recurrence,
                first_top,
                second_top,
                start_states,
                split.state.into(),
                depth + 1,
            )?;
            let bottoms = self.align_enumerate(
                recurrence,
                first_bottom,
                second_bottom,
                split.state.into(),
                end_states,
                depth + 1,
            )?;

            for top in &tops {
                for bottom in &bottoms {
                    alignments.push(top.clone().concat(bottom));
                }
            }
        }

        Ok(alignments)
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.recursion_limit {
            Err(Error::RecursionLimitExceeded {
                limit: self.recursion_limit,
            })
        } else {
            Ok(())
        }
    }
}

/// The alignment of two sequences if at least one of them is empty.
fn gap_only_alignment(
    first: EncodedSequence<'_>,
    second: EncodedSequence<'_>,
) -> Option<Alignment> {
    if first.is_empty() {
        Some(Alignment::gapped(second.raw, Side::Second))
    } else if second.is_empty() {
        Some(Alignment::gapped(first.raw, Side::First))
    } else {
        None
    }
}

/// The three ways of aligning two single characters with their scores under the given boundary states,
/// in the order match, deletion first, insertion first.
///
/// Candidates that cannot end in `end_states` score zero.
fn single_pair_candidates<S: Semiring>(
    recurrence: &Recurrence<'_, S>,
    first: EncodedSequence<'_>,
    second: EncodedSequence<'_>,
    start_states: StateSet,
    end_states: StateSet,
) -> [(Alignment, S::Element); 3] {
    let semiring = recurrence.semiring();
    let matrix = recurrence.forward_matrix_encoded(first.codes, second.codes, start_states);
    let cell = matrix.cell(1, 1);
    let score = |state| {
        if end_states.contains(state) {
            cell.get(state).clone()
        } else {
            semiring.zero()
        }
    };

    let (first, second) = (first.raw[0], second.raw[0]);
    let alignment = |first_side: &[u8], second_side: &[u8]| {
        Alignment::from_columns(first_side.iter().copied().zip(second_side.iter().copied()))
    };

    [
        (alignment(&[first], &[second]), score(State::Match)),
        (
            alignment(&[first, GAP], &[GAP, second]),
            score(State::Insertion),
        ),
        (
            alignment(&[GAP, first], &[second, GAP]),
            score(State::Deletion),
        ),
    ]
}

/// The scores of all ways to reach the middle row,
/// ordered by column and with matches before deletions.
fn split_candidates<S: Semiring>(
    recurrence: &Recurrence<'_, S>,
    first: EncodedSequence<'_>,
    second: EncodedSequence<'_>,
    start_states: StateSet,
    end_states: StateSet,
) -> (usize, Vec<(Split, S::Element)>) {
    let semiring = recurrence.semiring();
    let middle = first.len() / 2;
    let (top, bottom) = first.codes.split_at(middle);
    let prefixes = recurrence.forward_row_scan(top, second.codes, start_states);
    let suffixes = recurrence.backward_row_scan(bottom, second.codes, end_states);

    let candidates = prefixes
        .iter()
        .zip(&suffixes)
        .enumerate()
        .flat_map(|(column, (prefix, suffix))| {
            [State::Match, State::Deletion].map(|state| {
                (
                    Split { column, state },
                    semiring.combine_product(prefix.get(state), suffix.get(state)),
                )
            })
        })
        .collect();

    (middle, candidates)
}

/// The first best match split, unless a deletion split is strictly better.
fn best_split<S: SelectiveSemiring>(semiring: &S, candidates: &[(Split, S::Element)]) -> Split {
    let first_best = |state| {
        candidates
            .iter()
            .filter(|(split, _)| split.state == state)
            .reduce(|best, candidate| {
                if semiring.compare(&candidate.1, &best.1).is_gt() {
                    candidate
                } else {
                    best
                }
            })
    };

    match (first_best(State::Match), first_best(State::Deletion)) {
        (Some(matched), Some(deleted)) if semiring.compare(&matched.1, &deleted.1).is_lt() => {
            deleted.0
        }
        (Some(matched), _) => matched.0,
        (None, Some(deleted)) => deleted.0,
        (None, None) => Split {
            column: 0,
            state: State::Match,
        },
    }
}
