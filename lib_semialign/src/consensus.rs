//! The parts of an alignment that all optimal alignments agree on.
//!
//! A character is *aligned* to a character of the other sequence if every optimal alignment pairs them,
//! *gapped* if every optimal alignment pairs it with a gap,
//! and *ambiguous* otherwise.

use generic_semiring::SelectiveSemiring;
use log::debug;
use ndarray::ArrayView2;

use crate::{
    alignment::Alignment,
    alphabet::{AMBIGUOUS, GAP},
    error::Result,
    recurrence::{Recurrence, State, StateCell},
};

#[cfg(test)]
mod tests;

pub struct ConsensusAligner<'matrix, S: SelectiveSemiring> {
    recurrence: Recurrence<'matrix, S>,
}

/// The consensus of the characters of one sequence.
///
/// `aligned[i]` is false if character `i` is ambiguous.
/// Otherwise `partner[i]` is the index of the character it is aligned to,
/// or the length of the other sequence if it is gapped.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ConsensusEdges {
    aligned: Vec<bool>,
    partner: Vec<usize>,
}

impl<'matrix, S: SelectiveSemiring> ConsensusAligner<'matrix, S> {
    pub fn new(recurrence: Recurrence<'matrix, S>) -> Self {
        Self { recurrence }
    }

    pub fn recurrence(&self) -> &Recurrence<'matrix, S> {
        &self.recurrence
    }

    /// The consensus alignment of `first` and `second`.
    ///
    /// Aligned pairs appear as in any optimal alignment.
    /// Gapped characters are paired with [`GAP`] and ambiguous ones with [`AMBIGUOUS`].
    pub fn consensus(&self, first: &[u8], second: &[u8]) -> Result<Alignment> {
        debug!(
            "Computing consensus of sequences of lengths {} and {}",
            first.len(),
            second.len()
        );
        let (encoded_first, encoded_second) = self.recurrence.encode(first, second)?;
        let posterior = self
            .recurrence
            .posterior_matrix_encoded(&encoded_first, &encoded_second);

        let semiring = self.recurrence.semiring();
        let optimum = posterior.get(0, 0, State::Match);
        let first_edges =
            find_consensus_edges(semiring, posterior.view(), State::Deletion, optimum);
        let second_edges = find_consensus_edges(
            semiring,
            posterior.transposed_view(),
            State::Insertion,
            optimum,
        );

        Ok(construct_alignment(
            first,
            second,
            &first_edges,
            &second_edges,
        ))
    }
}

/// Classifies the characters indexing the rows of `posterior`.
///
/// `gap_state` is the state in which a row character is paired with a gap.
fn find_consensus_edges<S: SelectiveSemiring>(
    semiring: &S,
    posterior: ArrayView2<'_, StateCell<S::Element>>,
    gap_state: State,
    optimum: &S::Element,
) -> ConsensusEdges {
    let rows = posterior.nrows() - 1;
    let columns = posterior.ncols() - 1;
    let mut edges = ConsensusEdges {
        aligned: vec![false; rows],
        partner: vec![columns; rows],
    };

    for row in 0..rows {
        for column in 0..=columns {
            let gap_optimal =
                semiring.is_equal(posterior[[row + 1, column]].get(gap_state), optimum);
            let match_optimal = column < columns
                && semiring.is_equal(&posterior[[row + 1, column + 1]].matched, optimum);

            if (gap_optimal && match_optimal)
                || (match_optimal && edges.aligned[row])
                || (gap_optimal && edges.partner[row] != columns)
            {
                edges.aligned[row] = false;
                break;
            } else if gap_optimal || match_optimal {
                edges.aligned[row] = true;
                if match_optimal {
                    edges.partner[row] = column;
                }
            }
        }
    }

    edges
}

fn construct_alignment(
    first: &[u8],
    second: &[u8],
    first_edges: &ConsensusEdges,
    second_edges: &ConsensusEdges,
) -> Alignment {
    let marker = |aligned: bool| if aligned { GAP } else { AMBIGUOUS };
    let mut alignment = Alignment::with_capacity(first.len() + second.len());
    let (mut i, mut j) = (0, 0);

    while i < first.len() || j < second.len() {
        if i < first.len()
            && (j == second.len()
                || !first_edges.aligned[i]
                || first_edges.partner[i] == second.len())
        {
            alignment.push(first[i], marker(first_edges.aligned[i]));
            i += 1;
        } else if i == first.len()
            || !second_edges.aligned[j]
            || second_edges.partner[j] == first.len()
        {
            alignment.push(marker(second_edges.aligned[j]), second[j]);
            j += 1;
        } else {
            alignment.push(first[i], second[j]);
            i += 1;
            j += 1;
        }
    }

    alignment
}
