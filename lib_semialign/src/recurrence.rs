//! The three-state affine gap recurrence, evaluated over an arbitrary semiring.
//!
//! The states of a cell `(i, j)` describe the last alignment column of a path ending there:
//! [`State::Match`] pairs `first[i - 1]` with `second[j - 1]`,
//! [`State::Deletion`] pairs `first[i - 1]` with a gap and
//! [`State::Insertion`] pairs a gap with `second[j - 1]`.
//!
//! Forward cells hold the value of the best prefix ending in a state,
//! backward cells the value of the best suffix continuing from a state.
//! A gap run of length `k` costs `open ⊗ extend^k`.

use std::mem;

use generic_semiring::{
    SelectiveSemiring, Semiring,
    counting::{Counted, Counting},
};
use log::trace;
use ndarray::{Array2, ArrayView2};

use crate::{
    alignment::Alignment,
    alphabet::GAP,
    error::{Error, Result},
    score_matrix::ScoreMatrix,
};


/// The affine gap costs of both gap directions.
///
/// Deletions consume the first sequence, insertions consume the second one.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GapCosts<Element> {
    pub open_deletion: Element,
    pub extend_deletion: Element,
    pub open_insertion: Element,
    pub extend_insertion: Element,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum State {
    Match,
    Deletion,
    Insertion,
}

/// A set of [`State`]s a path may start or end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateSet(u8);

/// The values of the three states of one dynamic programming cell.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateCell<Element> {
    pub matched: Element,
    pub deleted: Element,
    pub inserted: Element,
}

/// A full `(n + 1) × (m + 1)` matrix of [`StateCell`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DpMatrix<Element> {
    cells: Array2<StateCell<Element>>,
}

/// The affine gap recurrence over one semiring, score matrix and set of gap costs.
///
/// Sequences passed to the crate-internal methods are encoded with the alphabet of the score matrix.
#[derive(Debug, Clone)]
pub struct Recurrence<'matrix, S: Semiring> {
    semiring: S,
    matrix: &'matrix ScoreMatrix<S::Element>,
    gap_costs: GapCosts<S::Element>,
    transposed: bool,
}

impl<Element> GapCosts<Element> {
    /// Iterates the costs in the order open deletion, extend deletion, open insertion, extend insertion.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        [
            &self.open_deletion,
            &self.extend_deletion,
            &self.open_insertion,
            &self.extend_insertion,
        ]
        .into_iter()
    }

    pub fn map<Target>(&self, mut f: impl FnMut(&Element) -> Target) -> GapCosts<Target> {
        GapCosts {
            open_deletion: f(&self.open_deletion),
            extend_deletion: f(&self.extend_deletion),
            open_insertion: f(&self.open_insertion),
            extend_insertion: f(&self.extend_insertion),
        }
    }

    /// Swaps the roles of deletions and insertions.
    pub fn flipped(self) -> Self {
        Self {
            open_deletion: self.open_insertion,
            extend_deletion: self.extend_insertion,
            open_insertion: self.open_deletion,
            extend_insertion: self.extend_deletion,
        }
    }
}

impl<Element: Clone> GapCosts<Element> {
    /// Use the same costs for both gap directions.
    pub fn symmetric(open: Element, extend: Element) -> Self {
        Self {
            open_deletion: open.clone(),
            extend_deletion: extend.clone(),
            open_insertion: open,
            extend_insertion: extend,
        }
    }
}

impl State {
    pub const ALL: [Self; 3] = [Self::Match, Self::Deletion, Self::Insertion];

    pub fn flipped(self) -> Self {
        match self {
            Self::Match => Self::Match,
            Self::Deletion => Self::Insertion,
            Self::Insertion => Self::Deletion,
        }
    }

    fn bit(self) -> u8 {
        match self {
            Self::Match => 1,
            Self::Deletion => 2,
            Self::Insertion => 4,
        }
    }
}

impl StateSet {
    pub const EMPTY: Self = Self(0);
    pub const MATCH: Self = Self(1);
    pub const DELETION: Self = Self(2);
    pub const INSERTION: Self = Self(4);
    pub const ALL: Self = Self(7);

    pub fn contains(self, state: State) -> bool {
        self.0 & state.bit() != 0
    }

    pub fn with(self, state: State) -> Self {
        Self(self.0 | state.bit())
    }

    pub fn flipped(self) -> Self {
        State::ALL
            .into_iter()
            .filter(|state| self.contains(*state))
            .fold(Self::EMPTY, |set, state| set.with(state.flipped()))
    }
}

impl From<State> for StateSet {
    fn from(state: State) -> Self {
        Self(state.bit())
    }
}

impl<Element> StateCell<Element> {
    pub fn get(&self, state: State) -> &Element {
        match state {
            State::Match => &self.matched,
            State::Deletion => &self.deleted,
            State::Insertion => &self.inserted,
        }
    }

    pub fn flipped(self) -> Self {
        Self {
            matched: self.matched,
            deleted: self.inserted,
            inserted: self.deleted,
        }
    }
}

impl<Element: Clone> StateCell<Element> {
    /// `one` for each state in `states`, `zero` for all others.
    fn boundary<S: Semiring<Element = Element>>(semiring: &S, states: StateSet) -> Self {
        let value = |state| {
            if states.contains(state) {
                semiring.one()
            } else {
                semiring.zero()
            }
        };

        Self {
            matched: value(State::Match),
            deleted: value(State::Deletion),
            inserted: value(State::Insertion),
        }
    }

    fn zero<S: Semiring<Element = Element>>(semiring: &S) -> Self {
        Self::boundary(semiring, StateSet::EMPTY)
    }

    /// The sum over all three states.
    pub fn total<S: Semiring<Element = Element>>(&self, semiring: &S) -> Element {
        semiring.sum_all([&self.matched, &self.deleted, &self.inserted])
    }
}

impl<Element> DpMatrix<Element> {
    /// The number of rows, one more than the length of the first sequence.
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// The number of columns, one more than the length of the second sequence.
    pub fn columns(&self) -> usize {
        self.cells.ncols()
    }

    pub fn cell(&self, row: usize, column: usize) -> &StateCell<Element> {
        &self.cells[[row, column]]
    }

    pub fn get(&self, row: usize, column: usize, state: State) -> &Element {
        self.cell(row, column).get(state)
    }

    pub fn view(&self) -> ArrayView2<'_, StateCell<Element>> {
        self.cells.view()
    }

    /// A view with rows and columns swapped.
    pub fn transposed_view(&self) -> ArrayView2<'_, StateCell<Element>> {
        self.cells.view().reversed_axes()
    }
}

impl<'matrix, S: Semiring> Recurrence<'matrix, S> {
    pub fn new(
        semiring: S,
        matrix: &'matrix ScoreMatrix<S::Element>,
        gap_costs: GapCosts<S::Element>,
    ) -> Self {
        Self {
            semiring,
            matrix,
            gap_costs,
            transposed: false,
        }
    }

    pub fn semiring(&self) -> &S {
        &self.semiring
    }

    pub fn matrix(&self) -> &'matrix ScoreMatrix<S::Element> {
        self.matrix
    }

    pub fn gap_costs(&self) -> &GapCosts<S::Element> {
        &self.gap_costs
    }

    /// The same recurrence for the sequences passed in swapped order.
    pub(crate) fn flipped(&self) -> Self
    where
        S: Clone,
    {
        Self {
            semiring: self.semiring.clone(),
            matrix: self.matrix,
            gap_costs: self.gap_costs.clone().flipped(),
            transposed: !self.transposed,
        }
    }

    /// Encodes both sequences with the alphabet of the score matrix.
    pub fn encode(&self, first: &[u8], second: &[u8]) -> Result<(Vec<u8>, Vec<u8>)> {
        let alphabet = self.matrix.alphabet();
        Ok((alphabet.encode(first)?, alphabet.encode(second)?))
    }

    /// The optimal score of aligning `first` with `second` globally.
    pub fn score(&self, first: &[u8], second: &[u8]) -> Result<S::Element> {
        let (first, second) = self.encode(first, second)?;
        Ok(self.score_encoded(&first, &second))
    }

    /// The best score of aligning any substring of `first` with any substring of `second`.
    pub fn local_score(&self, first: &[u8], second: &[u8]) -> Result<S::Element> {
        let (first, second) = self.encode(first, second)?;
        Ok(self.local_score_encoded(&first, &second))
    }

    /// The last row of the forward recurrence, with paths starting in any of `start_states`.
    pub fn forward_row(
        &self,
        first: &[u8],
        second: &[u8],
        start_states: StateSet,
    ) -> Result<Vec<StateCell<S::Element>>> {
        let (first, second) = self.encode(first, second)?;
        Ok(self.forward_row_scan(&first, &second, start_states))
    }

    /// The first row of the backward recurrence, with paths ending in any of `end_states`.
    pub fn backward_row(
        &self,
        first: &[u8],
        second: &[u8],
        end_states: StateSet,
    ) -> Result<Vec<StateCell<S::Element>>> {
        let (first, second) = self.encode(first, second)?;
        Ok(self.backward_row_scan(&first, &second, end_states))
    }

    /// The full forward matrix of paths starting in [`State::Match`].
    pub fn forward_matrix(&self, first: &[u8], second: &[u8]) -> Result<DpMatrix<S::Element>> {
        let (first, second) = self.encode(first, second)?;
        Ok(self.forward_matrix_encoded(&first, &second, StateSet::MATCH))
    }

    /// The full backward matrix of paths ending in any state.
    pub fn backward_matrix(&self, first: &[u8], second: &[u8]) -> Result<DpMatrix<S::Element>> {
        let (first, second) = self.encode(first, second)?;
        Ok(self.backward_matrix_encoded(&first, &second, StateSet::ALL))
    }

    /// The cell-wise product of the forward and backward matrices.
    ///
    /// Each state of a cell holds the value of the best complete path that passes through that cell in that state.
    pub fn posterior_matrix(&self, first: &[u8], second: &[u8]) -> Result<DpMatrix<S::Element>> {
        let (first, second) = self.encode(first, second)?;
        Ok(self.posterior_matrix_encoded(&first, &second))
    }

    /// The value of a given alignment.
    ///
    /// Gap runs are opened on entering them, also when switching between gap directions.
    /// Columns that are gaps on both sides are skipped.
    pub fn score_alignment(&self, alignment: &Alignment) -> Result<S::Element> {
        let alphabet = self.matrix.alphabet();
        let encode = |character: u8, position: usize| {
            alphabet.index_of(character).ok_or(Error::InvalidCharacter {
                character: char::from(character),
                position,
            })
        };

        let mut result = self.semiring.one();
        let mut previous_state = State::Match;
        for (position, (first, second)) in alignment.columns().enumerate() {
            let state = match (first == GAP, second == GAP) {
                (true, true) => continue,
                (false, true) => State::Deletion,
                (true, false) => State::Insertion,
                (false, false) => State::Match,
            };

            result = match state {
                State::Match => self.semiring.combine_product(
                    &result,
                    self.substitution(encode(first, position)?, encode(second, position)?),
                ),
                State::Deletion => {
                    encode(first, position)?;
                    let result = if previous_state == State::Deletion {
                        result
                    } else {
                        self.semiring
                            .combine_product(&result, &self.gap_costs.open_deletion)
                    };
                    self.semiring
                        .combine_product(&result, &self.gap_costs.extend_deletion)
                }
                State::Insertion => {
                    encode(second, position)?;
                    let result = if previous_state == State::Insertion {
                        result
                    } else {
                        self.semiring
                            .combine_product(&result, &self.gap_costs.open_insertion)
                    };
                    self.semiring
                        .combine_product(&result, &self.gap_costs.extend_insertion)
                }
            };
            previous_state = state;
        }

        Ok(result)
    }

    #[inline]
    fn substitution(&self, first: u8, second: u8) -> &S::Element {
        if self.transposed {
            self.matrix.score(second, first)
        } else {
            self.matrix.score(first, second)
        }
    }

    pub(crate) fn score_encoded(&self, first: &[u8], second: &[u8]) -> S::Element {
        let row = self.forward_row_scan(first, second, StateSet::MATCH);
        match row.last() {
            Some(cell) => cell.total(&self.semiring),
            None => self.semiring.zero(),
        }
    }

    /// The sum over all local alignments, which align any substring of `first` with any substring of `second`.
    ///
    /// Every cell may start an alignment in [`State::Match`] and every state of every cell may end one.
    /// Under max-plus this is the best global score over all pairs of substrings, empty ones included.
    pub(crate) fn local_score_encoded(&self, first: &[u8], second: &[u8]) -> S::Element {
        let semiring = &self.semiring;
        let mut result = semiring.zero();
        let mut above: Vec<StateCell<S::Element>> = Vec::with_capacity(second.len() + 1);
        let mut row = Vec::with_capacity(second.len() + 1);

        for row_index in 0..=first.len() {
            row.clear();
            for column in 0..=second.len() {
                let matched = if row_index > 0 && column > 0 {
                    self.forward_match(
                        &above[column - 1],
                        first[row_index - 1],
                        second[column - 1],
                    )
                } else {
                    semiring.zero()
                };
                let cell = StateCell {
                    matched: semiring.combine_sum(&matched, &semiring.one()),
                    deleted: if row_index > 0 {
                        self.forward_deletion(&above[column])
                    } else {
                        semiring.zero()
                    },
                    inserted: if column > 0 {
                        self.forward_insertion(&row[column - 1])
                    } else {
                        semiring.zero()
                    },
                };

                result = semiring.combine_sum(&result, &cell.total(semiring));
                row.push(cell);
            }
            mem::swap(&mut above, &mut row);
        }

        trace!(
            "Computed local score over {}x{} cells",
            first.len() + 1,
            second.len() + 1
        );
        result
    }

    /// `H ⊗ s(a, b)` where `H` is the sum over the diagonal predecessor.
    fn forward_match(&self, diagonal: &StateCell<S::Element>, first: u8, second: u8) -> S::Element {
        self.semiring.combine_product(
            &diagonal.total(&self.semiring),
            self.substitution(first, second),
        )
    }

    fn forward_deletion(&self, above: &StateCell<S::Element>) -> S::Element {
        let semiring = &self.semiring;
        let opened = semiring.combine_product(
            &semiring.combine_sum(&above.matched, &above.inserted),
            &self.gap_costs.open_deletion,
        );
        semiring.combine_product(
            &semiring.combine_sum(&opened, &above.deleted),
            &self.gap_costs.extend_deletion,
        )
    }

    fn forward_insertion(&self, left: &StateCell<S::Element>) -> S::Element {
        let semiring = &self.semiring;
        let opened = semiring.combine_product(
            &semiring.combine_sum(&left.matched, &left.deleted),
            &self.gap_costs.open_insertion,
        );
        semiring.combine_product(
            &semiring.combine_sum(&opened, &left.inserted),
            &self.gap_costs.extend_insertion,
        )
    }

    /// Fills `row` with row zero of the forward recurrence.
    fn forward_first_row(
        &self,
        second: &[u8],
        start_states: StateSet,
        mut row: Vec<StateCell<S::Element>>,
    ) -> Vec<StateCell<S::Element>> {
        row.clear();
        row.push(StateCell::boundary(&self.semiring, start_states));
        for column in 1..=second.len() {
            let inserted = self.forward_insertion(&row[column - 1]);
            row.push(StateCell {
                matched: self.semiring.zero(),
                deleted: self.semiring.zero(),
                inserted,
            });
        }
        row
    }

    /// Fills `row` with the forward row of `character` given the row `above` it.
    fn forward_next_row(
        &self,
        above: &[StateCell<S::Element>],
        character: u8,
        second: &[u8],
        mut row: Vec<StateCell<S::Element>>,
    ) -> Vec<StateCell<S::Element>> {
        row.clear();
        row.push(StateCell {
            matched: self.semiring.zero(),
            deleted: self.forward_deletion(&above[0]),
            inserted: self.semiring.zero(),
        });
        for (column, &second_character) in second.iter().enumerate().map(|(i, c)| (i + 1, c)) {
            let cell = StateCell {
                matched: self.forward_match(&above[column - 1], character, second_character),
                deleted: self.forward_deletion(&above[column]),
                inserted: self.forward_insertion(&row[column - 1]),
            };
            row.push(cell);
        }
        row
    }

    pub(crate) fn forward_row_scan(
        &self,
        first: &[u8],
        second: &[u8],
        start_states: StateSet,
    ) -> Vec<StateCell<S::Element>> {
        let mut row = self.forward_first_row(
            second,
            start_states,
            Vec::with_capacity(second.len() + 1),
        );
        let mut spare = Vec::with_capacity(second.len() + 1);

        for &character in first {
            let next = self.forward_next_row(&row, character, second, spare);
            spare = row;
            row = next;
        }

        row
    }

    pub(crate) fn forward_matrix_encoded(
        &self,
        first: &[u8],
        second: &[u8],
        start_states: StateSet,
    ) -> DpMatrix<S::Element> {
        trace!(
            "Computing forward matrix of size {}x{}",
            first.len() + 1,
            second.len() + 1
        );

        let mut cells = Array2::from_elem(
            (first.len() + 1, second.len() + 1),
            StateCell::zero(&self.semiring),
        );
        let mut row = self.forward_first_row(second, start_states, Vec::new());
        let mut spare = Vec::new();

        for (index, &character) in first.iter().enumerate() {
            for (target, cell) in cells.row_mut(index).iter_mut().zip(&row) {
                *target = cell.clone();
            }
            let next = self.forward_next_row(&row, character, second, spare);
            spare = row;
            row = next;
        }
        for (target, cell) in cells.row_mut(first.len()).iter_mut().zip(row) {
            *target = cell;
        }

        DpMatrix { cells }
    }

    /// A backward cell from its successors.
    ///
    /// `below` is the cell one row down, `right` the cell one column right
    /// and `diagonal` the diagonal successor together with the characters its match edge pairs.
    fn backward_cell(
        &self,
        below: Option<&StateCell<S::Element>>,
        right: Option<&StateCell<S::Element>>,
        diagonal: Option<(&StateCell<S::Element>, u8, u8)>,
    ) -> StateCell<S::Element> {
        let semiring = &self.semiring;
        let gap_costs = &self.gap_costs;

        let matched = match diagonal {
            Some((cell, first, second)) => {
                semiring.combine_product(&cell.matched, self.substitution(first, second))
            }
            None => semiring.zero(),
        };
        let (deletion_extended, deletion_opened) = match below {
            Some(cell) => {
                let extended = semiring.combine_product(&cell.deleted, &gap_costs.extend_deletion);
                let opened = semiring.combine_product(&extended, &gap_costs.open_deletion);
                (extended, opened)
            }
            None => (semiring.zero(), semiring.zero()),
        };
        let (insertion_extended, insertion_opened) = match right {
            Some(cell) => {
                let extended =
                    semiring.combine_product(&cell.inserted, &gap_costs.extend_insertion);
                let opened = semiring.combine_product(&extended, &gap_costs.open_insertion);
                (extended, opened)
            }
            None => (semiring.zero(), semiring.zero()),
        };

        StateCell {
            matched: semiring.sum_all([&matched, &deletion_opened, &insertion_opened]),
            deleted: semiring.sum_all([&matched, &deletion_extended, &insertion_opened]),
            inserted: semiring.sum_all([&matched, &deletion_opened, &insertion_extended]),
        }
    }

    /// Fills `row` with the last row of the backward recurrence.
    fn backward_last_row(
        &self,
        second: &[u8],
        end_states: StateSet,
        mut row: Vec<StateCell<S::Element>>,
    ) -> Vec<StateCell<S::Element>> {
        row.clear();
        row.resize(second.len() + 1, StateCell::zero(&self.semiring));
        row[second.len()] = StateCell::boundary(&self.semiring, end_states);
        for column in (0..second.len()).rev() {
            let cell = self.backward_cell(None, Some(&row[column + 1]), None);
            row[column] = cell;
        }
        row
    }

    /// Fills `row` with the backward row of `character` given the row `below` it.
    fn backward_previous_row(
        &self,
        below: &[StateCell<S::Element>],
        character: u8,
        second: &[u8],
        mut row: Vec<StateCell<S::Element>>,
    ) -> Vec<StateCell<S::Element>> {
        row.clear();
        row.resize(second.len() + 1, StateCell::zero(&self.semiring));
        row[second.len()] = self.backward_cell(Some(&below[second.len()]), None, None);
        for column in (0..second.len()).rev() {
            let cell = self.backward_cell(
                Some(&below[column]),
                Some(&row[column + 1]),
                Some((&below[column + 1], character, second[column])),
            );
            row[column] = cell;
        }
        row
    }

    pub(crate) fn backward_row_scan(
        &self,
        first: &[u8],
        second: &[u8],
        end_states: StateSet,
    ) -> Vec<StateCell<S::Element>> {
        let mut row =
            self.backward_last_row(second, end_states, Vec::with_capacity(second.len() + 1));
        let mut spare = Vec::with_capacity(second.len() + 1);

        for &character in first.iter().rev() {
            let previous = self.backward_previous_row(&row, character, second, spare);
            spare = row;
            row = previous;
        }

        row
    }

    pub(crate) fn backward_matrix_encoded(
        &self,
        first: &[u8],
        second: &[u8],
        end_states: StateSet,
    ) -> DpMatrix<S::Element> {
        trace!(
            "Computing backward matrix of size {}x{}",
            first.len() + 1,
            second.len() + 1
        );

        let mut cells = Array2::from_elem(
            (first.len() + 1, second.len() + 1),
            StateCell::zero(&self.semiring),
        );
        let mut row = self.backward_last_row(second, end_states, Vec::new());
        let mut spare = Vec::new();

        for (index, &character) in first.iter().enumerate().rev() {
            for (target, cell) in cells.row_mut(index + 1).iter_mut().zip(&row) {
                *target = cell.clone();
            }
            let previous = self.backward_previous_row(&row, character, second, spare);
            spare = row;
            row = previous;
        }
        for (target, cell) in cells.row_mut(0).iter_mut().zip(row) {
            *target = cell;
        }

        DpMatrix { cells }
    }

    pub(crate) fn posterior_matrix_encoded(
        &self,
        first: &[u8],
        second: &[u8],
    ) -> DpMatrix<S::Element> {
        let forward = self.forward_matrix_encoded(first, second, StateSet::MATCH);
        let backward = self.backward_matrix_encoded(first, second, StateSet::ALL);
        let semiring = &self.semiring;

        let mut cells = forward.cells;
        for (cell, suffix) in cells.iter_mut().zip(backward.cells.iter()) {
            *cell = StateCell {
                matched: semiring.combine_product(&cell.matched, &suffix.matched),
                deleted: semiring.combine_product(&cell.deleted, &suffix.deleted),
                inserted: semiring.combine_product(&cell.inserted, &suffix.inserted),
            };
        }

        DpMatrix { cells }
    }
}

impl<S: SelectiveSemiring> Recurrence<'_, S> {
    /// The number of distinct optimal alignments of `first` and `second`, saturating at [`u64::MAX`].
    pub fn count_optimal_alignments(&self, first: &[u8], second: &[u8]) -> Result<u64> {
        let (first, second) = self.encode(first, second)?;
        Ok(self.count_optimal_alignments_encoded(&first, &second))
    }

    pub(crate) fn count_optimal_alignments_encoded(&self, first: &[u8], second: &[u8]) -> u64 {
        let counting = Counting::new(&self.semiring);
        let matrix = self.matrix.map(|score| counting.unit(score.clone()));
        let gap_costs = self.gap_costs.map(|cost| counting.unit(cost.clone()));
        let recurrence = Recurrence {
            semiring: counting,
            matrix: &matrix,
            gap_costs,
            transposed: self.transposed,
        };

        let Counted { count, .. } = recurrence.score_encoded(first, second);
        count
    }
}
