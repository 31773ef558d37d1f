use generic_semiring::{SelectiveSemiring, Semiring};
use log::debug;

use crate::{
    alignment::Alignment,
    alphabet::GAP,
    error::{Error, Result},
    recurrence::{DpMatrix, Recurrence, State, StateSet},
};

#[cfg(test)]
mod tests;

/// Aligns by tracing back through the full forward matrix.
///
/// Uses memory proportional to the product of the sequence lengths.
pub struct QuadraticAligner<'matrix, S: Semiring> {
    recurrence: Recurrence<'matrix, S>,
}

impl<'matrix, S: SelectiveSemiring> QuadraticAligner<'matrix, S> {
    pub fn new(recurrence: Recurrence<'matrix, S>) -> Self {
        Self { recurrence }
    }

    pub fn recurrence(&self) -> &Recurrence<'matrix, S> {
        &self.recurrence
    }

    /// One optimal global alignment.
    ///
    /// Ties are broken in favour of matches, then insertions, then deletions.
    pub fn align(&self, first: &[u8], second: &[u8]) -> Result<Alignment> {
        debug!(
            "Aligning sequences of lengths {} and {} in quadratic memory",
            first.len(),
            second.len()
        );
        let (first_codes, second_codes) = self.recurrence.encode(first, second)?;
        let matrix =
            self.recurrence
                .forward_matrix_encoded(&first_codes, &second_codes, StateSet::MATCH);
        self.traceback(&matrix, first, second)
    }

    /// Traces back from the last cell, emitting the characters of `first` and `second` as given.
    fn traceback(
        &self,
        matrix: &DpMatrix<S::Element>,
        first: &[u8],
        second: &[u8],
    ) -> Result<Alignment> {
        let semiring = self.recurrence.semiring();
        let gap_costs = self.recurrence.gap_costs();

        let (mut row, mut column) = (first.len(), second.len());
        let end = matrix.cell(row, column);
        let mut state = best_state(semiring, &end.matched, &end.deleted, &end.inserted);
        let mut alignment = Alignment::with_capacity(row + column);

        while row > 0 || column > 0 {
            let invalid = Error::InvalidTracebackState { row, column, state };
            if semiring.is_zero(matrix.get(row, column, state)) {
                return Err(invalid);
            }

            match state {
                State::Match => {
                    if row == 0 || column == 0 {
                        return Err(invalid);
                    }
                    alignment.push(first[row - 1], second[column - 1]);
                    row -= 1;
                    column -= 1;

                    let previous = matrix.cell(row, column);
                    state = best_state(
                        semiring,
                        &previous.matched,
                        &previous.deleted,
                        &previous.inserted,
                    );
                }
                State::Deletion => {
                    if row == 0 {
                        return Err(invalid);
                    }
                    alignment.push(first[row - 1], GAP);
                    row -= 1;

                    let previous = matrix.cell(row, column);
                    let open = &gap_costs.open_deletion;
                    state = best_state(
                        semiring,
                        &semiring.combine_product(&previous.matched, open),
                        &previous.deleted,
                        &semiring.combine_product(&previous.inserted, open),
                    );
                }
                State::Insertion => {
                    if column == 0 {
                        return Err(invalid);
                    }
                    alignment.push(GAP, second[column - 1]);
                    column -= 1;

                    let previous = matrix.cell(row, column);
                    let open = &gap_costs.open_insertion;
                    state = best_state(
                        semiring,
                        &semiring.combine_product(&previous.matched, open),
                        &semiring.combine_product(&previous.deleted, open),
                        &previous.inserted,
                    );
                }
            }

            // The first row and column can only be reached by gaps.
            if column == 0 && row > 0 {
                state = State::Deletion;
            } else if row == 0 && column > 0 {
                state = State::Insertion;
            }
        }

        alignment.reverse();
        Ok(alignment)
    }
}

/// The arg-max of three state values.
///
/// A deletion must be strictly better than both other states,
/// and an insertion strictly better than a match.
fn best_state<S: SelectiveSemiring>(
    semiring: &S,
    matched: &S::Element,
    deleted: &S::Element,
    inserted: &S::Element,
) -> State {
    if semiring.compare(deleted, matched).is_gt() && semiring.compare(deleted, inserted).is_gt() {
        State::Deletion
    } else if semiring.compare(matched, inserted).is_lt() {
        State::Insertion
    } else {
        State::Match
    }
}
