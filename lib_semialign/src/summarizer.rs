//! How often each parameter of a symbolic scoring scheme is used by an optimal alignment.
//!
//! The entries of a symbolic score matrix and the gap costs name parameters.
//! The parameter `0` is implicit: it always scores zero and is not counted.

use std::{collections::BTreeSet, fmt::Display};

use generic_semiring::{
    max_plus::{MaxPlus, Tropical},
    summary::{Summary, SummarySemiring},
};
use log::{debug, info};
use num_traits::{NumCast, PrimInt};

use crate::{
    alignment::Alignment,
    config::AlignmentConfig,
    error::{Error, Result},
    linear_aligner::LinearMemoryAligner,
    quadratic_aligner::QuadraticAligner,
    recurrence::{GapCosts, Recurrence},
    score_matrix::{ScoreMatrix, ScoreTable},
};


/// The name of the implicit parameter that scores zero.
pub const ZERO_PARAMETER: &str = "0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SummaryMode {
    /// Count the parameters of one arbitrary optimal alignment.
    Any,

    /// Among all optimal alignments, count the parameters of the one with the lexicographically smallest usage.
    ///
    /// The order of the usage vectors follows the sorted parameter names.
    LexMin,
}

/// Usage counts of named parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterUsage {
    parameters: Vec<String>,
    counts: Vec<usize>,
}

pub struct ParametricSummarizer {
    parameters: Vec<String>,
    matrix: ScoreMatrix<usize>,
    gap_costs: GapCosts<usize>,
    config: AlignmentConfig,
}

impl ParametricSummarizer {
    /// A summarizer with gap runs costing `gap ⊗ space^k` in both directions.
    pub fn new(matrix: &ScoreMatrix<String>, space: &str, gap: &str, config: AlignmentConfig) -> Self {
        Self::with_gap_costs(
            matrix,
            &GapCosts::symmetric(gap.to_string(), space.to_string()),
            config,
        )
    }

    pub fn with_gap_costs(
        matrix: &ScoreMatrix<String>,
        gap_costs: &GapCosts<String>,
        config: AlignmentConfig,
    ) -> Self {
        let mut names: BTreeSet<&str> = matrix
            .entries()
            .iter()
            .chain(gap_costs.iter())
            .map(String::as_str)
            .collect();
        names.remove(ZERO_PARAMETER);
        let parameters: Vec<_> = names.into_iter().map(str::to_string).collect();
        debug!("Discovered parameters {parameters:?}");

        // Only the zero parameter is missing from the list.
        let index = |name: &String| {
            parameters
                .binary_search(name)
                .unwrap_or(parameters.len())
        };
        let matrix = matrix.map(index);
        let gap_costs = gap_costs.map(index);

        Self {
            parameters,
            matrix,
            gap_costs,
            config,
        }
    }

    /// A summarizer for a symbolic score table, which must have gap costs.
    pub fn from_table(table: &ScoreTable<String>, config: AlignmentConfig) -> Result<Self> {
        Ok(Self::with_gap_costs(
            &table.matrix,
            table.gap_costs()?,
            config,
        ))
    }

    /// The sorted names of all counted parameters.
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    pub fn config(&self) -> &AlignmentConfig {
        &self.config
    }

    pub fn parameter_index(&self, name: &str) -> Result<usize> {
        self.parameters
            .iter()
            .position(|parameter| parameter == name)
            .ok_or_else(|| Error::UnknownParameter(name.to_string()))
    }

    /// Orders named bindings like [`parameters`](Self::parameters).
    pub fn bindings_by_name<T: Copy>(&self, named: &[(&str, T)]) -> Result<Vec<T>> {
        let mut bindings = vec![None; self.parameters.len()];
        for &(name, value) in named {
            bindings[self.parameter_index(name)?] = Some(value);
        }

        bindings
            .into_iter()
            .zip(&self.parameters)
            .map(|(value, name)| value.ok_or_else(|| Error::MissingBinding(name.clone())))
            .collect()
    }

    /// The parameter usage of an optimal alignment of `first` and `second`
    /// when binding the parameters to `bindings`.
    ///
    /// `bindings` holds one value per parameter, in the order of [`parameters`](Self::parameters).
    pub fn summarize(
        &self,
        first: &[u8],
        second: &[u8],
        bindings: &[i64],
        mode: SummaryMode,
    ) -> Result<ParameterUsage> {
        self.check_bindings(bindings)?;
        debug!(
            "Summarizing sequences of lengths {} and {} in mode {mode:?}",
            first.len(),
            second.len()
        );

        match mode {
            SummaryMode::Any => {
                let alignment = self.align(first, second, bindings)?;
                self.summarize_alignment(&alignment)
            }
            SummaryMode::LexMin => {
                let semiring = SummarySemiring::new(Tropical::new(), self.parameters.len());
                let bind = |&parameter: &usize| self.summary_element(&semiring, parameter, bindings);
                let matrix = self.matrix.map(bind);
                let gap_costs = self.gap_costs.map(bind);
                let recurrence = Recurrence::new(semiring, &matrix, gap_costs);

                let Summary { usage, .. } = recurrence.score(first, second)?;
                Ok(self.usage(usage))
            }
        }
    }

    /// An optimal alignment of `first` and `second` when binding the parameters to `bindings`.
    ///
    /// Aligns in linear memory if configured to or if the quadratic matrices exceed the memory limit.
    pub fn align(&self, first: &[u8], second: &[u8], bindings: &[i64]) -> Result<Alignment> {
        self.check_bindings(bindings)?;

        let bind = |&parameter: &usize| {
            MaxPlus::Finite(bindings.get(parameter).copied().unwrap_or_default())
        };
        let matrix = self.matrix.map(bind);
        let recurrence = Recurrence::new(Tropical::new(), &matrix, self.gap_costs.map(bind));

        if self.config.linear_memory {
            LinearMemoryAligner::new(recurrence, &self.config).align(first, second)
        } else if self.config.exceeds_memory_limit(
            first.len() + 1,
            second.len() + 1,
            size_of::<MaxPlus<i64>>(),
        ) {
            info!(
                "Aligning sequences of lengths {} and {} in linear memory to stay below {} bytes",
                first.len(),
                second.len(),
                self.config.memory_limit
            );
            LinearMemoryAligner::new(recurrence, &self.config).align(first, second)
        } else {
            QuadraticAligner::new(recurrence).align(first, second)
        }
    }

    /// The parameter usage of the given alignment.
    ///
    /// A gap run is opened when entering it, also when switching between gap directions.
    pub fn summarize_alignment(&self, alignment: &Alignment) -> Result<ParameterUsage> {
        let semiring = SummarySemiring::new(Tropical::<i64>::new(), self.parameters.len());
        let unit = |&parameter: &usize| self.summary_element(&semiring, parameter, &[]);
        let matrix = self.matrix.map(unit);
        let gap_costs = self.gap_costs.map(unit);
        let recurrence = Recurrence::new(semiring, &matrix, gap_costs);

        let Summary { usage, .. } = recurrence.score_alignment(alignment)?;
        Ok(self.usage(usage))
    }

    fn check_bindings<T>(&self, bindings: &[T]) -> Result<()> {
        if bindings.len() == self.parameters.len() {
            Ok(())
        } else {
            Err(Error::BindingCountMismatch {
                expected: self.parameters.len(),
                actual: bindings.len(),
            })
        }
    }

    /// The summary element of one parameter, scored by its binding or zero if it has none.
    fn summary_element(
        &self,
        semiring: &SummarySemiring<Tropical<i64>>,
        parameter: usize,
        bindings: &[i64],
    ) -> Summary<MaxPlus<i64>> {
        let score = MaxPlus::Finite(bindings.get(parameter).copied().unwrap_or_default());
        if parameter < self.parameters.len() {
            semiring.unit(score, parameter)
        } else {
            Summary {
                score,
                usage: vec![0; self.parameters.len()],
            }
        }
    }

    fn usage(&self, counts: Vec<usize>) -> ParameterUsage {
        ParameterUsage {
            parameters: self.parameters.clone(),
            counts,
        }
    }
}

impl ParameterUsage {
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn count(&self, parameter: &str) -> Option<usize> {
        self.iter()
            .find(|&(name, _)| name == parameter)
            .map(|(_, count)| count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.parameters
            .iter()
            .map(String::as_str)
            .zip(self.counts.iter().copied())
    }

    /// The score of the summarized alignment under the given bindings,
    /// which are ordered like [`parameters`](Self::parameters).
    pub fn score<T: PrimInt>(&self, bindings: &[T]) -> Result<T> {
        if bindings.len() != self.parameters.len() {
            return Err(Error::BindingCountMismatch {
                expected: self.parameters.len(),
                actual: bindings.len(),
            });
        }

        self.counts
            .iter()
            .zip(bindings)
            .try_fold(T::zero(), |score, (&count, &binding)| {
                <T as NumCast>::from(count)
                    .and_then(|count| count.checked_mul(&binding))
                    .and_then(|term| score.checked_add(&term))
                    .ok_or(Error::UsageOverflow(count))
            })
    }
}

impl Display for ParameterUsage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut once = false;
        for (name, count) in self.iter() {
            if once {
                write!(f, "\t")?;
            } else {
                once = true;
            }

            write!(f, "{name}: {count}")?;
        }

        Ok(())
    }
}
