use std::cmp::Ordering;

use crate::{SelectiveSemiring, Semiring};

#[cfg(test)]
mod tests;

/// A score together with how often each parameter contributed to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary<E> {
    pub score: E,
    pub usage: Vec<usize>,
}

/// Tracks per-parameter usage counts alongside a selective score semiring.
///
/// Sum keeps the operand with the greater score.
/// Equal scores are broken by comparing the usage vectors lexicographically,
/// where the *smaller* vector wins, so that earlier parameters weigh more.
/// Product combines the scores and adds the usage vectors component-wise.
///
/// All elements of one semiring have usage vectors of length [`dimensions`](SummarySemiring::dimensions).
/// Combining vectors of different lengths panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummarySemiring<S> {
    base: S,
    dimensions: usize,
}

impl<S> SummarySemiring<S> {
    pub fn new(base: S, dimensions: usize) -> Self {
        Self { base, dimensions }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn base(&self) -> &S {
        &self.base
    }
}

impl<S: Semiring> SummarySemiring<S> {
    /// An element that uses the given parameter once and has the given score.
    pub fn unit(&self, score: S::Element, dimension: usize) -> Summary<S::Element> {
        assert!(
            dimension < self.dimensions,
            "unit dimension {dimension} out of range for {} dimensions",
            self.dimensions
        );

        let mut usage = vec![0; self.dimensions];
        usage[dimension] = 1;
        Summary { score, usage }
    }
}

impl<S: SelectiveSemiring> Semiring for SummarySemiring<S> {
    type Element = Summary<S::Element>;

    fn zero(&self) -> Self::Element {
        Summary {
            score: self.base.zero(),
            usage: vec![0; self.dimensions],
        }
    }

    fn one(&self) -> Self::Element {
        Summary {
            score: self.base.one(),
            usage: vec![0; self.dimensions],
        }
    }

    fn combine_sum(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        if self.compare(a, b) == Ordering::Less {
            b.clone()
        } else {
            a.clone()
        }
    }

    fn combine_product(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        assert_eq!(
            a.usage.len(),
            b.usage.len(),
            "combined summaries of different dimensions"
        );

        Summary {
            score: self.base.combine_product(&a.score, &b.score),
            usage: a
                .usage
                .iter()
                .zip(&b.usage)
                .map(|(a, b)| a + b)
                .collect(),
        }
    }
}

impl<S: SelectiveSemiring> SelectiveSemiring for SummarySemiring<S> {
    fn compare(&self, a: &Self::Element, b: &Self::Element) -> Ordering {
        assert_eq!(
            a.usage.len(),
            b.usage.len(),
            "compared summaries of different dimensions"
        );

        self.base
            .compare(&a.score, &b.score)
            .then_with(|| b.usage.cmp(&a.usage))
    }
}
