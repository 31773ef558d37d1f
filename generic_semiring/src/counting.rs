use std::cmp::Ordering;

use crate::{SelectiveSemiring, Semiring};

#[cfg(test)]
mod tests;

/// A value of the base semiring together with the number of best paths that produce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Counted<E> {
    pub value: E,
    pub count: u64,
}

/// Counts co-optimal paths over a selective base semiring.
///
/// Sum keeps the greater value and adds the counts if both values are equal.
/// Product multiplies both the values and the counts.
/// Counts saturate at [`u64::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counting<S> {
    base: S,
}

impl<S> Counting<S> {
    pub fn new(base: S) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &S {
        &self.base
    }
}

impl<S: Semiring> Counting<S> {
    /// Lift a base element into a single path.
    pub fn unit(&self, value: S::Element) -> Counted<S::Element> {
        Counted { value, count: 1 }
    }
}

impl<S: SelectiveSemiring> Semiring for Counting<S> {
    type Element = Counted<S::Element>;

    fn zero(&self) -> Self::Element {
        Counted {
            value: self.base.zero(),
            count: 0,
        }
    }

    fn one(&self) -> Self::Element {
        Counted {
            value: self.base.one(),
            count: 1,
        }
    }

    fn combine_sum(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        match self.base.compare(&a.value, &b.value) {
            Ordering::Greater => a.clone(),
            Ordering::Less => b.clone(),
            Ordering::Equal => Counted {
                value: a.value.clone(),
                count: a.count.saturating_add(b.count),
            },
        }
    }

    fn combine_product(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Counted {
            value: self.base.combine_product(&a.value, &b.value),
            count: a.count.saturating_mul(b.count),
        }
    }
}

impl<S: SelectiveSemiring> SelectiveSemiring for Counting<S> {
    fn compare(&self, a: &Self::Element, b: &Self::Element) -> Ordering {
        self.base.compare(&a.value, &b.value)
    }
}
