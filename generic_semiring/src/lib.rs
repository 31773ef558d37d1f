//! Semirings over which a dynamic programming recurrence can be evaluated.
//!
//! A recurrence written against [`Semiring`] only ever combines alternatives with
//! [`Semiring::combine_sum`] and extends paths with [`Semiring::combine_product`].
//! Swapping the semiring changes what the recurrence computes: the best score
//! ([`max_plus::Tropical`]), the number of best paths ([`counting::Counting`]) or
//! a deterministic per-parameter usage vector of a best path ([`summary::SummarySemiring`]).

use std::{cmp::Ordering, fmt::Debug};

pub mod counting;
pub mod max_plus;
pub mod summary;

/// A semiring `(E, ⊕, ⊗, 0, 1)`.
///
/// Implementations must satisfy the semiring laws:
/// `⊕` is associative and commutative with identity [`zero`](Semiring::zero),
/// `⊗` is associative with identity [`one`](Semiring::one) and distributes over `⊕`,
/// and `zero` annihilates `⊗`.
///
/// The semiring is a value rather than a type-level marker,
/// because some semirings need runtime information to construct their identities.
pub trait Semiring {
    type Element: Clone + Debug;

    /// The identity of [`combine_sum`](Semiring::combine_sum), meaning "no path".
    fn zero(&self) -> Self::Element;

    /// The identity of [`combine_product`](Semiring::combine_product), meaning "the empty path".
    fn one(&self) -> Self::Element;

    fn combine_sum(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    fn combine_product(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    /// Sum all given elements, returning [`zero`](Semiring::zero) for an empty iterator.
    fn sum_all<'element>(
        &self,
        elements: impl IntoIterator<Item = &'element Self::Element>,
    ) -> Self::Element
    where
        Self::Element: 'element,
    {
        elements
            .into_iter()
            .fold(self.zero(), |sum, element| self.combine_sum(&sum, element))
    }

    /// Multiply all given elements, returning [`one`](Semiring::one) for an empty iterator.
    fn product_all<'element>(
        &self,
        elements: impl IntoIterator<Item = &'element Self::Element>,
    ) -> Self::Element
    where
        Self::Element: 'element,
    {
        elements
            .into_iter()
            .fold(self.one(), |product, element| {
                self.combine_product(&product, element)
            })
    }
}

/// A semiring whose sum selects one of its operands.
///
/// The selection is described by a total order:
/// `combine_sum(a, b)` must be equivalent to the greater of `a` and `b` under [`compare`](SelectiveSemiring::compare).
/// Aligners need this to recover *which* alternative produced a sum.
pub trait SelectiveSemiring: Semiring {
    fn compare(&self, a: &Self::Element, b: &Self::Element) -> Ordering;

    fn is_equal(&self, a: &Self::Element, b: &Self::Element) -> bool {
        self.compare(a, b) == Ordering::Equal
    }

    fn is_zero(&self, element: &Self::Element) -> bool {
        self.is_equal(element, &self.zero())
    }
}

impl<S: Semiring + ?Sized> Semiring for &S {
    type Element = S::Element;

    fn zero(&self) -> Self::Element {
        (**self).zero()
    }

    fn one(&self) -> Self::Element {
        (**self).one()
    }

    fn combine_sum(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        (**self).combine_sum(a, b)
    }

    fn combine_product(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        (**self).combine_product(a, b)
    }
}

impl<S: SelectiveSemiring + ?Sized> SelectiveSemiring for &S {
    fn compare(&self, a: &Self::Element, b: &Self::Element) -> Ordering {
        (**self).compare(a, b)
    }
}
