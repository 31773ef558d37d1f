use std::{
    cmp::Ordering,
    fmt::{Debug, Display},
    marker::PhantomData,
    str::FromStr,
};

use num_traits::{SaturatingAdd, Zero};

use crate::{SelectiveSemiring, Semiring};

#[cfg(test)]
mod tests;

/// An element of the max-plus semiring over `T`.
///
/// Negative infinity is an explicit variant, so no value of `T` is reserved as a sentinel.
/// The derived order places it below every finite value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MaxPlus<T> {
    NegativeInfinity,
    Finite(T),
}

/// The max-plus (tropical) semiring: sum is maximum, product is addition.
///
/// Finite products saturate at the bounds of `T` instead of wrapping,
/// so an overflowing score never overtakes a smaller one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tropical<T> {
    phantom_data: PhantomData<T>,
}

impl<T> MaxPlus<T> {
    pub fn is_finite(&self) -> bool {
        matches!(self, Self::Finite(_))
    }

    pub fn finite(self) -> Option<T> {
        match self {
            Self::NegativeInfinity => None,
            Self::Finite(value) => Some(value),
        }
    }
}

impl<T> From<T> for MaxPlus<T> {
    fn from(value: T) -> Self {
        Self::Finite(value)
    }
}

impl<T: Display> Display for MaxPlus<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeInfinity => write!(f, "-inf"),
            Self::Finite(value) => Display::fmt(value, f),
        }
    }
}

impl<T: FromStr> FromStr for MaxPlus<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-inf" {
            Ok(Self::NegativeInfinity)
        } else {
            T::from_str(s).map(Self::Finite)
        }
    }
}

impl<T> Tropical<T> {
    pub const fn new() -> Self {
        Self {
            phantom_data: PhantomData,
        }
    }
}

impl<T> Default for Tropical<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Ord + SaturatingAdd + Zero + Debug> Semiring for Tropical<T> {
    type Element = MaxPlus<T>;

    fn zero(&self) -> Self::Element {
        MaxPlus::NegativeInfinity
    }

    fn one(&self) -> Self::Element {
        MaxPlus::Finite(T::zero())
    }

    fn combine_sum(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        *a.max(b)
    }

    fn combine_product(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        match (a, b) {
            (MaxPlus::Finite(a), MaxPlus::Finite(b)) => MaxPlus::Finite(a.saturating_add(b)),
            _ => MaxPlus::NegativeInfinity,
        }
    }
}

impl<T: Copy + Ord + SaturatingAdd + Zero + Debug> SelectiveSemiring for Tropical<T> {
    fn compare(&self, a: &Self::Element, b: &Self::Element) -> Ordering {
        a.cmp(b)
    }
}
