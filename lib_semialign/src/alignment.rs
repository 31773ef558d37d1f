use std::fmt::Display;

use crate::{
    alphabet::GAP,
    error::{Error, Result},
};


/// One side of a pairwise alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    First,
    Second,
}

/// A pairwise alignment, stored as two gapped rows of equal length.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Alignment {
    first: Vec<u8>,
    second: Vec<u8>,
}

impl Alignment {
    pub fn new(first: impl Into<Vec<u8>>, second: impl Into<Vec<u8>>) -> Result<Self> {
        let first = first.into();
        let second = second.into();
        if first.len() != second.len() {
            return Err(Error::AlignmentLengthMismatch {
                first: first.len(),
                second: second.len(),
            });
        }

        Ok(Self { first, second })
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            first: Vec::with_capacity(capacity),
            second: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn from_columns(columns: impl IntoIterator<Item = (u8, u8)>) -> Self {
        let (first, second) = columns.into_iter().unzip();
        Self { first, second }
    }

    /// Aligns every character of `sequence` against a gap.
    pub(crate) fn gapped(sequence: &[u8], side: Side) -> Self {
        let gaps = vec![GAP; sequence.len()];
        match side {
            Side::First => Self {
                first: sequence.to_vec(),
                second: gaps,
            },
            Side::Second => Self {
                first: gaps,
                second: sequence.to_vec(),
            },
        }
    }

    pub(crate) fn push(&mut self, first: u8, second: u8) {
        self.first.push(first);
        self.second.push(second);
    }

    pub(crate) fn reverse(&mut self) {
        self.first.reverse();
        self.second.reverse();
    }

    pub fn first(&self) -> &[u8] {
        &self.first
    }

    pub fn second(&self) -> &[u8] {
        &self.second
    }

    pub fn side(&self, side: Side) -> &[u8] {
        match side {
            Side::First => &self.first,
            Side::Second => &self.second,
        }
    }

    pub fn len(&self) -> usize {
        self.first.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.first.iter().copied().zip(self.second.iter().copied())
    }

    /// Appends the columns of `other`.
    pub fn extend(&mut self, other: &Self) {
        self.first.extend_from_slice(&other.first);
        self.second.extend_from_slice(&other.second);
    }

    pub fn concat(mut self, other: &Self) -> Self {
        self.extend(other);
        self
    }

    /// Swaps the two sides.
    pub fn flipped(self) -> Self {
        Self {
            first: self.second,
            second: self.first,
        }
    }

    /// The characters of one side with all gaps removed.
    pub fn ungapped(&self, side: Side) -> Vec<u8> {
        self.side(side)
            .iter()
            .copied()
            .filter(|&character| character != GAP)
            .collect()
    }

    /// The number of columns that pair two equal non-gap characters.
    pub fn identities(&self) -> usize {
        self.columns()
            .filter(|&(first, second)| first == second && first != GAP)
            .count()
    }

    /// The columns spanning the characters `start..end` of the given side,
    /// counted without gaps.
    ///
    /// The slice begins at the column of character `start` and ends after the column of character `end - 1`,
    /// so gap columns before the first or after the last selected character are not included.
    /// An empty range yields an empty alignment.
    pub fn slice(&self, side: Side, start: usize, end: usize) -> Result<Self> {
        let row = self.side(side);
        let character_columns: Vec<_> = row
            .iter()
            .enumerate()
            .filter(|(_, character)| **character != GAP)
            .map(|(column, _)| column)
            .collect();

        if start > end || end > character_columns.len() {
            return Err(Error::SliceOutOfRange {
                start,
                end,
                length: character_columns.len(),
            });
        }
        if start == end {
            return Ok(Self::default());
        }

        let columns = character_columns[start]..character_columns[end - 1] + 1;
        Ok(Self {
            first: self.first[columns.clone()].to_vec(),
            second: self.second[columns].to_vec(),
        })
    }
}

impl Display for Alignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", String::from_utf8_lossy(&self.first))?;
        write!(f, "{}", String::from_utf8_lossy(&self.second))
    }
}
