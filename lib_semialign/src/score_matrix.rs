use crate::{
    alphabet::Alphabet,
    error::{Error, Result},
    recurrence::GapCosts,
};

pub mod io;

#[cfg(test)]
mod tests;

/// Scores of aligning two alphabet characters against each other.
///
/// Entries are stored row-major, indexed by the encoded characters of the first and second sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreMatrix<Element> {
    alphabet: Alphabet,
    entries: Vec<Element>,
}

/// A score matrix with a name and optional gap costs, as read from a score table file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreTable<Element> {
    pub name: String,
    pub matrix: ScoreMatrix<Element>,
    pub gap_costs: Option<GapCosts<Element>>,
}

impl<Element> ScoreMatrix<Element> {
    pub fn new(alphabet: Alphabet, entries: Vec<Element>) -> Result<Self> {
        let expected = alphabet.size() * alphabet.size();
        if entries.len() != expected {
            return Err(Error::ScoreTableSize {
                alphabet_size: alphabet.size(),
                expected,
                actual: entries.len(),
            });
        }

        Ok(Self { alphabet, entries })
    }

    /// Build a matrix by calling `score` with each pair of encoded characters.
    pub fn from_fn(alphabet: Alphabet, mut score: impl FnMut(u8, u8) -> Element) -> Self {
        let size = alphabet.size();
        let entries = (0..size)
            .flat_map(|row| (0..size).map(move |column| (row as u8, column as u8)))
            .map(|(row, column)| score(row, column))
            .collect();

        Self { alphabet, entries }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// The score of aligning the encoded characters `first` and `second`.
    #[inline]
    pub fn score(&self, first: u8, second: u8) -> &Element {
        &self.entries[usize::from(first) * self.alphabet.size() + usize::from(second)]
    }

    /// The score of aligning two characters given in plain text.
    pub fn character_score(&self, first: u8, second: u8) -> Option<&Element> {
        Some(self.score(
            self.alphabet.index_of(first)?,
            self.alphabet.index_of(second)?,
        ))
    }

    pub fn entries(&self) -> &[Element] {
        &self.entries
    }

    pub fn map<Target>(&self, f: impl FnMut(&Element) -> Target) -> ScoreMatrix<Target> {
        ScoreMatrix {
            alphabet: self.alphabet.clone(),
            entries: self.entries.iter().map(f).collect(),
        }
    }

    pub fn try_map<Target>(
        &self,
        f: impl FnMut(&Element) -> Result<Target>,
    ) -> Result<ScoreMatrix<Target>> {
        Ok(ScoreMatrix {
            alphabet: self.alphabet.clone(),
            entries: self.entries.iter().map(f).collect::<Result<_>>()?,
        })
    }
}

impl<Element: Clone> ScoreMatrix<Element> {
    /// All identical pairs score `match_score`, all others `mismatch_score`.
    pub fn match_mismatch(alphabet: Alphabet, match_score: Element, mismatch_score: Element) -> Self {
        Self::from_fn(alphabet, |first, second| {
            if first == second {
                match_score.clone()
            } else {
                mismatch_score.clone()
            }
        })
    }

    /// A DNA matrix distinguishing transitions (purine to purine, pyrimidine to pyrimidine)
    /// from transversions.
    pub fn transition_transversion(
        match_score: Element,
        transition_score: Element,
        transversion_score: Element,
    ) -> Self {
        let alphabet = Alphabet::dna();
        let is_purine: Vec<_> = alphabet
            .characters()
            .iter()
            .map(|character| matches!(character, b'A' | b'G'))
            .collect();

        Self::from_fn(alphabet, |first, second| {
            if first == second {
                match_score.clone()
            } else if is_purine[usize::from(first)] == is_purine[usize::from(second)] {
                transition_score.clone()
            } else {
                transversion_score.clone()
            }
        })
    }
}

impl<Element> ScoreTable<Element> {
    pub fn gap_costs(&self) -> Result<&GapCosts<Element>> {
        self.gap_costs.as_ref().ok_or(Error::MissingGapCosts)
    }
}
