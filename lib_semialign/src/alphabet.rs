//! Dense encoding of sequence characters.

use crate::error::{Error, Result};

#[cfg(test)]
mod tests;

/// The gap character used in alignments.
pub const GAP: u8 = b'-';

/// Marks a consensus column whose pairing differs between optimal alignments.
pub const AMBIGUOUS: u8 = b'=';

const UNMAPPED: u8 = u8::MAX;

/// An ordered set of characters, each mapped to its index.
///
/// Sequences are encoded into these indices before alignment,
/// so that score lookups are plain array accesses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    characters: Vec<u8>,
    lookup: [u8; 256],
}

impl Alphabet {
    pub fn new(characters: &[u8]) -> Result<Self> {
        let mut lookup = [UNMAPPED; 256];

        if characters.len() >= usize::from(UNMAPPED) {
            return Err(Error::AlphabetTooLarge(characters.len()));
        }

        for (index, &character) in characters.iter().enumerate() {
            if character == GAP || character == AMBIGUOUS || character.is_ascii_whitespace() {
                return Err(Error::ReservedAlphabetCharacter(char::from(character)));
            }
            if lookup[usize::from(character)] != UNMAPPED {
                return Err(Error::DuplicateAlphabetCharacter(char::from(character)));
            }
            lookup[usize::from(character)] = index as u8;
        }

        Ok(Self {
            characters: characters.to_vec(),
            lookup,
        })
    }

    /// The DNA alphabet `ACGT`, also accepting lower case characters.
    pub fn dna() -> Self {
        let characters = b"ACGT";
        let mut lookup = [UNMAPPED; 256];
        for (index, &character) in characters.iter().enumerate() {
            lookup[usize::from(character)] = index as u8;
            lookup[usize::from(character.to_ascii_lowercase())] = index as u8;
        }

        Self {
            characters: characters.to_vec(),
            lookup,
        }
    }

    pub fn size(&self) -> usize {
        self.characters.len()
    }

    pub fn characters(&self) -> &[u8] {
        &self.characters
    }

    pub fn index_of(&self, character: u8) -> Option<u8> {
        match self.lookup[usize::from(character)] {
            UNMAPPED => None,
            index => Some(index),
        }
    }

    pub fn character(&self, index: u8) -> u8 {
        self.characters[usize::from(index)]
    }

    pub fn contains(&self, character: u8) -> bool {
        self.index_of(character).is_some()
    }

    pub fn encode(&self, sequence: &[u8]) -> Result<Vec<u8>> {
        sequence
            .iter()
            .enumerate()
            .map(|(position, &character)| {
                self.index_of(character)
                    .ok_or(Error::InvalidCharacter {
                        character: char::from(character),
                        position,
                    })
            })
            .collect()
    }

    pub fn decode(&self, codes: &[u8]) -> Vec<u8> {
        codes.iter().map(|&code| self.character(code)).collect()
    }
}

/// A sequence next to its encoding, both of the same length.
///
/// Scores are looked up with the codes, while alignments are built from the raw characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EncodedSequence<'sequence> {
    pub raw: &'sequence [u8],
    pub codes: &'sequence [u8],
}

impl<'sequence> EncodedSequence<'sequence> {
    pub fn new(raw: &'sequence [u8], codes: &'sequence [u8]) -> Self {
        debug_assert_eq!(raw.len(), codes.len());
        Self { raw, codes }
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn split_at(self, middle: usize) -> (Self, Self) {
        let (raw_prefix, raw_suffix) = self.raw.split_at(middle);
        let (prefix, suffix) = self.codes.split_at(middle);
        (Self::new(raw_prefix, prefix), Self::new(raw_suffix, suffix))
    }
}
