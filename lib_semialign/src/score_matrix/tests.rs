use crate::{alphabet::Alphabet, error::Error};

use super::ScoreMatrix;

#[test]
fn match_mismatch() {
    let matrix = ScoreMatrix::match_mismatch(Alphabet::dna(), 1, -1);

    assert_eq!(matrix.character_score(b'A', b'A'), Some(&1));
    assert_eq!(matrix.character_score(b'A', b'c'), Some(&-1));
    assert_eq!(matrix.character_score(b'A', b'N'), None);
    assert_eq!(matrix.score(3, 3), &1);
}

#[test]
fn transition_transversion() {
    let matrix = ScoreMatrix::transition_transversion(2, -1, -3);

    assert_eq!(matrix.character_score(b'A', b'G'), Some(&-1));
    assert_eq!(matrix.character_score(b'C', b'T'), Some(&-1));
    assert_eq!(matrix.character_score(b'A', b'C'), Some(&-3));
    assert_eq!(matrix.character_score(b'G', b'T'), Some(&-3));
    assert_eq!(matrix.character_score(b'T', b'T'), Some(&2));
}

#[test]
fn wrong_entry_count() {
    assert!(matches!(
        ScoreMatrix::new(Alphabet::dna(), vec![0; 15]),
        Err(Error::ScoreTableSize {
            alphabet_size: 4,
            expected: 16,
            actual: 15,
        })
    ));
}

#[test]
fn map_keeps_layout() {
    let alphabet = Alphabet::new(b"xy").unwrap();
    let matrix = ScoreMatrix::new(alphabet, vec!["a", "b", "c", "d"]).unwrap();
    let mapped = matrix.map(|entry| entry.to_uppercase());

    assert_eq!(mapped.character_score(b'y', b'x').unwrap(), "C");
    assert_eq!(mapped.alphabet(), matrix.alphabet());
}
