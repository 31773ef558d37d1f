use generic_semiring::max_plus::{MaxPlus, Tropical};

use crate::{
    alignment::{Alignment, Side},
    alphabet::Alphabet,
    error::Error,
    recurrence::{GapCosts, Recurrence, State},
    score_matrix::ScoreMatrix,
};

use super::QuadraticAligner;

fn unit_matrix() -> ScoreMatrix<MaxPlus<i64>> {
    ScoreMatrix::match_mismatch(Alphabet::dna(), MaxPlus::Finite(0), MaxPlus::Finite(-1))
}

fn unit_gap_costs() -> GapCosts<MaxPlus<i64>> {
    GapCosts::symmetric(MaxPlus::Finite(-2), MaxPlus::Finite(-1))
}

#[test]
fn single_deletion() {
    let matrix = unit_matrix();
    let aligner = QuadraticAligner::new(Recurrence::new(Tropical::new(), &matrix, unit_gap_costs()));

    assert_eq!(
        aligner.align(b"ACGT", b"AGT").unwrap(),
        Alignment::new("ACGT", "A-GT").unwrap()
    );
}

#[test]
fn empty_sides() {
    let matrix = unit_matrix();
    let aligner = QuadraticAligner::new(Recurrence::new(Tropical::new(), &matrix, unit_gap_costs()));

    assert_eq!(
        aligner.align(b"", b"ACG").unwrap(),
        Alignment::new("---", "ACG").unwrap()
    );
    assert_eq!(
        aligner.align(b"TT", b"").unwrap(),
        Alignment::new("TT", "--").unwrap()
    );
    assert!(aligner.align(b"", b"").unwrap().is_empty());
}

#[test]
fn ties_prefer_matches() {
    let matrix = unit_matrix();
    let aligner = QuadraticAligner::new(Recurrence::new(Tropical::new(), &matrix, unit_gap_costs()));

    assert_eq!(
        aligner.align(b"AA", b"A").unwrap(),
        Alignment::new("AA", "-A").unwrap()
    );
}

#[test]
fn alignments_are_optimal() {
    let matrix = unit_matrix();
    let recurrence = Recurrence::new(Tropical::new(), &matrix, unit_gap_costs());
    let aligner = QuadraticAligner::new(recurrence.clone());

    for (first, second) in [
        ("GATTACA", "GCATGCT"),
        ("A", "ACGTACGT"),
        ("ACGTACGT", "T"),
        ("AACCGGTT", "ACGT"),
        ("CAGTTTAGCA", "CAGCA"),
        ("acgt", "ACGT"),
    ] {
        let (first, second) = (first.as_bytes(), second.as_bytes());
        let alignment = aligner.align(first, second).unwrap();
        assert_eq!(alignment.ungapped(Side::First), first);
        assert_eq!(alignment.ungapped(Side::Second), second);
        assert_eq!(
            recurrence.score_alignment(&alignment).unwrap(),
            recurrence.score(first, second).unwrap()
        );
    }
}

#[test]
fn affine_gaps_are_merged() {
    let matrix = ScoreMatrix::match_mismatch(
        Alphabet::dna(),
        MaxPlus::Finite(0),
        MaxPlus::Finite(-100),
    );
    let aligner = QuadraticAligner::new(Recurrence::new(
        Tropical::new(),
        &matrix,
        GapCosts::symmetric(MaxPlus::Finite(-10), MaxPlus::Finite(-1)),
    ));

    assert_eq!(
        aligner.align(b"AACCCCTT", b"AATT").unwrap(),
        Alignment::new("AACCCCTT", "AA----TT").unwrap()
    );
}

#[test]
fn invalid_character() {
    let matrix = unit_matrix();
    let aligner = QuadraticAligner::new(Recurrence::new(Tropical::new(), &matrix, unit_gap_costs()));

    assert!(matches!(
        aligner.align(b"ACXT", b"ACGT"),
        Err(Error::InvalidCharacter {
            character: 'X',
            position: 2
        })
    ));
}

#[test]
fn unreachable_end() {
    let matrix = ScoreMatrix::match_mismatch(
        Alphabet::dna(),
        MaxPlus::Finite(0),
        MaxPlus::NegativeInfinity,
    );
    let aligner = QuadraticAligner::new(Recurrence::new(
        Tropical::new(),
        &matrix,
        GapCosts::symmetric(MaxPlus::NegativeInfinity, MaxPlus::NegativeInfinity),
    ));

    assert!(matches!(
        aligner.align(b"A", b"T"),
        Err(Error::InvalidTracebackState {
            row: 1,
            column: 1,
            state: State::Match
        })
    ));
    assert_eq!(
        aligner.align(b"CA", b"CA").unwrap(),
        Alignment::new("CA", "CA").unwrap()
    );
}

#[test]
fn keeps_input_case() {
    let matrix = unit_matrix();
    let aligner = QuadraticAligner::new(Recurrence::new(Tropical::new(), &matrix, unit_gap_costs()));

    let alignment = aligner.align(b"acgt", b"aGt").unwrap();
    assert_eq!(alignment, Alignment::new("acgt", "a-Gt").unwrap());
    assert_eq!(alignment.ungapped(Side::First), b"acgt");
    assert_eq!(alignment.ungapped(Side::Second), b"aGt");
}
