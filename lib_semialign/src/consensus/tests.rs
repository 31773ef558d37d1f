use generic_semiring::max_plus::{MaxPlus, Tropical};

use crate::{
    alignment::Alignment,
    alphabet::Alphabet,
    recurrence::{GapCosts, Recurrence},
    score_matrix::ScoreMatrix,
};

use super::ConsensusAligner;

fn unit_matrix() -> ScoreMatrix<MaxPlus<i64>> {
    ScoreMatrix::match_mismatch(Alphabet::dna(), MaxPlus::Finite(0), MaxPlus::Finite(-1))
}

fn unit_gap_costs() -> GapCosts<MaxPlus<i64>> {
    GapCosts::symmetric(MaxPlus::Finite(-2), MaxPlus::Finite(-1))
}

#[test]
fn unique_optimum() {
    let matrix = unit_matrix();
    let aligner = ConsensusAligner::new(Recurrence::new(Tropical::new(), &matrix, unit_gap_costs()));

    assert_eq!(
        aligner.consensus(b"ACGT", b"AGT").unwrap(),
        Alignment::new("ACGT", "A-GT").unwrap()
    );
    assert_eq!(
        aligner.consensus(b"ACGT", b"ACGT").unwrap(),
        Alignment::new("ACGT", "ACGT").unwrap()
    );
}

#[test]
fn ambiguous_gap_placement() {
    let matrix = unit_matrix();
    let aligner = ConsensusAligner::new(Recurrence::new(Tropical::new(), &matrix, unit_gap_costs()));

    assert_eq!(
        aligner.consensus(b"AA", b"A").unwrap(),
        Alignment::new("AA=", "==A").unwrap()
    );
}

#[test]
fn empty_side() {
    let matrix = unit_matrix();
    let aligner = ConsensusAligner::new(Recurrence::new(Tropical::new(), &matrix, unit_gap_costs()));

    assert_eq!(
        aligner.consensus(b"", b"AC").unwrap(),
        Alignment::new("--", "AC").unwrap()
    );
    assert_eq!(
        aligner.consensus(b"G", b"").unwrap(),
        Alignment::new("G", "-").unwrap()
    );
    assert!(aligner.consensus(b"", b"").unwrap().is_empty());
}

#[test]
fn keeps_input_case() {
    let matrix = unit_matrix();
    let aligner = ConsensusAligner::new(Recurrence::new(Tropical::new(), &matrix, unit_gap_costs()));

    assert_eq!(
        aligner.consensus(b"acgt", b"aGt").unwrap(),
        Alignment::new("acgt", "a-Gt").unwrap()
    );
    assert_eq!(
        aligner.consensus(b"aA", b"a").unwrap(),
        Alignment::new("aA=", "==a").unwrap()
    );
}
