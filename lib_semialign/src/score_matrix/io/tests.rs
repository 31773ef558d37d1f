use generic_semiring::max_plus::MaxPlus;

use crate::{
    alphabet::Alphabet,
    error::Error,
    recurrence::GapCosts,
    score_matrix::{ScoreMatrix, ScoreTable},
};

const UNIT_DNA: &str = "# Unit DNA\n\nScoreTable\n  |  A  C  G  T\n--+------------\nA |  0 -1 -1 -1\nC | -1  0 -1 -1\nG | -1 -1  0 -1\nT | -1 -1 -1  0\n\nGapCosts\nopen_deletion = -2\nextend_deletion = -1\nopen_insertion = -2\nextend_insertion = -1\n";

#[test]
fn numeric_table() {
    let expected_parsing_result = ScoreTable {
        name: "Unit DNA".to_string(),
        matrix: ScoreMatrix::match_mismatch(
            Alphabet::dna(),
            MaxPlus::Finite(0i64),
            MaxPlus::Finite(-1),
        ),
        gap_costs: Some(GapCosts::symmetric(MaxPlus::Finite(-2), MaxPlus::Finite(-1))),
    };

    let actual_parsing_result = ScoreTable::<MaxPlus<i64>>::read_plain(UNIT_DNA.as_bytes()).unwrap();
    let mut writer = Vec::new();
    actual_parsing_result.write_plain(&mut writer).unwrap();
    let output = String::from_utf8(writer).unwrap();

    assert_eq!(expected_parsing_result, actual_parsing_result);
    assert_eq!(UNIT_DNA, output);
}

#[test]
fn symbolic_table_without_gap_costs() {
    let input = "ScoreTable\n  | A C G T\n--+--------\nA | 0 x x x\nC | x 0 x x\nG | x x 0 x\nT | x x x 0\n";

    let table = ScoreTable::<String>::read_plain(input.as_bytes()).unwrap();
    assert_eq!(table.name, "");
    assert!(table.gap_costs.is_none());
    assert!(matches!(table.gap_costs(), Err(Error::MissingGapCosts)));
    assert_eq!(table.matrix.character_score(b'G', b'G').unwrap(), "0");
    assert_eq!(table.matrix.character_score(b'G', b'T').unwrap(), "x");

    let mut writer = Vec::new();
    table.write_plain(&mut writer).unwrap();
    assert_eq!(input, String::from_utf8(writer).unwrap());
}

#[test]
fn rows_in_any_order() {
    let input = "ScoreTable\n  | a b\n--+----\nb | 3 4\na | 1 2\n";

    let table = ScoreTable::<i32>::read_plain(input.as_bytes()).unwrap();
    assert_eq!(table.matrix.alphabet().characters(), b"ab");
    assert_eq!(table.matrix.entries(), &[1, 2, 3, 4]);
}

#[test]
fn duplicate_rows_are_rejected() {
    let input = "ScoreTable\n  | a b\n--+----\nb | 3 4\nb | 1 2\n";

    assert!(matches!(
        ScoreTable::<i32>::read_plain(input.as_bytes()),
        Err(Error::Parser { .. })
    ));
}

#[test]
fn malformed_entry_is_rejected() {
    let input = "ScoreTable\n  | a b\n--+----\na | 1 z\nb | 3 4\n";

    assert!(matches!(
        ScoreTable::<i32>::read_plain(input.as_bytes()),
        Err(Error::Parser {
            kind: nom::error::ErrorKind::MapRes,
            ..
        })
    ));
}
