use crate::error::Error;

use super::{Alphabet, EncodedSequence};

#[test]
fn dna() {
    let alphabet = Alphabet::dna();

    assert_eq!(alphabet.size(), 4);
    assert_eq!(alphabet.index_of(b'A'), Some(0));
    assert_eq!(alphabet.index_of(b't'), Some(3));
    assert_eq!(alphabet.index_of(b'N'), None);
    assert_eq!(alphabet.encode(b"GATc").unwrap(), vec![2, 0, 3, 1]);
    assert_eq!(alphabet.decode(&[2, 0, 3, 1]), b"GATC");
}

#[test]
fn invalid_character_reports_position() {
    let alphabet = Alphabet::dna();

    match alphabet.encode(b"ACNT") {
        Err(Error::InvalidCharacter {
            character,
            position,
        }) => {
            assert_eq!(character, 'N');
            assert_eq!(position, 2);
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn custom_alphabet() {
    let alphabet = Alphabet::new(b"xyz").unwrap();

    assert_eq!(alphabet.encode(b"zzx").unwrap(), vec![2, 2, 0]);
    assert!(!alphabet.contains(b'X'));
    assert!(matches!(
        Alphabet::new(b"xyx"),
        Err(Error::DuplicateAlphabetCharacter('x'))
    ));
    assert!(matches!(
        Alphabet::new(b"a-b"),
        Err(Error::ReservedAlphabetCharacter('-'))
    ));
    assert!(matches!(
        Alphabet::new(&[b'a'; 300]),
        Err(Error::AlphabetTooLarge(300))
    ));
}

#[test]
fn encoded_sequence_split_keeps_raw_characters() {
    let alphabet = Alphabet::dna();
    let raw = b"acGT";
    let codes = alphabet.encode(raw).unwrap();
    let sequence = EncodedSequence::new(raw, &codes);

    let (prefix, suffix) = sequence.split_at(1);
    assert_eq!(prefix.raw, b"a");
    assert_eq!(prefix.codes, [0]);
    assert_eq!(suffix.raw, b"cGT");
    assert_eq!(suffix.codes, [1, 2, 3]);
    assert_eq!(suffix.len(), 3);
    assert!(!suffix.is_empty());
    assert!(sequence.split_at(4).1.is_empty());
}
