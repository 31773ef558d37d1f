use thiserror::Error;

use crate::recurrence::State;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("An IO error occurred: {0}.")]
    Io(#[from] std::io::Error),

    #[error("A parsing error of kind '{kind:?}' occurred when the remaining input was '{input}'.")]
    Parser {
        input: String,
        kind: nom::error::ErrorKind,
    },

    #[error("Parsing was unsuccessful due to incomplete input: {0:?}.")]
    ParserIncomplete(nom::Needed),

    #[error("The character '{character}' at position {position} is not part of the alphabet.")]
    InvalidCharacter { character: char, position: usize },

    #[error("The alphabet character '{0}' was given twice.")]
    DuplicateAlphabetCharacter(char),

    #[error("An alphabet can have at most 254 characters, but got {0}.")]
    AlphabetTooLarge(usize),

    #[error("The character '{0}' is reserved and cannot be part of an alphabet.")]
    ReservedAlphabetCharacter(char),

    #[error("A score table over an alphabet of size {alphabet_size} needs {expected} entries, but got {actual}.")]
    ScoreTableSize {
        alphabet_size: usize,
        expected: usize,
        actual: usize,
    },

    #[error("The score table has no gap costs.")]
    MissingGapCosts,

    #[error("The sides of an alignment have different lengths {first} and {second}.")]
    AlignmentLengthMismatch { first: usize, second: usize },

    #[error("The range {start}..{end} exceeds the {length} characters of the alignment side.")]
    SliceOutOfRange {
        start: usize,
        end: usize,
        length: usize,
    },

    #[error("The parameter '{0}' is unknown.")]
    UnknownParameter(String),

    #[error("The usage count {0} does not fit into the binding type.")]
    UsageOverflow(usize),

    #[error("No binding was given for the parameter '{0}'.")]
    MissingBinding(String),

    #[error("Expected one binding for each of the {expected} parameters, but got {actual}.")]
    BindingCountMismatch { expected: usize, actual: usize },

    #[error("The traceback reached state {state:?} at ({row}, {column}), which has no valid predecessor.")]
    InvalidTracebackState {
        row: usize,
        column: usize,
        state: State,
    },

    #[error("The divide and conquer recursion exceeded its depth limit of {limit}.")]
    RecursionLimitExceeded { limit: usize },
}

impl From<nom::Err<nom::error::Error<&str>>> for Error {
    fn from(error: nom::Err<nom::error::Error<&str>>) -> Self {
        match error {
            nom::Err::Incomplete(needed) => Self::ParserIncomplete(needed),
            nom::Err::Error(error) | nom::Err::Failure(error) => Self::Parser {
                input: error.input.to_string(),
                kind: error.code,
            },
        }
    }
}
