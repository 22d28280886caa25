use thiserror::Error;

/// Why a line of the index artifact was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("invalid escape sequence in '{0}'")]
    InvalidEscape(String),

    #[error("empty {0}")]
    EmptyField(&'static str),

    #[error("zero frequency for document '{0}'")]
    ZeroFrequency(String),

    #[error("timestamp for unknown document '{0}'")]
    UnknownDocument(String),

    #[error("data line outside of any section")]
    OutsideSection,

    #[error("unknown section marker '{0}'")]
    UnknownMarker(String),

    #[error("line is not valid UTF-8")]
    InvalidUtf8,
}
