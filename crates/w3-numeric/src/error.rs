use thiserror::Error;

/// Error kinds shared by every primitive in this crate.
///
/// Mirrors the `InvalidInput` / `InvalidChecksum` taxonomy of the core
/// error-handling design: every fallible operation returns one of these
/// instead of panicking.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NumericError {
    #[error("odd-length hex string")]
    OddLengthHex,
    #[error("invalid hex character at byte offset {0}")]
    InvalidHexChar(usize),
    #[error("expected {expected} bytes, got {got}")]
    WrongLength { expected: usize, got: usize },
    #[error("address checksum mismatch")]
    InvalidChecksum,
    #[error("decimal value has more than 18 fractional digits")]
    TooManyFractionalDigits,
    #[error("invalid decimal string: {0}")]
    InvalidDecimal(String),
    #[error("value overflows 256 bits")]
    Overflow,
    #[error("malformed RLP: {0}")]
    MalformedRlp(&'static str),
    #[error("RLP item is not a list")]
    RlpNotAList,
    #[error("RLP item is not a string")]
    RlpNotAString,
}

pub type Result<T> = core::result::Result<T, NumericError>;
