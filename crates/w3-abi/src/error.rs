use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AbiError {
    #[error("value does not match the declared type {0}")]
    TypeMismatch(String),
    #[error("dynamic offset {0} is out of range for input of length {1}")]
    OffsetOutOfRange(usize, usize),
    #[error("claimed length {0} is out of range for input of length {1}")]
    LengthOutOfRange(usize, usize),
    #[error("input is too short: need at least {0} bytes, got {1}")]
    InputTooShort(usize, usize),
    #[error("packed encoding does not support arrays or tuples")]
    PackedUnsupportedType,
    #[error("integer width must be a multiple of 8 between 8 and 256, got {0}")]
    InvalidIntWidth(usize),
    #[error("fixed bytes width must be between 1 and 32, got {0}")]
    InvalidBytesWidth(usize),
    #[error("value out of range for the declared integer width")]
    IntegerOutOfRange,
    #[error("malformed type signature: {0}")]
    InvalidSignature(String),
}

pub type Result<T> = core::result::Result<T, AbiError>;
