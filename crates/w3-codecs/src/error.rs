use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("invalid base58 character or encoding")]
    InvalidBase58,
    #[error("base58check checksum mismatch")]
    InvalidChecksum,
    #[error("payload too short to contain a 4-byte checksum")]
    PayloadTooShort,
    #[error("bech32 encoding error: {0}")]
    InvalidBech32(String),
    #[error("unsupported bech32 variant for this operation")]
    WrongBech32Variant,
}

pub type Result<T> = core::result::Result<T, CodecError>;
