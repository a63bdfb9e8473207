use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HdWalletError {
    #[error("seed must be between 16 and 64 bytes")]
    InvalidSeedLength(usize),
    #[error("derived key is invalid (probability ~2^-127, try the next index)")]
    InvalidChildKey,
    #[error("non-hardened derivation is not supported for this curve")]
    HardenedOnlyCurve,
    #[error("invalid derivation path: {0}")]
    InvalidPath(String),
    #[error("extended key serialization must be exactly 78 bytes, got {0}")]
    InvalidExtendedKeyLength(usize),
    #[error(transparent)]
    Codec(#[from] w3_codecs::CodecError),
    #[error(transparent)]
    Curve(#[from] w3_curves::CurveError),
}

pub type Result<T> = core::result::Result<T, HdWalletError>;
