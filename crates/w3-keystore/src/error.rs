use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeystoreError {
    #[error("unsupported keystore version: {0}")]
    UnsupportedVersion(u8),
    #[error("unsupported cipher: {0}")]
    UnsupportedCipher(String),
    #[error("unsupported kdf: {0}")]
    UnsupportedKdf(String),
    #[error("invalid hex field {0}: {1}")]
    InvalidHex(&'static str, String),
    #[error("mac verification failed: wrong password or corrupted keystore")]
    MacMismatch,
    #[error("malformed keystore JSON: {0}")]
    Malformed(String),
    #[error(transparent)]
    Kdf(#[from] w3_kdf::KdfError),
}

pub type Result<T> = core::result::Result<T, KeystoreError>;
