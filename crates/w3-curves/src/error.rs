use thiserror::Error;

/// Error kinds shared by every curve engine in this crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CurveError {
    #[error("scalar is out of range for the curve order")]
    InvalidScalar,
    #[error("point is not on the curve, or is the identity element")]
    InvalidCurvePoint,
    #[error("signature r or s is out of range, or s is not canonical (low-s)")]
    InvalidSignatureEncoding,
    #[error("recovery id must be 0 or 1")]
    InvalidRecoveryId,
    #[error("signature verification failed")]
    VerificationFailed,
    #[error("wrong byte length: expected {expected}, got {got}")]
    WrongLength { expected: usize, got: usize },
}

pub type Result<T> = core::result::Result<T, CurveError>;
