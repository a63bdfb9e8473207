use thiserror::Error;

use crate::rlp::RlpError;

#[derive(Debug, Error)]
pub enum TxError {
    #[error("rlp error: {0}")]
    Rlp(#[from] RlpError),
    #[error("empty transaction")]
    EmptyTransaction,
    #[error("unknown transaction type byte {0:#x}")]
    UnknownType(u8),
    #[error("wrong field count for this transaction type: got {0}")]
    InvalidFieldCount(usize),
    #[error("missing or malformed field: {0}")]
    MissingField(&'static str),
    #[error("invalid v value {0} for this transaction type")]
    InvalidV(u64),
    #[error(transparent)]
    Curve(#[from] w3_curves::CurveError),
}

pub type Result<T> = core::result::Result<T, TxError>;
