use thiserror::Error;

#[derive(Debug, Error)]
pub enum Eip712Error {
    #[error(transparent)]
    Abi(#[from] w3_abi::AbiError),
    #[error(transparent)]
    Curve(#[from] w3_curves::CurveError),
    #[error(transparent)]
    Tx(#[from] w3_tx::TxError),
}

pub type Result<T> = core::result::Result<T, Eip712Error>;
