use thiserror::Error;

/// Unified error type for every layer of the SDK, one variant per
/// member crate's own error enum via `#[from]`. Callers who only touch
/// one layer can still match on its specific error type by converting
/// back with `TryFrom`-style matching on the inner variant; callers
/// crossing layers (e.g. deriving a key, then signing with it) get one
/// type to propagate with `?`.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Numeric(#[from] w3_numeric::NumericError),
    #[error(transparent)]
    Kdf(#[from] w3_kdf::KdfError),
    #[error(transparent)]
    Curve(#[from] w3_curves::CurveError),
    #[error(transparent)]
    Bip39(#[from] w3_bip39::Bip39Error),
    #[error(transparent)]
    HdWallet(#[from] w3_hdwallet::HdWalletError),
    #[error(transparent)]
    Codec(#[from] w3_codecs::CodecError),
    #[error(transparent)]
    Keystore(#[from] w3_keystore::KeystoreError),
    #[error(transparent)]
    Abi(#[from] w3_abi::AbiError),
    #[error(transparent)]
    Eip712(#[from] w3_eip712::Eip712Error),
    #[error(transparent)]
    Tx(#[from] w3_tx::TxError),
}

pub type Result<T> = core::result::Result<T, Error>;
