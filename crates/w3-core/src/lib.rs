//! Facade crate for the web3-rs-core cryptographic SDK.
//!
//! Every layer (`w3-numeric` through `w3-tx`) is re-exported here under
//! its own namespace, so a consumer depending on `w3-core` alone reaches
//! the whole workspace: `w3_core::abi::encode(..)`,
//! `w3_core::tx::Eip1559Transaction`, `w3_core::hdwallet::HdWallet`, and
//! so on. [`error::Error`] unifies every layer's error type; [`prelude`]
//! flattens the handful of types most call sites need.

pub mod error;
pub mod wallet;

pub use error::{Error, Result};
pub use wallet::HdWallet;

pub use w3_abi as abi;
pub use w3_bip39 as bip39;
pub use w3_codecs as codecs;
pub use w3_curves as curves;
pub use w3_eip712 as eip712;
pub use w3_hashes as hashes;
pub use w3_hdwallet as hdwallet;
pub use w3_kdf as kdf;
pub use w3_keystore as keystore;
pub use w3_numeric as numeric;
pub use w3_tx as tx;

/// The handful of types most consumers of this SDK touch directly,
/// gathered into one `use w3_core::prelude::*`.
pub mod prelude {
    pub use crate::{Error, HdWallet, Result};
    pub use w3_abi::{AbiType, AbiValue};
    pub use w3_curves::secp256k1::{PrivateKey, PublicKey, Signature};
    pub use w3_eip712::{Eip712Domain, Eip712Type};
    pub use w3_numeric::{Address, U256};
    pub use w3_tx::{LocalSigner, Signer, TypedTransaction};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    // End-to-end smoke test: mnemonic -> address -> sign -> recover,
    // threading through the facade alone.
    #[test]
    fn mnemonic_to_signature_roundtrip() {
        let wallet = crate::HdWallet::from_mnemonic(
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
            "",
        )
        .unwrap()
        .derive("m/44'/60'/0'/0/0")
        .unwrap();

        let signer = LocalSigner::new(wallet.private_key().unwrap());
        assert_eq!(signer.address(), wallet.address().unwrap());

        let message = b"web3-rs-core smoke test";
        let sig = w3_tx::sign_message(&signer, message).unwrap();
        let recovered = w3_tx::recover_message_signer(message, &sig).unwrap();
        assert_eq!(recovered, signer.address());
    }

    #[test]
    fn abi_selector_matches_known_signature() {
        let selector = w3_abi::function_selector("transfer", &[AbiType::Address, AbiType::Uint(256)]);
        assert_eq!(hex::encode(selector), "a9059cbb");
    }
}
