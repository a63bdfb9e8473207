//! BIP-32 hierarchical deterministic keys over secp256k1, built on the
//! RustCrypto `bip32` crate (the same crate the Ethereum signing path
//! in this workspace's source material already depended on for
//! constant-time child derivation).

use bip32::{ChildNumber, Prefix, XPrv, XPub};

use crate::error::{HdWalletError, Result};
use crate::path::DerivationPath;
use w3_curves::secp256k1::{PrivateKey, PublicKey};

const HARDENED_OFFSET: u32 = 0x8000_0000;

/// An extended private key: a secp256k1 private key plus a chain code
/// and derivation metadata.
#[derive(Clone)]
pub struct ExtendedPrivateKey(XPrv);

impl ExtendedPrivateKey {
    /// Derives the master node from a BIP-39 seed (16-64 bytes), via
    /// `HMAC-SHA512("Bitcoin seed", seed)`.
    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        XPrv::new(seed)
            .map(ExtendedPrivateKey)
            .map_err(|_| HdWalletError::InvalidSeedLength(seed.len()))
    }

    /// Derives the node at `path`, applying each hardened or
    /// non-hardened step in sequence.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self> {
        let mut current = self.0.clone();
        for &index in path.indices() {
            let hardened = index >= HARDENED_OFFSET;
            let raw_index = index & (HARDENED_OFFSET - 1);
            let child_number =
                ChildNumber::new(raw_index, hardened).map_err(|_| HdWalletError::InvalidChildKey)?;
            current = current.derive_child(child_number).map_err(|_| HdWalletError::InvalidChildKey)?;
        }
        Ok(ExtendedPrivateKey(current))
    }

    pub fn private_key(&self) -> Result<PrivateKey> {
        let bytes: [u8; 32] = self.0.private_key().to_bytes().into();
        PrivateKey::from_bytes(&bytes).map_err(Into::into)
    }

    pub fn public_key(&self) -> Result<PublicKey> {
        self.private_key().map(|key| key.public_key())
    }

    pub fn chain_code(&self) -> [u8; 32] {
        self.0.attrs().chain_code
    }

    pub fn depth(&self) -> u8 {
        self.0.attrs().depth
    }

    /// Serializes as a Base58Check `xprv...` string (version bytes
    /// `0x0488ADE4`), per BIP-32.
    pub fn to_xprv_string(&self) -> String {
        self.0.to_string(Prefix::XPRV).to_string()
    }

    pub fn extended_public_key(&self) -> ExtendedPublicKey {
        ExtendedPublicKey(self.0.public_key())
    }
}

/// An extended public key: derivable for non-hardened children without
/// access to any private key material.
#[derive(Clone)]
pub struct ExtendedPublicKey(XPub);

impl ExtendedPublicKey {
    pub fn derive_child(&self, index: u32) -> Result<Self> {
        if index >= HARDENED_OFFSET {
            return Err(HdWalletError::InvalidPath(
                "hardened derivation requires the private key".to_string(),
            ));
        }
        let child_number = ChildNumber::new(index, false).map_err(|_| HdWalletError::InvalidChildKey)?;
        self.0
            .derive_child(child_number)
            .map(ExtendedPublicKey)
            .map_err(|_| HdWalletError::InvalidChildKey)
    }

    pub fn public_key(&self) -> Result<PublicKey> {
        PublicKey::from_bytes(&self.0.public_key().to_sec1_bytes()).map_err(Into::into)
    }

    pub fn chain_code(&self) -> [u8; 32] {
        self.0.attrs().chain_code
    }

    /// Serializes as a Base58Check `xpub...` string (version bytes
    /// `0x0488B21E`), per BIP-32.
    pub fn to_xpub_string(&self) -> String {
        self.0.to_string(Prefix::XPUB)
    }
}
