//! Unifies BIP-39 mnemonic/seed derivation (`w3-bip39`) with BIP-32 key
//! derivation (`w3-hdwallet`) behind a single `from_seed` /
//! `from_mnemonic` / `derive` / `derive_child` surface, rather than
//! requiring callers to wire the two crates together themselves.

use w3_curves::secp256k1::{PrivateKey, PublicKey};
use w3_hdwallet::bip32::ExtendedPrivateKey;
use w3_hdwallet::path::DerivationPath;
use w3_numeric::Address;

use crate::error::{Error, Result};

const HARDENED_OFFSET: u32 = 0x8000_0000;

/// A secp256k1 HD wallet node, derivable from a raw seed or a BIP-39
/// mnemonic and walkable one path or one child index at a time.
pub struct HdWallet {
    node: ExtendedPrivateKey,
}

impl HdWallet {
    /// Derives the master node directly from a seed (16-64 bytes).
    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        Ok(HdWallet { node: ExtendedPrivateKey::from_seed(seed).map_err(Error::HdWallet)? })
    }

    /// Derives the master node from a BIP-39 mnemonic phrase and
    /// optional passphrase.
    pub fn from_mnemonic(phrase: &str, passphrase: &str) -> Result<Self> {
        let mnemonic = w3_bip39::Mnemonic::parse(phrase).map_err(Error::Bip39)?;
        let seed = mnemonic.to_seed(passphrase);
        Self::from_seed(&*seed)
    }

    /// Derives the node at `path` (e.g. `m/44'/60'/0'/0/0`) from this
    /// node, treating `self` as the root the path is relative to.
    pub fn derive(&self, path: &str) -> Result<Self> {
        let path = DerivationPath::parse(path).map_err(Error::HdWallet)?;
        Ok(HdWallet { node: self.node.derive_path(&path).map_err(Error::HdWallet)? })
    }

    /// Derives the direct child at `index` (non-hardened; OR in
    /// `0x8000_0000` for a hardened step).
    pub fn derive_child(&self, index: u32) -> Result<Self> {
        let path = DerivationPath::from_indices(vec![index]);
        Ok(HdWallet { node: self.node.derive_path(&path).map_err(Error::HdWallet)? })
    }

    pub fn private_key(&self) -> Result<PrivateKey> {
        self.node.private_key().map_err(Error::HdWallet)
    }

    pub fn public_key(&self) -> Result<PublicKey> {
        self.node.public_key().map_err(Error::HdWallet)
    }

    /// The Ethereum address (Keccak of the uncompressed public key,
    /// EIP-55 checksummed on display) this node controls.
    pub fn address(&self) -> Result<Address> {
        Ok(Address::from_bytes(self.public_key()?.to_ethereum_address()))
    }

    pub fn extended_private(&self) -> String {
        self.node.to_xprv_string()
    }

    pub fn extended_public(&self) -> String {
        self.node.extended_public_key().to_xpub_string()
    }

    /// Whether `index` denotes a hardened derivation step.
    pub fn is_hardened(index: u32) -> bool {
        index >= HARDENED_OFFSET
    }
}
