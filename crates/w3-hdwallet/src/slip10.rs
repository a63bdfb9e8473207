//! SLIP-0010 Ed25519 key derivation: hardened-only, since Ed25519 has
//! no defined point addition compatible with non-hardened BIP-32-style
//! derivation.

use w3_curves::ed25519::PrivateKey as Ed25519PrivateKey;

use crate::error::{HdWalletError, Result};
use crate::path::DerivationPath;

const HARDENED_OFFSET: u32 = 0x8000_0000;
const MASTER_SALT: &[u8] = b"ed25519 seed";

/// An SLIP-0010 Ed25519 extended private key: a 32-byte seed plus
/// chain code.
#[derive(Clone)]
pub struct Ed25519ExtendedKey {
    key: [u8; 32],
    chain_code: [u8; 32],
    depth: u8,
}

impl Ed25519ExtendedKey {
    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        if seed.len() < 16 || seed.len() > 64 {
            return Err(HdWalletError::InvalidSeedLength(seed.len()));
        }
        let i = w3_hashes::hmac_sha512(MASTER_SALT, seed);
        let mut key = [0u8; 32];
        let mut chain_code = [0u8; 32];
        key.copy_from_slice(&i[..32]);
        chain_code.copy_from_slice(&i[32..]);
        Ok(Ed25519ExtendedKey { key, chain_code, depth: 0 })
    }

    /// Derives a single hardened child. Per SLIP-0010, every Ed25519
    /// derivation step is implicitly hardened regardless of the raw
    /// index's high bit.
    pub fn derive_child(&self, index: u32) -> Self {
        let hardened_index = index | HARDENED_OFFSET;
        let mut data = Vec::with_capacity(1 + 32 + 4);
        data.push(0u8);
        data.extend_from_slice(&self.key);
        data.extend_from_slice(&hardened_index.to_be_bytes());

        let i = w3_hashes::hmac_sha512(&self.chain_code, &data);
        let mut key = [0u8; 32];
        let mut chain_code = [0u8; 32];
        key.copy_from_slice(&i[..32]);
        chain_code.copy_from_slice(&i[32..]);
        Ed25519ExtendedKey { key, chain_code, depth: self.depth + 1 }
    }

    /// Derives through every index in `path`, treating each as
    /// hardened.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self> {
        if path.indices().iter().any(|&index| index < HARDENED_OFFSET) {
            return Err(HdWalletError::HardenedOnlyCurve);
        }
        let mut current = self.clone();
        for &index in path.indices() {
            current = current.derive_child(index & (HARDENED_OFFSET - 1));
        }
        Ok(current)
    }

    pub fn private_key(&self) -> Ed25519PrivateKey {
        Ed25519PrivateKey::from_bytes(&self.key)
    }

    pub fn chain_code(&self) -> [u8; 32] {
        self.chain_code
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }
}
