//! The `Signer` surface every transaction, EIP-191 message, and (via
//! `w3-eip712`) typed-data signature routes through: one trait, rather
//! than a separate signer type per use site.

use w3_curves::secp256k1::{PrivateKey, Signature};
use w3_numeric::Address;

use crate::error::Result;

/// Anything capable of producing a secp256k1 signature over a 32-byte
/// digest and reporting the address that signature recovers to.
pub trait Signer {
    fn address(&self) -> Address;
    fn sign_hash(&self, hash: &[u8; 32]) -> Result<Signature>;
}

/// A signer backed by a private key held in memory.
pub struct LocalSigner {
    key: PrivateKey,
    address: Address,
}

impl LocalSigner {
    pub fn new(key: PrivateKey) -> Self {
        let address = Address::from_bytes(key.public_key().to_ethereum_address());
        LocalSigner { key, address }
    }
}

impl Signer for LocalSigner {
    fn address(&self) -> Address {
        self.address
    }

    fn sign_hash(&self, hash: &[u8; 32]) -> Result<Signature> {
        Ok(self.key.sign(hash)?)
    }
}
