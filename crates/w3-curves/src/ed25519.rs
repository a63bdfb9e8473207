//! Ed25519 (RFC 8032) signing and verification, used by Solana/Substrate-
//! family chains and by SLIP-0010 key derivation.

use ed25519_dalek::{Signer as _, SigningKey, Verifier as _, VerifyingKey};
use zeroize::Zeroizing;

use crate::error::{CurveError, Result};

/// An Ed25519 signing key (32-byte seed).
pub struct PrivateKey(Zeroizing<SigningKey>);

impl PrivateKey {
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        PrivateKey(Zeroizing::new(SigningKey::from_bytes(bytes)))
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.0.verifying_key())
    }

    /// Signs `msg` directly (Ed25519 signs the raw message, not a
    /// digest, per RFC 8032).
    pub fn sign(&self, msg: &[u8]) -> Signature {
        Signature(self.0.sign(msg).to_bytes())
    }
}

/// An Ed25519 public key.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(VerifyingKey);

impl PublicKey {
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self> {
        VerifyingKey::from_bytes(bytes)
            .map(PublicKey)
            .map_err(|_| CurveError::InvalidCurvePoint)
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    pub fn verify(&self, msg: &[u8], sig: &Signature) -> Result<()> {
        let k_sig = ed25519_dalek::Signature::from_bytes(&sig.0);
        self.0
            .verify(msg, &k_sig)
            .map_err(|_| CurveError::VerificationFailed)
    }
}

/// A 64-byte Ed25519 signature (`R ‖ S`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature([u8; 64]);

impl Signature {
    pub fn to_bytes(&self) -> [u8; 64] {
        self.0
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; 64] = bytes
            .try_into()
            .map_err(|_| CurveError::WrongLength { expected: 64, got: bytes.len() })?;
        Ok(Signature(arr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 8032 §7.1 test vector 1: empty message.
    #[test]
    fn rfc8032_test_vector_1() {
        let seed = hex_literal::hex!("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60");
        let seed: [u8; 32] = seed[..32].try_into().unwrap();
        let priv_key = PrivateKey::from_bytes(&seed);
        let pub_key = priv_key.public_key();
        assert_eq!(
            pub_key.to_bytes(),
            hex_literal::hex!("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511")
        );
        let sig = priv_key.sign(b"");
        assert_eq!(
            sig.to_bytes(),
            hex_literal::hex!(
                "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e065224901555fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100"
            )
        );
        pub_key.verify(b"", &sig).unwrap();
    }

    #[test]
    fn sign_is_deterministic_and_verify_rejects_tampering() {
        let priv_key = PrivateKey::from_bytes(&[9u8; 32]);
        let pub_key = priv_key.public_key();
        let sig1 = priv_key.sign(b"message");
        let sig2 = priv_key.sign(b"message");
        assert_eq!(sig1, sig2);
        assert!(pub_key.verify(b"different message", &sig1).is_err());
    }
}
