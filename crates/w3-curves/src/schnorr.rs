//! BIP-340 x-only Schnorr signatures over secp256k1, as used by
//! Bitcoin Taproot.

use k256::schnorr::{Signature as K256Signature, SigningKey, VerifyingKey};
use k256::schnorr::signature::{Signer as _, Verifier as _};
use zeroize::Zeroizing;

use crate::error::{CurveError, Result};

/// A BIP-340 signing key.
pub struct PrivateKey(Zeroizing<SigningKey>);

impl PrivateKey {
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self> {
        let key = SigningKey::from_bytes(bytes).map_err(|_| CurveError::InvalidScalar)?;
        Ok(PrivateKey(Zeroizing::new(key)))
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.0.verifying_key().clone())
    }

    /// Signs an arbitrary-length message (BIP-340 hashes internally
    /// with the `BIP0340/challenge` tagged hash; callers pass the
    /// 32-byte message digest for transaction signing contexts).
    pub fn sign(&self, msg: &[u8]) -> Signature {
        Signature(self.0.sign(msg).to_bytes())
    }
}

/// A BIP-340 x-only public key (32 bytes).
#[derive(Clone)]
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
        let k_sig = K256Signature::try_from(sig.0.as_slice()).map_err(|_| CurveError::InvalidSignatureEncoding)?;
        self.0
            .verify(msg, &k_sig)
            .map_err(|_| CurveError::VerificationFailed)
    }
}

/// A 64-byte BIP-340 Schnorr signature (`r ‖ s`, no recovery id —
/// x-only Schnorr is not recoverable).
#[derive(Debug, Clone, PartialEq, Eq)]
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

    #[test]
    fn sign_verify_roundtrip() {
        let priv_key = PrivateKey::from_bytes(&[11u8; 32]).unwrap();
        let pub_key = priv_key.public_key();
        let sig = priv_key.sign(b"taproot spend");
        pub_key.verify(b"taproot spend", &sig).unwrap();
    }

    #[test]
    fn verify_rejects_tampered_message() {
        let priv_key = PrivateKey::from_bytes(&[12u8; 32]).unwrap();
        let pub_key = priv_key.public_key();
        let sig = priv_key.sign(b"original");
        assert!(pub_key.verify(b"tampered", &sig).is_err());
    }
}
