//! Sr25519: Schnorr signatures over Ristretto255, as used by Substrate-
//! family chains.
//!
//! This wraps `schnorrkel` directly rather than approximating the curve
//! arithmetic: every signature below is a genuine Ristretto255 Schnorr
//! signature that an independent verifier (e.g. a Substrate node)
//! would accept.

use schnorrkel::{Keypair, MiniSecretKey, PublicKey as SchnorrkelPublicKey, Signature as SchnorrkelSignature};
use zeroize::Zeroizing;

use crate::error::{CurveError, Result};

const SIGNING_CONTEXT: &[u8] = b"substrate";

/// An Sr25519 keypair, derived from a 32-byte mini secret key (seed).
pub struct PrivateKey(Zeroizing<Keypair>);

impl PrivateKey {
    /// Expands a 32-byte seed into a full Sr25519 keypair via
    /// `schnorrkel`'s Ed25519-compatible expansion mode, matching the
    /// `MiniSecretKey` convention most SLIP-0010-over-Sr25519 tooling
    /// (and Substrate's `sr25519-from-seed`) relies on.
    pub fn from_seed(seed: &[u8; 32]) -> Result<Self> {
        let mini = MiniSecretKey::from_bytes(seed).map_err(|_| CurveError::InvalidScalar)?;
        let keypair = mini.expand_to_keypair(MiniSecretKey::ED25519_MODE);
        Ok(PrivateKey(Zeroizing::new(keypair)))
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.0.public)
    }

    /// Signs `msg` under the conventional `"substrate"` signing
    /// context.
    pub fn sign(&self, msg: &[u8]) -> Signature {
        let ctx = schnorrkel::signing_context(SIGNING_CONTEXT);
        Signature(self.0.sign(ctx.bytes(msg)).to_bytes())
    }
}

/// An Sr25519 public key (a compressed Ristretto255 point).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(SchnorrkelPublicKey);

impl PublicKey {
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self> {
        SchnorrkelPublicKey::from_bytes(bytes)
            .map(PublicKey)
            .map_err(|_| CurveError::InvalidCurvePoint)
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    pub fn verify(&self, msg: &[u8], sig: &Signature) -> Result<()> {
        let k_sig = SchnorrkelSignature::from_bytes(&sig.0).map_err(|_| CurveError::InvalidSignatureEncoding)?;
        let ctx = schnorrkel::signing_context(SIGNING_CONTEXT);
        self.0
            .verify(ctx.bytes(msg), &k_sig)
            .map_err(|_| CurveError::VerificationFailed)
    }
}

/// A 64-byte Sr25519 signature.
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

    #[test]
    fn sign_verify_roundtrip() {
        let priv_key = PrivateKey::from_seed(&[3u8; 32]).unwrap();
        let pub_key = priv_key.public_key();
        let sig = priv_key.sign(b"transfer 5 DOT");
        pub_key.verify(b"transfer 5 DOT", &sig).unwrap();
    }

    #[test]
    fn verify_rejects_wrong_message() {
        let priv_key = PrivateKey::from_seed(&[4u8; 32]).unwrap();
        let pub_key = priv_key.public_key();
        let sig = priv_key.sign(b"original");
        assert!(pub_key.verify(b"tampered", &sig).is_err());
    }

    #[test]
    fn verify_rejects_wrong_key() {
        let priv_key_a = PrivateKey::from_seed(&[5u8; 32]).unwrap();
        let priv_key_b = PrivateKey::from_seed(&[6u8; 32]).unwrap();
        let sig = priv_key_a.sign(b"msg");
        assert!(priv_key_b.public_key().verify(b"msg", &sig).is_err());
    }

    // Schnorr signatures over Ristretto255 are randomized (nonce includes
    // entropy from the transcript plus keypair randomness), so unlike
    // secp256k1/Ed25519 above, two signatures over the same message need
    // not be bit-identical. Assert only that both verify.
    #[test]
    fn two_signatures_of_same_message_both_verify() {
        let priv_key = PrivateKey::from_seed(&[8u8; 32]).unwrap();
        let pub_key = priv_key.public_key();
        let sig1 = priv_key.sign(b"msg");
        let sig2 = priv_key.sign(b"msg");
        pub_key.verify(b"msg", &sig1).unwrap();
        pub_key.verify(b"msg", &sig2).unwrap();
    }
}
