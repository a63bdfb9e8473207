//! Key-derivation suite: PBKDF2-HMAC-SHA256/512 and scrypt.

use sha2::{Sha256, Sha512};
use thiserror::Error;

/// Errors from key derivation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KdfError {
    #[error("invalid scrypt parameters: {0}")]
    InvalidScryptParams(&'static str),
    #[error("requested output length is not supported by the underlying primitive")]
    UnsupportedOutputLength,
}

pub type Result<T> = core::result::Result<T, KdfError>;

/// PBKDF2-HMAC-SHA256, used for Keystore V3's `pbkdf2` KDF mode.
pub fn pbkdf2_hmac_sha256(password: &[u8], salt: &[u8], iterations: u32, dk_len: usize) -> Vec<u8> {
    let mut out = vec![0u8; dk_len];
    pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut out);
    out
}

/// PBKDF2-HMAC-SHA512, used for BIP-39 seed derivation (2048 rounds,
/// 64-byte output).
pub fn pbkdf2_hmac_sha512(password: &[u8], salt: &[u8], iterations: u32, dk_len: usize) -> Vec<u8> {
    let mut out = vec![0u8; dk_len];
    pbkdf2::pbkdf2_hmac::<Sha512>(password, salt, iterations, &mut out);
    out
}

/// scrypt parameters: CPU/memory cost `n` (must be a power of two > 1),
/// block size `r`, and parallelization `p`, per RFC 7914.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScryptParams {
    pub log_n: u8,
    pub r: u32,
    pub p: u32,
}

impl ScryptParams {
    /// Keystore V3's conventional default: N = 2**18 (262144), r = 8, p = 1.
    pub const DEFAULT: ScryptParams = ScryptParams { log_n: 18, r: 8, p: 1 };

    pub fn n(&self) -> u64 {
        1u64 << self.log_n
    }
}

/// Derives `dk_len` bytes via scrypt (password-expansion via
/// PBKDF2-HMAC-SHA256, Salsa20/8-core SMix, final PBKDF2), per RFC 7914.
#[tracing::instrument(level = "debug", skip(password, salt), fields(n = params.n(), r = params.r, p = params.p))]
pub fn scrypt(password: &[u8], salt: &[u8], params: ScryptParams, dk_len: usize) -> Result<Vec<u8>> {
    let inner = scrypt::Params::new(params.log_n, params.r, params.p, dk_len)
        .map_err(|_| KdfError::InvalidScryptParams("log_n/r/p/dk_len out of supported range"))?;
    let mut out = vec![0u8; dk_len];
    scrypt::scrypt(password, salt, &inner, &mut out)
        .map_err(|_| KdfError::UnsupportedOutputLength)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 6070 PBKDF2-HMAC-SHA256 isn't a standard KAT set (RFC 6070 is SHA1);
    // we instead assert determinism and length, which is what callers rely on.
    #[test]
    fn pbkdf2_sha256_deterministic_and_sized() {
        let a = pbkdf2_hmac_sha256(b"password", b"salt", 1000, 32);
        let b = pbkdf2_hmac_sha256(b"password", b"salt", 1000, 32);
        assert_eq!(a, b);
        assert_eq!(a.len(), 32);
    }

    #[test]
    fn pbkdf2_sha512_bip39_shape() {
        let seed = pbkdf2_hmac_sha512(b"mnemonic words", b"mnemonicpassphrase", 2048, 64);
        assert_eq!(seed.len(), 64);
    }

    #[test]
    fn scrypt_rfc7914_vector_1() {
        // RFC 7914 test vector: scrypt("", "", N=16, r=1, p=1, dkLen=64)
        let out = scrypt(b"", b"", ScryptParams { log_n: 4, r: 1, p: 1 }, 64).unwrap();
        let expected = hex_literal::hex!(
            "77d6576238657b203b19ca42c18a0497f16b4844e3074ae8dfdffa3fede21442fcd0069ded0948f8326a753a0fc81f17e8d3e0fb2e0d3628cf35e20c38d18906"
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn scrypt_rejects_non_power_of_two_n_via_log_n() {
        // log_n = 0 means N = 1, invalid for scrypt (N must be > 1)
        assert!(scrypt(b"pw", b"salt", ScryptParams { log_n: 0, r: 8, p: 1 }, 32).is_err());
    }
}
