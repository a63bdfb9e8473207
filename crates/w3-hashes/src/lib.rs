//! Hash suite: Keccak-256, SHA-256/512, RIPEMD-160, and
//! HMAC-SHA256/512.
//!
//! Each function is a thin, documented wrapper over the corresponding
//! RustCrypto crate (`sha3`, `sha2`, `ripemd`, `hmac`) — the same idiom
//! the wider Rust Web3/Bitcoin ecosystem uses rather than hand-rolling
//! the permutation. Keccak-256 specifically uses the `0x01` padding
//! byte (not NIST SHA3-256's `0x06`), matching Ethereum's convention.

use hmac::{Hmac, Mac};
use ripemd::Ripemd160;
use sha2::{Sha256, Sha512};
use sha3::{Digest, Keccak256};

/// Computes Keccak-256, Ethereum's hash function (distinct from NIST
/// SHA3-256 in its padding byte).
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// Computes SHA-256 (FIPS 180-4).
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Computes SHA-512 (FIPS 180-4).
pub fn sha512(data: &[u8]) -> [u8; 64] {
    Sha512::digest(data).into()
}

/// Computes RIPEMD-160.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(data).into()
}

/// Computes HASH160 = RIPEMD160(SHA256(x)), used for BIP-32 parent
/// fingerprints and Bitcoin-style addresses.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(data))
}

/// Computes double-SHA256, used for Base58Check / Bitcoin block hashing.
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Computes HMAC-SHA256 over `key`/`data` (RFC 2104; keys longer than the
/// 64-byte block size are hashed first, handled internally by `hmac`).
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> [u8; 32] {
    let mut mac = Hmac::<Sha256>::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(data);
    mac.finalize().into_bytes().into()
}

/// Computes HMAC-SHA512 over `key`/`data`.
pub fn hmac_sha512(key: &[u8], data: &[u8]) -> [u8; 64] {
    let mut mac = Hmac::<Sha512>::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(data);
    mac.finalize().into_bytes().into()
}
