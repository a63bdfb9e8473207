//! Base58Check: Base58 with a 4-byte `sha256d`-derived checksum
//! appended before encoding.

use crate::error::{CodecError, Result};

/// Encodes `payload` as Base58Check: `base58(payload ‖ sha256d(payload)[..4])`.
pub fn encode(payload: &[u8]) -> String {
    let checksum = w3_hashes::sha256d(payload);
    let mut buf = Vec::with_capacity(payload.len() + 4);
    buf.extend_from_slice(payload);
    buf.extend_from_slice(&checksum[..4]);
    bs58::encode(buf).into_string()
}

/// Decodes a Base58Check string, verifying and stripping the trailing
/// 4-byte checksum.
pub fn decode(encoded: &str) -> Result<Vec<u8>> {
    let data = bs58::decode(encoded).into_vec().map_err(|_| CodecError::InvalidBase58)?;
    if data.len() < 4 {
        return Err(CodecError::PayloadTooShort);
    }
    let (payload, checksum) = data.split_at(data.len() - 4);
    let expected = w3_hashes::sha256d(payload);
    if checksum != &expected[..4] {
        return Err(CodecError::InvalidChecksum);
    }
    Ok(payload.to_vec())
}
