//! Function selectors and event topics, both derived from the same
//! Keccak256 used throughout the core (`w3_hashes::keccak256`).

use crate::types::{canonical_signature, AbiType};

/// The 4-byte function selector: the first 4 bytes of
/// `keccak256(canonicalSignature)`.
pub fn function_selector(name: &str, params: &[AbiType]) -> [u8; 4] {
    let sig = canonical_signature(name, params);
    let hash = w3_hashes::keccak256(sig.as_bytes());
    let mut out = [0u8; 4];
    out.copy_from_slice(&hash[..4]);
    out
}

/// The 32-byte event topic0: the full `keccak256(canonicalSignature)`,
/// unused for anonymous events.
pub fn event_topic(name: &str, params: &[AbiType]) -> [u8; 32] {
    let sig = canonical_signature(name, params);
    w3_hashes::keccak256(sig.as_bytes())
}
