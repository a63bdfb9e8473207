//! 32-byte word encoders for EIP-712 `encodeData`, each routed through
//! [`w3_abi::encode::encode_elements`] rather than hand-placed byte
//! offsets, so the struct/domain hasher shares its padding logic with
//! the rest of the ABI layer.

use w3_abi::{AbiType, AbiValue};
use w3_hashes::keccak256;
use w3_numeric::{Address, U256};

use crate::error::Result;

fn single_word(ty: AbiType, value: AbiValue) -> Result<[u8; 32]> {
    let encoded = w3_abi::encode::encode_elements(&[ty], &[value])?;
    let mut word = [0u8; 32];
    word.copy_from_slice(&encoded[..32]);
    Ok(word)
}

pub fn word_address(addr: Address) -> Result<[u8; 32]> {
    single_word(AbiType::Address, AbiValue::Address(addr))
}

pub fn word_uint256(value: U256) -> Result<[u8; 32]> {
    single_word(AbiType::Uint(256), AbiValue::Uint(value))
}

pub fn word_bool(value: bool) -> Result<[u8; 32]> {
    single_word(AbiType::Bool, AbiValue::Bool(value))
}

pub fn word_bytes32(value: [u8; 32]) -> Result<[u8; 32]> {
    single_word(AbiType::FixedBytes(32), AbiValue::FixedBytes(value.to_vec()))
}

/// `bytes`/`string` fields are encoded in EIP-712's `encodeData` as
/// `keccak256(value)`, per EIP-712's dynamic-type encoding rule.
pub fn word_dynamic(value: &[u8]) -> [u8; 32] {
    keccak256(value)
}

/// Hashes `typeHash ‖ fields` (each already a 32-byte EIP-712 word) as a
/// single static tuple through the shared ABI encoder, producing
/// `hashStruct` / the domain separator depending on caller.
pub fn hash_words(type_hash: [u8; 32], fields: &[[u8; 32]]) -> Result<[u8; 32]> {
    let types = vec![AbiType::FixedBytes(32); fields.len() + 1];
    let mut values = Vec::with_capacity(fields.len() + 1);
    values.push(AbiValue::FixedBytes(type_hash.to_vec()));
    values.extend(fields.iter().map(|w| AbiValue::FixedBytes(w.to_vec())));
    let encoded = w3_abi::encode::encode_elements(&types, &values)?;
    Ok(keccak256(&encoded))
}
