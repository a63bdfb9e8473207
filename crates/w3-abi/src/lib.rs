//! Solidity ABI v2 encoding, decoding, function selectors, and revert
//! decoding, built on a single shared head/tail frame encoder/decoder
//! (see [`encode::encode_elements`] / [`decode::decode_elements`]) so
//! the function-call, EIP-712, and ERC-4337 encoders downstream never
//! reimplement padding or offset arithmetic on their own.

pub mod decode;
pub mod decode_error;
pub mod encode;
pub mod error;
pub mod selector;
pub mod types;
pub mod value;

pub use decode_error::{decode_revert, ErrorDef, PanicCode, RevertReason};
pub use error::{AbiError, Result};
pub use selector::{event_topic, function_selector};
pub use types::{canonical_signature, AbiType};
pub use value::{AbiValue, Int256};

/// Encodes a full function call: 4-byte selector followed by the
/// head/tail-encoded parameters.
pub fn encode_call(name: &str, params: &[AbiType], values: &[AbiValue]) -> Result<Vec<u8>> {
    let mut out = function_selector(name, params).to_vec();
    out.extend_from_slice(&encode::encode_elements(params, values)?);
    Ok(out)
}

/// Decodes the parameters out of a full function call, checking that
/// `data` begins with the expected selector.
pub fn decode_call(name: &str, params: &[AbiType], data: &[u8]) -> Result<Vec<AbiValue>> {
    let expected = function_selector(name, params);
    if data.len() < 4 || data[..4] != expected {
        return Err(AbiError::TypeMismatch(format!("selector mismatch for {name}")));
    }
    decode::decode_elements(params, &data[4..])
}

/// Encodes `values` against `types` as a standalone ABI v2 frame (no
/// selector), e.g. for `abi.encode(...)`-equivalent use.
pub fn encode(types: &[AbiType], values: &[AbiValue]) -> Result<Vec<u8>> {
    encode::encode_elements(types, values)
}

/// Decodes an ABI v2 frame produced by [`encode`].
pub fn decode(types: &[AbiType], data: &[u8]) -> Result<Vec<AbiValue>> {
    decode::decode_elements(types, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use w3_numeric::{Address, U256};

    // encode/decode roundtrip for arbitrary well-typed values.
    #[test]
    fn encode_decode_roundtrips() {
        let types = vec![AbiType::Uint(256), AbiType::Bool, AbiType::Bytes];
        let values = vec![
            AbiValue::Uint(U256::from_u64(7)),
            AbiValue::Bool(true),
            AbiValue::Bytes(vec![0xde, 0xad, 0xbe, 0xef]),
        ];
        let encoded = encode(&types, &values).unwrap();
        assert_eq!(decode(&types, &encoded).unwrap(), values);
    }

    // the function-call selector is always the leading 4 bytes of
    // keccak256(canonical signature), independent of arguments.
    #[test]
    fn selector_is_stable_across_argument_values() {
        let params = [AbiType::Address, AbiType::Uint(256)];
        let a = encode_call(
            "transfer",
            &params,
            &[AbiValue::Address(Address::from_bytes([1; 20])), AbiValue::Uint(U256::from_u64(1))],
        )
        .unwrap();
        let b = encode_call(
            "transfer",
            &params,
            &[AbiValue::Address(Address::from_bytes([2; 20])), AbiValue::Uint(U256::from_u64(2))],
        )
        .unwrap();
        assert_eq!(a[..4], b[..4]);
        assert_ne!(a, b);
    }

    #[test]
    fn decode_call_rejects_wrong_selector() {
        let params = [AbiType::Uint(256)];
        let data = encode_call("foo", &params, &[AbiValue::Uint(U256::from_u64(1))]).unwrap();
        assert!(decode_call("bar", &params, &data).is_err());
    }
}
