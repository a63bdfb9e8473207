//! The shared head/tail decoder, mirroring [`crate::encode`] exactly so
//! offsets and lengths are validated against a local frame's bounds at
//! every recursion level, not just the outermost call.

use w3_numeric::{Address, U256};

use crate::error::{AbiError, Result};
use crate::types::AbiType;
use crate::value::{AbiValue, Int256};

const WORD: usize = 32;

fn read_word(data: &[u8], offset: usize) -> Result<[u8; 32]> {
    if offset + WORD > data.len() {
        return Err(AbiError::InputTooShort(offset + WORD, data.len()));
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&data[offset..offset + WORD]);
    Ok(out)
}

fn read_usize(data: &[u8], offset: usize) -> Result<usize> {
    let word = read_word(data, offset)?;
    let value = U256::from_be_bytes(word);
    let bytes = value.to_be_bytes();
    if bytes[..24].iter().any(|&b| b != 0) {
        return Err(AbiError::OffsetOutOfRange(usize::MAX, data.len()));
    }
    let mut low = [0u8; 8];
    low.copy_from_slice(&bytes[24..]);
    Ok(u64::from_be_bytes(low) as usize)
}

/// Decodes `data` (a head/tail frame, with no leading selector) against
/// `types`, returning one [`AbiValue`] per type in order.
pub fn decode_elements(types: &[AbiType], data: &[u8]) -> Result<Vec<AbiValue>> {
    let head_sizes: Vec<usize> = types.iter().map(AbiType::head_size).collect();
    let head_total: usize = head_sizes.iter().sum();
    if data.len() < head_total {
        return Err(AbiError::InputTooShort(head_total, data.len()));
    }

    let mut values = Vec::with_capacity(types.len());
    let mut pos = 0usize;
    for (ty, size) in types.iter().zip(&head_sizes) {
        if ty.is_dynamic() {
            let tail_offset = read_usize(data, pos)?;
            if tail_offset > data.len() {
                return Err(AbiError::OffsetOutOfRange(tail_offset, data.len()));
            }
            values.push(decode_dynamic_tail(ty, data, tail_offset)?);
        } else {
            values.push(decode_static(ty, &data[pos..pos + size])?);
        }
        pos += size;
    }
    Ok(values)
}

fn decode_static(ty: &AbiType, slot: &[u8]) -> Result<AbiValue> {
    match ty {
        AbiType::Uint(_) => {
            let word: [u8; 32] = slot[..32].try_into().unwrap();
            Ok(AbiValue::Uint(U256::from_be_bytes(word)))
        }
        AbiType::Int(_) => {
            let mut bytes = [0u8; 32];
            bytes.copy_from_slice(&slot[..32]);
            Ok(AbiValue::Int(Int256(bytes)))
        }
        AbiType::Address => {
            let mut addr = [0u8; 20];
            addr.copy_from_slice(&slot[12..32]);
            Ok(AbiValue::Address(Address::from_bytes(addr)))
        }
        AbiType::Bool => Ok(AbiValue::Bool(slot[31] != 0)),
        AbiType::FixedBytes(n) => Ok(AbiValue::FixedBytes(slot[..*n].to_vec())),
        AbiType::FixedArray(inner, len) => {
            let types: Vec<AbiType> = (0..*len).map(|_| (**inner).clone()).collect();
            Ok(AbiValue::Array(decode_elements(&types, slot)?))
        }
        AbiType::Tuple(elem_types) => Ok(AbiValue::Tuple(decode_elements(elem_types, slot)?)),
        AbiType::Bytes | AbiType::String | AbiType::Array(_) => {
            Err(AbiError::TypeMismatch(ty.canonical()))
        }
    }
}

fn decode_dynamic_tail(ty: &AbiType, data: &[u8], offset: usize) -> Result<AbiValue> {
    match ty {
        AbiType::Bytes => {
            let bytes = decode_length_prefixed(data, offset)?;
            Ok(AbiValue::Bytes(bytes))
        }
        AbiType::String => {
            let bytes = decode_length_prefixed(data, offset)?;
            let s = String::from_utf8(bytes).map_err(|_| AbiError::TypeMismatch("string".to_string()))?;
            Ok(AbiValue::String(s))
        }
        AbiType::Array(inner) => {
            let len = read_usize(data, offset)?;
            let body_start = offset + WORD;
            let types: Vec<AbiType> = (0..len).map(|_| (**inner).clone()).collect();
            let body_head = types.iter().map(AbiType::head_size).sum::<usize>();
            if body_start + body_head > data.len() {
                return Err(AbiError::LengthOutOfRange(len, data.len()));
            }
            let elems = decode_elements(&types, &data[body_start..])?;
            Ok(AbiValue::Array(elems))
        }
        AbiType::FixedArray(inner, len) => {
            let types: Vec<AbiType> = (0..*len).map(|_| (**inner).clone()).collect();
            let elems = decode_elements(&types, &data[offset..])?;
            Ok(AbiValue::Array(elems))
        }
        AbiType::Tuple(elem_types) => Ok(AbiValue::Tuple(decode_elements(elem_types, &data[offset..])?)),
        _ => Err(AbiError::TypeMismatch(ty.canonical())),
    }
}

fn decode_length_prefixed(data: &[u8], offset: usize) -> Result<Vec<u8>> {
    let len = read_usize(data, offset)?;
    let body_start = offset + WORD;
    if body_start + len > data.len() {
        return Err(AbiError::LengthOutOfRange(len, data.len()));
    }
    Ok(data[body_start..body_start + len].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode_elements;

    #[test]
    fn roundtrips_mixed_static_and_dynamic() {
        let types = vec![
            AbiType::Uint(256),
            AbiType::String,
            AbiType::Array(Box::new(AbiType::Uint(256))),
        ];
        let values = vec![
            AbiValue::Uint(U256::from_u64(42)),
            AbiValue::String("hello world, this is longer than one word".to_string()),
            AbiValue::Array(vec![AbiValue::Uint(U256::from_u64(1)), AbiValue::Uint(U256::from_u64(2))]),
        ];
        let encoded = encode_elements(&types, &values).unwrap();
        let decoded = decode_elements(&types, &encoded).unwrap();
        assert_eq!(decoded, values);
    }

    #[test]
    fn roundtrips_nested_tuple() {
        let inner_tuple = AbiType::Tuple(vec![AbiType::Address, AbiType::Bytes]);
        let types = vec![AbiType::Array(Box::new(inner_tuple))];
        let addr = Address::from_bytes([0x11; 20]);
        let values = vec![AbiValue::Array(vec![AbiValue::Tuple(vec![
            AbiValue::Address(addr),
            AbiValue::Bytes(vec![1, 2, 3, 4, 5]),
        ])])];
        let encoded = encode_elements(&types, &values).unwrap();
        let decoded = decode_elements(&types, &encoded).unwrap();
        assert_eq!(decoded, values);
    }

    #[test]
    fn rejects_offset_past_end() {
        let types = vec![AbiType::Bytes];
        let mut data = vec![0u8; 32];
        data[31] = 200;
        assert!(matches!(decode_elements(&types, &data), Err(AbiError::OffsetOutOfRange(_, _))));
    }

    #[test]
    fn rejects_length_exceeding_remaining_input() {
        let types = vec![AbiType::Bytes];
        let mut data = vec![0u8; 64];
        data[31] = 32;
        data[63] = 255;
        assert!(matches!(decode_elements(&types, &data), Err(AbiError::LengthOutOfRange(_, _))));
    }

    #[test]
    fn rejects_truncated_head() {
        let types = vec![AbiType::Uint(256), AbiType::Uint(256)];
        let data = vec![0u8; 32];
        assert!(decode_elements(&types, &data).is_err());
    }
}
