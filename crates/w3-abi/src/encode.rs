//! The shared head/tail encoder. Every public encoding surface —
//! `abi::encode`, EIP-712 struct/array encoding, and the ERC-4337 UserOp
//! packer — routes through [`encode_elements`].

use w3_numeric::U256;

use crate::error::{AbiError, Result};
use crate::types::AbiType;
use crate::value::AbiValue;

fn uint_fits_width(value: U256, width: usize) -> bool {
    if width >= 256 {
        return true;
    }
    let bytes = value.to_be_bytes();
    let full_zero_bytes = (256 - width) / 8;
    let partial_bits = (256 - width) % 8;
    if bytes[..full_zero_bytes].iter().any(|&b| b != 0) {
        return false;
    }
    if partial_bits > 0 {
        let mask = 0xffu8 << (8 - partial_bits);
        if bytes[full_zero_bytes] & mask != 0 {
            return false;
        }
    }
    true
}

fn validate(ty: &AbiType, value: &AbiValue) -> Result<()> {
    match (ty, value) {
        (AbiType::Uint(n), AbiValue::Uint(v)) => {
            if !uint_fits_width(*v, *n) {
                return Err(AbiError::IntegerOutOfRange);
            }
            Ok(())
        }
        (AbiType::Int(n), AbiValue::Int(v)) => {
            if !v.fits_width(*n) {
                return Err(AbiError::IntegerOutOfRange);
            }
            Ok(())
        }
        (AbiType::Address, AbiValue::Address(_)) => Ok(()),
        (AbiType::Bool, AbiValue::Bool(_)) => Ok(()),
        (AbiType::FixedBytes(n), AbiValue::FixedBytes(bytes)) => {
            if bytes.len() != *n {
                return Err(AbiError::TypeMismatch(ty.canonical()));
            }
            Ok(())
        }
        (AbiType::Bytes, AbiValue::Bytes(_)) => Ok(()),
        (AbiType::String, AbiValue::String(_)) => Ok(()),
        (AbiType::FixedArray(inner, len), AbiValue::Array(elems)) => {
            if elems.len() != *len {
                return Err(AbiError::TypeMismatch(ty.canonical()));
            }
            elems.iter().try_for_each(|e| validate(inner, e))
        }
        (AbiType::Array(inner), AbiValue::Array(elems)) => {
            elems.iter().try_for_each(|e| validate(inner, e))
        }
        (AbiType::Tuple(elem_types), AbiValue::Tuple(elems)) => {
            if elem_types.len() != elems.len() {
                return Err(AbiError::TypeMismatch(ty.canonical()));
            }
            elem_types.iter().zip(elems).try_for_each(|(t, v)| validate(t, v))
        }
        _ => Err(AbiError::TypeMismatch(ty.canonical())),
    }
}

/// Encodes `values` against `types` as the standalone head/tail frame
/// for a Solidity parameter list, function call, or tuple body.
pub fn encode_elements(types: &[AbiType], values: &[AbiValue]) -> Result<Vec<u8>> {
    if types.len() != values.len() {
        return Err(AbiError::TypeMismatch("parameter count mismatch".to_string()));
    }
    for (ty, val) in types.iter().zip(values) {
        validate(ty, val)?;
    }

    let head_sizes: Vec<usize> = types.iter().map(AbiType::head_size).collect();
    let head_total: usize = head_sizes.iter().sum();

    let mut head = vec![0u8; head_total];
    let mut tail = Vec::new();
    let mut pos = 0usize;
    let mut tail_cursor = head_total;

    for (i, (ty, val)) in types.iter().zip(values).enumerate() {
        if ty.is_dynamic() {
            let encoded_tail = encode_dynamic_tail(ty, val)?;
            head[pos..pos + 32].copy_from_slice(&U256::from_u128(tail_cursor as u128).to_be_bytes());
            tail_cursor += encoded_tail.len();
            tail.extend_from_slice(&encoded_tail);
        } else {
            let bytes = encode_static(ty, val)?;
            head[pos..pos + bytes.len()].copy_from_slice(&bytes);
        }
        pos += head_sizes[i];
    }

    head.extend_from_slice(&tail);
    Ok(head)
}

fn encode_static(ty: &AbiType, value: &AbiValue) -> Result<Vec<u8>> {
    match (ty, value) {
        (AbiType::Uint(_), AbiValue::Uint(v)) => Ok(v.to_be_bytes().to_vec()),
        (AbiType::Int(_), AbiValue::Int(v)) => Ok(v.0.to_vec()),
        (AbiType::Address, AbiValue::Address(addr)) => {
            let mut out = vec![0u8; 32];
            out[12..].copy_from_slice(addr.as_bytes());
            Ok(out)
        }
        (AbiType::Bool, AbiValue::Bool(b)) => {
            let mut out = vec![0u8; 32];
            out[31] = if *b { 1 } else { 0 };
            Ok(out)
        }
        (AbiType::FixedBytes(n), AbiValue::FixedBytes(bytes)) => {
            let mut out = vec![0u8; 32];
            out[..*n].copy_from_slice(bytes);
            Ok(out)
        }
        (AbiType::FixedArray(inner, _), AbiValue::Array(elems)) => {
            let types: Vec<AbiType> = elems.iter().map(|_| (**inner).clone()).collect();
            encode_elements(&types, elems)
        }
        (AbiType::Tuple(elem_types), AbiValue::Tuple(elems)) => encode_elements(elem_types, elems),
        _ => Err(AbiError::TypeMismatch(ty.canonical())),
    }
}

fn encode_dynamic_tail(ty: &AbiType, value: &AbiValue) -> Result<Vec<u8>> {
    match (ty, value) {
        (AbiType::Bytes, AbiValue::Bytes(bytes)) => Ok(encode_length_prefixed(bytes)),
        (AbiType::String, AbiValue::String(s)) => Ok(encode_length_prefixed(s.as_bytes())),
        (AbiType::Array(inner), AbiValue::Array(elems)) => {
            let types: Vec<AbiType> = elems.iter().map(|_| (**inner).clone()).collect();
            let mut out = U256::from_u128(elems.len() as u128).to_be_bytes().to_vec();
            out.extend_from_slice(&encode_elements(&types, elems)?);
            Ok(out)
        }
        (AbiType::FixedArray(inner, _), AbiValue::Array(elems)) => {
            let types: Vec<AbiType> = elems.iter().map(|_| (**inner).clone()).collect();
            encode_elements(&types, elems)
        }
        (AbiType::Tuple(elem_types), AbiValue::Tuple(elems)) => encode_elements(elem_types, elems),
        _ => Err(AbiError::TypeMismatch(ty.canonical())),
    }
}

fn encode_length_prefixed(data: &[u8]) -> Vec<u8> {
    let mut out = U256::from_u128(data.len() as u128).to_be_bytes().to_vec();
    out.extend_from_slice(data);
    let padding = (32 - (data.len() % 32)) % 32;
    out.extend(core::iter::repeat(0u8).take(padding));
    out
}

/// Non-standard packed encoding: natural-width concatenation, no
/// padding, no offsets. Arrays and tuples are rejected.
pub fn encode_packed(types: &[AbiType], values: &[AbiValue]) -> Result<Vec<u8>> {
    if types.len() != values.len() {
        return Err(AbiError::TypeMismatch("parameter count mismatch".to_string()));
    }
    let mut out = Vec::new();
    for (ty, val) in types.iter().zip(values) {
        validate(ty, val)?;
        match (ty, val) {
            (AbiType::Uint(n), AbiValue::Uint(v)) => {
                let bytes = v.to_be_bytes();
                out.extend_from_slice(&bytes[32 - n / 8..]);
            }
            (AbiType::Int(n), AbiValue::Int(v)) => {
                out.extend_from_slice(&v.0[32 - n / 8..]);
            }
            (AbiType::Address, AbiValue::Address(addr)) => out.extend_from_slice(addr.as_bytes()),
            (AbiType::Bool, AbiValue::Bool(b)) => out.push(if *b { 1 } else { 0 }),
            (AbiType::FixedBytes(_), AbiValue::FixedBytes(bytes)) => out.extend_from_slice(bytes),
            (AbiType::Bytes, AbiValue::Bytes(bytes)) => out.extend_from_slice(bytes),
            (AbiType::String, AbiValue::String(s)) => out.extend_from_slice(s.as_bytes()),
            _ => return Err(AbiError::PackedUnsupportedType),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use w3_numeric::Address;

    // known-answer vector: transfer(address,uint256)
    #[test]
    fn transfer_call_known_vector() {
        let types = vec![AbiType::Address, AbiType::Uint(256)];
        let addr = Address::parse("0xCf7Ed3AccA5a467e9e704C703E8D87F634fB0Fc9").unwrap();
        let amount = U256::from_u128(1_000_000_000_000_000_000u128);
        let values = vec![AbiValue::Address(addr), AbiValue::Uint(amount)];
        let encoded = encode_elements(&types, &values).unwrap();
        let selector = w3_hashes::keccak256(crate::types::canonical_signature("transfer", &types).as_bytes());
        let mut calldata = selector[..4].to_vec();
        calldata.extend_from_slice(&encoded);
        assert_eq!(
            hex::encode(&calldata),
            "a9059cbb000000000000000000000000cf7ed3acca5a467e9e704c703e8d87f634fb0fc90000000000000000000000000000000000000000000000000de0b6b3a7640000"
        );
    }

    #[test]
    fn packed_rejects_arrays() {
        let types = vec![AbiType::Array(Box::new(AbiType::Uint(256)))];
        let values = vec![AbiValue::Array(vec![])];
        assert!(encode_packed(&types, &values).is_err());
    }

    mod hex {
        pub fn encode(bytes: impl AsRef<[u8]>) -> String {
            bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
        }
    }
}
