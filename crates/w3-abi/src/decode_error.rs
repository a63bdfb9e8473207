//! Decoding of Solidity revert data: the built-in `Error(string)` and
//! `Panic(uint256)` selectors, plus caller-registered custom errors.

use std::collections::HashMap;

use crate::decode::decode_elements;
use crate::error::{AbiError, Result};
use crate::selector::function_selector;
use crate::types::AbiType;
use crate::value::AbiValue;

const ERROR_SELECTOR: [u8; 4] = [0x08, 0xc3, 0x79, 0xa0];
const PANIC_SELECTOR: [u8; 4] = [0x4e, 0x48, 0x7b, 0x71];

/// A revert reason, decoded from the return data of a failed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevertReason {
    /// `require(false, reason)` or an unhandled `revert(reason)`.
    Error(String),
    /// A Solidity builtin panic, with its well-known code.
    Panic(PanicCode),
    /// A custom error matched against a caller-supplied registry.
    Custom { name: String, args: Vec<AbiValue> },
    /// Revert data that doesn't match any known selector.
    Unknown(Vec<u8>),
}

/// The well-known Solidity panic codes (`Panic(uint256)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanicCode {
    AssertFailed,
    ArithmeticOverflow,
    DivisionByZero,
    EnumConversionOutOfRange,
    StorageByteArrayCorrupted,
    PopOnEmptyArray,
    ArrayOutOfBounds,
    OutOfMemory,
    CallToUninitializedFunction,
    Other(u64),
}

impl PanicCode {
    fn from_code(code: u64) -> Self {
        match code {
            0x01 => PanicCode::AssertFailed,
            0x11 => PanicCode::ArithmeticOverflow,
            0x12 => PanicCode::DivisionByZero,
            0x21 => PanicCode::EnumConversionOutOfRange,
            0x22 => PanicCode::StorageByteArrayCorrupted,
            0x31 => PanicCode::PopOnEmptyArray,
            0x32 => PanicCode::ArrayOutOfBounds,
            0x41 => PanicCode::OutOfMemory,
            0x51 => PanicCode::CallToUninitializedFunction,
            other => PanicCode::Other(other),
        }
    }
}

/// A custom error definition, keyed by its 4-byte selector in the
/// registry passed to [`decode_revert`].
#[derive(Debug, Clone)]
pub struct ErrorDef {
    pub name: String,
    pub params: Vec<AbiType>,
}

impl ErrorDef {
    pub fn selector(&self) -> [u8; 4] {
        function_selector(&self.name, &self.params)
    }
}

/// Decodes `data` (the raw bytes returned by a reverted call) into a
/// [`RevertReason`], consulting `registry` for custom errors.
pub fn decode_revert(data: &[u8], registry: &HashMap<[u8; 4], ErrorDef>) -> Result<RevertReason> {
    if data.len() < 4 {
        return Ok(RevertReason::Unknown(data.to_vec()));
    }
    let selector: [u8; 4] = data[..4].try_into().unwrap();
    let body = &data[4..];

    if selector == ERROR_SELECTOR {
        let values = decode_elements(&[AbiType::String], body)?;
        let AbiValue::String(reason) = values.into_iter().next().unwrap() else {
            return Err(AbiError::TypeMismatch("string".to_string()));
        };
        return Ok(RevertReason::Error(reason));
    }

    if selector == PANIC_SELECTOR {
        let values = decode_elements(&[AbiType::Uint(256)], body)?;
        let AbiValue::Uint(code) = values.into_iter().next().unwrap() else {
            return Err(AbiError::TypeMismatch("uint256".to_string()));
        };
        let bytes = code.to_be_bytes();
        let mut low = [0u8; 8];
        low.copy_from_slice(&bytes[24..]);
        return Ok(RevertReason::Panic(PanicCode::from_code(u64::from_be_bytes(low))));
    }

    if let Some(def) = registry.get(&selector) {
        let values = decode_elements(&def.params, body)?;
        return Ok(RevertReason::Custom { name: def.name.clone(), args: values });
    }

    Ok(RevertReason::Unknown(data.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode_elements;

    #[test]
    fn decodes_builtin_error_string() {
        let body = encode_elements(&[AbiType::String], &[AbiValue::String("insufficient balance".to_string())]).unwrap();
        let mut data = ERROR_SELECTOR.to_vec();
        data.extend_from_slice(&body);
        let reason = decode_revert(&data, &HashMap::new()).unwrap();
        assert_eq!(reason, RevertReason::Error("insufficient balance".to_string()));
    }

    #[test]
    fn decodes_arithmetic_overflow_panic() {
        let body = encode_elements(&[AbiType::Uint(256)], &[AbiValue::Uint(w3_numeric::U256::from_u64(0x11))]).unwrap();
        let mut data = PANIC_SELECTOR.to_vec();
        data.extend_from_slice(&body);
        let reason = decode_revert(&data, &HashMap::new()).unwrap();
        assert_eq!(reason, RevertReason::Panic(PanicCode::ArithmeticOverflow));
    }

    #[test]
    fn decodes_custom_error_via_registry() {
        let def = ErrorDef { name: "InsufficientAllowance".to_string(), params: vec![AbiType::Uint(256), AbiType::Uint(256)] };
        let mut registry = HashMap::new();
        registry.insert(def.selector(), def.clone());

        let body = encode_elements(
            &def.params,
            &[AbiValue::Uint(w3_numeric::U256::from_u64(10)), AbiValue::Uint(w3_numeric::U256::from_u64(5))],
        )
        .unwrap();
        let mut data = def.selector().to_vec();
        data.extend_from_slice(&body);

        let reason = decode_revert(&data, &registry).unwrap();
        match reason {
            RevertReason::Custom { name, args } => {
                assert_eq!(name, "InsufficientAllowance");
                assert_eq!(args.len(), 2);
            }
            other => panic!("unexpected reason: {other:?}"),
        }
    }

    #[test]
    fn falls_back_to_unknown_for_unregistered_selector() {
        let data = vec![0xde, 0xad, 0xbe, 0xef, 1, 2, 3];
        let reason = decode_revert(&data, &HashMap::new()).unwrap();
        assert_eq!(reason, RevertReason::Unknown(data));
    }

    #[test]
    fn treats_short_data_as_unknown() {
        let reason = decode_revert(&[1, 2], &HashMap::new()).unwrap();
        assert_eq!(reason, RevertReason::Unknown(vec![1, 2]));
    }
}
