//! ABI-encodable values, one variant per [`crate::types::AbiType`] shape.

use w3_numeric::{Address, U256};

/// A signed 256-bit integer, stored as its 32-byte two's complement
/// representation (already sign-extended to 256 bits, matching how
/// `int<N>` values sit inside a 32-byte ABI slot).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Int256(pub [u8; 32]);

impl Int256 {
    pub fn from_i128(value: i128) -> Self {
        let mut bytes = [0xffu8; 32];
        if value >= 0 {
            bytes = [0u8; 32];
        }
        let be = value.to_be_bytes();
        bytes[16..].copy_from_slice(&be);
        Int256(bytes)
    }

    pub fn to_i128(&self) -> Option<i128> {
        let is_negative = self.0[0] & 0x80 != 0;
        let fill = if is_negative { 0xffu8 } else { 0u8 };
        if self.0[..16].iter().any(|&b| b != fill) {
            return None;
        }
        let mut be = [0u8; 16];
        be.copy_from_slice(&self.0[16..]);
        Some(i128::from_be_bytes(be))
    }

    pub fn is_negative(&self) -> bool {
        self.0[0] & 0x80 != 0
    }

    /// Checks that every bit above `width` is a correct sign extension.
    pub fn fits_width(&self, width: usize) -> bool {
        if width >= 256 {
            return true;
        }
        let fill = if self.is_negative() { 0xffu8 } else { 0u8 };
        let full_bytes = (256 - width) / 8;
        let partial_bits = (256 - width) % 8;
        if self.0[..full_bytes].iter().any(|&b| b != fill) {
            return false;
        }
        if partial_bits > 0 {
            let mask = 0xffu8 << (8 - partial_bits);
            let byte = self.0[full_bytes];
            if byte & mask != if fill == 0xff { mask } else { 0 } {
                return false;
            }
        }
        true
    }
}

/// An ABI-encodable value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbiValue {
    Uint(U256),
    Int(Int256),
    Address(Address),
    Bool(bool),
    FixedBytes(Vec<u8>),
    Bytes(Vec<u8>),
    String(String),
    Array(Vec<AbiValue>),
    Tuple(Vec<AbiValue>),
}
