//! A minimal unsigned 256-bit integer, sufficient for unit conversion and
//! ABI `uint256`/`int256` encoding.
//!
//! This is deliberately narrow: four `u64` limbs, little-endian, with the
//! operations the rest of the core actually needs (big-endian byte
//! conversion, small-multiplier/divisor arithmetic for decimal parsing,
//! wrapping add/sub for two's-complement `int256` support). It is not a
//! general-purpose bignum.

use core::cmp::Ordering;
use core::fmt;

use crate::error::{NumericError, Result};

/// An unsigned 256-bit integer, interpreted mod 2**256.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct U256(pub [u64; 4]);

impl U256 {
    pub const ZERO: U256 = U256([0, 0, 0, 0]);
    pub const ONE: U256 = U256([1, 0, 0, 0]);
    pub const MAX: U256 = U256([u64::MAX; 4]);

    pub const fn from_u64(v: u64) -> Self {
        U256([v, 0, 0, 0])
    }

    pub const fn from_u128(v: u128) -> Self {
        U256([v as u64, (v >> 64) as u64, 0, 0])
    }

    /// Decodes 32 big-endian bytes.
    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        let mut limbs = [0u64; 4];
        for i in 0..4 {
            let chunk: [u8; 8] = bytes[24 - i * 8..32 - i * 8].try_into().unwrap();
            limbs[i] = u64::from_be_bytes(chunk);
        }
        U256(limbs)
    }

    /// Encodes as 32 big-endian bytes.
    pub fn to_be_bytes(self) -> [u8; 32] {
        let mut out = [0u8; 32];
        for i in 0..4 {
            out[24 - i * 8..32 - i * 8].copy_from_slice(&self.0[i].to_be_bytes());
        }
        out
    }

    pub fn is_zero(self) -> bool {
        self.0 == [0, 0, 0, 0]
    }

    /// Wrapping (mod 2**256) addition.
    pub fn wrapping_add(self, rhs: U256) -> U256 {
        let mut out = [0u64; 4];
        let mut carry = 0u128;
        for i in 0..4 {
            let sum = self.0[i] as u128 + rhs.0[i] as u128 + carry;
            out[i] = sum as u64;
            carry = sum >> 64;
        }
        U256(out)
    }

    /// Wrapping (mod 2**256) subtraction.
    pub fn wrapping_sub(self, rhs: U256) -> U256 {
        self.wrapping_add(rhs.wrapping_neg())
    }

    /// Two's-complement negation mod 2**256.
    pub fn wrapping_neg(self) -> U256 {
        let mut out = [0u64; 4];
        let mut carry = 1u128;
        for i in 0..4 {
            let sum = (!self.0[i]) as u128 + carry;
            out[i] = sum as u64;
            carry = sum >> 64;
        }
        U256(out)
    }

    /// Multiplies by a small (`u64`) factor, wrapping mod 2**256.
    pub fn mul_small(self, factor: u64) -> U256 {
        let mut out = [0u64; 4];
        let mut carry = 0u128;
        for i in 0..4 {
            let prod = self.0[i] as u128 * factor as u128 + carry;
            out[i] = prod as u64;
            carry = prod >> 64;
        }
        U256(out)
    }

    /// Divides by a small (`u64`) divisor, returning `(quotient, remainder)`.
    pub fn divmod_small(self, divisor: u64) -> (U256, u64) {
        assert!(divisor != 0);
        let mut quotient = [0u64; 4];
        let mut rem: u128 = 0;
        for i in (0..4).rev() {
            let cur = (rem << 64) | self.0[i] as u128;
            quotient[i] = (cur / divisor as u128) as u64;
            rem = cur % divisor as u128;
        }
        (U256(quotient), rem as u64)
    }

    /// Checked addition, erroring on overflow past 2**256.
    pub fn checked_add(self, rhs: U256) -> Result<U256> {
        let result = self.wrapping_add(rhs);
        if result < self {
            return Err(NumericError::Overflow);
        }
        Ok(result)
    }

    /// Parses a base-10 string (no sign, no `0x` prefix) into a `U256`,
    /// erroring on overflow or non-digit characters.
    pub fn from_dec_str(s: &str) -> Result<U256> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(NumericError::InvalidDecimal(s.to_string()));
        }
        let mut acc = U256::ZERO;
        for c in s.chars() {
            let digit = c.to_digit(10).unwrap() as u64;
            acc = acc.mul_small(10);
            acc = acc.checked_add(U256::from_u64(digit))?;
        }
        Ok(acc)
    }

    /// Formats as a base-10 string.
    pub fn to_dec_string(self) -> String {
        if self.is_zero() {
            return "0".to_string();
        }
        let mut digits = Vec::new();
        let mut cur = self;
        while !cur.is_zero() {
            let (q, r) = cur.divmod_small(10);
            digits.push(char::from_digit(r as u32, 10).unwrap());
            cur = q;
        }
        digits.iter().rev().collect()
    }
}

impl PartialOrd for U256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for U256 {
    fn cmp(&self, other: &Self) -> Ordering {
        for i in (0..4).rev() {
            match self.0[i].cmp(&other.0[i]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl fmt::Debug for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U256({})", self.to_dec_string())
    }
}

impl fmt::Display for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_dec_string())
    }
}

impl From<u64> for U256 {
    fn from(v: u64) -> Self {
        U256::from_u64(v)
    }
}

impl From<u128> for U256 {
    fn from(v: u128) -> Self {
        U256::from_u128(v)
    }
}

impl TryFrom<String> for U256 {
    type Error = NumericError;

    /// Parses either a `0x`-prefixed hex string or a bare base-10 string,
    /// matching how `U256` values round-trip through JSON.
    fn try_from(s: String) -> Result<Self> {
        if s.starts_with("0x") || s.starts_with("0X") {
            let bytes = crate::hex::decode(&s)?;
            if bytes.len() > 32 {
                return Err(NumericError::Overflow);
            }
            let mut padded = [0u8; 32];
            padded[32 - bytes.len()..].copy_from_slice(&bytes);
            Ok(U256::from_be_bytes(padded))
        } else {
            U256::from_dec_str(&s)
        }
    }
}

impl From<U256> for String {
    fn from(v: U256) -> Self {
        v.to_dec_string()
    }
}
