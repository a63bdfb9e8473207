//! 20-byte Ethereum address with EIP-55 checksum support.

use core::fmt;
use core::str::FromStr;

use sha3::{Digest, Keccak256};

use crate::error::{NumericError, Result};
use crate::hex;

/// A 20-byte Ethereum address.
///
/// Parsing accepts mixed case without checksum; [`Address::parse_strict`]
/// additionally verifies the EIP-55 checksum pattern.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Address([u8; 20]);

impl Address {
    /// The zero address (`0x00...00`).
    pub const ZERO: Address = Address([0u8; 20]);

    /// Wraps a raw 20-byte array.
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }

    /// Returns the underlying bytes.
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Parses a `0x`-prefixed or bare 40-hex-character address, accepting
    /// any letter case, without checksum verification.
    pub fn parse(s: &str) -> Result<Self> {
        let bytes = hex::decode_to_array::<20>(s)?;
        Ok(Address(bytes))
    }

    /// Parses an address, requiring that mixed-case input satisfy the
    /// EIP-55 checksum. All-lowercase and all-uppercase input is always
    /// accepted (checksum-agnostic).
    pub fn parse_strict(s: &str) -> Result<Self> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let is_all_lower = stripped.chars().all(|c| !c.is_ascii_uppercase());
        let is_all_upper = stripped.chars().all(|c| !c.is_ascii_lowercase());
        let addr = Self::parse(s)?;
        if is_all_lower || is_all_upper {
            return Ok(addr);
        }
        if addr.to_checksum() != format!("0x{stripped}") {
            return Err(NumericError::InvalidChecksum);
        }
        Ok(addr)
    }

    /// Computes the EIP-55 checksummed hex representation.
    ///
    /// `toChecksum` hashes the lowercase hex (without `0x`) with
    /// Keccak-256, then uppercases each nibble of the address whose
    /// corresponding hash nibble is >= 8.
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(&self.0, false);
        let hash = Keccak256::digest(lower.as_bytes());

        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            if c.is_ascii_digit() {
                out.push(c);
                continue;
            }
            let hash_byte = hash[i / 2];
            let nibble = if i % 2 == 0 { hash_byte >> 4 } else { hash_byte & 0x0f };
            if nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }

    /// Returns `true` iff `s` is a validly-formed address that is either
    /// checksum-agnostic (all lower/all upper) or checksum-correct.
    pub fn is_valid(s: &str) -> bool {
        Self::parse_strict(s).is_ok()
    }

    /// Returns `true` iff `self`'s checksummed rendering equals `s`.
    pub fn is_valid_checksum(&self, s: &str) -> bool {
        self.to_checksum() == s
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_checksum())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_checksum())
    }
}

impl FromStr for Address {
    type Err = NumericError;
    fn from_str(s: &str) -> Result<Self> {
        Address::parse(s)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }
}

impl TryFrom<String> for Address {
    type Error = NumericError;
    fn try_from(s: String) -> Result<Self> {
        Address::parse(&s)
    }
}

impl From<Address> for String {
    fn from(addr: Address) -> Self {
        addr.to_checksum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eip55_checksum_vector() {
        let addr = Address::parse("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap();
        assert_eq!(addr.to_checksum(), "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");
    }

    #[test]
    fn checksum_is_idempotent_and_valid() {
        let bytes = [0x42u8; 20];
        let addr = Address::from_bytes(bytes);
        let c1 = addr.to_checksum();
        let c2 = Address::parse(&c1).unwrap().to_checksum();
        assert_eq!(c1, c2);
        assert!(addr.is_valid_checksum(&c1));
    }

    #[test]
    fn strict_parse_rejects_bad_checksum() {
        let bad = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAeD"; // trailing D flipped
        assert!(Address::parse_strict(bad).is_err());
    }

    #[test]
    fn strict_parse_accepts_all_lower_and_all_upper() {
        assert!(Address::parse_strict("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").is_ok());
        assert!(Address::parse_strict("0x5AAEB6053F3E94C9B9A09F33669435E7EF1BEAED").is_ok());
    }

    #[test]
    fn zero_and_all_ff_addresses_are_valid() {
        assert!(Address::parse("0x0000000000000000000000000000000000000000").is_ok());
        assert!(Address::parse("0xffffffffffffffffffffffffffffffffffffffff").is_ok());
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(Address::parse("0xdead").is_err());
    }
}
