//! `0x`-aware hex codec.
//!
//! Unlike the plain `hex` crate, [`encode`]/[`decode`] understand the
//! Ethereum convention of an optional `0x` prefix on both sides of the
//! wire, and always produce lowercase output.

use crate::error::{NumericError, Result};

/// Encodes `bytes` as a lowercase hex string, prefixed with `0x` when
/// `prefix` is `true`.
pub fn encode(bytes: &[u8], prefix: bool) -> String {
    let mut out = String::with_capacity(bytes.len() * 2 + if prefix { 2 } else { 0 });
    if prefix {
        out.push_str("0x");
    }
    for b in bytes {
        out.push_str(&format!("{b:02x}"));
    }
    out
}

/// Decodes a hex string, with or without a `0x` prefix.
///
/// Rejects odd-length input and non-hex characters.
pub fn decode(s: &str) -> Result<Vec<u8>> {
    let stripped = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    if stripped.len() % 2 != 0 {
        return Err(NumericError::OddLengthHex);
    }
    let mut out = Vec::with_capacity(stripped.len() / 2);
    let bytes = stripped.as_bytes();
    for (i, pair) in bytes.chunks(2).enumerate() {
        let hi = hex_val(pair[0]).ok_or(NumericError::InvalidHexChar(i * 2))?;
        let lo = hex_val(pair[1]).ok_or(NumericError::InvalidHexChar(i * 2 + 1))?;
        out.push((hi << 4) | lo);
    }
    Ok(out)
}

/// Decodes a hex string into a fixed-size array, erroring if the
/// decoded length does not match `N`.
pub fn decode_to_array<const N: usize>(s: &str) -> Result<[u8; N]> {
    let v = decode(s)?;
    if v.len() != N {
        return Err(NumericError::WrongLength { expected: N, got: v.len() });
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&v);
    Ok(out)
}

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_with_and_without_prefix() {
        assert_eq!(encode(&[0xde, 0xad], true), "0xdead");
        assert_eq!(encode(&[0xde, 0xad], false), "dead");
    }

    #[test]
    fn decode_accepts_both_cases_and_prefix() {
        assert_eq!(decode("0xDEAD").unwrap(), vec![0xde, 0xad]);
        assert_eq!(decode("dead").unwrap(), vec![0xde, 0xad]);
        assert_eq!(decode("0x").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn decode_rejects_odd_length() {
        assert_eq!(decode("0xabc"), Err(NumericError::OddLengthHex));
    }

    #[test]
    fn decode_rejects_non_hex() {
        assert!(matches!(decode("0xzz"), Err(NumericError::InvalidHexChar(0))));
    }

    #[test]
    fn decode_to_array_checks_length() {
        let arr: [u8; 2] = decode_to_array("0xdead").unwrap();
        assert_eq!(arr, [0xde, 0xad]);
        assert!(decode_to_array::<2>("0xdeadbe").is_err());
    }

    proptest::proptest! {
        #[test]
        fn roundtrip_encode_decode(bytes: Vec<u8>) {
            let encoded = encode(&bytes, true);
            let decoded = decode(&encoded).unwrap();
            proptest::prop_assert_eq!(decoded, bytes);
        }
    }
}
