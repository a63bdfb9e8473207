//! Wei / gwei / ether unit conversion.

use crate::error::{NumericError, Result};
use crate::uint::U256;

/// Decimal exponent for gwei (10**9 wei).
pub const GWEI_DECIMALS: u32 = 9;
/// Decimal exponent for ether (10**18 wei).
pub const ETHER_DECIMALS: u32 = 18;

/// Parses a decimal string (optionally with a fractional part) into an
/// integer scaled by `10**decimals`, i.e. "wei" for `decimals = 18`.
///
/// At most `decimals` fractional digits are accepted; a 19th+ digit (for
/// `decimals = 18`) is an error.
pub fn parse_units(s: &str, decimals: u32) -> Result<U256> {
    let s = s.trim();
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, f),
        None => (s, ""),
    };
    if frac_part.len() as u32 > decimals {
        return Err(NumericError::TooManyFractionalDigits);
    }
    let int_part = if int_part.is_empty() { "0" } else { int_part };
    let mut value = U256::from_dec_str(int_part)?;

    let pad = decimals - frac_part.len() as u32;
    if !frac_part.is_empty() {
        let frac_value = U256::from_dec_str(frac_part)?;
        for _ in 0..frac_part.len() {
            value = value.mul_small(10);
        }
        value = value.checked_add(frac_value)?;
    }
    for _ in 0..pad {
        value = value.mul_small(10);
    }
    Ok(value)
}

/// Formats an integer scaled by `10**decimals` as a decimal string,
/// trimming trailing fractional zeros (but always showing at least one
/// digit before the point).
pub fn format_units(value: U256, decimals: u32) -> String {
    if decimals == 0 {
        return value.to_dec_string();
    }
    let divisor_digits = decimals;
    let mut int_part = value;
    let mut frac_digits = Vec::with_capacity(divisor_digits as usize);
    for _ in 0..divisor_digits {
        let (q, r) = int_part.divmod_small(10);
        frac_digits.push(char::from_digit(r as u32, 10).unwrap());
        int_part = q;
    }
    // frac_digits were collected least-significant-first; reverse for display order
    frac_digits.reverse();
    while frac_digits.last() == Some(&'0') {
        frac_digits.pop();
    }
    let int_str = int_part.to_dec_string();
    if frac_digits.is_empty() {
        int_str
    } else {
        let frac_str: String = frac_digits.into_iter().collect();
        format!("{int_str}.{frac_str}")
    }
}

/// Parses an ether-denominated decimal string into wei.
pub fn parse_ether(s: &str) -> Result<U256> {
    parse_units(s, ETHER_DECIMALS)
}

/// Formats a wei amount as an ether-denominated decimal string.
pub fn format_ether(wei: U256) -> String {
    format_units(wei, ETHER_DECIMALS)
}

/// Parses a gwei-denominated decimal string into wei.
pub fn parse_gwei(s: &str) -> Result<U256> {
    parse_units(s, GWEI_DECIMALS)
}

/// Formats a wei amount as a gwei-denominated decimal string.
pub fn format_gwei(wei: U256) -> String {
    format_units(wei, GWEI_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ether_integer() {
        assert_eq!(parse_ether("1").unwrap(), U256::from_u128(1_000_000_000_000_000_000));
    }

    #[test]
    fn parse_ether_fractional() {
        assert_eq!(parse_ether("1.5").unwrap(), U256::from_u128(1_500_000_000_000_000_000));
    }

    #[test]
    fn parse_ether_too_many_fractional_digits_errors() {
        assert!(parse_ether("1.0000000000000000001").is_err());
    }

    #[test]
    fn parse_ether_max_fractional_digits_ok() {
        assert!(parse_ether("1.000000000000000001").is_ok());
    }

    #[test]
    fn format_ether_trims_trailing_zeros() {
        assert_eq!(format_ether(U256::from_u128(1_000_000_000_000_000_000)), "1");
        assert_eq!(format_ether(U256::from_u128(1_500_000_000_000_000_000)), "1.5");
    }

    #[test]
    fn format_ether_zero() {
        assert_eq!(format_ether(U256::ZERO), "0");
    }

    #[test]
    fn gwei_roundtrip() {
        let wei = parse_gwei("123.456789").unwrap();
        assert_eq!(format_gwei(wei), "123.456789");
    }

    // parse_units(format_ether(x * 10^18)) == x * 10^18, for representative x
    #[test]
    fn unit_roundtrip_property() {
        for x in [0u64, 1, 2, 1_000_000, u32::MAX as u64] {
            let wei = U256::from_u64(x).mul_small(1_000_000_000).mul_small(1_000_000_000);
            let s = format_ether(wei);
            let back = parse_ether(&s).unwrap();
            assert_eq!(back, wei);
        }
    }
}
