//! Bech32 (BIP-173) and Bech32m (BIP-350) segwit address encoding.

use bech32::{self, u5, FromBase32, ToBase32, Variant};

use crate::error::{CodecError, Result};

/// Encodes a segwit witness program as a Bech32 (witness version 0) or
/// Bech32m (witness version >= 1) address under `hrp`, per BIP-173/350.
pub fn encode_segwit(hrp: &str, witness_version: u8, program: &[u8]) -> Result<String> {
    let variant = if witness_version == 0 { Variant::Bech32 } else { Variant::Bech32m };
    let mut data = vec![u5::try_from_u8(witness_version).map_err(|e| CodecError::InvalidBech32(e.to_string()))?];
    data.extend(program.to_base32());
    bech32::encode(hrp, data, variant).map_err(|e| CodecError::InvalidBech32(e.to_string()))
}

/// Decodes a segwit Bech32/Bech32m address, returning
/// `(hrp, witness_version, program)`.
pub fn decode_segwit(address: &str) -> Result<(String, u8, Vec<u8>)> {
    let (hrp, data, _variant) =
        bech32::decode(address).map_err(|e| CodecError::InvalidBech32(e.to_string()))?;
    if data.is_empty() {
        return Err(CodecError::InvalidBech32("empty data part".to_string()));
    }
    let witness_version = data[0].to_u8();
    let program =
        Vec::<u8>::from_base32(&data[1..]).map_err(|e| CodecError::InvalidBech32(e.to_string()))?;
    Ok((hrp, witness_version, program))
}

/// Plain Bech32 encoding of an arbitrary byte payload (no witness
/// version framing), for non-Bitcoin uses such as Lightning invoices.
pub fn encode(hrp: &str, data: &[u8]) -> Result<String> {
    bech32::encode(hrp, data.to_base32(), Variant::Bech32)
        .map_err(|e| CodecError::InvalidBech32(e.to_string()))
}

pub fn decode(encoded: &str) -> Result<(String, Vec<u8>, Variant)> {
    let (hrp, data, variant) =
        bech32::decode(encoded).map_err(|e| CodecError::InvalidBech32(e.to_string()))?;
    let bytes = Vec::<u8>::from_base32(&data).map_err(|e| CodecError::InvalidBech32(e.to_string()))?;
    Ok((hrp, bytes, variant))
}

#[cfg(test)]
mod tests {
    use super::*;

    // BIP-173 test vector: P2WPKH for mainnet.
    #[test]
    fn bip173_p2wpkh_vector() {
        let program = hex_literal::hex!("751e76e8199196d454941c45d1b3a323f1433bd");
        let address = encode_segwit("bc", 0, &program).unwrap();
        assert_eq!(address, "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4");

        let (hrp, version, decoded_program) = decode_segwit(&address).unwrap();
        assert_eq!(hrp, "bc");
        assert_eq!(version, 0);
        assert_eq!(decoded_program, program);
    }

    // BIP-350 test vector: P2TR (witness v1, Bech32m) for mainnet.
    #[test]
    fn bip350_p2tr_vector() {
        let program = hex_literal::hex!("339ce7e165e67d93adb3fef88a6d4beed33f01fa876f05674cf8e29254d6dd4");
        let address = encode_segwit("bc", 1, &program).unwrap();
        let (hrp, version, decoded_program) = decode_segwit(&address).unwrap();
        assert_eq!(hrp, "bc");
        assert_eq!(version, 1);
        assert_eq!(decoded_program, program);
    }

    #[test]
    fn rejects_malformed_checksum() {
        let mut broken = encode_segwit("bc", 0, &[0u8; 20]).unwrap();
        broken.push('q');
        assert!(decode_segwit(&broken).is_err());
    }
}
