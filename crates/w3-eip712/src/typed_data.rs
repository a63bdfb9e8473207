//! Typed structured-data hashing and signing.

use w3_curves::secp256k1::{self, Signature};
use w3_numeric::Address;
use w3_tx::Signer;

use crate::domain::Eip712Domain;
use crate::error::Result;
use crate::words;

/// A type hashable per EIP-712's `hashStruct` rules.
///
/// Implementors provide the canonical type string (sub-types referenced
/// alphabetically after the primary, per EIP-712) and the
/// already-encoded 32-byte words for each field, following the
/// `encodeData` table: static atoms encode directly, `bytes`/`string`
/// hash to `keccak256(value)`, arrays hash the concatenation of their
/// encoded elements, and nested structs contribute their own
/// `hash_struct()`.
pub trait Eip712Type {
    fn type_string() -> String;

    fn encode_fields(&self) -> Vec<[u8; 32]>;

    fn type_hash() -> [u8; 32] {
        w3_hashes::keccak256(Self::type_string().as_bytes())
    }

    fn hash_struct(&self) -> Result<[u8; 32]> {
        words::hash_words(Self::type_hash(), &self.encode_fields())
    }
}

/// `keccak256(0x19 ‖ 0x01 ‖ domainSeparator ‖ hashStruct(message))`: the
/// 32-byte digest an account signs.
pub fn hash_typed_data<T: Eip712Type>(domain: &Eip712Domain, message: &T) -> Result<[u8; 32]> {
    let domain_sep = domain.domain_separator()?;
    let struct_hash = message.hash_struct()?;

    let mut buf = [0u8; 66];
    buf[0] = 0x19;
    buf[1] = 0x01;
    buf[2..34].copy_from_slice(&domain_sep);
    buf[34..66].copy_from_slice(&struct_hash);
    Ok(w3_hashes::keccak256(&buf))
}

pub fn sign_typed_data<T: Eip712Type>(
    signer: &impl Signer,
    domain: &Eip712Domain,
    message: &T,
) -> Result<Signature> {
    let hash = hash_typed_data(domain, message)?;
    Ok(signer.sign_hash(&hash)?)
}

pub fn recover_typed_data_signer<T: Eip712Type>(
    domain: &Eip712Domain,
    message: &T,
    signature: &Signature,
) -> Result<Address> {
    let hash = hash_typed_data(domain, message)?;
    let pubkey = secp256k1::recover(signature, &hash)?;
    Ok(Address::from_bytes(pubkey.to_ethereum_address()))
}
