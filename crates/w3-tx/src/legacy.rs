//! Legacy (pre-EIP-2718) transactions, with EIP-155 replay protection.

use w3_curves::secp256k1::{self, Signature};
use w3_hashes::keccak256;
use w3_numeric::{Address, U256};

use crate::error::{Result, TxError};
use crate::rlp::{self, RlpItem};
use crate::signer::Signer;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegacyTransaction {
    pub nonce: u64,
    pub gas_price: U256,
    pub gas_limit: u64,
    pub to: Option<Address>,
    pub value: U256,
    pub data: Vec<u8>,
    /// `Some(id)` applies EIP-155 replay protection; `None` signs the
    /// pre-EIP-155 transaction (accepted by very old chains only).
    pub chain_id: Option<u64>,
}

impl LegacyTransaction {
    fn core_fields(&self) -> Vec<Vec<u8>> {
        vec![
            rlp::encode_u64(self.nonce),
            rlp::encode_uint(self.gas_price),
            rlp::encode_u64(self.gas_limit),
            rlp::encode_bytes(self.to.as_ref().map(|a| a.as_bytes().as_slice()).unwrap_or(&[])),
            rlp::encode_uint(self.value),
            rlp::encode_bytes(&self.data),
        ]
    }

    /// The RLP-encoded unsigned transaction: 6 fields, or 9 with the
    /// EIP-155 `[chainId, 0, 0]` trailer.
    pub fn encode_unsigned(&self) -> Vec<u8> {
        let mut fields = self.core_fields();
        if let Some(chain_id) = self.chain_id {
            fields.push(rlp::encode_u64(chain_id));
            fields.push(rlp::encode_u64(0));
            fields.push(rlp::encode_u64(0));
        }
        rlp::encode_fields(&fields)
    }

    pub fn sign_hash(&self) -> [u8; 32] {
        keccak256(&self.encode_unsigned())
    }

    /// Signs with `signer` and returns the fully RLP-encoded signed
    /// transaction, ready for broadcast.
    pub fn sign(&self, signer: &impl Signer) -> Result<Vec<u8>> {
        let sig = signer.sign_hash(&self.sign_hash())?;
        Ok(self.encode_signed(&sig))
    }

    /// Encodes the signed transaction given a signature already produced
    /// over [`Self::sign_hash`].
    pub fn encode_signed(&self, sig: &Signature) -> Vec<u8> {
        let v = match self.chain_id {
            Some(chain_id) => sig.eip155_v(chain_id),
            None => 27 + sig.recovery_id as u64,
        };
        let mut fields = self.core_fields();
        fields.push(rlp::encode_u64(v));
        fields.push(rlp::encode_bytes(&rlp::strip_leading_zeros(&sig.r)));
        fields.push(rlp::encode_bytes(&rlp::strip_leading_zeros(&sig.s)));
        rlp::encode_fields(&fields)
    }

    /// Parses a signed legacy transaction and recovers its signer.
    pub fn decode_signed(data: &[u8]) -> Result<(Self, Address)> {
        let item = rlp::decode_exact(data)?;
        let fields = item.as_list().ok_or(TxError::InvalidFieldCount(0))?;
        if fields.len() != 9 {
            return Err(TxError::InvalidFieldCount(fields.len()));
        }
        let tx = parse_core(fields)?;
        let v = fields[6].as_u64().ok_or(TxError::MissingField("v"))?;
        let r = rlp::decode_bytes32_padded(&fields[7]).ok_or(TxError::MissingField("r"))?;
        let s = rlp::decode_bytes32_padded(&fields[8]).ok_or(TxError::MissingField("s"))?;

        let (chain_id, recovery_id) = if v >= 35 {
            (Some((v - 35) / 2), ((v - 35) % 2) as u8)
        } else if v == 27 || v == 28 {
            (None, (v - 27) as u8)
        } else {
            return Err(TxError::InvalidV(v));
        };

        let signed = LegacyTransaction { chain_id, ..tx };
        let sig = Signature { r, s, recovery_id };
        let pubkey = secp256k1::recover(&sig, &signed.sign_hash())?;
        let signer = Address::from_bytes(pubkey.to_ethereum_address());
        Ok((signed, signer))
    }
}

fn parse_core(fields: &[RlpItem<'_>]) -> Result<LegacyTransaction> {
    let nonce = fields[0].as_u64().ok_or(TxError::MissingField("nonce"))?;
    let gas_price = fields[1].as_u256().ok_or(TxError::MissingField("gasPrice"))?;
    let gas_limit = fields[2].as_u64().ok_or(TxError::MissingField("gasLimit"))?;
    let to_bytes = fields[3].as_string().ok_or(TxError::MissingField("to"))?;
    let to = if to_bytes.is_empty() { None } else { Some(Address::from_bytes(fields[3].as_address().ok_or(TxError::MissingField("to"))?)) };
    let value = fields[4].as_u256().ok_or(TxError::MissingField("value"))?;
    let data = fields[5].as_string().ok_or(TxError::MissingField("data"))?.to_vec();
    Ok(LegacyTransaction { nonce, gas_price, gas_limit, to, value, data, chain_id: None })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signer::LocalSigner;
    use w3_curves::secp256k1::PrivateKey;

    fn signer_from_byte(b: u8) -> LocalSigner {
        let mut bytes = [0u8; 32];
        bytes[31] = b;
        LocalSigner::new(PrivateKey::from_bytes(&bytes).unwrap())
    }

    // known-answer vector: priv = 0x46 repeated 32 times, recovered address 0x9d8a...a4
    #[test]
    fn signed_legacy_tx_recovers_known_address() {
        let key_bytes = [0x46u8; 32];
        let signer = LocalSigner::new(PrivateKey::from_bytes(&key_bytes).unwrap());

        let tx = LegacyTransaction {
            nonce: 9,
            gas_price: U256::from_u64(20_000_000_000),
            gas_limit: 21000,
            to: Some(Address::from_bytes([0x35; 20])),
            value: U256::from_u64(1_000_000_000_000_000_000u64),
            data: Vec::new(),
            chain_id: Some(1),
        };
        let signed_bytes = tx.sign(&signer).unwrap();
        let (_, recovered_signer) = LegacyTransaction::decode_signed(&signed_bytes).unwrap();
        assert_eq!(recovered_signer.to_checksum().to_lowercase(), "0x9d8a62f656a8d1615c1294fd71e9cfb3e4855a4f");
    }

    #[test]
    fn sign_recover_roundtrip_legacy() {
        let signer = signer_from_byte(0x99);
        let tx = LegacyTransaction {
            nonce: 0,
            gas_price: U256::from_u64(20_000_000_000),
            gas_limit: 21000,
            to: Some(Address::from_bytes([0xab; 20])),
            value: U256::from_u64(1_000_000_000_000_000_000u64),
            data: Vec::new(),
            chain_id: Some(1),
        };
        let signed_bytes = tx.sign(&signer).unwrap();
        let (decoded, recovered_signer) = LegacyTransaction::decode_signed(&signed_bytes).unwrap();
        assert_eq!(decoded.nonce, tx.nonce);
        assert_eq!(decoded.to, tx.to);
        assert_eq!(decoded.chain_id, tx.chain_id);
        assert_eq!(recovered_signer, signer.address());
    }

    #[test]
    fn different_chain_ids_change_signed_v() {
        let signer = signer_from_byte(0x5);
        let base = LegacyTransaction {
            nonce: 1,
            gas_price: U256::from_u64(1),
            gas_limit: 21000,
            to: None,
            value: U256::ZERO,
            data: vec![1, 2, 3],
            chain_id: Some(1),
        };
        let other = LegacyTransaction { chain_id: Some(137), ..base.clone() };
        assert_ne!(base.sign_hash(), other.sign_hash());
        let sig1 = signer.sign_hash(&base.sign_hash()).unwrap();
        let sig137 = signer.sign_hash(&other.sign_hash()).unwrap();
        assert_ne!(sig1.eip155_v(1), sig137.eip155_v(137));
    }

    #[test]
    fn contract_creation_has_empty_to_field() {
        let tx = LegacyTransaction {
            nonce: 0,
            gas_price: U256::from_u64(1),
            gas_limit: 100_000,
            to: None,
            value: U256::ZERO,
            data: vec![0x60, 0x80],
            chain_id: Some(1),
        };
        let encoded = tx.encode_unsigned();
        let item = rlp::decode_exact(&encoded).unwrap();
        let fields = item.as_list().unwrap();
        assert_eq!(fields[3].as_string(), Some(&[][..]));
    }
}
