//! EIP-1559 fee-market transactions (type `0x02`).

use w3_curves::secp256k1::{self, Signature};
use w3_hashes::keccak256;
use w3_numeric::{Address, U256};

use crate::access_list::{self, AccessList};
use crate::error::{Result, TxError};
use crate::rlp;
use crate::signer::Signer;

pub const TYPE_BYTE: u8 = 0x02;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Eip1559Transaction {
    pub chain_id: u64,
    pub nonce: u64,
    pub max_priority_fee_per_gas: U256,
    pub max_fee_per_gas: U256,
    pub gas_limit: u64,
    pub to: Option<Address>,
    pub value: U256,
    pub data: Vec<u8>,
    pub access_list: AccessList,
}

impl Eip1559Transaction {
    fn fields(&self) -> Vec<Vec<u8>> {
        vec![
            rlp::encode_u64(self.chain_id),
            rlp::encode_u64(self.nonce),
            rlp::encode_uint(self.max_priority_fee_per_gas),
            rlp::encode_uint(self.max_fee_per_gas),
            rlp::encode_u64(self.gas_limit),
            rlp::encode_bytes(self.to.as_ref().map(|a| a.as_bytes().as_slice()).unwrap_or(&[])),
            rlp::encode_uint(self.value),
            rlp::encode_bytes(&self.data),
            access_list::encode(&self.access_list),
        ]
    }

    pub fn encode_unsigned(&self) -> Vec<u8> {
        let mut out = vec![TYPE_BYTE];
        out.extend_from_slice(&rlp::encode_fields(&self.fields()));
        out
    }

    pub fn sign_hash(&self) -> [u8; 32] {
        keccak256(&self.encode_unsigned())
    }

    pub fn sign(&self, signer: &impl Signer) -> Result<Vec<u8>> {
        let sig = signer.sign_hash(&self.sign_hash())?;
        Ok(self.encode_signed(&sig))
    }

    pub fn encode_signed(&self, sig: &Signature) -> Vec<u8> {
        let mut fields = self.fields();
        fields.push(rlp::encode_u64(sig.recovery_id as u64));
        fields.push(rlp::encode_bytes(&rlp::strip_leading_zeros(&sig.r)));
        fields.push(rlp::encode_bytes(&rlp::strip_leading_zeros(&sig.s)));
        let mut out = vec![TYPE_BYTE];
        out.extend_from_slice(&rlp::encode_fields(&fields));
        out
    }

    pub fn decode_signed(data: &[u8]) -> Result<(Self, Address)> {
        if data.first() != Some(&TYPE_BYTE) {
            return Err(TxError::UnknownType(*data.first().unwrap_or(&0)));
        }
        let item = rlp::decode_exact(&data[1..])?;
        let fields = item.as_list().ok_or(TxError::InvalidFieldCount(0))?;
        if fields.len() != 12 {
            return Err(TxError::InvalidFieldCount(fields.len()));
        }
        let chain_id = fields[0].as_u64().ok_or(TxError::MissingField("chainId"))?;
        let nonce = fields[1].as_u64().ok_or(TxError::MissingField("nonce"))?;
        let max_priority_fee_per_gas = fields[2].as_u256().ok_or(TxError::MissingField("maxPriorityFeePerGas"))?;
        let max_fee_per_gas = fields[3].as_u256().ok_or(TxError::MissingField("maxFeePerGas"))?;
        let gas_limit = fields[4].as_u64().ok_or(TxError::MissingField("gasLimit"))?;
        let to_bytes = fields[5].as_string().ok_or(TxError::MissingField("to"))?;
        let to = if to_bytes.is_empty() { None } else { Some(Address::from_bytes(fields[5].as_address().ok_or(TxError::MissingField("to"))?)) };
        let value = fields[6].as_u256().ok_or(TxError::MissingField("value"))?;
        let data_field = fields[7].as_string().ok_or(TxError::MissingField("data"))?.to_vec();
        let access_list = access_list::decode(&fields[8])?;
        let y_parity = fields[9].as_u64().ok_or(TxError::MissingField("yParity"))?;
        let r = rlp::decode_bytes32_padded(&fields[10]).ok_or(TxError::MissingField("r"))?;
        let s = rlp::decode_bytes32_padded(&fields[11]).ok_or(TxError::MissingField("s"))?;

        let tx = Eip1559Transaction {
            chain_id,
            nonce,
            max_priority_fee_per_gas,
            max_fee_per_gas,
            gas_limit,
            to,
            value,
            data: data_field,
            access_list,
        };
        let sig = Signature { r, s, recovery_id: y_parity as u8 };
        let pubkey = secp256k1::recover(&sig, &tx.sign_hash())?;
        let signer = Address::from_bytes(pubkey.to_ethereum_address());
        Ok((tx, signer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signer::LocalSigner;
    use w3_curves::secp256k1::PrivateKey;

    #[test]
    fn sign_recover_roundtrip() {
        let mut bytes = [0u8; 32];
        bytes[31] = 0x42;
        let signer = LocalSigner::new(PrivateKey::from_bytes(&bytes).unwrap());
        let tx = Eip1559Transaction {
            chain_id: 1,
            nonce: 7,
            max_priority_fee_per_gas: U256::from_u64(1_500_000_000),
            max_fee_per_gas: U256::from_u64(50_000_000_000),
            gas_limit: 21000,
            to: Some(Address::from_bytes([0x44; 20])),
            value: U256::from_u64(1),
            data: Vec::new(),
            access_list: Vec::new(),
        };
        let signed = tx.sign(&signer).unwrap();
        assert_eq!(signed[0], TYPE_BYTE);
        let (decoded, recovered) = Eip1559Transaction::decode_signed(&signed).unwrap();
        assert_eq!(decoded, tx);
        assert_eq!(recovered, signer.address());
    }

    // distinct envelopes over the same logical fields produce distinct
    // signing hashes (the type byte is part of the preimage).
    #[test]
    fn type_byte_is_part_of_the_signing_preimage() {
        let tx = Eip1559Transaction {
            chain_id: 1,
            nonce: 0,
            max_priority_fee_per_gas: U256::ZERO,
            max_fee_per_gas: U256::ZERO,
            gas_limit: 21000,
            to: None,
            value: U256::ZERO,
            data: Vec::new(),
            access_list: Vec::new(),
        };
        let unsigned = tx.encode_unsigned();
        assert_eq!(unsigned[0], 0x02);
    }
}
