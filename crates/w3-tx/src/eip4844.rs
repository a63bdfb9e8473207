//! EIP-4844 blob-carrying transactions (type `0x03`). The blob sidecar
//! itself is out of scope; only the header fields that enter consensus
//! (the versioned hashes and the blob gas fee cap) are modeled here.

use w3_curves::secp256k1::{self, Signature};
use w3_hashes::keccak256;
use w3_numeric::{Address, U256};

use crate::access_list::{self, AccessList};
use crate::error::{Result, TxError};
use crate::rlp;
use crate::signer::Signer;

pub const TYPE_BYTE: u8 = 0x03;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Eip4844Transaction {
    pub chain_id: u64,
    pub nonce: u64,
    pub max_priority_fee_per_gas: U256,
    pub max_fee_per_gas: U256,
    pub gas_limit: u64,
    /// Blob transactions cannot create a contract; this is the call target.
    pub to: Address,
    pub value: U256,
    pub data: Vec<u8>,
    pub access_list: AccessList,
    pub max_fee_per_blob_gas: U256,
    pub blob_versioned_hashes: Vec<[u8; 32]>,
}

impl Eip4844Transaction {
    fn fields(&self) -> Vec<Vec<u8>> {
        let hashes: Vec<u8> = self.blob_versioned_hashes.iter().flat_map(|h| rlp::encode_bytes(h)).collect();
        vec![
            rlp::encode_u64(self.chain_id),
            rlp::encode_u64(self.nonce),
            rlp::encode_uint(self.max_priority_fee_per_gas),
            rlp::encode_uint(self.max_fee_per_gas),
            rlp::encode_u64(self.gas_limit),
            rlp::encode_bytes(self.to.as_bytes()),
            rlp::encode_uint(self.value),
            rlp::encode_bytes(&self.data),
            access_list::encode(&self.access_list),
            rlp::encode_uint(self.max_fee_per_blob_gas),
            rlp::encode_list(&hashes),
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
        if fields.len() != 14 {
            return Err(TxError::InvalidFieldCount(fields.len()));
        }
        let chain_id = fields[0].as_u64().ok_or(TxError::MissingField("chainId"))?;
        let nonce = fields[1].as_u64().ok_or(TxError::MissingField("nonce"))?;
        let max_priority_fee_per_gas = fields[2].as_u256().ok_or(TxError::MissingField("maxPriorityFeePerGas"))?;
        let max_fee_per_gas = fields[3].as_u256().ok_or(TxError::MissingField("maxFeePerGas"))?;
        let gas_limit = fields[4].as_u64().ok_or(TxError::MissingField("gasLimit"))?;
        let to = Address::from_bytes(fields[5].as_address().ok_or(TxError::MissingField("to"))?);
        let value = fields[6].as_u256().ok_or(TxError::MissingField("value"))?;
        let data_field = fields[7].as_string().ok_or(TxError::MissingField("data"))?.to_vec();
        let access_list = access_list::decode(&fields[8])?;
        let max_fee_per_blob_gas = fields[9].as_u256().ok_or(TxError::MissingField("maxFeePerBlobGas"))?;
        let hash_items = fields[10].as_list().ok_or(TxError::MissingField("blobVersionedHashes"))?;
        let mut blob_versioned_hashes = Vec::with_capacity(hash_items.len());
        for h in hash_items {
            blob_versioned_hashes.push(h.as_bytes32().ok_or(TxError::MissingField("blobVersionedHash"))?);
        }
        let y_parity = fields[11].as_u64().ok_or(TxError::MissingField("yParity"))?;
        let r = rlp::decode_bytes32_padded(&fields[12]).ok_or(TxError::MissingField("r"))?;
        let s = rlp::decode_bytes32_padded(&fields[13]).ok_or(TxError::MissingField("s"))?;

        let tx = Eip4844Transaction {
            chain_id,
            nonce,
            max_priority_fee_per_gas,
            max_fee_per_gas,
            gas_limit,
            to,
            value,
            data: data_field,
            access_list,
            max_fee_per_blob_gas,
            blob_versioned_hashes,
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
    fn sign_recover_roundtrip_with_blob_hashes() {
        let mut bytes = [0u8; 32];
        bytes[31] = 0x13;
        let signer = LocalSigner::new(PrivateKey::from_bytes(&bytes).unwrap());
        let tx = Eip4844Transaction {
            chain_id: 1,
            nonce: 2,
            max_priority_fee_per_gas: U256::from_u64(1),
            max_fee_per_gas: U256::from_u64(100),
            gas_limit: 21000,
            to: Address::from_bytes([0x77; 20]),
            value: U256::ZERO,
            data: Vec::new(),
            access_list: Vec::new(),
            max_fee_per_blob_gas: U256::from_u64(1),
            blob_versioned_hashes: vec![[0x01; 32], [0x02; 32]],
        };
        let signed = tx.sign(&signer).unwrap();
        assert_eq!(signed[0], TYPE_BYTE);
        let (decoded, recovered) = Eip4844Transaction::decode_signed(&signed).unwrap();
        assert_eq!(decoded, tx);
        assert_eq!(recovered, signer.address());
    }
}
