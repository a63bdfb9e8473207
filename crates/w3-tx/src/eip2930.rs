//! EIP-2930 access-list transactions (type `0x01`).

use w3_curves::secp256k1::{self, Signature};
use w3_hashes::keccak256;
use w3_numeric::{Address, U256};

use crate::access_list::{self, AccessList};
use crate::error::{Result, TxError};
use crate::rlp;
use crate::signer::Signer;

pub const TYPE_BYTE: u8 = 0x01;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Eip2930Transaction {
    pub chain_id: u64,
    pub nonce: u64,
    pub gas_price: U256,
    pub gas_limit: u64,
    pub to: Option<Address>,
    pub value: U256,
    pub data: Vec<u8>,
    pub access_list: AccessList,
}

impl Eip2930Transaction {
    fn fields(&self) -> Vec<Vec<u8>> {
        vec![
            rlp::encode_u64(self.chain_id),
            rlp::encode_u64(self.nonce),
            rlp::encode_uint(self.gas_price),
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
        if fields.len() != 11 {
            return Err(TxError::InvalidFieldCount(fields.len()));
        }
        let chain_id = fields[0].as_u64().ok_or(TxError::MissingField("chainId"))?;
        let nonce = fields[1].as_u64().ok_or(TxError::MissingField("nonce"))?;
        let gas_price = fields[2].as_u256().ok_or(TxError::MissingField("gasPrice"))?;
        let gas_limit = fields[3].as_u64().ok_or(TxError::MissingField("gasLimit"))?;
        let to_bytes = fields[4].as_string().ok_or(TxError::MissingField("to"))?;
        let to = if to_bytes.is_empty() { None } else { Some(Address::from_bytes(fields[4].as_address().ok_or(TxError::MissingField("to"))?)) };
        let value = fields[5].as_u256().ok_or(TxError::MissingField("value"))?;
        let data_field = fields[6].as_string().ok_or(TxError::MissingField("data"))?.to_vec();
        let access_list = access_list::decode(&fields[7])?;
        let y_parity = fields[8].as_u64().ok_or(TxError::MissingField("yParity"))?;
        let r = rlp::decode_bytes32_padded(&fields[9]).ok_or(TxError::MissingField("r"))?;
        let s = rlp::decode_bytes32_padded(&fields[10]).ok_or(TxError::MissingField("s"))?;

        let tx = Eip2930Transaction { chain_id, nonce, gas_price, gas_limit, to, value, data: data_field, access_list };
        let sig = Signature { r, s, recovery_id: y_parity as u8 };
        let pubkey = secp256k1::recover(&sig, &tx.sign_hash())?;
        let signer = Address::from_bytes(pubkey.to_ethereum_address());
        Ok((tx, signer))
    }
}
