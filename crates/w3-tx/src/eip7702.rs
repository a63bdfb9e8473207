//! EIP-7702 set-code transactions (type `0x04`): an EIP-1559 envelope
//! carrying a list of signed delegations (see [`crate::authorization`]).

use w3_curves::secp256k1::{self, Signature};
use w3_hashes::keccak256;
use w3_numeric::{Address, U256};

use crate::access_list::{self, AccessList};
use crate::authorization::{self, SignedAuthorization};
use crate::error::{Result, TxError};
use crate::rlp;
use crate::signer::Signer;

pub const TYPE_BYTE: u8 = 0x04;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Eip7702Transaction {
    pub chain_id: u64,
    pub nonce: u64,
    pub max_priority_fee_per_gas: U256,
    pub max_fee_per_gas: U256,
    pub gas_limit: u64,
    pub to: Address,
    pub value: U256,
    pub data: Vec<u8>,
    pub access_list: AccessList,
    pub authorization_list: Vec<SignedAuthorization>,
}

impl Eip7702Transaction {
    fn fields(&self) -> Vec<Vec<u8>> {
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
            authorization::encode_list(&self.authorization_list),
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
        if fields.len() != 13 {
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
        let authorization_list = authorization::decode_list(&fields[9])?;
        let y_parity = fields[10].as_u64().ok_or(TxError::MissingField("yParity"))?;
        let r = rlp::decode_bytes32_padded(&fields[11]).ok_or(TxError::MissingField("r"))?;
        let s = rlp::decode_bytes32_padded(&fields[12]).ok_or(TxError::MissingField("s"))?;

        let tx = Eip7702Transaction {
            chain_id,
            nonce,
            max_priority_fee_per_gas,
            max_fee_per_gas,
            gas_limit,
            to,
            value,
            data: data_field,
            access_list,
            authorization_list,
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
    use crate::authorization::Authorization;
    use crate::signer::LocalSigner;
    use w3_curves::secp256k1::PrivateKey;

    #[test]
    fn sign_recover_roundtrip_with_authorization_list() {
        let mut sender_bytes = [0u8; 32];
        sender_bytes[31] = 0x21;
        let sender = LocalSigner::new(PrivateKey::from_bytes(&sender_bytes).unwrap());

        let mut authority_bytes = [0u8; 32];
        authority_bytes[31] = 0x22;
        let authority = LocalSigner::new(PrivateKey::from_bytes(&authority_bytes).unwrap());
        let auth = Authorization { chain_id: 1, address: Address::from_bytes([0x88; 20]), nonce: 0 };
        let signed_auth = auth.sign(&authority).unwrap();

        let tx = Eip7702Transaction {
            chain_id: 1,
            nonce: 0,
            max_priority_fee_per_gas: U256::from_u64(1),
            max_fee_per_gas: U256::from_u64(100),
            gas_limit: 100_000,
            to: Address::from_bytes([0x99; 20]),
            value: U256::ZERO,
            data: Vec::new(),
            access_list: Vec::new(),
            authorization_list: vec![signed_auth.clone()],
        };
        let signed = tx.sign(&sender).unwrap();
        assert_eq!(signed[0], TYPE_BYTE);
        let (decoded, recovered) = Eip7702Transaction::decode_signed(&signed).unwrap();
        assert_eq!(decoded, tx);
        assert_eq!(recovered, sender.address());
        assert_eq!(decoded.authorization_list[0].recover_authority().unwrap(), authority.address());
    }
}
