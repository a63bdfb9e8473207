//! EIP-7702 authorization tuples: a delegation from an EOA to a piece
//! of contract code, signed independently of the transaction that
//! carries it.

use w3_curves::secp256k1::{self, Signature};
use w3_hashes::keccak256;
use w3_numeric::Address;

use crate::error::{Result, TxError};
use crate::rlp::{self, RlpItem};
use crate::signer::Signer;

const MAGIC: u8 = 0x05;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Authorization {
    pub chain_id: u64,
    pub address: Address,
    pub nonce: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignedAuthorization {
    pub authorization: Authorization,
    pub y_parity: u8,
    pub r: [u8; 32],
    pub s: [u8; 32],
}

impl Authorization {
    fn fields(&self) -> Vec<Vec<u8>> {
        vec![
            rlp::encode_u64(self.chain_id),
            rlp::encode_bytes(self.address.as_bytes()),
            rlp::encode_u64(self.nonce),
        ]
    }

    /// `keccak256(MAGIC ‖ rlp([chainId, address, nonce]))`.
    pub fn sign_hash(&self) -> [u8; 32] {
        let mut buf = vec![MAGIC];
        buf.extend_from_slice(&rlp::encode_fields(&self.fields()));
        keccak256(&buf)
    }

    pub fn sign(&self, signer: &impl Signer) -> Result<SignedAuthorization> {
        let sig = signer.sign_hash(&self.sign_hash())?;
        Ok(SignedAuthorization { authorization: self.clone(), y_parity: sig.recovery_id, r: sig.r, s: sig.s })
    }
}

impl SignedAuthorization {
    pub(crate) fn encode(&self) -> Vec<u8> {
        let mut fields = self.authorization.fields();
        fields.push(rlp::encode_u64(self.y_parity as u64));
        fields.push(rlp::encode_bytes(&rlp::strip_leading_zeros(&self.r)));
        fields.push(rlp::encode_bytes(&rlp::strip_leading_zeros(&self.s)));
        rlp::encode_fields(&fields)
    }

    pub(crate) fn decode(item: &RlpItem<'_>) -> Result<Self> {
        let fields = item.as_list().ok_or(TxError::MissingField("authorization tuple"))?;
        if fields.len() != 6 {
            return Err(TxError::InvalidFieldCount(fields.len()));
        }
        let chain_id = fields[0].as_u64().ok_or(TxError::MissingField("chainId"))?;
        let address = Address::from_bytes(fields[1].as_address().ok_or(TxError::MissingField("address"))?);
        let nonce = fields[2].as_u64().ok_or(TxError::MissingField("nonce"))?;
        let y_parity = fields[3].as_u64().ok_or(TxError::MissingField("yParity"))? as u8;
        let r = rlp::decode_bytes32_padded(&fields[4]).ok_or(TxError::MissingField("r"))?;
        let s = rlp::decode_bytes32_padded(&fields[5]).ok_or(TxError::MissingField("s"))?;
        Ok(SignedAuthorization { authorization: Authorization { chain_id, address, nonce }, y_parity, r, s })
    }

    /// Recovers the address that authorized this delegation.
    pub fn recover_authority(&self) -> Result<Address> {
        let sig = Signature { r: self.r, s: self.s, recovery_id: self.y_parity };
        let pubkey = secp256k1::recover(&sig, &self.authorization.sign_hash())?;
        Ok(Address::from_bytes(pubkey.to_ethereum_address()))
    }
}

pub(crate) fn encode_list(list: &[SignedAuthorization]) -> Vec<u8> {
    let entries: Vec<u8> = list.iter().flat_map(|a| a.encode()).collect();
    rlp::encode_list(&entries)
}

pub(crate) fn decode_list(item: &RlpItem<'_>) -> Result<Vec<SignedAuthorization>> {
    let entries = item.as_list().ok_or(TxError::MissingField("authorizationList"))?;
    entries.iter().map(SignedAuthorization::decode).collect()
}
