//! EIP-2930 access lists, reused by every post-Berlin envelope.

use w3_numeric::Address;

use crate::error::{Result, TxError};
use crate::rlp::{self, RlpItem};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccessListEntry {
    pub address: Address,
    pub storage_keys: Vec<[u8; 32]>,
}

pub type AccessList = Vec<AccessListEntry>;

pub(crate) fn encode(list: &AccessList) -> Vec<u8> {
    let entries: Vec<u8> = list
        .iter()
        .map(|entry| {
            let keys: Vec<u8> = entry
                .storage_keys
                .iter()
                .map(|k| rlp::encode_bytes(k))
                .collect::<Vec<_>>()
                .concat();
            rlp::encode_fields(&[rlp::encode_bytes(entry.address.as_bytes()), rlp::encode_list(&keys)])
        })
        .collect::<Vec<_>>()
        .concat();
    rlp::encode_list(&entries)
}

pub(crate) fn decode(item: &RlpItem<'_>) -> Result<AccessList> {
    let entries = item.as_list().ok_or(TxError::MissingField("accessList"))?;
    let mut list = Vec::with_capacity(entries.len());
    for entry in entries {
        let fields = entry.as_list().ok_or(TxError::MissingField("accessList entry"))?;
        if fields.len() != 2 {
            return Err(TxError::InvalidFieldCount(fields.len()));
        }
        let address = Address::from_bytes(fields[0].as_address().ok_or(TxError::MissingField("accessList address"))?);
        let keys_items = fields[1].as_list().ok_or(TxError::MissingField("storageKeys"))?;
        let mut storage_keys = Vec::with_capacity(keys_items.len());
        for key in keys_items {
            storage_keys.push(key.as_bytes32().ok_or(TxError::MissingField("storageKey"))?);
        }
        list.push(AccessListEntry { address, storage_keys });
    }
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_roundtrip() {
        let list = vec![AccessListEntry {
            address: Address::from_bytes([0x11; 20]),
            storage_keys: vec![[0x22; 32], [0x33; 32]],
        }];
        let encoded = encode(&list);
        let (item, rest) = rlp::decode(&encoded).unwrap();
        assert!(rest.is_empty());
        assert_eq!(decode(&item).unwrap(), list);
    }

    #[test]
    fn empty_list_roundtrips() {
        let list: AccessList = Vec::new();
        let encoded = encode(&list);
        assert_eq!(encoded, vec![0xc0]);
    }
}
