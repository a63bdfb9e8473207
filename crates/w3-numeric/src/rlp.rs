//! Recursive Length Prefix (RLP) encoding, per the Ethereum Yellow Paper
//! Appendix B.

use crate::error::{NumericError, Result};

/// An RLP item: either a byte string or a list of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlpItem {
    String(Vec<u8>),
    List(Vec<RlpItem>),
}

impl RlpItem {
    pub fn string(bytes: impl Into<Vec<u8>>) -> Self {
        RlpItem::String(bytes.into())
    }

    pub fn list(items: Vec<RlpItem>) -> Self {
        RlpItem::List(items)
    }

    /// Encodes a non-negative integer as its minimal big-endian byte
    /// string (empty for zero), per RLP's canonical integer encoding.
    pub fn from_u64(v: u64) -> Self {
        if v == 0 {
            return RlpItem::String(Vec::new());
        }
        let be = v.to_be_bytes();
        let first_nonzero = be.iter().position(|&b| b != 0).unwrap();
        RlpItem::String(be[first_nonzero..].to_vec())
    }

    pub fn as_string(&self) -> Result<&[u8]> {
        match self {
            RlpItem::String(s) => Ok(s),
            RlpItem::List(_) => Err(NumericError::RlpNotAString),
        }
    }

    pub fn as_list(&self) -> Result<&[RlpItem]> {
        match self {
            RlpItem::List(l) => Ok(l),
            RlpItem::String(_) => Err(NumericError::RlpNotAList),
        }
    }
}

/// An ergonomic builder for RLP lists, mirroring the `rlp` crate's
/// `RlpStream` idiom used throughout the transaction-encoding layer.
#[derive(Debug, Default)]
pub struct RlpStream {
    items: Vec<RlpItem>,
}

impl RlpStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.items.push(RlpItem::string(bytes.to_vec()));
        self
    }

    pub fn append_u64(&mut self, v: u64) -> &mut Self {
        self.items.push(RlpItem::from_u64(v));
        self
    }

    pub fn append_list(&mut self, list: RlpItem) -> &mut Self {
        self.items.push(list);
        self
    }

    pub fn append_empty_list(&mut self) -> &mut Self {
        self.items.push(RlpItem::list(vec![]));
        self
    }

    /// Finalizes the stream as an RLP list and encodes it.
    pub fn out(self) -> Vec<u8> {
        encode(&RlpItem::list(self.items))
    }
}

/// Encodes an [`RlpItem`] tree to bytes.
pub fn encode(item: &RlpItem) -> Vec<u8> {
    match item {
        RlpItem::String(s) => encode_string(s),
        RlpItem::List(items) => {
            let mut payload = Vec::new();
            for it in items {
                payload.extend(encode(it));
            }
            encode_with_offsets(&payload, 0xc0, 0xf7)
        }
    }
}

fn encode_string(s: &[u8]) -> Vec<u8> {
    if s.len() == 1 && s[0] < 0x80 {
        return s.to_vec();
    }
    encode_with_offsets(s, 0x80, 0xb7)
}

fn encode_with_offsets(payload: &[u8], short_offset: u8, long_offset: u8) -> Vec<u8> {
    let len = payload.len();
    let mut out = Vec::with_capacity(len + 9);
    if len <= 55 {
        out.push(short_offset + len as u8);
    } else {
        let len_bytes = minimal_be_bytes(len as u64);
        out.push(long_offset + len_bytes.len() as u8);
        out.extend_from_slice(&len_bytes);
    }
    out.extend_from_slice(payload);
    out
}

fn minimal_be_bytes(v: u64) -> Vec<u8> {
    let be = v.to_be_bytes();
    let first_nonzero = be.iter().position(|&b| b != 0).unwrap_or(be.len() - 1);
    be[first_nonzero..].to_vec()
}

/// Decodes a byte slice into an [`RlpItem`] tree.
///
/// Rejects non-minimal length encodings (a length field with leading
/// zero bytes, or a single byte < 0x80 encoded as a length-1 string).
pub fn decode(data: &[u8]) -> Result<RlpItem> {
    let (item, rest) = decode_one(data)?;
    if !rest.is_empty() {
        return Err(NumericError::MalformedRlp("trailing bytes after top-level item"));
    }
    Ok(item)
}

fn decode_one(data: &[u8]) -> Result<(RlpItem, &[u8])> {
    let prefix = *data.first().ok_or(NumericError::MalformedRlp("empty input"))?;
    match prefix {
        0x00..=0x7f => Ok((RlpItem::String(vec![prefix]), &data[1..])),
        0x80..=0xb7 => {
            let len = (prefix - 0x80) as usize;
            let (payload, rest) = take(data, 1, len)?;
            if len == 1 && payload[0] < 0x80 {
                return Err(NumericError::MalformedRlp("non-minimal single-byte string encoding"));
            }
            Ok((RlpItem::String(payload.to_vec()), rest))
        }
        0xb8..=0xbf => {
            let len_of_len = (prefix - 0xb7) as usize;
            let len = decode_length(data, 1, len_of_len)?;
            let (payload, rest) = take(data, 1 + len_of_len, len)?;
            Ok((RlpItem::String(payload.to_vec()), rest))
        }
        0xc0..=0xf7 => {
            let len = (prefix - 0xc0) as usize;
            let (payload, rest) = take(data, 1, len)?;
            Ok((RlpItem::List(decode_list_payload(payload)?), rest))
        }
        0xf8..=0xff => {
            let len_of_len = (prefix - 0xf7) as usize;
            let len = decode_length(data, 1, len_of_len)?;
            let (payload, rest) = take(data, 1 + len_of_len, len)?;
            Ok((RlpItem::List(decode_list_payload(payload)?), rest))
        }
    }
}

fn decode_length(data: &[u8], offset: usize, len_of_len: usize) -> Result<usize> {
    let (len_bytes, _) = take(data, offset, len_of_len)?;
    if len_bytes[0] == 0 {
        return Err(NumericError::MalformedRlp("non-minimal length encoding"));
    }
    if len_of_len > 8 {
        return Err(NumericError::MalformedRlp("length field too large"));
    }
    let mut buf = [0u8; 8];
    buf[8 - len_of_len..].copy_from_slice(len_bytes);
    let len = u64::from_be_bytes(buf);
    if len <= 55 {
        return Err(NumericError::MalformedRlp("long-form length encodes a short-form length"));
    }
    usize::try_from(len).map_err(|_| NumericError::MalformedRlp("length does not fit in usize"))
}

fn take(data: &[u8], skip: usize, len: usize) -> Result<(&[u8], &[u8])> {
    let total = skip
        .checked_add(len)
        .ok_or(NumericError::MalformedRlp("length overflow"))?;
    if data.len() < total {
        return Err(NumericError::MalformedRlp("input too short for declared length"));
    }
    Ok((&data[skip..total], &data[total..]))
}

fn decode_list_payload(mut payload: &[u8]) -> Result<Vec<RlpItem>> {
    let mut items = Vec::new();
    while !payload.is_empty() {
        let (item, rest) = decode_one(payload)?;
        items.push(item);
        payload = rest;
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_encoding() {
        assert_eq!(encode(&RlpItem::string(vec![])), vec![0x80]);
    }

    #[test]
    fn single_byte_below_0x80_is_itself() {
        assert_eq!(encode(&RlpItem::string(vec![0x00])), vec![0x00]);
        assert_eq!(encode(&RlpItem::string(vec![0x7f])), vec![0x7f]);
    }

    #[test]
    fn single_byte_0x80_or_above_gets_length_prefix() {
        assert_eq!(encode(&RlpItem::string(vec![0x80])), vec![0x81, 0x80]);
    }

    #[test]
    fn short_string_encoding() {
        // "dog" from the Yellow Paper's canonical example
        assert_eq!(encode(&RlpItem::string(b"dog".to_vec())), vec![0x83, b'd', b'o', b'g']);
    }

    #[test]
    fn long_string_encoding() {
        let payload = vec![b'a'; 56];
        let encoded = encode(&RlpItem::string(payload.clone()));
        assert_eq!(encoded[0], 0xb8);
        assert_eq!(encoded[1], 56);
        assert_eq!(&encoded[2..], &payload[..]);
    }

    #[test]
    fn empty_list_encoding() {
        assert_eq!(encode(&RlpItem::list(vec![])), vec![0xc0]);
    }

    #[test]
    fn cat_dog_list_encoding() {
        let list = RlpItem::list(vec![RlpItem::string(b"cat".to_vec()), RlpItem::string(b"dog".to_vec())]);
        assert_eq!(
            encode(&list),
            vec![0xc8, 0x83, b'c', b'a', b't', 0x83, b'd', b'o', b'g']
        );
    }

    #[test]
    fn rejects_non_minimal_single_byte_string() {
        // 0x8100 should have been encoded as 0x00
        assert!(decode(&[0x81, 0x00]).is_err());
    }

    #[test]
    fn rejects_non_minimal_length() {
        // length-of-length byte is 0x00, non-minimal
        assert!(decode(&[0xb8, 0x00]).is_err());
    }

    #[test]
    fn from_u64_integer_encoding() {
        assert_eq!(RlpItem::from_u64(0), RlpItem::String(vec![]));
        assert_eq!(RlpItem::from_u64(15), RlpItem::String(vec![15]));
        assert_eq!(RlpItem::from_u64(1024), RlpItem::String(vec![0x04, 0x00]));
    }

    // decode(encode(L)) == L for well-formed nested lists
    #[test]
    fn roundtrip_nested() {
        let nested = RlpItem::list(vec![
            RlpItem::string(b"hello".to_vec()),
            RlpItem::list(vec![RlpItem::string(vec![]), RlpItem::string(vec![0xff; 60])]),
            RlpItem::from_u64(300),
        ]);
        let encoded = encode(&nested);
        assert_eq!(decode(&encoded).unwrap(), nested);
    }

    proptest::proptest! {
        #[test]
        fn roundtrip_property(strings: Vec<Vec<u8>>) {
            let item = RlpItem::list(strings.into_iter().map(RlpItem::String).collect());
            let encoded = encode(&item);
            proptest::prop_assert_eq!(decode(&encoded).unwrap(), item);
        }
    }
}
