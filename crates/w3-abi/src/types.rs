//! The ABI type algebra: Solidity ABI v2 types and their canonical
//! signature rendering.

use crate::error::{AbiError, Result};

/// A Solidity ABI v2 type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbiType {
    Uint(usize),
    Int(usize),
    Address,
    Bool,
    FixedBytes(usize),
    Bytes,
    String,
    FixedArray(Box<AbiType>, usize),
    Array(Box<AbiType>),
    Tuple(Vec<AbiType>),
}

impl AbiType {
    pub fn uint(bits: usize) -> Result<Self> {
        validate_int_width(bits)?;
        Ok(AbiType::Uint(bits))
    }

    pub fn int(bits: usize) -> Result<Self> {
        validate_int_width(bits)?;
        Ok(AbiType::Int(bits))
    }

    pub fn fixed_bytes(len: usize) -> Result<Self> {
        if len == 0 || len > 32 {
            return Err(AbiError::InvalidBytesWidth(len));
        }
        Ok(AbiType::FixedBytes(len))
    }

    /// True iff this type's encoding is head/tail-indirected: `string`,
    /// `bytes`, a dynamic array, or any composite containing one.
    pub fn is_dynamic(&self) -> bool {
        match self {
            AbiType::Uint(_) | AbiType::Int(_) | AbiType::Address | AbiType::Bool | AbiType::FixedBytes(_) => false,
            AbiType::Bytes | AbiType::String | AbiType::Array(_) => true,
            AbiType::FixedArray(inner, _) => inner.is_dynamic(),
            AbiType::Tuple(elems) => elems.iter().any(AbiType::is_dynamic),
        }
    }

    /// Number of bytes this type occupies in its enclosing frame's head
    /// region: 32 for every static atom and for dynamic types (an
    /// offset slot), or the flattened sum for static composites.
    pub fn head_size(&self) -> usize {
        if self.is_dynamic() {
            return 32;
        }
        match self {
            AbiType::FixedArray(inner, len) => inner.head_size() * len,
            AbiType::Tuple(elems) => elems.iter().map(AbiType::head_size).sum(),
            _ => 32,
        }
    }

    /// The canonical type signature fragment used in function/event
    /// signatures, e.g. `uint256`, `bytes32`, `(address,uint256)[]`.
    pub fn canonical(&self) -> String {
        match self {
            AbiType::Uint(n) => format!("uint{n}"),
            AbiType::Int(n) => format!("int{n}"),
            AbiType::Address => "address".to_string(),
            AbiType::Bool => "bool".to_string(),
            AbiType::FixedBytes(n) => format!("bytes{n}"),
            AbiType::Bytes => "bytes".to_string(),
            AbiType::String => "string".to_string(),
            AbiType::FixedArray(inner, len) => format!("{}[{}]", inner.canonical(), len),
            AbiType::Array(inner) => format!("{}[]", inner.canonical()),
            AbiType::Tuple(elems) => {
                let parts: Vec<String> = elems.iter().map(AbiType::canonical).collect();
                format!("({})", parts.join(","))
            }
        }
    }
}

fn validate_int_width(bits: usize) -> Result<()> {
    if bits == 0 || bits > 256 || bits % 8 != 0 {
        return Err(AbiError::InvalidIntWidth(bits));
    }
    Ok(())
}

/// Builds a canonical function/event signature, e.g.
/// `transfer(address,uint256)`.
pub fn canonical_signature(name: &str, params: &[AbiType]) -> String {
    let parts: Vec<String> = params.iter().map(AbiType::canonical).collect();
    format!("{name}({})", parts.join(","))
}
