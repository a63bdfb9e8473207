//! Derivation path parsing, e.g. `m/44'/60'/0'/0/0`.

use crate::error::{HdWalletError, Result};

const HARDENED_OFFSET: u32 = 0x8000_0000;

/// A parsed BIP-32 derivation path: a sequence of child indices, each
/// already encoded with the hardened-derivation high bit set where the
/// path used `'` or `h`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationPath(Vec<u32>);

impl DerivationPath {
    pub fn indices(&self) -> &[u32] {
        &self.0
    }

    /// Builds a path directly from already-encoded indices (hardened
    /// steps carry the high bit set), bypassing string parsing.
    pub fn from_indices(indices: Vec<u32>) -> Self {
        DerivationPath(indices)
    }

    pub fn parse(path: &str) -> Result<Self> {
        let mut segments = path.split('/');
        match segments.next() {
            Some("m") | Some("M") => {}
            _ => return Err(HdWalletError::InvalidPath(path.to_string())),
        }

        let mut indices = Vec::new();
        for segment in segments {
            if segment.is_empty() {
                return Err(HdWalletError::InvalidPath(path.to_string()));
            }
            let (digits, hardened) = match segment.strip_suffix(['\'', 'h', 'H']) {
                Some(stripped) => (stripped, true),
                None => (segment, false),
            };
            let index: u32 = digits
                .parse()
                .map_err(|_| HdWalletError::InvalidPath(path.to_string()))?;
            if index >= HARDENED_OFFSET {
                return Err(HdWalletError::InvalidPath(path.to_string()));
            }
            indices.push(if hardened { index + HARDENED_OFFSET } else { index });
        }
        Ok(DerivationPath(indices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ethereum_default_path() {
        let path = DerivationPath::parse("m/44'/60'/0'/0/0").unwrap();
        assert_eq!(
            path.indices(),
            &[
                44 + HARDENED_OFFSET,
                60 + HARDENED_OFFSET,
                0 + HARDENED_OFFSET,
                0,
                0,
            ]
        );
    }

    #[test]
    fn rejects_missing_root() {
        assert!(DerivationPath::parse("44'/60'/0'/0/0").is_err());
    }

    #[test]
    fn rejects_double_slash() {
        assert!(DerivationPath::parse("m/44'//0").is_err());
    }

    #[test]
    fn parses_bare_root() {
        let path = DerivationPath::parse("m").unwrap();
        assert!(path.indices().is_empty());
    }
}
