//! EIP-712 domain separator computation.

use w3_numeric::{Address, U256};

use crate::error::Result;
use crate::words;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eip712Domain {
    pub name: Option<String>,
    pub version: Option<String>,
    pub chain_id: Option<U256>,
    pub verifying_contract: Option<Address>,
    pub salt: Option<[u8; 32]>,
}

impl Eip712Domain {
    pub fn new(name: &str, version: &str, chain_id: u64, verifying_contract: Address) -> Self {
        Eip712Domain {
            name: Some(name.to_string()),
            version: Some(version.to_string()),
            chain_id: Some(U256::from_u64(chain_id)),
            verifying_contract: Some(verifying_contract),
            salt: None,
        }
    }

    /// Canonical `EIP712Domain(...)` type string, including only the
    /// fields this domain actually carries.
    pub fn type_string(&self) -> String {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("string name");
        }
        if self.version.is_some() {
            fields.push("string version");
        }
        if self.chain_id.is_some() {
            fields.push("uint256 chainId");
        }
        if self.verifying_contract.is_some() {
            fields.push("address verifyingContract");
        }
        if self.salt.is_some() {
            fields.push("bytes32 salt");
        }
        format!("EIP712Domain({})", fields.join(","))
    }

    pub fn type_hash(&self) -> [u8; 32] {
        w3_hashes::keccak256(self.type_string().as_bytes())
    }

    /// `keccak256(abi.encode(typeHash, nameHash, versionHash, chainId,
    /// verifyingContract, salt))`, restricted to the fields this domain
    /// carries.
    pub fn domain_separator(&self) -> Result<[u8; 32]> {
        let mut fields = Vec::new();
        if let Some(ref name) = self.name {
            fields.push(words::word_dynamic(name.as_bytes()));
        }
        if let Some(ref version) = self.version {
            fields.push(words::word_dynamic(version.as_bytes()));
        }
        if let Some(chain_id) = self.chain_id {
            fields.push(words::word_uint256(chain_id)?);
        }
        if let Some(addr) = self.verifying_contract {
            fields.push(words::word_address(addr)?);
        }
        if let Some(salt) = self.salt {
            fields.push(words::word_bytes32(salt)?);
        }
        words::hash_words(self.type_hash(), &fields)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Eip712DomainBuilder {
    name: Option<String>,
    version: Option<String>,
    chain_id: Option<U256>,
    verifying_contract: Option<Address>,
    salt: Option<[u8; 32]>,
}

impl Eip712DomainBuilder {
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(U256::from_u64(chain_id));
        self
    }

    pub fn verifying_contract(mut self, address: Address) -> Self {
        self.verifying_contract = Some(address);
        self
    }

    pub fn salt(mut self, salt: [u8; 32]) -> Self {
        self.salt = Some(salt);
        self
    }

    pub fn build(self) -> Eip712Domain {
        Eip712Domain {
            name: self.name,
            version: self.version,
            chain_id: self.chain_id,
            verifying_contract: self.verifying_contract,
            salt: self.salt,
        }
    }
}

impl Eip712Domain {
    pub fn builder() -> Eip712DomainBuilder {
        Eip712DomainBuilder::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> Address {
        Address::from_bytes([0x42; 20])
    }

    #[test]
    fn type_string_matches_full_domain() {
        let domain = Eip712Domain::new("MyApp", "1", 1, addr());
        assert_eq!(
            domain.type_string(),
            "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)"
        );
    }

    #[test]
    fn type_string_matches_minimal_domain() {
        let domain = Eip712Domain::builder().name("App").build();
        assert_eq!(domain.type_string(), "EIP712Domain(string name)");
    }

    // domain separator is fixed for a fixed domain, and changes when
    // any field changes.
    #[test]
    fn domain_separator_is_deterministic() {
        let d1 = Eip712Domain::new("App", "1", 1, addr());
        let d2 = Eip712Domain::new("App", "1", 1, addr());
        assert_eq!(d1.domain_separator().unwrap(), d2.domain_separator().unwrap());
    }

    #[test]
    fn domain_separator_changes_with_chain_id() {
        let d1 = Eip712Domain::new("App", "1", 1, addr());
        let d2 = Eip712Domain::new("App", "1", 2, addr());
        assert_ne!(d1.domain_separator().unwrap(), d2.domain_separator().unwrap());
    }

    #[test]
    fn domain_separator_changes_with_name() {
        let d1 = Eip712Domain::new("App", "1", 1, addr());
        let d2 = Eip712Domain::new("OtherApp", "1", 1, addr());
        assert_ne!(d1.domain_separator().unwrap(), d2.domain_separator().unwrap());
    }

    #[test]
    fn domain_separator_changes_with_salt() {
        let d1 = Eip712Domain::builder().name("App").salt([0u8; 32]).build();
        let d2 = Eip712Domain::builder().name("App").salt([1u8; 32]).build();
        assert_ne!(d1.domain_separator().unwrap(), d2.domain_separator().unwrap());
    }
}
