//! Typed structured-data hashing (EIP-712) and ERC-4337 `UserOperation`
//! hashing for the web3-rs-core cryptographic SDK.
//!
//! Every word-level encoding in this crate — domain separator fields,
//! struct fields, and UserOperation pack fields alike — routes through
//! [`w3_abi::encode::encode_elements`], the same head/tail frame encoder
//! the ABI layer uses for calldata. There is exactly one encoder and one
//! Keccak implementation behind all three schemes.

pub mod domain;
pub mod erc4337;
pub mod error;
pub mod typed_data;
pub mod words;

pub use domain::{Eip712Domain, Eip712DomainBuilder};
pub use erc4337::{
    hash_user_operation_v06, hash_user_operation_v07, hash_user_operation_v08, pack_gas_fees,
    pack_gas_limits, pack_paymaster_and_data, unpack_high_low, PackedUserOperation,
    UserOperationV06, UserOperationV08,
};
pub use error::{Eip712Error, Result};
pub use typed_data::{hash_typed_data, recover_typed_data_signer, sign_typed_data, Eip712Type};
