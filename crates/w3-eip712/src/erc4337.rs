//! ERC-4337 `UserOperation` hashing across EntryPoint versions v0.6,
//! v0.7 (packed), and v0.8/v0.9 (packed, hashed via EIP-712). All three
//! share the same ABI encoder and Keccak implementation rather than
//! reimplementing padding ad hoc in each version's hash function.

use w3_abi::{AbiType, AbiValue};
use w3_hashes::keccak256;
use w3_numeric::{Address, U256};

use crate::domain::Eip712Domain;
use crate::error::Result;
use crate::typed_data::{hash_typed_data, Eip712Type};
use crate::words;

/// EntryPoint v0.6's 11-field `UserOperation` (`signature` excluded
/// from hashing, as with every version).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserOperationV06 {
    pub sender: Address,
    pub nonce: U256,
    pub init_code: Vec<u8>,
    pub call_data: Vec<u8>,
    pub call_gas_limit: U256,
    pub verification_gas_limit: U256,
    pub pre_verification_gas: U256,
    pub max_fee_per_gas: U256,
    pub max_priority_fee_per_gas: U256,
    pub paymaster_and_data: Vec<u8>,
    pub signature: Vec<u8>,
}

/// EntryPoint v0.7/v0.8/v0.9's packed `UserOperation`: `accountGasLimits`
/// and `gasFees` each fold two `uint128` values into one `bytes32` word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedUserOperation {
    pub sender: Address,
    pub nonce: U256,
    pub init_code: Vec<u8>,
    pub call_data: Vec<u8>,
    pub account_gas_limits: [u8; 32],
    pub pre_verification_gas: U256,
    pub gas_fees: [u8; 32],
    pub paymaster_and_data: Vec<u8>,
    pub signature: Vec<u8>,
}

/// Packs `verificationGasLimit` (high 128 bits) and `callGasLimit` (low
/// 128 bits) into a `bytes32` word.
pub fn pack_gas_limits(verification_gas_limit: u128, call_gas_limit: u128) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[0..16].copy_from_slice(&verification_gas_limit.to_be_bytes());
    out[16..32].copy_from_slice(&call_gas_limit.to_be_bytes());
    out
}

/// Packs `maxPriorityFeePerGas` (high 128 bits) and `maxFeePerGas` (low
/// 128 bits) into a `bytes32` word.
pub fn pack_gas_fees(max_priority_fee_per_gas: u128, max_fee_per_gas: u128) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[0..16].copy_from_slice(&max_priority_fee_per_gas.to_be_bytes());
    out[16..32].copy_from_slice(&max_fee_per_gas.to_be_bytes());
    out
}

pub fn unpack_high_low(packed: [u8; 32]) -> (u128, u128) {
    let high = u128::from_be_bytes(packed[0..16].try_into().unwrap());
    let low = u128::from_be_bytes(packed[16..32].try_into().unwrap());
    (high, low)
}

/// `paymaster(20) ‖ uint128(pmVerificationGasLimit) ‖
/// uint128(pmPostOpGasLimit) ‖ pmData`, or empty if there is no
/// paymaster.
pub fn pack_paymaster_and_data(
    paymaster: Address,
    pm_verification_gas_limit: u128,
    pm_post_op_gas_limit: u128,
    pm_data: &[u8],
) -> Vec<u8> {
    let mut out = Vec::with_capacity(20 + 16 + 16 + pm_data.len());
    out.extend_from_slice(paymaster.as_bytes());
    out.extend_from_slice(&pm_verification_gas_limit.to_be_bytes());
    out.extend_from_slice(&pm_post_op_gas_limit.to_be_bytes());
    out.extend_from_slice(pm_data);
    out
}

fn outer_hash(inner_hash: [u8; 32], entry_point: Address, chain_id: u64) -> Result<[u8; 32]> {
    let types = vec![AbiType::FixedBytes(32), AbiType::Address, AbiType::Uint(256)];
    let values = vec![
        AbiValue::FixedBytes(inner_hash.to_vec()),
        AbiValue::Address(entry_point),
        AbiValue::Uint(U256::from_u64(chain_id)),
    ];
    let encoded = w3_abi::encode::encode_elements(&types, &values)?;
    Ok(keccak256(&encoded))
}

/// `userOpHash = keccak(abi.encode(keccak(abi.encode(sender, nonce,
/// keccak(initCode), keccak(callData), callGasLimit,
/// verificationGasLimit, preVerificationGas, maxFeePerGas,
/// maxPriorityFeePerGas, keccak(paymasterAndData))), entryPoint,
/// chainId))`.
pub fn hash_user_operation_v06(
    op: &UserOperationV06,
    entry_point: Address,
    chain_id: u64,
) -> Result<[u8; 32]> {
    let types = vec![
        AbiType::Address,
        AbiType::Uint(256),
        AbiType::FixedBytes(32),
        AbiType::FixedBytes(32),
        AbiType::Uint(256),
        AbiType::Uint(256),
        AbiType::Uint(256),
        AbiType::Uint(256),
        AbiType::Uint(256),
        AbiType::FixedBytes(32),
    ];
    let values = vec![
        AbiValue::Address(op.sender),
        AbiValue::Uint(op.nonce),
        AbiValue::FixedBytes(keccak256(&op.init_code).to_vec()),
        AbiValue::FixedBytes(keccak256(&op.call_data).to_vec()),
        AbiValue::Uint(op.call_gas_limit),
        AbiValue::Uint(op.verification_gas_limit),
        AbiValue::Uint(op.pre_verification_gas),
        AbiValue::Uint(op.max_fee_per_gas),
        AbiValue::Uint(op.max_priority_fee_per_gas),
        AbiValue::FixedBytes(keccak256(&op.paymaster_and_data).to_vec()),
    ];
    let inner = keccak256(&w3_abi::encode::encode_elements(&types, &values)?);
    outer_hash(inner, entry_point, chain_id)
}

/// `userOpHash = keccak(abi.encode(keccak(abi.encode(sender, nonce,
/// keccak(initCode), keccak(callData), accountGasLimits,
/// preVerificationGas, gasFees, keccak(paymasterAndData))), entryPoint,
/// chainId))`.
pub fn hash_user_operation_v07(
    op: &PackedUserOperation,
    entry_point: Address,
    chain_id: u64,
) -> Result<[u8; 32]> {
    let types = vec![
        AbiType::Address,
        AbiType::Uint(256),
        AbiType::FixedBytes(32),
        AbiType::FixedBytes(32),
        AbiType::FixedBytes(32),
        AbiType::Uint(256),
        AbiType::FixedBytes(32),
        AbiType::FixedBytes(32),
    ];
    let values = vec![
        AbiValue::Address(op.sender),
        AbiValue::Uint(op.nonce),
        AbiValue::FixedBytes(keccak256(&op.init_code).to_vec()),
        AbiValue::FixedBytes(keccak256(&op.call_data).to_vec()),
        AbiValue::FixedBytes(op.account_gas_limits.to_vec()),
        AbiValue::Uint(op.pre_verification_gas),
        AbiValue::FixedBytes(op.gas_fees.to_vec()),
        AbiValue::FixedBytes(keccak256(&op.paymaster_and_data).to_vec()),
    ];
    let inner = keccak256(&w3_abi::encode::encode_elements(&types, &values)?);
    outer_hash(inner, entry_point, chain_id)
}

/// The v0.8/v0.9 EIP-712 primary type, borrowing a [`PackedUserOperation`]
/// so its dynamic fields (`initCode`, `callData`, `paymasterAndData`)
/// hash per EIP-712's `bytes` rule rather than the raw v0.7 concatenation.
pub struct UserOperationV08<'a>(pub &'a PackedUserOperation);

impl Eip712Type for UserOperationV08<'_> {
    fn type_string() -> String {
        "PackedUserOperation(address sender,uint256 nonce,bytes initCode,bytes callData,bytes32 accountGasLimits,uint256 preVerificationGas,bytes32 gasFees,bytes paymasterAndData)".to_string()
    }

    fn encode_fields(&self) -> Vec<[u8; 32]> {
        let op = self.0;
        vec![
            words::word_address(op.sender).expect("address always encodes"),
            words::word_uint256(op.nonce).expect("uint256 always encodes"),
            words::word_dynamic(&op.init_code),
            words::word_dynamic(&op.call_data),
            op.account_gas_limits,
            words::word_uint256(op.pre_verification_gas).expect("uint256 always encodes"),
            op.gas_fees,
            words::word_dynamic(&op.paymaster_and_data),
        ]
    }
}

/// Hashes via the EIP-712 domain `{name: "Account Abstraction
/// EntryPoint", version: "0.8"}`.
pub fn hash_user_operation_v08(
    op: &PackedUserOperation,
    entry_point: Address,
    chain_id: u64,
) -> Result<[u8; 32]> {
    let domain = Eip712Domain::new("Account Abstraction EntryPoint", "0.8", chain_id, entry_point);
    hash_typed_data(&domain, &UserOperationV08(op))
}
