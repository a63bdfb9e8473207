//! Hierarchical deterministic key derivation: BIP-32 over secp256k1
//! and SLIP-0010 over Ed25519.

pub mod bip32;
pub mod error;
pub mod path;
pub mod slip10;

pub use error::{HdWalletError, Result};
pub use path::DerivationPath;
