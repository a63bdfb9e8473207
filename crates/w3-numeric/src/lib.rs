//! Byte, hex, address, unit, and RLP primitives: the leaf layer of
//! the web3-rs-core cryptographic SDK core.
//!
//! No upward dependencies; every other crate in the workspace builds on
//! this one.

pub mod address;
pub mod error;
pub mod hex;
pub mod rlp;
pub mod uint;
pub mod units;

pub use address::Address;
pub use error::{NumericError, Result};
pub use rlp::{RlpItem, RlpStream};
pub use uint::U256;
