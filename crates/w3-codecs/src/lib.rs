//! Address and payload codecs: Base58Check and Bech32/Bech32m.

pub mod base58check;
pub mod bech32;
pub mod error;

pub use error::{CodecError, Result};
