//! Curve engines: secp256k1 ECDSA, Ed25519, Sr25519, and
//! BIP-340 Schnorr.

pub mod ed25519;
pub mod error;
pub mod schnorr;
pub mod secp256k1;
pub mod sr25519;

pub use error::{CurveError, Result};
