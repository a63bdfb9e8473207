use thiserror::Error;

/// Errors from mnemonic parsing, generation, and checksum validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Bip39Error {
    #[error("entropy length must be one of 128/160/192/224/256 bits, got {0} bits")]
    InvalidEntropyLength(usize),
    #[error("mnemonic must have one of 12/15/18/21/24 words, got {0}")]
    InvalidWordCount(usize),
    #[error("word {0:?} at position {1} is not in the wordlist")]
    UnknownWord(String, usize),
    #[error("checksum mismatch: mnemonic does not correspond to valid entropy")]
    InvalidChecksum,
}

pub type Result<T> = core::result::Result<T, Bip39Error>;
