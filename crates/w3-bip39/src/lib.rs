//! BIP-39 mnemonic sentences: entropy/mnemonic/seed conversion with
//! checksum validation.

pub mod error;
mod wordlist;

use rand::RngCore;
use zeroize::Zeroizing;

pub use error::{Bip39Error, Result};
pub use wordlist::WORDLIST;

const VALID_ENTROPY_BITS: [usize; 5] = [128, 160, 192, 224, 256];
const VALID_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// A validated BIP-39 mnemonic sentence.
///
/// The phrase is kept zeroizing since it is equivalent in sensitivity
/// to the entropy and seed it derives.
pub struct Mnemonic {
    phrase: Zeroizing<String>,
}

impl Mnemonic {
    /// Derives a mnemonic from raw entropy (16/20/24/28/32 bytes).
    pub fn from_entropy(entropy: &[u8]) -> Result<Self> {
        let ent_bits = entropy.len() * 8;
        if !VALID_ENTROPY_BITS.contains(&ent_bits) {
            return Err(Bip39Error::InvalidEntropyLength(ent_bits));
        }
        let cs_bits = ent_bits / 32;
        let checksum_byte = w3_hashes::sha256(entropy)[0];

        let mut bits = BitVec::with_capacity(ent_bits + cs_bits);
        bits.push_bytes(entropy);
        bits.push_bits(checksum_byte, cs_bits);

        let words: Vec<&'static str> = bits
            .chunks11()
            .map(|idx| WORDLIST[idx as usize])
            .collect();

        Ok(Mnemonic { phrase: Zeroizing::new(words.join(" ")) })
    }

    /// Parses and checksum-validates a mnemonic sentence.
    pub fn parse(phrase: &str) -> Result<Self> {
        let words: Vec<&str> = phrase.split_whitespace().collect();
        if !VALID_WORD_COUNTS.contains(&words.len()) {
            return Err(Bip39Error::InvalidWordCount(words.len()));
        }

        let mut bits = BitVec::with_capacity(words.len() * 11);
        for (i, word) in words.iter().enumerate() {
            let index = WORDLIST
                .iter()
                .position(|w| w == word)
                .ok_or_else(|| Bip39Error::UnknownWord((*word).to_string(), i))?;
            bits.push_bits11(index as u16);
        }

        let total_bits = words.len() * 11;
        let cs_bits = total_bits / 33;
        let ent_bits = total_bits - cs_bits;

        let entropy = bits.take_bytes(ent_bits);
        let expected_checksum_byte = w3_hashes::sha256(&entropy)[0];
        let actual_checksum = bits.take_bits(ent_bits, cs_bits);
        let expected_checksum = expected_checksum_byte >> (8 - cs_bits);
        if actual_checksum != expected_checksum {
            return Err(Bip39Error::InvalidChecksum);
        }

        Ok(Mnemonic { phrase: Zeroizing::new(phrase.to_string()) })
    }

    /// Generates a new mnemonic of the given word count using OS
    /// randomness.
    pub fn generate(word_count: usize) -> Result<Self> {
        if !VALID_WORD_COUNTS.contains(&word_count) {
            return Err(Bip39Error::InvalidWordCount(word_count));
        }
        let ent_bits = (word_count * 11 * 32) / 33;
        let mut entropy = vec![0u8; ent_bits / 8];
        rand::thread_rng().fill_bytes(&mut entropy);
        Self::from_entropy(&entropy)
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn word_count(&self) -> usize {
        self.phrase.split_whitespace().count()
    }

    /// Derives the 64-byte seed via PBKDF2-HMAC-SHA512 with 2048
    /// rounds over the NFKD-normalized phrase, salted with
    /// `"mnemonic" + passphrase`.
    ///
    /// NFKD normalization is a no-op for the ASCII English wordlist
    /// this crate embeds, so the phrase is used as-is.
    pub fn to_seed(&self, passphrase: &str) -> Zeroizing<[u8; 64]> {
        let salt = format!("mnemonic{passphrase}");
        let derived = w3_kdf::pbkdf2_hmac_sha512(self.phrase.as_bytes(), salt.as_bytes(), 2048, 64);
        let mut seed = [0u8; 64];
        seed.copy_from_slice(&derived);
        Zeroizing::new(seed)
    }
}

/// A minimal bit accumulator for packing/unpacking entropy and word
/// indices at the 11-bit granularity BIP-39 requires.
struct BitVec {
    bits: Vec<bool>,
}

impl BitVec {
    fn with_capacity(cap: usize) -> Self {
        BitVec { bits: Vec::with_capacity(cap) }
    }

    fn push_bytes(&mut self, bytes: &[u8]) {
        for byte in bytes {
            for i in (0..8).rev() {
                self.bits.push((byte >> i) & 1 == 1);
            }
        }
    }

    fn push_bits(&mut self, byte: u8, count: usize) {
        for i in (8 - count..8).rev() {
            self.bits.push((byte >> i) & 1 == 1);
        }
    }

    fn push_bits11(&mut self, value: u16) {
        for i in (0..11).rev() {
            self.bits.push((value >> i) & 1 == 1);
        }
    }

    fn chunks11(&self) -> impl Iterator<Item = u16> + '_ {
        self.bits.chunks_exact(11).map(|chunk| {
            chunk.iter().fold(0u16, |acc, &bit| (acc << 1) | bit as u16)
        })
    }

    fn take_bytes(&self, num_bits: usize) -> Vec<u8> {
        self.bits[..num_bits]
            .chunks_exact(8)
            .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | bit as u8))
            .collect()
    }

    fn take_bits(&self, start: usize, count: usize) -> u8 {
        self.bits[start..start + count]
            .iter()
            .fold(0u8, |acc, &bit| (acc << 1) | bit as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // known-answer vector: entropy 0x00..00 (16 bytes) -> 12x "abandon" + "about"
    #[test]
    fn all_zero_entropy_known_vector() {
        let entropy = [0u8; 16];
        let mnemonic = Mnemonic::from_entropy(&entropy).unwrap();
        let expected = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
        assert_eq!(mnemonic.phrase(), expected);

        let seed = mnemonic.to_seed("");
        let expected_seed = hex_literal::hex!(
            "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e53495531f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
        );
        assert_eq!(*seed, expected_seed);
    }

    #[test]
    fn parse_reparses_generated_mnemonic() {
        let entropy = [0x7fu8; 32];
        let mnemonic = Mnemonic::from_entropy(&entropy).unwrap();
        assert_eq!(mnemonic.word_count(), 24);
        let reparsed = Mnemonic::parse(mnemonic.phrase()).unwrap();
        assert_eq!(reparsed.phrase(), mnemonic.phrase());
    }

    #[test]
    fn parse_rejects_bad_checksum() {
        // Flip the last word, which should desync the checksum with
        // overwhelming probability.
        let entropy = [0x11u8; 16];
        let mnemonic = Mnemonic::from_entropy(&entropy).unwrap();
        let mut words: Vec<&str> = mnemonic.phrase().split_whitespace().collect();
        let last = words.last().copied().unwrap();
        let replacement = if last == "zoo" { "zebra" } else { "zoo" };
        *words.last_mut().unwrap() = replacement;
        let tampered = words.join(" ");
        assert_eq!(Mnemonic::parse(&tampered), Err(Bip39Error::InvalidChecksum));
    }

    #[test]
    fn parse_rejects_unknown_word() {
        let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon zzzznotaword";
        match Mnemonic::parse(phrase) {
            Err(Bip39Error::UnknownWord(word, pos)) => {
                assert_eq!(word, "zzzznotaword");
                assert_eq!(pos, 11);
            }
            other => panic!("expected UnknownWord, got {other:?}"),
        }
    }

    #[test]
    fn rejects_wrong_entropy_length() {
        assert_eq!(
            Mnemonic::from_entropy(&[0u8; 17]),
            Err(Bip39Error::InvalidEntropyLength(136))
        );
    }

    // every supported word count round-trips through generate -> parse
    // -> to_seed without error.
    #[test]
    fn all_word_counts_roundtrip() {
        for &count in &VALID_WORD_COUNTS {
            let mnemonic = Mnemonic::generate(count).unwrap();
            assert_eq!(mnemonic.word_count(), count);
            let reparsed = Mnemonic::parse(mnemonic.phrase()).unwrap();
            let _seed = reparsed.to_seed("");
        }
    }
}
