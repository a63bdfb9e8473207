//! EIP-191 personal message signing: `keccak256("\x19Ethereum Signed
//! Message:\n" + len(message) + message)`.

use w3_curves::secp256k1::Signature;
use w3_hashes::keccak256;

use crate::error::Result;
use crate::signer::Signer;

pub fn eip191_hash(message: &[u8]) -> [u8; 32] {
    let prefix = format!("\x19Ethereum Signed Message:\n{}", message.len());
    let mut buf = prefix.into_bytes();
    buf.extend_from_slice(message);
    keccak256(&buf)
}

pub fn sign_message(signer: &impl Signer, message: &[u8]) -> Result<Signature> {
    signer.sign_hash(&eip191_hash(message))
}

pub fn recover_message_signer(message: &[u8], sig: &Signature) -> Result<w3_numeric::Address> {
    let hash = eip191_hash(message);
    let pubkey = w3_curves::secp256k1::recover(sig, &hash)?;
    Ok(w3_numeric::Address::from_bytes(pubkey.to_ethereum_address()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signer::LocalSigner;
    use w3_curves::secp256k1::PrivateKey;

    #[test]
    fn sign_and_recover_roundtrip() {
        let mut bytes = [0u8; 32];
        bytes[31] = 3;
        let key = PrivateKey::from_bytes(&bytes).unwrap();
        let signer = LocalSigner::new(key);
        let sig = sign_message(&signer, b"hello web3").unwrap();
        let recovered = recover_message_signer(b"hello web3", &sig).unwrap();
        assert_eq!(recovered, signer.address());
    }

    #[test]
    fn prefix_length_is_in_ascii_decimal() {
        let hash_a = eip191_hash(b"hi");
        let hash_b = eip191_hash(b"hi!");
        assert_ne!(hash_a, hash_b);
    }
}
