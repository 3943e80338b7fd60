//! EIP-191 `personal_sign` hashing, recovery, and a local k256 signer.
//!
//! Every signature in an envelope is a `personal_sign` over a canonical UTF-8
//! message:
//!
//! ```text
//! digest = keccak256("\x19Ethereum Signed Message:\n" ‖ len(message) ‖ message)
//! ```

pub mod local;

pub use local::LocalSigner;

use alloy_primitives::{Address, B256};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use sha3::{Digest, Keccak256};

use crate::error::SignerError;
use crate::shared::EvmSignature;

/// EIP-191 version `0x45` digest of `message`.
pub fn eip191_hash(message: &[u8]) -> B256 {
    let mut hasher = Keccak256::new();
    hasher.update(format!("\x19Ethereum Signed Message:\n{}", message.len()).as_bytes());
    hasher.update(message);
    B256::from_slice(&hasher.finalize())
}

/// Ethereum address of a secp256k1 public key.
pub fn address_of(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let hash = Keccak256::digest(&point.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}

/// Recover the address that produced `signature` over `message`.
pub fn recover_signer(message: &str, signature: &EvmSignature) -> Result<Address, SignerError> {
    let digest = eip191_hash(message.as_bytes());
    let bytes = signature.as_bytes();

    let sig = Signature::from_slice(&bytes[..64])
        .map_err(|e| SignerError::InvalidSignature(e.to_string()))?;
    let recovery_id = RecoveryId::from_byte(signature.v().wrapping_sub(27))
        .ok_or_else(|| SignerError::InvalidSignature(format!("bad recovery byte {}", bytes[64])))?;

    let key = VerifyingKey::recover_from_prehash(digest.as_slice(), &sig, recovery_id)
        .map_err(|e| SignerError::InvalidSignature(e.to_string()))?;
    Ok(address_of(&key))
}

/// Whether `signature` over `message` was produced by `expected`.
pub fn verify_signer(message: &str, signature: &EvmSignature, expected: &Address) -> bool {
    recover_signer(message, signature)
        .map(|a| a == *expected)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eip191_hash_known_vector() {
        // personal_sign digest of "hello"
        let digest = eip191_hash(b"hello");
        assert_eq!(
            hex::encode(digest),
            "50b2c43fd39106bafbba0da34fc430e1f91e3c96ea2acee2bc34119f92b37750"
        );
    }

    #[test]
    fn test_eip191_hash_includes_length() {
        assert_ne!(eip191_hash(b"ab"), eip191_hash(b"a"));
    }

    #[test]
    fn test_recover_rejects_garbage() {
        let sig = EvmSignature::from_bytes([0u8; 65]);
        assert!(recover_signer("hello", &sig).is_err());
    }
}
