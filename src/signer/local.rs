//! Local private-key signer (k256).

use alloy_primitives::Address;
use k256::ecdsa::SigningKey;

use super::{address_of, eip191_hash};
use crate::error::SignerError;
use crate::shared::EvmSignature;

/// A secp256k1 key held in process memory.
///
/// Signs canonical messages the same way a browser wallet's `personal_sign`
/// does, so envelopes built with it verify on-chain identically.
#[derive(Clone)]
pub struct LocalSigner {
    key: SigningKey,
    address: Address,
}

impl LocalSigner {
    pub fn from_signing_key(key: SigningKey) -> Self {
        let address = address_of(key.verifying_key());
        Self { key, address }
    }

    /// Parse a 32-byte private key, with or without a `0x` prefix.
    pub fn from_hex(private_key: &str) -> Result<Self, SignerError> {
        let raw = private_key.trim();
        let raw = raw.strip_prefix("0x").unwrap_or(raw);
        let bytes = hex::decode(raw).map_err(|e| SignerError::InvalidKey(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignerError> {
        let key = SigningKey::from_slice(bytes).map_err(|e| SignerError::InvalidKey(e.to_string()))?;
        Ok(Self::from_signing_key(key))
    }

    /// Fresh random key, mostly useful in tests.
    pub fn random() -> Self {
        Self::from_signing_key(SigningKey::random(&mut rand::thread_rng()))
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// `personal_sign` over the UTF-8 bytes of `message`.
    pub fn sign_message(&self, message: &str) -> Result<EvmSignature, SignerError> {
        let digest = eip191_hash(message.as_bytes());
        let (sig, recovery_id) = self
            .key
            .sign_prehash_recoverable(digest.as_slice())
            .map_err(|e| SignerError::Rejected(e.to_string()))?;

        let mut bytes = [0u8; 65];
        bytes[..64].copy_from_slice(&sig.to_bytes());
        bytes[64] = recovery_id.to_byte() + 27;
        Ok(EvmSignature::from_bytes(bytes))
    }
}

impl std::fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}
