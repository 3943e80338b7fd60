//! Action payload encoding.
//!
//! Every domain action (register a username, stake, place a swap order, ...)
//! is a plain input struct implementing [`ActionPayload`]. The trait fixes the
//! field order of the canonical message; the struct never touches a wallet.
//!
//! ```text
//! message = "{evvmID},{functionName},{field_1},...,{field_n}"
//! ```
//!
//! Changing a schema's field order or rendering changes every signature made
//! with it, so schemas are append-only in practice.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::error::{SdkError, SignerError};
use crate::shared::canonical::join_message;
use crate::shared::EvmSignature;
use crate::signer::{verify_signer, LocalSigner};

/// A domain action with a fixed canonical schema.
pub trait ActionPayload {
    /// Contract function that verifies this action's signature.
    fn function_name(&self) -> &'static str;

    /// Domain nonce (separate numbering space from the payment nonce).
    fn nonce(&self) -> U256;

    /// Rendered fields in schema order, excluding `evvmID` and the function name.
    fn fields(&self) -> Vec<String>;

    /// Reject missing or malformed inputs before anything is signed.
    fn validate(&self) -> Result<(), SdkError> {
        Ok(())
    }

    fn canonical_message(&self, evvm_id: U256) -> String {
        join_message(evvm_id, self.function_name(), &self.fields())
    }
}

// ============================================================================
// SignableAction
// ============================================================================

/// An action bound to its actor, optionally carrying the actor's signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignableAction<A> {
    pub actor: Address,
    pub evvm_id: U256,
    pub payload: A,
    pub signature: Option<EvmSignature>,
}

impl<A: ActionPayload> SignableAction<A> {
    pub fn new(actor: Address, evvm_id: U256, payload: A) -> Self {
        Self {
            actor,
            evvm_id,
            payload,
            signature: None,
        }
    }

    pub fn message(&self) -> String {
        self.payload.canonical_message(self.evvm_id)
    }

    pub fn nonce(&self) -> U256 {
        self.payload.nonce()
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some_and(|s| !s.is_empty())
    }

    /// Attach a signature produced elsewhere (wallet, remote signer).
    pub fn apply_signature(&mut self, signature: EvmSignature) {
        self.signature = Some(signature);
    }

    /// Sign with a local key. The key must belong to the actor.
    pub fn sign_local(&mut self, signer: &LocalSigner) -> Result<(), SdkError> {
        if signer.address() != self.actor {
            return Err(SdkError::Validation(format!(
                "signer {} is not the action actor {}",
                signer.address(),
                self.actor
            )));
        }
        self.payload.validate()?;
        let signature = signer.sign_message(&self.message())?;
        self.signature = Some(signature);
        Ok(())
    }

    /// Whether the attached signature recovers to the actor.
    pub fn verify(&self) -> bool {
        match &self.signature {
            Some(sig) => verify_signer(&self.message(), sig, &self.actor),
            None => false,
        }
    }

    /// Signature bytes for the call; errors if unsigned.
    pub fn signature_bytes(&self) -> Result<alloy_primitives::Bytes, SdkError> {
        self.signature
            .filter(|s| !s.is_empty())
            .map(|s| s.to_bytes())
            .ok_or_else(|| {
                SdkError::Signer(SignerError::InvalidSignature(format!(
                    "{} action is not signed",
                    self.payload.function_name()
                )))
            })
    }
}
