//! Payment payload encoding.
//!
//! A payment authorizes a token transfer from the signer. Every action
//! envelope carries one to pay the service it calls; a bare `pay` is a
//! payment with no action.
//!
//! Canonical message:
//!
//! ```text
//! "{evvmID},pay,{recipient},{token},{amount},{priorityFee},{nonce},{priorityFlag},{executor}"
//! ```
//!
//! `recipient` is the identity string when paying an identity, otherwise the
//! address. An `executor` other than the zero address restricts who may submit
//! the envelope; it is not a second signer.

pub mod builder;
pub mod disperse;

pub use builder::PaymentBuilder;
pub use disperse::{DisperseRecipient, DispersePayment};

use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

use crate::error::{SdkError, SignerError};
use crate::shared::canonical::join_message;
use crate::shared::{CanonicalField, EvmSignature, Priority, Recipient, ZERO_ADDRESS};
use crate::signer::{verify_signer, LocalSigner};

/// Function name the EVVM contract verifies payment signatures under.
pub const PAY_FUNCTION: &str = "pay";

// ============================================================================
// PaymentParams
// ============================================================================

/// The signed fields of a payment, independent of who signs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentParams {
    pub recipient: Recipient,
    pub token: Address,
    pub amount: U256,
    pub priority_fee: U256,
    pub nonce: U256,
    pub priority: Priority,
    /// `ZERO_ADDRESS` means no delegated executor.
    pub executor: Address,
}

impl PaymentParams {
    pub fn builder() -> PaymentBuilder {
        PaymentBuilder::new()
    }

    pub fn canonical_message(&self, evvm_id: U256) -> String {
        join_message(
            evvm_id,
            PAY_FUNCTION,
            &[
                self.recipient.canonical(),
                self.token.canonical(),
                self.amount.canonical(),
                self.priority_fee.canonical(),
                self.nonce.canonical(),
                self.priority.flag().canonical(),
                self.executor.canonical(),
            ],
        )
    }

    /// Exactly one recipient must be named.
    pub fn validate(&self) -> Result<(), SdkError> {
        self.recipient.validate()
    }

    pub fn has_executor(&self) -> bool {
        self.executor != ZERO_ADDRESS
    }
}

// ============================================================================
// PaymentTerms
// ============================================================================

/// How an action pays for itself: everything except the recipient, token and
/// amount, which the action's pricing decides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTerms {
    pub priority_fee: U256,
    /// `None` picks one: the next sync nonce for `Sync`, a random one for `Async`.
    pub nonce: Option<U256>,
    pub priority: Priority,
}

impl PaymentTerms {
    pub fn sync() -> Self {
        Self::default()
    }

    pub fn asynchronous() -> Self {
        Self {
            priority: Priority::Async,
            ..Self::default()
        }
    }

    pub fn priority_fee(mut self, fee: U256) -> Self {
        self.priority_fee = fee;
        self
    }

    pub fn nonce(mut self, nonce: U256) -> Self {
        self.nonce = Some(nonce);
        self
    }
}

// ============================================================================
// SignablePayment
// ============================================================================

/// A payment bound to its sender, optionally carrying the sender's signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignablePayment {
    pub from: Address,
    pub evvm_id: U256,
    pub params: PaymentParams,
    pub signature: Option<EvmSignature>,
}

impl SignablePayment {
    pub fn new(from: Address, evvm_id: U256, params: PaymentParams) -> Self {
        Self {
            from,
            evvm_id,
            params,
            signature: None,
        }
    }

    pub fn message(&self) -> String {
        self.params.canonical_message(self.evvm_id)
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some_and(|s| !s.is_empty())
    }

    pub fn apply_signature(&mut self, signature: EvmSignature) {
        self.signature = Some(signature);
    }

    /// Sign with a local key. The key must belong to the sender.
    pub fn sign_local(&mut self, signer: &LocalSigner) -> Result<(), SdkError> {
        if signer.address() != self.from {
            return Err(SdkError::Validation(format!(
                "signer {} is not the payment sender {}",
                signer.address(),
                self.from
            )));
        }
        self.params.validate()?;
        let signature = signer.sign_message(&self.message())?;
        self.signature = Some(signature);
        Ok(())
    }

    /// Whether the attached signature recovers to the sender.
    pub fn verify(&self) -> bool {
        match &self.signature {
            Some(sig) => verify_signer(&self.message(), sig, &self.from),
            None => false,
        }
    }

    pub fn signature_bytes(&self) -> Result<Bytes, SdkError> {
        self.signature
            .filter(|s| !s.is_empty())
            .map(|s| s.to_bytes())
            .ok_or_else(|| {
                SdkError::Signer(SignerError::InvalidSignature(
                    "payment is not signed".to_string(),
                ))
            })
    }
}
