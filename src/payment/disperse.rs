//! Disperse payments: one signature splitting an amount across many recipients.
//!
//! The recipient list is committed to by hash:
//!
//! ```text
//! "{evvmID},dispersePay,{keccak256(abi.encode(toData))},{token},{amount},{priorityFee},{nonce},{priorityFlag},{executor}"
//! ```

use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use alloy_sol_types::{sol_data, SolType};
use serde::{Deserialize, Serialize};

use crate::domain::evvm::abi::DispersePayMetadata;
use crate::error::{SdkError, SignerError};
use crate::shared::canonical::join_message;
use crate::shared::{CanonicalField, EvmSignature, Priority, Recipient, ZERO_ADDRESS};
use crate::signer::{verify_signer, LocalSigner};

pub const DISPERSE_PAY_FUNCTION: &str = "dispersePay";

/// One entry of a disperse payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisperseRecipient {
    pub recipient: Recipient,
    pub amount: U256,
}

impl DisperseRecipient {
    pub fn new(recipient: impl Into<Recipient>, amount: U256) -> Self {
        Self {
            recipient: recipient.into(),
            amount,
        }
    }

    pub fn to_metadata(&self) -> DispersePayMetadata {
        DispersePayMetadata {
            amount: self.amount,
            to_address: self.recipient.to_address(),
            to_identity: self.recipient.to_identity().to_string(),
        }
    }
}

/// `keccak256(abi.encode(toData))` over the `DispersePayMetadata[]` tuple list.
pub fn hash_disperse_recipients(recipients: &[DisperseRecipient]) -> B256 {
    let to_data: Vec<DispersePayMetadata> =
        recipients.iter().map(DisperseRecipient::to_metadata).collect();
    keccak256(<sol_data::Array<DispersePayMetadata> as SolType>::abi_encode(&to_data))
}

/// A signable disperse payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispersePayment {
    pub from: Address,
    pub evvm_id: U256,
    pub recipients: Vec<DisperseRecipient>,
    pub token: Address,
    /// Total dispersed; must equal the sum of recipient amounts.
    pub amount: U256,
    pub priority_fee: U256,
    pub nonce: U256,
    pub priority: Priority,
    pub executor: Address,
    pub signature: Option<EvmSignature>,
}

impl DispersePayment {
    /// Build a disperse payment whose total is the sum of `recipients`.
    pub fn new(
        from: Address,
        evvm_id: U256,
        recipients: Vec<DisperseRecipient>,
        token: Address,
        priority_fee: U256,
        nonce: U256,
        priority: Priority,
    ) -> Result<Self, SdkError> {
        let amount = recipients
            .iter()
            .try_fold(U256::ZERO, |acc, r| acc.checked_add(r.amount))
            .ok_or_else(|| SdkError::Validation("disperse total overflows uint256".to_string()))?;

        let payment = Self {
            from,
            evvm_id,
            recipients,
            token,
            amount,
            priority_fee,
            nonce,
            priority,
            executor: ZERO_ADDRESS,
            signature: None,
        };
        payment.validate()?;
        Ok(payment)
    }

    pub fn with_executor(mut self, executor: Address) -> Self {
        self.executor = executor;
        self
    }

    pub fn validate(&self) -> Result<(), SdkError> {
        if self.recipients.is_empty() {
            return Err(SdkError::Validation(
                "disperse payment needs at least one recipient".to_string(),
            ));
        }
        for r in &self.recipients {
            r.recipient.validate()?;
        }
        let total = self
            .recipients
            .iter()
            .fold(U256::ZERO, |acc, r| acc.saturating_add(r.amount));
        if total != self.amount {
            return Err(SdkError::Validation(format!(
                "disperse total {} does not match recipient sum {}",
                self.amount, total
            )));
        }
        Ok(())
    }

    pub fn recipients_hash(&self) -> B256 {
        hash_disperse_recipients(&self.recipients)
    }

    pub fn message(&self) -> String {
        join_message(
            self.evvm_id,
            DISPERSE_PAY_FUNCTION,
            &[
                self.recipients_hash().canonical(),
                self.token.canonical(),
                self.amount.canonical(),
                self.priority_fee.canonical(),
                self.nonce.canonical(),
                self.priority.flag().canonical(),
                self.executor.canonical(),
            ],
        )
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some_and(|s| !s.is_empty())
    }

    pub fn apply_signature(&mut self, signature: EvmSignature) {
        self.signature = Some(signature);
    }

    pub fn sign_local(&mut self, signer: &LocalSigner) -> Result<(), SdkError> {
        if signer.address() != self.from {
            return Err(SdkError::Validation(format!(
                "signer {} is not the payment sender {}",
                signer.address(),
                self.from
            )));
        }
        self.validate()?;
        self.signature = Some(signer.sign_message(&self.message())?);
        Ok(())
    }

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
                    "disperse payment is not signed".to_string(),
                ))
            })
    }
}
