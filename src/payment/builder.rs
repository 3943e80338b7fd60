//! Fluent builder for payment parameters.

use alloy_primitives::{Address, U256};

use super::PaymentParams;
use crate::error::SdkError;
use crate::shared::{random_async_nonce, Priority, Recipient, PRINCIPAL_TOKEN, ZERO_ADDRESS};

/// Builder for [`PaymentParams`].
///
/// # Example
///
/// ```rust,ignore
/// let params = PaymentParams::builder()
///     .to_identity("alice")
///     .token(PRINCIPAL_TOKEN)
///     .amount(U256::from(1_000u64))
///     .async_nonce()
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct PaymentBuilder {
    to_address: Option<Address>,
    to_identity: Option<String>,
    token: Option<Address>,
    amount: Option<U256>,
    priority_fee: U256,
    nonce: Option<U256>,
    priority: Priority,
    executor: Option<Address>,
}

impl PaymentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pay a direct address.
    pub fn to_address(mut self, to: Address) -> Self {
        self.to_address = Some(to);
        self
    }

    /// Pay a name-service identity.
    pub fn to_identity(mut self, identity: impl Into<String>) -> Self {
        self.to_identity = Some(identity.into());
        self
    }

    pub fn recipient(mut self, recipient: Recipient) -> Self {
        match recipient {
            Recipient::Address(a) => self.to_address = Some(a),
            Recipient::Identity(i) => self.to_identity = Some(i),
        }
        self
    }

    /// Token to transfer. Defaults to the principal token.
    pub fn token(mut self, token: Address) -> Self {
        self.token = Some(token);
        self
    }

    pub fn amount(mut self, amount: U256) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn priority_fee(mut self, fee: U256) -> Self {
        self.priority_fee = fee;
        self
    }

    pub fn nonce(mut self, nonce: U256) -> Self {
        self.nonce = Some(nonce);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Asynchronous priority with a fresh random nonce.
    pub fn async_nonce(mut self) -> Self {
        self.priority = Priority::Async;
        self.nonce = Some(random_async_nonce());
        self
    }

    /// Restrict submission to `executor`.
    pub fn executor(mut self, executor: Address) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Validate and build.
    ///
    /// Fails when the recipient is missing or doubly specified, or when the
    /// amount or nonce was never set.
    pub fn build(self) -> Result<PaymentParams, SdkError> {
        let recipient = Recipient::from_parts(self.to_address, self.to_identity.as_deref())?;
        let amount = self
            .amount
            .ok_or_else(|| SdkError::Validation("payment amount is required".to_string()))?;
        let nonce = self
            .nonce
            .ok_or_else(|| SdkError::Validation("payment nonce is required".to_string()))?;

        Ok(PaymentParams {
            recipient,
            token: self.token.unwrap_or(PRINCIPAL_TOKEN),
            amount,
            priority_fee: self.priority_fee,
            nonce,
            priority: self.priority,
            executor: self.executor.unwrap_or(ZERO_ADDRESS),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_build_defaults() {
        let p = PaymentBuilder::new()
            .to_identity("alice")
            .amount(U256::from(10u64))
            .nonce(U256::from(1u64))
            .build()
            .unwrap();
        assert_eq!(p.token, PRINCIPAL_TOKEN);
        assert_eq!(p.executor, ZERO_ADDRESS);
        assert_eq!(p.priority, Priority::Sync);
        assert_eq!(p.priority_fee, U256::ZERO);
        assert!(!p.has_executor());
    }

    #[test]
    fn test_build_rejects_both_recipients() {
        let err = PaymentBuilder::new()
            .to_identity("alice")
            .to_address(address!("00000000000000000000000000000000000000aa"))
            .amount(U256::from(1u64))
            .nonce(U256::from(1u64))
            .build();
        assert!(err.is_err());
    }

    #[test]
    fn test_build_rejects_no_recipient() {
        let err = PaymentBuilder::new()
            .amount(U256::from(1u64))
            .nonce(U256::from(1u64))
            .build();
        assert!(err.is_err());
    }

    #[test]
    fn test_build_requires_amount_and_nonce() {
        assert!(PaymentBuilder::new().to_identity("alice").nonce(U256::ZERO).build().is_err());
        assert!(PaymentBuilder::new().to_identity("alice").amount(U256::ZERO).build().is_err());
    }

    #[test]
    fn test_async_nonce_sets_priority() {
        let p = PaymentBuilder::new()
            .to_identity("alice")
            .amount(U256::from(1u64))
            .async_nonce()
            .build()
            .unwrap();
        assert_eq!(p.priority, Priority::Async);
    }
}
