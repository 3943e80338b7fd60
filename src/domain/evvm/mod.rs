//! EVVM core: payments, batches, the faucet and instance discovery.
//!
//! Payments are the only EVVM calls with off-chain signatures. The faucet
//! (`addBalance`) and `setEvvmID` are plain transactions signed by the wallet.

pub mod abi;
pub mod client;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::error::{SdkError, SdkResult};
use crate::payment::{DispersePayment, SignablePayment};
use crate::shared::{require_address, Recipient, PRINCIPAL_TOKEN, ZERO_ADDRESS};
use abi::{IEvvm, PayData};

// ─── Transfer ────────────────────────────────────────────────────────────────

/// What a plain payment moves. The nonce comes from [`PaymentTerms`].
///
/// [`PaymentTerms`]: crate::payment::PaymentTerms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub recipient: Recipient,
    pub token: Address,
    pub amount: U256,
    pub executor: Address,
}

impl Transfer {
    /// A principal-token transfer with no delegated executor.
    pub fn new(recipient: impl Into<Recipient>, amount: U256) -> Self {
        Self {
            recipient: recipient.into(),
            token: PRINCIPAL_TOKEN,
            amount,
            executor: ZERO_ADDRESS,
        }
    }

    pub fn token(mut self, token: Address) -> Self {
        self.token = token;
        self
    }

    /// Only `executor` may submit the signed payment.
    pub fn executor(mut self, executor: Address) -> Self {
        self.executor = executor;
        self
    }

    pub fn validate(&self) -> SdkResult<()> {
        self.recipient.validate()
    }
}

// ─── Call builders ───────────────────────────────────────────────────────────

/// `pay(from, to_address, to_identity, token, amount, priorityFee, nonce, priority, executor, signature)`
pub fn pay_call(payment: &SignablePayment) -> SdkResult<IEvvm::payCall> {
    let p = &payment.params;
    p.validate()?;
    Ok(IEvvm::payCall {
        from: payment.from,
        to_address: p.recipient.to_address(),
        to_identity: p.recipient.to_identity().to_string(),
        token: p.token,
        amount: p.amount,
        priorityFee: p.priority_fee,
        nonce: p.nonce,
        priority: p.priority.flag(),
        executor: p.executor,
        signature: payment.signature_bytes()?,
    })
}

/// `dispersePay(from, toData, token, amount, priorityFee, nonce, priority, executor, signature)`
pub fn disperse_pay_call(payment: &DispersePayment) -> SdkResult<IEvvm::dispersePayCall> {
    payment.validate()?;
    Ok(IEvvm::dispersePayCall {
        from: payment.from,
        toData: payment
            .recipients
            .iter()
            .map(|r| r.to_metadata())
            .collect(),
        token: payment.token,
        amount: payment.amount,
        priorityFee: payment.priority_fee,
        nonce: payment.nonce,
        priority: payment.priority.flag(),
        executor: payment.executor,
        signature: payment.signature_bytes()?,
    })
}

/// One `payMultiple` entry.
pub fn pay_data(payment: &SignablePayment) -> SdkResult<PayData> {
    let call = pay_call(payment)?;
    Ok(PayData {
        from: call.from,
        to_address: call.to_address,
        to_identity: call.to_identity,
        token: call.token,
        amount: call.amount,
        priorityFee: call.priorityFee,
        nonce: call.nonce,
        priority: call.priority,
        executor: call.executor,
        signature: call.signature,
    })
}

/// `payMultiple(PayData[])`. Each payment keeps its own sender and signature.
pub fn pay_multiple_call(payments: &[SignablePayment]) -> SdkResult<IEvvm::payMultipleCall> {
    if payments.is_empty() {
        return Err(SdkError::Validation(
            "payMultiple needs at least one payment".to_string(),
        ));
    }
    let data = payments.iter().map(pay_data).collect::<SdkResult<Vec<_>>>()?;
    Ok(IEvvm::payMultipleCall { payData: data })
}

// ─── Faucet ──────────────────────────────────────────────────────────────────

/// Test-net faucet credit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaucetRequest {
    pub user: Address,
    pub token: Address,
    pub quantity: U256,
}

impl FaucetRequest {
    pub fn validate(&self) -> SdkResult<()> {
        require_address("faucet user", &self.user)?;
        if self.quantity.is_zero() {
            return Err(SdkError::Validation("faucet quantity must be positive".to_string()));
        }
        Ok(())
    }

    pub fn to_call(&self) -> SdkResult<IEvvm::addBalanceCall> {
        self.validate()?;
        Ok(IEvvm::addBalanceCall {
            user: self.user,
            token: self.token,
            quantity: self.quantity,
        })
    }
}

/// Outcome of a `payMultiple` simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub successful: U256,
    pub failed: U256,
    pub results: Vec<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payment::{DisperseRecipient, PaymentParams};
    use crate::shared::{Priority, Recipient, PRINCIPAL_TOKEN, ZERO_ADDRESS};
    use crate::signer::LocalSigner;
    use alloy_primitives::address;
    use alloy_sol_types::SolCall;

    fn signed(signer: &LocalSigner, recipient: Recipient) -> SignablePayment {
        let params = PaymentParams::builder()
            .recipient(recipient)
            .amount(U256::from(10u64))
            .nonce(U256::from(3u64))
            .priority(Priority::Async)
            .build()
            .unwrap();
        let mut payment = SignablePayment::new(signer.address(), U256::from(1074u64), params);
        payment.sign_local(signer).unwrap();
        payment
    }

    #[test]
    fn test_pay_call_argument_order() {
        let signer = LocalSigner::random();
        let payment = signed(&signer, Recipient::Identity("alice".to_string()));
        let call = pay_call(&payment).unwrap();

        assert_eq!(call.from, signer.address());
        assert_eq!(call.to_address, ZERO_ADDRESS);
        assert_eq!(call.to_identity, "alice");
        assert_eq!(call.token, PRINCIPAL_TOKEN);
        assert!(call.priority);
        assert_eq!(call.signature.len(), 65);

        let decoded = IEvvm::payCall::abi_decode(&call.abi_encode(), true).unwrap();
        assert_eq!(decoded.to_identity, "alice");
        assert_eq!(decoded.nonce, U256::from(3u64));
    }

    #[test]
    fn test_pay_call_requires_signature() {
        let signer = LocalSigner::random();
        let mut payment = signed(&signer, Recipient::Identity("alice".to_string()));
        payment.signature = None;
        assert!(pay_call(&payment).is_err());
    }

    #[test]
    fn test_pay_call_rejects_blank_recipient() {
        let signer = LocalSigner::random();
        let mut payment = signed(&signer, Recipient::Identity("alice".to_string()));
        payment.params.recipient = Recipient::Identity(String::new());
        assert!(matches!(pay_call(&payment), Err(SdkError::Validation(_))));

        payment.params.recipient = Recipient::Address(ZERO_ADDRESS);
        assert!(pay_call(&payment).is_err());
        assert!(pay_multiple_call(&[payment]).is_err());
    }

    #[test]
    fn test_pay_multiple_keeps_priority() {
        let a = LocalSigner::random();
        let b = LocalSigner::random();
        let call = pay_multiple_call(&[
            signed(&a, Recipient::Identity("alice".to_string())),
            signed(&b, Recipient::Address(address!("00000000000000000000000000000000000000aa"))),
        ])
        .unwrap();
        assert_eq!(call.payData.len(), 2);
        assert!(call.payData.iter().all(|d| d.priority));
        assert_eq!(call.payData[1].from, b.address());
        assert!(pay_multiple_call(&[]).is_err());
    }

    #[test]
    fn test_disperse_call_carries_recipients() {
        let signer = LocalSigner::random();
        let mut disperse = DispersePayment::new(
            signer.address(),
            U256::from(1u64),
            vec![
                DisperseRecipient::new(Recipient::Identity("bob".to_string()), U256::from(4u64)),
                DisperseRecipient::new(
                    address!("00000000000000000000000000000000000000bb"),
                    U256::from(6u64),
                ),
            ],
            PRINCIPAL_TOKEN,
            U256::ZERO,
            U256::from(9u64),
            Priority::Async,
        )
        .unwrap();
        disperse.sign_local(&signer).unwrap();

        let call = disperse_pay_call(&disperse).unwrap();
        assert_eq!(call.toData.len(), 2);
        assert_eq!(call.toData[0].to_identity, "bob");
        assert_eq!(call.amount, U256::from(10u64));
    }

    #[test]
    fn test_faucet_validation() {
        let ok = FaucetRequest {
            user: address!("00000000000000000000000000000000000000aa"),
            token: PRINCIPAL_TOKEN,
            quantity: U256::from(1u64),
        };
        assert!(ok.to_call().is_ok());

        let zero = FaucetRequest {
            quantity: U256::ZERO,
            ..ok.clone()
        };
        assert!(zero.to_call().is_err());

        let nobody = FaucetRequest {
            user: ZERO_ADDRESS,
            ..ok
        };
        assert!(nobody.to_call().is_err());
    }
}
