//! Envelope assembly and submission.
//!
//! An envelope couples independently signed parts (an action and the payment
//! that pays for it, or a payment alone) into one contract call. Assembly is
//! pure: it checks that every part's signature recovers to the same actor and
//! ABI-encodes the call. Submission sends the call exactly once.

pub mod state;

pub use state::{EnvelopeLifecycle, EnvelopeState};

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::SolCall;

use crate::action::{ActionPayload, SignableAction};
use crate::error::{SdkError, SdkResult, SignerError, StateError};
use crate::payment::{DispersePayment, SignablePayment};
use crate::provider::{ConnectionProvider, TransactionRequest};

// ─── Signed parts ───────────────────────────────────────────────────────────

/// Anything that contributes a signature to an envelope.
pub trait SignedPart {
    /// What the part authorizes, for error messages.
    fn label(&self) -> String;
    /// Address the signature must recover to.
    fn signer(&self) -> Address;
    fn is_signed(&self) -> bool;
    /// Whether the signature recovers to [`SignedPart::signer`].
    fn verify(&self) -> bool;
}

impl<A: ActionPayload> SignedPart for SignableAction<A> {
    fn label(&self) -> String {
        format!("{} action", self.payload.function_name())
    }

    fn signer(&self) -> Address {
        self.actor
    }

    fn is_signed(&self) -> bool {
        SignableAction::is_signed(self)
    }

    fn verify(&self) -> bool {
        SignableAction::verify(self)
    }
}

impl SignedPart for SignablePayment {
    fn label(&self) -> String {
        "payment".to_string()
    }

    fn signer(&self) -> Address {
        self.from
    }

    fn is_signed(&self) -> bool {
        SignablePayment::is_signed(self)
    }

    fn verify(&self) -> bool {
        SignablePayment::verify(self)
    }
}

impl SignedPart for DispersePayment {
    fn label(&self) -> String {
        "disperse payment".to_string()
    }

    fn signer(&self) -> Address {
        self.from
    }

    fn is_signed(&self) -> bool {
        DispersePayment::is_signed(self)
    }

    fn verify(&self) -> bool {
        DispersePayment::verify(self)
    }
}

// ─── TransactionEnvelope ────────────────────────────────────────────────────

/// A call-ready contract invocation plus its lifecycle.
#[derive(Debug, Clone)]
pub struct TransactionEnvelope {
    function: String,
    target: Address,
    from: Address,
    calldata: Bytes,
    gas: Option<u64>,
    lifecycle: EnvelopeLifecycle,
}

impl TransactionEnvelope {
    /// Assemble `call` for `target` from parts signed elsewhere.
    ///
    /// Fails when the target is the zero address, when any part is unsigned,
    /// or when any part's signature does not recover to `actor`. Nothing is
    /// coerced: the call's argument order is exactly that of `C`. The parts
    /// already carry signatures, so `Signing` is recorded at assembly.
    pub fn assemble<C: SolCall>(
        target: Address,
        actor: Address,
        parts: &[&dyn SignedPart],
        call: &C,
    ) -> SdkResult<Self> {
        let mut lifecycle = EnvelopeLifecycle::new();
        lifecycle.begin_signing()?;
        Self::assemble_signed(lifecycle, target, actor, parts, call)
    }

    /// Finish an envelope whose lifecycle entered `Signing` before the wallet
    /// was asked for signatures.
    pub(crate) fn assemble_signed<C: SolCall>(
        mut lifecycle: EnvelopeLifecycle,
        target: Address,
        actor: Address,
        parts: &[&dyn SignedPart],
        call: &C,
    ) -> SdkResult<Self> {
        let function = function_name::<C>();
        if lifecycle.state() != EnvelopeState::Signing {
            return Err(SdkError::Lifecycle(StateError::InvalidTransition {
                from: lifecycle.state(),
                to: EnvelopeState::Signed,
            }));
        }
        if target.is_zero() {
            return Err(SdkError::Validation(format!(
                "{}: target contract address is required",
                function
            )));
        }
        if actor.is_zero() {
            return Err(SdkError::Validation(format!("{}: actor is required", function)));
        }

        for part in parts {
            if part.signer() != actor {
                return Err(SdkError::Validation(format!(
                    "{}: {} signer {} does not match actor {}",
                    function,
                    part.label(),
                    part.signer(),
                    actor
                )));
            }
            if !part.is_signed() {
                return Err(SdkError::Validation(format!(
                    "{}: {} is not signed",
                    function,
                    part.label()
                )));
            }
            if !part.verify() {
                return Err(SdkError::Signer(SignerError::InvalidSignature(format!(
                    "{}: {} signature does not recover to {}",
                    function,
                    part.label(),
                    actor
                ))));
            }
        }

        lifecycle.mark_signed()?;
        let mut envelope = Self::unsigned_call(target, actor, call)?;
        envelope.lifecycle = lifecycle;
        Ok(envelope)
    }

    /// Wrap a call that carries no off-chain signatures, such as the faucet,
    /// the registry or sensor logging. The wallet signs the transaction itself
    /// on send, so `Signing → Signed` only marks the hand-off here.
    pub fn plain<C: SolCall>(target: Address, from: Address, call: &C) -> SdkResult<Self> {
        if target.is_zero() {
            return Err(SdkError::Validation(format!(
                "{}: target contract address is required",
                function_name::<C>()
            )));
        }
        Self::unsigned_call(target, from, call)?.signed()
    }

    fn unsigned_call<C: SolCall>(target: Address, from: Address, call: &C) -> SdkResult<Self> {
        Ok(Self {
            function: function_name::<C>().to_string(),
            target,
            from,
            calldata: Bytes::from(call.abi_encode()),
            gas: None,
            lifecycle: EnvelopeLifecycle::new(),
        })
    }

    fn signed(mut self) -> SdkResult<Self> {
        self.lifecycle.begin_signing()?;
        self.lifecycle.mark_signed()?;
        Ok(self)
    }

    /// Fixed gas limit instead of node estimation.
    pub fn with_gas(mut self, gas: u64) -> Self {
        self.gas = Some(gas);
        self
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn target(&self) -> Address {
        self.target
    }

    pub fn from(&self) -> Address {
        self.from
    }

    pub fn calldata(&self) -> &Bytes {
        &self.calldata
    }

    pub fn gas(&self) -> Option<u64> {
        self.gas
    }

    pub fn state(&self) -> EnvelopeState {
        self.lifecycle.state()
    }

    pub fn lifecycle(&self) -> &EnvelopeLifecycle {
        &self.lifecycle
    }

    pub fn tx_hash(&self) -> Option<B256> {
        self.lifecycle.tx_hash()
    }

    pub fn to_request(&self) -> TransactionRequest {
        TransactionRequest {
            from: (!self.from.is_zero()).then_some(self.from),
            to: self.target,
            data: self.calldata.clone(),
            gas: self.gas,
            value: U256::ZERO,
        }
    }
}

/// `pay` from `pay(address,address,...)`.
pub(crate) fn function_name<C: SolCall>() -> &'static str {
    C::SIGNATURE.split('(').next().unwrap_or(C::SIGNATURE)
}

// ─── Submission ─────────────────────────────────────────────────────────────

/// Send `envelope` once through `provider`.
///
/// `Signed → Submitting → Confirmed` when the provider accepts the
/// transaction, `→ Failed` when it reverts or the RPC call errors. A failed or
/// confirmed envelope cannot be submitted again.
pub async fn submit<P: ConnectionProvider>(
    provider: &P,
    envelope: &mut TransactionEnvelope,
) -> SdkResult<B256> {
    envelope.lifecycle.begin_submitting()?;

    match provider.send_transaction(envelope.to_request()).await {
        Ok(tx_hash) => {
            envelope.lifecycle.confirm(tx_hash)?;
            tracing::info!(
                function = %envelope.function,
                target = %envelope.target,
                tx_hash = %tx_hash,
                "Envelope submitted"
            );
            Ok(tx_hash)
        }
        Err(e) => {
            let reason = e.to_string();
            envelope.lifecycle.fail(reason.clone())?;
            tracing::warn!(
                function = %envelope.function,
                target = %envelope.target,
                error = %reason,
                "Envelope submission failed"
            );
            Err(SdkError::Submission(format!("{}: {}", envelope.function, reason)))
        }
    }
}
