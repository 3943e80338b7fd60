//! Payments sub-client: pay, disperse, batches, faucet and EVVM reads.

use alloy_primitives::{Address, B256, U256};

use crate::client::EvvmClient;
use crate::domain::evvm::abi::IEvvm;
use crate::domain::evvm::{
    disperse_pay_call, pay_call, pay_multiple_call, BatchOutcome, FaucetRequest, Transfer,
};
use crate::envelope::{EnvelopeLifecycle, SignedPart, TransactionEnvelope};
use crate::error::{SdkError, SdkResult};
use crate::payment::{DispersePayment, DisperseRecipient, PaymentParams, PaymentTerms, SignablePayment};
use crate::provider::ConnectionProvider;

/// Sub-client for the EVVM core contract.
pub struct Payments<'a, P> {
    pub(crate) client: &'a EvvmClient<P>,
}

impl<'a, P: ConnectionProvider> Payments<'a, P> {
    // ── Single payments ──────────────────────────────────────────────────

    /// Sign a payment from the connected account without wrapping it in an
    /// envelope. Used for `payMultiple` entries and delegated execution.
    pub async fn sign(&self, transfer: Transfer, terms: &PaymentTerms) -> SdkResult<SignablePayment> {
        transfer.validate()?;
        let account = self.client.account().await?;
        let evvm_id = self.client.evvm_id().await?;
        let nonce = self.client.resolve_payment_nonce(account, terms).await?;

        let params = PaymentParams {
            recipient: transfer.recipient,
            token: transfer.token,
            amount: transfer.amount,
            priority_fee: terms.priority_fee,
            nonce,
            priority: terms.priority,
            executor: transfer.executor,
        };
        self.client.sign_payment(account, evvm_id, params).await
    }

    /// Sign a payment and assemble the `pay` call.
    pub async fn build_pay(
        &self,
        transfer: Transfer,
        terms: &PaymentTerms,
    ) -> SdkResult<TransactionEnvelope> {
        let mut lifecycle = EnvelopeLifecycle::new();
        lifecycle.begin_signing()?;
        let payment = self.sign(transfer, terms).await?;
        let call = pay_call(&payment)?;
        let parts: [&dyn SignedPart; 1] = [&payment];
        TransactionEnvelope::assemble_signed(
            lifecycle,
            self.client.evvm_address(),
            payment.from,
            &parts,
            &call,
        )
    }

    /// Assemble `pay` from a payment signed elsewhere.
    pub fn envelope_for(&self, payment: &SignablePayment) -> SdkResult<TransactionEnvelope> {
        let call = pay_call(payment)?;
        let parts: [&dyn SignedPart; 1] = [payment];
        TransactionEnvelope::assemble(self.client.evvm_address(), payment.from, &parts, &call)
    }

    pub async fn pay(&self, transfer: Transfer, terms: &PaymentTerms) -> SdkResult<B256> {
        let mut envelope = self.build_pay(transfer, terms).await?;
        self.client.submit(&mut envelope).await
    }

    // ── Disperse ─────────────────────────────────────────────────────────

    /// Sign one payment split across `recipients`.
    pub async fn build_disperse(
        &self,
        recipients: Vec<DisperseRecipient>,
        token: Address,
        terms: &PaymentTerms,
    ) -> SdkResult<TransactionEnvelope> {
        let account = self.client.account().await?;
        let evvm_id = self.client.evvm_id().await?;
        let nonce = self.client.resolve_payment_nonce(account, terms).await?;

        let mut lifecycle = EnvelopeLifecycle::new();
        lifecycle.begin_signing()?;
        let mut disperse = DispersePayment::new(
            account,
            evvm_id,
            recipients,
            token,
            terms.priority_fee,
            nonce,
            terms.priority,
        )?;
        let signature = self.client.sign_message(account, &disperse.message()).await?;
        disperse.apply_signature(signature);

        let call = disperse_pay_call(&disperse)?;
        let parts: [&dyn SignedPart; 1] = [&disperse];
        TransactionEnvelope::assemble_signed(
            lifecycle,
            self.client.evvm_address(),
            account,
            &parts,
            &call,
        )
    }

    pub async fn disperse(
        &self,
        recipients: Vec<DisperseRecipient>,
        token: Address,
        terms: &PaymentTerms,
    ) -> SdkResult<B256> {
        let mut envelope = self.build_disperse(recipients, token, terms).await?;
        self.client.submit(&mut envelope).await
    }

    // ── Batches ──────────────────────────────────────────────────────────

    /// Wrap already signed payments in one `payMultiple` call.
    ///
    /// Entries may come from different senders; each must carry a signature
    /// that recovers to its own sender.
    pub async fn build_pay_multiple(
        &self,
        payments: &[SignablePayment],
    ) -> SdkResult<TransactionEnvelope> {
        if let Some(bad) = payments.iter().position(|p| !p.verify()) {
            return Err(SdkError::Validation(format!(
                "payMultiple entry {} is not signed by its sender",
                bad
            )));
        }
        let call = pay_multiple_call(payments)?;
        self.client
            .plain_envelope(self.client.evvm_address(), &call)
            .await
    }

    pub async fn pay_multiple(&self, payments: &[SignablePayment]) -> SdkResult<B256> {
        let mut envelope = self.build_pay_multiple(payments).await?;
        self.client.submit(&mut envelope).await
    }

    /// Dry-run `payMultiple` to see which entries would succeed.
    pub async fn simulate_pay_multiple(
        &self,
        payments: &[SignablePayment],
    ) -> SdkResult<BatchOutcome> {
        let call = pay_multiple_call(payments)?;
        let ret = self
            .client
            .simulate(self.client.evvm_address(), &call)
            .await?;
        Ok(BatchOutcome {
            successful: ret.successfulTransactions,
            failed: ret.failedTransactions,
            results: ret.results,
        })
    }

    // ── Plain transactions ───────────────────────────────────────────────

    /// Credit test tokens through the faucet.
    pub async fn add_balance(&self, request: &FaucetRequest) -> SdkResult<B256> {
        let call = request.to_call()?;
        let mut envelope = self
            .client
            .plain_envelope(self.client.evvm_address(), &call)
            .await?;
        self.client.submit(&mut envelope).await
    }

    /// Change the instance id. Admin only on the contract side.
    pub async fn set_evvm_id(&self, new_id: U256) -> SdkResult<B256> {
        let call = IEvvm::setEvvmIDCall { newEvvmID: new_id };
        let mut envelope = self
            .client
            .plain_envelope(self.client.evvm_address(), &call)
            .await?;
        let tx_hash = self.client.submit(&mut envelope).await?;
        *self.client.evvm_id.write().await = Some(new_id);
        Ok(tx_hash)
    }

    // ── Reads ────────────────────────────────────────────────────────────

    pub async fn balance(&self, user: Address, token: Address) -> SdkResult<U256> {
        let ret = self
            .client
            .read(self.client.evvm_address(), IEvvm::getBalanceCall { user, token })
            .await?;
        Ok(ret._0)
    }

    pub async fn next_sync_nonce(&self, user: Address) -> SdkResult<U256> {
        let ret = self
            .client
            .read(
                self.client.evvm_address(),
                IEvvm::getNextCurrentSyncNonceCall { user },
            )
            .await?;
        Ok(ret._0)
    }

    pub async fn is_async_nonce_used(&self, user: Address, nonce: U256) -> SdkResult<bool> {
        let ret = self
            .client
            .read(
                self.client.evvm_address(),
                IEvvm::getIfUsedAsyncNonceCall { user, nonce },
            )
            .await?;
        Ok(ret._0)
    }

    /// Principal tokens paid per reward unit.
    pub async fn reward_amount(&self) -> SdkResult<U256> {
        let ret = self
            .client
            .read(self.client.evvm_address(), IEvvm::getRewardAmountCall {})
            .await?;
        Ok(ret._0)
    }
}
