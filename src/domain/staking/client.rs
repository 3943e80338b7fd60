//! Staking sub-client.

use alloy_primitives::{B256, U256};

use crate::client::{EvvmClient, ServicePayment};
use crate::domain::staking::{
    golden_staking_call, presale_payment_amount, presale_staking_call,
    public_service_staking_call, public_staking_call, GoldenStaking, PresaleStaking,
    PublicServiceStaking, PublicStaking,
};
use crate::envelope::{EnvelopeLifecycle, SignedPart, TransactionEnvelope};
use crate::error::SdkResult;
use crate::payment::PaymentTerms;
use crate::provider::ConnectionProvider;
use crate::shared::PRINCIPAL_TOKEN;

/// Sub-client for the staking contract.
pub struct Staking<'a, P> {
    pub(crate) client: &'a EvvmClient<P>,
}

impl<'a, P: ConnectionProvider> Staking<'a, P> {
    /// Golden staking signs only the payment, with no priority fee.
    pub async fn build_golden(
        &self,
        input: GoldenStaking,
        terms: &PaymentTerms,
    ) -> SdkResult<TransactionEnvelope> {
        input.validate()?;
        let staking = self.client.staking_address().await?;
        let account = self.client.account().await?;
        let evvm_id = self.client.evvm_id().await?;

        let terms = terms.clone().priority_fee(U256::ZERO);
        let mut lifecycle = EnvelopeLifecycle::new();
        lifecycle.begin_signing()?;
        let payment = self
            .client
            .sign_service_payment(
                account,
                evvm_id,
                staking,
                PRINCIPAL_TOKEN,
                input.payment_amount()?,
                &terms,
            )
            .await?;

        let call = golden_staking_call(&input, &payment)?;
        let parts: [&dyn SignedPart; 1] = [&payment];
        TransactionEnvelope::assemble_signed(lifecycle, staking, account, &parts, &call)
    }

    pub async fn golden(&self, input: GoldenStaking, terms: &PaymentTerms) -> SdkResult<B256> {
        let mut envelope = self.build_golden(input, terms).await?;
        self.client.submit(&mut envelope).await
    }

    pub async fn build_presale(
        &self,
        input: PresaleStaking,
        terms: &PaymentTerms,
    ) -> SdkResult<TransactionEnvelope> {
        let staking = self.client.staking_address().await?;
        let payment = ServicePayment::new(PRINCIPAL_TOKEN, presale_payment_amount(), terms);
        self.client
            .action_envelope(staking, input, payment, presale_staking_call)
            .await
    }

    pub async fn presale(&self, input: PresaleStaking, terms: &PaymentTerms) -> SdkResult<B256> {
        let mut envelope = self.build_presale(input, terms).await?;
        self.client.submit(&mut envelope).await
    }

    pub async fn build_public(
        &self,
        input: PublicStaking,
        terms: &PaymentTerms,
    ) -> SdkResult<TransactionEnvelope> {
        let staking = self.client.staking_address().await?;
        let payment = ServicePayment::new(PRINCIPAL_TOKEN, input.payment_amount()?, terms);
        self.client
            .action_envelope(staking, input, payment, public_staking_call)
            .await
    }

    pub async fn public(&self, input: PublicStaking, terms: &PaymentTerms) -> SdkResult<B256> {
        let mut envelope = self.build_public(input, terms).await?;
        self.client.submit(&mut envelope).await
    }

    pub async fn build_public_service(
        &self,
        input: PublicServiceStaking,
        terms: &PaymentTerms,
    ) -> SdkResult<TransactionEnvelope> {
        let staking = self.client.staking_address().await?;
        let payment = ServicePayment::new(PRINCIPAL_TOKEN, input.payment_amount()?, terms);
        self.client
            .action_envelope(staking, input, payment, public_service_staking_call)
            .await
    }

    pub async fn public_service(
        &self,
        input: PublicServiceStaking,
        terms: &PaymentTerms,
    ) -> SdkResult<B256> {
        let mut envelope = self.build_public_service(input, terms).await?;
        self.client.submit(&mut envelope).await
    }
}
