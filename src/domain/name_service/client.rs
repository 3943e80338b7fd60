//! Name service sub-client: usernames, offers, metadata, prices.

use alloy_primitives::{Address, B256, U256};

use crate::client::{EvvmClient, ServicePayment};
use crate::domain::name_service::abi::INameService;
use crate::domain::name_service::{
    accept_offer_call, add_custom_metadata_call, flush_custom_metadata_call, flush_username_call,
    make_offer_call, pre_registration_call, registration_call, registration_payment_amount,
    remove_custom_metadata_call, renew_call, withdraw_offer_call, AddCustomMetadata,
    FlushCustomMetadata, FlushUsername, MakeOffer, OfferResolution, PreRegistrationUsername,
    RegistrationUsername, RemoveCustomMetadata, RenewUsername, ResolveOffer,
};
use crate::envelope::TransactionEnvelope;
use crate::error::SdkResult;
use crate::payment::PaymentTerms;
use crate::provider::ConnectionProvider;
use crate::shared::PRINCIPAL_TOKEN;

/// Sub-client for the name service.
pub struct NameService<'a, P> {
    pub(crate) client: &'a EvvmClient<P>,
}

impl<'a, P: ConnectionProvider> NameService<'a, P> {
    fn payment(&self, amount: U256, terms: &PaymentTerms) -> ServicePayment {
        ServicePayment::new(PRINCIPAL_TOKEN, amount, terms)
    }

    async fn send(&self, envelope: SdkResult<TransactionEnvelope>) -> SdkResult<B256> {
        let mut envelope = envelope?;
        self.client.submit(&mut envelope).await
    }

    // ── Registration ─────────────────────────────────────────────────────

    pub async fn build_pre_registration(
        &self,
        input: PreRegistrationUsername,
        terms: &PaymentTerms,
    ) -> SdkResult<TransactionEnvelope> {
        let service = self.client.name_service_address().await?;
        self.client
            .action_envelope(service, input, self.payment(U256::ZERO, terms), pre_registration_call)
            .await
    }

    pub async fn pre_register(
        &self,
        input: PreRegistrationUsername,
        terms: &PaymentTerms,
    ) -> SdkResult<B256> {
        self.send(self.build_pre_registration(input, terms).await)
            .await
    }

    /// Pays `reward × 100`. A failed reward read pays zero instead of aborting.
    pub async fn build_registration(
        &self,
        input: RegistrationUsername,
        terms: &PaymentTerms,
    ) -> SdkResult<TransactionEnvelope> {
        let service = self.client.name_service_address().await?;
        let reward = match self.client.payments().reward_amount().await {
            Ok(reward) => Some(reward),
            Err(e) => {
                tracing::warn!(error = %e, "Reward amount unavailable, registering with a zero payment");
                None
            }
        };
        let amount = registration_payment_amount(reward)?;
        self.client
            .action_envelope(service, input, self.payment(amount, terms), registration_call)
            .await
    }

    pub async fn register(
        &self,
        input: RegistrationUsername,
        terms: &PaymentTerms,
    ) -> SdkResult<B256> {
        self.send(self.build_registration(input, terms).await).await
    }

    // ── Offers ───────────────────────────────────────────────────────────

    /// The payment escrows the offered amount.
    pub async fn build_make_offer(
        &self,
        input: MakeOffer,
        terms: &PaymentTerms,
    ) -> SdkResult<TransactionEnvelope> {
        let service = self.client.name_service_address().await?;
        let amount = input.amount;
        self.client
            .action_envelope(service, input, self.payment(amount, terms), make_offer_call)
            .await
    }

    pub async fn make_offer(&self, input: MakeOffer, terms: &PaymentTerms) -> SdkResult<B256> {
        self.send(self.build_make_offer(input, terms).await).await
    }

    /// Withdraw or accept, depending on `input.resolution`.
    pub async fn build_resolve_offer(
        &self,
        input: ResolveOffer,
        terms: &PaymentTerms,
    ) -> SdkResult<TransactionEnvelope> {
        let service = self.client.name_service_address().await?;
        let payment = self.payment(U256::ZERO, terms);
        match input.resolution {
            OfferResolution::Withdraw => {
                self.client
                    .action_envelope(service, input, payment, withdraw_offer_call)
                    .await
            }
            OfferResolution::Accept => {
                self.client
                    .action_envelope(service, input, payment, accept_offer_call)
                    .await
            }
        }
    }

    pub async fn resolve_offer(&self, input: ResolveOffer, terms: &PaymentTerms) -> SdkResult<B256> {
        self.send(self.build_resolve_offer(input, terms).await)
            .await
    }

    // ── Identity maintenance ─────────────────────────────────────────────

    pub async fn build_renew(
        &self,
        input: RenewUsername,
        terms: &PaymentTerms,
    ) -> SdkResult<TransactionEnvelope> {
        let service = self.client.name_service_address().await?;
        let price = self.renewal_price(&input.username).await?;
        self.client
            .action_envelope(service, input, self.payment(price, terms), renew_call)
            .await
    }

    pub async fn renew(&self, input: RenewUsername, terms: &PaymentTerms) -> SdkResult<B256> {
        self.send(self.build_renew(input, terms).await).await
    }

    pub async fn build_add_custom_metadata(
        &self,
        input: AddCustomMetadata,
        terms: &PaymentTerms,
    ) -> SdkResult<TransactionEnvelope> {
        let service = self.client.name_service_address().await?;
        let price = self.add_metadata_price().await?;
        self.client
            .action_envelope(
                service,
                input,
                self.payment(price, terms),
                add_custom_metadata_call,
            )
            .await
    }

    pub async fn add_custom_metadata(
        &self,
        input: AddCustomMetadata,
        terms: &PaymentTerms,
    ) -> SdkResult<B256> {
        self.send(self.build_add_custom_metadata(input, terms).await)
            .await
    }

    pub async fn build_remove_custom_metadata(
        &self,
        input: RemoveCustomMetadata,
        terms: &PaymentTerms,
    ) -> SdkResult<TransactionEnvelope> {
        let service = self.client.name_service_address().await?;
        let price = self.remove_metadata_price().await?;
        self.client
            .action_envelope(
                service,
                input,
                self.payment(price, terms),
                remove_custom_metadata_call,
            )
            .await
    }

    pub async fn remove_custom_metadata(
        &self,
        input: RemoveCustomMetadata,
        terms: &PaymentTerms,
    ) -> SdkResult<B256> {
        self.send(self.build_remove_custom_metadata(input, terms).await)
            .await
    }

    pub async fn build_flush_custom_metadata(
        &self,
        input: FlushCustomMetadata,
        terms: &PaymentTerms,
    ) -> SdkResult<TransactionEnvelope> {
        let service = self.client.name_service_address().await?;
        let price = self.flush_metadata_price(&input.identity).await?;
        self.client
            .action_envelope(
                service,
                input,
                self.payment(price, terms),
                flush_custom_metadata_call,
            )
            .await
    }

    pub async fn flush_custom_metadata(
        &self,
        input: FlushCustomMetadata,
        terms: &PaymentTerms,
    ) -> SdkResult<B256> {
        self.send(self.build_flush_custom_metadata(input, terms).await)
            .await
    }

    pub async fn build_flush_username(
        &self,
        input: FlushUsername,
        terms: &PaymentTerms,
    ) -> SdkResult<TransactionEnvelope> {
        let service = self.client.name_service_address().await?;
        let price = self.flush_username_price(&input.username).await?;
        self.client
            .action_envelope(service, input, self.payment(price, terms), flush_username_call)
            .await
    }

    pub async fn flush_username(&self, input: FlushUsername, terms: &PaymentTerms) -> SdkResult<B256> {
        self.send(self.build_flush_username(input, terms).await)
            .await
    }

    // ── Reads ────────────────────────────────────────────────────────────

    pub async fn is_username_available(&self, username: &str) -> SdkResult<bool> {
        let service = self.client.name_service_address().await?;
        let call = INameService::isUsernameAvailableCall {
            username: username.to_string(),
        };
        Ok(self.client.read(service, call).await?._0)
    }

    pub async fn registration_price(&self, username: &str) -> SdkResult<U256> {
        let service = self.client.name_service_address().await?;
        let call = INameService::getPriceOfRegistrationCall {
            username: username.to_string(),
        };
        Ok(self.client.read(service, call).await?._0)
    }

    pub async fn renewal_price(&self, username: &str) -> SdkResult<U256> {
        let service = self.client.name_service_address().await?;
        let call = INameService::seePriceToRenewCall {
            username: username.to_string(),
        };
        Ok(self.client.read(service, call).await?._0)
    }

    pub async fn add_metadata_price(&self) -> SdkResult<U256> {
        let service = self.client.name_service_address().await?;
        let call = INameService::getPriceToAddCustomMetadataCall {};
        Ok(self.client.read(service, call).await?._0)
    }

    pub async fn remove_metadata_price(&self) -> SdkResult<U256> {
        let service = self.client.name_service_address().await?;
        let call = INameService::getPriceToRemoveCustomMetadataCall {};
        Ok(self.client.read(service, call).await?._0)
    }

    pub async fn flush_metadata_price(&self, identity: &str) -> SdkResult<U256> {
        let service = self.client.name_service_address().await?;
        let call = INameService::getPriceToFlushCustomMetadataCall {
            identity: identity.to_string(),
        };
        Ok(self.client.read(service, call).await?._0)
    }

    pub async fn flush_username_price(&self, username: &str) -> SdkResult<U256> {
        let service = self.client.name_service_address().await?;
        let call = INameService::getPriceToFlushUsernameCall {
            identity: username.to_string(),
        };
        Ok(self.client.read(service, call).await?._0)
    }

    pub async fn owner_of(&self, identity: &str) -> SdkResult<Address> {
        let service = self.client.name_service_address().await?;
        let call = INameService::getOwnerOfIdentityCall {
            username: identity.to_string(),
        };
        Ok(self.client.read(service, call).await?._0)
    }

    /// The EVVM contract this name service charges through.
    pub async fn evvm_address(&self) -> SdkResult<Address> {
        let service = self.client.name_service_address().await?;
        let call = INameService::getEvvmAddressCall {};
        Ok(self.client.read(service, call).await?._0)
    }
}
