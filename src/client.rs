//! High-level client: `EvvmClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`. This
//! module keeps the builder, the contract-discovery cache, and the shared
//! sign/read/submit plumbing every sub-client uses.

use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::SolCall;
use async_lock::RwLock;
use std::sync::Arc;

use crate::action::{ActionPayload, SignableAction};
use crate::config::EvvmConfig;
use crate::domain::evvm::abi::IEvvm;
use crate::domain::evvm::client::Payments;
use crate::domain::name_service::client::NameService;
use crate::domain::p2p_swap::client::P2PSwap;
use crate::domain::registry::client::Registry;
use crate::domain::sensor::client::Sensors;
use crate::domain::staking::client::Staking;
use crate::envelope::{self, function_name, EnvelopeLifecycle, SignedPart, TransactionEnvelope};
use crate::error::{SdkError, SdkResult, SignerError};
use crate::payment::{PaymentParams, PaymentTerms, SignablePayment};
use crate::provider::{get_account_with_retry, ConnectionProvider, TransactionRequest};
use crate::shared::{random_async_nonce, EvmSignature, Priority, Recipient};
use crate::signer::recover_signer;

// Re-export sub-client types for convenience.
pub use crate::domain::evvm::client::Payments as PaymentsClient;
pub use crate::domain::name_service::client::NameService as NameServiceClient;
pub use crate::domain::p2p_swap::client::P2PSwap as P2PSwapClient;
pub use crate::domain::registry::client::Registry as RegistryClient;
pub use crate::domain::sensor::client::Sensors as SensorsClient;
pub use crate::domain::staking::client::Staking as StakingClient;

/// The primary entry point.
///
/// Provides nested sub-client accessors for each contract:
/// `client.payments()`, `client.name_service()`, etc.
pub struct EvvmClient<P> {
    pub(crate) provider: Arc<P>,
    pub(crate) config: EvvmConfig,
    /// Discovered EVVM instance id.
    pub(crate) evvm_id: Arc<RwLock<Option<U256>>>,
    /// Discovered name-service address.
    pub(crate) name_service: Arc<RwLock<Option<Address>>>,
    /// Discovered staking address.
    pub(crate) staking: Arc<RwLock<Option<Address>>>,
}

impl<P> Clone for EvvmClient<P> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            config: self.config.clone(),
            evvm_id: self.evvm_id.clone(),
            name_service: self.name_service.clone(),
            staking: self.staking.clone(),
        }
    }
}

impl<P: ConnectionProvider> EvvmClient<P> {
    pub fn builder(provider: P) -> EvvmClientBuilder<P> {
        EvvmClientBuilder::new(provider)
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn payments(&self) -> Payments<'_, P> {
        Payments { client: self }
    }

    pub fn name_service(&self) -> NameService<'_, P> {
        NameService { client: self }
    }

    pub fn staking(&self) -> Staking<'_, P> {
        Staking { client: self }
    }

    pub fn p2p_swap(&self) -> P2PSwap<'_, P> {
        P2PSwap { client: self }
    }

    pub fn sensors(&self) -> Sensors<'_, P> {
        Sensors { client: self }
    }

    pub fn registry(&self) -> Registry<'_, P> {
        Registry { client: self }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &EvvmConfig {
        &self.config
    }

    // ── Discovery ────────────────────────────────────────────────────────

    /// The connected account, polling briefly while the wallet connects.
    pub async fn account(&self) -> SdkResult<Address> {
        get_account_with_retry(self.provider.as_ref(), self.config.account_retry)
            .await
            .ok_or(SdkError::Signer(SignerError::NoAccount))
    }

    pub fn evvm_address(&self) -> Address {
        self.config.contracts.evvm
    }

    /// EVVM instance id: configured, or read once from the EVVM contract.
    pub async fn evvm_id(&self) -> SdkResult<U256> {
        if let Some(id) = *self.evvm_id.read().await {
            return Ok(id);
        }
        let id = self
            .read(self.evvm_address(), IEvvm::getEvvmIDCall {})
            .await?
            ._0;
        tracing::debug!(evvm_id = %id, "Discovered EVVM id");
        *self.evvm_id.write().await = Some(id);
        Ok(id)
    }

    pub async fn name_service_address(&self) -> SdkResult<Address> {
        if let Some(addr) = *self.name_service.read().await {
            return Ok(addr);
        }
        let addr = self
            .read(self.evvm_address(), IEvvm::getNameServiceAddressCall {})
            .await?
            ._0;
        let addr = non_zero(addr, "getNameServiceAddress")?;
        *self.name_service.write().await = Some(addr);
        Ok(addr)
    }

    pub async fn staking_address(&self) -> SdkResult<Address> {
        if let Some(addr) = *self.staking.read().await {
            return Ok(addr);
        }
        let addr = self
            .read(self.evvm_address(), IEvvm::getStakingContractAddressCall {})
            .await?
            ._0;
        let addr = non_zero(addr, "getStakingContractAddress")?;
        *self.staking.write().await = Some(addr);
        Ok(addr)
    }

    pub fn p2p_swap_address(&self) -> SdkResult<Address> {
        self.config
            .contracts
            .p2p_swap
            .ok_or_else(|| SdkError::Validation("P2P swap address is not configured".to_string()))
    }

    pub fn sensor_service_address(&self) -> SdkResult<Address> {
        self.config.contracts.sensor_service.ok_or_else(|| {
            SdkError::Validation("sensor service address is not configured".to_string())
        })
    }

    /// Forget discovered ids and addresses.
    pub async fn clear_cache(&self) {
        *self.evvm_id.write().await = self.config.evvm_id.map(U256::from);
        *self.name_service.write().await = self.config.contracts.name_service;
        *self.staking.write().await = self.config.contracts.staking;
    }

    // ── Reads ────────────────────────────────────────────────────────────

    /// `eth_call` `call` on `target` and decode its return values.
    pub async fn read<C: SolCall>(&self, target: Address, call: C) -> SdkResult<C::Return> {
        self.call_decoded::<C>(TransactionRequest::new(target, call.abi_encode()))
            .await
    }

    /// Dry-run a state-changing call as the connected account.
    pub async fn simulate<C: SolCall>(&self, target: Address, call: &C) -> SdkResult<C::Return> {
        let account = self.account().await?;
        self.call_decoded::<C>(TransactionRequest::new(target, call.abi_encode()).from(account))
            .await
    }

    async fn call_decoded<C: SolCall>(&self, request: TransactionRequest) -> SdkResult<C::Return> {
        let function = function_name::<C>();
        let data = self
            .provider
            .call(request)
            .await
            .map_err(|e| SdkError::read(function, e))?;
        if data.is_empty() {
            return Err(SdkError::read(function, "empty return data"));
        }
        C::abi_decode_returns(&data, true).map_err(|e| SdkError::read(function, e))
    }

    // ── Signing ──────────────────────────────────────────────────────────

    /// Ask the provider to sign `message` as `account` and check the result.
    pub async fn sign_message(&self, account: Address, message: &str) -> SdkResult<EvmSignature> {
        let signature = self.provider.sign_message(account, message).await?;
        let recovered = recover_signer(message, &signature)?;
        if recovered != account {
            return Err(SignerError::InvalidSignature(format!(
                "signature recovers to {}, expected {}",
                recovered, account
            ))
            .into());
        }
        Ok(signature)
    }

    pub async fn sign_action<A: ActionPayload>(
        &self,
        actor: Address,
        evvm_id: U256,
        payload: A,
    ) -> SdkResult<SignableAction<A>> {
        payload.validate()?;
        let mut action = SignableAction::new(actor, evvm_id, payload);
        let signature = self.sign_message(actor, &action.message()).await?;
        action.apply_signature(signature);
        Ok(action)
    }

    pub async fn sign_payment(
        &self,
        from: Address,
        evvm_id: U256,
        params: PaymentParams,
    ) -> SdkResult<SignablePayment> {
        params.validate()?;
        let mut payment = SignablePayment::new(from, evvm_id, params);
        let signature = self.sign_message(from, &payment.message()).await?;
        payment.apply_signature(signature);
        Ok(payment)
    }

    /// Pick the payment nonce: the explicit one, else the account's next sync
    /// nonce, else a random async nonce.
    pub async fn resolve_payment_nonce(
        &self,
        account: Address,
        terms: &PaymentTerms,
    ) -> SdkResult<U256> {
        if let Some(nonce) = terms.nonce {
            return Ok(nonce);
        }
        match terms.priority {
            Priority::Sync => Ok(self
                .read(
                    self.evvm_address(),
                    IEvvm::getNextCurrentSyncNonceCall { user: account },
                )
                .await?
                ._0),
            Priority::Async => Ok(random_async_nonce()),
        }
    }

    /// Sign the payment that pays `service` for an action: the service is both
    /// recipient and executor.
    pub(crate) async fn sign_service_payment(
        &self,
        account: Address,
        evvm_id: U256,
        service: Address,
        token: Address,
        amount: U256,
        terms: &PaymentTerms,
    ) -> SdkResult<SignablePayment> {
        let nonce = self.resolve_payment_nonce(account, terms).await?;
        let params = PaymentParams {
            recipient: Recipient::Address(service),
            token,
            amount,
            priority_fee: terms.priority_fee,
            nonce,
            priority: terms.priority,
            executor: service,
        };
        self.sign_payment(account, evvm_id, params).await
    }

    /// Validate, sign the action, sign its payment, and assemble the call.
    pub(crate) async fn action_envelope<A, C, F>(
        &self,
        service: Address,
        payload: A,
        payment: ServicePayment,
        make_call: F,
    ) -> SdkResult<TransactionEnvelope>
    where
        A: ActionPayload,
        C: SolCall,
        F: FnOnce(&SignableAction<A>, &SignablePayment) -> SdkResult<C>,
    {
        payload.validate()?;
        let account = self.account().await?;
        let evvm_id = self.evvm_id().await?;

        let mut lifecycle = EnvelopeLifecycle::new();
        lifecycle.begin_signing()?;
        let action = self.sign_action(account, evvm_id, payload).await?;
        let payment = self
            .sign_service_payment(
                account,
                evvm_id,
                service,
                payment.token,
                payment.amount,
                &payment.terms,
            )
            .await?;

        let call = make_call(&action, &payment)?;
        let parts: [&dyn SignedPart; 2] = [&action, &payment];
        TransactionEnvelope::assemble_signed(lifecycle, service, account, &parts, &call)
    }

    // ── Submission ───────────────────────────────────────────────────────

    /// Submit a signed envelope exactly once.
    pub async fn submit(&self, envelope: &mut TransactionEnvelope) -> SdkResult<B256> {
        envelope::submit(self.provider.as_ref(), envelope).await
    }

    /// Build a plain (signature-free) envelope from the current account.
    pub(crate) async fn plain_envelope<C: SolCall>(
        &self,
        target: Address,
        call: &C,
    ) -> SdkResult<TransactionEnvelope> {
        let account = self.account().await?;
        TransactionEnvelope::plain(target, account, call)
    }
}

/// What an action pays and how.
#[derive(Debug, Clone)]
pub(crate) struct ServicePayment {
    pub token: Address,
    pub amount: U256,
    pub terms: PaymentTerms,
}

impl ServicePayment {
    pub fn new(token: Address, amount: U256, terms: &PaymentTerms) -> Self {
        Self {
            token,
            amount,
            terms: terms.clone(),
        }
    }
}

fn non_zero(addr: Address, function: &str) -> SdkResult<Address> {
    if addr.is_zero() {
        return Err(SdkError::read(function, "returned the zero address"));
    }
    Ok(addr)
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct EvvmClientBuilder<P> {
    provider: P,
    config: EvvmConfig,
}

impl<P: ConnectionProvider> EvvmClientBuilder<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            config: EvvmConfig::default(),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: EvvmConfig) -> Self {
        self.config = config;
        self
    }

    pub fn evvm_id(mut self, id: u64) -> Self {
        self.config.evvm_id = Some(id);
        self
    }

    /// Read the id from the EVVM contract on first use.
    pub fn discover_evvm_id(mut self) -> Self {
        self.config.evvm_id = None;
        self
    }

    pub fn evvm_address(mut self, address: Address) -> Self {
        self.config.contracts.evvm = address;
        self
    }

    pub fn name_service_address(mut self, address: Address) -> Self {
        self.config.contracts.name_service = Some(address);
        self
    }

    pub fn staking_address(mut self, address: Address) -> Self {
        self.config.contracts.staking = Some(address);
        self
    }

    pub fn p2p_swap_address(mut self, address: Address) -> Self {
        self.config.contracts.p2p_swap = Some(address);
        self
    }

    pub fn sensor_service_address(mut self, address: Address) -> Self {
        self.config.contracts.sensor_service = Some(address);
        self
    }

    pub fn registry_address(mut self, address: Address) -> Self {
        self.config.contracts.registry = address;
        self
    }

    pub fn account_retry(mut self, retry: crate::provider::AccountRetry) -> Self {
        self.config.account_retry = retry;
        self
    }

    pub fn build(self) -> SdkResult<EvvmClient<P>> {
        self.config.validate()?;
        Ok(EvvmClient {
            provider: Arc::new(self.provider),
            evvm_id: Arc::new(RwLock::new(self.config.evvm_id.map(U256::from))),
            name_service: Arc::new(RwLock::new(self.config.contracts.name_service)),
            staking: Arc::new(RwLock::new(self.config.contracts.staking)),
            config: self.config,
        })
    }
}

#[cfg(feature = "http")]
impl EvvmClient<crate::rpc::JsonRpcClient> {
    /// A client over JSON-RPC using `config.rpc_url` and `config.rpc_retry`.
    pub fn from_config(config: EvvmConfig) -> SdkResult<Self> {
        let rpc = crate::rpc::JsonRpcClient::new(&config.rpc_url)?
            .with_read_retry(config.rpc_retry.clone());
        EvvmClientBuilder::new(rpc).config(config).build()
    }

    /// Same, signing with a local key instead of a node-managed account.
    pub fn from_config_with_signer(
        config: EvvmConfig,
        signer: crate::signer::LocalSigner,
    ) -> SdkResult<Self> {
        let rpc = crate::rpc::JsonRpcClient::new(&config.rpc_url)?
            .with_read_retry(config.rpc_retry.clone())
            .with_signer(signer);
        EvvmClientBuilder::new(rpc).config(config).build()
    }
}
