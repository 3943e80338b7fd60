//! `JsonRpcClient`: a [`ConnectionProvider`] over Ethereum JSON-RPC.
//!
//! Reads (`eth_call`, `eth_chainId`, `eth_accounts`) retry with the
//! idempotent policy. `eth_sendTransaction` and `personal_sign` never retry.
//! When a [`LocalSigner`] is attached, messages for its address are signed
//! in-process and its address is reported as the current account.

use alloy_primitives::{Address, Bytes, B256};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::{RpcError, SdkError, SdkResult, SignerError};
use crate::provider::{ConnectionProvider, TransactionRequest};
use crate::rpc::retry::{RetryConfig, RetryPolicy};
use crate::rpc::wire::{parse_quantity, CallObject, JsonRpcRequest, JsonRpcResponse};
use crate::shared::EvmSignature;
use crate::signer::LocalSigner;

/// JSON-RPC connection to one node.
#[derive(Clone)]
pub struct JsonRpcClient {
    url: String,
    client: Client,
    next_id: Arc<AtomicU64>,
    signer: Option<Arc<LocalSigner>>,
    read_retry: RetryPolicy,
}

impl JsonRpcClient {
    pub fn new(url: &str) -> SdkResult<Self> {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder
                .timeout(Duration::from_secs(30))
                .pool_max_idle_per_host(10);
        }

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            client: builder.build().map_err(RpcError::from)?,
            next_id: Arc::new(AtomicU64::new(1)),
            signer: None,
            read_retry: RetryPolicy::Idempotent,
        })
    }

    /// Sign messages in-process with `signer`.
    pub fn with_signer(mut self, signer: LocalSigner) -> Self {
        self.signer = Some(Arc::new(signer));
        self
    }

    /// Override the retry policy used for reads.
    pub fn with_read_retry(mut self, config: RetryConfig) -> Self {
        self.read_retry = RetryPolicy::Custom(config);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    // ── Methods ──────────────────────────────────────────────────────────

    pub async fn accounts(&self) -> Result<Vec<Address>, RpcError> {
        self.request("eth_accounts", (), self.read_retry.clone()).await
    }

    pub async fn chain_id(&self) -> Result<u64, RpcError> {
        let hex: String = self
            .request("eth_chainId", (), self.read_retry.clone())
            .await?;
        parse_quantity(&hex)
    }

    pub async fn eth_call(&self, tx: &TransactionRequest) -> Result<Bytes, RpcError> {
        self.request(
            "eth_call",
            (CallObject::from(tx), "latest"),
            self.read_retry.clone(),
        )
        .await
    }

    pub async fn send_call(&self, tx: &TransactionRequest) -> Result<B256, RpcError> {
        self.request("eth_sendTransaction", [CallObject::from(tx)], RetryPolicy::None)
            .await
    }

    pub async fn personal_sign(
        &self,
        account: Address,
        message: &str,
    ) -> Result<EvmSignature, SdkError> {
        let hex_message = format!("0x{}", hex::encode(message.as_bytes()));
        let raw: String = self
            .request("personal_sign", (hex_message, account), RetryPolicy::None)
            .await
            .map_err(|e| SignerError::Rejected(e.to_string()))?;
        raw.parse()
    }

    // ── Internal ─────────────────────────────────────────────────────────

    async fn request<T: DeserializeOwned, P: Serialize>(
        &self,
        method: &str,
        params: P,
        retry: RetryPolicy,
    ) -> Result<T, RpcError> {
        let config = match &retry {
            RetryPolicy::None => return self.do_request(method, &params).await,
            RetryPolicy::Idempotent => RetryConfig::idempotent(),
            RetryPolicy::Custom(c) => c.clone(),
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match self.do_request::<T, P>(method, &params).await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    if let RpcError::RateLimited {
                        retry_after_ms: Some(ms),
                    } = &e
                    {
                        futures_timer::Delay::new(Duration::from_millis(*ms)).await;
                    }

                    if config.should_retry(&e) && attempt < config.max_retries {
                        let delay = config.delay_for_attempt(attempt);
                        tracing::debug!(
                            attempt = attempt + 1,
                            max = config.max_retries,
                            delay_ms = delay.as_millis() as u64,
                            "Retrying {} on {}",
                            method,
                            self.url
                        );
                        futures_timer::Delay::new(delay).await;
                        last_error = Some(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(RpcError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_request<T: DeserializeOwned, P: Serialize>(
        &self,
        method: &str,
        params: &P,
    ) -> Result<T, RpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = JsonRpcRequest::new(id, method, params);

        let resp = self.client.post(&self.url).json(&body).send().await?;
        let status = resp.status();

        if status.is_success() {
            let parsed = resp.json::<JsonRpcResponse<T>>().await?;
            return parsed.into_result();
        }

        let status_code = status.as_u16();
        let retry_after_ms = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .map(|secs| secs * 1000);
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            429 => Err(RpcError::RateLimited { retry_after_ms }),
            408 | 504 if body_text.is_empty() => Err(RpcError::Timeout),
            _ => Err(RpcError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

impl std::fmt::Debug for JsonRpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonRpcClient")
            .field("url", &self.url)
            .field("signer", &self.signer.as_ref().map(|s| s.address()))
            .finish()
    }
}

impl ConnectionProvider for JsonRpcClient {
    async fn current_account(&self) -> SdkResult<Option<Address>> {
        if let Some(signer) = &self.signer {
            return Ok(Some(signer.address()));
        }
        Ok(self.accounts().await?.into_iter().next())
    }

    async fn sign_message(&self, account: Address, message: &str) -> SdkResult<EvmSignature> {
        match &self.signer {
            Some(signer) if signer.address() == account => Ok(signer.sign_message(message)?),
            _ => self.personal_sign(account, message).await,
        }
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> SdkResult<B256> {
        Ok(self.send_call(&tx).await?)
    }

    async fn call(&self, tx: TransactionRequest) -> SdkResult<Bytes> {
        Ok(self.eth_call(&tx).await?)
    }
}
