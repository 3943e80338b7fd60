//! Connection capability: the wallet/RPC surface every flow runs through.
//!
//! The client never reaches for a global wallet. It is handed a
//! [`ConnectionProvider`] that can report the current account, sign a message,
//! send a transaction and run a read-only call. [`crate::rpc::JsonRpcClient`]
//! is the production implementation; tests plug in an in-memory fake.

use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

use crate::error::SdkResult;
use crate::shared::EvmSignature;

// ─── TransactionRequest ──────────────────────────────────────────────────────

/// A contract call, either simulated (`eth_call`) or sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub from: Option<Address>,
    pub to: Address,
    pub data: Bytes,
    /// Explicit gas limit; `None` lets the node estimate.
    pub gas: Option<u64>,
    pub value: U256,
}

impl TransactionRequest {
    pub fn new(to: Address, data: impl Into<Bytes>) -> Self {
        Self {
            from: None,
            to,
            data: data.into(),
            gas: None,
            value: U256::ZERO,
        }
    }

    pub fn from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    pub fn gas(mut self, gas: u64) -> Self {
        self.gas = Some(gas);
        self
    }

    pub fn value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }
}

// ─── ConnectionProvider ──────────────────────────────────────────────────────

/// Wallet and chain access injected into [`crate::EvvmClient`].
pub trait ConnectionProvider: Send + Sync {
    /// The connected account, if any.
    fn current_account(&self) -> impl Future<Output = SdkResult<Option<Address>>> + Send;

    /// EIP-191 `personal_sign` of `message` by `account`.
    fn sign_message(
        &self,
        account: Address,
        message: &str,
    ) -> impl Future<Output = SdkResult<EvmSignature>> + Send;

    /// Broadcast a transaction and return its hash.
    fn send_transaction(
        &self,
        tx: TransactionRequest,
    ) -> impl Future<Output = SdkResult<B256>> + Send;

    /// Execute a read-only call against the latest block.
    fn call(&self, tx: TransactionRequest) -> impl Future<Output = SdkResult<Bytes>> + Send;
}

// ─── Account lookup ──────────────────────────────────────────────────────────

/// Bounded polling for a wallet that is still connecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountRetry {
    /// Retries after the first lookup.
    pub max_retries: u32,
    #[serde(with = "crate::shared::serde_util::duration_ms")]
    pub delay: Duration,
}

impl Default for AccountRetry {
    fn default() -> Self {
        Self {
            max_retries: 10,
            delay: Duration::from_millis(200),
        }
    }
}

/// Look up the current account, polling while the provider has none.
///
/// A provider error counts as "not connected yet". Returns `None` once the
/// retries are exhausted.
pub async fn get_account_with_retry<P: ConnectionProvider>(
    provider: &P,
    policy: AccountRetry,
) -> Option<Address> {
    for attempt in 0..=policy.max_retries {
        match provider.current_account().await {
            Ok(Some(account)) => return Some(account),
            Ok(None) => {}
            Err(e) => tracing::debug!(attempt, error = %e, "Account lookup failed"),
        }
        if attempt < policy.max_retries {
            futures_timer::Delay::new(policy.delay).await;
        }
    }
    tracing::warn!(attempts = policy.max_retries + 1, "No account available");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SdkError;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct SlowWallet {
        calls: AtomicU32,
        ready_after: u32,
    }

    impl ConnectionProvider for SlowWallet {
        async fn current_account(&self) -> SdkResult<Option<Address>> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n == 0 {
                return Err(SdkError::Other("wallet locked".to_string()));
            }
            Ok((n >= self.ready_after).then_some(Address::repeat_byte(0x11)))
        }

        async fn sign_message(&self, _: Address, _: &str) -> SdkResult<EvmSignature> {
            Err(SdkError::Other("unused".to_string()))
        }

        async fn send_transaction(&self, _: TransactionRequest) -> SdkResult<B256> {
            Err(SdkError::Other("unused".to_string()))
        }

        async fn call(&self, _: TransactionRequest) -> SdkResult<Bytes> {
            Err(SdkError::Other("unused".to_string()))
        }
    }

    fn fast(max_retries: u32) -> AccountRetry {
        AccountRetry {
            max_retries,
            delay: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn test_account_found_after_polling() {
        let wallet = SlowWallet {
            calls: AtomicU32::new(0),
            ready_after: 3,
        };
        let account = get_account_with_retry(&wallet, fast(10)).await;
        assert_eq!(account, Some(Address::repeat_byte(0x11)));
        assert_eq!(wallet.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_account_lookup_gives_up() {
        let wallet = SlowWallet {
            calls: AtomicU32::new(0),
            ready_after: u32::MAX,
        };
        assert_eq!(get_account_with_retry(&wallet, fast(2)).await, None);
        assert_eq!(wallet.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_default_account_retry() {
        let retry = AccountRetry::default();
        assert_eq!(retry.max_retries, 10);
        assert_eq!(retry.delay, Duration::from_millis(200));
    }

    #[test]
    fn test_transaction_request_builder() {
        let tx = TransactionRequest::new(Address::ZERO, vec![1u8, 2])
            .from(Address::repeat_byte(1))
            .gas(1_500_000);
        assert_eq!(tx.gas, Some(1_500_000));
        assert_eq!(tx.data.len(), 2);
        assert_eq!(tx.value, U256::ZERO);
    }
}
