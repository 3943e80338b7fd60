//! Retry policies for JSON-RPC requests.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::RpcError;
use crate::shared::serde_util::duration_ms;

/// Retry policy for one RPC method.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    /// No retries. Used for `eth_sendTransaction` and `personal_sign`: a
    /// resent transaction could land twice.
    #[default]
    None,
    /// Retry transport failures, rate limits and 502/503/504. Used for reads.
    Idempotent,
    /// User-provided retry logic.
    Custom(RetryConfig),
}

/// Backoff settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Retries after the initial request.
    pub max_retries: u32,
    #[serde(with = "duration_ms")]
    pub initial_delay: Duration,
    #[serde(with = "duration_ms")]
    pub max_delay: Duration,
    pub backoff_factor: f64,
    pub jitter: bool,
    /// HTTP statuses that trigger a retry.
    pub retryable_statuses: Vec<u16>,
    /// JSON-RPC error codes that trigger a retry (node overload, missing state).
    pub retryable_codes: Vec<i64>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::idempotent()
    }
}

impl RetryConfig {
    pub fn idempotent() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(10),
            backoff_factor: 2.0,
            jitter: true,
            retryable_statuses: vec![429, 502, 503, 504],
            retryable_codes: vec![-32005, -32603],
        }
    }

    /// Delay before retry number `attempt` (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base =
            self.initial_delay.as_millis() as f64 * self.backoff_factor.powi(attempt as i32);
        let capped = base.min(self.max_delay.as_millis() as f64);

        let final_ms = if self.jitter {
            let spread = capped * 0.25;
            (capped + (rand::random::<f64>() - 0.5) * 2.0 * spread).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(final_ms as u64)
    }

    pub fn should_retry(&self, error: &RpcError) -> bool {
        match error {
            RpcError::ServerError { status, .. } => self.retryable_statuses.contains(status),
            RpcError::RateLimited { .. } | RpcError::Timeout => true,
            RpcError::Remote { code, .. } => self.retryable_codes.contains(code),
            #[cfg(feature = "http")]
            RpcError::Reqwest(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }
}
