//! Unified SDK error types.

use thiserror::Error;

use crate::envelope::state::EnvelopeState;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    #[error("Signer error: {0}")]
    Signer(#[from] SignerError),

    #[error("Lifecycle error: {0}")]
    Lifecycle(#[from] StateError),

    /// A required input is missing, empty or malformed. Nothing was signed or sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A required on-chain read failed or returned nothing usable.
    #[error("Read of {function} failed: {reason}")]
    Read { function: String, reason: String },

    /// The contract call reverted or the provider refused the transaction.
    #[error("Submission failed: {0}")]
    Submission(String),

    #[error("ABI error: {0}")]
    Abi(#[from] alloy_sol_types::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl SdkError {
    pub(crate) fn read(function: &str, reason: impl std::fmt::Display) -> Self {
        SdkError::Read {
            function: function.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result alias used across the SDK.
pub type SdkResult<T> = Result<T, SdkError>;

/// JSON-RPC transport errors.
#[derive(Error, Debug)]
pub enum RpcError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Error object returned inside a JSON-RPC response.
    #[error("RPC error {code}: {message}")]
    Remote { code: i64, message: String },

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

/// Signing errors.
#[derive(Error, Debug)]
pub enum SignerError {
    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    /// The wallet declined or failed to produce a signature.
    #[error("Signing rejected: {0}")]
    Rejected(String),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("No account available")]
    NoAccount,
}

/// Envelope lifecycle violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("Invalid transition {from} -> {to}")]
    InvalidTransition { from: EnvelopeState, to: EnvelopeState },

    #[error("Envelope already {0}")]
    Terminal(EnvelopeState),
}
