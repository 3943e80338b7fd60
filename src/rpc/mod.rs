//! JSON-RPC transport layer: `JsonRpcClient` with per-method retry policies.

pub mod retry;
pub mod wire;

#[cfg(feature = "http")]
pub mod client;

#[cfg(feature = "http")]
pub use client::JsonRpcClient;
pub use retry::{RetryConfig, RetryPolicy};
