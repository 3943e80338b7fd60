//! Client configuration.
//!
//! Every field has a default pointing at the public Sepolia deployment, so a
//! config file only needs the values it overrides:
//!
//! ```json
//! {
//!   "rpc_url": "http://127.0.0.1:8545",
//!   "evvm_id": 7,
//!   "contracts": { "evvm": "0x5FbDB2315678afecb367f032d93F642f64180aa3" }
//! }
//! ```

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{SdkError, SdkResult};
use crate::network;
use crate::provider::AccountRetry;
use crate::rpc::RetryConfig;

/// Contract addresses. `None` means "discover from the EVVM contract" for the
/// name service and staking contract, and "not configured" for the others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractAddresses {
    pub evvm: Address,
    pub name_service: Option<Address>,
    pub staking: Option<Address>,
    pub p2p_swap: Option<Address>,
    pub sensor_service: Option<Address>,
    pub registry: Address,
}

impl Default for ContractAddresses {
    fn default() -> Self {
        Self {
            evvm: network::EVVM_ADDRESS,
            name_service: Some(network::NAME_SERVICE_ADDRESS),
            staking: None,
            p2p_swap: None,
            sensor_service: Some(network::SENSOR_SERVICE_ADDRESS),
            registry: network::REGISTRY_ADDRESS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvvmConfig {
    pub rpc_url: String,
    pub chain_id: u64,
    /// `None` reads `getEvvmID()` on first use.
    pub evvm_id: Option<u64>,
    pub contracts: ContractAddresses,
    pub account_retry: AccountRetry,
    pub rpc_retry: RetryConfig,
}

impl Default for EvvmConfig {
    fn default() -> Self {
        Self {
            rpc_url: network::DEFAULT_RPC_URL.to_string(),
            chain_id: network::SEPOLIA_CHAIN_ID,
            evvm_id: Some(network::DEFAULT_EVVM_ID),
            contracts: ContractAddresses::default(),
            account_retry: AccountRetry::default(),
            rpc_retry: RetryConfig::idempotent(),
        }
    }
}

impl EvvmConfig {
    pub fn from_json_str(json: &str) -> SdkResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> SdkResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| SdkError::Other(format!("reading {}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "Loading EVVM config");
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> SdkResult<()> {
        if self.rpc_url.trim().is_empty() {
            return Err(SdkError::Validation("rpc_url is required".to_string()));
        }
        if self.contracts.evvm.is_zero() {
            return Err(SdkError::Validation("contracts.evvm is required".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_defaults_point_at_sepolia() {
        let config = EvvmConfig::default();
        assert_eq!(config.chain_id, 11_155_111);
        assert_eq!(config.evvm_id, Some(1074));
        assert_eq!(config.contracts.evvm, network::EVVM_ADDRESS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EvvmConfig::from_json_str(
            r#"{
                "rpc_url": "http://127.0.0.1:8545",
                "evvm_id": null,
                "contracts": { "p2p_swap": "0x00000000000000000000000000000000000000aa" },
                "account_retry": { "max_retries": 3, "delay": 50 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.rpc_url, "http://127.0.0.1:8545");
        assert_eq!(config.evvm_id, None);
        assert_eq!(config.contracts.evvm, network::EVVM_ADDRESS);
        assert!(config.contracts.p2p_swap.is_some());
        assert_eq!(config.account_retry.delay, Duration::from_millis(50));
        assert_eq!(config.rpc_retry.max_retries, 3);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(EvvmConfig::from_json_str(r#"{"rpc_url": " "}"#).is_err());
        assert!(EvvmConfig::from_json_str("not json").is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(EvvmConfig::from_file("/definitely/not/here.json").is_err());
    }
}
