//! EVVM registry: assigns instance ids to EVVM deployments.
//!
//! The registry lives on Sepolia whatever chain the registered EVVM runs on.

pub mod abi;
pub mod client;

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

use crate::error::{SdkError, SdkResult};
use crate::shared::require_address;
use abi::IRegistryEvvm;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterEvvm {
    /// Chain the EVVM contract is deployed on.
    pub chain_id: u64,
    pub evvm_address: Address,
}

impl RegisterEvvm {
    pub fn new(chain_id: u64, evvm_address: Address) -> Self {
        Self {
            chain_id,
            evvm_address,
        }
    }

    pub fn validate(&self) -> SdkResult<()> {
        if self.chain_id == 0 {
            return Err(SdkError::Validation("chain id is required".to_string()));
        }
        require_address("EVVM address", &self.evvm_address)
    }

    pub fn to_call(&self) -> SdkResult<IRegistryEvvm::registerEvvmCall> {
        self.validate()?;
        Ok(IRegistryEvvm::registerEvvmCall {
            chainId: U256::from(self.chain_id),
            evvmAddress: self.evvm_address,
        })
    }
}

/// Result of a registration: the id the simulation returned and the sent transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub evvm_id: U256,
    pub tx_hash: B256,
}
