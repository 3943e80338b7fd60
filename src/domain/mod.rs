//! Domain modules organized as vertical slices, one per contract.
//!
//! Each sub-module contains:
//! - `mod.rs`: Typed inputs, action schemas, pricing policy, call builders
//! - `abi.rs`: `sol!` bindings for the contract
//! - `client.rs`: Sub-client that signs, assembles and submits

pub mod evvm;
pub mod name_service;
pub mod p2p_swap;
pub mod registry;
pub mod sensor;
pub mod staking;

use alloy_primitives::{Bytes, U256};

use crate::error::SdkResult;
use crate::payment::SignablePayment;

/// The `priorityFee_EVVM, nonce_EVVM, priorityFlag_EVVM, signature_EVVM`
/// arguments every service call appends for its payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EvvmPaymentArgs {
    pub priority_fee: U256,
    pub nonce: U256,
    pub priority_flag: bool,
    pub signature: Bytes,
}

impl EvvmPaymentArgs {
    pub fn from_payment(payment: &SignablePayment) -> SdkResult<Self> {
        Ok(Self {
            priority_fee: payment.params.priority_fee,
            nonce: payment.params.nonce,
            priority_flag: payment.params.priority.flag(),
            signature: payment.signature_bytes()?,
        })
    }
}
