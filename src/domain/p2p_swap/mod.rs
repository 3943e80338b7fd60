//! Peer-to-peer swap orders.
//!
//! A maker locks `amountA` of `tokenA` asking for `amountB` of `tokenB`. A
//! taker dispatches the order by paying `amountB` plus a fee in `tokenB`.
//! Fees are 5% of `amountB` (500 basis points), optionally capped.
//!
//! The action signature covers only the order identity; amounts are bound by
//! the accompanying payment.

pub mod abi;
pub mod client;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::action::{ActionPayload, SignableAction};
use crate::domain::EvvmPaymentArgs;
use crate::error::{SdkError, SdkResult};
use crate::payment::SignablePayment;
use crate::shared::CanonicalField;
use abi::{IP2PSwap, MetadataCancelOrder, MetadataDispatchOrder, MetadataMakeOrder};

/// Gas limit for cancel and dispatch calls; node estimation undershoots them.
pub const DISPATCH_GAS_LIMIT: u64 = 1_500_000;

pub const FEE_BPS: u64 = 500;
pub const BPS_DENOMINATOR: u64 = 10_000;

/// `floor(amount × 500 / 10000)`, computed without overflowing `uint256`.
pub fn proportional_fee(amount: U256) -> U256 {
    let bps = U256::from(FEE_BPS);
    let denom = U256::from(BPS_DENOMINATOR);
    (amount / denom) * bps + (amount % denom) * bps / denom
}

/// `min(proportional_fee(amount), fee_cap)`.
pub fn fixed_fee(amount: U256, fee_cap: U256) -> U256 {
    proportional_fee(amount).min(fee_cap)
}

/// How a taker pays the order fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum DispatchFee {
    Proportional,
    /// The fee is capped at `fee_cap`, which is also sent as `amountOut`.
    Fixed { fee_cap: U256 },
}

impl DispatchFee {
    /// A fixed fee needs a non-zero cap; the contract rejects `amountOut = 0`.
    pub fn validate(&self) -> SdkResult<()> {
        match self {
            DispatchFee::Fixed { fee_cap } if fee_cap.is_zero() => Err(SdkError::Validation(
                "fixed dispatch fee cap must be positive".to_string(),
            )),
            _ => Ok(()),
        }
    }

    pub fn fee_for(&self, amount_b: U256) -> U256 {
        match self {
            DispatchFee::Proportional => proportional_fee(amount_b),
            DispatchFee::Fixed { fee_cap } => fixed_fee(amount_b, *fee_cap),
        }
    }
}

fn require_pair(token_a: &Address, token_b: &Address) -> SdkResult<()> {
    if token_a == token_b {
        return Err(SdkError::Validation(
            "tokenA and tokenB must differ".to_string(),
        ));
    }
    Ok(())
}

// ─── Make ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakeOrder {
    pub token_a: Address,
    pub token_b: Address,
    pub amount_a: U256,
    pub amount_b: U256,
    pub nonce: U256,
}

impl ActionPayload for MakeOrder {
    fn function_name(&self) -> &'static str {
        "makeOrder"
    }

    fn nonce(&self) -> U256 {
        self.nonce
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.nonce.canonical(),
            self.token_a.canonical(),
            self.token_b.canonical(),
            self.amount_a.canonical(),
            self.amount_b.canonical(),
        ]
    }

    fn validate(&self) -> SdkResult<()> {
        require_pair(&self.token_a, &self.token_b)?;
        if self.amount_a.is_zero() || self.amount_b.is_zero() {
            return Err(SdkError::Validation(
                "order amounts must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

// ─── Cancel ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelOrder {
    pub token_a: Address,
    pub token_b: Address,
    pub order_id: U256,
    pub nonce: U256,
}

impl ActionPayload for CancelOrder {
    fn function_name(&self) -> &'static str {
        "cancelOrder"
    }

    fn nonce(&self) -> U256 {
        self.nonce
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.nonce.canonical(),
            self.token_a.canonical(),
            self.token_b.canonical(),
            self.order_id.canonical(),
        ]
    }

    fn validate(&self) -> SdkResult<()> {
        require_pair(&self.token_a, &self.token_b)
    }
}

// ─── Dispatch ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchOrder {
    pub token_a: Address,
    pub token_b: Address,
    pub order_id: U256,
    /// The order's asking amount, before the fee.
    pub amount_b: U256,
    pub nonce: U256,
}

impl DispatchOrder {
    /// `amountB + fee`: what the taker pays in `tokenB`.
    pub fn fill_amount(&self, fee: &DispatchFee) -> SdkResult<U256> {
        fee.validate()?;
        self.amount_b
            .checked_add(fee.fee_for(self.amount_b))
            .ok_or_else(|| SdkError::Validation("fill amount overflows uint256".to_string()))
    }
}

impl ActionPayload for DispatchOrder {
    fn function_name(&self) -> &'static str {
        "dispatchOrder"
    }

    fn nonce(&self) -> U256 {
        self.nonce
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.nonce.canonical(),
            self.token_a.canonical(),
            self.token_b.canonical(),
            self.order_id.canonical(),
        ]
    }

    fn validate(&self) -> SdkResult<()> {
        require_pair(&self.token_a, &self.token_b)?;
        if self.amount_b.is_zero() {
            return Err(SdkError::Validation("amountB must be positive".to_string()));
        }
        Ok(())
    }
}

// ─── Call builders ───────────────────────────────────────────────────────────

pub fn make_order_call(
    action: &SignableAction<MakeOrder>,
    payment: &SignablePayment,
) -> SdkResult<IP2PSwap::makeOrderCall> {
    let evvm = EvvmPaymentArgs::from_payment(payment)?;
    let order = &action.payload;
    Ok(IP2PSwap::makeOrderCall {
        user: action.actor,
        metadata: MetadataMakeOrder {
            nonce: order.nonce,
            tokenA: order.token_a,
            tokenB: order.token_b,
            amountA: order.amount_a,
            amountB: order.amount_b,
        },
        signature: action.signature_bytes()?,
        priorityFee: evvm.priority_fee,
        nonce_EVVM: evvm.nonce,
        priorityFlag_EVVM: evvm.priority_flag,
        signature_EVVM: evvm.signature,
    })
}

pub fn cancel_order_call(
    action: &SignableAction<CancelOrder>,
    payment: &SignablePayment,
) -> SdkResult<IP2PSwap::cancelOrderCall> {
    let evvm = EvvmPaymentArgs::from_payment(payment)?;
    let order = &action.payload;
    Ok(IP2PSwap::cancelOrderCall {
        user: action.actor,
        metadata: MetadataCancelOrder {
            nonce: order.nonce,
            tokenA: order.token_a,
            tokenB: order.token_b,
            orderId: order.order_id,
            signature: action.signature_bytes()?,
        },
        priorityFee: evvm.priority_fee,
        nonce_EVVM: evvm.nonce,
        priorityFlag_EVVM: evvm.priority_flag,
        signature_EVVM: evvm.signature,
    })
}

fn dispatch_metadata(
    action: &SignableAction<DispatchOrder>,
    fee: &DispatchFee,
) -> SdkResult<MetadataDispatchOrder> {
    let order = &action.payload;
    Ok(MetadataDispatchOrder {
        nonce: order.nonce,
        tokenA: order.token_a,
        tokenB: order.token_b,
        orderId: order.order_id,
        amountOfTokenBToFill: order.fill_amount(fee)?,
        signature: action.signature_bytes()?,
    })
}

pub fn dispatch_proportional_call(
    action: &SignableAction<DispatchOrder>,
    payment: &SignablePayment,
) -> SdkResult<IP2PSwap::dispatchOrder_fillPropotionalFeeCall> {
    let evvm = EvvmPaymentArgs::from_payment(payment)?;
    Ok(IP2PSwap::dispatchOrder_fillPropotionalFeeCall {
        user: action.actor,
        metadata: dispatch_metadata(action, &DispatchFee::Proportional)?,
        priorityFee: evvm.priority_fee,
        nonce_EVVM: evvm.nonce,
        priorityFlag_EVVM: evvm.priority_flag,
        signature_EVVM: evvm.signature,
    })
}

pub fn dispatch_fixed_call(
    action: &SignableAction<DispatchOrder>,
    payment: &SignablePayment,
    fee_cap: U256,
) -> SdkResult<IP2PSwap::dispatchOrder_fillFixedFeeCall> {
    DispatchFee::Fixed { fee_cap }.validate()?;
    let evvm = EvvmPaymentArgs::from_payment(payment)?;
    Ok(IP2PSwap::dispatchOrder_fillFixedFeeCall {
        user: action.actor,
        metadata: dispatch_metadata(action, &DispatchFee::Fixed { fee_cap })?,
        priorityFee: evvm.priority_fee,
        nonce_EVVM: evvm.nonce,
        priorityFlag_EVVM: evvm.priority_flag,
        signature_EVVM: evvm.signature,
        amountOut: fee_cap,
    })
}
