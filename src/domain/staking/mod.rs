//! Staking: golden, presale, public and service staking.
//!
//! Every variant pays the staking contract in principal tokens at
//! 5083 tokens per staking unit, except presale staking which is fixed at one
//! token. Unstaking signs the same payment shape as staking; the contract
//! decides what is refunded.
//!
//! Golden staking is reserved for the golden fisher and carries no action
//! signature: the payment alone authorizes it.

pub mod abi;
pub mod client;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::action::{ActionPayload, SignableAction};
use crate::domain::EvvmPaymentArgs;
use crate::error::{SdkError, SdkResult};
use crate::payment::SignablePayment;
use crate::shared::{require_address, staking_amount, CanonicalField, WEI_PER_TOKEN};
use abi::IStaking;

/// Presale staking always moves exactly one unit, paid as one principal token.
pub const PRESALE_STAKING_UNITS: u64 = 1;

pub fn presale_payment_amount() -> U256 {
    U256::from(WEI_PER_TOKEN)
}

fn require_units(units: U256) -> SdkResult<()> {
    if units.is_zero() {
        return Err(SdkError::Validation(
            "amount of staking must be at least one unit".to_string(),
        ));
    }
    Ok(())
}

// ─── Golden staking ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldenStaking {
    pub is_staking: bool,
    pub units: U256,
}

impl GoldenStaking {
    pub fn stake(units: U256) -> Self {
        Self {
            is_staking: true,
            units,
        }
    }

    pub fn unstake(units: U256) -> Self {
        Self {
            is_staking: false,
            units,
        }
    }

    pub fn validate(&self) -> SdkResult<()> {
        require_units(self.units)
    }

    /// `units × 5083 × 10^18`.
    pub fn payment_amount(&self) -> SdkResult<U256> {
        staking_amount(self.units)
    }
}

// ─── Presale staking ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresaleStaking {
    pub is_staking: bool,
    pub nonce: U256,
}

impl ActionPayload for PresaleStaking {
    fn function_name(&self) -> &'static str {
        "presaleStaking"
    }

    fn nonce(&self) -> U256 {
        self.nonce
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.is_staking.canonical(),
            PRESALE_STAKING_UNITS.canonical(),
            self.nonce.canonical(),
        ]
    }
}

// ─── Public staking ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicStaking {
    pub is_staking: bool,
    pub units: U256,
    pub nonce: U256,
}

impl PublicStaking {
    pub fn payment_amount(&self) -> SdkResult<U256> {
        staking_amount(self.units)
    }
}

impl ActionPayload for PublicStaking {
    fn function_name(&self) -> &'static str {
        "publicStaking"
    }

    fn nonce(&self) -> U256 {
        self.nonce
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.is_staking.canonical(),
            self.units.canonical(),
            self.nonce.canonical(),
        ]
    }

    fn validate(&self) -> SdkResult<()> {
        require_units(self.units)
    }
}

/// Staking on behalf of a service contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicServiceStaking {
    pub service: Address,
    pub is_staking: bool,
    pub units: U256,
    pub nonce: U256,
}

impl PublicServiceStaking {
    pub fn payment_amount(&self) -> SdkResult<U256> {
        staking_amount(self.units)
    }
}

impl ActionPayload for PublicServiceStaking {
    fn function_name(&self) -> &'static str {
        "publicServiceStaking"
    }

    fn nonce(&self) -> U256 {
        self.nonce
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.service.canonical(),
            self.is_staking.canonical(),
            self.units.canonical(),
            self.nonce.canonical(),
        ]
    }

    fn validate(&self) -> SdkResult<()> {
        require_address("service", &self.service)?;
        require_units(self.units)
    }
}

// ─── Call builders ───────────────────────────────────────────────────────────

pub fn golden_staking_call(
    input: &GoldenStaking,
    payment: &SignablePayment,
) -> SdkResult<IStaking::goldenStakingCall> {
    input.validate()?;
    Ok(IStaking::goldenStakingCall {
        isStaking: input.is_staking,
        amountOfStaking: input.units,
        signature_EVVM: payment.signature_bytes()?,
    })
}

pub fn presale_staking_call(
    action: &SignableAction<PresaleStaking>,
    payment: &SignablePayment,
) -> SdkResult<IStaking::presaleStakingCall> {
    let evvm = EvvmPaymentArgs::from_payment(payment)?;
    Ok(IStaking::presaleStakingCall {
        user: action.actor,
        isStaking: action.payload.is_staking,
        nonce: action.payload.nonce,
        signature: action.signature_bytes()?,
        priorityFee_EVVM: evvm.priority_fee,
        nonce_EVVM: evvm.nonce,
        priorityFlag_EVVM: evvm.priority_flag,
        signature_EVVM: evvm.signature,
    })
}

pub fn public_staking_call(
    action: &SignableAction<PublicStaking>,
    payment: &SignablePayment,
) -> SdkResult<IStaking::publicStakingCall> {
    let evvm = EvvmPaymentArgs::from_payment(payment)?;
    Ok(IStaking::publicStakingCall {
        user: action.actor,
        isStaking: action.payload.is_staking,
        amountOfStaking: action.payload.units,
        nonce: action.payload.nonce,
        signature: action.signature_bytes()?,
        priorityFee_EVVM: evvm.priority_fee,
        nonce_EVVM: evvm.nonce,
        priorityFlag_EVVM: evvm.priority_flag,
        signature_EVVM: evvm.signature,
    })
}

pub fn public_service_staking_call(
    action: &SignableAction<PublicServiceStaking>,
    payment: &SignablePayment,
) -> SdkResult<IStaking::publicServiceStakingCall> {
    let evvm = EvvmPaymentArgs::from_payment(payment)?;
    Ok(IStaking::publicServiceStakingCall {
        user: action.actor,
        service: action.payload.service,
        isStaking: action.payload.is_staking,
        amountOfStaking: action.payload.units,
        nonce: action.payload.nonce,
        signature: action.signature_bytes()?,
        priorityFee_EVVM: evvm.priority_fee,
        nonce_EVVM: evvm.nonce,
        priorityFlag_EVVM: evvm.priority_flag,
        signature_EVVM: evvm.signature,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payment::PaymentParams;
    use crate::shared::{Priority, Recipient, PRINCIPAL_TOKEN};
    use crate::signer::LocalSigner;
    use alloy_primitives::address;

    #[test]
    fn test_golden_amount_two_units() {
        let golden = GoldenStaking::stake(U256::from(2u64));
        assert_eq!(
            golden.payment_amount().unwrap(),
            U256::from(10_166u64) * U256::from(WEI_PER_TOKEN)
        );
    }

    #[test]
    fn test_unpayable_units_rejected() {
        let public = PublicStaking {
            is_staking: true,
            units: U256::MAX / U256::from(1000u64),
            nonce: U256::ZERO,
        };
        assert!(public.validate().is_ok());
        assert!(matches!(public.payment_amount(), Err(SdkError::Validation(_))));
        assert!(GoldenStaking::stake(U256::MAX).payment_amount().is_err());
    }

    #[test]
    fn test_zero_units_rejected() {
        assert!(GoldenStaking::unstake(U256::ZERO).validate().is_err());
        let public = PublicStaking {
            is_staking: true,
            units: U256::ZERO,
            nonce: U256::ZERO,
        };
        assert!(public.validate().is_err());
    }

    #[test]
    fn test_presale_message_fixes_one_unit() {
        let presale = PresaleStaking {
            is_staking: false,
            nonce: U256::from(8u64),
        };
        assert_eq!(
            presale.canonical_message(U256::from(1074u64)),
            "1074,presaleStaking,false,1,8"
        );
        assert_eq!(presale_payment_amount(), U256::from(WEI_PER_TOKEN));
    }

    #[test]
    fn test_public_and_service_messages() {
        let public = PublicStaking {
            is_staking: true,
            units: U256::from(3u64),
            nonce: U256::from(5u64),
        };
        assert_eq!(
            public.canonical_message(U256::from(1u64)),
            "1,publicStaking,true,3,5"
        );

        let service = PublicServiceStaking {
            service: address!("00000000000000000000000000000000000000aa"),
            is_staking: true,
            units: U256::from(3u64),
            nonce: U256::from(5u64),
        };
        assert_eq!(
            service.canonical_message(U256::from(1u64)),
            "1,publicServiceStaking,0x00000000000000000000000000000000000000aa,true,3,5"
        );
        assert_eq!(service.payment_amount().unwrap(), public.payment_amount().unwrap());
    }

    #[test]
    fn test_golden_call_uses_payment_signature() {
        let signer = LocalSigner::random();
        let staking = address!("00000000000000000000000000000000000000cc");
        let golden = GoldenStaking::stake(U256::from(2u64));
        let params = PaymentParams {
            recipient: Recipient::Address(staking),
            token: PRINCIPAL_TOKEN,
            amount: golden.payment_amount().unwrap(),
            priority_fee: U256::ZERO,
            nonce: U256::from(1u64),
            priority: Priority::Sync,
            executor: staking,
        };
        let mut payment = SignablePayment::new(signer.address(), U256::from(1u64), params);
        payment.sign_local(&signer).unwrap();

        let call = golden_staking_call(&golden, &payment).unwrap();
        assert!(call.isStaking);
        assert_eq!(call.amountOfStaking, U256::from(2u64));
        assert_eq!(call.signature_EVVM, payment.signature_bytes().unwrap());
    }
}
