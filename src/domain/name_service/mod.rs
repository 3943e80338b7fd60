//! Name service: usernames, offers, custom metadata.
//!
//! Registration is two-phase. The user first commits to
//! `keccak256(username ‖ clowNumber)` with `preRegistrationUsername`, then
//! reveals both with `registrationUsername` once the commitment has matured.
//!
//! Every action is paid with a principal-token payment to the name service,
//! which is also the payment's executor.

pub mod abi;
pub mod client;

use alloy_primitives::{B256, U256};
use serde::{Deserialize, Serialize};

use crate::action::{ActionPayload, SignableAction};
use crate::domain::EvvmPaymentArgs;
use crate::error::{SdkError, SdkResult};
use crate::payment::SignablePayment;
use crate::shared::{
    hash_pre_registered_username, require_non_empty, validate_username, CanonicalField,
};
use abi::INameService;

/// Registration costs this many reward units.
pub const REGISTRATION_REWARD_MULTIPLIER: u64 = 100;

/// Payment amount for `registrationUsername`: `reward × 100`, or zero when the
/// reward could not be read.
pub fn registration_payment_amount(reward: Option<U256>) -> SdkResult<U256> {
    match reward {
        Some(r) => r
            .checked_mul(U256::from(REGISTRATION_REWARD_MULTIPLIER))
            .ok_or_else(|| SdkError::read("getRewardAmount", "reward × 100 overflows uint256")),
        None => Ok(U256::ZERO),
    }
}

// ============================================================================
// Registration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreRegistrationUsername {
    pub username: String,
    pub clow_number: U256,
    pub nonce: U256,
}

impl PreRegistrationUsername {
    pub fn commitment(&self) -> B256 {
        hash_pre_registered_username(&self.username, self.clow_number)
    }
}

impl ActionPayload for PreRegistrationUsername {
    fn function_name(&self) -> &'static str {
        "preRegistrationUsername"
    }

    fn nonce(&self) -> U256 {
        self.nonce
    }

    fn fields(&self) -> Vec<String> {
        vec![self.commitment().canonical(), self.nonce.canonical()]
    }

    fn validate(&self) -> SdkResult<()> {
        validate_username(&self.username)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationUsername {
    pub username: String,
    pub clow_number: U256,
    pub nonce: U256,
}

impl ActionPayload for RegistrationUsername {
    fn function_name(&self) -> &'static str {
        "registrationUsername"
    }

    fn nonce(&self) -> U256 {
        self.nonce
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.username.canonical(),
            self.clow_number.canonical(),
            self.nonce.canonical(),
        ]
    }

    fn validate(&self) -> SdkResult<()> {
        validate_username(&self.username)
    }
}

// ============================================================================
// Offers
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakeOffer {
    pub username: String,
    /// Unix seconds.
    pub expire_date: u64,
    pub amount: U256,
    pub nonce: U256,
}

impl ActionPayload for MakeOffer {
    fn function_name(&self) -> &'static str {
        "makeOffer"
    }

    fn nonce(&self) -> U256 {
        self.nonce
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.username.canonical(),
            self.expire_date.canonical(),
            self.amount.canonical(),
            self.nonce.canonical(),
        ]
    }

    fn validate(&self) -> SdkResult<()> {
        require_non_empty("username", &self.username)?;
        if self.amount.is_zero() {
            return Err(SdkError::Validation("offer amount must be positive".to_string()));
        }
        if self.expire_date == 0 {
            return Err(SdkError::Validation("offer expiry is required".to_string()));
        }
        Ok(())
    }
}

/// Which side of an offer is being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferResolution {
    /// The offerer takes the offer back.
    Withdraw,
    /// The username owner accepts it.
    Accept,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveOffer {
    pub resolution: OfferResolution,
    pub username: String,
    pub offer_id: U256,
    pub nonce: U256,
}

impl ResolveOffer {
    pub fn withdraw(username: impl Into<String>, offer_id: U256, nonce: U256) -> Self {
        Self {
            resolution: OfferResolution::Withdraw,
            username: username.into(),
            offer_id,
            nonce,
        }
    }

    pub fn accept(username: impl Into<String>, offer_id: U256, nonce: U256) -> Self {
        Self {
            resolution: OfferResolution::Accept,
            username: username.into(),
            offer_id,
            nonce,
        }
    }
}

impl ActionPayload for ResolveOffer {
    fn function_name(&self) -> &'static str {
        match self.resolution {
            OfferResolution::Withdraw => "withdrawOffer",
            OfferResolution::Accept => "acceptOffer",
        }
    }

    fn nonce(&self) -> U256 {
        self.nonce
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.username.canonical(),
            self.offer_id.canonical(),
            self.nonce.canonical(),
        ]
    }

    fn validate(&self) -> SdkResult<()> {
        require_non_empty("username", &self.username)
    }
}

// ============================================================================
// Identity maintenance
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewUsername {
    pub username: String,
    pub nonce: U256,
}

impl ActionPayload for RenewUsername {
    fn function_name(&self) -> &'static str {
        "renewUsername"
    }

    fn nonce(&self) -> U256 {
        self.nonce
    }

    fn fields(&self) -> Vec<String> {
        vec![self.username.canonical(), self.nonce.canonical()]
    }

    fn validate(&self) -> SdkResult<()> {
        require_non_empty("username", &self.username)
    }
}

/// A metadata entry before it is flattened to `"{schema}:{subschema}>{value}"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomMetadata {
    pub schema: String,
    pub subschema: String,
    pub value: String,
}

impl CustomMetadata {
    pub fn new(
        schema: impl Into<String>,
        subschema: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            schema: schema.into(),
            subschema: subschema.into(),
            value: value.into(),
        }
    }

    pub fn composite(&self) -> String {
        format!("{}:{}>{}", self.schema, self.subschema, self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddCustomMetadata {
    pub identity: String,
    /// Composite `"{schema}:{subschema}>{value}"`.
    pub value: String,
    pub nonce: U256,
}

impl AddCustomMetadata {
    pub fn new(identity: impl Into<String>, metadata: &CustomMetadata, nonce: U256) -> Self {
        Self {
            identity: identity.into(),
            value: metadata.composite(),
            nonce,
        }
    }
}

impl ActionPayload for AddCustomMetadata {
    fn function_name(&self) -> &'static str {
        "addCustomMetadata"
    }

    fn nonce(&self) -> U256 {
        self.nonce
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.identity.canonical(),
            self.value.canonical(),
            self.nonce.canonical(),
        ]
    }

    fn validate(&self) -> SdkResult<()> {
        require_non_empty("identity", &self.identity)?;
        require_non_empty("metadata value", &self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveCustomMetadata {
    pub identity: String,
    pub key: U256,
    pub nonce: U256,
}

impl ActionPayload for RemoveCustomMetadata {
    fn function_name(&self) -> &'static str {
        "removeCustomMetadata"
    }

    fn nonce(&self) -> U256 {
        self.nonce
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.identity.canonical(),
            self.key.canonical(),
            self.nonce.canonical(),
        ]
    }

    fn validate(&self) -> SdkResult<()> {
        require_non_empty("identity", &self.identity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlushCustomMetadata {
    pub identity: String,
    pub nonce: U256,
}

impl ActionPayload for FlushCustomMetadata {
    fn function_name(&self) -> &'static str {
        "flushCustomMetadata"
    }

    fn nonce(&self) -> U256 {
        self.nonce
    }

    fn fields(&self) -> Vec<String> {
        vec![self.identity.canonical(), self.nonce.canonical()]
    }

    fn validate(&self) -> SdkResult<()> {
        require_non_empty("identity", &self.identity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlushUsername {
    pub username: String,
    pub nonce: U256,
}

impl ActionPayload for FlushUsername {
    fn function_name(&self) -> &'static str {
        "flushUsername"
    }

    fn nonce(&self) -> U256 {
        self.nonce
    }

    fn fields(&self) -> Vec<String> {
        vec![self.username.canonical(), self.nonce.canonical()]
    }

    fn validate(&self) -> SdkResult<()> {
        require_non_empty("username", &self.username)
    }
}

// ============================================================================
// Call builders
// ============================================================================

pub fn pre_registration_call(
    action: &SignableAction<PreRegistrationUsername>,
    payment: &SignablePayment,
) -> SdkResult<INameService::preRegistrationUsernameCall> {
    let evvm = EvvmPaymentArgs::from_payment(payment)?;
    Ok(INameService::preRegistrationUsernameCall {
        user: action.actor,
        hashPreRegisteredUsername: action.payload.commitment(),
        nonce: action.payload.nonce,
        signature: action.signature_bytes()?,
        priorityFee_EVVM: evvm.priority_fee,
        nonce_EVVM: evvm.nonce,
        priorityFlag_EVVM: evvm.priority_flag,
        signature_EVVM: evvm.signature,
    })
}

pub fn registration_call(
    action: &SignableAction<RegistrationUsername>,
    payment: &SignablePayment,
) -> SdkResult<INameService::registrationUsernameCall> {
    let evvm = EvvmPaymentArgs::from_payment(payment)?;
    Ok(INameService::registrationUsernameCall {
        user: action.actor,
        username: action.payload.username.clone(),
        clowNumber: action.payload.clow_number,
        nonce: action.payload.nonce,
        signature: action.signature_bytes()?,
        priorityFee_EVVM: evvm.priority_fee,
        nonce_EVVM: evvm.nonce,
        priorityFlag_EVVM: evvm.priority_flag,
        signature_EVVM: evvm.signature,
    })
}

pub fn make_offer_call(
    action: &SignableAction<MakeOffer>,
    payment: &SignablePayment,
) -> SdkResult<INameService::makeOfferCall> {
    let evvm = EvvmPaymentArgs::from_payment(payment)?;
    Ok(INameService::makeOfferCall {
        user: action.actor,
        username: action.payload.username.clone(),
        expireDate: U256::from(action.payload.expire_date),
        amount: action.payload.amount,
        nonce: action.payload.nonce,
        signature: action.signature_bytes()?,
        priorityFee_EVVM: evvm.priority_fee,
        nonce_EVVM: evvm.nonce,
        priorityFlag_EVVM: evvm.priority_flag,
        signature_EVVM: evvm.signature,
    })
}

pub fn withdraw_offer_call(
    action: &SignableAction<ResolveOffer>,
    payment: &SignablePayment,
) -> SdkResult<INameService::withdrawOfferCall> {
    expect_resolution(action, OfferResolution::Withdraw)?;
    let evvm = EvvmPaymentArgs::from_payment(payment)?;
    Ok(INameService::withdrawOfferCall {
        user: action.actor,
        username: action.payload.username.clone(),
        offerID: action.payload.offer_id,
        nonce: action.payload.nonce,
        signature: action.signature_bytes()?,
        priorityFee_EVVM: evvm.priority_fee,
        nonce_EVVM: evvm.nonce,
        priorityFlag_EVVM: evvm.priority_flag,
        signature_EVVM: evvm.signature,
    })
}

pub fn accept_offer_call(
    action: &SignableAction<ResolveOffer>,
    payment: &SignablePayment,
) -> SdkResult<INameService::acceptOfferCall> {
    expect_resolution(action, OfferResolution::Accept)?;
    let evvm = EvvmPaymentArgs::from_payment(payment)?;
    Ok(INameService::acceptOfferCall {
        user: action.actor,
        username: action.payload.username.clone(),
        offerID: action.payload.offer_id,
        nonce: action.payload.nonce,
        signature: action.signature_bytes()?,
        priorityFee_EVVM: evvm.priority_fee,
        nonce_EVVM: evvm.nonce,
        priorityFlag_EVVM: evvm.priority_flag,
        signature_EVVM: evvm.signature,
    })
}

fn expect_resolution(
    action: &SignableAction<ResolveOffer>,
    expected: OfferResolution,
) -> SdkResult<()> {
    if action.payload.resolution != expected {
        return Err(SdkError::Validation(format!(
            "{} action cannot build a {:?} call",
            action.payload.function_name(),
            expected
        )));
    }
    Ok(())
}

pub fn renew_call(
    action: &SignableAction<RenewUsername>,
    payment: &SignablePayment,
) -> SdkResult<INameService::renewUsernameCall> {
    let evvm = EvvmPaymentArgs::from_payment(payment)?;
    Ok(INameService::renewUsernameCall {
        user: action.actor,
        username: action.payload.username.clone(),
        nonce: action.payload.nonce,
        signature: action.signature_bytes()?,
        priorityFee_EVVM: evvm.priority_fee,
        nonce_EVVM: evvm.nonce,
        priorityFlag_EVVM: evvm.priority_flag,
        signature_EVVM: evvm.signature,
    })
}

pub fn add_custom_metadata_call(
    action: &SignableAction<AddCustomMetadata>,
    payment: &SignablePayment,
) -> SdkResult<INameService::addCustomMetadataCall> {
    let evvm = EvvmPaymentArgs::from_payment(payment)?;
    Ok(INameService::addCustomMetadataCall {
        user: action.actor,
        identity: action.payload.identity.clone(),
        value: action.payload.value.clone(),
        nonce: action.payload.nonce,
        signature: action.signature_bytes()?,
        priorityFee_EVVM: evvm.priority_fee,
        nonce_EVVM: evvm.nonce,
        priorityFlag_EVVM: evvm.priority_flag,
        signature_EVVM: evvm.signature,
    })
}

pub fn remove_custom_metadata_call(
    action: &SignableAction<RemoveCustomMetadata>,
    payment: &SignablePayment,
) -> SdkResult<INameService::removeCustomMetadataCall> {
    let evvm = EvvmPaymentArgs::from_payment(payment)?;
    Ok(INameService::removeCustomMetadataCall {
        user: action.actor,
        identity: action.payload.identity.clone(),
        key: action.payload.key,
        nonce: action.payload.nonce,
        signature: action.signature_bytes()?,
        priorityFee_EVVM: evvm.priority_fee,
        nonce_EVVM: evvm.nonce,
        priorityFlag_EVVM: evvm.priority_flag,
        signature_EVVM: evvm.signature,
    })
}

pub fn flush_custom_metadata_call(
    action: &SignableAction<FlushCustomMetadata>,
    payment: &SignablePayment,
) -> SdkResult<INameService::flushCustomMetadataCall> {
    let evvm = EvvmPaymentArgs::from_payment(payment)?;
    Ok(INameService::flushCustomMetadataCall {
        user: action.actor,
        identity: action.payload.identity.clone(),
        nonce: action.payload.nonce,
        signature: action.signature_bytes()?,
        priorityFee_EVVM: evvm.priority_fee,
        nonce_EVVM: evvm.nonce,
        priorityFlag_EVVM: evvm.priority_flag,
        signature_EVVM: evvm.signature,
    })
}

pub fn flush_username_call(
    action: &SignableAction<FlushUsername>,
    payment: &SignablePayment,
) -> SdkResult<INameService::flushUsernameCall> {
    let evvm = EvvmPaymentArgs::from_payment(payment)?;
    Ok(INameService::flushUsernameCall {
        user: action.actor,
        username: action.payload.username.clone(),
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

    const EVVM_ID: u64 = 1074;

    fn signed_payment(signer: &LocalSigner, amount: U256) -> SignablePayment {
        let service = address!("3Eb1A06faff55B618eA90b20169f37B73B0dDea3");
        let params = PaymentParams {
            recipient: Recipient::Address(service),
            token: PRINCIPAL_TOKEN,
            amount,
            priority_fee: U256::from(2u64),
            nonce: U256::from(11u64),
            priority: Priority::Async,
            executor: service,
        };
        let mut payment = SignablePayment::new(signer.address(), U256::from(EVVM_ID), params);
        payment.sign_local(signer).unwrap();
        payment
    }

    fn signed<A: ActionPayload>(signer: &LocalSigner, payload: A) -> SignableAction<A> {
        let mut action = SignableAction::new(signer.address(), U256::from(EVVM_ID), payload);
        action.sign_local(signer).unwrap();
        action
    }

    #[test]
    fn test_registration_amount() {
        assert_eq!(
            registration_payment_amount(Some(U256::from(5u64))).unwrap(),
            U256::from(500u64)
        );
        assert_eq!(registration_payment_amount(None).unwrap(), U256::ZERO);
        assert!(matches!(
            registration_payment_amount(Some(U256::MAX / U256::from(50u64))),
            Err(SdkError::Read { .. })
        ));
    }

    #[test]
    fn test_pre_registration_signs_commitment() {
        let pre = PreRegistrationUsername {
            username: "alice".to_string(),
            clow_number: U256::from(42u64),
            nonce: U256::from(1u64),
        };
        let msg = pre.canonical_message(U256::from(EVVM_ID));
        assert_eq!(
            msg,
            format!(
                "1074,preRegistrationUsername,{},1",
                pre.commitment().canonical()
            )
        );
        assert!(!msg.contains("alice"));
    }

    #[test]
    fn test_commitment_is_case_sensitive() {
        let lower = hash_pre_registered_username("alice", U256::from(1u64));
        let upper = hash_pre_registered_username("Alice", U256::from(1u64));
        assert_ne!(lower, upper);
    }

    #[test]
    fn test_registration_message_and_validation() {
        let reg = RegistrationUsername {
            username: "alice".to_string(),
            clow_number: U256::from(42u64),
            nonce: U256::from(7u64),
        };
        assert_eq!(
            reg.canonical_message(U256::from(EVVM_ID)),
            "1074,registrationUsername,alice,42,7"
        );

        let bad = RegistrationUsername {
            username: "al".to_string(),
            ..reg
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_make_offer_message_order() {
        let offer = MakeOffer {
            username: "alice".to_string(),
            expire_date: 1_750_000_000,
            amount: U256::from(300u64),
            nonce: U256::from(4u64),
        };
        assert_eq!(
            offer.canonical_message(U256::from(EVVM_ID)),
            "1074,makeOffer,alice,1750000000,300,4"
        );
        assert!(MakeOffer {
            amount: U256::ZERO,
            ..offer
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_offer_resolution_function_names() {
        let w = ResolveOffer::withdraw("alice", U256::from(2u64), U256::from(3u64));
        let a = ResolveOffer::accept("alice", U256::from(2u64), U256::from(3u64));
        assert_eq!(w.canonical_message(U256::from(1u64)), "1,withdrawOffer,alice,2,3");
        assert_eq!(a.canonical_message(U256::from(1u64)), "1,acceptOffer,alice,2,3");
    }

    #[test]
    fn test_custom_metadata_composite() {
        let meta = CustomMetadata::new("memberOf", "", ">evvm");
        assert_eq!(meta.composite(), "memberOf:>>evvm");

        let email = CustomMetadata::new("email", "dev", "a@b.c");
        let add = AddCustomMetadata::new("alice", &email, U256::from(1u64));
        assert_eq!(
            add.canonical_message(U256::from(EVVM_ID)),
            "1074,addCustomMetadata,alice,email:dev>a@b.c,1"
        );
    }

    #[test]
    fn test_metadata_and_flush_messages() {
        let remove = RemoveCustomMetadata {
            identity: "alice".to_string(),
            key: U256::from(3u64),
            nonce: U256::from(9u64),
        };
        let flush = FlushCustomMetadata {
            identity: "alice".to_string(),
            nonce: U256::from(9u64),
        };
        let flush_user = FlushUsername {
            username: "alice".to_string(),
            nonce: U256::from(9u64),
        };
        let renew = RenewUsername {
            username: "alice".to_string(),
            nonce: U256::from(9u64),
        };
        let id = U256::from(EVVM_ID);
        assert_eq!(remove.canonical_message(id), "1074,removeCustomMetadata,alice,3,9");
        assert_eq!(flush.canonical_message(id), "1074,flushCustomMetadata,alice,9");
        assert_eq!(flush_user.canonical_message(id), "1074,flushUsername,alice,9");
        assert_eq!(renew.canonical_message(id), "1074,renewUsername,alice,9");
    }

    #[test]
    fn test_empty_identity_rejected() {
        let flush = FlushCustomMetadata {
            identity: "  ".to_string(),
            nonce: U256::ZERO,
        };
        assert!(flush.validate().is_err());
    }

    #[test]
    fn test_registration_call_argument_order() {
        let signer = LocalSigner::random();
        let action = signed(
            &signer,
            RegistrationUsername {
                username: "alice".to_string(),
                clow_number: U256::from(42u64),
                nonce: U256::from(7u64),
            },
        );
        let payment = signed_payment(&signer, U256::from(500u64));
        let call = registration_call(&action, &payment).unwrap();

        assert_eq!(call.user, signer.address());
        assert_eq!(call.username, "alice");
        assert_eq!(call.clowNumber, U256::from(42u64));
        assert_eq!(call.nonce, U256::from(7u64));
        assert_eq!(call.priorityFee_EVVM, U256::from(2u64));
        assert_eq!(call.nonce_EVVM, U256::from(11u64));
        assert!(call.priorityFlag_EVVM);
        assert_ne!(call.signature, call.signature_EVVM);
    }

    #[test]
    fn test_offer_call_checks_resolution() {
        let signer = LocalSigner::random();
        let action = signed(
            &signer,
            ResolveOffer::withdraw("alice", U256::from(2u64), U256::from(3u64)),
        );
        let payment = signed_payment(&signer, U256::ZERO);
        assert!(withdraw_offer_call(&action, &payment).is_ok());
        assert!(accept_offer_call(&action, &payment).is_err());
    }

    #[test]
    fn test_unsigned_action_rejected_by_builder() {
        let signer = LocalSigner::random();
        let action = SignableAction::new(
            signer.address(),
            U256::from(EVVM_ID),
            RenewUsername {
                username: "alice".to_string(),
                nonce: U256::ZERO,
            },
        );
        let payment = signed_payment(&signer, U256::ZERO);
        assert!(renew_call(&action, &payment).is_err());
    }
}
