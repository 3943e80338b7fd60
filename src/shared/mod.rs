//! Shared newtypes, sentinels and utilities used across all domain modules.
//!
//! Everything here is pure: no async, no network calls.

pub mod canonical;
pub mod nonce;
pub mod serde_util;
pub mod scaling;
pub mod time;
pub mod username;

pub use canonical::CanonicalField;
pub use nonce::{random_async_nonce, random_clow_number};
pub use scaling::{scale_signed_floor, ScalingError};
pub use time::{date_to_unix_seconds, now_unix_seconds, parse_date_to_unix_seconds};
pub use username::{hash_pre_registered_username, validate_username};

use alloy_primitives::{address, Address, U256};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

use crate::error::SdkError;

// ─── Sentinels ───────────────────────────────────────────────────────────────

/// The protocol's native fee and stake token (MATE).
pub const PRINCIPAL_TOKEN: Address = address!("0000000000000000000000000000000000000001");

/// "No delegated executor" when used as an executor, the native chain asset when
/// used as a token.
pub const ZERO_ADDRESS: Address = Address::ZERO;

/// Base units per whole principal token (18 decimals).
pub const WEI_PER_TOKEN: u128 = 1_000_000_000_000_000_000;

/// Whole principal tokens paid per staking unit.
pub const TOKENS_PER_STAKING_UNIT: u64 = 5083;

/// Amount paid for `units` staking units: `units × 5083 × 10^18`.
pub fn staking_amount(units: U256) -> Result<U256, SdkError> {
    units
        .checked_mul(U256::from(TOKENS_PER_STAKING_UNIT))
        .and_then(|v| v.checked_mul(U256::from(WEI_PER_TOKEN)))
        .ok_or_else(|| {
            SdkError::Validation(format!("staking {} units overflows uint256", units))
        })
}

// ─── Priority ────────────────────────────────────────────────────────────────

/// Nonce numbering space a payment uses.
///
/// `Sync` nonces must equal the account's next counter value; `Async` nonces
/// must simply be unused. Both are enforced by the receiving contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Sync,
    Async,
}

impl Priority {
    /// The on-chain `priorityFlag` value (`true` = asynchronous).
    pub fn flag(&self) -> bool {
        matches!(self, Priority::Async)
    }

    pub fn from_flag(flag: bool) -> Self {
        if flag {
            Priority::Async
        } else {
            Priority::Sync
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Sync => write!(f, "sync"),
            Priority::Async => write!(f, "async"),
        }
    }
}

// ─── Recipient ───────────────────────────────────────────────────────────────

/// Payment recipient: a direct address or a name-service identity, never both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recipient {
    Address(Address),
    Identity(String),
}

impl Recipient {
    /// Build from the two optional form fields.
    ///
    /// Exactly one must be present; a zero address or an empty identity counts
    /// as absent.
    pub fn from_parts(address: Option<Address>, identity: Option<&str>) -> Result<Self, SdkError> {
        let address = address.filter(|a| !a.is_zero());
        let identity = identity.map(str::trim).filter(|s| !s.is_empty());

        match (address, identity) {
            (Some(a), None) => Ok(Recipient::Address(a)),
            (None, Some(i)) => Ok(Recipient::Identity(i.to_string())),
            (Some(_), Some(_)) => Err(SdkError::Validation(
                "recipient must be an address or an identity, not both".to_string(),
            )),
            (None, None) => Err(SdkError::Validation(
                "recipient address or identity is required".to_string(),
            )),
        }
    }

    /// A zero address or a blank identity names nobody.
    pub fn validate(&self) -> Result<(), SdkError> {
        match self {
            Recipient::Address(a) if a.is_zero() => Err(SdkError::Validation(
                "recipient address or identity is required".to_string(),
            )),
            Recipient::Identity(i) if i.trim().is_empty() => Err(SdkError::Validation(
                "recipient address or identity is required".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// `to_address` argument: the zero address when paying an identity.
    pub fn to_address(&self) -> Address {
        match self {
            Recipient::Address(a) => *a,
            Recipient::Identity(_) => ZERO_ADDRESS,
        }
    }

    /// `to_identity` argument: empty when paying an address.
    pub fn to_identity(&self) -> &str {
        match self {
            Recipient::Address(_) => "",
            Recipient::Identity(i) => i,
        }
    }
}

impl CanonicalField for Recipient {
    fn canonical(&self) -> String {
        match self {
            Recipient::Address(a) => a.canonical(),
            Recipient::Identity(i) => i.clone(),
        }
    }
}

impl From<Address> for Recipient {
    fn from(a: Address) -> Self {
        Recipient::Address(a)
    }
}

// ─── EvmSignature ────────────────────────────────────────────────────────────

/// A 65-byte `r ‖ s ‖ v` secp256k1 signature as produced by `personal_sign`.
///
/// Serializes as a lowercase `0x`-prefixed hex string.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EvmSignature([u8; 65]);

impl EvmSignature {
    pub const LEN: usize = 65;

    pub fn from_bytes(bytes: [u8; 65]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, SdkError> {
        let arr: [u8; 65] = bytes.try_into().map_err(|_| {
            SdkError::Validation(format!("signature must be 65 bytes, got {}", bytes.len()))
        })?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; 65] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Recovery byte, normalized to 27/28.
    pub fn v(&self) -> u8 {
        let v = self.0[64];
        if v < 27 {
            v + 27
        } else {
            v
        }
    }

    /// An all-zero signature never comes out of a signer.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    pub fn to_bytes(&self) -> alloy_primitives::Bytes {
        alloy_primitives::Bytes::copy_from_slice(&self.0)
    }
}

impl std::fmt::Debug for EvmSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EvmSignature({})", self.to_hex())
    }
}

impl std::fmt::Display for EvmSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for EvmSignature {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(raw)
            .map_err(|e| SdkError::Validation(format!("invalid signature hex: {}", e)))?;
        Self::from_slice(&bytes)
    }
}

impl Serialize for EvmSignature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for EvmSignature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        EvmSignature::from_str(&s).map_err(serde::de::Error::custom)
    }
}

// ─── Utilities ───────────────────────────────────────────────────────────────

/// Reject an empty (or whitespace-only) required string field.
pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<(), SdkError> {
    if value.trim().is_empty() {
        return Err(SdkError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

/// Reject the zero address for a field that must name a real account or contract.
pub(crate) fn require_address(field: &str, value: &Address) -> Result<(), SdkError> {
    if value.is_zero() {
        return Err(SdkError::Validation(format!("{} is required", field)));
    }
    Ok(())
}
