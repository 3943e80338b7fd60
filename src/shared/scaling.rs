//! Pure conversion of human-readable decimals to on-chain integer amounts.
//!
//! All math uses `rust_decimal::Decimal` mantissa/scale pairs so no float
//! rounding ever reaches a signed message.

use std::fmt;

use alloy_primitives::{I256, U256};
use rust_decimal::Decimal;

/// Errors that can occur during scaling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalingError {
    Overflow { context: String },
}

impl fmt::Display for ScalingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalingError::Overflow { context } => write!(f, "Overflow: {}", context),
        }
    }
}

impl std::error::Error for ScalingError {}

impl From<ScalingError> for crate::error::SdkError {
    fn from(e: ScalingError) -> Self {
        crate::error::SdkError::Validation(e.to_string())
    }
}

fn pow10(exp: u32) -> U256 {
    U256::from(10u64).pow(U256::from(exp))
}

/// `floor(value * 10^decimals)` as a signed 256-bit integer.
///
/// Used for sensor readings, which are logged as signed fixed-point values.
/// Flooring rounds toward negative infinity: `-0.0000005` at 6 decimals is `-1`.
pub fn scale_signed_floor(value: Decimal, decimals: u32) -> Result<I256, ScalingError> {
    let mantissa = value.mantissa();
    let scale = value.scale();
    let overflow = || ScalingError::Overflow {
        context: format!("{} * 10^{}", value, decimals),
    };

    if scale >= decimals {
        let divisor = 10i128
            .checked_pow(scale - decimals)
            .ok_or_else(overflow)?;
        let floored = mantissa.div_euclid(divisor);
        return I256::try_from(floored).map_err(|_| overflow());
    }

    let factor = I256::from_raw(pow10(decimals - scale));
    I256::try_from(mantissa)
        .map_err(|_| overflow())?
        .checked_mul(factor)
        .ok_or_else(overflow)
}
