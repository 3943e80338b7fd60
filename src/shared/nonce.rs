//! Random values for asynchronous nonces and pre-registration clow numbers.

use alloy_primitives::U256;
use rand::Rng;

/// Exclusive upper bound for clow numbers.
pub const CLOW_NUMBER_BOUND: u64 = 1_000_000_000;

/// A fresh asynchronous nonce from the thread-local CSPRNG.
///
/// Asynchronous nonces only need to be unused by the account; 64 random bits
/// make a collision with an earlier nonce negligible.
pub fn random_async_nonce() -> U256 {
    random_async_nonce_with(&mut rand::thread_rng())
}

pub fn random_async_nonce_with<R: Rng + ?Sized>(rng: &mut R) -> U256 {
    U256::from(rng.gen::<u64>())
}

/// A random clow number in `[0, 10^9)` for username pre-registration.
pub fn random_clow_number() -> U256 {
    random_clow_number_with(&mut rand::thread_rng())
}

pub fn random_clow_number_with<R: Rng + ?Sized>(rng: &mut R) -> U256 {
    U256::from(rng.gen_range(0..CLOW_NUMBER_BOUND))
}
