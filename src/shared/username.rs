//! Username rules and the pre-registration commitment hash.

use alloy_primitives::{keccak256, B256, U256};

use crate::error::SdkError;

/// Minimum username length accepted by the name service.
pub const MIN_USERNAME_LEN: usize = 4;

/// Check a username before committing to it.
///
/// At least four characters, starting with an ASCII letter, followed only by
/// ASCII letters and digits.
pub fn validate_username(username: &str) -> Result<(), SdkError> {
    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(SdkError::Validation(format!(
            "username must be at least {} characters",
            MIN_USERNAME_LEN
        )));
    }

    let mut chars = username.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    if !starts_with_letter || !chars.all(|c| c.is_ascii_alphanumeric()) {
        return Err(SdkError::Validation(
            "username must start with a letter and contain only letters and numbers".to_string(),
        ));
    }
    Ok(())
}

/// `keccak256(abi.encodePacked(string username, uint256 clowNumber))`.
///
/// The name service re-hashes the revealed username byte for byte, so the
/// input is used exactly as given (no case folding, no trimming).
pub fn hash_pre_registered_username(username: &str, clow_number: U256) -> B256 {
    let mut packed = Vec::with_capacity(username.len() + 32);
    packed.extend_from_slice(username.as_bytes());
    packed.extend_from_slice(&clow_number.to_be_bytes::<32>());
    keccak256(packed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("a1b2").is_ok());
        assert!(validate_username("abc").is_err());
        assert!(validate_username("1alice").is_err());
        assert!(validate_username("ali_ce").is_err());
        assert!(validate_username("alicé").is_err());
    }

    #[test]
    fn test_hash_is_deterministic_and_case_sensitive() {
        let n = U256::from(123_456u64);
        assert_eq!(
            hash_pre_registered_username("alice", n),
            hash_pre_registered_username("alice", n)
        );
        assert_ne!(
            hash_pre_registered_username("alice", n),
            hash_pre_registered_username("Alice", n)
        );
        assert_ne!(
            hash_pre_registered_username("alice", n),
            hash_pre_registered_username("alice", n + U256::from(1u64))
        );
    }

    #[test]
    fn test_hash_matches_packed_layout() {
        let mut packed = b"alice".to_vec();
        packed.extend_from_slice(&[0u8; 31]);
        packed.push(7);
        assert_eq!(
            hash_pre_registered_username("alice", U256::from(7u64)),
            keccak256(&packed)
        );
    }
}
