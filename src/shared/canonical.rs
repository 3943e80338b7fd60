//! Canonical text rendering for signed message fields.
//!
//! Every signed message is a comma-joined list of fields. Each field type has
//! exactly one rendering:
//!
//! | Type | Rendering |
//! |------|-----------|
//! | `Address` | lowercase `0x` + 40 hex digits |
//! | `B256` | lowercase `0x` + 64 hex digits |
//! | `bool` | `true` / `false` |
//! | integers | decimal, no separators |
//! | strings | verbatim (case-sensitive) |

use alloy_primitives::{Address, B256, I256, U256};

/// A value that can appear in a canonical signed message.
pub trait CanonicalField {
    fn canonical(&self) -> String;
}

impl CanonicalField for Address {
    fn canonical(&self) -> String {
        format!("0x{}", hex::encode(self.as_slice()))
    }
}

impl CanonicalField for B256 {
    fn canonical(&self) -> String {
        format!("0x{}", hex::encode(self.as_slice()))
    }
}

impl CanonicalField for U256 {
    fn canonical(&self) -> String {
        self.to_string()
    }
}

impl CanonicalField for I256 {
    fn canonical(&self) -> String {
        self.to_string()
    }
}

impl CanonicalField for bool {
    fn canonical(&self) -> String {
        if *self { "true" } else { "false" }.to_string()
    }
}

impl CanonicalField for u64 {
    fn canonical(&self) -> String {
        self.to_string()
    }
}

impl CanonicalField for u8 {
    fn canonical(&self) -> String {
        self.to_string()
    }
}

impl CanonicalField for str {
    fn canonical(&self) -> String {
        self.to_string()
    }
}

impl CanonicalField for String {
    fn canonical(&self) -> String {
        self.clone()
    }
}

impl<T: CanonicalField + ?Sized> CanonicalField for &T {
    fn canonical(&self) -> String {
        (**self).canonical()
    }
}

/// Join `evvm_id`, the function name and the rendered fields into one message.
pub fn join_message(evvm_id: U256, function: &str, fields: &[String]) -> String {
    let mut parts = Vec::with_capacity(fields.len() + 2);
    parts.push(evvm_id.to_string());
    parts.push(function.to_string());
    parts.extend(fields.iter().cloned());
    parts.join(",")
}
