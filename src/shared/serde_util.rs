//! Custom serde helpers for configuration files.

/// (De)serializes a `Duration` as whole milliseconds.
///
/// Config files write delays as plain integers (`"delay": 200`), not as
/// serde's default `{secs, nanos}` struct.
pub mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Wrapper {
        #[serde(with = "super::duration_ms")]
        delay: Duration,
    }

    #[test]
    fn test_duration_ms_roundtrip() {
        let w: Wrapper = serde_json::from_str(r#"{"delay":250}"#).unwrap();
        assert_eq!(w.delay, Duration::from_millis(250));
        assert_eq!(serde_json::to_string(&w).unwrap(), r#"{"delay":250}"#);
    }
}
