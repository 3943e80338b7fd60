//! Date ↔ unix-seconds conversion for signed fields such as offer expiry.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::SdkError;

/// Whole unix seconds for `date`, sub-second precision truncated.
///
/// Dates before the epoch are rejected: every on-chain time field is unsigned.
pub fn date_to_unix_seconds(date: &DateTime<Utc>) -> Result<u64, SdkError> {
    u64::try_from(date.timestamp())
        .map_err(|_| SdkError::Validation(format!("date {} is before the unix epoch", date)))
}

/// Parse a date string and convert it to unix seconds.
///
/// Accepts RFC 3339 (`2025-06-01T12:30:00Z`), the `datetime-local` shape
/// `2025-06-01T12:30` (read as UTC), `2025-06-01 12:30:00`, and a bare date
/// (midnight UTC).
pub fn parse_date_to_unix_seconds(input: &str) -> Result<u64, SdkError> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return date_to_unix_seconds(&dt.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%d %H:%M:%S",
    ];
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, fmt) {
            return date_to_unix_seconds(&naive.and_utc());
        }
    }

    if let Ok(day) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(midnight) = day.and_hms_opt(0, 0, 0) {
            return date_to_unix_seconds(&midnight.and_utc());
        }
    }

    Err(SdkError::Validation(format!("unrecognized date: {:?}", input)))
}

/// Current time in unix seconds.
pub fn now_unix_seconds() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or_default()
}
