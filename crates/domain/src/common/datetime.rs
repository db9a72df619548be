//! Timestamp parsing and formatting for persisted documents.
//!
//! Two timestamp encodings appear in stored data: the epoch-millisecond string
//! written by every schema revision so far (also seen as a bare JSON number),
//! and RFC 3339 strings written by newer tooling. Both are accepted on read;
//! epoch milliseconds are always written back.

use chrono::{DateTime, SubsecRound, Utc};
use serde::Serializer;

use crate::error::DomainError;

/// Parses a persisted timestamp, accepting epoch milliseconds or RFC 3339.
///
/// # Examples
///
/// ```
/// use clark_domain::common::parse_timestamp;
/// use chrono::Datelike;
///
/// let dt = parse_timestamp("1533081600000").unwrap();
/// assert_eq!(dt.year(), 2018);
///
/// let dt = parse_timestamp("2024-01-15T10:30:00Z").unwrap();
/// assert_eq!(dt.year(), 2024);
/// ```
///
/// # Errors
///
/// Returns `DomainError::InvalidDate` if the string matches neither encoding.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, DomainError> {
    let trimmed = s.trim();
    if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        let millis: i64 = trimmed
            .parse()
            .map_err(|_| DomainError::InvalidDate(s.to_string()))?;
        return from_epoch_millis(millis);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| DomainError::InvalidDate(s.to_string()))
}

/// The current time at the precision documents store (milliseconds).
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Converts epoch milliseconds into a UTC timestamp.
pub fn from_epoch_millis(millis: i64) -> Result<DateTime<Utc>, DomainError> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| DomainError::InvalidDate(millis.to_string()))
}

/// Formats a timestamp the way stored documents carry it.
pub fn to_epoch_millis_string(dt: &DateTime<Utc>) -> String {
    dt.timestamp_millis().to_string()
}

/// `serialize_with` adapter writing a timestamp as an epoch-millisecond string.
pub(crate) fn serialize_epoch_millis<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&to_epoch_millis_string(dt))
}
