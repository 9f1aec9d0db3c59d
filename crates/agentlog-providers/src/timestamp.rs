use crate::error::DecodeError;
use chrono::{DateTime, NaiveDateTime, Utc};

/// Parse a record timestamp; RFC 3339 (fractional seconds optional) first,
/// then a zone-less second-precision form read as UTC.
pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Metadata records must be datable: empty or unparseable is an error.
pub(crate) fn parse_required_timestamp(value: &str) -> Result<DateTime<Utc>, DecodeError> {
    if value.trim().is_empty() {
        return Err(DecodeError::MissingTimestamp);
    }
    parse_timestamp(value).ok_or_else(|| DecodeError::InvalidTimestamp(value.to_string()))
}
