//! Timestamp parsing for backend payloads
//!
//! The backend serializes UTC instants but may omit the trailing offset,
//! so a naive `2025-03-01T10:00:00` must be read as UTC rather than local
//! time. Every date-handling path in the workspace goes through
//! [`parse_utc`] so the assumption lives in exactly one place.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Parse an ISO-8601 timestamp, assuming UTC when the offset is absent.
///
/// Returns `None` for malformed input. Callers treat an unparseable
/// timestamp as a non-match, never as a fatal error.
pub fn parse_utc(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    // No offset marker: the wall clock is already UTC.
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Format an instant as the `HH:MM` wall-clock string used in event
/// descriptions and conflict listings.
pub fn format_hhmm(dt: DateTime<Utc>) -> String {
    dt.format("%H:%M").to_string()
}
