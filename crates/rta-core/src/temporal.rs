//! # Temporal Types
//!
//! UTC-only timestamp type for the RTA Stack. All timestamps are stored
//! in UTC and serialize with second-level precision and a `Z` suffix in
//! canonical form.
//!
//! ## Design Decision
//!
//! Registration offices, test centers, and checkpoint scanners operate in
//! local time, but the signed credential payload must be unambiguous. All
//! timestamps are UTC; local time conversion is a presentation concern for
//! the consuming layer.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A UTC timestamp.
///
/// Serializes to ISO 8601; the canonical form used for signing truncates to
/// seconds with a `Z` suffix (e.g., `2026-01-15T12:00:00Z`), matching the
/// canonicalization rules in [`crate::canonical`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp representing the current UTC time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Access the underlying `chrono::DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Return a timestamp `days` days after this one.
    ///
    /// Used for expiry arithmetic (license validity periods).
    pub fn plus_days(&self, days: u32) -> Self {
        Self(self.0 + Duration::days(i64::from(days)))
    }

    /// Return the timestamp as an ISO 8601 string with Z suffix,
    /// truncated to seconds (matching canonicalization rules).
    pub fn to_canonical_string(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}
