//! Epoch-millisecond timestamps.
//!
//! Licenses carry two notions of time: the human-readable issuance instant
//! (`generated`, RFC 3339 in UTC with millisecond precision) and the
//! machine-readable expiration (`expiration`, milliseconds since the Unix
//! epoch). [`Timestamp`] bridges both.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result, Validity};

/// An instant expressed as milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp at the current system time.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    /// Creates a timestamp from epoch milliseconds.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the epoch milliseconds.
    #[must_use]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// Converts to a UTC date-time, or `None` when out of chrono's range.
    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }

    /// Renders the timestamp as RFC 3339, e.g. `2024-03-01T09:30:00.250Z`.
    pub fn to_rfc3339(&self) -> Result<String> {
        self.to_datetime()
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
            .ok_or_else(|| Error::InvalidTimestamp(format!("{} ms is out of range", self.0)))
    }

    /// Parses an RFC 3339 string (any offset) into a timestamp.
    pub fn parse_rfc3339(s: &str) -> Result<Self> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self(dt.timestamp_millis()))
            .map_err(|e| Error::InvalidTimestamp(format!("{s:?}: {e}")))
    }

    /// Returns this instant advanced by `validity`.
    ///
    /// Month and year units use calendar arithmetic (clamping to the last
    /// day of the month), the rest are fixed-length.
    pub fn checked_add(&self, validity: &Validity) -> Result<Self> {
        let start = self.to_datetime().ok_or_else(|| {
            Error::InvalidTimestamp(format!("{} ms is out of range", self.0))
        })?;
        validity
            .add_to(start)
            .map(|end| Self(end.timestamp_millis()))
            .ok_or_else(|| Error::InvalidValidity(format!("{validity} overflows from {start}")))
    }

    /// Returns true if this timestamp is strictly before the other.
    #[must_use]
    pub fn is_before(&self, other: &Self) -> bool {
        self < other
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp_millis())
    }
}
