//! UTC timestamps for order and notification records.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// When something happened, always in UTC.
///
/// Stored and serialized as RFC 3339 text so rows and wire payloads
/// stay human-readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The current instant.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Parse an RFC 3339 string, normalizing any offset to UTC.
    ///
    /// # Errors
    ///
    /// Fails when the input is not valid RFC 3339.
    pub fn parse(value: &str) -> Result<Self, chrono::ParseError> {
        Ok(Self(DateTime::parse_from_rfc3339(value)?.with_timezone(&Utc)))
    }

    /// RFC 3339 rendering, the storage and wire form.
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_the_storage_form() {
        let ts = Timestamp::now();
        assert_eq!(Timestamp::parse(&ts.to_rfc3339()).unwrap(), ts);
    }

    #[test]
    fn offsets_normalize_to_utc() {
        let ist = Timestamp::parse("2026-03-01T10:30:00+05:30").unwrap();
        let utc = Timestamp::parse("2026-03-01T05:00:00Z").unwrap();
        assert_eq!(ist, utc);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(Timestamp::parse("yesterday").is_err());
    }

    #[test]
    fn timestamps_order_chronologically() {
        let placed = Timestamp::parse("2026-01-01T00:00:00Z").unwrap();
        let shipped = Timestamp::parse("2026-01-03T00:00:00Z").unwrap();
        assert!(placed < shipped);
    }
}
