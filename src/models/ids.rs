//! Newtype wrapper for reservation identifiers.
//!
//! Prevents accidentally mixing raw integers and reservation ids at
//! compile time.

use serde::{Deserialize, Serialize};

/// Unique identifier for a reservation.
///
/// Ids are monotonically derived from creation time (Unix milliseconds)
/// and unique within a collection at all times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(i64);

impl ReservationId {
    /// Creates a new identifier from the given value.
    #[inline]
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns a reference to the inner value.
    #[inline]
    #[must_use]
    pub const fn as_inner(&self) -> &i64 {
        &self.0
    }

    /// Consumes the wrapper and returns the inner value.
    #[inline]
    #[must_use]
    pub const fn into_inner(self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for ReservationId {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for ReservationId {
    #[inline]
    fn from(value: i64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_serde_is_transparent() {
        let id = ReservationId::new(101_i64);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "101");
        let back: ReservationId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn id_display_and_inner() {
        let id = ReservationId::from(1_700_000_000_000_i64);
        assert_eq!(id.to_string(), "1700000000000");
        assert_eq!(id.into_inner(), 1_700_000_000_000_i64);
    }

    #[test]
    fn id_ordering_follows_inner_value() {
        assert!(ReservationId::new(1_i64) < ReservationId::new(2_i64));
    }
}
