//! Enumeration types for constrained reservation values.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a reservation.
///
/// A reservation is created as [`Pending`](Self::Pending) and mutated only
/// via admin-triggered transitions to [`Confirmed`](Self::Confirmed) or
/// [`Cancelled`](Self::Cancelled). Serialized as the capitalized variant
/// name, matching the stored wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReservationStatus {
    /// Submitted by a guest, awaiting admin confirmation.
    Pending,
    /// Confirmed by an admin; counts toward revenue.
    Confirmed,
    /// Cancelled; kept in the collection for the record.
    Cancelled,
}

impl ReservationStatus {
    /// Returns `true` for statuses that still occupy a room.
    #[inline]
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }
}

impl core::fmt::Display for ReservationStatus {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match *self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Cancelled => "Cancelled",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serde_pending() {
        let json = serde_json::to_string(&ReservationStatus::Pending).unwrap();
        assert_eq!(json, r#""Pending""#);
        let back: ReservationStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ReservationStatus::Pending);
    }

    #[test]
    fn status_serde_confirmed() {
        let back: ReservationStatus = serde_json::from_str(r#""Confirmed""#).unwrap();
        assert_eq!(back, ReservationStatus::Confirmed);
    }

    #[test]
    fn status_serde_cancelled() {
        let json = serde_json::to_string(&ReservationStatus::Cancelled).unwrap();
        assert_eq!(json, r#""Cancelled""#);
    }

    #[test]
    fn status_rejects_unknown_value() {
        let result = serde_json::from_str::<ReservationStatus>(r#""Archived""#);
        assert!(result.is_err());
    }

    #[test]
    fn status_activity() {
        assert!(ReservationStatus::Pending.is_active());
        assert!(ReservationStatus::Confirmed.is_active());
        assert!(!ReservationStatus::Cancelled.is_active());
    }

    #[test]
    fn status_display_matches_wire_format() {
        assert_eq!(ReservationStatus::Pending.to_string(), "Pending");
        assert_eq!(ReservationStatus::Confirmed.to_string(), "Confirmed");
        assert_eq!(ReservationStatus::Cancelled.to_string(), "Cancelled");
    }
}
