//! Reservation record model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{HotelBookError, Result};

use super::{Quote, ReservationId, ReservationStatus};

/// A single booking record with guest, room, dates, pricing, and status.
///
/// Field invariants for any persisted reservation: `guest` and `room` are
/// non-empty, `nights >= 1`, and `total` is non-negative and equals
/// `nights × price_per_night` at creation time. [`validate`](Self::validate)
/// checks everything that can be checked without the original nightly price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// Unique identifier, derived from creation time.
    pub id: ReservationId,
    /// Guest display name.
    pub guest: String,
    /// Room-type label.
    pub room: String,
    /// Check-in calendar date (ISO-8601 on the wire, no time component).
    pub check_in: NaiveDate,
    /// Number of nights, derived from the date range — never entered
    /// directly.
    pub nights: u32,
    /// Total price for the stay.
    pub total: f64,
    /// Lifecycle status.
    pub status: ReservationStatus,
}

impl Reservation {
    /// Builds a new `Pending` reservation from a validated quote.
    #[inline]
    #[must_use]
    pub const fn from_quote(
        id: ReservationId,
        guest: String,
        room: String,
        check_in: NaiveDate,
        quote: &Quote,
    ) -> Self {
        Self {
            id,
            guest,
            room,
            check_in,
            nights: quote.nights,
            total: quote.total,
            status: ReservationStatus::Pending,
        }
    }

    /// Checks the record-level invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HotelBookError::InvalidReservation`] if the guest or room
    /// label is empty, the night count is zero, or the total is negative
    /// or not finite.
    #[inline]
    pub fn validate(&self) -> Result<()> {
        if self.guest.trim().is_empty() {
            return Err(HotelBookError::InvalidReservation("guest name is empty"));
        }
        if self.room.trim().is_empty() {
            return Err(HotelBookError::InvalidReservation("room label is empty"));
        }
        if self.nights == 0 {
            return Err(HotelBookError::InvalidReservation(
                "a reservation must cover at least one night",
            ));
        }
        if !self.total.is_finite() || self.total < 0.0 {
            return Err(HotelBookError::InvalidReservation(
                "total must be a non-negative amount",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Creates the canonical demo reservation.
    fn sample() -> Reservation {
        Reservation {
            id: ReservationId::new(101_i64),
            guest: "Alice Wonderland".to_owned(),
            room: "Deluxe Suite".to_owned(),
            check_in: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
            nights: 2_u32,
            total: 700.0,
            status: ReservationStatus::Confirmed,
        }
    }

    #[test]
    fn deserialize_reservation_wire_format() {
        let json = r#"{
            "id": 101,
            "guest": "Alice Wonderland",
            "room": "Deluxe Suite",
            "checkIn": "2026-02-10",
            "nights": 2,
            "total": 700,
            "status": "Confirmed"
        }"#;
        let reservation: Reservation = serde_json::from_str(json).unwrap();
        assert_eq!(reservation, sample());
    }

    #[test]
    fn serialize_uses_camel_case_check_in() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains(r#""checkIn":"2026-02-10""#));
        assert!(!json.contains("check_in"));
    }

    #[test]
    fn serialize_roundtrip() {
        let reservation = sample();
        let json = serde_json::to_string(&reservation).unwrap();
        let back: Reservation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reservation);
    }

    #[test]
    fn from_quote_starts_pending() {
        let quote = Quote {
            nights: 3_u32,
            total: 450.0,
        };
        let reservation = Reservation::from_quote(
            ReservationId::new(7_i64),
            "Bob".to_owned(),
            "Standard Room".to_owned(),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            &quote,
        );
        assert_eq!(reservation.status, ReservationStatus::Pending);
        assert_eq!(reservation.nights, 3_u32);
        assert!((reservation.total - 450.0).abs() < f64::EPSILON);
    }

    #[test]
    fn validate_accepts_well_formed_record() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_guest() {
        let mut reservation = sample();
        reservation.guest = "   ".to_owned();
        assert!(matches!(
            reservation.validate(),
            Err(HotelBookError::InvalidReservation(_))
        ));
    }

    #[test]
    fn validate_rejects_empty_room() {
        let mut reservation = sample();
        reservation.room = String::new();
        assert!(reservation.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_nights() {
        let mut reservation = sample();
        reservation.nights = 0_u32;
        assert!(reservation.validate().is_err());
    }

    #[test]
    fn validate_rejects_negative_total() {
        let mut reservation = sample();
        reservation.total = -1.0;
        assert!(reservation.validate().is_err());
    }

    #[test]
    fn validate_rejects_nan_total() {
        let mut reservation = sample();
        reservation.total = f64::NAN;
        assert!(reservation.validate().is_err());
    }
}
