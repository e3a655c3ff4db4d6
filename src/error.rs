//! Error types for the hotel reservation library.

use chrono::NaiveDate;

use crate::models::ReservationId;

/// Convenience alias for results produced by this crate.
pub type Result<T> = core::result::Result<T, HotelBookError>;

/// All errors that can occur when using the reservation store.
#[derive(Debug, thiserror::Error)]
pub enum HotelBookError {
    /// JSON serialization or deserialization failed (e.g. a corrupted
    /// reservation slot).
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backing storage could not be read or written.
    #[error("storage error: {0}")]
    Storage(Box<dyn core::error::Error + Send + Sync>),

    /// Check-out is not strictly after check-in, so no nights can be
    /// quoted and submission must be blocked.
    #[error("invalid date range: check-out {check_out} is not after check-in {check_in}")]
    InvalidDateRange {
        /// Requested check-in date.
        check_in: NaiveDate,
        /// Requested check-out date.
        check_out: NaiveDate,
    },

    /// The nightly price is negative or not a finite number.
    #[error("invalid nightly price: {0}")]
    InvalidPrice(f64),

    /// A reservation failed store-side validation.
    #[error("invalid reservation: {0}")]
    InvalidReservation(&'static str),

    /// A reservation with the same identifier already exists.
    #[error("duplicate reservation id: {0}")]
    DuplicateId(ReservationId),
}
