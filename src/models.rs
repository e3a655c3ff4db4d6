//! Data models for the reservation domain.
//!
//! This module contains the strongly-typed reservation record, its newtype
//! identifier, the status lifecycle enumeration, derived quotes, and the
//! built-in room catalog.

mod enums;
mod ids;
mod quote;
mod reservation;
mod room;

pub use chrono::NaiveDate;
pub use enums::ReservationStatus;
pub use ids::ReservationId;
pub use quote::Quote;
pub use reservation::Reservation;
pub use room::Room;
