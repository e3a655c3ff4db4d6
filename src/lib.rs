//! Typed hotel reservation store with date-range pricing.
//!
//! This crate provides the core of a small hotel booking system: a
//! [`store`] abstraction owning the reservation collection, a pure
//! [`booking`] calculator turning a date range and a nightly price into a
//! validated quote, and a high-level [`front_desk`] service composing the
//! two.

pub mod booking;
pub mod error;
pub mod front_desk;
pub mod models;
pub mod store;
