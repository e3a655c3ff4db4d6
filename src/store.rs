//! Pluggable backends owning the reservation collection.
//!
//! This module defines the [`ReservationStore`] (async) and
//! [`BlockingReservationStore`] (blocking) traits via a shared macro, so
//! the method list is written exactly once. All reads and writes go
//! through a store: every mutation is a read-modify-write of the whole
//! collection, keeping it consistent as one unit.

#[cfg(feature = "storage-file")]
mod file;
mod memory;

use chrono::NaiveDate;

#[cfg(feature = "storage-file")]
pub use file::FileStore;
pub use memory::InMemoryStore;

use crate::error::{HotelBookError, Result};
use crate::models::{Reservation, ReservationId, ReservationStatus};

/// Check-in date of the seeded demo reservation.
///
/// Evaluated at compile time; the `None` arm can never be taken for a
/// valid calendar date.
const SEED_CHECK_IN: NaiveDate = match NaiveDate::from_ymd_opt(2026, 2, 10) {
    Some(date) => date,
    None => unreachable!(),
};

/// Returns the fixed collection a store seeds on first initialization.
pub(crate) fn seed_collection() -> Vec<Reservation> {
    vec![Reservation {
        id: ReservationId::new(101_i64),
        guest: "Alice Wonderland".to_owned(),
        room: "Deluxe Suite".to_owned(),
        check_in: SEED_CHECK_IN,
        nights: 2_u32,
        total: 700.0,
        status: ReservationStatus::Confirmed,
    }]
}

/// Validates a reservation about to be appended to `existing`.
///
/// Record-level invariants are checked first, then id uniqueness against
/// the current collection.
pub(crate) fn validate_new(existing: &[Reservation], reservation: &Reservation) -> Result<()> {
    reservation.validate()?;
    if existing.iter().any(|entry| entry.id == reservation.id) {
        return Err(HotelBookError::DuplicateId(reservation.id));
    }
    Ok(())
}

/// Generates a store trait (async or blocking) with all collection methods.
///
/// Uses `@methods` to define the method list once, and `@method` to render
/// each method in async (`impl Future + Send`) or blocking (`fn`) style.
macro_rules! define_store {
    // ── Entry points ────────────────────────────────────────────────
    (
        trait_name: $trait_name:ident,
        trait_doc: $trait_doc:expr,
        mode: async_mode,
    ) => {
        #[doc = $trait_doc]
        pub trait $trait_name: core::fmt::Debug + Send + Sync {
            define_store!(@methods async_mode);
        }
    };
    (
        trait_name: $trait_name:ident,
        trait_doc: $trait_doc:expr,
        mode: blocking,
    ) => {
        #[doc = $trait_doc]
        pub trait $trait_name: core::fmt::Debug + Send + Sync {
            define_store!(@methods blocking);
        }
    };

    // ── Single method list (shared between both variants) ───────────
    (@methods $mode:ident) => {
        define_store!(@method $mode, initialize,
            "Seeds the fixed default collection, but only if the backing slot has never been written.\n\nIdempotent: an existing collection — even an empty one — is never overwritten. Returns `true` when seeding happened.\n\n# Errors\n\nReturns an error if the backing storage fails to read or write.",
            -> Result<bool>);
        define_store!(@method $mode, reservations,
            "Returns the full collection in insertion order.\n\nNo filtering, no pagination. Unreadable backing storage is an error, never silently treated as empty.\n\n# Errors\n\nReturns an error if the backing storage fails to read or holds corrupted data.",
            -> Result<Vec<Reservation>>);
        define_store!(@method $mode, get,
            "Returns the first reservation with the given id, if any.\n\n# Errors\n\nReturns an error if the backing storage fails to read.",
            id: ReservationId, -> Result<Option<Reservation>>);
        define_store!(@method $mode, create,
            "Validates the reservation, appends it to the end of the collection, and persists the whole collection.\n\nCreating into a never-written slot materializes it without seeding.\n\n# Errors\n\nReturns [`HotelBookError::InvalidReservation`] or [`HotelBookError::DuplicateId`] on validation failure, or a storage error if persisting fails.",
            reservation: Reservation, -> Result<()>);
        define_store!(@method $mode, update_status,
            "Sets the status of the first reservation with the given id and persists.\n\nReturns `false` (not an error) when the id is absent; the collection is left unchanged.\n\n# Errors\n\nReturns an error if the backing storage fails to read or write.",
            id: ReservationId, status: ReservationStatus, -> Result<bool>);
        define_store!(@method $mode, delete,
            "Removes every reservation with the given id and persists.\n\nReturns `false` when the id is absent; the collection is left unchanged.\n\n# Errors\n\nReturns an error if the backing storage fails to read or write.",
            id: ReservationId, -> Result<bool>);
        define_store!(@method $mode, clear,
            "Resets the backing slot to the never-written state, so a later `initialize` may seed again.\n\n# Errors\n\nReturns an error if the backing storage fails to write.",
            -> Result<()>);
    };

    // ── Blocking method renderer ────────────────────────────────────
    (@method blocking, $name:ident, $doc:expr,
     $($param:ident: $param_ty:ty,)* -> $ret:ty) => {
        #[doc = $doc]
        fn $name(&self $(, $param: $param_ty)*) -> $ret;
    };

    // ── Async method renderer (returns impl Future + Send) ──────────
    (@method async_mode, $name:ident, $doc:expr,
     $($param:ident: $param_ty:ty,)* -> $ret:ty) => {
        #[doc = $doc]
        fn $name(&self $(, $param: $param_ty)*)
            -> impl core::future::Future<Output = $ret> + Send;
    };
}

#[cfg(feature = "async")]
mod async_store {
    //! Async store trait definition.

    use crate::error::Result;
    use crate::models::{Reservation, ReservationId, ReservationStatus};

    #[cfg(doc)]
    use crate::error::HotelBookError;

    define_store! {
        trait_name: ReservationStore,
        trait_doc: "Async store owning the reservation collection.\n\nAll methods take `&self`; implementations should use interior mutability\n(e.g. `Mutex`) for thread-safe mutation.",
        mode: async_mode,
    }
}

#[cfg(feature = "blocking")]
mod blocking_store {
    //! Blocking store trait definition.

    use crate::error::Result;
    use crate::models::{Reservation, ReservationId, ReservationStatus};

    #[cfg(doc)]
    use crate::error::HotelBookError;

    define_store! {
        trait_name: BlockingReservationStore,
        trait_doc: "Blocking store owning the reservation collection.\n\nAll methods take `&self`; implementations should use interior mutability\n(e.g. `Mutex`) for thread-safe mutation.",
        mode: blocking,
    }
}

#[cfg(feature = "async")]
pub use async_store::ReservationStore;
#[cfg(feature = "blocking")]
pub use blocking_store::BlockingReservationStore;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_collection_matches_demo_record() {
        let seeded = seed_collection();
        assert_eq!(seeded.len(), 1);
        let record = seeded.first().unwrap();
        assert_eq!(record.id, ReservationId::new(101_i64));
        assert_eq!(record.guest, "Alice Wonderland");
        assert_eq!(record.room, "Deluxe Suite");
        assert_eq!(record.check_in.to_string(), "2026-02-10");
        assert_eq!(record.nights, 2_u32);
        assert!((record.total - 700.0).abs() < f64::EPSILON);
        assert_eq!(record.status, ReservationStatus::Confirmed);
    }

    #[test]
    fn seed_collection_is_internally_valid() {
        let seeded = seed_collection();
        assert!(validate_new(&[], seeded.first().unwrap()).is_ok());
    }

    #[test]
    fn validate_new_rejects_duplicate_id() {
        let seeded = seed_collection();
        let duplicate = seeded.first().unwrap().clone();
        assert!(matches!(
            validate_new(&seeded, &duplicate),
            Err(HotelBookError::DuplicateId(_))
        ));
    }
}
