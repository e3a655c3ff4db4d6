//! In-memory store backend for testing.
//!
//! Provides [`InMemoryStore`], a thread-safe in-memory implementation of
//! the store traits. Ideal for unit and integration tests where file I/O
//! is undesirable.

use std::sync::Mutex;

#[cfg(feature = "async")]
use core::future::{self, Future};

use crate::error::{HotelBookError, Result};
use crate::models::{Reservation, ReservationId, ReservationStatus};

/// Thread-safe in-memory reservation store.
///
/// This type implements both [`super::ReservationStore`] (async) and
/// [`super::BlockingReservationStore`] (blocking) traits, providing a
/// zero-setup backend for tests.
///
/// # Slot semantics
///
/// The collection is held as `Option<Vec<_>>`: `None` models a backing
/// slot that has never been written, which is the only state
/// `initialize` will seed. Listing an absent slot yields an empty
/// collection without materializing it.
///
/// # Example
///
/// ```rust
/// use hotelbook_rs::store::InMemoryStore;
///
/// let store = InMemoryStore::new();
/// // Use with FrontDesk or FrontDeskBlocking:
/// // FrontDeskBlocking::new(store)
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    /// The reservation collection behind a mutex for thread-safe
    /// interior mutability; `None` until first written.
    collection: Mutex<Option<Vec<Reservation>>>,
}

impl InMemoryStore {
    /// Creates a new store with a never-written slot.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the collection lock and applies a closure.
    fn with_lock<R>(&self, f: impl FnOnce(&mut Option<Vec<Reservation>>) -> R) -> Result<R> {
        let mut collection = self.collection.lock().map_err(|err| lock_error(&err))?;
        Ok(f(&mut collection))
    }

    // ── Shared operation bodies ─────────────────────────────────────

    /// Seeds the slot if it has never been written.
    fn initialize_slot(&self) -> Result<bool> {
        self.with_lock(|slot| {
            if slot.is_some() {
                false
            } else {
                *slot = Some(super::seed_collection());
                true
            }
        })
    }

    /// Returns the collection, empty when the slot is absent.
    fn list_all(&self) -> Result<Vec<Reservation>> {
        self.with_lock(|slot| slot.clone().unwrap_or_default())
    }

    /// Finds the first reservation with the given id.
    fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>> {
        self.with_lock(|slot| {
            slot.as_deref()
                .and_then(|entries| entries.iter().find(|entry| entry.id == id).cloned())
        })
    }

    /// Validates and appends a reservation, materializing an absent slot.
    ///
    /// Validation runs before the slot is touched, so a rejected create
    /// leaves a never-written slot never-written.
    fn append(&self, reservation: Reservation) -> Result<()> {
        self.with_lock(|slot| -> Result<()> {
            super::validate_new(slot.as_deref().unwrap_or(&[]), &reservation)?;
            slot.get_or_insert_with(Vec::new).push(reservation);
            Ok(())
        })?
    }

    /// Sets the status of the first matching reservation.
    fn set_status(&self, id: ReservationId, status: ReservationStatus) -> Result<bool> {
        self.with_lock(|slot| {
            let Some(entries) = slot.as_deref_mut() else {
                return false;
            };
            match entries.iter_mut().find(|entry| entry.id == id) {
                Some(entry) => {
                    entry.status = status;
                    true
                }
                None => false,
            }
        })
    }

    /// Removes every reservation with the given id.
    fn remove_by_id(&self, id: ReservationId) -> Result<bool> {
        self.with_lock(|slot| {
            let Some(entries) = slot.as_mut() else {
                return false;
            };
            let before = entries.len();
            entries.retain(|entry| entry.id != id);
            entries.len() < before
        })
    }

    /// Resets the slot to the never-written state.
    fn reset(&self) -> Result<()> {
        self.with_lock(|slot| *slot = None)
    }
}

/// Wraps a mutex poison error.
fn lock_error<T>(err: &std::sync::PoisonError<T>) -> HotelBookError {
    HotelBookError::Storage(err.to_string().into())
}

// ── BlockingReservationStore implementation ─────────────────────────────

#[cfg(feature = "blocking")]
impl super::BlockingReservationStore for InMemoryStore {
    #[inline]
    fn initialize(&self) -> Result<bool> {
        self.initialize_slot()
    }

    #[inline]
    fn reservations(&self) -> Result<Vec<Reservation>> {
        self.list_all()
    }

    #[inline]
    fn get(&self, id: ReservationId) -> Result<Option<Reservation>> {
        self.find_by_id(id)
    }

    #[inline]
    fn create(&self, reservation: Reservation) -> Result<()> {
        self.append(reservation)
    }

    #[inline]
    fn update_status(&self, id: ReservationId, status: ReservationStatus) -> Result<bool> {
        self.set_status(id, status)
    }

    #[inline]
    fn delete(&self, id: ReservationId) -> Result<bool> {
        self.remove_by_id(id)
    }

    #[inline]
    fn clear(&self) -> Result<()> {
        self.reset()
    }
}

// ── ReservationStore (async) implementation ─────────────────────────────

#[cfg(feature = "async")]
impl super::ReservationStore for InMemoryStore {
    #[inline]
    fn initialize(&self) -> impl Future<Output = Result<bool>> + Send {
        future::ready(self.initialize_slot())
    }

    #[inline]
    fn reservations(&self) -> impl Future<Output = Result<Vec<Reservation>>> + Send {
        future::ready(self.list_all())
    }

    #[inline]
    fn get(&self, id: ReservationId) -> impl Future<Output = Result<Option<Reservation>>> + Send {
        future::ready(self.find_by_id(id))
    }

    #[inline]
    fn create(&self, reservation: Reservation) -> impl Future<Output = Result<()>> + Send {
        future::ready(self.append(reservation))
    }

    #[inline]
    fn update_status(
        &self,
        id: ReservationId,
        status: ReservationStatus,
    ) -> impl Future<Output = Result<bool>> + Send {
        future::ready(self.set_status(id, status))
    }

    #[inline]
    fn delete(&self, id: ReservationId) -> impl Future<Output = Result<bool>> + Send {
        future::ready(self.remove_by_id(id))
    }

    #[inline]
    fn clear(&self) -> impl Future<Output = Result<()>> + Send {
        future::ready(self.reset())
    }
}
