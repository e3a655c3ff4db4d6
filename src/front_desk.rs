//! High-level reservation service with integrated storage.
//!
//! Combines the pure [`crate::booking`] calculator with a
//! [`ReservationStore`](crate::store::ReservationStore) /
//! [`BlockingReservationStore`](crate::store::BlockingReservationStore)
//! backend: the booking side quotes and submits, the admin side lists,
//! confirms, cancels, and deletes.

use chrono::NaiveDate;

use crate::models::{Reservation, ReservationStatus};

/// Upper bound on id-allocation retries when a concurrent booking claims
/// the same creation id between the read and the create.
const ID_RETRY_LIMIT: u32 = 3;

/// A booking submission: the raw form fields before quoting.
///
/// The nightly price is carried alongside the dates because the quote
/// (nights and total) is derived, never entered directly.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    /// Guest display name.
    pub guest: String,
    /// Room-type label.
    pub room: String,
    /// Check-in date.
    pub check_in: NaiveDate,
    /// Check-out date; must be strictly after `check_in`.
    pub check_out: NaiveDate,
    /// Price per night for the chosen room.
    pub price_per_night: f64,
}

/// Composable filter for querying reservations.
///
/// Use builder-style methods to chain multiple criteria. All conditions
/// are combined: a reservation must satisfy every set criterion to pass.
///
/// # Examples
///
/// ```
/// use hotelbook_rs::front_desk::ReservationFilter;
/// use hotelbook_rs::models::{NaiveDate, ReservationStatus};
///
/// let filter = ReservationFilter::new()
///     .status(ReservationStatus::Pending)
///     .room("suite")
///     .check_in_range(
///         NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
///         NaiveDate::from_ymd_opt(2026, 2, 28).unwrap(),
///     );
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReservationFilter {
    /// Lifecycle status to match exactly.
    pub status: Option<ReservationStatus>,
    /// Guest-name substring (case-insensitive).
    pub guest: Option<String>,
    /// Room-label substring (case-insensitive).
    pub room: Option<String>,
    /// Earliest check-in date (inclusive).
    pub check_in_from: Option<NaiveDate>,
    /// Latest check-in date (inclusive).
    pub check_in_to: Option<NaiveDate>,
}

impl ReservationFilter {
    /// Creates an empty filter that matches all reservations.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to reservations with the given status.
    #[inline]
    #[must_use]
    pub const fn status(mut self, status: ReservationStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to reservations whose guest name contains the given
    /// substring (case-insensitive).
    #[inline]
    #[must_use]
    pub fn guest<T: Into<String>>(mut self, name: T) -> Self {
        self.guest = Some(name.into());
        self
    }

    /// Restricts to reservations whose room label contains the given
    /// substring (case-insensitive).
    #[inline]
    #[must_use]
    pub fn room<T: Into<String>>(mut self, label: T) -> Self {
        self.room = Some(label.into());
        self
    }

    /// Restricts to reservations checking in within the given date
    /// range (inclusive).
    #[inline]
    #[must_use]
    pub const fn check_in_range(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.check_in_from = Some(from);
        self.check_in_to = Some(to);
        self
    }

    /// Returns `true` if the reservation satisfies all set criteria.
    #[inline]
    #[must_use]
    pub fn matches(&self, reservation: &Reservation) -> bool {
        self.matches_status(reservation)
            && self.matches_guest(reservation)
            && self.matches_room(reservation)
            && self.matches_check_in(reservation)
    }

    /// Status criterion.
    fn matches_status(&self, reservation: &Reservation) -> bool {
        self.status
            .is_none_or(|status| reservation.status == status)
    }

    /// Guest substring criterion.
    fn matches_guest(&self, reservation: &Reservation) -> bool {
        self.guest.as_deref().is_none_or(|needle| {
            reservation
                .guest
                .to_lowercase()
                .contains(&needle.to_lowercase())
        })
    }

    /// Room substring criterion.
    fn matches_room(&self, reservation: &Reservation) -> bool {
        self.room.as_deref().is_none_or(|needle| {
            reservation
                .room
                .to_lowercase()
                .contains(&needle.to_lowercase())
        })
    }

    /// Check-in date range criterion.
    fn matches_check_in(&self, reservation: &Reservation) -> bool {
        self.check_in_from
            .is_none_or(|from| reservation.check_in >= from)
            && self.check_in_to.is_none_or(|to| reservation.check_in <= to)
    }
}

/// Generates a high-level front-desk service (async or blocking).
macro_rules! define_front_desk {
    (
        service_name: $service:ident,
        store_trait: $store_trait:ident,
        service_doc: $service_doc:expr,
        $(async_kw: $async_kw:tt,)?
        $(await_kw: $await_ext:tt,)?
    ) => {
        #[doc = $service_doc]
        #[derive(Debug)]
        pub struct $service<S: $store_trait> {
            /// Backing reservation store.
            store: S,
        }

        impl<S: $store_trait> $service<S> {
            /// Creates a front desk over the given store.
            #[inline]
            #[must_use]
            pub const fn new(store: S) -> Self {
                Self { store }
            }

            /// Seeds the default reservation collection if the backing
            /// slot has never been written. Idempotent.
            ///
            /// # Errors
            ///
            /// Returns an error if the store fails to read or write.
            #[inline]
            pub $($async_kw)? fn initialize(&self) -> Result<bool> {
                let seeded = self.store.initialize() $( .$await_ext )? ?;
                if seeded {
                    tracing::debug!("seeded default reservation collection");
                }
                Ok(seeded)
            }

            /// Quotes the request, allocates a creation-time id, and
            /// stores a new `Pending` reservation.
            ///
            /// The id is the current Unix-millisecond timestamp, bumped
            /// past the collection's maximum so that two bookings within
            /// the same millisecond still get distinct ids. If another
            /// writer claims the id between the read and the create, the
            /// allocation is retried a bounded number of times.
            ///
            /// Returns the stored record.
            ///
            /// # Errors
            ///
            /// Returns [`HotelBookError::InvalidDateRange`] or
            /// [`HotelBookError::InvalidPrice`] when the quote is
            /// invalid, [`HotelBookError::InvalidReservation`] when the
            /// guest or room field is empty, or a storage error if
            /// persisting fails.
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn book(&self, request: BookingRequest) -> Result<Reservation> {
                let quote = booking::quote(
                    request.check_in,
                    request.check_out,
                    request.price_per_night,
                )?;
                let mut attempts_left = super::ID_RETRY_LIMIT;
                loop {
                    let existing = self.store.reservations() $( .$await_ext )? ?;
                    let next_after_max = existing
                        .iter()
                        .map(|entry| entry.id.into_inner())
                        .max()
                        .map_or(0_i64, |max| max.saturating_add(1_i64));
                    let id =
                        ReservationId::new(Utc::now().timestamp_millis().max(next_after_max));
                    let reservation = Reservation::from_quote(
                        id,
                        request.guest.clone(),
                        request.room.clone(),
                        request.check_in,
                        &quote,
                    );
                    match self.store.create(reservation.clone()) $( .$await_ext )? {
                        Ok(()) => {
                            tracing::info!(
                                id = %reservation.id,
                                guest = %reservation.guest,
                                nights = reservation.nights,
                                "reservation created"
                            );
                            return Ok(reservation);
                        }
                        Err(HotelBookError::DuplicateId(_)) if attempts_left > 0_u32 => {
                            attempts_left -= 1_u32;
                            tracing::debug!(id = %id, "creation id already taken, retrying");
                        }
                        Err(err) => return Err(err),
                    }
                }
            }

            /// Returns all reservations in insertion order.
            ///
            /// # Errors
            ///
            /// Returns an error if the store fails to read.
            #[inline]
            pub $($async_kw)? fn reservations(&self) -> Result<Vec<Reservation>> {
                self.store.reservations() $( .$await_ext )?
            }

            /// Returns the reservations matching the given filter, in
            /// insertion order.
            ///
            /// # Errors
            ///
            /// Returns an error if the store fails to read.
            #[inline]
            pub $($async_kw)? fn filtered(
                &self,
                filter: &ReservationFilter,
            ) -> Result<Vec<Reservation>> {
                let all = self.store.reservations() $( .$await_ext )? ?;
                Ok(all
                    .into_iter()
                    .filter(|entry| filter.matches(entry))
                    .collect())
            }

            /// Returns the reservation with the given id, if any.
            ///
            /// # Errors
            ///
            /// Returns an error if the store fails to read.
            #[inline]
            pub $($async_kw)? fn find(&self, id: ReservationId) -> Result<Option<Reservation>> {
                self.store.get(id) $( .$await_ext )?
            }

            /// Confirms the reservation with the given id.
            ///
            /// Returns `false` when the id is absent.
            ///
            /// # Errors
            ///
            /// Returns an error if the store fails to read or write.
            #[inline]
            pub $($async_kw)? fn confirm(&self, id: ReservationId) -> Result<bool> {
                self.store
                    .update_status(id, ReservationStatus::Confirmed) $( .$await_ext )?
            }

            /// Cancels the reservation with the given id.
            ///
            /// Returns `false` when the id is absent.
            ///
            /// # Errors
            ///
            /// Returns an error if the store fails to read or write.
            #[inline]
            pub $($async_kw)? fn cancel(&self, id: ReservationId) -> Result<bool> {
                self.store
                    .update_status(id, ReservationStatus::Cancelled) $( .$await_ext )?
            }

            /// Deletes the reservation with the given id.
            ///
            /// Returns `false` when the id is absent.
            ///
            /// # Errors
            ///
            /// Returns an error if the store fails to read or write.
            #[inline]
            pub $($async_kw)? fn remove(&self, id: ReservationId) -> Result<bool> {
                let removed = self.store.delete(id) $( .$await_ext )? ?;
                if removed {
                    tracing::info!(id = %id, "reservation deleted");
                }
                Ok(removed)
            }

            /// Returns the summed total of all confirmed reservations.
            ///
            /// # Errors
            ///
            /// Returns an error if the store fails to read.
            #[inline]
            pub $($async_kw)? fn total_revenue(&self) -> Result<f64> {
                let all = self.store.reservations() $( .$await_ext )? ?;
                Ok(all
                    .iter()
                    .filter(|entry| entry.status == ReservationStatus::Confirmed)
                    .map(|entry| entry.total)
                    .sum())
            }

            /// Wipes the reservation collection entirely.
            ///
            /// The next [`Self::initialize`] call will re-seed the demo
            /// record.
            ///
            /// # Errors
            ///
            /// Returns an error if the store fails to write.
            #[inline]
            pub $($async_kw)? fn clear_all(&self) -> Result<()> {
                self.store.clear() $( .$await_ext )?
            }
        }
    };
}

// ── Async variant ───────────────────────────────────────────────────────

#[cfg(feature = "async")]
mod async_front_desk {
    //! Async front-desk service.

    use chrono::Utc;

    use crate::booking;
    use crate::error::{HotelBookError, Result};
    use crate::models::{Reservation, ReservationId, ReservationStatus};
    use crate::store::ReservationStore;

    use super::{BookingRequest, ReservationFilter};

    define_front_desk! {
        service_name: FrontDesk,
        store_trait: ReservationStore,
        service_doc: "High-level async reservation service.\n\nWraps a [`ReservationStore`] with quoting, id allocation, status\ntransitions, filtering, and revenue summation.",
        async_kw: async,
        await_kw: await,
    }
}

// ── Blocking variant ────────────────────────────────────────────────────

#[cfg(feature = "blocking")]
mod blocking_front_desk {
    //! Blocking front-desk service.

    use chrono::Utc;

    use crate::booking;
    use crate::error::{HotelBookError, Result};
    use crate::models::{Reservation, ReservationId, ReservationStatus};
    use crate::store::BlockingReservationStore;

    use super::{BookingRequest, ReservationFilter};

    define_front_desk! {
        service_name: FrontDeskBlocking,
        store_trait: BlockingReservationStore,
        service_doc: "High-level blocking reservation service.\n\nWraps a [`BlockingReservationStore`] with quoting, id allocation,\nstatus transitions, filtering, and revenue summation.",
    }
}

#[cfg(feature = "async")]
pub use async_front_desk::FrontDesk;
#[cfg(feature = "blocking")]
pub use blocking_front_desk::FrontDeskBlocking;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ReservationId, ReservationStatus};
    use crate::store::InMemoryStore;

    /// Builds a [`NaiveDate`] from parts.
    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// Builds a two-night booking request.
    fn request(guest: &str, room: &str, price: f64) -> BookingRequest {
        BookingRequest {
            guest: guest.to_owned(),
            room: room.to_owned(),
            check_in: date(2026, 2, 10),
            check_out: date(2026, 2, 12),
            price_per_night: price,
        }
    }

    /// Creates a stored reservation for filter tests.
    fn sample(id: i64, guest: &str, room: &str, status: ReservationStatus) -> Reservation {
        Reservation {
            id: ReservationId::new(id),
            guest: guest.to_owned(),
            room: room.to_owned(),
            check_in: date(2026, 2, 10),
            nights: 2_u32,
            total: 700.0,
            status,
        }
    }

    #[test]
    fn filter_empty_matches_everything() {
        let filter = ReservationFilter::new();
        assert!(filter.matches(&sample(1, "Alice", "Deluxe Suite", ReservationStatus::Pending)));
    }

    #[test]
    fn filter_by_status() {
        let filter = ReservationFilter::new().status(ReservationStatus::Confirmed);
        assert!(filter.matches(&sample(1, "Alice", "Suite", ReservationStatus::Confirmed)));
        assert!(!filter.matches(&sample(2, "Bob", "Suite", ReservationStatus::Pending)));
    }

    #[test]
    fn filter_by_guest_substring_is_case_insensitive() {
        let filter = ReservationFilter::new().guest("wonder");
        assert!(filter.matches(&sample(
            1,
            "Alice Wonderland",
            "Suite",
            ReservationStatus::Pending
        )));
        assert!(!filter.matches(&sample(2, "Bob", "Suite", ReservationStatus::Pending)));
    }

    #[test]
    fn filter_by_check_in_range() {
        let filter = ReservationFilter::new().check_in_range(date(2026, 2, 1), date(2026, 2, 28));
        assert!(filter.matches(&sample(1, "Alice", "Suite", ReservationStatus::Pending)));
        let narrow =
            ReservationFilter::new().check_in_range(date(2026, 3, 1), date(2026, 3, 31));
        assert!(!narrow.matches(&sample(1, "Alice", "Suite", ReservationStatus::Pending)));
    }

    #[test]
    fn filter_combines_criteria() {
        let filter = ReservationFilter::new()
            .status(ReservationStatus::Pending)
            .room("suite");
        assert!(filter.matches(&sample(1, "Alice", "Deluxe Suite", ReservationStatus::Pending)));
        assert!(!filter.matches(&sample(2, "Bob", "Deluxe Suite", ReservationStatus::Confirmed)));
        assert!(!filter.matches(&sample(3, "Carol", "Standard Room", ReservationStatus::Pending)));
    }

    #[cfg(feature = "blocking")]
    mod blocking {
        use std::sync::atomic::{AtomicBool, Ordering};

        use super::*;
        use crate::error::{HotelBookError, Result};
        use crate::store::BlockingReservationStore;

        /// Store that reports one spurious duplicate-id failure before
        /// delegating, simulating a booking that loses the id race.
        #[derive(Debug)]
        struct ContendedStore {
            /// Delegate holding the real collection.
            inner: InMemoryStore,
            /// Whether the next create fails with a duplicate id.
            fail_next: AtomicBool,
        }

        impl ContendedStore {
            /// Creates a store whose first create loses the race.
            fn new() -> Self {
                Self {
                    inner: InMemoryStore::new(),
                    fail_next: AtomicBool::new(true),
                }
            }
        }

        impl BlockingReservationStore for ContendedStore {
            fn initialize(&self) -> Result<bool> {
                self.inner.initialize()
            }

            fn reservations(&self) -> Result<Vec<Reservation>> {
                self.inner.reservations()
            }

            fn get(&self, id: ReservationId) -> Result<Option<Reservation>> {
                self.inner.get(id)
            }

            fn create(&self, reservation: Reservation) -> Result<()> {
                if self.fail_next.swap(false, Ordering::SeqCst) {
                    return Err(HotelBookError::DuplicateId(reservation.id));
                }
                self.inner.create(reservation)
            }

            fn update_status(&self, id: ReservationId, status: ReservationStatus) -> Result<bool> {
                self.inner.update_status(id, status)
            }

            fn delete(&self, id: ReservationId) -> Result<bool> {
                self.inner.delete(id)
            }

            fn clear(&self) -> Result<()> {
                self.inner.clear()
            }
        }

        #[test]
        fn book_stores_a_pending_reservation() {
            let desk = FrontDeskBlocking::new(InMemoryStore::new());
            let stored = desk.book(request("Bob Builder", "Deluxe Suite", 350.0)).unwrap();
            assert_eq!(stored.status, ReservationStatus::Pending);
            assert_eq!(stored.nights, 2_u32);
            assert!((stored.total - 700.0).abs() < f64::EPSILON);

            let listed = desk.reservations().unwrap();
            assert_eq!(listed.len(), 1);
            assert_eq!(listed[0], stored);
        }

        #[test]
        fn book_rejects_invalid_date_range() {
            let desk = FrontDeskBlocking::new(InMemoryStore::new());
            let mut bad = request("Bob", "Suite", 350.0);
            bad.check_out = bad.check_in;
            assert!(matches!(
                desk.book(bad),
                Err(HotelBookError::InvalidDateRange { .. })
            ));
            assert!(desk.reservations().unwrap().is_empty());
        }

        #[test]
        fn book_rejects_blank_guest() {
            let desk = FrontDeskBlocking::new(InMemoryStore::new());
            assert!(matches!(
                desk.book(request("  ", "Suite", 350.0)),
                Err(HotelBookError::InvalidReservation(_))
            ));
        }

        #[test]
        fn consecutive_bookings_get_distinct_increasing_ids() {
            let desk = FrontDeskBlocking::new(InMemoryStore::new());
            let first = desk.book(request("Bob", "Suite", 350.0)).unwrap();
            let second = desk.book(request("Carol", "Suite", 350.0)).unwrap();
            let third = desk.book(request("Dave", "Suite", 350.0)).unwrap();
            assert!(first.id < second.id);
            assert!(second.id < third.id);
        }

        #[test]
        fn book_retries_when_the_creation_id_is_taken() {
            let desk = FrontDeskBlocking::new(ContendedStore::new());
            let stored = desk.book(request("Bob", "Suite", 350.0)).unwrap();
            assert_eq!(desk.reservations().unwrap(), vec![stored]);
        }

        #[test]
        fn initialize_seeds_then_booking_appends() {
            let desk = FrontDeskBlocking::new(InMemoryStore::new());
            assert!(desk.initialize().unwrap());
            assert!(!desk.initialize().unwrap());
            let stored = desk.book(request("Bob", "Standard Room", 150.0)).unwrap();
            let listed = desk.reservations().unwrap();
            assert_eq!(listed.len(), 2);
            assert_eq!(listed[0].guest, "Alice Wonderland");
            assert_eq!(listed[1], stored);
        }

        #[test]
        fn confirm_and_cancel_transition_status() {
            let desk = FrontDeskBlocking::new(InMemoryStore::new());
            let stored = desk.book(request("Bob", "Suite", 350.0)).unwrap();
            assert!(desk.confirm(stored.id).unwrap());
            assert_eq!(
                desk.find(stored.id).unwrap().unwrap().status,
                ReservationStatus::Confirmed
            );
            assert!(desk.cancel(stored.id).unwrap());
            assert_eq!(
                desk.find(stored.id).unwrap().unwrap().status,
                ReservationStatus::Cancelled
            );
            assert!(!desk.confirm(ReservationId::new(9_i64)).unwrap());
        }

        #[test]
        fn remove_deletes_and_reports() {
            let desk = FrontDeskBlocking::new(InMemoryStore::new());
            let stored = desk.book(request("Bob", "Suite", 350.0)).unwrap();
            assert!(desk.remove(stored.id).unwrap());
            assert!(!desk.remove(stored.id).unwrap());
            assert!(desk.reservations().unwrap().is_empty());
        }

        #[test]
        fn filtered_returns_matching_subset() {
            let desk = FrontDeskBlocking::new(InMemoryStore::new());
            let first = desk.book(request("Bob", "Deluxe Suite", 350.0)).unwrap();
            let _second = desk.book(request("Carol", "Standard Room", 150.0)).unwrap();
            assert!(desk.confirm(first.id).unwrap());

            let confirmed = desk
                .filtered(&ReservationFilter::new().status(ReservationStatus::Confirmed))
                .unwrap();
            assert_eq!(confirmed.len(), 1);
            assert_eq!(confirmed[0].guest, "Bob");

            let suites = desk
                .filtered(&ReservationFilter::new().room("suite"))
                .unwrap();
            assert_eq!(suites.len(), 1);
        }

        #[test]
        fn revenue_counts_only_confirmed() {
            let desk = FrontDeskBlocking::new(InMemoryStore::new());
            let first = desk.book(request("Bob", "Deluxe Suite", 350.0)).unwrap();
            let second = desk.book(request("Carol", "Standard Room", 150.0)).unwrap();
            let third = desk.book(request("Dave", "Family Room", 220.0)).unwrap();
            assert!(desk.confirm(first.id).unwrap());
            assert!(desk.confirm(second.id).unwrap());
            assert!(desk.cancel(third.id).unwrap());

            // 2 × 350 + 2 × 150 = 1000; the cancelled booking is excluded.
            assert!((desk.total_revenue().unwrap() - 1_000.0).abs() < f64::EPSILON);
        }

        #[test]
        fn clear_all_allows_reseeding() {
            let desk = FrontDeskBlocking::new(InMemoryStore::new());
            assert!(desk.initialize().unwrap());
            let _stored = desk.book(request("Bob", "Suite", 350.0)).unwrap();
            desk.clear_all().unwrap();
            assert!(desk.reservations().unwrap().is_empty());
            assert!(desk.initialize().unwrap());
        }
    }

    #[cfg(feature = "async")]
    mod async_tests {
        use super::*;

        #[tokio::test]
        async fn book_confirm_and_revenue() {
            let desk = FrontDesk::new(InMemoryStore::new());
            let stored = desk
                .book(request("Bob", "Deluxe Suite", 350.0))
                .await
                .unwrap();
            assert!(desk.confirm(stored.id).await.unwrap());
            assert!((desk.total_revenue().await.unwrap() - 700.0).abs() < f64::EPSILON);
        }

        #[tokio::test]
        async fn initialize_is_idempotent() {
            let desk = FrontDesk::new(InMemoryStore::new());
            assert!(desk.initialize().await.unwrap());
            assert!(!desk.initialize().await.unwrap());
            assert_eq!(desk.reservations().await.unwrap().len(), 1);
        }

        #[tokio::test]
        async fn remove_reports_absence() {
            let desk = FrontDesk::new(InMemoryStore::new());
            assert!(!desk.remove(ReservationId::new(1_i64)).await.unwrap());
        }
    }
}
