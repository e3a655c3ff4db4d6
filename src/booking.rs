//! Pure date-range-to-price computation.
//!
//! Stateless function pair behind every quote: the number of calendar
//! nights between two dates, and the resulting stay total. [`quote`] is
//! the single validation gate before a reservation may be created: a
//! range that yields zero nights is rejected instead of being quoted.

use chrono::NaiveDate;

use crate::error::{HotelBookError, Result};
use crate::models::Quote;

/// Returns the number of calendar nights between check-in and check-out.
///
/// Defined as the day difference when `check_out > check_in`; any other
/// range (equal, inverted) yields `0`, which callers must treat as an
/// invalid quote.
#[inline]
#[must_use]
pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> u32 {
    let days = (check_out - check_in).num_days();
    u32::try_from(days).unwrap_or(0_u32)
}

/// Returns the total price for a stay of `nights` nights.
#[inline]
#[must_use]
pub fn stay_total(nights: u32, price_per_night: f64) -> f64 {
    f64::from(nights) * price_per_night
}

/// Computes a validated quote for the given date range and nightly price.
///
/// # Errors
///
/// Returns [`HotelBookError::InvalidDateRange`] when `check_out` is not
/// strictly after `check_in`, and [`HotelBookError::InvalidPrice`] when
/// the nightly price is negative or not finite.
#[inline]
pub fn quote(check_in: NaiveDate, check_out: NaiveDate, price_per_night: f64) -> Result<Quote> {
    if !price_per_night.is_finite() || price_per_night < 0.0 {
        return Err(HotelBookError::InvalidPrice(price_per_night));
    }
    let nights = nights_between(check_in, check_out);
    if nights == 0 {
        return Err(HotelBookError::InvalidDateRange {
            check_in,
            check_out,
        });
    }
    Ok(Quote {
        nights,
        total: stay_total(nights, price_per_night),
    })
}
