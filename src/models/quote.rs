//! Derived booking quote.

/// A derived (nights, total) pair computed from a date range and a
/// nightly price, not yet persisted.
///
/// Produced by [`crate::booking::quote`]; a quote with zero nights is
/// never returned there; invalid date ranges fail instead of quoting
/// zero nights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    /// Number of calendar nights, always `>= 1`.
    pub nights: u32,
    /// Total price for the stay: `nights × price_per_night`.
    pub total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_is_copyable_value_pair() {
        let quote = Quote {
            nights: 2_u32,
            total: 700.0,
        };
        let copy = quote;
        assert_eq!(copy, quote);
    }
}
