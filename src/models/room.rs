//! Room catalog model.

/// A bookable room type with its nightly price.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    /// Room-type label shown to guests.
    pub room_type: String,
    /// Price per night.
    pub price_per_night: f64,
}

impl Room {
    /// Returns the built-in room catalog, in display order.
    #[inline]
    #[must_use]
    pub fn catalog() -> Vec<Self> {
        vec![
            Self {
                room_type: "Standard Room".to_owned(),
                price_per_night: 150.0,
            },
            Self {
                room_type: "Family Room".to_owned(),
                price_per_night: 220.0,
            },
            Self {
                room_type: "Deluxe Suite".to_owned(),
                price_per_night: 350.0,
            },
        ]
    }

    /// Returns `true` if the room type contains `term`
    /// (case-insensitive).
    #[inline]
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        self.room_type
            .to_lowercase()
            .contains(&term.to_lowercase())
    }

    /// Looks up a catalog room by exact label (case-insensitive).
    #[inline]
    #[must_use]
    pub fn find_by_type(room_type: &str) -> Option<Self> {
        Self::catalog()
            .into_iter()
            .find(|room| room.room_type.eq_ignore_ascii_case(room_type))
    }
}
