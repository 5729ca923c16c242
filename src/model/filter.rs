use std::fmt;

use super::camp::Camp;
use super::time_region::TimeRegion;

/// A predicate over camps. Lists of filters are combined with AND.
#[derive(Clone)]
pub enum Filter {
    /// Keeps camps that run entirely inside the region.
    DateRange(TimeRegion),
    /// Keeps camps held at exactly this location.
    Location(String),
    Predicate(fn(&Camp) -> bool),
}

impl Filter {
    pub fn accept(&self, camp: &Camp) -> bool {
        match self {
            Filter::DateRange(region) => region.fully_covers(&camp.region),
            Filter::Location(location) => camp.location == *location,
            Filter::Predicate(f) => f(camp),
        }
    }

    pub fn accept_all(filters: &[Filter], camp: &Camp) -> bool {
        filters.iter().all(|f| f.accept(camp))
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::DateRange(region) => f.debug_tuple("DateRange").field(region).finish(),
            Filter::Location(location) => f.debug_tuple("Location").field(location).finish(),
            Filter::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}
