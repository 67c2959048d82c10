//! Filter/search engine deriving the visible location set.
//!
//! Pure functions over a store snapshot. A [`Selector`] records what produced
//! the current visible set so it can be recomputed after the store changes.
//!
//! - [`filter`]: category filter
//! - [`search`]: first-match substring search

pub mod filter;
pub mod search;

pub use filter::{filter_locations, CategoryFilter};
pub use search::search_locations;

use crate::domain::{Location, LocationId};

/// What the visible set was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Every location passing a category filter.
    Category(CategoryFilter),
    /// The single location a search resolved to.
    Match(LocationId),
}

impl Default for Selector {
    fn default() -> Self {
        Self::Category(CategoryFilter::All)
    }
}

/// Recomputes the visible set for `selector`.
///
/// A `Match` whose location is no longer in the store yields an empty set.
#[must_use]
pub fn visible_locations(store: &[Location], selector: &Selector) -> Vec<Location> {
    match selector {
        Selector::Category(filter) => filter_locations(store, *filter),
        Selector::Match(id) => store.iter().filter(|l| &l.id == id).cloned().collect(),
    }
}
