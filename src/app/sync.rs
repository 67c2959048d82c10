//! Render synchronizer.
//!
//! After every recompute of the visible set, [`synchronize`] rebuilds the
//! three projections that depend on it:
//!
//! 1. the sidebar cards, one per visible location and in the same order
//! 2. the marker layer: every existing marker is removed, then one marker is
//!    placed per visible location (no diffing)
//! 3. the counters shown in the header
//!
//! The function is idempotent: calling it twice with the same visible set
//! leaves an identical snapshot and marker layer.

use crate::domain::{Category, Location, LocationId};
use crate::engine::CategoryFilter;
use crate::map::{MapWidget, Marker};

/// Summary card shown in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationCard {
    pub id: LocationId,
    pub name: String,
    pub icon: String,
    pub category: Category,
    pub description: String,
    /// One star per whole rating point.
    pub stars: String,
    /// e.g. `4.8 (12,543 reviews)`.
    pub rating_label: String,
    pub details: String,
}

impl LocationCard {
    #[must_use]
    pub fn from_location(location: &Location) -> Self {
        Self {
            id: location.id.clone(),
            name: location.name.clone(),
            icon: location.icon.clone(),
            category: location.category,
            description: location.description.clone(),
            stars: stars(location.rating),
            rating_label: format!("{:.1} ({} reviews)", location.rating, group_thousands(location.reviews)),
            details: location.details.clone(),
        }
    }
}

/// Whether a single category filter is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveFilters {
    All,
    One,
}

impl ActiveFilters {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::One => "1",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counters {
    /// Number of visible locations.
    pub total: usize,
    pub active_filters: ActiveFilters,
}

/// Everything the sidebar and header draw from the visible set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSnapshot {
    pub cards: Vec<LocationCard>,
    pub counters: Counters,
}

impl Default for RenderSnapshot {
    fn default() -> Self {
        Self {
            cards: Vec::new(),
            counters: Counters {
                total: 0,
                active_filters: ActiveFilters::All,
            },
        }
    }
}

/// Rebuilds cards, markers and counters from `visible`.
///
/// # Example
///
/// ```rust
/// use atlasphere::app::sync::synchronize;
/// use atlasphere::domain::{seed_locations, DEFAULT_CENTER};
/// use atlasphere::engine::CategoryFilter;
/// use atlasphere::map::{MapView, MapWidget};
///
/// let mut map = MapView::new(DEFAULT_CENTER);
/// let snapshot = synchronize(&seed_locations(), &mut map, CategoryFilter::All);
/// assert_eq!(snapshot.counters.total, 8);
/// assert_eq!(map.marker_ids().len(), 8);
/// ```
pub fn synchronize<M: MapWidget + ?Sized>(visible: &[Location], map: &mut M, filter: CategoryFilter) -> RenderSnapshot {
    let _span = tracing::debug_span!("synchronize", visible = visible.len(), filter = ?filter).entered();

    let stale = map.marker_ids();
    for id in &stale {
        map.remove_marker(id);
    }

    for location in visible {
        map.add_marker(Marker::for_location(location));
    }

    tracing::debug!(removed = stale.len(), placed = visible.len(), "marker layer rebuilt");

    RenderSnapshot {
        cards: visible.iter().map(LocationCard::from_location).collect(),
        counters: Counters {
            total: visible.len(),
            active_filters: match filter {
                CategoryFilter::All => ActiveFilters::All,
                CategoryFilter::Only(_) => ActiveFilters::One,
            },
        },
    }
}

fn stars(rating: f64) -> String {
    // Ratings are validated to 0..=5 before they reach the store.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let whole = rating.floor().clamp(0.0, 5.0) as usize;
    "⭐".repeat(whole)
}

fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{seed_locations, Coordinate};
    use crate::engine::filter_locations;

    /// Records every marker operation so tests can check the destroy/recreate order.
    #[derive(Default)]
    struct RecordingMap {
        markers: Vec<LocationId>,
        log: Vec<String>,
    }

    impl MapWidget for RecordingMap {
        fn center(&self) -> Coordinate {
            Coordinate::new(0.0, 0.0)
        }

        fn zoom(&self) -> u8 {
            13
        }

        fn pan_to(&mut self, _target: Coordinate) {}

        fn set_zoom(&mut self, _zoom: u8) {}

        fn add_marker(&mut self, marker: Marker) {
            self.log.push(format!("add {}", marker.id()));
            self.markers.push(marker.id().clone());
        }

        fn remove_marker(&mut self, id: &LocationId) -> Option<Marker> {
            self.log.push(format!("remove {id}"));
            self.markers.retain(|existing| existing != id);
            None
        }

        fn marker_ids(&self) -> Vec<LocationId> {
            self.markers.clone()
        }

        fn open_popup(&mut self, _id: &LocationId) -> bool {
            false
        }

        fn close_popup(&mut self) {}

        fn set_user_marker(&mut self, _position: Option<Coordinate>) {}
    }

    #[test]
    fn test_markers_destroyed_before_recreated() {
        let store = seed_locations();
        let mut map = RecordingMap::default();

        synchronize(&store[..2], &mut map, CategoryFilter::All);
        map.log.clear();
        synchronize(&store[..1], &mut map, CategoryFilter::All);

        assert_eq!(map.log, vec!["remove 1", "remove 2", "add 1"]);
    }

    #[test]
    fn test_no_stale_markers_after_filter_change() {
        let store = seed_locations();
        let mut map = RecordingMap::default();
        synchronize(&store, &mut map, CategoryFilter::All);

        let parks = filter_locations(&store, CategoryFilter::Only(Category::Park));
        synchronize(&parks, &mut map, CategoryFilter::Only(Category::Park));

        assert_eq!(map.markers.len(), parks.len());
        assert!(map.markers.iter().all(|id| parks.iter().any(|l| &l.id == id)));
    }

    #[test]
    fn test_synchronize_is_idempotent() {
        let store = seed_locations();
        let mut map = RecordingMap::default();

        let first = synchronize(&store, &mut map, CategoryFilter::All);
        let markers_after_first = map.marker_ids();
        let second = synchronize(&store, &mut map, CategoryFilter::All);

        assert_eq!(first, second);
        assert_eq!(map.marker_ids(), markers_after_first);
    }

    #[test]
    fn test_empty_visible_set_is_not_an_error() {
        let mut map = RecordingMap::default();
        let snapshot = synchronize(&[], &mut map, CategoryFilter::Only(Category::Museum));

        assert!(snapshot.cards.is_empty());
        assert_eq!(snapshot.counters.total, 0);
        assert_eq!(snapshot.counters.active_filters.label(), "1");
        assert!(map.markers.is_empty());
    }

    #[test]
    fn test_card_formatting() {
        let store = seed_locations();
        let card = LocationCard::from_location(&store[0]);

        assert_eq!(card.name, "Central Park");
        assert_eq!(card.stars, "⭐⭐⭐⭐");
        assert_eq!(card.rating_label, "4.8 (12,543 reviews)");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(12_543), "12,543");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }
}
