//! Case-insensitive substring search over the location store.
//!
//! A query matches a location when its name, category or description contains
//! the trimmed query, ignoring case. Only the first match in store order is
//! returned; there is no ranking.

use crate::domain::{AtlasError, Location, Result};

/// Finds the first location matching `query`.
///
/// # Returns
///
/// - `Ok(Some(location))` for the first match in store order
/// - `Ok(None)` when nothing matches (an ordinary outcome)
///
/// # Errors
///
/// Returns [`AtlasError::EmptyQuery`] if the query is empty or only
/// whitespace. The store is not consulted in that case.
///
/// # Example
///
/// ```
/// use atlasphere::domain::seed_locations;
/// use atlasphere::engine::search_locations;
///
/// let store = seed_locations();
/// let hit = search_locations(&store, "brooklyn").unwrap();
/// assert_eq!(hit.map(|l| l.name.as_str()), Some("Brooklyn Bridge"));
/// ```
pub fn search_locations<'a>(store: &'a [Location], query: &str) -> Result<Option<&'a Location>> {
    let needle = query.trim();
    if needle.is_empty() {
        return Err(AtlasError::EmptyQuery);
    }

    let _span = tracing::debug_span!("search_locations", total = store.len(), query = %needle).entered();

    let needle = needle.to_lowercase();
    let found = store.iter().find(|location| matches_query(location, &needle));

    tracing::debug!(found = ?found.map(|l| &l.id), "search completed");
    Ok(found)
}

/// `needle` must already be lowercase.
fn matches_query(location: &Location, needle: &str) -> bool {
    location.name.to_lowercase().contains(needle)
        || location.category.as_str().contains(needle)
        || location.description.to_lowercase().contains(needle)
}
