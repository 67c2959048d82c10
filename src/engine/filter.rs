//! Equality-based category filtering.

use crate::domain::{Category, Location};

/// Active category selector.
///
/// `All` keeps every location; `Only` keeps locations whose category equals
/// the selected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Filter-bar choices, in display order. Index `n` is bound to key `n`.
    pub const CHOICES: [Self; 6] = [
        Self::All,
        Self::Only(Category::Restaurant),
        Self::Only(Category::Park),
        Self::Only(Category::Museum),
        Self::Only(Category::Landmark),
        Self::Only(Category::Shopping),
    ];

    /// Returns `true` if `location` passes this filter.
    #[must_use]
    pub fn matches(self, location: &Location) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => location.category == category,
        }
    }

    /// Selected category, or `None` for `All`.
    #[must_use]
    pub const fn category(self) -> Option<Category> {
        match self {
            Self::All => None,
            Self::Only(category) => Some(category),
        }
    }

    /// Filter-bar label (`"All"`, `"Parks"`, ...).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(category) => category.plural_label(),
        }
    }
}

/// Returns the locations matching `filter`, preserving store order.
///
/// `CategoryFilter::All` returns the store unchanged.
///
/// # Example
///
/// ```
/// use atlasphere::domain::{seed_locations, Category};
/// use atlasphere::engine::{filter_locations, CategoryFilter};
///
/// let store = seed_locations();
/// let parks = filter_locations(&store, CategoryFilter::Only(Category::Park));
/// assert_eq!(parks.len(), 2);
/// assert_eq!(filter_locations(&store, CategoryFilter::All), store);
/// ```
#[must_use]
pub fn filter_locations(store: &[Location], filter: CategoryFilter) -> Vec<Location> {
    let _span = tracing::debug_span!("filter_locations", total = store.len(), filter = ?filter).entered();

    let visible: Vec<Location> = store
        .iter()
        .filter(|location| filter.matches(location))
        .cloned()
        .collect();

    tracing::debug!(visible = visible.len(), "category filter applied");
    visible
}
