//! Location store: the ordered, in-memory list of locations.
//!
//! The store is owned by [`AppState`](crate::app::AppState) and is only ever
//! replaced wholesale (seed data on startup, a locations file, or a fresh
//! batch of nearby-search results). Records are never merged or edited.
//!
//! # Locations File
//!
//! A custom store can be loaded from TOML:
//!
//! ```toml
//! [[locations]]
//! id = "ferry"
//! name = "Staten Island Ferry"
//! category = "landmark"
//! lat = 40.7013
//! lng = -74.0132
//! description = "Free ferry with views of the Statue of Liberty."
//! rating = 4.6
//! reviews = 3200
//! icon = "⛴️"
//! details = "Runs 24/7"
//! ```
//!
//! `icon`, `description`, `details`, `rating` and `reviews` are optional; a
//! missing icon falls back to the category glyph.

use super::error::{AtlasError, Result};
use super::location::{Category, Coordinate, Location, LocationId};
use super::seed::seed_locations;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Ordered sequence of locations with unique identifiers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationStore {
    locations: Vec<Location>,
}

/// On-disk representation of a single location.
#[derive(Debug, Deserialize)]
struct LocationRecord {
    id: String,
    name: String,
    #[serde(default = "unclassified")]
    category: Category,
    lat: f64,
    lng: f64,
    #[serde(default)]
    description: String,
    #[serde(default)]
    rating: f64,
    #[serde(default)]
    reviews: u32,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    details: String,
}

const fn unclassified() -> Category {
    Category::Unclassified
}

#[derive(Debug, Deserialize)]
struct LocationsFile {
    #[serde(default)]
    locations: Vec<LocationRecord>,
}

impl From<LocationRecord> for Location {
    fn from(record: LocationRecord) -> Self {
        let icon = record
            .icon
            .unwrap_or_else(|| record.category.style().glyph.to_string());

        Self {
            id: LocationId::new(record.id),
            name: record.name,
            category: record.category,
            coordinate: Coordinate::new(record.lat, record.lng),
            description: record.description,
            rating: record.rating,
            reviews: record.reviews,
            icon,
            details: record.details,
        }
    }
}

impl LocationStore {
    /// Builds a store from an ordered list of locations.
    ///
    /// # Errors
    ///
    /// - [`AtlasError::DuplicateLocationId`] if two records share an id
    /// - [`AtlasError::InvalidLocation`] if any record fails validation
    pub fn new(locations: Vec<Location>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(locations.len());
        for location in &locations {
            location.validate()?;
            if !seen.insert(&location.id) {
                return Err(AtlasError::DuplicateLocationId(location.id.to_string()));
            }
        }
        Ok(Self { locations })
    }

    /// Store populated with the built-in seed locations.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            locations: seed_locations(),
        }
    }

    /// Parses a TOML locations document.
    ///
    /// # Errors
    ///
    /// Returns [`AtlasError::Parse`] for malformed TOML and the validation
    /// errors of [`LocationStore::new`].
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: LocationsFile = toml::from_str(contents)?;
        Self::new(file.locations.into_iter().map(Location::from).collect())
    }

    /// Reads and parses a TOML locations file.
    ///
    /// # Errors
    ///
    /// Returns [`AtlasError::Io`] if the file cannot be read, otherwise the
    /// errors of [`LocationStore::from_toml_str`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), bytes = contents.len(), "read locations file");
        Self::from_toml_str(&contents)
    }

    /// Replaces every record with the contents of `other`.
    pub fn replace(&mut self, other: Self) {
        tracing::debug!(previous = self.locations.len(), next = other.locations.len(), "replacing location store");
        self.locations = other.locations;
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Location] {
        &self.locations
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Looks up a location by id.
    #[must_use]
    pub fn get(&self, id: &LocationId) -> Option<&Location> {
        self.locations.iter().find(|location| &location.id == id)
    }
}
