//! Location domain model.
//!
//! A [`Location`] is a single point of interest shown in the sidebar and on the
//! map. Locations are immutable once created; the store replaces them
//! wholesale instead of editing records in place.
//!
//! # Category Styling
//!
//! Every [`Category`] maps to a fixed [`CategoryStyle`] (glyph + marker color).
//! [`Category::Unclassified`] is the fallback case, used for nearby-search
//! results gathered without an active category and for unknown category
//! strings in location files.

use super::error::{AtlasError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Highest rating a location can carry.
pub const MAX_RATING: f64 = 5.0;

/// Geographic coordinate in decimal degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude, `-90.0..=90.0`.
    pub lat: f64,
    /// Longitude, `-180.0..=180.0`.
    pub lng: f64,
}

impl Coordinate {
    /// Creates a coordinate without validation.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns `true` when both components are finite and within range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}

impl FromStr for Coordinate {
    type Err = AtlasError;

    /// Parses `"lat,lng"` (whitespace around either component is ignored).
    fn from_str(s: &str) -> Result<Self> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| AtlasError::Parse(format!("expected 'lat,lng', got '{s}'")))?;

        let lat = lat
            .trim()
            .parse::<f64>()
            .map_err(|e| AtlasError::Parse(format!("invalid latitude '{}': {e}", lat.trim())))?;
        let lng = lng
            .trim()
            .parse::<f64>()
            .map_err(|e| AtlasError::Parse(format!("invalid longitude '{}': {e}", lng.trim())))?;

        let coordinate = Self::new(lat, lng);
        if coordinate.is_valid() {
            Ok(coordinate)
        } else {
            Err(AtlasError::Parse(format!("coordinate out of range: {s}")))
        }
    }
}

/// Point-of-interest category.
///
/// Serialized in lowercase (`"park"`, `"museum"`, ...). Any unrecognized
/// string deserializes to [`Category::Unclassified`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Restaurant,
    Park,
    Museum,
    Landmark,
    Shopping,
    #[serde(other)]
    Unclassified,
}

/// Glyph and marker color for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStyle {
    /// Glyph drawn on the map canvas.
    pub glyph: &'static str,
    /// Marker color as a hex string.
    pub color: &'static str,
}

impl Category {
    /// Every selectable category, in filter-bar order.
    pub const SELECTABLE: [Self; 5] = [
        Self::Restaurant,
        Self::Park,
        Self::Museum,
        Self::Landmark,
        Self::Shopping,
    ];

    /// Lowercase name used for matching and serialization.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Restaurant => "restaurant",
            Self::Park => "park",
            Self::Museum => "museum",
            Self::Landmark => "landmark",
            Self::Shopping => "shopping",
            Self::Unclassified => "unclassified",
        }
    }

    /// Plural label for the filter bar.
    #[must_use]
    pub const fn plural_label(self) -> &'static str {
        match self {
            Self::Restaurant => "Restaurants",
            Self::Park => "Parks",
            Self::Museum => "Museums",
            Self::Landmark => "Landmarks",
            Self::Shopping => "Shopping",
            Self::Unclassified => "Other",
        }
    }

    /// Marker glyph and color for this category.
    ///
    /// # Example
    ///
    /// ```
    /// use atlasphere::domain::Category;
    ///
    /// assert_eq!(Category::Park.style().color, "#22c55e");
    /// assert_eq!(Category::Unclassified.style().glyph, "📍");
    /// ```
    #[must_use]
    pub const fn style(self) -> CategoryStyle {
        match self {
            Self::Restaurant => CategoryStyle { glyph: "🍽️", color: "#ef4444" },
            Self::Park => CategoryStyle { glyph: "🌳", color: "#22c55e" },
            Self::Museum => CategoryStyle { glyph: "🏛️", color: "#8b5cf6" },
            Self::Landmark => CategoryStyle { glyph: "🗼", color: "#f59e0b" },
            Self::Shopping => CategoryStyle { glyph: "🛍️", color: "#ec4899" },
            Self::Unclassified => CategoryStyle { glyph: "📍", color: "#10b981" },
        }
    }

    /// Place type understood by the nearby-search provider, if any.
    #[must_use]
    pub const fn provider_type(self) -> Option<&'static str> {
        match self {
            Self::Restaurant => Some("restaurant"),
            Self::Park => Some("park"),
            Self::Museum => Some("museum"),
            Self::Landmark => Some("tourist_attraction"),
            Self::Shopping => Some("shopping_mall"),
            Self::Unclassified => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a location, unique within one store snapshot.
///
/// Seed records use numeric strings; nearby-search results carry the
/// provider's place id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(String);

impl LocationId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A point of interest.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub category: Category,
    pub coordinate: Coordinate,
    pub description: String,
    /// Average rating, `0.0..=5.0`.
    pub rating: f64,
    /// Number of reviews the rating is based on.
    pub reviews: u32,
    /// Glyph shown on the sidebar card (may differ from the category glyph).
    pub icon: String,
    /// Free-form opening hours / practical details.
    pub details: String,
}

impl Location {
    /// Checks the data-model constraints of a single record.
    ///
    /// # Errors
    ///
    /// Returns [`AtlasError::InvalidLocation`] when the name is blank, the
    /// rating falls outside `[0, 5]`, or the coordinate is out of range.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| AtlasError::InvalidLocation {
            id: self.id.to_string(),
            reason: reason.to_string(),
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name must not be empty"));
        }
        if !(0.0..=MAX_RATING).contains(&self.rating) {
            return Err(invalid("rating must be between 0 and 5"));
        }
        if !self.coordinate.is_valid() {
            return Err(invalid("coordinate out of range"));
        }
        Ok(())
    }

    /// Returns the marker style for this location's category.
    #[must_use]
    pub const fn style(&self) -> CategoryStyle {
        self.category.style()
    }
}
