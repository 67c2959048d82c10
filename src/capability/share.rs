//! Directions and share links for a location.

use crate::domain::{Coordinate, Location};

/// How a share request was delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareChannel {
    /// The platform share command.
    Native,
    /// Copied to the clipboard.
    Clipboard,
}

/// Title, text and URL handed to a share target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl ShareLink {
    #[must_use]
    pub fn for_location(location: &Location) -> Self {
        Self {
            title: location.name.clone(),
            text: format!("Check out {} on Atlasphere!", location.name),
            url: place_url(location.coordinate),
        }
    }
}

/// Turn-by-turn directions to `destination`.
///
/// ```
/// use atlasphere::capability::directions_url;
/// use atlasphere::domain::Coordinate;
///
/// assert_eq!(
///     directions_url(Coordinate::new(40.7061, -73.9969)),
///     "https://www.google.com/maps/dir/?api=1&destination=40.7061,-73.9969"
/// );
/// ```
#[must_use]
pub fn directions_url(destination: Coordinate) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&destination={},{}",
        destination.lat, destination.lng
    )
}

/// Map link pointing at `coordinate`.
#[must_use]
pub fn place_url(coordinate: Coordinate) -> String {
    format!("https://www.google.com/maps/place/{},{}", coordinate.lat, coordinate.lng)
}
