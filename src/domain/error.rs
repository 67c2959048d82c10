//! Error types for the Atlasphere plugin.
//!
//! This module defines the centralized error type [`AtlasError`] and a type alias
//! [`Result`] used throughout the library. Capability-specific failures
//! (geolocation, place search) live next to their capability contracts in
//! [`crate::capability`] and are reported to the user rather than propagated.

use thiserror::Error;

/// The main error type for Atlasphere operations.
///
/// None of these conditions is fatal to the plugin: the event handler turns
/// user-facing variants into notifications and the plugin shim logs the rest.
///
/// # Examples
///
/// ```
/// use atlasphere::domain::AtlasError;
///
/// let err = AtlasError::EmptyQuery;
/// assert_eq!(err.to_string(), "Please enter a search term");
/// ```
#[derive(Debug, Error)]
pub enum AtlasError {
    /// A search was submitted with an empty or whitespace-only query.
    ///
    /// Rejected before the store is consulted. The message doubles as the
    /// notification text shown to the user.
    #[error("Please enter a search term")]
    EmptyQuery,

    /// A location record violates a data-model constraint.
    ///
    /// Raised while loading a locations file: rating outside `[0, 5]`,
    /// latitude/longitude out of range, or an empty name.
    #[error("Invalid location '{id}': {reason}")]
    InvalidLocation {
        /// Identifier of the offending record.
        id: String,
        /// Which constraint was violated.
        reason: String,
    },

    /// Two records in one store snapshot share an identifier.
    #[error("Duplicate location id: {0}")]
    DuplicateLocationId(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A TOML or JSON document could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for AtlasError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// A specialized `Result` type for Atlasphere operations.
pub type Result<T> = std::result::Result<T, AtlasError>;
