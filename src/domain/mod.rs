//! Domain layer for the Atlasphere plugin.
//!
//! Core types independent of Zellij APIs: locations, categories and their
//! styling, the location store, seed data and the crate error type.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`location`]: `Location`, `Category`, `Coordinate` and category styling
//! - [`seed`]: Built-in New York City seed data and the default map center
//! - [`store`]: Ordered location store, replaced wholesale
//!
//! # Examples
//!
//! ```
//! use atlasphere::domain::{Category, LocationStore};
//!
//! let store = LocationStore::seeded();
//! let parks = store
//!     .as_slice()
//!     .iter()
//!     .filter(|location| location.category == Category::Park)
//!     .count();
//! assert_eq!(parks, 2);
//! ```

pub mod error;
pub mod location;
pub mod seed;
pub mod store;

pub use error::{AtlasError, Result};
pub use location::{Category, CategoryStyle, Coordinate, Location, LocationId, MAX_RATING};
pub use seed::{seed_locations, DEFAULT_CENTER};
pub use store::LocationStore;
