//! Map widget: viewport, marker layer, popups and projection.
//!
//! # Zoom Levels
//!
//! | constant | zoom | used when |
//! |---|---|---|
//! | [`OVERVIEW_ZOOM`] | 13 | startup and reset view |
//! | [`LOCATE_ZOOM`] | 14 | centering on the user's position |
//! | [`PLACE_ZOOM`] | 15 | a live place search resolved |
//! | [`FOCUS_ZOOM`] | 16 | a card or marker was selected |

pub mod projection;
pub mod widget;

pub use projection::{Cell, Viewport};
pub use widget::{MapView, MapWidget, Marker};

pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 20;
pub const OVERVIEW_ZOOM: u8 = 13;
pub const LOCATE_ZOOM: u8 = 14;
pub const PLACE_ZOOM: u8 = 15;
pub const FOCUS_ZOOM: u8 = 16;
