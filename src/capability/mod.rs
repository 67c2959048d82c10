//! External capabilities the application depends on.
//!
//! Each capability is a contract with the plugin host: the application emits a
//! request [`Action`](crate::app::Action) and later receives exactly one reply
//! [`Event`](crate::app::Event). Availability is decided up front from the
//! plugin configuration and recorded in [`Capabilities`], so the handler can
//! fall back without issuing a request that could never be answered.
//!
//! - [`geolocation`]: position requests and the command-backed locator
//! - [`places`]: nearby search and find-place against a web service
//! - [`share`]: directions and share links

pub mod geolocation;
pub mod places;
pub mod share;

pub use geolocation::{CommandLocator, GeolocationError, LocateStep, PositionOptions, PositionReply};
pub use places::{FoundPlace, NearbyPlace, NearbyRequest, PlaceQuery, PlaceSearchError, DEFAULT_RADIUS_M};
pub use share::{directions_url, place_url, ShareChannel, ShareLink};

/// Which capabilities the host can provide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub geolocation: bool,
    pub fullscreen: bool,
    pub places: bool,
    pub native_share: bool,
    pub clipboard: bool,
    pub open_url: bool,
}

impl Capabilities {
    /// Every capability available.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            geolocation: true,
            fullscreen: true,
            places: true,
            native_share: true,
            clipboard: true,
            open_url: true,
        }
    }
}
