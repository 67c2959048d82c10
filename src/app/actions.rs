//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to the host. It returns a `Vec<Action>` that
//! the plugin shim in `main.rs` executes in order. Every capability request
//! (`RequestPosition`, `SearchNearby`, `FindPlace`, `Share`,
//! `CopyToClipboard`) is answered later by exactly one reply
//! [`Event`](super::Event).
//!
//! # Example
//!
//! ```rust
//! use atlasphere::app::Action;
//! use atlasphere::capability::PositionOptions;
//!
//! let actions = vec![Action::RequestPosition(PositionOptions::default())];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::capability::{NearbyRequest, PlaceQuery, PositionOptions, ShareLink};
use crate::notify::ScheduledTimer;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Asks the geolocation capability for the current position.
    ///
    /// Answered by [`Event::PositionResolved`](super::Event::PositionResolved).
    RequestPosition(PositionOptions),

    /// Runs a nearby search against the places service.
    ///
    /// Answered by [`Event::NearbyResults`](super::Event::NearbyResults).
    SearchNearby(NearbyRequest),

    /// Resolves free text to a single place.
    ///
    /// Answered by [`Event::PlaceFound`](super::Event::PlaceFound).
    FindPlace(PlaceQuery),

    /// Enters (`true`) or leaves (`false`) fullscreen.
    SetFullscreen(bool),

    /// Opens a URL with the configured opener.
    OpenUrl(String),

    /// Hands a link to the native share command.
    ///
    /// Answered by [`Event::ShareCompleted`](super::Event::ShareCompleted).
    Share(ShareLink),

    /// Copies a link to the clipboard.
    ///
    /// Answered by [`Event::ShareCompleted`](super::Event::ShareCompleted).
    CopyToClipboard(ShareLink),

    /// Schedules a toast lifecycle timer.
    ScheduleTimer(ScheduledTimer),
}
