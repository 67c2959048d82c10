//! Input mode state machine.
//!
//! The plugin starts in [`InputMode::LocationPrompt`], asking whether the
//! current position may be used. Once the prompt is answered it moves to
//! [`InputMode::Normal`] and never returns to the prompt.
//!
//! ```text
//! LocationPrompt ──allow / default──▶ Normal ◀──submit / esc──▶ Search
//! ```
//!
//! # Example
//!
//! ```rust
//! use atlasphere::app::modes::InputMode;
//!
//! let mode = InputMode::default();
//! assert!(mode.is_prompt());
//! ```

/// Current input handling mode.
///
/// Controls which keybindings are active and what the footer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Startup prompt asking for location permission.
    ///
    /// Available keybindings: y/Enter (allow), n/Esc (use default), q (quit).
    #[default]
    LocationPrompt,

    /// Map navigation and commands.
    Normal,

    /// Typing into the search bar.
    ///
    /// Characters edit the query; Enter submits; Esc cancels.
    Search,
}

impl InputMode {
    #[must_use]
    pub const fn is_prompt(self) -> bool {
        matches!(self, Self::LocationPrompt)
    }

    #[must_use]
    pub const fn is_search(self) -> bool {
        matches!(self, Self::Search)
    }
}

/// Why a position request was issued.
///
/// Startup requests initialize the map on failure; button requests leave it
/// where it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocateOrigin {
    Startup,
    Button,
}
