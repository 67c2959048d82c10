//! View-state controller: sidebar, fullscreen, filter and search text.
//!
//! The three presentation axes (sidebar, fullscreen, filter) are independent
//! and each is changed by its own action. Nothing here is persisted.
//!
//! # Sidebar
//!
//! ```text
//!            toggle                      resize < breakpoint
//!   Open ◀──────────▶ Collapsed{auto: false}
//!    │  ▲
//!    │  └──── resize ≥ breakpoint ────┐
//!    └──── resize < breakpoint ──▶ Collapsed{auto: true}
//! ```
//!
//! Only a sidebar that was collapsed by a narrow viewport is re-opened when
//! the viewport widens again; a sidebar the user collapsed stays collapsed.

use crate::domain::{Coordinate, LocationId};
use crate::engine::{CategoryFilter, Selector};

/// Sidebar visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarState {
    Open,
    Collapsed {
        /// `true` when collapsed by a narrow viewport rather than by the user.
        auto: bool,
    },
}

/// Presentation state owned by [`AppState`](super::AppState).
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// What produced the current visible set.
    pub selector: Selector,
    /// Active category filter (also drives the filter indicator).
    pub filter: CategoryFilter,
    /// Text of the search that produced the visible set, empty when none.
    pub search_text: String,
    pub sidebar: SidebarState,
    pub fullscreen: bool,
    /// Last position reported by geolocation.
    pub user_location: Option<Coordinate>,
    /// Last known pane width in columns.
    pub viewport_cols: Option<usize>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            selector: Selector::default(),
            filter: CategoryFilter::All,
            search_text: String::new(),
            sidebar: SidebarState::Open,
            fullscreen: false,
            user_location: None,
            viewport_cols: None,
        }
    }
}

impl ViewState {
    #[must_use]
    pub const fn sidebar_open(&self) -> bool {
        matches!(self.sidebar, SidebarState::Open)
    }

    /// User-initiated sidebar toggle.
    pub fn toggle_sidebar(&mut self) {
        self.sidebar = match self.sidebar {
            SidebarState::Open => SidebarState::Collapsed { auto: false },
            SidebarState::Collapsed { .. } => SidebarState::Open,
        };
        tracing::debug!(sidebar = ?self.sidebar, "sidebar toggled");
    }

    /// Applies a viewport width change.
    ///
    /// # Returns
    ///
    /// `true` if the sidebar state changed.
    pub fn resize(&mut self, cols: usize, breakpoint: usize) -> bool {
        self.viewport_cols = Some(cols);

        let next = match self.sidebar {
            SidebarState::Open if cols < breakpoint => SidebarState::Collapsed { auto: true },
            SidebarState::Collapsed { auto: true } if cols >= breakpoint => SidebarState::Open,
            current => current,
        };

        if next == self.sidebar {
            return false;
        }

        tracing::debug!(cols, breakpoint, from = ?self.sidebar, to = ?next, "sidebar resized");
        self.sidebar = next;
        true
    }

    /// Flips fullscreen if the capability exists.
    ///
    /// # Returns
    ///
    /// The new fullscreen flag, or `None` when unavailable (state unchanged).
    pub fn toggle_fullscreen(&mut self, available: bool) -> Option<bool> {
        if !available {
            tracing::debug!("fullscreen unavailable, ignoring toggle");
            return None;
        }
        self.fullscreen = !self.fullscreen;
        Some(self.fullscreen)
    }

    /// Activates a category filter and clears any search.
    pub fn select_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
        self.selector = Selector::Category(filter);
        self.search_text.clear();
    }

    /// Narrows the view to a search match.
    pub fn select_match(&mut self, id: LocationId, query: &str) {
        self.selector = Selector::Match(id);
        self.search_text = query.trim().to_string();
    }

    /// Drops a search match and returns to the active filter.
    ///
    /// # Returns
    ///
    /// `true` if a search was active.
    pub fn clear_search(&mut self) -> bool {
        if matches!(self.selector, Selector::Match(_)) {
            self.selector = Selector::Category(self.filter);
            self.search_text.clear();
            true
        } else {
            false
        }
    }
}
