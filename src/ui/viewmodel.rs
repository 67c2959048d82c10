//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data:
//! formatted strings, canvas cells and the frame [`Layout`].

use crate::app::sync::LocationCard;
use crate::map::Cell;
use crate::notify::Severity;
use crate::ui::layout::Layout;

/// Complete UI view model for one frame.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub layout: Layout,
    pub header: HeaderInfo,
    pub filter_bar: FilterBarInfo,
    /// Present in search mode.
    pub search_bar: Option<SearchBarInfo>,
    /// Present while the sidebar is open.
    pub sidebar: Option<SidebarInfo>,
    pub map: MapCanvas,
    /// Detail popup of the focused marker.
    pub popup: Option<PopupInfo>,
    /// Live toasts, oldest first.
    pub toasts: Vec<ToastItem>,
    /// Startup location prompt, drawn over everything else.
    pub prompt: Option<PromptInfo>,
    pub footer: FooterInfo,
}

#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
    /// e.g. `8 places | Filters: All`.
    pub summary: String,
}

#[derive(Debug, Clone)]
pub struct FilterChip {
    pub text: String,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct FilterBarInfo {
    pub chips: Vec<FilterChip>,
}

#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    pub query: String,
}

#[derive(Debug, Clone)]
pub struct SidebarInfo {
    /// Cards inside the scroll window.
    pub cards: Vec<CardItem>,
    /// Shown instead of cards when nothing is visible.
    pub empty_state: Option<EmptyState>,
}

#[derive(Debug, Clone)]
pub struct CardItem {
    pub card: LocationCard,
    pub is_selected: bool,
}

/// Empty state message display information.
#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Map canvas contents in canvas-relative cells.
#[derive(Debug, Clone)]
pub struct MapCanvas {
    pub markers: Vec<MapGlyph>,
    pub user: Option<Cell>,
    /// Center and zoom readout, e.g. `40.7128, -74.0060  z13`.
    pub status: String,
    /// `false` until the startup prompt has been answered.
    pub ready: bool,
}

#[derive(Debug, Clone)]
pub struct MapGlyph {
    pub cell: Cell,
    pub glyph: &'static str,
    pub color: &'static str,
    /// Marker whose popup is open.
    pub is_focused: bool,
}

#[derive(Debug, Clone)]
pub struct PopupInfo {
    pub title: String,
    pub category: &'static str,
    pub rating: String,
    pub description: String,
    pub details: String,
    pub hint: String,
}

#[derive(Debug, Clone)]
pub struct ToastItem {
    pub text: String,
    pub severity: Severity,
    pub is_leaving: bool,
}

#[derive(Debug, Clone)]
pub struct PromptInfo {
    pub title: String,
    pub message: String,
    pub options: String,
}

/// Keybinding hints for the bottom of the UI.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub keybindings: String,
}
