//! Application state management and view model computation.
//!
//! [`AppState`] is the single owner of every piece of mutable state: the
//! location store, the derived visible set and its render snapshot, the view
//! state, the map widget and the toast queue. Only the event handler mutates
//! it, through the methods defined here.
//!
//! # Recompute Cycle
//!
//! ```text
//! store + selector ──visible_locations──▶ visible ──synchronize──▶ cards, markers, counters
//! ```
//!
//! [`AppState::recompute`] runs the whole cycle and is called after any change
//! to the store or the selector, so the marker layer always mirrors the
//! visible set.
//!
//! # Example
//!
//! ```rust
//! use atlasphere::app::{AppState, Settings};
//! use atlasphere::capability::Capabilities;
//! use atlasphere::domain::LocationStore;
//! use atlasphere::ui::Theme;
//!
//! let state = AppState::new(LocationStore::seeded(), Theme::default(), Capabilities::default(), Settings::default());
//! assert_eq!(state.visible.len(), 8);
//! let viewmodel = state.compute_viewmodel(30, 120);
//! assert!(viewmodel.prompt.is_some());
//! ```

use super::handler::Event;
use super::modes::{InputMode, LocateOrigin};
use super::sync::{synchronize, LocationCard, RenderSnapshot};
use super::view_state::ViewState;
use super::Action;
use crate::capability::{Capabilities, PositionOptions, DEFAULT_RADIUS_M};
use crate::domain::{Coordinate, Location, LocationId, LocationStore, DEFAULT_CENTER};
use crate::engine::{visible_locations, CategoryFilter};
use crate::map::{MapView, MapWidget, FOCUS_ZOOM, OVERVIEW_ZOOM};
use crate::notify::{Severity, ToastPhase, ToastQueue, DEFAULT_VISIBLE_FOR};
use crate::ui::layout::{chip_text, Hit, Layout};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    CardItem, EmptyState, FilterBarInfo, FilterChip, FooterInfo, HeaderInfo, MapCanvas, MapGlyph, PopupInfo,
    PromptInfo, SearchBarInfo, SidebarInfo, ToastItem, UIViewModel,
};
use std::time::Duration;

/// Tunables read from the plugin configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Where the map opens when no position is available.
    pub default_center: Coordinate,
    pub places_radius_m: u32,
    /// Pane width (columns) below which the sidebar auto-collapses.
    pub sidebar_breakpoint: usize,
    pub position_options: PositionOptions,
    pub toast_duration: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_center: DEFAULT_CENTER,
            places_radius_m: DEFAULT_RADIUS_M,
            sidebar_breakpoint: 100,
            position_options: PositionOptions::default(),
            toast_duration: DEFAULT_VISIBLE_FOR,
        }
    }
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current location records; replaced wholesale by nearby results.
    pub store: LocationStore,

    /// Locations passing the current selector, in store order.
    pub visible: Vec<Location>,

    /// Cards and counters rebuilt from `visible`.
    pub snapshot: RenderSnapshot,

    pub view: ViewState,

    pub map: MapView,

    pub toasts: ToastQueue,

    /// Index of the highlighted card within `visible`.
    pub selected_index: usize,

    pub input_mode: InputMode,

    /// Text being typed into the search bar.
    pub search_query: String,

    pub theme: Theme,

    /// What the host can do.
    pub capabilities: Capabilities,

    pub settings: Settings,

    /// Set while a position request is in flight.
    pub locate_origin: Option<LocateOrigin>,

    /// `true` once the startup prompt has been answered and the map centered.
    pub map_ready: bool,
}

impl AppState {
    /// Creates the state for a freshly loaded plugin.
    ///
    /// Starts at the location prompt with the map on the default center and
    /// the visible set already synchronized.
    #[must_use]
    pub fn new(store: LocationStore, theme: Theme, capabilities: Capabilities, settings: Settings) -> Self {
        let mut state = Self {
            store,
            visible: Vec::new(),
            snapshot: RenderSnapshot::default(),
            view: ViewState::default(),
            map: MapView::new(settings.default_center),
            toasts: ToastQueue::new(settings.toast_duration),
            selected_index: 0,
            input_mode: InputMode::default(),
            search_query: String::new(),
            theme,
            capabilities,
            settings,
            locate_origin: None,
            map_ready: false,
        };
        state.recompute();
        state
    }

    /// Recomputes the visible set and resynchronizes every projection.
    pub fn recompute(&mut self) {
        let _span = tracing::debug_span!("recompute", store = self.store.len(), selector = ?self.view.selector).entered();

        self.visible = visible_locations(self.store.as_slice(), &self.view.selector);
        self.snapshot = synchronize(&self.visible, &mut self.map, self.view.filter);

        if self.visible.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(self.visible.len() - 1);
        }
    }

    /// Queues a toast and returns the action that schedules its expiry.
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) -> Action {
        Action::ScheduleTimer(self.toasts.notify(message, severity))
    }

    /// Centers the map for the first time and leaves the startup prompt.
    pub fn initialize_map(&mut self, center: Coordinate) -> Action {
        tracing::debug!(lat = center.lat, lng = center.lng, "initializing map");
        self.map.pan_to(center);
        self.map.set_zoom(OVERVIEW_ZOOM);
        self.map_ready = true;
        self.input_mode = InputMode::Normal;
        self.notify("Map loaded successfully!", Severity::Success)
    }

    /// Pans to a visible location, zooms in and opens its popup.
    ///
    /// Also moves the card selection onto it.
    ///
    /// # Returns
    ///
    /// `false` if the location is not in the visible set.
    pub fn focus_location(&mut self, id: &LocationId) -> bool {
        let Some((index, coordinate)) = self
            .visible
            .iter()
            .enumerate()
            .find(|(_, location)| &location.id == id)
            .map(|(index, location)| (index, location.coordinate))
        else {
            tracing::debug!(location_id = %id, "focus target not visible");
            return false;
        };

        self.selected_index = index;
        self.map.pan_to(coordinate);
        self.map.set_zoom(FOCUS_ZOOM);
        self.map.open_popup(id);
        true
    }

    /// Moves the card selection down, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.visible.len();
    }

    /// Moves the card selection up, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.visible.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    #[must_use]
    pub fn selected_location(&self) -> Option<&Location> {
        self.visible.get(self.selected_index)
    }

    /// Location that directions and share act on: the open popup's marker,
    /// otherwise the selected card.
    #[must_use]
    pub fn target_location(&self) -> Option<&Location> {
        self.map
            .popup()
            .map(|marker| &marker.location)
            .or_else(|| self.selected_location())
    }

    /// Frame layout for a pane of `rows` x `cols`.
    #[must_use]
    pub fn layout(&self, rows: usize, cols: usize) -> Layout {
        Layout::compute(rows, cols, self.view.sidebar_open(), self.input_mode.is_search())
    }

    /// Translates a 1-indexed mouse click into an event.
    ///
    /// Clicks are ignored while the startup prompt is showing. A click on
    /// empty map space closes the popup.
    #[must_use]
    pub fn event_for_click(&self, rows: usize, cols: usize, row: usize, col: usize) -> Option<Event> {
        if self.input_mode.is_prompt() {
            return None;
        }

        let layout = self.layout(rows, cols);
        match layout.hit_test(row, col, self.selected_index, self.visible.len()) {
            Hit::Filter(filter) => Some(Event::SetFilter(filter)),
            Hit::Card(index) => Some(Event::SelectCard(index)),
            Hit::Map(cell) => Some(
                self.map
                    .marker_at(layout.map.viewport(), cell)
                    .map_or(Event::ClosePopup, |id| Event::SelectMarker(id.clone())),
            ),
            Hit::Nothing => None,
        }
    }

    /// Computes the view model for a pane of `rows` x `cols`.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let layout = self.layout(rows, cols);

        UIViewModel {
            layout,
            header: self.compute_header(),
            filter_bar: self.compute_filter_bar(),
            search_bar: self.input_mode.is_search().then(|| SearchBarInfo {
                query: self.search_query.clone(),
            }),
            sidebar: layout.sidebar.is_some().then(|| self.compute_sidebar(&layout)),
            map: self.compute_map_canvas(&layout),
            popup: self.compute_popup(),
            toasts: self.compute_toasts(),
            prompt: self.input_mode.is_prompt().then(|| self.compute_prompt()),
            footer: self.compute_footer(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let counters = self.snapshot.counters;
        let mut summary = format!("{} places | Filters: {}", counters.total, counters.active_filters.label());
        if !self.view.search_text.is_empty() {
            summary.push_str(&format!(" | Search: {}", self.view.search_text));
        }
        if self.view.fullscreen {
            summary.push_str(" | Fullscreen");
        }

        HeaderInfo {
            title: "Atlasphere".to_string(),
            summary,
        }
    }

    fn compute_filter_bar(&self) -> FilterBarInfo {
        FilterBarInfo {
            chips: CategoryFilter::CHOICES
                .iter()
                .enumerate()
                .map(|(index, filter)| FilterChip {
                    text: chip_text(index, *filter),
                    is_active: self.view.filter == *filter,
                })
                .collect(),
        }
    }

    fn compute_sidebar(&self, layout: &Layout) -> SidebarInfo {
        if self.snapshot.cards.is_empty() {
            return SidebarInfo {
                cards: vec![],
                empty_state: Some(EmptyState {
                    message: "No places to show".to_string(),
                    subtitle: "Try another filter or search".to_string(),
                }),
            };
        }

        let window = layout.card_window(self.selected_index, self.snapshot.cards.len());
        let cards = self.snapshot.cards[window.clone()]
            .iter()
            .enumerate()
            .map(|(offset, card)| CardItem {
                card: card.clone(),
                is_selected: window.start + offset == self.selected_index,
            })
            .collect();

        SidebarInfo {
            cards,
            empty_state: None,
        }
    }

    fn compute_map_canvas(&self, layout: &Layout) -> MapCanvas {
        let viewport = layout.map.viewport();
        let focused = self.map.popup().map(|marker| marker.id().clone());

        let markers = self
            .map
            .markers()
            .iter()
            .filter_map(|marker| {
                self.map.cell_for(marker.position(), viewport).map(|cell| MapGlyph {
                    cell,
                    glyph: marker.style.glyph,
                    color: marker.style.color,
                    is_focused: focused.as_ref() == Some(marker.id()),
                })
            })
            .collect();

        MapCanvas {
            markers,
            user: self
                .map
                .user_marker()
                .and_then(|position| self.map.cell_for(position, viewport)),
            status: format!("{}  z{}", self.map.center(), self.map.zoom()),
            ready: self.map_ready,
        }
    }

    fn compute_popup(&self) -> Option<PopupInfo> {
        let marker = self.map.popup()?;
        let card = LocationCard::from_location(&marker.location);

        Some(PopupInfo {
            title: format!("{} {}", card.icon, card.name),
            category: card.category.as_str(),
            rating: format!("{} {}", card.stars, card.rating_label),
            description: card.description,
            details: card.details,
            hint: "d: directions  s: share  Esc: close".to_string(),
        })
    }

    fn compute_toasts(&self) -> Vec<ToastItem> {
        self.toasts
            .toasts()
            .iter()
            .map(|toast| ToastItem {
                text: format!("{} {}", toast.severity.icon(), toast.message),
                severity: toast.severity,
                is_leaving: toast.phase == ToastPhase::Leaving,
            })
            .collect()
    }

    fn compute_prompt(&self) -> PromptInfo {
        let options = if self.capabilities.geolocation {
            "y/Enter: allow location  n/Esc: use default location"
        } else {
            "Enter: continue with default location"
        };

        PromptInfo {
            title: "📍 Location Access".to_string(),
            message: "Atlasphere would like to access your location to show you nearby places.".to_string(),
            options: options.to_string(),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::LocationPrompt => "y: allow  n: default location  q: quit",
            InputMode::Search => "Enter: search  Esc: cancel  Type to search",
            InputMode::Normal => {
                "j/k: select  Enter: focus  /: search  0-5: filter  +/-: zoom  r: reset  l: locate  d: directions  s: share  b: sidebar  f: fullscreen  q: quit"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}
