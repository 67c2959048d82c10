//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place where [`AppState`] changes. Each event
//! runs to completion before the next one is processed, so no locking is
//! involved anywhere in the application.
//!
//! # Architecture
//!
//! 1. Events arrive from the plugin runtime (keys, mouse, resize, timers) or
//!    as replies to capability requests
//! 2. [`handle_event`] pattern-matches the event
//! 3. State mutations occur via `AppState` methods
//! 4. Actions (capability requests, toast timers) are collected and returned
//!
//! # Capability Replies
//!
//! Every request action is answered by exactly one reply event. Replies are
//! applied in arrival order with no sequencing token: a reply to an older
//! request that arrives after a newer one overwrites the newer result.
//!
//! | request | reply |
//! |---|---|
//! | `Action::RequestPosition` | `Event::PositionResolved` |
//! | `Action::SearchNearby` | `Event::NearbyResults` |
//! | `Action::FindPlace` | `Event::PlaceFound` |
//! | `Action::Share`, `Action::CopyToClipboard` | `Event::ShareCompleted` |
//!
//! # Example
//!
//! ```rust
//! use atlasphere::app::{handle_event, AppState, Event, Settings};
//! use atlasphere::capability::Capabilities;
//! use atlasphere::domain::LocationStore;
//! use atlasphere::ui::Theme;
//!
//! let mut state = AppState::new(LocationStore::seeded(), Theme::default(), Capabilities::default(), Settings::default());
//! let (should_render, actions) = handle_event(&mut state, &Event::UseDefaultLocation)?;
//! assert!(should_render);
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use super::modes::{InputMode, LocateOrigin};
use super::{Action, AppState};
use crate::capability::{
    directions_url, places::places_to_store, Capabilities, FoundPlace, GeolocationError, NearbyPlace, NearbyRequest,
    PlaceQuery, PlaceSearchError, PositionReply, ShareChannel, ShareLink,
};
use crate::domain::error::Result;
use crate::domain::{Category, LocationId};
use crate::engine::{search_locations, CategoryFilter};
use crate::map::{MapWidget, LOCATE_ZOOM, OVERVIEW_ZOOM, PLACE_ZOOM};
use crate::notify::{Severity, ToastTimer};

/// Events triggered by user input, system changes, or capability replies.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Moves card selection down by one position (wraps to top).
    KeyDown,
    /// Moves card selection up by one position (wraps to bottom).
    KeyUp,
    /// Focuses the selected card on the map.
    FocusSelected,
    /// A card was clicked (index into the visible set).
    SelectCard(usize),
    /// A marker was clicked.
    SelectMarker(LocationId),
    /// Closes the popup, or clears an active search when no popup is open.
    ClosePopup,
    /// Hides the plugin pane.
    CloseFocus,

    /// Enters search mode.
    SearchMode,
    /// Appends a character to the search query.
    Char(char),
    /// Removes the last character from the search query.
    Backspace,
    /// Runs the search for the typed query.
    SubmitSearch,
    /// Leaves search mode without searching.
    ExitSearch,

    /// Activates a category filter.
    SetFilter(CategoryFilter),

    ZoomIn,
    ZoomOut,
    /// Back to the overview zoom, keeping the current center.
    ResetView,

    /// Startup prompt answered with "allow".
    AllowLocation,
    /// Startup prompt answered with "use default location".
    UseDefaultLocation,
    /// Locate button.
    Locate,
    /// Reply to [`Action::RequestPosition`].
    PositionResolved(PositionReply),
    /// The host refused the plugin's permissions. Requests issued without
    /// them are never answered.
    PermissionsDenied,

    /// Reply to [`Action::SearchNearby`].
    NearbyResults {
        /// Category the request was made for. Results are tagged with the
        /// filter active when the reply arrives.
        category: Option<Category>,
        reply: std::result::Result<Vec<NearbyPlace>, PlaceSearchError>,
    },
    /// Reply to [`Action::FindPlace`].
    PlaceFound(std::result::Result<Option<FoundPlace>, PlaceSearchError>),

    ToggleFullscreen,
    ToggleSidebar,
    /// Pane width changed.
    Resize {
        cols: usize,
    },

    /// Opens directions to the target location.
    Directions,
    /// Shares the target location.
    Share,
    /// Reply to [`Action::Share`] or [`Action::CopyToClipboard`].
    ShareCompleted {
        channel: ShareChannel,
        link: ShareLink,
        result: std::result::Result<(), String>,
    },

    /// A toast lifecycle timer fired.
    Timer(ToastTimer),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Parameters
///
/// * `state` - Mutable reference to application state
/// * `event` - Event to process
///
/// # Returns
///
/// Whether the UI should re-render, and the actions to execute in order.
///
/// # Errors
///
/// Currently never fails; every failure is reported as a toast.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::FocusSelected => {
            let Some(id) = state.selected_location().map(|location| location.id.clone()) else {
                tracing::debug!("no location selected");
                return Ok((false, vec![]));
            };
            Ok((state.focus_location(&id), vec![]))
        }
        Event::SelectCard(index) => {
            let Some(id) = state.visible.get(*index).map(|location| location.id.clone()) else {
                return Ok((false, vec![]));
            };
            Ok((state.focus_location(&id), vec![]))
        }
        Event::SelectMarker(id) => Ok((state.focus_location(id), vec![])),
        Event::ClosePopup => {
            if state.map.popup().is_some() {
                state.map.close_popup();
                return Ok((true, vec![]));
            }
            if state.view.clear_search() {
                tracing::debug!("search cleared");
                state.recompute();
                return Ok((true, vec![]));
            }
            Ok((false, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),

        Event::SearchMode => {
            if state.input_mode.is_prompt() {
                return Ok((false, vec![]));
            }
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search;
            state.search_query = String::new();
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if !state.input_mode.is_search() {
                return Ok((false, vec![]));
            }
            state.search_query.push(*c);
            tracing::trace!(query = %state.search_query, "search query updated");
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if !state.input_mode.is_search() {
                return Ok((false, vec![]));
            }
            state.search_query.pop();
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            tracing::debug!(query = %state.search_query, "exiting search mode");
            state.input_mode = InputMode::Normal;
            state.search_query = String::new();
            Ok((true, vec![]))
        }
        Event::SubmitSearch => Ok((true, submit_search(state))),

        Event::SetFilter(filter) => {
            tracing::debug!(filter = ?filter, "filter selected");
            state.view.select_filter(*filter);
            state.recompute();

            let mut actions = vec![];
            if state.capabilities.places {
                if state.map_ready {
                    actions.push(Action::SearchNearby(NearbyRequest::new(
                        state.map.center(),
                        state.settings.places_radius_m,
                        *filter,
                    )));
                } else {
                    actions.push(state.notify("Map not ready", Severity::Error));
                }
            }
            Ok((true, actions))
        }

        Event::ZoomIn => {
            state.map.zoom_in();
            Ok((true, vec![]))
        }
        Event::ZoomOut => {
            state.map.zoom_out();
            Ok((true, vec![]))
        }
        Event::ResetView => {
            state.map.set_zoom(OVERVIEW_ZOOM);
            Ok((true, vec![]))
        }

        Event::AllowLocation => {
            if !state.input_mode.is_prompt() {
                return Ok((false, vec![]));
            }
            if !state.capabilities.geolocation {
                tracing::debug!("geolocation unavailable, using default location");
                let center = state.settings.default_center;
                return Ok((true, vec![state.initialize_map(center)]));
            }

            state.input_mode = InputMode::Normal;
            state.locate_origin = Some(LocateOrigin::Startup);
            Ok((
                true,
                vec![
                    state.notify("Getting your location...", Severity::Success),
                    Action::RequestPosition(state.settings.position_options),
                ],
            ))
        }
        Event::UseDefaultLocation => {
            if !state.input_mode.is_prompt() {
                return Ok((false, vec![]));
            }
            let center = state.settings.default_center;
            Ok((true, vec![state.initialize_map(center)]))
        }
        Event::Locate => {
            if !state.capabilities.geolocation {
                return Ok((true, vec![state.notify("Geolocation is not supported", Severity::Error)]));
            }
            if state.locate_origin.is_none() {
                state.locate_origin = Some(LocateOrigin::Button);
            }
            Ok((
                true,
                vec![
                    state.notify("Locating...", Severity::Success),
                    Action::RequestPosition(state.settings.position_options),
                ],
            ))
        }
        Event::PositionResolved(reply) => Ok((true, position_resolved(state, reply))),
        Event::PermissionsDenied => Ok((true, permissions_denied(state))),

        Event::NearbyResults { category, reply } => match reply {
            Ok(places) => {
                // Results take the filter active now, so a late reply stays visible.
                let active = state.view.filter.category();
                tracing::debug!(count = places.len(), requested = ?category, active = ?active, "nearby results received");
                state.store.replace(places_to_store(places.clone(), active));
                state.view.clear_search();
                state.recompute();

                let mut actions = vec![];
                if state.store.is_empty() {
                    actions.push(state.notify("No nearby places found", Severity::Warning));
                }
                Ok((true, actions))
            }
            Err(e) => {
                tracing::warn!(error = %e, "nearby search failed");
                Ok((true, vec![state.notify("Nearby search failed", Severity::Error)]))
            }
        },
        Event::PlaceFound(reply) => Ok((true, place_found(state, reply))),

        Event::ToggleFullscreen => match state.view.toggle_fullscreen(state.capabilities.fullscreen) {
            Some(on) => {
                let message = if on { "Entered fullscreen mode" } else { "Exited fullscreen mode" };
                Ok((true, vec![Action::SetFullscreen(on), state.notify(message, Severity::Success)]))
            }
            None => Ok((false, vec![])),
        },
        Event::ToggleSidebar => {
            state.view.toggle_sidebar();
            Ok((true, vec![]))
        }
        Event::Resize { cols } => {
            let breakpoint = state.settings.sidebar_breakpoint;
            Ok((state.view.resize(*cols, breakpoint), vec![]))
        }

        Event::Directions => {
            let Some(location) = state.target_location() else {
                return Ok((true, vec![state.notify("Select a place first", Severity::Warning)]));
            };
            let url = directions_url(location.coordinate);

            if !state.capabilities.open_url {
                return Ok((true, vec![state.notify("No URL opener configured", Severity::Warning)]));
            }
            Ok((
                true,
                vec![
                    Action::OpenUrl(url),
                    state.notify("Opening directions in new tab", Severity::Success),
                ],
            ))
        }
        Event::Share => {
            let Some(location) = state.target_location() else {
                return Ok((true, vec![state.notify("Select a place first", Severity::Warning)]));
            };
            let link = ShareLink::for_location(location);

            if state.capabilities.native_share {
                Ok((false, vec![Action::Share(link)]))
            } else if state.capabilities.clipboard {
                Ok((false, vec![Action::CopyToClipboard(link)]))
            } else {
                Ok((true, vec![state.notify("Sharing is not available", Severity::Warning)]))
            }
        }
        Event::ShareCompleted { channel, link, result } => Ok((true, share_completed(state, *channel, link, result))),

        Event::Timer(timer) => Ok((
            true,
            state.toasts.on_timer(*timer).map(Action::ScheduleTimer).into_iter().collect(),
        )),
    }
}

/// Searches the store first and falls back to a live place lookup.
fn submit_search(state: &mut AppState) -> Vec<Action> {
    let query = state.search_query.clone();

    match search_locations(state.store.as_slice(), &query) {
        Err(e) => vec![state.notify(e.to_string(), Severity::Warning)],
        Ok(Some(location)) => {
            let id = location.id.clone();
            let message = format!("Found: {}", location.name);

            state.view.select_match(id.clone(), &query);
            state.recompute();
            state.focus_location(&id);
            state.input_mode = InputMode::Normal;
            state.search_query = String::new();
            vec![state.notify(message, Severity::Success)]
        }
        Ok(None) if state.capabilities.places => {
            tracing::debug!(query = %query, "no local match, asking place search");
            state.input_mode = InputMode::Normal;
            state.search_query = String::new();
            vec![Action::FindPlace(PlaceQuery {
                text: query.trim().to_string(),
                bias: state.map.center(),
            })]
        }
        Ok(None) => vec![state.notify("Location not found", Severity::Error)],
    }
}

fn position_resolved(state: &mut AppState, reply: &PositionReply) -> Vec<Action> {
    let origin = state.locate_origin.take().unwrap_or(LocateOrigin::Button);

    match (reply, origin) {
        (Ok(position), origin) => {
            state.view.user_location = Some(*position);
            state.map.set_user_marker(Some(*position));

            match origin {
                LocateOrigin::Startup => vec![
                    state.initialize_map(*position),
                    state.notify("Location found! Showing your area.", Severity::Success),
                ],
                LocateOrigin::Button => {
                    state.map.pan_to(*position);
                    state.map.set_zoom(LOCATE_ZOOM);
                    vec![state.notify("Location found!", Severity::Success)]
                }
            }
        }
        (Err(e), LocateOrigin::Startup) => {
            let center = state.settings.default_center;
            vec![
                state.initialize_map(center),
                state.notify(format!("{}. Using default location instead.", e.notification()), Severity::Error),
            ]
        }
        (Err(e), LocateOrigin::Button) => {
            state.map.pan_to(state.settings.default_center);
            vec![state.notify(e.notification(), Severity::Error)]
        }
    }
}

/// Drops every host-backed capability and settles a position request that
/// will never be answered.
fn permissions_denied(state: &mut AppState) -> Vec<Action> {
    tracing::warn!(capabilities = ?state.capabilities, "host permissions denied, disabling capabilities");
    state.capabilities = Capabilities::default();

    let mut actions = vec![state.notify("Permissions denied: locate, places and sharing are off", Severity::Warning)];
    if state.locate_origin.is_some() {
        actions.extend(position_resolved(state, &Err(GeolocationError::PermissionDenied)));
    }
    actions
}

fn place_found(
    state: &mut AppState,
    reply: &std::result::Result<Option<FoundPlace>, PlaceSearchError>,
) -> Vec<Action> {
    match reply {
        Ok(Some(place)) => {
            state.map.pan_to(place.coordinate);
            state.map.set_zoom(PLACE_ZOOM);

            let mut actions = vec![state.notify(format!("Found: {}", place.name), Severity::Success)];
            actions.push(Action::SearchNearby(NearbyRequest::new(
                place.coordinate,
                state.settings.places_radius_m,
                state.view.filter,
            )));
            actions
        }
        Ok(None) => vec![state.notify("Location not found", Severity::Error)],
        Err(e) => {
            tracing::warn!(error = %e, "place search failed");
            vec![state.notify("Place search failed", Severity::Error)]
        }
    }
}

fn share_completed(
    state: &mut AppState,
    channel: ShareChannel,
    link: &ShareLink,
    result: &std::result::Result<(), String>,
) -> Vec<Action> {
    match (channel, result) {
        (ShareChannel::Native, Ok(())) => vec![state.notify("Location shared", Severity::Success)],
        (ShareChannel::Clipboard, Ok(())) => {
            vec![state.notify("Location link copied to clipboard!", Severity::Success)]
        }
        (ShareChannel::Native, Err(e)) if state.capabilities.clipboard => {
            tracing::debug!(error = %e, "native share failed, falling back to clipboard");
            vec![Action::CopyToClipboard(link.clone())]
        }
        (ShareChannel::Native, Err(e)) => {
            tracing::warn!(error = %e, "native share failed");
            vec![state.notify("Failed to share location", Severity::Error)]
        }
        (ShareChannel::Clipboard, Err(e)) => {
            tracing::warn!(error = %e, "clipboard copy failed");
            vec![state.notify("Failed to copy link", Severity::Error)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Settings;
    use crate::domain::{Coordinate, LocationStore, DEFAULT_CENTER};
    use crate::engine::Selector;
    use crate::map::FOCUS_ZOOM;
    use crate::ui::Theme;

    fn state_with(capabilities: Capabilities) -> AppState {
        let mut state = AppState::new(LocationStore::seeded(), Theme::default(), capabilities, Settings::default());
        handle_event(&mut state, &Event::UseDefaultLocation).unwrap();
        state
    }

    fn type_query(state: &mut AppState, query: &str) {
        handle_event(state, &Event::SearchMode).unwrap();
        for c in query.chars() {
            handle_event(state, &Event::Char(c)).unwrap();
        }
    }

    fn messages(state: &AppState) -> Vec<&str> {
        state.toasts.toasts().iter().map(|t| t.message.as_str()).collect()
    }

    #[test]
    fn test_use_default_location_initializes_map() {
        let state = state_with(Capabilities::default());
        assert!(state.map_ready);
        assert_eq!(state.map.center(), DEFAULT_CENTER);
        assert_eq!(messages(&state), vec!["Map loaded successfully!"]);
    }

    #[test]
    fn test_allow_location_requests_position() {
        let mut state = AppState::new(LocationStore::seeded(), Theme::default(), Capabilities::all(), Settings::default());
        let (_, actions) = handle_event(&mut state, &Event::AllowLocation).unwrap();

        assert!(actions.iter().any(|a| matches!(a, Action::RequestPosition(_))));
        assert_eq!(state.locate_origin, Some(LocateOrigin::Startup));
        assert!(!state.map_ready);
    }

    #[test]
    fn test_startup_position_failure_falls_back_to_default() {
        let mut state = AppState::new(LocationStore::seeded(), Theme::default(), Capabilities::all(), Settings::default());
        handle_event(&mut state, &Event::AllowLocation).unwrap();
        handle_event(&mut state, &Event::PositionResolved(Err(GeolocationError::Timeout))).unwrap();

        assert!(state.map_ready);
        assert_eq!(state.map.center(), DEFAULT_CENTER);
        assert_eq!(state.view.user_location, None);
        assert_eq!(state.toasts.count(Severity::Error), 1);
    }

    #[test]
    fn test_startup_position_success_centers_on_user() {
        let mut state = AppState::new(LocationStore::seeded(), Theme::default(), Capabilities::all(), Settings::default());
        let here = Coordinate::new(51.5074, -0.1278);
        handle_event(&mut state, &Event::AllowLocation).unwrap();
        handle_event(&mut state, &Event::PositionResolved(Ok(here))).unwrap();

        assert_eq!(state.map.center(), here);
        assert_eq!(state.map.zoom(), OVERVIEW_ZOOM);
        assert_eq!(state.view.user_location, Some(here));
        assert!(messages(&state).contains(&"Location found! Showing your area."));
    }

    #[test]
    fn test_locate_without_capability() {
        let mut state = state_with(Capabilities::default());
        let (_, actions) = handle_event(&mut state, &Event::Locate).unwrap();

        assert_eq!(actions.len(), 1);
        assert!(matches!(actions[0], Action::ScheduleTimer(_)));
        assert_eq!(state.toasts.count(Severity::Error), 1);
    }

    #[test]
    fn test_locate_success_uses_locate_zoom() {
        let mut state = state_with(Capabilities::all());
        let here = Coordinate::new(40.73, -73.99);
        handle_event(&mut state, &Event::Locate).unwrap();
        handle_event(&mut state, &Event::PositionResolved(Ok(here))).unwrap();

        assert_eq!(state.map.zoom(), LOCATE_ZOOM);
        assert_eq!(state.map.user_marker(), Some(here));
        assert_ne!(LOCATE_ZOOM, FOCUS_ZOOM);
    }

    #[test]
    fn test_locate_permission_denied() {
        let mut state = state_with(Capabilities::all());
        handle_event(&mut state, &Event::ZoomIn).unwrap();
        handle_event(&mut state, &Event::Locate).unwrap();
        handle_event(&mut state, &Event::PositionResolved(Err(GeolocationError::PermissionDenied))).unwrap();

        assert_eq!(state.toasts.count(Severity::Error), 1);
        assert!(messages(&state).contains(&"Location permission denied"));
        assert_eq!(state.view.user_location, None);
        assert_eq!(state.map.center(), DEFAULT_CENTER);
    }

    #[test]
    fn test_empty_search_warns_without_state_change() {
        let mut state = state_with(Capabilities::default());
        type_query(&mut state, "   ");
        let before = state.visible.clone();

        handle_event(&mut state, &Event::SubmitSearch).unwrap();
        assert_eq!(state.visible, before);
        assert_eq!(state.toasts.count(Severity::Warning), 1);
        assert!(messages(&state).contains(&"Please enter a search term"));
    }

    #[test]
    fn test_search_match_focuses_single_location() {
        let mut state = state_with(Capabilities::default());
        type_query(&mut state, "Brooklyn");
        handle_event(&mut state, &Event::SubmitSearch).unwrap();

        assert_eq!(state.visible.len(), 1);
        assert_eq!(state.visible[0].name, "Brooklyn Bridge");
        assert_eq!(state.map.markers().len(), 1);
        assert_eq!(state.map.zoom(), FOCUS_ZOOM);
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(messages(&state).contains(&"Found: Brooklyn Bridge"));
    }

    #[test]
    fn test_search_not_found_is_error_toast() {
        let mut state = state_with(Capabilities::default());
        type_query(&mut state, "zzz-nonexistent");
        let (_, actions) = handle_event(&mut state, &Event::SubmitSearch).unwrap();

        assert_eq!(actions.len(), 1);
        assert_eq!(state.toasts.count(Severity::Error), 1);
        assert_eq!(state.visible.len(), 8);
        assert!(state.input_mode.is_search());
    }

    #[test]
    fn test_search_not_found_asks_place_search_when_available() {
        let mut state = state_with(Capabilities::all());
        type_query(&mut state, "Empire State");
        let (_, actions) = handle_event(&mut state, &Event::SubmitSearch).unwrap();

        assert!(matches!(&actions[..], [Action::FindPlace(query)] if query.text == "Empire State"));
        assert_eq!(state.toasts.count(Severity::Error), 0);
    }

    #[test]
    fn test_place_found_pans_and_searches_nearby() {
        let mut state = state_with(Capabilities::all());
        let place = FoundPlace {
            name: "Empire State Building".to_string(),
            coordinate: Coordinate::new(40.7484, -73.9857),
        };
        let (_, actions) = handle_event(&mut state, &Event::PlaceFound(Ok(Some(place)))).unwrap();

        assert_eq!(state.map.zoom(), PLACE_ZOOM);
        assert!(actions.iter().any(|a| matches!(a, Action::SearchNearby(_))));
        assert!(messages(&state).contains(&"Found: Empire State Building"));
    }

    #[test]
    fn test_escape_clears_search_after_popup() {
        let mut state = state_with(Capabilities::default());
        type_query(&mut state, "soho");
        handle_event(&mut state, &Event::SubmitSearch).unwrap();

        handle_event(&mut state, &Event::ClosePopup).unwrap();
        assert!(state.map.popup().is_none());
        assert_eq!(state.visible.len(), 1);

        handle_event(&mut state, &Event::ClosePopup).unwrap();
        assert_eq!(state.view.selector, Selector::Category(CategoryFilter::All));
        assert_eq!(state.visible.len(), 8);
    }

    #[test]
    fn test_filter_without_places_is_local_only() {
        let mut state = state_with(Capabilities::default());
        let (_, actions) = handle_event(&mut state, &Event::SetFilter(CategoryFilter::Only(Category::Museum))).unwrap();

        assert!(actions.is_empty());
        assert_eq!(state.visible.len(), 2);
    }

    #[test]
    fn test_filter_with_places_requests_nearby() {
        let mut state = state_with(Capabilities::all());
        let (_, actions) = handle_event(&mut state, &Event::SetFilter(CategoryFilter::Only(Category::Park))).unwrap();

        assert!(matches!(
            &actions[..],
            [Action::SearchNearby(request)] if request.category == Some(Category::Park)
        ));
    }

    #[test]
    fn test_park_filter_updates_counters_and_markers() {
        let mut state = state_with(Capabilities::default());
        handle_event(&mut state, &Event::SetFilter(CategoryFilter::Only(Category::Park))).unwrap();

        assert_eq!(state.snapshot.cards.len(), 2);
        assert_eq!(state.snapshot.counters.total, 2);
        assert_eq!(state.snapshot.counters.active_filters.label(), "1");
        assert_eq!(state.map.markers().len(), 2);

        handle_event(&mut state, &Event::SetFilter(CategoryFilter::All)).unwrap();
        assert_eq!(state.map.markers().len(), 8);
        assert_eq!(state.snapshot.counters.active_filters.label(), "All");
    }

    fn two_nearby_places() -> std::result::Result<Vec<NearbyPlace>, PlaceSearchError> {
        let body = br#"{
            "status": "OK",
            "results": [
                {"place_id": "a", "name": "Pier 25", "geometry": {"location": {"lat": 40.72, "lng": -74.01}}},
                {"place_id": "b", "name": "Bowling Green", "geometry": {"location": {"lat": 40.705, "lng": -74.013}}}
            ]
        }"#;
        crate::capability::places::parse_nearby(200, body)
    }

    #[test]
    fn test_nearby_results_replace_store() {
        let mut state = state_with(Capabilities::all());
        handle_event(&mut state, &Event::SetFilter(CategoryFilter::Only(Category::Park))).unwrap();
        handle_event(
            &mut state,
            &Event::NearbyResults {
                category: Some(Category::Park),
                reply: two_nearby_places(),
            },
        )
        .unwrap();

        assert_eq!(state.store.len(), 2);
        assert_eq!(state.map.markers().len(), 2);
        assert!(state.visible.iter().all(|l| l.category == Category::Park));
    }

    #[test]
    fn test_late_nearby_reply_takes_current_filter() {
        let mut state = state_with(Capabilities::all());
        handle_event(&mut state, &Event::SetFilter(CategoryFilter::Only(Category::Park))).unwrap();
        handle_event(&mut state, &Event::SetFilter(CategoryFilter::Only(Category::Museum))).unwrap();

        handle_event(
            &mut state,
            &Event::NearbyResults {
                category: Some(Category::Museum),
                reply: two_nearby_places(),
            },
        )
        .unwrap();
        handle_event(
            &mut state,
            &Event::NearbyResults {
                category: Some(Category::Park),
                reply: two_nearby_places(),
            },
        )
        .unwrap();

        assert_eq!(state.store.len(), 2);
        assert_eq!(state.visible.len(), 2);
        assert_eq!(state.map.markers().len(), 2);
        assert_eq!(state.snapshot.counters.total, 2);
        assert!(state.visible.iter().all(|l| l.category == Category::Museum));
    }

    #[test]
    fn test_resize_collapses_sidebar_below_breakpoint() {
        let mut state = state_with(Capabilities::default());
        let (render, _) = handle_event(&mut state, &Event::Resize { cols: 80 }).unwrap();
        assert!(render);
        assert!(!state.view.sidebar_open());

        handle_event(&mut state, &Event::Resize { cols: 140 }).unwrap();
        assert!(state.view.sidebar_open());
    }

    #[test]
    fn test_nearby_failure_keeps_store() {
        let mut state = state_with(Capabilities::all());
        handle_event(
            &mut state,
            &Event::NearbyResults {
                category: None,
                reply: Err(PlaceSearchError::Http(500)),
            },
        )
        .unwrap();

        assert_eq!(state.store.len(), 8);
        assert!(messages(&state).contains(&"Nearby search failed"));
    }

    #[test]
    fn test_empty_nearby_results_warn() {
        let mut state = state_with(Capabilities::all());
        handle_event(
            &mut state,
            &Event::NearbyResults {
                category: Some(Category::Park),
                reply: Ok(vec![]),
            },
        )
        .unwrap();

        assert!(state.store.is_empty());
        assert!(state.visible.is_empty());
        assert!(state.map.markers().is_empty());
        assert!(messages(&state).contains(&"No nearby places found"));
    }

    #[test]
    fn test_fullscreen_without_capability_is_noop() {
        let mut state = state_with(Capabilities::default());
        let (render, actions) = handle_event(&mut state, &Event::ToggleFullscreen).unwrap();

        assert!(!render);
        assert!(actions.is_empty());
        assert!(!state.view.fullscreen);
    }

    #[test]
    fn test_fullscreen_toggle() {
        let mut state = state_with(Capabilities::all());
        let (_, actions) = handle_event(&mut state, &Event::ToggleFullscreen).unwrap();

        assert_eq!(actions[0], Action::SetFullscreen(true));
        assert!(messages(&state).contains(&"Entered fullscreen mode"));
    }

    #[test]
    fn test_directions_for_selected_card() {
        let mut state = state_with(Capabilities::all());
        handle_event(&mut state, &Event::SelectCard(2)).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::Directions).unwrap();

        assert_eq!(
            actions[0],
            Action::OpenUrl("https://www.google.com/maps/dir/?api=1&destination=40.7061,-73.9969".to_string())
        );
    }

    #[test]
    fn test_share_prefers_native_then_falls_back_to_clipboard() {
        let mut state = state_with(Capabilities::all());
        let (_, actions) = handle_event(&mut state, &Event::Share).unwrap();
        let Action::Share(link) = actions[0].clone() else {
            panic!("expected native share");
        };

        let (_, actions) = handle_event(
            &mut state,
            &Event::ShareCompleted {
                channel: ShareChannel::Native,
                link: link.clone(),
                result: Err("no share target".to_string()),
            },
        )
        .unwrap();
        assert_eq!(actions, vec![Action::CopyToClipboard(link.clone())]);

        handle_event(
            &mut state,
            &Event::ShareCompleted {
                channel: ShareChannel::Clipboard,
                link,
                result: Ok(()),
            },
        )
        .unwrap();
        assert!(messages(&state).contains(&"Location link copied to clipboard!"));
    }

    #[test]
    fn test_share_unavailable() {
        let mut state = state_with(Capabilities::default());
        handle_event(&mut state, &Event::Share).unwrap();
        assert!(messages(&state).contains(&"Sharing is not available"));
    }

    #[test]
    fn test_reset_view_keeps_center() {
        let mut state = state_with(Capabilities::default());
        handle_event(&mut state, &Event::SelectCard(0)).unwrap();
        let center = state.map.center();

        handle_event(&mut state, &Event::ResetView).unwrap();
        assert_eq!(state.map.center(), center);
        assert_eq!(state.map.zoom(), OVERVIEW_ZOOM);
    }

    #[test]
    fn test_timer_drives_toast_lifecycle() {
        let mut state = state_with(Capabilities::default());
        let first = state.toasts.toasts()[0].id;

        let (_, actions) = handle_event(&mut state, &Event::Timer(ToastTimer::Expire(first))).unwrap();
        let [Action::ScheduleTimer(removal)] = &actions[..] else {
            panic!("expected removal timer");
        };

        handle_event(&mut state, &Event::Timer(removal.timer)).unwrap();
        assert!(state.toasts.toasts().is_empty());
    }

    #[test]
    fn test_denied_permissions_settle_startup_request() {
        let mut state = AppState::new(LocationStore::seeded(), Theme::default(), Capabilities::all(), Settings::default());
        handle_event(&mut state, &Event::AllowLocation).unwrap();
        assert!(!state.map_ready);

        handle_event(&mut state, &Event::PermissionsDenied).unwrap();

        assert!(state.map_ready);
        assert_eq!(state.locate_origin, None);
        assert_eq!(state.map.center(), DEFAULT_CENTER);
        assert_eq!(state.capabilities, Capabilities::default());
        assert_eq!(state.toasts.count(Severity::Error), 1);
        assert_eq!(state.toasts.count(Severity::Warning), 1);
    }

    #[test]
    fn test_denied_permissions_fall_back_without_requests() {
        let mut state = state_with(Capabilities::all());
        handle_event(&mut state, &Event::PermissionsDenied).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::Locate).unwrap();
        assert!(!actions.iter().any(|a| matches!(a, Action::RequestPosition(_))));

        let (_, actions) = handle_event(&mut state, &Event::SetFilter(CategoryFilter::Only(Category::Park))).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.visible.len(), 2);
    }

    #[test]
    fn test_keys_ignored_during_prompt() {
        let mut state = AppState::new(LocationStore::seeded(), Theme::default(), Capabilities::all(), Settings::default());
        let (render, _) = handle_event(&mut state, &Event::SearchMode).unwrap();
        assert!(!render);
        assert!(state.input_mode.is_prompt());
    }
}
