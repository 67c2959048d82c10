//! Keyboard and mouse bindings.
//!
//! Maps Zellij input to [`Event`]s for the current [`InputMode`].
//!
//! # Keybindings
//!
//! Location prompt:
//! - `y`/`Enter`: Allow location
//! - `n`/`Esc`: Use default location
//! - `q`: Close plugin
//!
//! Normal mode:
//! - `j`/`Down`, `k`/`Up` (or `Ctrl+n`/`Ctrl+p`): Move selection
//! - `Enter`: Focus selected place
//! - `/`: Search
//! - `0`-`5`: Category filter
//! - `+`/`=`, `-`: Zoom
//! - `r`: Reset view
//! - `l`: Locate me
//! - `d`: Directions
//! - `s`: Share
//! - `b`: Toggle sidebar
//! - `f`: Toggle fullscreen
//! - `Esc`: Close popup
//! - `q`: Close plugin
//!
//! Search mode:
//! - Characters edit the query
//! - `Enter`: Submit
//! - `Esc`: Cancel
//!
//! Mouse: left click on chips, cards and markers; scroll zooms the map.

use super::{AppState, Event, InputMode};
use crate::engine::CategoryFilter;
use zellij_tile::prelude::{BareKey, KeyModifier, KeyWithModifier, Mouse};

/// Maps a key press, or `None` if the key is unbound in `mode`.
#[must_use]
pub fn map_key(mode: InputMode, key: &KeyWithModifier) -> Option<Event> {
    if key.has_modifiers(&[KeyModifier::Ctrl]) {
        return match (mode, key.bare_key) {
            (InputMode::LocationPrompt, _) => None,
            (_, BareKey::Char('n')) => Some(Event::KeyDown),
            (_, BareKey::Char('p')) => Some(Event::KeyUp),
            _ => None,
        };
    }

    match mode {
        InputMode::LocationPrompt => match key.bare_key {
            BareKey::Char('y') | BareKey::Enter => Some(Event::AllowLocation),
            BareKey::Char('n') | BareKey::Esc => Some(Event::UseDefaultLocation),
            BareKey::Char('q') => Some(Event::CloseFocus),
            _ => None,
        },
        InputMode::Search => Some(match key.bare_key {
            BareKey::Esc => Event::ExitSearch,
            BareKey::Enter => Event::SubmitSearch,
            BareKey::Backspace => Event::Backspace,
            BareKey::Down => Event::KeyDown,
            BareKey::Up => Event::KeyUp,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        }),
        InputMode::Normal => Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Enter => Event::FocusSelected,
            BareKey::Esc => Event::ClosePopup,
            BareKey::Char('/') => Event::SearchMode,
            BareKey::Char(digit @ '0'..='5') => {
                let index = digit.to_digit(10)? as usize;
                Event::SetFilter(*CategoryFilter::CHOICES.get(index)?)
            }
            BareKey::Char('+' | '=') => Event::ZoomIn,
            BareKey::Char('-') => Event::ZoomOut,
            BareKey::Char('r') => Event::ResetView,
            BareKey::Char('l') => Event::Locate,
            BareKey::Char('d') => Event::Directions,
            BareKey::Char('s') => Event::Share,
            BareKey::Char('b') => Event::ToggleSidebar,
            BareKey::Char('f') => Event::ToggleFullscreen,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        }),
    }
}

/// Maps a mouse event on a `rows` x `cols` pane.
///
/// Zellij reports click positions 0-indexed; the layout is 1-indexed.
#[must_use]
pub fn map_mouse(state: &AppState, mouse: &Mouse, rows: usize, cols: usize) -> Option<Event> {
    match mouse {
        Mouse::LeftClick(line, col) => {
            let row = usize::try_from(*line).ok()?;
            state.event_for_click(rows, cols, row + 1, *col + 1)
        }
        Mouse::ScrollUp(_) if state.input_mode == InputMode::Normal => Some(Event::ZoomIn),
        Mouse::ScrollDown(_) if state.input_mode == InputMode::Normal => Some(Event::ZoomOut),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Settings;
    use crate::capability::Capabilities;
    use crate::domain::{Category, LocationStore};
    use crate::ui::Theme;

    fn key(bare_key: BareKey) -> KeyWithModifier {
        KeyWithModifier::new(bare_key)
    }

    #[test]
    fn test_prompt_bindings() {
        let mode = InputMode::LocationPrompt;
        assert_eq!(map_key(mode, &key(BareKey::Char('y'))), Some(Event::AllowLocation));
        assert_eq!(map_key(mode, &key(BareKey::Enter)), Some(Event::AllowLocation));
        assert_eq!(map_key(mode, &key(BareKey::Esc)), Some(Event::UseDefaultLocation));
        assert_eq!(map_key(mode, &key(BareKey::Char('j'))), None);
    }

    #[test]
    fn test_digits_select_filters() {
        let mode = InputMode::Normal;
        assert_eq!(
            map_key(mode, &key(BareKey::Char('0'))),
            Some(Event::SetFilter(CategoryFilter::All))
        );
        assert_eq!(
            map_key(mode, &key(BareKey::Char('2'))),
            Some(Event::SetFilter(CategoryFilter::Only(Category::Park)))
        );
        assert_eq!(map_key(mode, &key(BareKey::Char('6'))), None);
    }

    #[test]
    fn test_search_mode_types_command_letters() {
        let mode = InputMode::Search;
        assert_eq!(map_key(mode, &key(BareKey::Char('q'))), Some(Event::Char('q')));
        assert_eq!(map_key(mode, &key(BareKey::Char('j'))), Some(Event::Char('j')));
        assert_eq!(map_key(mode, &key(BareKey::Enter)), Some(Event::SubmitSearch));
    }

    #[test]
    fn test_ctrl_navigation() {
        let ctrl_n = KeyWithModifier::new(BareKey::Char('n')).with_ctrl_modifier();
        assert_eq!(map_key(InputMode::Search, &ctrl_n), Some(Event::KeyDown));
        assert_eq!(map_key(InputMode::LocationPrompt, &ctrl_n), None);
    }

    #[test]
    fn test_scroll_zooms_only_in_normal_mode() {
        let mut state = AppState::new(
            LocationStore::seeded(),
            Theme::default(),
            Capabilities::default(),
            Settings::default(),
        );
        assert_eq!(map_mouse(&state, &Mouse::ScrollUp(1), 30, 120), None);

        state.input_mode = InputMode::Normal;
        assert_eq!(map_mouse(&state, &Mouse::ScrollUp(1), 30, 120), Some(Event::ZoomIn));
        assert_eq!(map_mouse(&state, &Mouse::ScrollDown(1), 30, 120), Some(Event::ZoomOut));
    }

    #[test]
    fn test_click_is_converted_to_one_based() {
        let mut state = AppState::new(
            LocationStore::seeded(),
            Theme::default(),
            Capabilities::default(),
            Settings::default(),
        );
        state.input_mode = InputMode::Normal;

        // Row 2 (0-indexed 1) is the filter bar; column 2 (0-indexed 1) is chip "0:All".
        assert_eq!(
            map_mouse(&state, &Mouse::LeftClick(1, 1), 30, 120),
            Some(Event::SetFilter(CategoryFilter::All))
        );
        assert_eq!(map_mouse(&state, &Mouse::LeftClick(-1, 1), 30, 120), None);
    }
}
