//! Atlasphere: a Zellij plugin for exploring points of interest on a terminal map.
//!
//! Atlasphere provides:
//! - A map canvas with one category marker per visible place
//! - Category filter chips and a name/keyword search
//! - A sidebar of place cards kept in sync with the markers
//! - Detail popups with directions and share links
//! - Optional position lookup and live nearby search
//! - Auto-dismissing toast notifications

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! │  - Key/mouse mapping, host commands, web requests   │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling and actions                       │
//! │  - Render synchronizer                              │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Map (map/)    │   │ Capabilities  │
//! │ (ui/)         │   │ - Projection  │   │ (capability/) │
//! │ - Layout      │   │ - Markers     │   │ - Geolocation │
//! │ - Components  │   │ - Popup       │   │ - Places      │
//! │ - Theming     │   │               │   │ - Share       │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Engine, Notify & Infrastructure            │
//! │  - Locations and store (domain/)                    │
//! │  - Filter and search (engine/)                      │
//! │  - Toast queue (notify/)                            │
//! │  - Sandbox paths and timers (infrastructure/)       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing to an OTLP JSON file       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/atlasphere.wasm" {
//!         theme "atlas-night"
//!         locations_file "~/maps/nyc.toml"
//!         default_center "40.7128,-74.0060"
//!         locate_command "termux-location | jq -r '\"\\(.latitude),\\(.longitude)\"'"
//!         places_api_key "..."
//!         clipboard_command "wl-copy"
//!         open_command "xdg-open"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! Every key is optional; see [`Config`] for the full list. Capabilities whose
//! command or key is missing are reported unavailable and the plugin falls
//! back instead of issuing requests.
//!
//! # Initialization Flow
//!
//! 1. **Plugin Load** (`main.rs`): parse [`Config`], initialize tracing,
//!    build the [`AppState`] with [`initialize`], request permissions.
//! 2. **Location Prompt**: the user allows a position lookup or continues
//!    with the default center. Either way the map is initialized once.
//! 3. **Event Loop**: keys, clicks, resizes, timers and host replies become
//!    [`Event`]s; [`handle_event`] returns [`Action`]s for the shim to run.
//! 4. **Rendering**: [`ui::render`] draws the view model computed from state.
//!
//! # Example
//!
//! ```rust
//! use atlasphere::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::UseDefaultLocation)?;
//!
//! assert!(state.map_ready);
//! assert_eq!(actions.len(), 1); // "Map loaded successfully!" toast timer
//! # Ok::<(), atlasphere::AtlasError>(())
//! ```
//!
//! # Platform Support
//!
//! - **Target**: `wasm32-wasip1` (Zellij WASM runtime)
//! - **Terminal**: Any ANSI-capable terminal emulator with 24-bit color

pub mod app;
pub mod capability;
pub mod domain;
pub mod engine;
pub mod infrastructure;
pub mod map;
pub mod notify;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, Settings};
pub use capability::Capabilities;
pub use domain::{AtlasError, Category, Coordinate, Location, LocationStore, Result};
pub use ui::Theme;

use crate::capability::PositionOptions;
use crate::infrastructure::{default_locations_file, expand_tilde, strip_host_prefix};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// Every field is optional. Values that fail to parse are logged and treated
/// as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Built-in theme name (`atlas-night`, `atlas-day`). Ignored if
    /// `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: Option<String>,

    /// TOML file of locations replacing the built-in set.
    ///
    /// Falls back to `~/.local/share/zellij/atlasphere/locations.toml` when
    /// that file exists, then to the built-in New York set.
    pub locations_file: Option<String>,

    /// `lat,lng` the map opens on without a position. Default: New York City
    pub default_center: Option<Coordinate>,

    /// Shell command printing `lat,lng` on stdout. Enables "locate".
    pub locate_command: Option<String>,
    pub locate_timeout_ms: Option<u64>,
    pub locate_max_age_ms: Option<u64>,
    pub locate_high_accuracy: Option<bool>,

    /// Places web service key. Enables nearby search and find-place.
    pub places_api_key: Option<String>,
    pub places_radius_m: Option<u32>,

    /// Command reading text on stdin and placing it on the clipboard.
    pub clipboard_command: Option<String>,

    /// Command receiving `title`, `text` and `url` as arguments to hand them
    /// to a system share sheet.
    pub share_command: Option<String>,

    /// Command opening a URL (directions). e.g. `xdg-open`, `open`
    pub open_command: Option<String>,

    /// Set to `false` to disable the fullscreen toggle.
    pub fullscreen: Option<bool>,

    /// Pane width below which the sidebar collapses on its own. Default: 100
    pub sidebar_breakpoint: Option<usize>,

    /// How long a toast stays up before its exit phase. Default: 3000
    pub toast_duration_ms: Option<u64>,
}

fn text_key(config: &BTreeMap<String, String>, key: &str) -> Option<String> {
    config
        .get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(String::from)
}

fn parsed_key<T>(config: &BTreeMap<String, String>, key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = text_key(config, key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, value = %raw, error = %e, "ignoring invalid configuration value");
            None
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use atlasphere::{Config, Coordinate};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("default_center".to_string(), "51.5074,-0.1278".to_string());
    /// map.insert("sidebar_breakpoint".to_string(), "wide".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.default_center, Some(Coordinate::new(51.5074, -0.1278)));
    /// assert_eq!(config.sidebar_breakpoint, None);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        Self {
            theme_name: text_key(config, "theme"),
            theme_file: text_key(config, "theme_file"),
            trace_level: text_key(config, "trace_level"),
            locations_file: text_key(config, "locations_file"),
            default_center: parsed_key(config, "default_center"),
            locate_command: text_key(config, "locate_command"),
            locate_timeout_ms: parsed_key(config, "locate_timeout_ms"),
            locate_max_age_ms: parsed_key(config, "locate_max_age_ms"),
            locate_high_accuracy: parsed_key(config, "locate_high_accuracy"),
            places_api_key: text_key(config, "places_api_key"),
            places_radius_m: parsed_key(config, "places_radius_m"),
            clipboard_command: text_key(config, "clipboard_command"),
            share_command: text_key(config, "share_command"),
            open_command: text_key(config, "open_command"),
            fullscreen: parsed_key(config, "fullscreen"),
            sidebar_breakpoint: parsed_key(config, "sidebar_breakpoint"),
            toast_duration_ms: parsed_key(config, "toast_duration_ms"),
        }
    }

    /// Capabilities the host can provide under this configuration.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            geolocation: self.locate_command.is_some(),
            fullscreen: self.fullscreen.unwrap_or(true),
            places: self.places_api_key.is_some(),
            native_share: self.share_command.is_some(),
            clipboard: self.clipboard_command.is_some(),
            open_url: self.open_command.is_some(),
        }
    }

    /// Application tunables, defaults filled in.
    #[must_use]
    pub fn settings(&self) -> Settings {
        let defaults = Settings::default();
        let position_defaults = defaults.position_options;

        Settings {
            default_center: self.default_center.unwrap_or(defaults.default_center),
            places_radius_m: self.places_radius_m.unwrap_or(defaults.places_radius_m),
            sidebar_breakpoint: self.sidebar_breakpoint.unwrap_or(defaults.sidebar_breakpoint),
            position_options: PositionOptions {
                high_accuracy: self.locate_high_accuracy.unwrap_or(position_defaults.high_accuracy),
                timeout: self
                    .locate_timeout_ms
                    .map_or(position_defaults.timeout, Duration::from_millis),
                max_age: self
                    .locate_max_age_ms
                    .map_or(position_defaults.max_age, Duration::from_millis),
            },
            toast_duration: self
                .toast_duration_ms
                .map_or(defaults.toast_duration, Duration::from_millis),
        }
    }

    fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            return Theme::from_file(expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }

    fn store(&self) -> LocationStore {
        let path = match &self.locations_file {
            Some(file) => PathBuf::from(expand_tilde(file)),
            None => {
                let fallback = default_locations_file();
                if !fallback.exists() {
                    tracing::debug!("using built-in locations");
                    return LocationStore::seeded();
                }
                fallback
            }
        };

        load_store(&path)
    }
}

fn load_store(path: &Path) -> LocationStore {
    let shown = strip_host_prefix(&path.to_string_lossy());

    match LocationStore::from_file(path) {
        Ok(store) => {
            tracing::info!(path = %shown, locations = store.len(), "loaded locations file");
            store
        }
        Err(e) => {
            tracing::warn!(path = %shown, error = %e, "failed to load locations file, using built-in locations");
            LocationStore::seeded()
        }
    }
}

/// Builds the initial application state from configuration.
///
/// Loads the theme and the location store, each falling back to the
/// built-in default on error. Does not initialize tracing.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing atlasphere plugin");

    let capabilities = config.capabilities();
    tracing::debug!(?capabilities, "host capabilities");

    AppState::new(config.store(), config.theme(), capabilities, config.settings())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DEFAULT_CENTER;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config, Config::default());

        let capabilities = config.capabilities();
        assert!(capabilities.fullscreen);
        assert!(!capabilities.geolocation);
        assert!(!capabilities.places);

        assert_eq!(config.settings(), Settings::default());
    }

    #[test]
    fn test_commands_enable_capabilities() {
        let config = Config::from_zellij(&map(&[
            ("locate_command", "echo 40.7,-74.0"),
            ("places_api_key", "key"),
            ("clipboard_command", "wl-copy"),
            ("share_command", "my-share"),
            ("open_command", "xdg-open"),
            ("fullscreen", "false"),
        ]));

        assert_eq!(
            config.capabilities(),
            Capabilities {
                fullscreen: false,
                ..Capabilities::all()
            }
        );
    }

    #[test]
    fn test_blank_values_are_absent() {
        let config = Config::from_zellij(&map(&[("places_api_key", "  "), ("theme", "")]));
        assert_eq!(config.places_api_key, None);
        assert_eq!(config.theme_name, None);
    }

    #[test]
    fn test_settings_from_numeric_keys() {
        let settings = Config::from_zellij(&map(&[
            ("locate_timeout_ms", "2500"),
            ("locate_high_accuracy", "false"),
            ("places_radius_m", "800"),
            ("sidebar_breakpoint", "90"),
            ("toast_duration_ms", "1500"),
        ]))
        .settings();

        assert_eq!(settings.position_options.timeout, Duration::from_millis(2500));
        assert!(!settings.position_options.high_accuracy);
        assert_eq!(settings.places_radius_m, 800);
        assert_eq!(settings.sidebar_breakpoint, 90);
        assert_eq!(settings.toast_duration, Duration::from_millis(1500));
        assert_eq!(settings.default_center, DEFAULT_CENTER);
    }

    #[test]
    fn test_invalid_center_is_ignored() {
        let config = Config::from_zellij(&map(&[("default_center", "95,0")]));
        assert_eq!(config.default_center, None);
    }

    #[test]
    fn test_unknown_theme_falls_back_to_default() {
        let config = Config::from_zellij(&map(&[("theme", "solarized")]));
        assert_eq!(initialize(&config).theme, Theme::default());
    }

    #[test]
    fn test_builtin_theme_by_name() {
        let config = Config::from_zellij(&map(&[("theme", "atlas-day")]));
        assert_eq!(initialize(&config).theme.name, "atlas-day");
    }

    #[test]
    fn test_missing_locations_file_falls_back_to_seed() {
        let config = Config::from_zellij(&map(&[("locations_file", "/nonexistent/locations.toml")]));
        assert_eq!(initialize(&config).store.len(), 8);
    }

    #[test]
    fn test_locations_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locations.toml");
        std::fs::write(
            &path,
            "[[locations]]\nid = \"deli\"\nname = \"Katz's Delicatessen\"\ncategory = \"restaurant\"\nlat = 40.7223\nlng = -73.9874\n",
        )
        .unwrap();

        let store = load_store(&path);
        assert_eq!(store.len(), 1);
        assert_eq!(store.as_slice()[0].name, "Katz's Delicatessen");
    }
}
