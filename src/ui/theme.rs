//! Theme management and ANSI escape sequence generation.
//!
//! Themes are TOML documents. Two are built in and compiled into the plugin;
//! any other theme can be loaded from a file named by the `theme_file`
//! configuration key.
//!
//! # Built-in Themes
//!
//! - `atlas-night`: dark map palette (default)
//! - `atlas-day`: light map palette
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#e2e8f0"
//! header_bg = "#0f172a"
//! text_normal = "#e2e8f0"
//! text_dim = "#64748b"
//! border = "#334155"
//! accent = "#38bdf8"
//! selection_fg = "#0f172a"
//! selection_bg = "#38bdf8"
//! map_grid = "#1e293b"
//! user_marker = "#f91717"
//! popup_border = "#38bdf8"
//! toast_success = "#22c55e"
//! toast_warning = "#f59e0b"
//! toast_error = "#ef4444"
//! empty_state_fg = "#94a3b8"
//! ```
//!
//! # Example
//!
//! ```rust
//! use atlasphere::ui::theme::Theme;
//!
//! let theme = Theme::from_name("atlas-day").unwrap();
//! print!("{}Bold{}", Theme::bold(), Theme::reset());
//! assert_eq!(theme.name, "atlas-day");
//! ```

use crate::domain::{AtlasError, Result};
use crate::notify::Severity;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub text_normal: String,
    /// Secondary text (footer, card details, map status).
    pub text_dim: String,

    /// Separator lines.
    pub border: String,
    /// Search box border and the active filter chip.
    pub accent: String,

    /// Selected card foreground.
    pub selection_fg: String,
    /// Selected card background.
    pub selection_bg: String,

    /// Dots of the map background grid.
    pub map_grid: String,
    pub user_marker: String,
    pub popup_border: String,

    pub toast_success: String,
    pub toast_warning: String,
    pub toast_error: String,

    pub empty_state_fg: String,
}

impl ThemeColors {
    /// Toast color for a severity.
    #[must_use]
    pub fn toast(&self, severity: Severity) -> &str {
        match severity {
            Severity::Success => &self.toast_success,
            Severity::Warning => &self.toast_warning,
            Severity::Error => &self.toast_error,
        }
    }
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// # Returns
    ///
    /// `None` if the name is not a built-in theme.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "atlas-night" => include_str!("../../themes/atlas-night.toml"),
            "atlas-day" => include_str!("../../themes/atlas-day.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`AtlasError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents =
            fs::read_to_string(path).map_err(|e| AtlasError::Theme(format!("Failed to read theme file: {e}")))?;

        toml::from_str(&contents).map_err(|e| AtlasError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// Converts a hex color to an RGB tuple, white on parse errors.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        // `#rrggbbaa` is accepted; alpha is ignored.
        if hex.len() != 6 && hex.len() != 8 {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                .unwrap_or(255)
        };

        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// ANSI 24-bit foreground color escape sequence.
    ///
    /// ```rust
    /// use atlasphere::ui::theme::Theme;
    ///
    /// assert_eq!(Theme::fg("#22c55e"), "\u{1b}[38;2;34;197;94m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background color escape sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the default theme (Atlas Night).
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse (should never occur).
    fn default() -> Self {
        Self::from_name("atlas-night").expect("Built-in atlas-night theme should always parse")
    }
}
