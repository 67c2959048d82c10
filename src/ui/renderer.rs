//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to the component renderers
//!
//! # Example
//!
//! ```rust
//! use atlasphere::app::{AppState, Settings};
//! use atlasphere::capability::Capabilities;
//! use atlasphere::domain::LocationStore;
//! use atlasphere::ui::{render, Theme};
//!
//! let state = AppState::new(LocationStore::seeded(), Theme::default(), Capabilities::default(), Settings::default());
//! render(&state, 24, 80); // Render to stdout
//! ```

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout.
///
/// Does not clear the screen; Zellij hands the plugin a fresh pane on every
/// render call.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    components::render_frame(&viewmodel, &state.theme);
}
