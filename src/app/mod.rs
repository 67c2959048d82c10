//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the domain, engine, map and
//! capability layers.
//!
//! # Architecture
//!
//! ```text
//! Key / Mouse / Resize / Timer ─┐
//!                               ▼
//!                      handle_event ──▶ AppState mutations ──▶ recompute + synchronize
//!                               │
//!                               ▼
//!                           Actions ──▶ host (position, places, share, timers)
//!                               ▲                 │
//!                               └── reply Events ─┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`bridge`]: Host request contexts and reply events
//! - [`handler`]: Event processing and state transitions
//! - [`keys`]: Keyboard and mouse bindings
//! - [`modes`]: Input mode state machine
//! - [`state`]: Central application state and view model computation
//! - [`sync`]: Render synchronizer (cards, markers, counters)
//! - [`view_state`]: Sidebar, fullscreen, filter and search text

pub mod actions;
pub mod bridge;
pub mod handler;
pub mod keys;
pub mod modes;
pub mod state;
pub mod sync;
pub mod view_state;

pub use actions::Action;
pub use bridge::HostRequest;
pub use handler::{handle_event, Event};
pub use keys::{map_key, map_mouse};
pub use modes::{InputMode, LocateOrigin};
pub use state::{AppState, Settings};
pub use sync::{synchronize, ActiveFilters, Counters, LocationCard, RenderSnapshot};
pub use view_state::{SidebarState, ViewState};
