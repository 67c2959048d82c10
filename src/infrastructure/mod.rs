//! Infrastructure layer for sandbox paths and host timers.
//!
//! Inside the Zellij plugin sandbox the host filesystem is mounted under
//! `/host`, and timers are plain timeouts without identity.
//!
//! - [`paths`]: data directory, tilde expansion and display paths
//! - [`timers`]: deadline queue behind the host's anonymous timer events

pub mod paths;
pub mod timers;

pub use paths::{default_locations_file, expand_tilde, get_data_dir, strip_host_prefix};
pub use timers::TimerQueue;
