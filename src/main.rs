//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the Atlasphere library and the Zellij
//! plugin system. It implements `ZellijPlugin`, translates Zellij events into
//! library events, and runs the library's actions against the host:
//!
//! - position requests run the configured locate command
//! - place searches become web requests
//! - share, clipboard and directions run the configured commands
//! - toast timers use `set_timeout`
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: `RunCommands`, `WebAccess`, `ChangeApplicationState`
//! 3. **Update**: Map Zellij events, delegate to `handle_event`, execute actions
//! 4. **Render**: Report width changes, then call the library renderer
//!
//! # Event Mapping
//!
//! - `Key` → [`atlasphere::app::map_key`]
//! - `Mouse` → [`atlasphere::app::map_mouse`]
//! - `RunCommandResult` / `WebRequestResult` → reply events via [`atlasphere::app::HostRequest`]
//! - `Timer` → `Event::Timer` for every toast timer that is due

#![allow(clippy::multiple_crate_versions)]

#[cfg(target_family = "wasm")]
mod plugin {
    use std::collections::BTreeMap;

    use chrono::Utc;
    use zellij_tile::prelude::*;

    use atlasphere::app::bridge::{clipboard_argv, open_argv, share_argv};
    use atlasphere::app::{map_key, map_mouse, HostRequest};
    use atlasphere::capability::{CommandLocator, LocateStep, ShareChannel};
    use atlasphere::infrastructure::TimerQueue;
    use atlasphere::{handle_event, Action, Config, Event};

    /// Plugin state wrapper.
    ///
    /// Wraps the library's `AppState` with the host-side pieces: configured
    /// commands, the position cache and pending toast timers.
    pub struct State {
        app: atlasphere::AppState,
        config: Config,
        locator: CommandLocator,
        timers: TimerQueue,
        rows: usize,
        cols: usize,
    }

    impl Default for State {
        fn default() -> Self {
            let config = Config::default();
            Self {
                app: atlasphere::initialize(&config),
                locator: CommandLocator::new(String::new()),
                config,
                timers: TimerQueue::new(),
                rows: 0,
                cols: 0,
            }
        }
    }

    impl ZellijPlugin for State {
        fn load(&mut self, configuration: BTreeMap<String, String>) {
            let config = Config::from_zellij(&configuration);
            atlasphere::observability::init_tracing(config.trace_level.as_deref().unwrap_or("info"));

            let span = tracing::debug_span!("plugin_load");
            let _guard = span.entered();

            self.app = atlasphere::initialize(&config);
            self.locator = CommandLocator::new(config.locate_command.clone().unwrap_or_default());
            self.config = config;
            tracing::debug!(locations = self.app.store.len(), "app state initialized");

            request_permission(&[
                PermissionType::RunCommands,
                PermissionType::WebAccess,
                PermissionType::ChangeApplicationState,
            ]);

            subscribe(&[
                EventType::Key,
                EventType::Mouse,
                EventType::Timer,
                EventType::RunCommandResult,
                EventType::WebRequestResult,
                EventType::PermissionRequestResult,
            ]);

            tracing::debug!("plugin load complete - waiting for permissions");
        }

        fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
            let event_name = Self::get_event_name(&event);
            let span = tracing::debug_span!("plugin_update_event", otel.name = %format!("plugin_update::{event_name}"), event_type = %event_name);
            let _guard = span.entered();

            match event {
                zellij_tile::prelude::Event::Key(ref key) => {
                    tracing::debug!(bare_key = ?key.bare_key, "key event");
                    map_key(self.app.input_mode, key).is_some_and(|event| self.dispatch(&event))
                }
                zellij_tile::prelude::Event::Mouse(ref mouse) => {
                    map_mouse(&self.app, mouse, self.rows, self.cols).is_some_and(|event| self.dispatch(&event))
                }
                zellij_tile::prelude::Event::Timer(_) => {
                    let mut should_render = false;
                    for timer in self.timers.drain_due(Utc::now()) {
                        should_render |= self.dispatch(&Event::Timer(timer));
                    }
                    should_render
                }
                zellij_tile::prelude::Event::RunCommandResult(exit_code, stdout, stderr, context) => {
                    tracing::debug!(exit_code = ?exit_code, "run command result event");
                    HostRequest::from_context(&context)
                        .and_then(|request| request.command_reply(exit_code, &stdout, &stderr, &mut self.locator, Utc::now()))
                        .is_some_and(|event| self.dispatch(&event))
                }
                zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                    tracing::debug!(status, body_len = body.len(), "web request result event");
                    HostRequest::from_context(&context)
                        .and_then(|request| request.web_reply(status, &body))
                        .is_some_and(|event| self.dispatch(&event))
                }
                zellij_tile::prelude::Event::PermissionRequestResult(status) => self.handle_permission_result(status),
                _ => false,
            }
        }

        fn render(&mut self, rows: usize, cols: usize) {
            self.rows = rows;
            if cols != self.cols {
                self.cols = cols;
                self.dispatch(&Event::Resize { cols });
            }

            atlasphere::ui::render(&self.app, rows, cols);
        }
    }

    impl State {
        /// Gets a string name for a Zellij event for logging purposes.
        fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
            match event {
                zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
                zellij_tile::prelude::Event::Mouse(mouse) => format!("Mouse({mouse:?})"),
                zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
                zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
                zellij_tile::prelude::Event::WebRequestResult(..) => "WebRequestResult".to_string(),
                zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
                _ => "Other".to_string(),
            }
        }

        /// Handles permission request results.
        ///
        /// Without permissions the host drops commands and web requests, so
        /// the app is told to stop issuing them.
        fn handle_permission_result(&mut self, status: PermissionStatus) -> bool {
            match status {
                PermissionStatus::Granted => {
                    tracing::debug!("permissions granted");
                    false
                }
                PermissionStatus::Denied => {
                    tracing::warn!("permissions denied - plugin functionality limited");
                    self.dispatch(&Event::PermissionsDenied)
                }
            }
        }

        /// Runs one library event and its actions; returns whether to render.
        fn dispatch(&mut self, event: &Event) -> bool {
            match handle_event(&mut self.app, event) {
                Ok((should_render, actions)) => {
                    tracing::debug!(action_count = actions.len(), should_render, "event handled successfully");
                    actions
                        .iter()
                        .fold(should_render, |render, action| self.execute_action(action) || render)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "error handling event");
                    false
                }
            }
        }

        fn run(argv: &[String], request: &HostRequest) {
            let argv: Vec<&str> = argv.iter().map(String::as_str).collect();
            run_command(&argv, request.to_context());
        }

        fn fetch(url: &str, request: &HostRequest) {
            web_request(url, HttpVerb::Get, BTreeMap::new(), Vec::new(), request.to_context());
        }

        /// Executes an action; returns whether it changed state synchronously.
        #[tracing::instrument(level = "debug", skip(self))]
        fn execute_action(&mut self, action: &Action) -> bool {
            match action {
                Action::CloseFocus => {
                    hide_self();
                    false
                }
                Action::RequestPosition(options) => match self.locator.begin(options, Utc::now()) {
                    LocateStep::Cached(coordinate) => self.dispatch(&Event::PositionResolved(Ok(coordinate))),
                    LocateStep::Run(argv) => {
                        Self::run(&argv, &HostRequest::Locate);
                        false
                    }
                },
                Action::SearchNearby(request) => {
                    let key = self.config.places_api_key.as_deref().unwrap_or_default();
                    Self::fetch(
                        &request.url(key),
                        &HostRequest::Nearby {
                            category: request.category,
                        },
                    );
                    false
                }
                Action::FindPlace(query) => {
                    let key = self.config.places_api_key.as_deref().unwrap_or_default();
                    Self::fetch(&query.url(key), &HostRequest::FindPlace);
                    false
                }
                Action::SetFullscreen(fullscreen) => {
                    tracing::debug!(fullscreen, "toggling focus fullscreen");
                    toggle_focus_fullscreen();
                    false
                }
                Action::OpenUrl(url) => {
                    let command = self.config.open_command.as_deref().unwrap_or_default();
                    Self::run(&open_argv(command, url), &HostRequest::OpenUrl);
                    false
                }
                Action::Share(link) => {
                    let command = self.config.share_command.as_deref().unwrap_or_default();
                    let request = HostRequest::Share {
                        channel: ShareChannel::Native,
                        link: link.clone(),
                    };
                    Self::run(&share_argv(command, link), &request);
                    false
                }
                Action::CopyToClipboard(link) => {
                    let command = self.config.clipboard_command.as_deref().unwrap_or_default();
                    let request = HostRequest::Share {
                        channel: ShareChannel::Clipboard,
                        link: link.clone(),
                    };
                    Self::run(&clipboard_argv(command, link), &request);
                    false
                }
                Action::ScheduleTimer(scheduled) => {
                    self.timers.schedule(Utc::now(), *scheduled);
                    set_timeout(scheduled.after.as_secs_f64());
                    false
                }
            }
        }
    }
}

#[cfg(target_family = "wasm")]
use plugin::State;

#[cfg(target_family = "wasm")]
zellij_tile::register_plugin!(State);

#[cfg(not(target_family = "wasm"))]
fn main() {
    eprintln!("atlasphere is a Zellij plugin; build it with `cargo build --target wasm32-wasip1`");
}
