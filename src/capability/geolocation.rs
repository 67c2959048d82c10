//! Geolocation capability contract and the command-backed locator.
//!
//! The application asks for a position with [`PositionOptions`] and receives
//! exactly one [`PositionReply`] per request. Inside Zellij the position comes
//! from a user-configured command that prints `lat,lng` on stdout;
//! [`CommandLocator`] builds the command line, honours the maximum cached age
//! and classifies the result.
//!
//! # Exit Codes
//!
//! | exit | outcome |
//! |---|---|
//! | `0` | success, stdout parsed as a coordinate |
//! | `124` | [`GeolocationError::Timeout`] (from `timeout(1)`) |
//! | `77`, `126` | [`GeolocationError::PermissionDenied`] |
//! | anything else | [`GeolocationError::PositionUnavailable`] |

use crate::domain::Coordinate;
use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;

/// Exit status `timeout(1)` uses when the command ran out of time.
const EXIT_TIMED_OUT: i32 = 124;

/// `EX_NOPERM` from sysexits.h.
const EXIT_NO_PERMISSION: i32 = 77;

/// Shell status for "found but not executable".
const EXIT_NOT_EXECUTABLE: i32 = 126;

/// Options passed with every position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// A cached fix younger than this is returned without asking again.
    pub max_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_millis(10_000),
            max_age: Duration::from_millis(300_000),
        }
    }
}

/// Why a position request failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location unavailable: {0}")]
    PositionUnavailable(String),

    #[error("Location request timed out")]
    Timeout,
}

impl GeolocationError {
    /// Short, reason-specific notification text.
    #[must_use]
    pub const fn notification(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "Location permission denied",
            Self::PositionUnavailable(_) => "Location unavailable",
            Self::Timeout => "Location request timed out",
        }
    }
}

/// The single reply to a position request.
pub type PositionReply = Result<Coordinate, GeolocationError>;

/// Next step for the host after a position request.
#[derive(Debug, Clone, PartialEq)]
pub enum LocateStep {
    /// A recent enough fix exists; reply immediately.
    Cached(Coordinate),
    /// Run this command line and pass its result to [`CommandLocator::complete`].
    Run(Vec<String>),
}

/// Resolves positions by running a shell command.
#[derive(Debug, Clone)]
pub struct CommandLocator {
    command: String,
    last_fix: Option<(DateTime<Utc>, Coordinate)>,
}

impl CommandLocator {
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            last_fix: None,
        }
    }

    /// Decides how to satisfy a request made at `now`.
    ///
    /// The command runs under `timeout(1)` with the request timeout, and sees
    /// `ATLASPHERE_HIGH_ACCURACY=1` when high accuracy was requested.
    #[must_use]
    pub fn begin(&self, options: &PositionOptions, now: DateTime<Utc>) -> LocateStep {
        if let Some((acquired_at, coordinate)) = self.last_fix {
            let fresh = (now - acquired_at)
                .to_std()
                .is_ok_and(|age| age <= options.max_age);
            if fresh {
                tracing::debug!(acquired_at = %acquired_at, "reusing cached position");
                return LocateStep::Cached(coordinate);
            }
        }

        let accuracy = if options.high_accuracy { "1" } else { "0" };
        LocateStep::Run(vec![
            "env".to_string(),
            format!("ATLASPHERE_HIGH_ACCURACY={accuracy}"),
            "timeout".to_string(),
            format!("{:.1}", options.timeout.as_secs_f64()),
            "sh".to_string(),
            "-c".to_string(),
            self.command.clone(),
        ])
    }

    /// Classifies a finished locate command and caches successful fixes.
    pub fn complete(&mut self, exit_code: Option<i32>, stdout: &[u8], stderr: &[u8], now: DateTime<Utc>) -> PositionReply {
        let reply = match exit_code {
            Some(0) => parse_position(&String::from_utf8_lossy(stdout)),
            Some(EXIT_TIMED_OUT) => Err(GeolocationError::Timeout),
            Some(EXIT_NO_PERMISSION | EXIT_NOT_EXECUTABLE) => Err(GeolocationError::PermissionDenied),
            Some(code) => {
                let stderr = String::from_utf8_lossy(stderr);
                let detail = stderr.trim();
                Err(GeolocationError::PositionUnavailable(if detail.is_empty() {
                    format!("locate command exited with {code}")
                } else {
                    detail.to_string()
                }))
            }
            None => Err(GeolocationError::PositionUnavailable(
                "locate command was terminated".to_string(),
            )),
        };

        match &reply {
            Ok(coordinate) => {
                tracing::debug!(lat = coordinate.lat, lng = coordinate.lng, "position resolved");
                self.last_fix = Some((now, *coordinate));
            }
            Err(e) => tracing::warn!(error = %e, exit_code = ?exit_code, "position request failed"),
        }

        reply
    }
}

/// Parses the first non-empty line of locate output.
///
/// Accepts `lat,lng` and whitespace-separated `lat lng`.
///
/// # Errors
///
/// Returns [`GeolocationError::PositionUnavailable`] when no valid
/// coordinate can be read.
pub fn parse_position(output: &str) -> PositionReply {
    let line = output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or_else(|| GeolocationError::PositionUnavailable("locate command printed nothing".to_string()))?;

    let normalized = if line.contains(',') {
        line.to_string()
    } else {
        line.split_whitespace().collect::<Vec<_>>().join(",")
    };

    normalized
        .parse::<Coordinate>()
        .map_err(|e| GeolocationError::PositionUnavailable(e.to_string()))
}
