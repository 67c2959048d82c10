//! Host request bookkeeping.
//!
//! Commands and web requests issued to Zellij carry a context map that comes
//! back untouched with the result. [`HostRequest`] is encoded into that map so
//! each result can be turned into the matching reply [`Event`].

use super::Event;
use crate::capability::places::{parse_find_place, parse_nearby};
use crate::capability::{CommandLocator, ShareChannel, ShareLink};
use crate::domain::Category;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Context key naming the request kind.
pub const CONTEXT_KEY: &str = "atlasphere";

/// `$0` for `sh -c` helper invocations.
const SHELL_NAME: &str = "atlasphere";

/// A request in flight on the host.
#[derive(Debug, Clone, PartialEq)]
pub enum HostRequest {
    Locate,
    Nearby { category: Option<Category> },
    FindPlace,
    Share { channel: ShareChannel, link: ShareLink },
    OpenUrl,
}

impl HostRequest {
    const fn kind(&self) -> &'static str {
        match self {
            Self::Locate => "locate",
            Self::Nearby { .. } => "nearby",
            Self::FindPlace => "find",
            Self::Share {
                channel: ShareChannel::Native,
                ..
            } => "share",
            Self::Share {
                channel: ShareChannel::Clipboard,
                ..
            } => "clipboard",
            Self::OpenUrl => "open",
        }
    }

    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::from([(CONTEXT_KEY.to_string(), self.kind().to_string())]);

        match self {
            Self::Nearby {
                category: Some(category),
            } => {
                context.insert("category".to_string(), category.as_str().to_string());
            }
            Self::Share { link, .. } => {
                context.insert("title".to_string(), link.title.clone());
                context.insert("text".to_string(), link.text.clone());
                context.insert("url".to_string(), link.url.clone());
            }
            _ => {}
        }
        context
    }

    /// Decodes a context map, `None` if it was not issued by this plugin.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        let field = |key: &str| context.get(key).cloned().unwrap_or_default();
        let link = || ShareLink {
            title: field("title"),
            text: field("text"),
            url: field("url"),
        };

        Some(match context.get(CONTEXT_KEY)?.as_str() {
            "locate" => Self::Locate,
            "nearby" => Self::Nearby {
                category: context
                    .get("category")
                    .and_then(|name| Category::SELECTABLE.into_iter().find(|c| c.as_str() == name.as_str())),
            },
            "find" => Self::FindPlace,
            "share" => Self::Share {
                channel: ShareChannel::Native,
                link: link(),
            },
            "clipboard" => Self::Share {
                channel: ShareChannel::Clipboard,
                link: link(),
            },
            "open" => Self::OpenUrl,
            _ => return None,
        })
    }

    /// Reply event for a finished command.
    pub fn command_reply(
        self,
        exit_code: Option<i32>,
        stdout: &[u8],
        stderr: &[u8],
        locator: &mut CommandLocator,
        now: DateTime<Utc>,
    ) -> Option<Event> {
        match self {
            Self::Locate => Some(Event::PositionResolved(locator.complete(exit_code, stdout, stderr, now))),
            Self::Share { channel, link } => Some(Event::ShareCompleted {
                channel,
                link,
                result: command_outcome(exit_code, stderr),
            }),
            Self::OpenUrl => {
                if let Err(e) = command_outcome(exit_code, stderr) {
                    tracing::warn!(error = %e, "open command failed");
                }
                None
            }
            Self::Nearby { .. } | Self::FindPlace => None,
        }
    }

    /// Reply event for a finished web request.
    #[must_use]
    pub fn web_reply(self, status: u16, body: &[u8]) -> Option<Event> {
        match self {
            Self::Nearby { category } => Some(Event::NearbyResults {
                category,
                reply: parse_nearby(status, body),
            }),
            Self::FindPlace => Some(Event::PlaceFound(parse_find_place(status, body))),
            Self::Locate | Self::Share { .. } | Self::OpenUrl => None,
        }
    }
}

fn command_outcome(exit_code: Option<i32>, stderr: &[u8]) -> Result<(), String> {
    match exit_code {
        Some(0) => Ok(()),
        code => {
            let stderr = String::from_utf8_lossy(stderr);
            let detail = stderr.trim();
            Err(match (detail.is_empty(), code) {
                (false, _) => detail.to_string(),
                (true, Some(code)) => format!("command exited with {code}"),
                (true, None) => "command was terminated".to_string(),
            })
        }
    }
}

/// `sh -c` line passing `args` as positional parameters to `script`.
fn shell(script: String, args: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut argv = vec!["sh".to_string(), "-c".to_string(), script, SHELL_NAME.to_string()];
    argv.extend(args);
    argv
}

/// Runs the share command with title, text and URL as arguments.
#[must_use]
pub fn share_argv(share_command: &str, link: &ShareLink) -> Vec<String> {
    shell(
        format!("{share_command} \"$1\" \"$2\" \"$3\""),
        [link.title.clone(), link.text.clone(), link.url.clone()],
    )
}

/// Pipes the link's URL into the clipboard command.
#[must_use]
pub fn clipboard_argv(clipboard_command: &str, link: &ShareLink) -> Vec<String> {
    shell(format!("printf '%s' \"$1\" | {clipboard_command}"), [link.url.clone()])
}

#[must_use]
pub fn open_argv(open_command: &str, url: &str) -> Vec<String> {
    shell(format!("{open_command} \"$1\""), [url.to_string()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::GeolocationError;
    use crate::domain::Coordinate;

    fn link() -> ShareLink {
        ShareLink {
            title: "SoHo".to_string(),
            text: "Check out SoHo on Atlasphere!".to_string(),
            url: "https://www.google.com/maps/place/40.7233,-74.003".to_string(),
        }
    }

    #[test]
    fn test_context_survives_the_host() {
        let requests = [
            HostRequest::Locate,
            HostRequest::Nearby { category: None },
            HostRequest::Nearby {
                category: Some(Category::Museum),
            },
            HostRequest::FindPlace,
            HostRequest::Share {
                channel: ShareChannel::Clipboard,
                link: link(),
            },
            HostRequest::OpenUrl,
        ];

        for request in requests {
            assert_eq!(HostRequest::from_context(&request.to_context()), Some(request));
        }
    }

    #[test]
    fn test_foreign_context_is_ignored() {
        assert_eq!(HostRequest::from_context(&BTreeMap::new()), None);

        let unknown = BTreeMap::from([(CONTEXT_KEY.to_string(), "scan".to_string())]);
        assert_eq!(HostRequest::from_context(&unknown), None);
    }

    #[test]
    fn test_locate_reply_goes_through_locator() {
        let mut locator = CommandLocator::new("gps");
        let event = HostRequest::Locate.command_reply(Some(0), b"40.7128,-74.0060\n", b"", &mut locator, Utc::now());
        assert_eq!(event, Some(Event::PositionResolved(Ok(Coordinate::new(40.7128, -74.0060)))));

        let denied = HostRequest::Locate.command_reply(Some(77), b"", b"", &mut locator, Utc::now());
        assert_eq!(denied, Some(Event::PositionResolved(Err(GeolocationError::PermissionDenied))));
    }

    #[test]
    fn test_share_reply_carries_link_and_error() {
        let mut locator = CommandLocator::new("gps");
        let request = HostRequest::Share {
            channel: ShareChannel::Native,
            link: link(),
        };

        let event = request.command_reply(Some(1), b"", b"no share target\n", &mut locator, Utc::now());
        assert_eq!(
            event,
            Some(Event::ShareCompleted {
                channel: ShareChannel::Native,
                link: link(),
                result: Err("no share target".to_string()),
            })
        );
    }

    #[test]
    fn test_web_reply_parses_nearby() {
        let body = br#"{"status": "ZERO_RESULTS", "results": []}"#;
        let event = HostRequest::Nearby {
            category: Some(Category::Park),
        }
        .web_reply(200, body);

        assert_eq!(
            event,
            Some(Event::NearbyResults {
                category: Some(Category::Park),
                reply: Ok(vec![]),
            })
        );
    }

    #[test]
    fn test_clipboard_copies_only_the_url() {
        let argv = clipboard_argv("wl-copy", &link());
        assert_eq!(&argv[..4], ["sh", "-c", "printf '%s' \"$1\" | wl-copy", "atlasphere"]);
        assert_eq!(argv[4..], ["https://www.google.com/maps/place/40.7233,-74.003"]);
    }

    #[test]
    fn test_argv_passes_values_as_arguments() {
        let argv = share_argv("termux-share", &link());
        assert_eq!(argv.len(), 7);
        assert_eq!(argv[4], "SoHo");
    }
}
