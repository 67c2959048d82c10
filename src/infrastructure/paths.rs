//! Path manipulation utilities for the Zellij sandbox environment.
//!
//! Inside the plugin sandbox the host filesystem is mounted under `/host`.
//! These helpers convert user-facing paths from the plugin configuration into
//! sandbox paths and back.

use std::path::PathBuf;

/// Returns the Atlasphere data directory.
///
/// Resolves to `/host/.local/share/zellij/atlasphere` in the sandbox, which is
/// `~/.local/share/zellij/atlasphere` on the host when Zellij was started from
/// the home directory. Trace output and the default locations file live here.
///
/// # Examples
///
/// ```
/// use atlasphere::infrastructure::get_data_dir;
///
/// let data_dir = get_data_dir();
/// assert_eq!(data_dir.to_str().unwrap(), "/host/.local/share/zellij/atlasphere");
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("atlasphere")
}

/// Default location of a user-provided locations file.
#[must_use]
pub fn default_locations_file() -> PathBuf {
    get_data_dir().join("locations.toml")
}

/// Expands tilde paths to use the `/host` prefix.
///
/// # Examples
///
/// ```
/// use atlasphere::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/maps/nyc.toml"), "/host/maps/nyc.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

/// Removes the `/host` prefix so paths read as they do on the host.
///
/// # Examples
///
/// ```
/// use atlasphere::infrastructure::strip_host_prefix;
///
/// assert_eq!(strip_host_prefix("/host/maps/nyc.toml"), "/maps/nyc.toml");
/// assert_eq!(strip_host_prefix("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn strip_host_prefix(path: &str) -> String {
    path.strip_prefix("/host").unwrap_or(path).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_locations_file_is_in_data_dir() {
        let file = default_locations_file();
        assert!(file.starts_with(get_data_dir()));
        assert_eq!(file.file_name().and_then(|n| n.to_str()), Some("locations.toml"));
    }

    #[test]
    fn test_expand_then_strip_restores_home_relative_path() {
        assert_eq!(strip_host_prefix(&expand_tilde("~/maps")), "/maps");
    }
}
