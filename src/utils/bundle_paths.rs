//! Platform path resolution
//!
//! Paths are always resolved through the platform conventions exposed by `dirs`, never
//! relative to the current working directory: when the app is launched from a desktop
//! launcher the cwd is usually `/` and relative paths land in the wrong place.

use std::path::PathBuf;
use tracing::{debug, warn};

const APP_DIR_NAME: &str = "tubefetch";

/// Get the configuration directory for Tubefetch.
///
/// Returns `<config_dir>/tubefetch/` (e.g. `~/.config/tubefetch` on Linux) and creates it
/// if it doesn't exist.
pub fn get_app_config_dir() -> PathBuf {
    let dir = dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME);

    if let Err(e) = std::fs::create_dir_all(&dir) {
        warn!("Failed to create config directory {:?}: {}", dir, e);
    }

    debug!("Config directory: {:?}", dir);
    dir
}

/// Get the settings file path: `<config_dir>/tubefetch/settings.json`
pub fn get_settings_path() -> PathBuf {
    get_app_config_dir().join("settings.json")
}

/// Get the downloads directory.
///
/// Falls back to `~/Downloads` if the platform lookup fails, then to the temp dir.
pub fn get_downloads_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| {
            warn!("Could not determine Downloads directory, using temp dir");
            std::env::temp_dir()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_path_is_not_relative() {
        let path = get_settings_path();
        assert!(path.is_absolute(), "Settings path must be absolute");
        assert!(path.ends_with("tubefetch/settings.json"));
    }

    #[test]
    fn test_downloads_dir_is_not_relative() {
        let path = get_downloads_dir();
        assert!(path.is_absolute(), "Downloads dir must be absolute path");
    }
}
