//! User configuration loading for katachi.
//!
//! User config location: $XDG_CONFIG_HOME/katachi/katachi.toml
//! Fallback: the platform config directory (e.g. ~/.config/katachi/katachi.toml)

use std::path::{Path, PathBuf};

use super::Settings;
use crate::error::{MorphError, MorphResult};

/// Returns the path to the user configuration file.
///
/// The path is determined by:
/// 1. If $XDG_CONFIG_HOME is set: $XDG_CONFIG_HOME/katachi/katachi.toml
/// 2. Otherwise: `dirs::config_dir()`/katachi/katachi.toml
///
/// Returns None if no config directory can be determined.
pub fn user_config_path() -> Option<PathBuf> {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return Some(PathBuf::from(xdg_config).join("katachi").join("katachi.toml"));
    }

    dirs::config_dir().map(|dir| dir.join("katachi").join("katachi.toml"))
}

/// Load settings from an explicit TOML file.
pub fn load_settings(path: &Path) -> MorphResult<Settings> {
    let text = std::fs::read_to_string(path)?;
    Settings::from_toml(&text).map_err(|err| {
        MorphError::config(format!("{}: {}", path.display(), err.message()))
    })
}

/// Load the user-wide settings, falling back to defaults when no file exists.
pub fn load_user_settings() -> MorphResult<Settings> {
    match user_config_path() {
        Some(path) if path.is_file() => {
            log::debug!(target: "katachi::config", "Loading user settings from {}", path.display());
            load_settings(&path)
        }
        _ => Ok(Settings::default()),
    }
}
