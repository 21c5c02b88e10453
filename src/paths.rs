// SPDX-License-Identifier: MPL-2.0
//! Centralized path management for the overlay's directories.
//!
//! # Path Resolution Order
//!
//! 1. **Explicit override** - parameter to `_with_override()` functions
//! 2. **Environment variables** (`L10N_OVERLAY_DATA_DIR`, `L10N_OVERLAY_CONFIG_DIR`)
//! 3. **Platform default** - via `dirs` crate, with the application name appended

use std::path::PathBuf;

/// Application name used for directory naming.
const APP_NAME: &str = "L10nOverlay";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "L10N_OVERLAY_DATA_DIR";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "L10N_OVERLAY_CONFIG_DIR";

/// Returns the data directory, where persisted monitor state lives.
pub fn get_data_dir() -> Option<PathBuf> {
    get_data_dir_with_override(None)
}

/// Returns the data directory with an optional override.
///
/// Returns `None` if no override is given, the environment variable is unset
/// or empty, and the platform data directory cannot be determined.
pub fn get_data_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(override_path, ENV_DATA_DIR, dirs::data_dir)
}

/// Returns the config directory, where `settings.toml` lives.
pub fn get_config_dir() -> Option<PathBuf> {
    get_config_dir_with_override(None)
}

/// Returns the config directory with an optional override.
pub fn get_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(override_path, ENV_CONFIG_DIR, dirs::config_dir)
}

fn resolve(
    override_path: Option<PathBuf>,
    env_var: &str,
    platform_dir: fn() -> Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(env_var) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    platform_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}
