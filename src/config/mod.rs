// SPDX-License-Identifier: MPL-2.0
//! This module handles the overlay's configuration, loaded from and saved to
//! a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use l10n_overlay::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Tighten the diagnostics trace
//! config.trace_capacity = Some(200);
//!
//! // Save to a specific path (e.g., for testing)
//! let temp_file = PathBuf::from("./temp_config_dir/settings.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded.trace_capacity, Some(200));
//! ```

pub mod defaults;

use crate::domain::TraceCapacity;
use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use defaults::*;

const CONFIG_FILE: &str = "settings.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Marker identifying base names that point into a packaged artifact.
    #[serde(default)]
    pub artifact_marker: Option<String>,
    /// Marker identifying base names that point into a development tree.
    #[serde(default)]
    pub development_marker: Option<String>,
    /// Extension of contributed bundle files, without the dot.
    #[serde(default)]
    pub bundle_extension: Option<String>,
    /// Number of resolution events kept for diagnostics.
    #[serde(default)]
    pub trace_capacity: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            artifact_marker: Some(DEFAULT_ARTIFACT_MARKER.to_string()),
            development_marker: Some(DEFAULT_DEVELOPMENT_MARKER.to_string()),
            bundle_extension: Some(DEFAULT_BUNDLE_EXTENSION.to_string()),
            trace_capacity: Some(DEFAULT_TRACE_CAPACITY),
        }
    }
}

impl Config {
    pub fn artifact_marker(&self) -> &str {
        self.artifact_marker
            .as_deref()
            .filter(|marker| !marker.is_empty())
            .unwrap_or(DEFAULT_ARTIFACT_MARKER)
    }

    pub fn development_marker(&self) -> &str {
        self.development_marker
            .as_deref()
            .filter(|marker| !marker.is_empty())
            .unwrap_or(DEFAULT_DEVELOPMENT_MARKER)
    }

    pub fn bundle_extension(&self) -> &str {
        self.bundle_extension
            .as_deref()
            .map(|ext| ext.trim_start_matches('.'))
            .filter(|ext| !ext.is_empty())
            .unwrap_or(DEFAULT_BUNDLE_EXTENSION)
    }

    pub fn trace_capacity(&self) -> TraceCapacity {
        self.trace_capacity
            .map(TraceCapacity::new)
            .unwrap_or_default()
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    paths::get_config_dir().map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Reads `path`; an unparsable file yields the default configuration.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            log::warn!("Ignoring invalid configuration in {}: {err}", path.display());
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
