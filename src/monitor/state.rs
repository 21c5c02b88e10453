// SPDX-License-Identifier: MPL-2.0
//! Monitor state persistence using CBOR format.
//!
//! The only state is the operator's "stop alerting" choice. It lives in the
//! data directory, apart from the user-editable `settings.toml`.
//!
//! # Path Resolution
//!
//! 1. Explicit directory passed to `load_from()`/`save_to()`
//! 2. `L10N_OVERLAY_DATA_DIR` environment variable
//! 3. Platform-specific data directory

use crate::error::{Error, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

/// State file name within the data directory.
const STATE_FILE: &str = "monitor-state.cbor";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MonitorState {
    /// Set once the operator dismissed the advisory.
    #[serde(default)]
    pub disabled: bool,
}

impl MonitorState {
    /// Loads state from `base_dir`, or the default data directory.
    ///
    /// Returns the default state plus a warning when the file exists but cannot
    /// be read or decoded. A missing file is not a problem.
    pub fn load_from(base_dir: Option<PathBuf>) -> (Self, Option<String>) {
        let Some(path) = Self::state_file_path(base_dir) else {
            return (Self::default(), None);
        };

        if !path.exists() {
            return (Self::default(), None);
        }

        let decoded = fs::File::open(&path)
            .map_err(Error::from)
            .and_then(|file| Ok(ciborium::from_reader(BufReader::new(file))?));
        match decoded {
            Ok(state) => (state, None),
            Err(err) => (
                Self::default(),
                Some(format!("Could not read monitor state {}: {err}", path.display())),
            ),
        }
    }

    /// Saves state to `base_dir`, or the default data directory, creating the
    /// directory when needed.
    ///
    /// # Errors
    ///
    /// Returns an error if no data directory can be determined or the file
    /// cannot be written.
    pub fn save_to(&self, base_dir: Option<PathBuf>) -> Result<()> {
        let path = Self::state_file_path(base_dir)
            .ok_or_else(|| Error::State("no data directory available".to_string()))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(fs::File::create(&path)?);
        ciborium::into_writer(self, writer)?;
        Ok(())
    }

    fn state_file_path(base_dir: Option<PathBuf>) -> Option<PathBuf> {
        paths::get_data_dir_with_override(base_dir).map(|mut path| {
            path.push(STATE_FILE);
            path
        })
    }
}
