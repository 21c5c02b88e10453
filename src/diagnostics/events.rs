// SPDX-License-Identifier: MPL-2.0
//! Resolution event types.
//!
//! One event is recorded per observable step of a lookup, merge, search-path
//! rebuild or status check.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happened.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResolutionEventKind {
    // ==========================================================================
    // Lookup
    // ==========================================================================
    /// A contributor chain walk started for a normalized key.
    LookupStarted {
        path: String,
        /// Module the lookup is scoped to, if any.
        #[serde(skip_serializing_if = "Option::is_none")]
        module: Option<String>,
    },

    /// A contributor supplied the resource; the walk stops here.
    ContributorHit {
        path: String,
        contributor: String,
        locator: String,
    },

    /// A contributor did not have the resource.
    ContributorMiss { path: String, contributor: String },

    /// No contributor answered and the context's own lookup was used.
    FallbackUsed { path: String, found: bool },

    // ==========================================================================
    // Bundles
    // ==========================================================================
    /// A contributed bundle was merged over the base properties.
    BundleMerged { bundle: String, keys: usize },

    /// A contributed bundle was found but could not be read or parsed.
    BundleUnreadable { bundle: String, message: String },

    // ==========================================================================
    // Installation
    // ==========================================================================
    /// The debug search path was rebuilt after a registry change.
    SearchPathRebuilt { entries: usize },

    /// The status check found a foreign bundle factory installed.
    OverrideReplaced {
        implementation: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        module: Option<String>,
    },
}

/// A recorded event with its wall-clock time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolutionEvent {
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: ResolutionEventKind,
}

impl ResolutionEvent {
    #[must_use]
    pub fn new(kind: ResolutionEventKind) -> Self {
        Self { at: Utc::now(), kind }
    }
}
