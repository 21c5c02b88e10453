// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Bundle naming**: markers used to derive canonical bundle names
//! - **Diagnostics**: resolution trace capacity bounds

// ==========================================================================
// Bundle Naming Defaults
// ==========================================================================

/// Marker found in base names loaded from a packaged (compiled) artifact.
/// Everything up to and including the marker is stripped.
pub const DEFAULT_ARTIFACT_MARKER: &str = ".jar!";

/// Marker found in base names loaded straight from a development source tree.
pub const DEFAULT_DEVELOPMENT_MARKER: &str = "src/main/resources";

/// File extension of contributed bundles, without the leading dot.
pub const DEFAULT_BUNDLE_EXTENSION: &str = "properties";

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of resolution events kept in the trace buffer.
pub const DEFAULT_TRACE_CAPACITY: usize = 1000;

/// Minimum trace buffer capacity.
pub const MIN_TRACE_CAPACITY: usize = 100;

/// Maximum trace buffer capacity.
pub const MAX_TRACE_CAPACITY: usize = 10000;

/// Capacity of the channel between trace producers and the collector.
pub const TRACE_CHANNEL_CAPACITY: usize = 256;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_TRACE_CAPACITY > 0);
    assert!(MAX_TRACE_CAPACITY >= MIN_TRACE_CAPACITY);
    assert!(DEFAULT_TRACE_CAPACITY >= MIN_TRACE_CAPACITY);
    assert!(DEFAULT_TRACE_CAPACITY <= MAX_TRACE_CAPACITY);
    assert!(TRACE_CHANNEL_CAPACITY > 0);

    assert!(!DEFAULT_ARTIFACT_MARKER.is_empty());
    assert!(!DEFAULT_DEVELOPMENT_MARKER.is_empty());
    assert!(!DEFAULT_BUNDLE_EXTENSION.is_empty());
};
