// SPDX-License-Identifier: MPL-2.0
//! Diagnostics newtypes.
//!
//! This module provides type-safe wrappers for diagnostics values,
//! ensuring they are always within valid ranges.

// =============================================================================
// Trace Capacity Bounds
// =============================================================================

/// Trace capacity bounds (100 to 10000 events).
pub mod trace_capacity_bounds {
    /// Minimum trace capacity.
    pub const MIN: usize = 100;
    /// Maximum trace capacity.
    pub const MAX: usize = 10000;
    /// Default trace capacity.
    pub const DEFAULT: usize = 1000;
}

// =============================================================================
// TraceCapacity
// =============================================================================

/// Number of resolution events retained by the diagnostics trace.
///
/// # Example
///
/// ```
/// use l10n_overlay::domain::TraceCapacity;
///
/// assert_eq!(TraceCapacity::new(1000).value(), 1000);
/// // Values outside range are clamped
/// assert_eq!(TraceCapacity::new(50000).value(), 10000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceCapacity(usize);

impl TraceCapacity {
    /// Creates a new trace capacity, clamping to valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(trace_capacity_bounds::MIN, trace_capacity_bounds::MAX))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for TraceCapacity {
    fn default() -> Self {
        Self(trace_capacity_bounds::DEFAULT)
    }
}
