// SPDX-License-Identifier: MPL-2.0
//! Diagnostics for the resolution engine.
//!
//! Every observable step (each contributor queried, fallbacks, merges,
//! search-path rebuilds, foreign factories detected) can be recorded as a
//! [`ResolutionEvent`] in a memory-bounded trace. Recording is fire-and-forget
//! and never changes an outcome.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: ring buffer with configurable capacity
//! - [`ResolutionEvent`]: timestamped event, see [`ResolutionEventKind`]
//! - [`DiagnosticsCollector`] / [`DiagnosticsHandle`]: channel-fed store and
//!   its cheap producer handle

mod buffer;
mod collector;
mod events;

pub use buffer::CircularBuffer;
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{ResolutionEvent, ResolutionEventKind};

/// Records on an optional handle.
pub(crate) fn record(handle: Option<&DiagnosticsHandle>, kind: ResolutionEventKind) {
    if let Some(handle) = handle {
        handle.record(kind);
    }
}
