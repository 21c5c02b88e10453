// SPDX-License-Identifier: MPL-2.0
//! Collector for resolution events.
//!
//! Producers (resolver, merger, installer, monitor) hold a cloneable
//! [`DiagnosticsHandle`] and never block: events go through a bounded channel
//! and are dropped when it is full. The owner of the [`DiagnosticsCollector`]
//! drains the channel into a circular buffer when it wants to look.

use crossbeam_channel::{bounded, Receiver, Sender};

use super::{CircularBuffer, ResolutionEvent, ResolutionEventKind};
use crate::config::{Config, TRACE_CHANNEL_CAPACITY};
use crate::domain::TraceCapacity;

/// Handle for sending resolution events to the collector.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<ResolutionEvent>,
}

impl DiagnosticsHandle {
    /// Records `kind` now. Non-blocking; dropped if the channel is full or the
    /// collector is gone.
    pub fn record(&self, kind: ResolutionEventKind) {
        let _ = self.event_tx.try_send(ResolutionEvent::new(kind));
    }
}

/// Central store for resolution events.
pub struct DiagnosticsCollector {
    buffer: CircularBuffer<ResolutionEvent>,
    event_rx: Receiver<ResolutionEvent>,
    event_tx: Sender<ResolutionEvent>,
}

impl DiagnosticsCollector {
    #[must_use]
    pub fn new(capacity: TraceCapacity) -> Self {
        let (event_tx, event_rx) = bounded(TRACE_CHANNEL_CAPACITY);
        Self {
            buffer: CircularBuffer::new(capacity),
            event_rx,
            event_tx,
        }
    }

    /// Collector sized by the `trace_capacity` setting.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.trace_capacity())
    }

    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Moves all pending events from the channel into the buffer.
    pub fn process_pending(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.buffer.push(event);
        }
    }

    /// Buffered events, oldest first. Call [`process_pending`] first to
    /// include recent ones.
    ///
    /// [`process_pending`]: DiagnosticsCollector::process_pending
    pub fn events(&self) -> impl Iterator<Item = &ResolutionEvent> {
        self.buffer.iter()
    }

    /// Number of events kept before the oldest are evicted.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Drains pending events and renders the whole trace as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export_json(&mut self) -> serde_json::Result<String> {
        self.process_pending();
        let events: Vec<&ResolutionEvent> = self.buffer.iter().collect();
        serde_json::to_string_pretty(&events)
    }
}
