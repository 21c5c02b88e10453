// SPDX-License-Identifier: MPL-2.0
//! Bounded ring buffer for the resolution trace.

use std::collections::VecDeque;

use crate::domain::TraceCapacity;

/// A circular buffer with fixed capacity.
///
/// When the buffer is full, pushing a new element evicts the oldest one.
/// Elements are stored in chronological order (oldest first).
///
/// # Example
///
/// ```
/// use l10n_overlay::diagnostics::CircularBuffer;
///
/// let mut buffer: CircularBuffer<i32> = CircularBuffer::with_raw_capacity(2);
/// buffer.push(1);
/// buffer.push(2);
/// buffer.push(3);
///
/// let items: Vec<_> = buffer.iter().copied().collect();
/// assert_eq!(items, vec![2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct CircularBuffer<T> {
    data: VecDeque<T>,
    capacity: usize,
}

impl<T> CircularBuffer<T> {
    #[must_use]
    pub fn new(capacity: TraceCapacity) -> Self {
        Self::with_raw_capacity(capacity.value())
    }

    /// Creates a buffer with an unchecked capacity (at least 1). Meant for
    /// tests that need tiny buffers.
    #[must_use]
    pub fn with_raw_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, item: T) {
        if self.data.len() >= self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(item);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::diagnostics::trace_capacity_bounds;

    #[test]
    fn evicts_oldest_when_full() {
        let mut buffer = CircularBuffer::with_raw_capacity(3);
        for i in 1..=5 {
            buffer.push(i);
        }
        assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), vec![3, 4, 5]);
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn zero_raw_capacity_is_raised_to_one() {
        let mut buffer = CircularBuffer::with_raw_capacity(0);
        buffer.push("a");
        buffer.push("b");
        assert_eq!(buffer.capacity(), 1);
        assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn new_uses_trace_capacity() {
        let buffer: CircularBuffer<u8> = CircularBuffer::new(TraceCapacity::default());
        assert_eq!(buffer.capacity(), trace_capacity_bounds::DEFAULT);
        assert!(buffer.is_empty());
    }

    #[test]
    fn clear_empties_buffer() {
        let mut buffer = CircularBuffer::with_raw_capacity(4);
        buffer.push(1);
        buffer.clear();
        assert!(buffer.is_empty());
    }
}
