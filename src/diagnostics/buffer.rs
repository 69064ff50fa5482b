// SPDX-License-Identifier: MPL-2.0
//! Bounded ring buffer backing the lifecycle history.

use crate::domain::diagnostics::HistoryCapacity;
use std::collections::VecDeque;

/// Keeps the most recent entries, dropping the oldest once full.
///
/// ```
/// use care_toast::diagnostics::CircularBuffer;
/// use care_toast::domain::diagnostics::HistoryCapacity;
///
/// let mut buffer = CircularBuffer::new(HistoryCapacity::new(16));
/// for n in 0..20 {
///     buffer.push(n);
/// }
/// assert_eq!(buffer.iter().next(), Some(&4));
/// ```
#[derive(Debug, Clone)]
pub struct CircularBuffer<T> {
    entries: VecDeque<T>,
    limit: HistoryCapacity,
}

impl<T> CircularBuffer<T> {
    #[must_use]
    pub fn new(limit: HistoryCapacity) -> Self {
        Self {
            entries: VecDeque::new(),
            limit,
        }
    }

    /// Appends an entry, dropping the oldest one when the limit is reached.
    pub fn push(&mut self, entry: T) {
        if self.entries.len() == self.limit.value() {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}
