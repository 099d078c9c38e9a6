//! Bounded buffer of Q-table snapshots awaiting persistence.

use std::collections::VecDeque;

use crate::q_learning::q_table::QTable;

/// Ring buffer of `(update counter, table copy)` entries.
///
/// When full, the oldest entry is dropped to make room. Storage grows with
/// use; `capacity` only bounds it.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    entries: VecDeque<(u64, QTable)>,
    capacity: usize,
}

impl HistoryBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a snapshot. Returns the key of an evicted entry, if any.
    pub fn push(&mut self, key: u64, table: QTable) -> Option<u64> {
        let evicted = if self.entries.len() == self.capacity {
            self.entries.pop_front().map(|(key, _)| key)
        } else {
            None
        };
        self.entries.push_back((key, table));
        evicted
    }

    pub fn iter(&self) -> impl Iterator<Item = &(u64, QTable)> {
        self.entries.iter()
    }

    /// Remove and return every buffered snapshot, oldest first.
    pub fn drain(&mut self) -> Vec<(u64, QTable)> {
        self.entries.drain(..).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
