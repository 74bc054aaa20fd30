//! Edit history
//!
//! Bounded undo stack over serialized source-document snapshots. The
//! 50-entry bound is enforced structurally by the deque, not by callers;
//! nothing outside the owning session needs to know the capacity policy.

use std::collections::VecDeque;

/// Default snapshot capacity.
pub const HISTORY_CAPACITY: usize = 50;

/// Bounded undo stack of source snapshots, oldest evicted first.
#[derive(Debug, Clone)]
pub struct EditHistory {
    snapshots: VecDeque<String>,
    capacity: usize,
}

impl EditHistory {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            snapshots: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a snapshot. A snapshot textually equal to the current top is
    /// coalesced into a no-op; when full, the oldest snapshot is evicted.
    pub fn push(&mut self, snapshot: impl Into<String>) {
        let snapshot = snapshot.into();

        if self.snapshots.back() == Some(&snapshot) {
            return;
        }

        if self.snapshots.len() == self.capacity {
            self.snapshots.pop_front();
        }

        self.snapshots.push_back(snapshot);
    }

    /// Pop the most recent snapshot.
    pub fn pop(&mut self) -> Option<String> {
        self.snapshots.pop_back()
    }

    /// Drop all snapshots. Called on document switch so undo never
    /// crosses document boundaries.
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new()
    }
}
