// RoundWatch — Rolling Edge History
//
// Fixed three-slot ring of timestamped values, oldest first. Used for both
// tilt states and commands; callers decide when a value counts as an edge.

use crate::config::HISTORY_LEN;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stamped<T> {
    pub value: T,
    pub at_ms: u32,
}

impl<T> Stamped<T> {
    pub const fn new(value: T, at_ms: u32) -> Self {
        Self { value, at_ms }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeHistory<T> {
    entries: [Stamped<T>; HISTORY_LEN],
}

impl<T: Copy + PartialEq> EdgeHistory<T> {
    /// A history with every slot set to `value` at `now_ms`.
    pub fn filled(value: T, now_ms: u32) -> Self {
        Self {
            entries: [Stamped::new(value, now_ms); HISTORY_LEN],
        }
    }

    /// Oldest first.
    pub fn entries(&self) -> &[Stamped<T>; HISTORY_LEN] {
        &self.entries
    }

    pub fn oldest(&self) -> Stamped<T> {
        self.entries[0]
    }

    pub fn newest(&self) -> Stamped<T> {
        self.entries[HISTORY_LEN - 1]
    }

    /// Append `value`, evicting the oldest entry.
    pub fn push(&mut self, value: T, now_ms: u32) {
        self.entries.rotate_left(1);
        self.entries[HISTORY_LEN - 1] = Stamped::new(value, now_ms);
    }

    /// Append `value` only if it differs from the newest entry.
    /// Returns whether an entry was appended.
    pub fn push_if_changed(&mut self, value: T, now_ms: u32) -> bool {
        if self.newest().value == value {
            return false;
        }
        self.push(value, now_ms);
        true
    }

    pub fn reset(&mut self, value: T, now_ms: u32) {
        *self = Self::filled(value, now_ms);
    }

    pub fn values(&self) -> [T; HISTORY_LEN] {
        self.entries.map(|e| e.value)
    }
}
