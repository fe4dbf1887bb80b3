//! Bounded linear undo/redo over full snapshots.
//!
//! Entries are deep copies of the editable collection. `undo`/`redo` move the
//! cursor and hand the snapshot back; the caller applies it through its normal
//! commit path, and the `record` that follows is swallowed once so the applied
//! snapshot does not become a new entry.

use tracing::debug;

use crate::input::{Key, Modifiers};
use tracefinity_core::constants::DEFAULT_HISTORY_DEPTH;

/// Command decoded from a keyboard shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryCommand {
    Undo,
    Redo,
}

impl HistoryCommand {
    /// Ctrl/Cmd+Z undoes, with Shift it redoes.
    pub fn from_shortcut(key: &Key, modifiers: Modifiers) -> Option<HistoryCommand> {
        if !(modifiers.ctrl || modifiers.meta) {
            return None;
        }
        match key {
            Key::Character(c) if c.eq_ignore_ascii_case(&'z') => Some(if modifiers.shift {
                HistoryCommand::Redo
            } else {
                HistoryCommand::Undo
            }),
            _ => None,
        }
    }
}

/// Snapshot history with a fixed capacity.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<T>,
    index: usize,
    capacity: usize,
    suppress_next: bool,
}

impl<T: Clone> History<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            index: 0,
            capacity: capacity.max(1),
            suppress_next: false,
        }
    }

    /// Make `initial` entry 0 unless something was recorded already.
    pub fn seed_if_empty(&mut self, initial: &T) -> bool {
        if !self.entries.is_empty() {
            return false;
        }
        self.entries.push(initial.clone());
        self.index = 0;
        true
    }

    /// Append a snapshot, dropping any redo branch and the oldest entry when full.
    ///
    /// Returns `false` when the call was swallowed after an undo or redo.
    pub fn record(&mut self, snapshot: &T) -> bool {
        if self.suppress_next {
            self.suppress_next = false;
            return false;
        }
        if !self.entries.is_empty() {
            self.entries.truncate(self.index + 1);
        }
        self.entries.push(snapshot.clone());
        if self.entries.len() > self.capacity {
            self.entries.remove(0);
        }
        self.index = self.entries.len() - 1;
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty() && self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Step back and return the snapshot to apply.
    pub fn undo(&mut self) -> Option<T> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.suppress_next = true;
        debug!("History undo to {}/{}", self.index, self.entries.len());
        Some(self.entries[self.index].clone())
    }

    /// Step forward and return the snapshot to apply.
    pub fn redo(&mut self) -> Option<T> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.suppress_next = true;
        debug!("History redo to {}/{}", self.index, self.entries.len());
        Some(self.entries[self.index].clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cursor position, meaningful only when not empty.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index = 0;
        self.suppress_next = false;
    }
}

impl<T: Clone> Default for History<T> {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}
