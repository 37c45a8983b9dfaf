//! Undo/Redo History
//!
//! History entries are whole-document snapshots, not per-keystroke diffs:
//! simpler and correct, acceptable given bounded depth and modest document
//! sizes. Both stacks are bounded LIFO lists; when the undo stack is full
//! the oldest entry is silently dropped (a deliberate resource bound, not an
//! error). Recording a new snapshot clears the redo stack, so no redo
//! branches survive a new edit.

/// Default bound on undo/redo depth.
pub const DEFAULT_UNDO_CAPACITY: usize = 100;

/// Immutable snapshot of document content plus the restore positions.
///
/// Line and viewport positions are stored as 1-based numbers, not handles:
/// handles do not survive the rebuild a restore performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// All line texts in order.
    pub lines: Vec<String>,
    /// 1-based cursor line number.
    pub cursor_line_num: usize,
    /// 1-based cursor column.
    pub cursor_col: usize,
    /// 1-based number of the first visible line.
    pub first_visible_num: usize,
}

/// Bounded undo/redo stacks of whole-document snapshots.
#[derive(Debug, Clone)]
pub struct History {
    undo: Vec<Snapshot>,
    redo: Vec<Snapshot>,
    capacity: usize,
}

impl History {
    /// Create a history bound to `capacity` entries per stack.
    pub fn new(capacity: usize) -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            capacity,
        }
    }

    /// Record an undo point. Drops the oldest entry at capacity and clears
    /// the redo stack (linear-history discipline).
    pub fn record(&mut self, snapshot: Snapshot) {
        self.undo.push(snapshot);
        if self.undo.len() > self.capacity {
            self.undo.remove(0);
        }
        self.redo.clear();
    }

    /// Pop the most recent undo snapshot, pushing `current` onto the redo
    /// stack. Returns `None` (and leaves redo untouched) when empty.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let snapshot = self.undo.pop()?;
        self.redo.push(current);
        Some(snapshot)
    }

    /// Pop the most recent redo snapshot, pushing `current` onto the undo
    /// stack. Returns `None` (and leaves undo untouched) when empty.
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let snapshot = self.redo.pop()?;
        self.undo.push(current);
        Some(snapshot)
    }

    /// Whether an undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether a redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Current undo stack depth.
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Current redo stack depth.
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_CAPACITY)
    }
}
