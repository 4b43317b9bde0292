//! # Undo History
//!
//! Bounded sequence of whole-document snapshots plus a head cursor.
//!
//! ## Design
//!
//! - Every committed edit captures a deep clone of the entire document;
//!   snapshots are never diffs and never alias the live tree
//! - Undo/redo moves the head and hands back a fresh clone of the snapshot,
//!   so stored snapshots are never mutated by later edits either
//! - Capturing while redo history exists truncates everything after the
//!   head: new edits invalidate the future
//! - When the capacity is exceeded the oldest snapshot is evicted and the
//!   head shifts down with it
//! - Out-of-range navigation is a silent no-op: "nothing more to undo" is a
//!   steady-state condition, not an error

use std::fmt;
use xmledit_document::XmlDocument;

/// Observable history state handed to event callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryState {
    /// Index of the snapshot currently reflected as the live document;
    /// `None` iff no snapshot has been captured.
    pub head: Option<usize>,
    /// Number of stored snapshots.
    pub len: usize,
    /// Configured maximum number of snapshots.
    pub capacity: usize,
}

/// Single-slot event hook; registering a new one replaces the previous.
pub type HistoryCallback = Box<dyn FnMut(HistoryState)>;

/// Snapshot-based undo/redo history.
///
/// Invariants: `head` is `None` iff `snapshots` is empty, otherwise
/// `head < snapshots.len()`; `snapshots.len() <= capacity`.
pub struct UndoHistory {
    snapshots: Vec<XmlDocument>,
    head: Option<usize>,
    capacity: usize,
    on_capture: Option<HistoryCallback>,
    on_change: Option<HistoryCallback>,
}

impl UndoHistory {
    /// Create a history bounded to `capacity` snapshots. A capacity of zero
    /// disables capturing entirely.
    pub fn new(capacity: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            head: None,
            capacity,
            on_capture: None,
            on_change: None,
        }
    }

    /// Capture a deep clone of the live document as the newest snapshot.
    ///
    /// Any redo history beyond the head is discarded first. With a zero
    /// capacity this is a configured no-op, not an error.
    pub fn capture(&mut self, doc: &XmlDocument) {
        if self.capacity == 0 {
            return;
        }

        // New edits invalidate the future.
        if let Some(head) = self.head {
            self.snapshots.truncate(head + 1);
        }

        self.snapshots.push(doc.deep_clone());
        if self.snapshots.len() > self.capacity {
            self.snapshots.remove(0);
        }
        self.head = Some(self.snapshots.len() - 1);

        tracing::debug!(len = self.snapshots.len(), "snapshot captured");
        self.fire_capture();
    }

    /// Move the head by `step` (-1 undo, +1 redo, larger magnitudes allowed)
    /// and return a fresh clone of the snapshot at the new head.
    ///
    /// The target must land inside the stored snapshots and below the
    /// configured capacity; otherwise nothing changes and `None` is
    /// returned.
    pub fn change_head(&mut self, step: isize) -> Option<XmlDocument> {
        let head = self.head?;
        let target = head as isize + step;
        if target < 0
            || target >= self.snapshots.len() as isize
            || target >= self.capacity as isize
        {
            return None;
        }

        let target = target as usize;
        self.head = Some(target);
        let restored = self.snapshots[target].deep_clone();

        tracing::debug!(head = target, step, "history navigated");
        self.fire_change();
        Some(restored)
    }

    /// Register the state-capture event hook, replacing any previous one.
    pub fn set_state_capture_event(&mut self, callback: impl FnMut(HistoryState) + 'static) {
        self.on_capture = Some(Box::new(callback));
    }

    /// Register the state-change event hook, replacing any previous one.
    pub fn set_state_change_event(&mut self, callback: impl FnMut(HistoryState) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.head, Some(head) if head > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.head, Some(head) if head + 1 < self.snapshots.len() && head + 1 < self.capacity)
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn head(&self) -> Option<usize> {
        self.head
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn state(&self) -> HistoryState {
        HistoryState {
            head: self.head,
            len: self.snapshots.len(),
            capacity: self.capacity,
        }
    }

    /// Drop all snapshots.
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.head = None;
    }

    fn fire_capture(&mut self) {
        let state = self.state();
        if let Some(callback) = self.on_capture.as_mut() {
            callback(state);
        }
    }

    fn fire_change(&mut self) {
        let state = self.state();
        if let Some(callback) = self.on_change.as_mut() {
            callback(state);
        }
    }
}

impl fmt::Debug for UndoHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UndoHistory")
            .field("len", &self.snapshots.len())
            .field("head", &self.head)
            .field("capacity", &self.capacity)
            .finish()
    }
}
