//! Linear undo/redo history.
//!
//! Each entry holds the state *after* the action it records, so with a
//! baseline entry at index 0 the state after mutation N lives at index N.
//! Recording after an undo discards the redo branch.

use crate::element::{Element, ElementId};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use web_time::{SystemTime, UNIX_EPOCH};

/// Maximum number of history entries to keep.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// A snapshot of document state for undo/redo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    /// The element tree.
    pub elements: Vec<Element>,
    /// The selection at snapshot time.
    pub selected: Option<ElementId>,
}

/// The action that produced a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditAction {
    /// Baseline recorded when a canvas is created or loaded.
    Initialize,
    AddElement,
    UpdateElement,
    RemoveElement,
    DuplicateElement,
    ClearCanvas,
    AddSampleLayout,
    Import,
}

impl EditAction {
    pub fn label(&self) -> &'static str {
        match self {
            EditAction::Initialize => "initialize",
            EditAction::AddElement => "add_element",
            EditAction::UpdateElement => "update_element",
            EditAction::RemoveElement => "remove_element",
            EditAction::DuplicateElement => "duplicate_element",
            EditAction::ClearCanvas => "clear_canvas",
            EditAction::AddSampleLayout => "add_sample_layout",
            EditAction::Import => "import",
        }
    }
}

impl fmt::Display for EditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One immutable history record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub action: EditAction,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub snapshot: DocumentSnapshot,
}

impl HistoryEntry {
    fn new(action: EditAction, snapshot: DocumentSnapshot) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self {
            action,
            timestamp,
            snapshot,
        }
    }
}

/// Bounded linear history with a read cursor.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    /// Index of the entry matching the live state (`None` when empty).
    cursor: Option<usize>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Create an empty history with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Create an empty history keeping at most `capacity` entries (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            cursor: None,
            capacity,
        }
    }

    /// Record the state after an action.
    ///
    /// Entries past the cursor are discarded. When over capacity the oldest
    /// entry is evicted.
    pub fn record(&mut self, action: EditAction, snapshot: DocumentSnapshot) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        let discarded = self.entries.len().saturating_sub(keep);
        if discarded > 0 {
            log::debug!("Discarding {} redo entries", discarded);
        }
        self.entries.truncate(keep);

        self.entries.push_back(HistoryEntry::new(action, snapshot));
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.cursor = Some(self.entries.len() - 1);
        log::debug!("Recorded {} at history index {}", action, self.entries.len() - 1);
    }

    /// Step back one entry and return the snapshot to restore.
    pub fn undo(&mut self) -> Option<&DocumentSnapshot> {
        let cursor = self.cursor.filter(|&c| c > 0)?;
        self.cursor = Some(cursor - 1);
        self.entries.get(cursor - 1).map(|entry| &entry.snapshot)
    }

    /// Step forward one entry and return the snapshot to restore.
    pub fn redo(&mut self) -> Option<&DocumentSnapshot> {
        let cursor = self.cursor.filter(|&c| c + 1 < self.entries.len())?;
        self.cursor = Some(cursor + 1);
        self.entries.get(cursor + 1).map(|entry| &entry.snapshot)
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.entries.len())
    }

    /// Current cursor position.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// The entry matching the live state.
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.cursor.and_then(|c| self.entries.get(c))
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;

    fn snapshot_with(n: usize) -> DocumentSnapshot {
        DocumentSnapshot {
            elements: (0..n).map(|_| Element::new(ElementKind::Text)).collect(),
            selected: None,
        }
    }

    #[test]
    fn test_empty_history() {
        let mut history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.cursor(), None);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_single_entry_cannot_undo() {
        let mut history = History::new();
        history.record(EditAction::Initialize, snapshot_with(0));
        assert_eq!(history.cursor(), Some(0));
        assert!(!history.can_undo());
        assert!(history.undo().is_none());
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn test_undo_redo_moves_cursor() {
        let mut history = History::new();
        history.record(EditAction::Initialize, snapshot_with(0));
        history.record(EditAction::AddElement, snapshot_with(1));
        history.record(EditAction::AddElement, snapshot_with(2));

        assert_eq!(history.undo().map(|s| s.elements.len()), Some(1));
        assert_eq!(history.undo().map(|s| s.elements.len()), Some(0));
        assert!(history.undo().is_none());
        assert!(history.can_redo());

        assert_eq!(history.redo().map(|s| s.elements.len()), Some(1));
        assert_eq!(history.redo().map(|s| s.elements.len()), Some(2));
        assert!(history.redo().is_none());
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_record_discards_redo_branch() {
        let mut history = History::new();
        history.record(EditAction::Initialize, snapshot_with(0));
        history.record(EditAction::AddElement, snapshot_with(1));
        history.record(EditAction::AddElement, snapshot_with(2));
        history.undo();
        history.undo();

        history.record(EditAction::AddSampleLayout, snapshot_with(5));
        assert_eq!(history.len(), 2);
        assert!(!history.can_redo());
        assert_eq!(history.current().map(|e| e.action), Some(EditAction::AddSampleLayout));
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = History::with_capacity(3);
        for n in 0..5 {
            history.record(EditAction::AddElement, snapshot_with(n));
            assert!(history.len() <= 3);
        }
        assert_eq!(history.cursor(), Some(2));
        let sizes: Vec<_> = history.entries().map(|e| e.snapshot.elements.len()).collect();
        assert_eq!(sizes, vec![2, 3, 4]);

        assert!(history.undo().is_some());
        assert!(history.undo().is_some());
        assert!(!history.can_undo());
        assert!(history.can_redo());
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut history = History::with_capacity(0);
        history.record(EditAction::Initialize, snapshot_with(0));
        history.record(EditAction::AddElement, snapshot_with(1));
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn test_action_labels() {
        assert_eq!(EditAction::AddElement.to_string(), "add_element");
        assert_eq!(
            serde_json::to_string(&EditAction::ClearCanvas).unwrap(),
            "\"clear_canvas\""
        );
    }
}
