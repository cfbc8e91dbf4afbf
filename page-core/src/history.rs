//! # Undo/Redo History
//!
//! Whole-document snapshots on two bounded stacks.
//!
//! ```text
//! record(doc)   undo ← doc         redo cleared
//! undo(cur)     redo ← cur         returns undo.pop()
//! redo(cur)     undo ← cur         returns redo.pop()
//! ```
//!
//! Both stacks hold at most `capacity` entries; pushing onto a full stack
//! evicts its oldest entry. History is linear: recording after an undo
//! discards everything on the redo stack.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::document::Document;
use crate::error::{EditorError, EditorResult, HistoryDirection};

/// Default number of entries kept on each stack.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// An immutable image of a document at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot(Arc<Document>);

impl Snapshot {
    /// Capture a document.
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self(Arc::new(document))
    }

    /// Borrow the captured document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.0
    }

    /// Take the captured document, cloning only if the snapshot is shared.
    #[must_use]
    pub fn into_document(self) -> Document {
        Arc::try_unwrap(self.0).unwrap_or_else(|shared| (*shared).clone())
    }
}

/// Bounded undo and redo stacks.
#[derive(Debug, Clone)]
pub struct History {
    undo: VecDeque<Snapshot>,
    redo: VecDeque<Snapshot>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl History {
    /// Create empty history keeping at most `capacity` entries per stack.
    ///
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Maximum entries per stack.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    fn push_bounded(stack: &mut VecDeque<Snapshot>, capacity: usize, snapshot: Snapshot) {
        if stack.len() >= capacity {
            stack.pop_front();
            tracing::trace!(capacity, "History full, oldest entry evicted");
        }
        stack.push_back(snapshot);
    }

    /// Record the state preceding a mutation. Clears the redo stack.
    pub fn record(&mut self, snapshot: Snapshot) {
        Self::push_bounded(&mut self.undo, self.capacity, snapshot);
        self.redo.clear();
    }

    /// Step back one entry.
    ///
    /// `current` is moved to the redo stack and the most recent undo entry is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::EmptyHistory`] if there is nothing to undo; the
    /// stacks are untouched in that case.
    pub fn undo(&mut self, current: Snapshot) -> EditorResult<Document> {
        let previous = self
            .undo
            .pop_back()
            .ok_or(EditorError::EmptyHistory(HistoryDirection::Undo))?;
        Self::push_bounded(&mut self.redo, self.capacity, current);
        Ok(previous.into_document())
    }

    /// Step forward one entry.
    ///
    /// `current` is moved to the undo stack, with the same eviction rule as
    /// [`History::record`], and the most recent redo entry is returned.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::EmptyHistory`] if there is nothing to redo.
    pub fn redo(&mut self, current: Snapshot) -> EditorResult<Document> {
        let next = self
            .redo
            .pop_back()
            .ok_or(EditorError::EmptyHistory(HistoryDirection::Redo))?;
        Self::push_bounded(&mut self.undo, self.capacity, current);
        Ok(next.into_document())
    }

    /// Whether an undo is possible.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether a redo is possible.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Entries on the undo stack.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Entries on the redo stack.
    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentStore;
    use crate::element::{ElementKind, Position};

    #[test]
    fn test_empty_history() {
        let mut history = History::default();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.capacity(), DEFAULT_HISTORY_CAPACITY);

        let current = Snapshot::new(Document::new());
        assert!(matches!(
            history.undo(current.clone()),
            Err(EditorError::EmptyHistory(HistoryDirection::Undo))
        ));
        assert!(matches!(
            history.redo(current),
            Err(EditorError::EmptyHistory(HistoryDirection::Redo))
        ));
        assert_eq!(history.redo_depth(), 0);
    }

    #[test]
    fn test_undo_then_redo_restores() {
        let mut store = DocumentStore::new();
        let mut history = History::default();

        history.record(store.snapshot());
        store.create(ElementKind::Text, Position::new(1, 2));
        let after = store.document().clone();

        let restored = history.undo(store.snapshot()).expect("undo");
        assert!(restored.is_empty());
        assert!(history.can_redo());
        store.restore(restored);

        let redone = history.redo(store.snapshot()).expect("redo");
        assert_eq!(redone, after);
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_record_clears_redo() {
        let mut history = History::default();
        history.record(Snapshot::new(Document::new()));
        history
            .undo(Snapshot::new(Document::new()))
            .expect("undo");
        assert!(history.can_redo());

        history.record(Snapshot::new(Document::new()));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = History::new(3);
        for _ in 0..5 {
            history.record(Snapshot::new(Document::new()));
        }
        assert_eq!(history.undo_depth(), 3);

        history.clear();
        assert!(!history.can_undo());
    }

    #[test]
    fn test_snapshot_is_detached_from_store() {
        let mut store = DocumentStore::new();
        let snapshot = store.snapshot();
        store.create(ElementKind::Image, Position::default());
        assert!(snapshot.document().is_empty());
        assert_eq!(store.document().len(), 1);
    }

    #[test]
    fn test_redo_refills_undo_up_to_capacity() {
        let mut store = DocumentStore::new();
        let mut history = History::new(2);

        for _ in 0..3 {
            history.record(store.snapshot());
            store.create(ElementKind::Button, Position::default());
        }
        assert_eq!(history.undo_depth(), 2);

        let doc = history.undo(store.snapshot()).expect("undo");
        store.restore(doc);
        assert_eq!((history.undo_depth(), history.redo_depth()), (1, 1));

        let doc = history.redo(store.snapshot()).expect("redo");
        store.restore(doc);
        assert_eq!((history.undo_depth(), history.redo_depth()), (2, 0));
        assert_eq!(store.document().len(), 3);
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        assert_eq!(History::new(0).capacity(), 1);
    }
}
