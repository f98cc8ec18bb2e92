//! Undo/redo history
//!
//! A contiguous log of reversible edits with a cursor. Entries before the
//! cursor are done; entries at and after it are redoable. Recording a new
//! edit truncates the redoable tail. Payloads are owned copies, never
//! references into the live buffer, so a later delete cannot invalidate
//! them.

use crate::constants::history::INITIAL_ENTRIES;
use crate::document::Document;

/// What an edit did; inverting a record swaps the tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// Neutral placeholder returned when there is nothing to undo or redo
    Nop,
    /// `bytes` were inserted at `at`
    Insert,
    /// `bytes` were removed starting at `at`
    Delete,
}

/// One reversible edit: a kind, a compact offset, and the payload bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRecord {
    pub kind: EditKind,
    /// Compact byte offset the edit applies at
    pub at: usize,
    /// The bytes inserted or removed
    pub bytes: Vec<u8>,
}

impl EditRecord {
    pub fn insert(at: usize, bytes: Vec<u8>) -> Self {
        EditRecord {
            kind: EditKind::Insert,
            at,
            bytes,
        }
    }

    pub fn delete(at: usize, bytes: Vec<u8>) -> Self {
        EditRecord {
            kind: EditKind::Delete,
            at,
            bytes,
        }
    }

    pub fn nop() -> Self {
        EditRecord {
            kind: EditKind::Nop,
            at: 0,
            bytes: Vec::new(),
        }
    }

    /// The record that exactly reverses this one
    #[must_use]
    pub fn inverse(&self) -> EditRecord {
        EditRecord {
            kind: match self.kind {
                EditKind::Nop => EditKind::Nop,
                EditKind::Insert => EditKind::Delete,
                EditKind::Delete => EditKind::Insert,
            },
            at: self.at,
            bytes: self.bytes.clone(),
        }
    }

    /// Cursor position after this record is applied
    #[must_use]
    pub fn end(&self) -> usize {
        match self.kind {
            EditKind::Nop | EditKind::Delete => self.at,
            EditKind::Insert => self.at + self.bytes.len(),
        }
    }

    /// Execute this record against a document.
    ///
    /// A delete's payload must match the live bytes; the history is only
    /// consistent with documents it was recorded against.
    pub fn apply(&self, doc: &mut Document) {
        match self.kind {
            EditKind::Nop => {}
            EditKind::Insert => doc.insert(self.at, &self.bytes),
            EditKind::Delete => {
                let removed = doc.delete_range(self.at, self.at + self.bytes.len());
                debug_assert_eq!(removed, self.bytes, "history diverged from document");
                let _ = removed;
            }
        }
    }
}

/// The undo log of one document
pub struct History {
    entries: Vec<EditRecord>,
    /// Entries before this index are done
    cursor: usize,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        History {
            entries: Vec::with_capacity(INITIAL_ENTRIES),
            cursor: 0,
        }
    }

    /// Number of recorded entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len()
    }

    /// Append a completed edit, discarding the redoable tail
    pub fn record(&mut self, record: EditRecord) {
        self.entries.truncate(self.cursor);
        self.entries.push(record);
        self.cursor += 1;
    }

    /// Reverse the most recent done entry against the document.
    ///
    /// Returns the reversed record so the caller can reposition the
    /// insertion point at [`EditRecord::end`]; a NOP means nothing to undo.
    pub fn undo(&mut self, doc: &mut Document) -> EditRecord {
        if self.cursor == 0 {
            return EditRecord::nop();
        }
        self.cursor -= 1;
        let reversed = self.entries[self.cursor].inverse();
        reversed.apply(doc);
        reversed
    }

    /// Re-apply the entry at the cursor against the document.
    ///
    /// Returns the applied record; a NOP means nothing to redo.
    pub fn redo(&mut self, doc: &mut Document) -> EditRecord {
        if self.cursor == self.entries.len() {
            return EditRecord::nop();
        }
        let record = self.entries[self.cursor].clone();
        self.cursor += 1;
        record.apply(doc);
        record
    }

    /// Forget everything (e.g. after the document is replaced wholesale)
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
