//! Document management
//! Combines the gap buffer with the mark tracker and exposes the editing
//! surface: insert, delete, navigate, selection, and bulk load/save.
//!
//! ## document/ Invariants
//!
//! - The cursor is the gap: its logical position is `GapBuffer::gap_start`.
//! - Public offsets are compact (gap-collapsed) byte offsets on scalar
//!   boundaries; physical gap geometry never escapes this module.
//! - Every mutation rewrites all registered marks before returning.
//! - The selection spans from the anchor to the cursor in compact order;
//!   a cleared anchor means no selection.

use crate::buffer::GapBuffer;
use crate::marks::{DeleteBias, InsertBias, Mark, MarkPolicy, MarkSet};
use crate::rune;
use std::io;
use std::path::Path;

mod motion;

/// The viewport origin stays put when text is inserted at it and snaps to
/// the start of a deleted range
const RENDER_POLICY: MarkPolicy = MarkPolicy {
    on_delete: DeleteBias::Left,
    on_insert: InsertBias::Before,
};

/// The selection anchor dissolves when the text under it is deleted
const ANCHOR_POLICY: MarkPolicy = MarkPolicy {
    on_delete: DeleteBias::Clear,
    on_insert: InsertBias::Before,
};

/// A single text document
pub struct Document {
    /// Text storage; the gap is the cursor
    text: GapBuffer,
    /// Registered marks, rewritten on every mutation
    marks: MarkSet,
    /// Selection anchor; `None` means no selection
    sel_anchor: Option<Mark>,
    /// First byte rendered (normalized to a row start by `scroll`)
    render_start: Mark,
    /// Cached visual column of the cursor, for vertical motion
    col: usize,
    /// Whether `col` needs recomputing before its next use
    col_dirty: bool,
}

impl Document {
    /// Create a new empty document
    #[must_use]
    pub fn new() -> Self {
        let text = GapBuffer::new();
        let mut marks = MarkSet::new();
        let render_start = marks.register(0, RENDER_POLICY);
        Document {
            text,
            marks,
            sel_anchor: None,
            render_start,
            col: 0,
            col_dirty: true,
        }
    }

    /// Create a document holding `bytes`, cursor at offset 0
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut doc = Self::new();
        doc.text = GapBuffer::from_bytes(bytes);
        doc
    }

    /// Logical content length in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the document holds no content
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Logical cursor position
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.text.gap_start()
    }

    /// Copy the whole content into one owned vector
    #[must_use]
    pub fn contents(&self) -> Vec<u8> {
        self.text.to_bytes()
    }

    /// The scalar starting at `pos` and its encoded width, or `None` at end
    /// of stream
    #[must_use]
    pub fn rune_at(&self, pos: usize) -> Option<(char, usize)> {
        if pos >= self.len() {
            return None;
        }
        rune::decode(self.text.slice_at(pos))
    }

    /// The scalar ending at `pos` and its encoded width, or `None` at the
    /// start of the buffer
    #[must_use]
    pub fn rune_before(&self, pos: usize) -> Option<(char, usize)> {
        if pos == 0 || pos > self.len() {
            return None;
        }
        let limit = pos.saturating_sub(rune::MAX_LEN);
        let mut start = pos - 1;
        while start > limit && rune::is_continuation(self.text.byte_at(start)) {
            start -= 1;
        }
        if let Some((c, w)) = self.rune_at(start) {
            if start + w == pos {
                return Some((c, w));
            }
        }
        // Malformed bytes decode one at a time, mirroring forward scans
        Some((rune::REPLACEMENT, 1))
    }

    /// Insert `bytes` at logical offset `at`; the cursor lands after them.
    ///
    /// The gap is grown first, so a failed allocation aborts before any
    /// state changes.
    pub fn insert(&mut self, at: usize, bytes: &[u8]) {
        debug_assert!(at <= self.len());
        let before = self.text.span();
        self.text.grow_gap(bytes.len());
        self.marks.rebase(before, self.text.span());

        let before = self.text.span();
        self.text.move_gap(at);
        self.marks.rebase(before, self.text.span());

        let before = self.text.span();
        self.text.fill(bytes);
        self.marks.on_insert(at, bytes.len(), before, self.text.span());
        self.col_dirty = true;
    }

    /// Insert one scalar at logical offset `at`
    pub fn insert_rune(&mut self, at: usize, c: char) {
        let mut buf = [0u8; rune::MAX_LEN];
        let n = rune::encode(c, &mut buf);
        self.insert(at, &buf[..n]);
    }

    /// Remove the logical range `[l, r)` and return the removed bytes.
    /// The cursor lands at `l`.
    pub fn delete_range(&mut self, l: usize, r: usize) -> Vec<u8> {
        debug_assert!(l <= r && r <= self.len());
        if l == r {
            return Vec::new();
        }
        let before = self.text.span();
        let removed = self.text.delete(l, r);
        self.marks.on_delete(l, r, before, self.text.span());
        // Drop the anchor slot if the delete dissolved it
        if let Some(anchor) = self.sel_anchor {
            if self.marks.get(anchor).is_none() {
                self.marks.release(anchor);
                self.sel_anchor = None;
            }
        }
        self.col_dirty = true;
        removed
    }

    /// Move the cursor to logical offset `to`.
    ///
    /// With `selecting`, an anchor is established at the current cursor
    /// before the move (if none exists); without, any anchor is cleared.
    pub fn navigate(&mut self, to: usize, selecting: bool) {
        debug_assert!(to <= self.len());
        if selecting {
            if self.sel_anchor.is_none() {
                let anchor = self.marks.register(self.text.gap_end(), ANCHOR_POLICY);
                self.sel_anchor = Some(anchor);
            }
        } else {
            self.clear_selection();
        }
        let before = self.text.span();
        self.text.move_gap(to);
        self.marks.rebase(before, self.text.span());
        self.col_dirty = true;
    }

    /// Selection extent in compact order, or `None` when no anchor is set
    #[must_use]
    pub fn selection(&self) -> Option<(usize, usize)> {
        let anchor = self.sel_anchor.and_then(|m| self.marks.get(m))?;
        let anchor = self.text.span().compact(anchor);
        let cursor = self.cursor();
        Some((anchor.min(cursor), anchor.max(cursor)))
    }

    /// A fresh copy of the selected bytes, or `None` when no anchor is set
    #[must_use]
    pub fn get_selection(&self) -> Option<Vec<u8>> {
        let (l, r) = self.selection()?;
        Some(self.text.copy_range(l, r))
    }

    /// Delete the selected range and clear the anchor. Returns the range
    /// start and the removed bytes, or `None` when no anchor is set.
    pub fn delete_selection(&mut self) -> Option<(usize, Vec<u8>)> {
        let (l, r) = self.selection()?;
        let removed = self.delete_range(l, r);
        self.clear_selection();
        Some((l, removed))
    }

    /// Drop the selection anchor
    pub fn clear_selection(&mut self) {
        if let Some(anchor) = self.sel_anchor.take() {
            self.marks.release(anchor);
        }
    }

    /// Register a position that survives intervening edits; read it back
    /// with [`Self::position`] and drop it with [`Self::release_position`]
    pub fn register_position(&mut self, pos: usize, policy: MarkPolicy) -> Mark {
        debug_assert!(pos <= self.len());
        self.marks.register(self.text.span().expand(pos), policy)
    }

    /// Current logical offset of a registered position, or `None` if a
    /// delete cleared it
    #[must_use]
    pub fn position(&self, mark: Mark) -> Option<usize> {
        self.marks
            .get(mark)
            .map(|o| self.text.span().compact(o))
    }

    /// Release a position registered with [`Self::register_position`]
    pub fn release_position(&mut self, mark: Mark) {
        self.marks.release(mark);
    }

    /// First rendered byte (the viewport origin)
    #[must_use]
    pub fn render_start(&self) -> usize {
        self.marks
            .get(self.render_start)
            .map_or(0, |o| self.text.span().compact(o))
    }

    pub(crate) fn set_render_start(&mut self, pos: usize) {
        debug_assert!(pos <= self.len());
        let physical = self.text.span().expand(pos);
        self.marks.set(self.render_start, physical);
    }

    /// Cached cursor column for vertical motion, recomputed when stale
    pub fn remembered_column(&mut self) -> usize {
        if self.col_dirty {
            self.col = self.column(self.cursor());
            self.col_dirty = false;
        }
        self.col
    }

    /// Pin the cached column after a vertical move so the cursor drifts
    /// back out past short lines
    pub fn keep_column(&mut self, col: usize) {
        self.col = col;
        self.col_dirty = false;
    }

    /// Replace the whole document with `bytes`: cursor at 0, selection
    /// cleared, viewport origin at 0. The document identity is preserved;
    /// registered built-in marks are rebound into the new buffer.
    pub fn replace(&mut self, bytes: &[u8]) {
        self.text = GapBuffer::from_bytes(bytes);
        self.clear_selection();
        self.marks.set(self.render_start, 0);
        self.col = 0;
        self.col_dirty = true;
    }

    /// Reload the document from a file, replacing the content atomically.
    /// On error the document is unchanged.
    pub fn load_from(&mut self, path: impl AsRef<Path>) -> io::Result<()> {
        let bytes = std::fs::read(path)?;
        self.replace(&bytes);
        Ok(())
    }

    /// Write the content (upper and lower sections back to back) to a file
    pub fn save_to(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let mut out = Vec::with_capacity(self.len());
        out.extend_from_slice(self.text.upper());
        out.extend_from_slice(self.text.lower());
        std::fs::write(path, out)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
