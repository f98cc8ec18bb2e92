//! The editor: one document, its undo history, and a file path
//!
//! This is the layer the action table operates on. Edit methods mutate the
//! document and record reversible entries into the history; navigation
//! methods move or extend the selection through the document's walks.

use crate::constants::errors;
use crate::constants::layout::PAGE_ROWS;
use crate::document::Document;
use crate::error::{EditError, ErrorKind, Result};
use crate::history::{EditKind, EditRecord, History};
use crate::marks::{DeleteBias, InsertBias, MarkPolicy};
use crate::rune;
use std::path::{Path, PathBuf};

/// An open document with its history and backing path
pub struct Editor {
    document: Document,
    history: History,
    /// Save/load target; `None` for a scratch document
    file_path: Option<PathBuf>,
}

impl Editor {
    /// Create an editor over an empty scratch document
    #[must_use]
    pub fn new() -> Self {
        Editor {
            document: Document::new(),
            history: History::new(),
            file_path: None,
        }
    }

    /// Open `path`: load it if it exists, otherwise start an empty
    /// document that will save there
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut editor = Self::new();
        if path.exists() {
            editor.document.load_from(path).map_err(|e| {
                EditError::new(
                    ErrorKind::Io,
                    errors::LOAD_FAILED,
                    format!("{}: {}", path.display(), e),
                )
            })?;
        }
        editor.file_path = Some(path.to_path_buf());
        Ok(editor)
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Write one scalar at the cursor, replacing any selection
    pub fn write(&mut self, c: char) {
        let mut buf = [0u8; rune::MAX_LEN];
        let n = rune::encode(c, &mut buf);
        self.write_bytes(&buf[..n]);
    }

    /// Write a string at the cursor as one undoable edit, replacing any
    /// selection
    pub fn write_str(&mut self, s: &str) {
        self.write_bytes(s.as_bytes());
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        if let Some((at, removed)) = self.document.delete_selection() {
            self.history.record(EditRecord::delete(at, removed));
        }
        let at = self.document.cursor();
        self.document.insert(at, bytes);
        self.history.record(EditRecord::insert(at, bytes.to_vec()));
    }

    /// Insert a newline at the cursor
    pub fn newline(&mut self) {
        self.write('\n');
    }

    /// Indent (`dir > 0`) or dedent (`dir < 0`) every line the selection
    /// touches, or the cursor's line. Dedent only removes a leading tab.
    pub fn change_indent(&mut self, dir: i64) {
        let (start, end) = match self.document.selection() {
            Some(span) => span,
            None => {
                let c = self.document.cursor();
                (c, c)
            }
        };
        // Track the selection end across the inserts and deletes below
        let end_mark = self.document.register_position(
            end,
            MarkPolicy {
                on_delete: DeleteBias::Left,
                on_insert: InsertBias::After,
            },
        );
        let mut line = self.document.walk_row(start, 0);
        loop {
            if dir > 0 {
                self.document.insert(line, b"\t");
                self.history.record(EditRecord::insert(line, b"\t".to_vec()));
            } else if dir < 0 && self.document.rune_at(line).map(|(c, _)| c) == Some('\t') {
                let removed = self.document.delete_range(line, line + 1);
                self.history.record(EditRecord::delete(line, removed));
            }
            let next = self.document.walk_row(line, 1);
            let end_now = self.document.position(end_mark).unwrap_or(next);
            if next >= end_now || next >= self.document.len() {
                break;
            }
            line = next;
        }
        self.document.release_position(end_mark);
    }

    /// Delete the selection, or one scalar in the direction of `dir`
    pub fn delete_char(&mut self, dir: i64) {
        if self.delete_selection_recorded() {
            return;
        }
        let cursor = self.document.cursor();
        let target = self.document.walk_rune(cursor, dir.signum() as isize);
        self.delete_between(cursor, target);
    }

    /// Delete the selection, or to the next word boundary
    pub fn delete_word(&mut self, dir: i64) {
        if self.delete_selection_recorded() {
            return;
        }
        let cursor = self.document.cursor();
        let target = self.document.walk_word(cursor, dir.signum() as isize);
        self.delete_between(cursor, target);
    }

    /// Delete the selection, or the current line including its trailing
    /// newline
    pub fn delete_row(&mut self) {
        if self.delete_selection_recorded() {
            return;
        }
        let cursor = self.document.cursor();
        let l = self.document.walk_row(cursor, 0);
        let r = self.document.walk_row(cursor, 1);
        self.delete_between(l, r);
    }

    fn delete_selection_recorded(&mut self) -> bool {
        match self.document.delete_selection() {
            Some((at, removed)) if !removed.is_empty() => {
                self.history.record(EditRecord::delete(at, removed));
                true
            }
            Some(_) => true,
            None => false,
        }
    }

    fn delete_between(&mut self, a: usize, b: usize) {
        let (l, r) = (a.min(b), a.max(b));
        if l == r {
            return;
        }
        let removed = self.document.delete_range(l, r);
        self.history.record(EditRecord::delete(l, removed));
    }

    /// Move or extend by one scalar
    pub fn nav_char(&mut self, v: i64) {
        let (dir, selecting) = nav_arg(v);
        let to = self.document.walk_rune(self.document.cursor(), dir);
        self.document.navigate(to, selecting);
    }

    /// Move or extend to the next word boundary
    pub fn nav_word(&mut self, v: i64) {
        let (dir, selecting) = nav_arg(v);
        let to = self.document.walk_word(self.document.cursor(), dir);
        self.document.navigate(to, selecting);
    }

    /// Move or extend one row, preserving the target column
    pub fn nav_row(&mut self, v: i64) {
        let (dir, selecting) = nav_arg(v);
        self.vertical(dir, selecting);
    }

    /// Move or extend one page, preserving the target column
    pub fn nav_page(&mut self, v: i64) {
        let (dir, selecting) = nav_arg(v);
        self.vertical(dir * PAGE_ROWS as isize, selecting);
    }

    /// Move `rows` rows from the cursor, landing as close as possible to
    /// the remembered column. Pinning the column afterwards lets the
    /// cursor drift back out past short lines on later vertical moves.
    fn vertical(&mut self, rows: isize, selecting: bool) {
        let col = self.document.remembered_column();
        let cursor = self.document.cursor();
        let row_start = self.document.walk_row(cursor, rows);
        let to = self.document.position_near_column(row_start, col);
        self.document.navigate(to, selecting);
        self.document.keep_column(col);
    }

    /// Move or extend to the line start (`v < 0`) or line end (`v > 0`)
    pub fn nav_line(&mut self, v: i64) {
        let (dir, selecting) = nav_arg(v);
        let cursor = self.document.cursor();
        let to = if dir < 0 {
            self.document.walk_row(cursor, 0)
        } else {
            self.row_end(cursor)
        };
        self.document.navigate(to, selecting);
    }

    /// Move or extend to the nearest paragraph start
    pub fn nav_paragraph(&mut self, v: i64) {
        let (dir, selecting) = nav_arg(v);
        let to = self.document.walk_paragraph(self.document.cursor(), dir);
        self.document.navigate(to, selecting);
    }

    /// Move or extend to the document start (`v < 0`) or end (`v > 0`)
    pub fn nav_document(&mut self, v: i64) {
        let (dir, selecting) = nav_arg(v);
        let to = if dir < 0 { 0 } else { self.document.len() };
        self.document.navigate(to, selecting);
    }

    /// Persist the document to its path
    pub fn save(&mut self) -> Result<()> {
        let Some(path) = self.file_path.clone() else {
            return Err(EditError::new(
                ErrorKind::Io,
                errors::NO_PATH,
                errors::MSG_NO_FILE_NAME,
            ));
        };
        self.document.save_to(&path).map_err(|e| {
            EditError::new(
                ErrorKind::Io,
                errors::SAVE_FAILED,
                format!("{}: {}", path.display(), e),
            )
        })
    }

    /// Reload the document from its path, replacing content, selection,
    /// and history. On error everything is unchanged.
    pub fn load(&mut self) -> Result<()> {
        let Some(path) = self.file_path.clone() else {
            return Err(EditError::new(
                ErrorKind::Io,
                errors::NO_PATH,
                errors::MSG_NO_FILE_NAME,
            ));
        };
        self.document.load_from(&path).map_err(|e| {
            EditError::new(
                ErrorKind::Io,
                errors::LOAD_FAILED,
                format!("{}: {}", path.display(), e),
            )
        })?;
        self.history.clear();
        Ok(())
    }

    /// Undo the most recent edit and move the cursor to where it ended
    pub fn undo(&mut self) {
        let record = self.history.undo(&mut self.document);
        if record.kind != EditKind::Nop {
            self.document.navigate(record.end(), false);
        }
    }

    /// Re-apply the most recently undone edit
    pub fn redo(&mut self) {
        let record = self.history.redo(&mut self.document);
        if record.kind != EditKind::Nop {
            self.document.navigate(record.end(), false);
        }
    }

    /// Position before the row's newline, or the buffer end on the last row
    fn row_end(&self, pos: usize) -> usize {
        let next = self.document.walk_row(pos, 1);
        match self.document.rune_before(next) {
            Some(('\n', w)) => next - w,
            _ => next,
        }
    }
}

/// Decode a navigation argument: sign is the direction, magnitude 2 extends
/// the selection
fn nav_arg(v: i64) -> (isize, bool) {
    (v.signum() as isize, v.abs() >= 2)
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
