//! Navigation primitives: scalar, word, row, and paragraph walks, column
//! arithmetic, and viewport scrolling.
//!
//! All walks operate on compact offsets, saturate at the buffer ends, and
//! never mutate the document; `scroll` only rewrites the viewport origin.

use super::Document;
use crate::constants::layout::TAB_STOP;
use crate::movement::is_word_boundary;
use unicode_width::UnicodeWidthChar;

/// Column after laying out `c` at `col`: a tab advances to the next stop,
/// a printable scalar takes one column, anything else is zero-width
pub(crate) fn next_column(col: usize, c: char) -> usize {
    if c == '\t' {
        (col + TAB_STOP) & !(TAB_STOP - 1)
    } else if UnicodeWidthChar::width(c).unwrap_or(0) > 0 {
        col + 1
    } else {
        col
    }
}

impl Document {
    /// Move `|delta|` scalar boundaries in the direction of `delta`,
    /// saturating at the buffer ends
    #[must_use]
    pub fn walk_rune(&self, pos: usize, delta: isize) -> usize {
        let mut p = pos;
        for _ in 0..delta.unsigned_abs() {
            if delta > 0 {
                match self.rune_at(p) {
                    Some((_, w)) => p += w,
                    None => break,
                }
            } else {
                match self.rune_before(p) {
                    Some((_, w)) => p -= w,
                    None => break,
                }
            }
        }
        p
    }

    /// Move `|delta|` word boundaries in the direction of `delta`.
    ///
    /// Each step advances at least one scalar, then continues to the first
    /// seam where the character class changes (newlines and the stream ends
    /// always count as boundaries).
    #[must_use]
    pub fn walk_word(&self, pos: usize, delta: isize) -> usize {
        let dir: isize = if delta >= 0 { 1 } else { -1 };
        let mut pos = pos;
        for _ in 0..delta.unsigned_abs() {
            let mut p = self.walk_rune(pos, dir);
            while p > 0 && p < self.len() {
                let prev = self.rune_before(p).map(|(c, _)| c);
                let next = self.rune_at(p).map(|(c, _)| c);
                if is_word_boundary(prev, next) {
                    break;
                }
                p = self.walk_rune(p, dir);
            }
            pos = p;
        }
        pos
    }

    /// Row navigation.
    ///
    /// - `delta > 0`: the byte after the `delta`-th newline past `pos`, or
    ///   the buffer end if there are fewer.
    /// - `delta < 0`: retreat past `|delta| + 1` newlines and return the
    ///   byte after the last one crossed, or the buffer start.
    /// - `delta = 0`: the start of the row containing `pos`.
    #[must_use]
    pub fn walk_row(&self, pos: usize, delta: isize) -> usize {
        if delta > 0 {
            let mut p = pos;
            let mut remaining = delta.unsigned_abs();
            while remaining > 0 {
                match self.rune_at(p) {
                    Some((c, w)) => {
                        p += w;
                        if c == '\n' {
                            remaining -= 1;
                        }
                    }
                    None => return self.len(),
                }
            }
            p
        } else {
            let mut p = pos;
            let mut remaining = delta.unsigned_abs() + 1;
            while p > 0 {
                match self.rune_before(p) {
                    Some(('\n', _)) if remaining == 1 => break,
                    Some(('\n', w)) => {
                        remaining -= 1;
                        p -= w;
                    }
                    Some((_, w)) => p -= w,
                    None => break,
                }
            }
            p
        }
    }

    /// Walk to the nearest paragraph start in the direction of `delta`: the
    /// first row start, at least one row away, whose preceding row holds no
    /// scalar besides blanks. The current row never counts, even when
    /// blank.
    #[must_use]
    pub fn walk_paragraph(&self, pos: usize, delta: isize) -> usize {
        let dir: isize = if delta >= 0 { 1 } else { -1 };
        let mut row = self.walk_row(pos, dir);
        loop {
            if row == 0 || row >= self.len() {
                break;
            }
            let prev_row = self.walk_row(row, -1);
            if self.blank_row(prev_row) {
                break;
            }
            let next = self.walk_row(row, dir);
            if next == row {
                break;
            }
            row = next;
        }
        row
    }

    /// A row whose first non-whitespace scalar is a newline or the end of
    /// the stream
    fn blank_row(&self, row_start: usize) -> bool {
        let mut p = row_start;
        loop {
            match self.rune_at(p) {
                Some(('\n', _)) | None => return true,
                Some((c, w)) if c.is_whitespace() => p += w,
                Some(_) => return false,
            }
        }
    }

    /// Visual column of `pos` on its row
    #[must_use]
    pub fn column(&self, pos: usize) -> usize {
        let mut col = 0;
        let mut p = self.walk_row(pos, 0);
        while p < pos {
            match self.rune_at(p) {
                Some((c, w)) => {
                    col = next_column(col, c);
                    p += w;
                }
                None => break,
            }
        }
        col
    }

    /// Walk forward from a row start to the last position whose column does
    /// not exceed `col`, stopping early at a newline or the stream end
    #[must_use]
    pub fn position_near_column(&self, row_start: usize, col: usize) -> usize {
        let mut p = row_start;
        let mut c = 0;
        while let Some((ch, w)) = self.rune_at(p) {
            if ch == '\n' {
                break;
            }
            let next = next_column(c, ch);
            if next > col {
                break;
            }
            c = next;
            p += w;
        }
        p
    }

    /// Normalize the viewport origin to a row start and recentre it when
    /// the cursor is above the viewport or at or past its last row. The
    /// recentre target puts the cursor `rowc/2` rows down from the origin,
    /// clamped to the buffer start.
    pub fn scroll(&mut self, rowc: usize) {
        let mut origin = self.walk_row(self.render_start(), 0);
        let cursor = self.cursor();
        let last_row = self.walk_row(origin, rowc.saturating_sub(1) as isize);
        if cursor < origin || cursor >= last_row {
            origin = self.walk_row(cursor, -((rowc / 2) as isize));
        }
        self.set_render_start(origin);
    }
}
