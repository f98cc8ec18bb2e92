//! Viewport rendering onto a fixed-size character grid
//!
//! The renderer lays the visible region out cell by cell, expanding tabs,
//! shading the selection, and reporting the cell the cursor landed in. It
//! is a pure function of document state: the only thing it rewrites is the
//! viewport origin, normalized through [`Document::scroll`].
//!
//! ## render/ Invariants
//!
//! - Cells are row-major; every draw starts from a cleared grid.
//! - Tabs expand with spaces to the next multiple of the tab stop.
//! - A newline fills the rest of its row with spaces.
//! - The in-selection flag flips when the scan crosses either end of the
//!   selection, and is seeded by comparing the selection start against the
//!   viewport origin, so a selection beginning above the viewport shades
//!   the first visible rows.
//! - A cursor on a tab expansion or end-of-row fill takes the expansion's
//!   first cell.

use crate::constants::layout::TAB_STOP;
use crate::document::Document;
use unicode_width::UnicodeWidthChar;

/// One character cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// The scalar to display
    pub glyph: char,
    /// Whether the cell lies in the selection (drawn with inverted
    /// foreground and background)
    pub selected: bool,
}

impl Cell {
    /// A blank, unselected cell
    #[must_use]
    pub fn empty() -> Self {
        Cell {
            glyph: ' ',
            selected: false,
        }
    }
}

/// Cursor location in grid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorCell {
    pub row: usize,
    pub col: usize,
}

/// A row-major grid of character cells
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Grid {
            rows,
            cols,
            cells: vec![Cell::empty(); rows * cols],
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The cell at `(row, col)`
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        debug_assert!(row < self.rows && col < self.cols);
        &self.cells[row * self.cols + col]
    }

    fn set(&mut self, row: usize, col: usize, cell: Cell) {
        debug_assert!(row < self.rows && col < self.cols);
        self.cells[row * self.cols + col] = cell;
    }

    /// Fill the whole grid with blank cells
    pub fn clear(&mut self) {
        self.cells.fill(Cell::empty());
    }

    /// Resize the grid, clearing its content
    pub fn resize(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        self.cols = cols;
        self.cells.clear();
        self.cells.resize(rows * cols, Cell::empty());
    }

    /// The glyphs of one row as a string (tests and diagnostics)
    #[must_use]
    pub fn row_text(&self, row: usize) -> String {
        (0..self.cols).map(|c| self.cell(row, c).glyph).collect()
    }
}

/// Lay the viewport out onto `grid` and return the cursor's cell.
///
/// Scrolls first so the viewport origin is coherent with the cursor, then
/// walks scalar by scalar from the origin until the grid is full or the
/// stream ends.
pub fn draw(doc: &mut Document, grid: &mut Grid) -> CursorCell {
    doc.scroll(grid.rows());
    grid.clear();
    if grid.rows() == 0 || grid.cols() == 0 {
        return CursorCell::default();
    }

    let origin = doc.render_start();
    let cursor = doc.cursor();
    let selection = doc.selection();
    let (sel_start, sel_end) = selection.unwrap_or((usize::MAX, usize::MAX));
    // A selection opening above the viewport shades from the first cell
    let mut selected = selection.is_some() && sel_start < origin;

    let mut cursor_cell = CursorCell::default();
    let mut cursor_seen = false;
    let mut pos = origin;
    let mut row = 0;
    let mut col = 0;

    while row < grid.rows() {
        if pos == sel_start {
            selected = !selected;
        }
        if pos == sel_end && sel_end != sel_start {
            selected = !selected;
        }
        if pos == cursor && !cursor_seen {
            cursor_cell = CursorCell { row, col };
            cursor_seen = true;
        }
        match doc.rune_at(pos) {
            None => break,
            Some(('\n', w)) => {
                while col < grid.cols() {
                    grid.set(row, col, Cell { glyph: ' ', selected });
                    col += 1;
                }
                row += 1;
                col = 0;
                pos += w;
            }
            Some(('\t', w)) => {
                let stop = ((col + TAB_STOP) & !(TAB_STOP - 1)).min(grid.cols());
                while col < stop {
                    grid.set(row, col, Cell { glyph: ' ', selected });
                    col += 1;
                }
                pos += w;
                if col == grid.cols() {
                    row += 1;
                    col = 0;
                }
            }
            Some((c, w)) => {
                if UnicodeWidthChar::width(c).unwrap_or(0) > 0 {
                    grid.set(row, col, Cell { glyph: c, selected });
                    col += 1;
                    if col == grid.cols() {
                        row += 1;
                        col = 0;
                    }
                }
                pos += w;
            }
        }
    }

    cursor_cell
}
