//! Terminal frontend
//!
//! Thin adapter binding the engine to a crossterm terminal: raw-mode
//! setup, the key-to-action table, and a blit of the rendered cell grid
//! with the selection in reverse video. All editing flows through the
//! action API; this layer holds no editing logic of its own.

use crate::action::{self, Action, Arg};
use crate::editor::Editor;
use crate::render::{draw, CursorCell, Grid};
use anyhow::{Context, Result};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use std::io::{self, Write};

/// Restores the terminal even when the event loop errors out
struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        execute!(io::stdout(), EnterAlternateScreen, Hide)
            .context("failed to enter alternate screen")?;
        Ok(RawModeGuard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Run the interactive loop until the user quits (Ctrl-Q)
pub fn run(editor: &mut Editor) -> Result<()> {
    let _guard = RawModeGuard::enter()?;
    let mut grid = Grid::new(0, 0);

    loop {
        let (cols, rows) = terminal::size().context("failed to query terminal size")?;
        if grid.rows() != rows as usize || grid.cols() != cols as usize {
            grid.resize(rows as usize, cols as usize);
        }
        let cursor = draw(editor.document_mut(), &mut grid);
        paint(&grid, cursor)?;

        match event::read().context("failed to read terminal event")? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if is_quit(&key) {
                    return Ok(());
                }
                handle_key(editor, &key);
            }
            // A resize is picked up at the top of the loop
            _ => {}
        }
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q')
}

/// The key table, mirroring the classic shortcut layout: Shift extends the
/// selection, Ctrl switches to the larger motion
fn handle_key(editor: &mut Editor, key: &KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let step = if shift { 2 } else { 1 };

    let (act, arg) = match key.code {
        KeyCode::Tab => (Action::ChangeIndent, 1),
        KeyCode::BackTab => (Action::ChangeIndent, -1),
        KeyCode::Enter => (Action::Newline, 0),
        KeyCode::Backspace if ctrl => (Action::DeleteWord, -1),
        KeyCode::Backspace => (Action::DeleteChar, -1),
        KeyCode::Delete if ctrl => (Action::DeleteWord, 1),
        KeyCode::Delete => (Action::DeleteChar, 1),
        KeyCode::Left if ctrl => (Action::NavWord, -step),
        KeyCode::Left => (Action::NavChar, -step),
        KeyCode::Right if ctrl => (Action::NavWord, step),
        KeyCode::Right => (Action::NavChar, step),
        KeyCode::Up if ctrl => (Action::NavParagraph, -step),
        KeyCode::Up => (Action::NavRow, -step),
        KeyCode::Down if ctrl => (Action::NavParagraph, step),
        KeyCode::Down => (Action::NavRow, step),
        KeyCode::Home if ctrl => (Action::NavDocument, -step),
        KeyCode::Home => (Action::NavLine, -step),
        KeyCode::End if ctrl => (Action::NavDocument, step),
        KeyCode::End => (Action::NavLine, step),
        KeyCode::PageUp => (Action::NavPage, -step),
        KeyCode::PageDown => (Action::NavPage, step),
        KeyCode::Char('s') if ctrl => (Action::Save, 0),
        KeyCode::Char('o') if ctrl => (Action::Load, 0),
        KeyCode::Char('z') if ctrl => (Action::Undo, 0),
        KeyCode::Char('y') if ctrl => (Action::Redo, 0),
        KeyCode::Char('k') if ctrl => (Action::DeleteRow, 0),
        KeyCode::Char(c) if !ctrl => {
            editor.write(c);
            return;
        }
        _ => return,
    };
    action::dispatch(editor, act, Arg::Int(arg));
}

/// Copy the grid to the terminal, rendering selected cells in reverse
/// video, and park the terminal cursor on the reported cell
fn paint(grid: &Grid, cursor: CursorCell) -> Result<()> {
    let mut out = io::stdout();
    queue!(out, Hide, MoveTo(0, 0), Clear(ClearType::All)).context("failed to clear screen")?;

    for row in 0..grid.rows() {
        queue!(out, MoveTo(0, row as u16)).context("failed to move cursor")?;
        let mut reversed = false;
        for col in 0..grid.cols() {
            let cell = grid.cell(row, col);
            if cell.selected != reversed {
                let attr = if cell.selected {
                    Attribute::Reverse
                } else {
                    Attribute::NoReverse
                };
                queue!(out, SetAttribute(attr)).context("failed to set attribute")?;
                reversed = cell.selected;
            }
            queue!(out, Print(cell.glyph)).context("failed to print cell")?;
        }
        if reversed {
            queue!(out, SetAttribute(Attribute::NoReverse)).context("failed to reset attribute")?;
        }
    }

    queue!(out, MoveTo(cursor.col as u16, cursor.row as u16), Show)
        .context("failed to place cursor")?;
    out.flush().context("failed to flush output")?;
    Ok(())
}
