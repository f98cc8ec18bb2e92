//! Editor actions and their tagged-scalar argument
//!
//! Every operation the UI layer can invoke is one [`Action`] plus one
//! [`Arg`]. For navigation actions the argument encodes direction and
//! selection: `±1` moves, `±2` extends the selection. For deletions the
//! sign is the direction. The rest ignore it.

use crate::editor::Editor;

/// Argument carried by every action, interpreted per action
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arg {
    Int(i64),
    Float(f64),
}

impl Arg {
    /// The argument as a signed integer; floats are truncated
    #[must_use]
    pub fn int(&self) -> i64 {
        match self {
            Arg::Int(v) => *v,
            Arg::Float(v) => *v as i64,
        }
    }
}

/// Every operation the UI layer can invoke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Indent (`+1`) or dedent (`-1`) the lines the selection touches
    ChangeIndent,
    /// Delete the selection, or one scalar in the argument's direction
    DeleteChar,
    /// Delete the selection, or to the next word boundary
    DeleteWord,
    /// Delete the selection, or the current line with its newline
    DeleteRow,
    /// Move by one scalar
    NavChar,
    /// Move to the next word boundary
    NavWord,
    /// Move one row, preserving the target column
    NavRow,
    /// Move one page, preserving the target column
    NavPage,
    /// Move to the start (`-`) or end (`+`) of the line
    NavLine,
    /// Move to the nearest paragraph start
    NavParagraph,
    /// Move to the start (`-`) or end (`+`) of the document
    NavDocument,
    /// Insert a newline
    Newline,
    /// Persist to the configured path
    Save,
    /// Reload from the configured path
    Load,
    /// Step the history cursor back
    Undo,
    /// Step the history cursor forward
    Redo,
}

/// Invoke `action` on `editor`. I/O failures are reported on standard
/// error; the document is left unchanged by a failed save or load.
pub fn dispatch(editor: &mut Editor, action: Action, arg: Arg) {
    let v = arg.int();
    match action {
        Action::ChangeIndent => editor.change_indent(v),
        Action::DeleteChar => editor.delete_char(v),
        Action::DeleteWord => editor.delete_word(v),
        Action::DeleteRow => editor.delete_row(),
        Action::NavChar => editor.nav_char(v),
        Action::NavWord => editor.nav_word(v),
        Action::NavRow => editor.nav_row(v),
        Action::NavPage => editor.nav_page(v),
        Action::NavLine => editor.nav_line(v),
        Action::NavParagraph => editor.nav_paragraph(v),
        Action::NavDocument => editor.nav_document(v),
        Action::Newline => editor.newline(),
        Action::Save => {
            if let Err(e) = editor.save() {
                eprintln!("save failed: {e}");
            }
        }
        Action::Load => {
            if let Err(e) = editor.load() {
                eprintln!("load failed: {e}");
            }
        }
        Action::Undo => editor.undo(),
        Action::Redo => editor.redo(),
    }
}
