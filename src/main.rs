//! Gapedit - a gap-buffer text editor
//! Main entry point

use gapedit::editor::Editor;
use gapedit::term;

fn main() {
    // Open the file named on the command line, or a scratch document
    let mut editor = match std::env::args().nth(1) {
        Some(path) => match Editor::open(&path) {
            Ok(e) => e,
            Err(e) => {
                eprintln!("Failed to open {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Editor::new(),
    };

    // Run the terminal loop
    if let Err(e) = term::run(&mut editor) {
        eprintln!("Editor error: {}", e);
        std::process::exit(1);
    }
}
