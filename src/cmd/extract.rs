//! Extract and split-here command module

use note_refactor::{Document, Naming, Scope};

use super::host::{selection, Host};

/// Extract lines `from..=to` into a new note
pub fn run(
    host: &Host,
    note: &str,
    from: usize,
    to: usize,
    naming: Naming,
) -> note_refactor::Result<()> {
    let (current, text) = host.load(note)?;
    let range = selection(&text, from, to)?;
    let doc = Document::with_selection(text, range);

    let plan = host.refactor()?.extract(&doc, &current, Scope::Selection, naming)?;
    host.commit(&current, &doc, &plan)
}

/// Move line `line` through the end of the note into a new note
pub fn run_split_here(
    host: &Host,
    note: &str,
    line: usize,
    naming: Naming,
) -> note_refactor::Result<()> {
    let (current, text) = host.load(note)?;
    let cursor = selection(&text, line, line)?.start;
    let doc = Document::with_cursor(text, cursor);

    let plan = host.refactor()?.extract(&doc, &current, Scope::Remainder, naming)?;
    host.commit(&current, &doc, &plan)
}
