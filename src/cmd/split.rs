//! Split-by-heading and split-bullets command modules

use log::warn;
use note_refactor::{Document, Naming};

use super::host::{selection, Host};

pub fn run_heading(host: &Host, note: &str, level: usize) -> note_refactor::Result<()> {
    let (current, text) = host.load(note)?;
    let doc = Document::new(text);

    let plan = host.refactor()?.split_by_heading(&doc, &current, level);
    if plan.is_empty() {
        warn!("event=split_by_heading status=no_blocks level={}", level);
        eprintln!("No level {} headings found in '{}'", level, current.path);
        return Ok(());
    }
    host.commit(&current, &doc, &plan)
}

pub fn run_bullets(
    host: &Host,
    note: &str,
    from: usize,
    to: usize,
    naming: Naming,
) -> note_refactor::Result<()> {
    let (current, text) = host.load(note)?;
    let range = selection(&text, from, to)?;
    let doc = Document::with_selection(text, range);

    let plan = host.refactor()?.split_bullets(&doc, &current, naming)?;
    host.commit(&current, &doc, &plan)
}
