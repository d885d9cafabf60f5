//! Shared command plumbing: settings, vault access and plan persistence

use std::ops::Range;
use std::path::Path;

use log::info;
use note_refactor::{
    display_path, line_range, CurrentNote, Document, FsVault, LinkStyle, Refactor,
    RefactorError, RefactorPlan, Settings, UniqueNames,
};

pub struct Host {
    pub vault: FsVault,
    pub settings: Settings,
    pub dry_run: bool,
}

impl Host {
    pub fn open(vault: &Path, config: Option<&Path>, dry_run: bool) -> note_refactor::Result<Self> {
        let settings = Settings::load_or_default(config)?;
        let vault = FsVault::open(vault)?;
        Ok(Self { vault, settings, dry_run })
    }

    /// Refactor engine wired to this vault's links and existing names
    pub fn refactor(&self) -> note_refactor::Result<Refactor<LinkStyle, UniqueNames>> {
        let links = LinkStyle::from_settings(&self.settings);
        let names = self.vault.name_allocator(&self.settings)?;
        Ok(Refactor::new(self.settings.clone(), links, names))
    }

    /// Source note and its text
    pub fn load(&self, note: &str) -> note_refactor::Result<(CurrentNote, String)> {
        let current = self.vault.current_note(note)?;
        let text = self.vault.read_note(&current.path)?;
        Ok((current, text))
    }

    /// Write the plan's notes, then the edited source
    ///
    /// With `--dry-run` the notes and the edited source are printed instead.
    pub fn commit(
        &self,
        current: &CurrentNote,
        doc: &Document,
        plan: &RefactorPlan,
    ) -> note_refactor::Result<()> {
        let edited = plan.apply(doc)?;

        if self.dry_run {
            for note in &plan.notes {
                println!("=== {} ===", note.path);
                println!("{}", note.content);
            }
            if !plan.edits.is_empty() {
                println!("=== {} (edited) ===", current.path);
                println!("{}", edited.text);
            }
            return Ok(());
        }

        for note in &plan.notes {
            let path = self.vault.write_new_note(note)?;
            println!("{}", display_path(&path));
        }
        if edited.text != doc.text {
            self.vault.write_note(&current.path, &edited.text)?;
        }

        info!(
            "event=commit source={} notes={} edits={}",
            current.path,
            plan.notes.len(),
            plan.edits.len()
        );
        Ok(())
    }
}

/// Byte range of lines `from..=to`, as a selection
pub fn selection(text: &str, from: usize, to: usize) -> note_refactor::Result<Range<usize>> {
    line_range(text, from, to).ok_or(RefactorError::InvalidLineRange {
        start: from,
        end: to,
        lines: text.split('\n').count(),
    })
}
