//! File-system vault
//!
//! A vault is a directory of Markdown notes. `FsVault` reads the source note,
//! reports which note names are already taken, and writes the notes a
//! `RefactorPlan` asks for. Every path goes through `secure_path`, so nothing
//! is read or written outside the vault root.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::constants as C;
use crate::error::Result;
use crate::link::note_name;
use crate::naming::UniqueNames;
use crate::refactor::{CurrentNote, NewNote};
use crate::settings::Settings;
use crate::util::{display_path, secure_path};

#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    /// Open an existing vault directory
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = dunce::canonicalize(root.as_ref())?;
        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Vault '{}' is not a directory", display_path(&root)),
            )
            .into());
        }
        debug!("event=vault_open root={}", display_path(&root));
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a vault-relative note, `.md` added when missing
    pub fn note_path(&self, relative: &str) -> Result<PathBuf> {
        let path = secure_path(&self.root, relative)?;
        Ok(if path.extension().is_none() {
            path.with_extension(C::MARKDOWN_EXTENSION)
        } else {
            path
        })
    }

    /// The note at `relative`, named after its file
    pub fn current_note(&self, relative: &str) -> Result<CurrentNote> {
        let path = self.note_path(relative)?;
        let rel = path.strip_prefix(&self.root).unwrap_or(&path);
        let rel = display_path(rel);
        Ok(CurrentNote {
            title: note_name(&rel).to_string(),
            path: rel,
        })
    }

    pub fn read_note(&self, relative: &str) -> Result<String> {
        let path = self.note_path(relative)?;
        fs::read_to_string(&path).map_err(|err| {
            io::Error::new(
                err.kind(),
                format!("Cannot read note '{}': {}", display_path(&path), err),
            )
            .into()
        })
    }

    /// Names of the notes directly inside `folder`
    ///
    /// A missing folder has no notes.
    pub fn existing_names(&self, folder: &str) -> Result<Vec<String>> {
        let dir = secure_path(&self.root, folder)?;
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|e| e == C::MARKDOWN_EXTENSION) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Name allocator that avoids notes already in the new-note folder
    pub fn name_allocator(&self, settings: &Settings) -> Result<UniqueNames> {
        Ok(UniqueNames::with_existing(
            self.existing_names(&settings.new_file_folder)?,
        ))
    }

    /// Create a new note; fails if the file already exists
    pub fn write_new_note(&self, note: &NewNote) -> Result<PathBuf> {
        let path = self.note_path(&note.path)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|err| {
                io::Error::new(
                    err.kind(),
                    format!("Cannot create note '{}': {}", display_path(&path), err),
                )
            })?;
        file.write_all(note.content.as_bytes())?;

        info!("event=note_created path={}", display_path(&path));
        Ok(path)
    }

    /// Overwrite an existing note
    pub fn write_note(&self, relative: &str, text: &str) -> Result<PathBuf> {
        let path = self.note_path(relative)?;
        fs::write(&path, text)?;
        info!("event=note_updated path={}", display_path(&path));
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::NameAllocator;
    use tempfile::TempDir;

    fn vault() -> (TempDir, FsVault) {
        let dir = tempfile::tempdir().unwrap();
        let vault = FsVault::open(dir.path()).unwrap();
        (dir, vault)
    }

    fn new_note(path: &str, content: &str) -> NewNote {
        NewNote {
            name: note_name(path).to_string(),
            path: path.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_open_missing_vault() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FsVault::open(dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_current_note() {
        let (_dir, vault) = vault();
        let note = vault.current_note("daily/Today").unwrap();
        assert_eq!(note.title, "Today");
        assert_eq!(note.path, "daily/Today.md");
    }

    #[test]
    fn test_read_and_write_note() {
        let (dir, vault) = vault();
        fs::write(dir.path().join("Source.md"), "hello").unwrap();
        assert_eq!(vault.read_note("Source.md").unwrap(), "hello");

        vault.write_note("Source.md", "changed").unwrap();
        assert_eq!(vault.read_note("Source").unwrap(), "changed");
    }

    #[test]
    fn test_read_missing_note() {
        let (_dir, vault) = vault();
        assert!(vault.read_note("nope.md").is_err());
    }

    #[test]
    fn test_write_new_note_creates_folder() {
        let (dir, vault) = vault();
        let path = vault.write_new_note(&new_note("zk/Idea.md", "body")).unwrap();
        assert!(path.starts_with(vault.root()));
        assert_eq!(fs::read_to_string(dir.path().join("zk/Idea.md")).unwrap(), "body");
    }

    #[test]
    fn test_write_new_note_refuses_overwrite() {
        let (dir, vault) = vault();
        fs::write(dir.path().join("Idea.md"), "old").unwrap();
        assert!(vault.write_new_note(&new_note("Idea.md", "new")).is_err());
        assert_eq!(fs::read_to_string(dir.path().join("Idea.md")).unwrap(), "old");
    }

    #[test]
    fn test_write_outside_vault_rejected() {
        let (_dir, vault) = vault();
        assert!(vault.write_new_note(&new_note("../escape.md", "x")).is_err());
    }

    #[test]
    fn test_existing_names() {
        let (dir, vault) = vault();
        fs::create_dir(dir.path().join("zk")).unwrap();
        fs::write(dir.path().join("zk/B.md"), "").unwrap();
        fs::write(dir.path().join("zk/A.md"), "").unwrap();
        fs::write(dir.path().join("zk/skip.txt"), "").unwrap();

        assert_eq!(vault.existing_names("zk").unwrap(), vec!["A", "B"]);
        assert!(vault.existing_names("missing").unwrap().is_empty());
    }

    #[test]
    fn test_name_allocator_avoids_existing() {
        let (dir, vault) = vault();
        fs::write(dir.path().join("Idea.md"), "").unwrap();
        let mut names = vault.name_allocator(&Settings::default()).unwrap();
        assert_eq!(names.allocate(&["Idea".to_string()]), vec!["Idea 1"]);
    }

    #[test]
    fn test_split_by_heading_into_vault() {
        use crate::edit::Document;
        use crate::link::LinkStyle;
        use crate::refactor::Refactor;

        let (dir, vault) = vault();
        fs::write(dir.path().join("Book.md"), "# Book\n## One\nfirst\n## Two\nsecond").unwrap();
        fs::write(dir.path().join("Two.md"), "taken").unwrap();

        let settings = Settings::default();
        let current = vault.current_note("Book").unwrap();
        let doc = Document::new(vault.read_note(&current.path).unwrap());
        let names = vault.name_allocator(&settings).unwrap();
        let plan = Refactor::new(settings, LinkStyle::Wiki, names)
            .split_by_heading(&doc, &current, 2);

        for note in &plan.notes {
            vault.write_new_note(note).unwrap();
        }
        vault.write_note(&current.path, &plan.apply(&doc).unwrap().text).unwrap();

        assert_eq!(vault.read_note("One").unwrap(), "## One\nfirst");
        assert_eq!(vault.read_note("Two 1").unwrap(), "## Two\nsecond");
        assert_eq!(vault.read_note("Two").unwrap(), "taken");
        assert_eq!(vault.read_note("Book").unwrap(), "# Book\n[[One]]\n[[Two 1]]");
    }
}
