//! Refactor engine
//!
//! Ties the splitters, the assembler and the template engine together. Every
//! operation reads a `Document`, asks the naming collaborator for names and
//! the link collaborator for links, and returns a `RefactorPlan`: the notes to
//! create plus the edits that replace the extracted text with links. Nothing
//! is written; the host persists the notes and applies the edits.

use chrono::{DateTime, FixedOffset, Local};
use log::info;

use crate::assemble::{assemble_block, AssembleOptions};
use crate::constants as C;
use crate::date_macro;
use crate::edit::{apply_edits, Document, EditError, EditOp};
use crate::error::{RefactorError, Result};
use crate::link::LinkRenderer;
use crate::naming::{numbered_names, NameAllocator};
use crate::placeholder::PlaceholderValues;
use crate::settings::Settings;
use crate::split::{self, Block};
use crate::template;

/// The note content is being extracted from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentNote {
    /// Note name (file name without extension)
    pub title: String,
    /// Vault-relative path
    pub path: String,
}

/// A note to create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub name: String,
    /// Vault-relative path
    pub path: String,
    pub content: String,
}

/// Notes to create and edits to apply to the source document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefactorPlan {
    pub notes: Vec<NewNote>,
    pub edits: Vec<EditOp>,
}

impl RefactorPlan {
    /// Source document after the plan's edits
    pub fn apply(&self, doc: &Document) -> std::result::Result<Document, EditError> {
        apply_edits(doc, &self.edits)
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty() && self.edits.is_empty()
    }
}

/// Where extracted content comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The current selection, replaced by the link
    Selection,
    /// From the cursor line to the end of the note, replaced by the link
    Remainder,
}

/// How new notes are named
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Naming {
    /// From the first line of the extracted content
    FirstLine,
    /// From the configured file name prefix
    Prefix,
    /// Name supplied by the caller; the first line always stays in the note
    ContentOnly(String),
}

/// How the link is put back into the source document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReplaceMode {
    Split,
    ReplaceSelection,
    ReplaceHeadings,
}

impl From<Scope> for ReplaceMode {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::Selection => ReplaceMode::ReplaceSelection,
            Scope::Remainder => ReplaceMode::Split,
        }
    }
}

/// One block on its way to becoming a note
struct Extraction<'a> {
    name: String,
    block: &'a [String],
    /// Keep the first line even when the settings exclude it
    content_only: bool,
}

impl<'a> Extraction<'a> {
    fn new(name: String, block: &'a [String]) -> Self {
        Self {
            name,
            block,
            content_only: false,
        }
    }
}

/// Refactoring operations over one set of settings and collaborators
pub struct Refactor<L, N> {
    settings: Settings,
    options: AssembleOptions,
    links: L,
    names: N,
    now: Option<DateTime<FixedOffset>>,
}

impl<L: LinkRenderer, N: NameAllocator> Refactor<L, N> {
    pub fn new(settings: Settings, links: L, names: N) -> Self {
        let options = AssembleOptions::from(&settings);
        Self {
            settings,
            options,
            links,
            names,
            now: None,
        }
    }

    /// Pin the time used for date macros
    pub fn at(mut self, now: DateTime<FixedOffset>) -> Self {
        self.now = Some(now);
        self
    }

    fn clock(&self) -> DateTime<FixedOffset> {
        self.now.unwrap_or_else(|| Local::now().fixed_offset())
    }

    // === Operations ===

    /// Extract the selection or the note remainder into one new note
    pub fn extract(
        &mut self,
        doc: &Document,
        current: &CurrentNote,
        scope: Scope,
        naming: Naming,
    ) -> Result<RefactorPlan> {
        let lines = match scope {
            Scope::Selection => split::reduce_selection(doc.selected_text()),
            Scope::Remainder => split::note_remainder(&doc.text, doc.cursor()),
        };
        if lines.is_empty() {
            return Err(RefactorError::NothingSelected);
        }

        let now = self.clock();
        let (candidate, content_only) = match naming {
            Naming::FirstLine => (lines[0].clone(), false),
            Naming::Prefix => (self.prefix(&now), false),
            Naming::ContentOnly(name) => (name, true),
        };
        let name = self.allocate_one(candidate);

        let item = Extraction {
            name,
            block: &lines,
            content_only,
        };
        let mut plan = RefactorPlan::default();
        self.add_note(&mut plan, doc, current, item, ReplaceMode::from(scope), &now);

        info!("event=extract scope={:?} notes={}", scope, plan.notes.len());
        Ok(plan)
    }

    /// Split the note into one new note per heading of `level`
    ///
    /// Each block in the source is replaced by a link to its note. No
    /// matching heading gives an empty plan.
    pub fn split_by_heading(
        &mut self,
        doc: &Document,
        current: &CurrentNote,
        level: usize,
    ) -> RefactorPlan {
        let blocks = split::split_by_heading(&doc.lines(), level);
        let names = self.names.allocate(&first_lines(&blocks));
        let now = self.clock();

        let mut plan = RefactorPlan::default();
        for (name, block) in names.into_iter().zip(&blocks) {
            let item = Extraction::new(name, block);
            self.add_note(&mut plan, doc, current, item, ReplaceMode::ReplaceHeadings, &now);
        }

        info!("event=split_by_heading level={} notes={}", level, plan.notes.len());
        plan
    }

    /// Split the selected list into one new note per top-level item
    ///
    /// With first-line naming every link replaces the selection in turn.
    /// Prefix and content-only naming leave the source untouched.
    pub fn split_bullets(
        &mut self,
        doc: &Document,
        current: &CurrentNote,
        naming: Naming,
    ) -> Result<RefactorPlan> {
        let lines = split::reduce_selection(doc.selected_text());
        if lines.is_empty() {
            return Err(RefactorError::NothingSelected);
        }

        let blocks = split::split_bullets(&lines, split::bullet_pattern());
        if blocks.is_empty() {
            return Err(RefactorError::NoBulletPoints);
        }

        let now = self.clock();
        let mut plan = RefactorPlan::default();

        if naming == Naming::FirstLine {
            let names = self.names.allocate(&first_lines(&blocks));
            for (name, block) in names.into_iter().zip(&blocks) {
                let item = Extraction::new(name, block);
                self.add_note(&mut plan, doc, current, item, ReplaceMode::ReplaceSelection, &now);
            }
        } else {
            let content_only = matches!(naming, Naming::ContentOnly(_));
            let prefix = self.prefix(&now);
            let names = self.names.allocate(&numbered_names(&prefix, blocks.len()));
            for (name, block) in names.into_iter().zip(&blocks) {
                let item = Extraction {
                    name,
                    block,
                    content_only,
                };
                let (note, _) = self.build_note(current, item, &now);
                plan.notes.push(note);
            }
        }

        info!("event=split_bullets naming={:?} notes={}", naming, plan.notes.len());
        Ok(plan)
    }

    // === Building Blocks ===

    fn prefix(&self, now: &DateTime<FixedOffset>) -> String {
        date_macro::expand_at(&self.settings.file_name_prefix, now)
    }

    fn allocate_one(&mut self, candidate: String) -> String {
        self.names
            .allocate(&[candidate])
            .into_iter()
            .next()
            .unwrap_or_else(|| C::UNTITLED_NOTE_NAME.to_string())
    }

    fn note_path(&self, name: &str) -> String {
        let folder = self.settings.new_file_folder.trim_matches('/');
        if folder.is_empty() {
            format!("{}.{}", name, C::MARKDOWN_EXTENSION)
        } else {
            format!("{}/{}.{}", folder, name, C::MARKDOWN_EXTENSION)
        }
    }

    /// Assemble and template one note; also returns the untemplated text
    fn build_note(
        &self,
        current: &CurrentNote,
        item: Extraction<'_>,
        now: &DateTime<FixedOffset>,
    ) -> (NewNote, String) {
        let Extraction {
            name,
            block,
            content_only,
        } = item;
        let original = assemble_block(block, content_only, &self.options);
        let path = self.note_path(&name);
        let values = PlaceholderValues {
            title: current.title.clone(),
            link: self.links.link(&current.path),
            new_note_title: name.clone(),
            new_note_link: self.links.link(&path),
            new_note_path: path.clone(),
            new_note_content: original.clone(),
        };
        let content = template::render_at(
            self.settings.refactored_note_template(),
            &original,
            &values,
            now,
        );
        (NewNote { name, path, content }, original)
    }

    /// Text that replaces the extracted content in the source note
    fn link_text(
        &self,
        current: &CurrentNote,
        note: &NewNote,
        now: &DateTime<FixedOffset>,
    ) -> String {
        let new_link = self.links.link(&note.path);
        let transclude = if self.settings.transclude_by_default {
            C::TRANSCLUDE_PREFIX
        } else {
            ""
        };
        let input = format!("{}{}", transclude, new_link);
        let values = PlaceholderValues {
            title: current.title.clone(),
            link: self.links.link(&current.path),
            new_note_title: note.name.clone(),
            new_note_link: new_link,
            new_note_path: String::new(),
            new_note_content: note.content.clone(),
        };
        template::render_at(self.settings.note_link_template(), &input, &values, now)
    }

    fn add_note(
        &self,
        plan: &mut RefactorPlan,
        doc: &Document,
        current: &CurrentNote,
        item: Extraction<'_>,
        mode: ReplaceMode,
        now: &DateTime<FixedOffset>,
    ) {
        let (note, original) = self.build_note(current, item, now);
        let link = self.link_text(current, &note, now);
        let edit = match mode {
            ReplaceMode::Split => {
                let start = split::line_start(&doc.text, doc.cursor());
                EditOp::replace_range(start..doc.text.len(), link)
            }
            ReplaceMode::ReplaceSelection => EditOp::replace_selection(link),
            ReplaceMode::ReplaceHeadings => EditOp::replace_first(original, link),
        };
        plan.notes.push(note);
        plan.edits.push(edit);
    }
}

fn first_lines(blocks: &[Block]) -> Vec<String> {
    blocks
        .iter()
        .map(|b| b.first().cloned().unwrap_or_default())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::LinkStyle;
    use crate::naming::UniqueNames;
    use chrono::TimeZone;

    fn fixed() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 5, 14, 7, 9)
            .unwrap()
    }

    fn engine(settings: Settings) -> Refactor<LinkStyle, UniqueNames> {
        Refactor::new(settings, LinkStyle::Wiki, UniqueNames::new()).at(fixed())
    }

    fn current() -> CurrentNote {
        CurrentNote {
            title: "Source".to_string(),
            path: "Source.md".to_string(),
        }
    }

    fn select(text: &str, needle: &str) -> Document {
        let start = text.find(needle).unwrap();
        Document::with_selection(text, start..start + needle.len())
    }

    // === Extract ===

    #[test]
    fn test_extract_selection_first_line() {
        let text = "intro\nMy Idea\ndetails here\noutro";
        let doc = select(text, "My Idea\ndetails here");
        let plan = engine(Settings::default())
            .extract(&doc, &current(), Scope::Selection, Naming::FirstLine)
            .unwrap();

        assert_eq!(plan.notes.len(), 1);
        assert_eq!(plan.notes[0].name, "My Idea");
        assert_eq!(plan.notes[0].path, "My Idea.md");
        assert_eq!(plan.notes[0].content, "My Idea\ndetails here");
        assert_eq!(plan.apply(&doc).unwrap().text, "intro\n[[My Idea]]\noutro");
    }

    #[test]
    fn test_extract_empty_selection() {
        let doc = Document::with_selection("text\n   \nmore", 5..8);
        let err = engine(Settings::default())
            .extract(&doc, &current(), Scope::Selection, Naming::FirstLine)
            .unwrap_err();
        assert!(matches!(err, RefactorError::NothingSelected));
    }

    #[test]
    fn test_extract_with_heading_and_transclusion() {
        let settings = Settings {
            include_first_line_as_note_heading: true,
            transclude_by_default: true,
            ..Default::default()
        };
        let doc = select("- Hi there!\nbody", "- Hi there!\nbody");
        let plan = engine(settings)
            .extract(&doc, &current(), Scope::Selection, Naming::FirstLine)
            .unwrap();

        assert_eq!(plan.notes[0].name, "Hi there!");
        assert_eq!(plan.notes[0].content, "# Hi there!\nbody");
        assert_eq!(plan.apply(&doc).unwrap().text, "![[Hi there!]]");
    }

    #[test]
    fn test_extract_prefix_name() {
        let settings = Settings {
            file_name_prefix: "{{date:YYYYMMDD}}-idea".to_string(),
            ..Default::default()
        };
        let doc = select("a\nb", "a\nb");
        let plan = engine(settings)
            .extract(&doc, &current(), Scope::Selection, Naming::Prefix)
            .unwrap();
        assert_eq!(plan.notes[0].name, "20240305-idea");
    }

    #[test]
    fn test_extract_content_only_keeps_first_line() {
        let settings = Settings {
            exclude_first_line_in_note: true,
            ..Default::default()
        };
        let doc = select("Header\nbody", "Header\nbody");
        let plan = engine(settings.clone())
            .extract(&doc, &current(), Scope::Selection, Naming::ContentOnly("Chosen".to_string()))
            .unwrap();
        assert_eq!(plan.notes[0].name, "Chosen");
        assert_eq!(plan.notes[0].content, "Header\nbody");

        let plan = engine(settings)
            .extract(&doc, &current(), Scope::Selection, Naming::FirstLine)
            .unwrap();
        assert_eq!(plan.notes[0].content, "body");
    }

    #[test]
    fn test_split_here() {
        let text = "# Source\nkeep this\nMoved Part\nmoved body\n";
        let doc = Document::with_cursor(text, text.find("Moved").unwrap() + 3);
        let plan = engine(Settings::default())
            .extract(&doc, &current(), Scope::Remainder, Naming::FirstLine)
            .unwrap();

        assert_eq!(plan.notes[0].name, "Moved Part");
        assert_eq!(plan.notes[0].content, "Moved Part\nmoved body");
        assert_eq!(plan.apply(&doc).unwrap().text, "# Source\nkeep this\n[[Moved Part]]");
    }

    #[test]
    fn test_split_here_at_blank_end() {
        let text = "content\n\n";
        let doc = Document::with_cursor(text, text.len());
        let err = engine(Settings::default())
            .extract(&doc, &current(), Scope::Remainder, Naming::FirstLine)
            .unwrap_err();
        assert!(matches!(err, RefactorError::NothingSelected));
    }

    // === Templates ===

    #[test]
    fn test_refactored_note_template() {
        let settings = Settings {
            refactored_note_template: "up: {{link}}\ncreated: {{date:YYYY-MM-DD}}\n\n{{new_note_content}}\n\npath: {{new_note_path}}".to_string(),
            new_file_folder: "/notes/".to_string(),
            ..Default::default()
        };
        let doc = select("Topic\ntext", "Topic\ntext");
        let plan = engine(settings)
            .extract(&doc, &current(), Scope::Selection, Naming::FirstLine)
            .unwrap();

        assert_eq!(plan.notes[0].path, "notes/Topic.md");
        assert_eq!(
            plan.notes[0].content,
            "up: [[Source]]\ncreated: 2024-03-05\n\nTopic\ntext\n\npath: notes/Topic.md"
        );
    }

    #[test]
    fn test_note_link_template() {
        let settings = Settings {
            note_link_template: "See {{new_note_link}} ({{new_note_title}}) from {{title}}{{new_note_path}}".to_string(),
            transclude_by_default: true,
            ..Default::default()
        };
        let doc = select("x\nTopic\ny", "Topic");
        let plan = engine(settings)
            .extract(&doc, &current(), Scope::Selection, Naming::FirstLine)
            .unwrap();
        assert_eq!(
            plan.apply(&doc).unwrap().text,
            "x\nSee [[Topic]] (Topic) from Source\ny"
        );
    }

    #[test]
    fn test_link_template_sees_templated_content() {
        let settings = Settings {
            refactored_note_template: "T: {{new_note_content}}".to_string(),
            note_link_template: "<{{new_note_content}}>".to_string(),
            ..Default::default()
        };
        let doc = select("Topic", "Topic");
        let plan = engine(settings)
            .extract(&doc, &current(), Scope::Selection, Naming::FirstLine)
            .unwrap();
        assert_eq!(plan.apply(&doc).unwrap().text, "<T: Topic>");
    }

    // === Headings ===

    #[test]
    fn test_split_by_heading_replaces_blocks() {
        let text = "# Doc\nintro\n## Alpha\nalpha body\n## Beta\nbeta body";
        let doc = Document::new(text);
        let plan = engine(Settings::default()).split_by_heading(&doc, &current(), 2);

        let names: Vec<_> = plan.notes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta"]);
        assert_eq!(plan.notes[0].content, "## Alpha\nalpha body");
        assert_eq!(
            plan.apply(&doc).unwrap().text,
            "# Doc\nintro\n[[Alpha]]\n[[Beta]]"
        );
    }

    #[test]
    fn test_split_by_heading_duplicate_titles() {
        let doc = Document::new("## Same\none\n## Same\ntwo");
        let plan = engine(Settings::default()).split_by_heading(&doc, &current(), 2);
        assert_eq!(plan.notes[0].name, "Same");
        assert_eq!(plan.notes[1].name, "Same 1");
        assert_eq!(plan.apply(&doc).unwrap().text, "[[Same]]\n[[Same 1]]");
    }

    #[test]
    fn test_split_by_heading_normalized_content() {
        let settings = Settings {
            normalize_header_levels: true,
            ..Default::default()
        };
        let doc = Document::new("## Alpha\n### Deep\ntext");
        let plan = engine(settings).split_by_heading(&doc, &current(), 2);
        assert_eq!(plan.notes[0].content, "# Alpha\n## Deep\ntext");
        // the normalised text no longer matches the source, so it stays put
        assert_eq!(plan.apply(&doc).unwrap().text, doc.text);
    }

    #[test]
    fn test_split_by_heading_nothing_found() {
        let doc = Document::new("no headings");
        assert!(engine(Settings::default())
            .split_by_heading(&doc, &current(), 2)
            .is_empty());
    }

    // === Bullet Points ===

    #[test]
    fn test_split_bullets_first_line() {
        let text = "List:\n- Item 1\n  - Sub 1.1\n- Item 2\nafter";
        let doc = select(text, "- Item 1\n  - Sub 1.1\n- Item 2");
        let plan = engine(Settings::default())
            .split_bullets(&doc, &current(), Naming::FirstLine)
            .unwrap();

        assert_eq!(plan.notes.len(), 2);
        assert_eq!(plan.notes[0].name, "Item 1");
        assert_eq!(plan.notes[0].content, "- Item 1\n  - Sub 1.1");
        assert_eq!(plan.notes[1].name, "Item 2");
        assert_eq!(
            plan.apply(&doc).unwrap().text,
            "List:\n[[Item 1]][[Item 2]]\nafter"
        );
    }

    #[test]
    fn test_split_bullets_prefix_leaves_source() {
        let settings = Settings {
            file_name_prefix: "zk".to_string(),
            include_first_line_as_note_heading: true,
            ..Default::default()
        };
        let doc = select("- A\n- B", "- A\n- B");
        let plan = engine(settings)
            .split_bullets(&doc, &current(), Naming::Prefix)
            .unwrap();

        let names: Vec<_> = plan.notes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["zk-1", "zk-2"]);
        assert_eq!(plan.notes[1].content, "# B");
        assert!(plan.edits.is_empty());
        assert_eq!(plan.apply(&doc).unwrap(), doc);
    }

    #[test]
    fn test_split_bullets_content_only() {
        let settings = Settings {
            file_name_prefix: String::new(),
            exclude_first_line_in_note: true,
            ..Default::default()
        };
        let doc = select("- A\n  more", "- A\n  more");
        let plan = engine(settings)
            .split_bullets(&doc, &current(), Naming::ContentOnly(String::new()))
            .unwrap();
        assert_eq!(plan.notes[0].name, "1");
        assert_eq!(plan.notes[0].content, "- A\n  more");
    }

    #[test]
    fn test_split_bullets_errors() {
        let mut refactor = engine(Settings::default());
        let empty = Document::new("- A");
        assert!(matches!(
            refactor.split_bullets(&empty, &current(), Naming::FirstLine),
            Err(RefactorError::NothingSelected)
        ));

        let no_bullets = select("Line 1\nLine 2", "Line 1\nLine 2");
        assert!(matches!(
            refactor.split_bullets(&no_bullets, &current(), Naming::FirstLine),
            Err(RefactorError::NoBulletPoints)
        ));
    }
}
