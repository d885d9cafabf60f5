//! Template placeholders
//!
//! Six named slots recognised inside note and link templates. Each slot has
//! exactly one token and is substituted everywhere it occurs.

use crate::constants as C;

/// One substitution slot in a template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `{{title}}`: title of the note being refactored
    Title,
    /// `{{link}}`: link to the note being refactored
    Link,
    /// `{{new_note_title}}`
    NewNoteTitle,
    /// `{{new_note_link}}`
    NewNoteLink,
    /// `{{new_note_content}}`
    NewNoteContent,
    /// `{{new_note_path}}`
    NewNotePath,
}

impl Placeholder {
    /// All placeholders in substitution order
    pub const ALL: [Placeholder; 6] = [
        Placeholder::Title,
        Placeholder::Link,
        Placeholder::NewNoteTitle,
        Placeholder::NewNoteLink,
        Placeholder::NewNoteContent,
        Placeholder::NewNotePath,
    ];

    /// Literal token text
    pub fn token(self) -> &'static str {
        match self {
            Placeholder::Title => C::PLACEHOLDER_TITLE,
            Placeholder::Link => C::PLACEHOLDER_LINK,
            Placeholder::NewNoteTitle => C::PLACEHOLDER_NEW_NOTE_TITLE,
            Placeholder::NewNoteLink => C::PLACEHOLDER_NEW_NOTE_LINK,
            Placeholder::NewNoteContent => C::PLACEHOLDER_NEW_NOTE_CONTENT,
            Placeholder::NewNotePath => C::PLACEHOLDER_NEW_NOTE_PATH,
        }
    }

    /// Find the placeholder whose token starts `text`
    pub fn match_prefix(text: &str) -> Option<Placeholder> {
        Self::ALL.into_iter().find(|p| text.starts_with(p.token()))
    }
}

/// Run-time values for every placeholder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderValues {
    pub title: String,
    pub link: String,
    pub new_note_title: String,
    pub new_note_link: String,
    pub new_note_content: String,
    pub new_note_path: String,
}

impl PlaceholderValues {
    /// Value substituted for `placeholder`
    pub fn get(&self, placeholder: Placeholder) -> &str {
        match placeholder {
            Placeholder::Title => &self.title,
            Placeholder::Link => &self.link,
            Placeholder::NewNoteTitle => &self.new_note_title,
            Placeholder::NewNoteLink => &self.new_note_link,
            Placeholder::NewNoteContent => &self.new_note_content,
            Placeholder::NewNotePath => &self.new_note_path,
        }
    }
}
