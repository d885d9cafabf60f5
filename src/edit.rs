//! Document edits
//!
//! The refactor engine never changes the source note itself. It returns a
//! list of `EditOp`s which a host applies to a `Document` (text plus the
//! current selection), the same operations an editor offers: replace the
//! selection, replace a byte range, replace the first occurrence of a string.

use std::fmt;
use std::ops::Range;

use log::debug;

/// Validation error for edit operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// Range is reversed or past the end of the text
    InvalidRange { start: usize, end: usize, len: usize },
    /// Offset falls inside a multi-byte character
    NotCharBoundary { offset: usize },
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::InvalidRange { start, end, len } => {
                write!(f, "Invalid range {}..{} (text length: {})", start, end, len)
            }
            EditError::NotCharBoundary { offset } => {
                write!(f, "Offset {} is not on a character boundary", offset)
            }
        }
    }
}

impl std::error::Error for EditError {}

/// Text of a note being edited, with the current selection as byte offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub text: String,
    pub selection: Range<usize>,
}

impl Document {
    /// Document with the cursor at the start
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            selection: 0..0,
        }
    }

    /// Document with a selection
    pub fn with_selection(text: impl Into<String>, selection: Range<usize>) -> Self {
        Self {
            text: text.into(),
            selection,
        }
    }

    /// Document with a collapsed selection at `offset`
    pub fn with_cursor(text: impl Into<String>, offset: usize) -> Self {
        Self::with_selection(text, offset..offset)
    }

    /// Selected text, empty when the selection is not valid for the text
    pub fn selected_text(&self) -> &str {
        self.text.get(self.selection.clone()).unwrap_or("")
    }

    /// Cursor position (the head of the selection)
    pub fn cursor(&self) -> usize {
        self.selection.end
    }

    /// Lines of the whole document
    pub fn lines(&self) -> Vec<&str> {
        self.text.split('\n').collect()
    }
}

/// Byte range covering lines `first..=last` (1-based), without the final newline
pub fn line_range(text: &str, first: usize, last: usize) -> Option<Range<usize>> {
    if first == 0 || last < first {
        return None;
    }

    let mut start = None;
    let mut offset = 0;
    for (i, line) in text.split('\n').enumerate() {
        let number = i + 1;
        if number == first {
            start = Some(offset);
        }
        if number == last {
            return start.map(|s| s..offset + line.len());
        }
        offset += line.len() + 1;
    }
    None
}

/// Edit operation type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    /// Replace the current selection; the cursor ends after the new text
    ReplaceSelection { text: String },
    /// Replace a byte range
    ReplaceRange { start: usize, end: usize, text: String },
    /// Replace the first occurrence of `old` (no-op when absent)
    ReplaceFirst { old: String, new: String },
}

impl EditOp {
    /// Create a replace-selection operation
    pub fn replace_selection(text: impl Into<String>) -> Self {
        EditOp::ReplaceSelection { text: text.into() }
    }

    /// Create a replace-range operation
    pub fn replace_range(range: Range<usize>, text: impl Into<String>) -> Self {
        EditOp::ReplaceRange {
            start: range.start,
            end: range.end,
            text: text.into(),
        }
    }

    /// Create a replace-first operation
    pub fn replace_first(old: impl Into<String>, new: impl Into<String>) -> Self {
        EditOp::ReplaceFirst {
            old: old.into(),
            new: new.into(),
        }
    }
}

/// Apply a list of edit operations to a document
///
/// Operations are applied in order. If any operation fails, the error is
/// returned and the input document is left as it was.
pub fn apply_edits(doc: &Document, edits: &[EditOp]) -> Result<Document, EditError> {
    let mut result = doc.clone();

    for edit in edits {
        apply_single_edit(&mut result, edit)?;
    }

    Ok(result)
}

/// Apply a single edit operation
fn apply_single_edit(doc: &mut Document, edit: &EditOp) -> Result<(), EditError> {
    match edit {
        EditOp::ReplaceSelection { text } => {
            let range = doc.selection.clone();
            replace(doc, range, text)
        }
        EditOp::ReplaceRange { start, end, text } => replace(doc, *start..*end, text),
        EditOp::ReplaceFirst { old, new } => match doc.text.find(old.as_str()) {
            Some(start) => replace(doc, start..start + old.len(), new),
            None => {
                debug!("event=replace_first status=not_found len={}", old.len());
                Ok(())
            }
        },
    }
}

fn replace(doc: &mut Document, range: Range<usize>, text: &str) -> Result<(), EditError> {
    validate(&doc.text, &range)?;
    doc.text.replace_range(range.clone(), text);
    let cursor = range.start + text.len();
    doc.selection = cursor..cursor;
    Ok(())
}

fn validate(text: &str, range: &Range<usize>) -> Result<(), EditError> {
    if range.start > range.end || range.end > text.len() {
        return Err(EditError::InvalidRange {
            start: range.start,
            end: range.end,
            len: text.len(),
        });
    }
    for offset in [range.start, range.end] {
        if !text.is_char_boundary(offset) {
            return Err(EditError::NotCharBoundary { offset });
        }
    }
    Ok(())
}
