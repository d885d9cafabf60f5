//! Link rendering
//!
//! The refactor engine treats links as opaque strings; a `LinkRenderer`
//! turns a vault path into the text inserted for it.

use std::path::Path;

use crate::settings::Settings;

/// Renders a ready-to-insert link for a note path
pub trait LinkRenderer {
    fn link(&self, path: &str) -> String;
}

/// Built-in link styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkStyle {
    /// `[[name]]`
    #[default]
    Wiki,
    /// `[name](path%20with%20spaces.md)`
    Markdown,
}

impl LinkStyle {
    /// Link style selected by the settings
    pub fn from_settings(settings: &Settings) -> Self {
        if settings.use_markdown_links {
            LinkStyle::Markdown
        } else {
            LinkStyle::Wiki
        }
    }
}

impl LinkRenderer for LinkStyle {
    fn link(&self, path: &str) -> String {
        let name = note_name(path);
        match self {
            LinkStyle::Wiki => format!("[[{}]]", name),
            LinkStyle::Markdown => format!("[{}]({})", name, encode_path(path)),
        }
    }
}

/// Note name of a vault path: the file name without its extension
pub fn note_name(path: &str) -> &str {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
}

/// Percent-encode the characters that break a Markdown link destination
fn encode_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        match c {
            ' ' => out.push_str("%20"),
            '(' => out.push_str("%28"),
            ')' => out.push_str("%29"),
            '<' => out.push_str("%3C"),
            '>' => out.push_str("%3E"),
            _ => out.push(c),
        }
    }
    out
}
