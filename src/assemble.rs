//! Block assembly
//!
//! Turns a header line plus body lines into the text of a stand-alone note:
//! optional synthesized heading, optional header exclusion, optional heading
//! renormalisation, then a whole-string trim.

use log::debug;

use crate::constants as C;
use crate::heading::normalize_heading_levels;
use crate::settings::Settings;

/// Options controlling how a block becomes note text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembleOptions {
    /// Replace the header with `heading_format` + the header's text
    pub include_first_line_as_heading: bool,
    /// Marker used for the synthesized heading
    pub heading_format: String,
    /// Drop the header (ignored in content-only mode)
    pub exclude_first_line: bool,
    /// Renormalise heading levels after assembly
    pub normalize_header_levels: bool,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            include_first_line_as_heading: false,
            heading_format: C::HEADING_FORMAT.to_string(),
            exclude_first_line: false,
            normalize_header_levels: false,
        }
    }
}

impl From<&Settings> for AssembleOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            include_first_line_as_heading: settings.include_first_line_as_note_heading,
            heading_format: settings.heading_format.clone(),
            exclude_first_line: settings.exclude_first_line_in_note,
            normalize_header_levels: settings.normalize_header_levels,
        }
    }
}

/// Text of a line without its leading heading/bullet markers and whitespace
pub fn heading_baseline(line: &str) -> &str {
    line.trim_start_matches(|c: char| c == C::HEADING_CHAR || c == '-' || c.is_whitespace())
}

/// Assemble a header line and body lines into note text
pub fn assemble(
    header: &str,
    body: &[String],
    content_only: bool,
    options: &AssembleOptions,
) -> String {
    let mut lines = Vec::with_capacity(body.len() + 1);

    if options.include_first_line_as_heading {
        let heading = format!("{} {}", options.heading_format, heading_baseline(header));
        lines.push(heading.trim().to_string());
    } else if !options.exclude_first_line || content_only {
        lines.push(header.to_string());
    } else {
        debug!("event=assemble_drop_header content_only={}", content_only);
    }
    lines.extend(body.iter().cloned());

    if options.normalize_header_levels {
        lines = normalize_heading_levels(lines);
    }

    lines.join(C::NEWLINE).trim().to_string()
}

/// Assemble a whole block, its first line being the header
pub fn assemble_block(block: &[String], content_only: bool, options: &AssembleOptions) -> String {
    match block.split_first() {
        Some((header, body)) => assemble(header, body, content_only, options),
        None => assemble("", &[], content_only, options),
    }
}
