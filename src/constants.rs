//! Constants for note-refactor
//!
//! Patterns, default format strings and placeholder tokens shared by the
//! splitters, the template engine and the vault host.

// === Line Patterns ===

/// A list item: optional indentation, `-`, `*` or `+`, then whitespace
pub const BULLET_POINT_PATTERN: &str = r"^\s*[-*+]\s+.*";

/// Characters not allowed in a note file name
pub const FILE_NAME_FORBIDDEN_PATTERN: &str = r#"[#*"/\\<>:|\[\]\?]"#;

// === Headings ===

/// Default marker used for a synthesized note heading
pub const HEADING_FORMAT: &str = "#";

/// Heading marker character
pub const HEADING_CHAR: char = '#';

// === Date Macro ===

/// `{{date}}` or `{{date:FORMAT}}`
pub const DATE_MACRO_PATTERN: &str = r"\{\{date:?(?P<format>[^}]*)\}\}";

/// Format used when a date macro carries no format
pub const DEFAULT_DATE_FORMAT: &str = "YYYYMMDDHHmm";

// === Placeholders ===

/// Title of the note being refactored
pub const PLACEHOLDER_TITLE: &str = "{{title}}";

/// Link to the note being refactored
pub const PLACEHOLDER_LINK: &str = "{{link}}";

/// Name of the newly created note
pub const PLACEHOLDER_NEW_NOTE_TITLE: &str = "{{new_note_title}}";

/// Link to the newly created note
pub const PLACEHOLDER_NEW_NOTE_LINK: &str = "{{new_note_link}}";

/// Content of the newly created note
pub const PLACEHOLDER_NEW_NOTE_CONTENT: &str = "{{new_note_content}}";

/// Vault path of the newly created note
pub const PLACEHOLDER_NEW_NOTE_PATH: &str = "{{new_note_path}}";

// === Note Files ===

/// Default file extension for notes
pub const MARKDOWN_EXTENSION: &str = "md";

/// Name used when a candidate sanitises to nothing
pub const UNTITLED_NOTE_NAME: &str = "Untitled";

/// Default prefix for autogenerated note names
pub const DEFAULT_FILE_NAME_PREFIX: &str = "{{date}}";

/// Prefix marking a link as an embed
pub const TRANSCLUDE_PREFIX: &str = "!";

// === Configuration ===

/// Environment variable overriding the config file location
pub const ENV_CONFIG_PATH: &str = "NOTE_REFACTOR_CONFIG";

/// Directory under the user config dir
pub const CONFIG_DIR_NAME: &str = "note-refactor";

/// Default config file name
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Newline character
pub const NEWLINE: &str = "\n";
