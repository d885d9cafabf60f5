//! Refactoring settings
//!
//! One immutable value handed to the refactor engine at construction. Field
//! names serialise in camelCase so an existing plugin `data.json` loads
//! unchanged; YAML files are accepted as well.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants as C;
use crate::error::{RefactorError, Result};

/// User settings for note refactoring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Insert links as embeds (`![[...]]`)
    pub transclude_by_default: bool,
    /// Marker for the synthesized note heading
    pub heading_format: String,
    /// Turn the first line into a heading of the new note
    pub include_first_line_as_note_heading: bool,
    /// Leave the first line out of the new note
    pub exclude_first_line_in_note: bool,
    /// Shift headings so the shallowest becomes level 1
    pub normalize_header_levels: bool,
    /// Template for the link left in the original note
    pub note_link_template: String,
    /// Template for the body of the new note
    pub refactored_note_template: String,
    /// Prefix for autogenerated note names (date macros allowed)
    pub file_name_prefix: String,
    /// Folder, relative to the vault, where new notes are created
    pub new_file_folder: String,
    /// Render `[name](path)` links instead of `[[name]]`
    pub use_markdown_links: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            transclude_by_default: false,
            heading_format: C::HEADING_FORMAT.to_string(),
            include_first_line_as_note_heading: false,
            exclude_first_line_in_note: false,
            normalize_header_levels: false,
            note_link_template: String::new(),
            refactored_note_template: String::new(),
            file_name_prefix: C::DEFAULT_FILE_NAME_PREFIX.to_string(),
            new_file_folder: String::new(),
            use_markdown_links: false,
        }
    }
}

impl Settings {
    /// Parse settings from YAML text
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|e| RefactorError::Config(e.to_string()))
    }

    /// Parse settings from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| RefactorError::Config(e.to_string()))
    }

    /// Load settings from a file, JSON when the extension says so, else YAML
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
    }

    /// Load settings from `path`, or from the default location
    ///
    /// A missing default file yields default settings; an explicit path that
    /// does not exist is an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => match default_config_path() {
                Some(p) if p.exists() => Self::load(&p),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Template for the link text, if one is set
    pub fn note_link_template(&self) -> Option<&str> {
        non_empty(&self.note_link_template)
    }

    /// Template for the new note body, if one is set
    pub fn refactored_note_template(&self) -> Option<&str> {
        non_empty(&self.refactored_note_template)
    }
}

/// Config file location: `$NOTE_REFACTOR_CONFIG`, else the user config dir
pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(C::ENV_CONFIG_PATH) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    dirs::config_dir().map(|p| p.join(C::CONFIG_DIR_NAME).join(C::CONFIG_FILE_NAME))
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.heading_format, "#");
        assert!(!settings.include_first_line_as_note_heading);
        assert!(settings.note_link_template().is_none());
        assert!(settings.refactored_note_template().is_none());
    }

    #[test]
    fn test_yaml_partial() {
        let settings = Settings::from_yaml_str(
            "includeFirstLineAsNoteHeading: true\nheadingFormat: '##'\nnoteLinkTemplate: 'see {{new_note_link}}'\n",
        )
        .unwrap();
        assert!(settings.include_first_line_as_note_heading);
        assert_eq!(settings.heading_format, "##");
        assert_eq!(settings.note_link_template(), Some("see {{new_note_link}}"));
        assert!(!settings.normalize_header_levels);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(Settings::from_yaml_str("  \n").unwrap(), Settings::default());
    }

    #[test]
    fn test_plugin_json_with_unknown_keys() {
        let json = r#"{"transcludeByDefault": true, "openNewNote": false, "normalizeHeaderLevels": true}"#;
        let settings = Settings::from_json_str(json).unwrap();
        assert!(settings.transclude_by_default);
        assert!(settings.normalize_header_levels);
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Settings::from_yaml_str("headingFormat: [unclosed").unwrap_err();
        assert!(matches!(err, RefactorError::Config(_)));
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("data.json");
        let mut f = fs::File::create(&json_path).unwrap();
        write!(f, r#"{{"excludeFirstLineInNote": true}}"#).unwrap();
        assert!(Settings::load(&json_path).unwrap().exclude_first_line_in_note);

        let yaml_path = dir.path().join("config.yaml");
        fs::write(&yaml_path, "fileNamePrefix: 'zk-'\n").unwrap();
        assert_eq!(Settings::load(&yaml_path).unwrap().file_name_prefix, "zk-");
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        let err = Settings::load_or_default(Some(&missing)).unwrap_err();
        assert!(matches!(err, RefactorError::Io(_)));
    }
}
