use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::refactor::Naming;

/// note-refactor - Split and extract Markdown notes into new notes
///
/// # Quick Reference
///
/// ## Extract
///
/// ```bash
/// note-refactor extract Ideas.md --from 4 --to 9             # First line names the note
/// note-refactor extract Ideas.md --from 4 --to 9 --name-from prefix
/// note-refactor extract Ideas.md --from 4 --to 9 --name-from content-only --name "Later"
/// note-refactor split-here Ideas.md --line 12                # Everything from line 12 on
/// ```
///
/// ## Split
///
/// ```bash
/// note-refactor split-heading Book.md --level 2              # One note per "## " section
/// note-refactor split-bullets List.md --from 3 --to 20       # One note per top-level item
/// note-refactor split-bullets List.md --from 3 --to 20 --name-from prefix
/// ```
///
/// ## Templates
///
/// ```bash
/// note-refactor render "up: {{link}} on {{date:YYYY-MM-DD}}" --link "[[Index]]"
/// ```
///
/// ## Global Options
///
/// ```bash
/// note-refactor --vault ~/notes ...      # Vault root (default: current directory)
/// note-refactor --config my.yaml ...     # Settings file (YAML, or JSON by extension)
/// note-refactor --dry-run ...            # Print the plan, write nothing
/// note-refactor -vv ...                  # Debug logging on stderr
/// ```
///
/// ## Environment Variables
///
/// - `NOTE_REFACTOR_CONFIG`: Settings file (default: <config dir>/note-refactor/config.yaml)
/// - `RUST_LOG`: Log filter, overrides `-v`
///
/// Line numbers are 1-based and inclusive.
#[derive(Parser, Debug)]
#[command(name = "note-refactor")]
#[command(version)]
#[command(about = "Split and extract Markdown notes into new notes")]
pub struct Cli {
    /// Vault root directory
    #[arg(long, global = true, value_name = "PATH", default_value = ".")]
    pub vault: PathBuf,

    /// Settings file (default: $NOTE_REFACTOR_CONFIG or the user config dir)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the notes and the edited source instead of writing them
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// More log output (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract a range of lines into a new note, leaving a link behind
    #[command(alias = "x")]
    Extract {
        /// Source note, relative to the vault
        note: String,

        /// First line of the selection
        #[arg(long)]
        from: usize,

        /// Last line of the selection
        #[arg(long)]
        to: usize,

        /// How the new note is named
        #[arg(long, value_enum, default_value_t = NameFrom::FirstLine)]
        name_from: NameFrom,

        /// Note name (required with --name-from content-only)
        #[arg(long, required_if_eq("name_from", "content-only"))]
        name: Option<String>,
    },

    /// Move everything from a line to the end of the note into a new note
    SplitHere {
        /// Source note, relative to the vault
        note: String,

        /// Line the new note starts at
        #[arg(long)]
        line: usize,

        /// How the new note is named
        #[arg(long, value_enum, default_value_t = NameFrom::FirstLine)]
        name_from: NameFrom,

        /// Note name (required with --name-from content-only)
        #[arg(long, required_if_eq("name_from", "content-only"))]
        name: Option<String>,
    },

    /// Split a note into one new note per heading of a level
    SplitHeading {
        /// Source note, relative to the vault
        note: String,

        /// Heading level (1 = "# ")
        #[arg(short, long, default_value = "1")]
        level: usize,
    },

    /// Split a range of list lines into one new note per top-level item
    SplitBullets {
        /// Source note, relative to the vault
        note: String,

        /// First line of the list
        #[arg(long)]
        from: usize,

        /// Last line of the list
        #[arg(long)]
        to: usize,

        /// How the new notes are named
        #[arg(long, value_enum, default_value_t = NameFrom::FirstLine)]
        name_from: NameFrom,
    },

    /// Render a template (date macros and placeholders) to stdout
    Render {
        /// Template text
        template: String,

        /// Text printed when the template is empty
        #[arg(long, default_value = "")]
        input: String,

        /// Value for {{title}}
        #[arg(long, default_value = "")]
        title: String,

        /// Value for {{link}}
        #[arg(long, default_value = "")]
        link: String,

        /// Value for {{new_note_title}}
        #[arg(long, default_value = "")]
        new_note_title: String,

        /// Value for {{new_note_link}}
        #[arg(long, default_value = "")]
        new_note_link: String,

        /// Value for {{new_note_content}}
        #[arg(long, default_value = "")]
        new_note_content: String,

        /// Value for {{new_note_path}}
        #[arg(long, default_value = "")]
        new_note_path: String,
    },
}

/// Where new note names come from
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameFrom {
    /// First line of the extracted content
    FirstLine,
    /// The configured file name prefix
    Prefix,
    /// A given name; the first line always stays in the note
    ContentOnly,
}

impl NameFrom {
    pub fn naming(self, name: Option<String>) -> Naming {
        match self {
            NameFrom::FirstLine => Naming::FirstLine,
            NameFrom::Prefix => Naming::Prefix,
            NameFrom::ContentOnly => Naming::ContentOnly(name.unwrap_or_default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extract() {
        let cli = Cli::try_parse_from([
            "note-refactor", "--vault", "/tmp/v", "extract", "A.md", "--from", "2", "--to", "4",
        ])
        .unwrap();
        assert_eq!(cli.vault, PathBuf::from("/tmp/v"));
        match cli.command {
            Command::Extract { note, from, to, name_from, name } => {
                assert_eq!(note, "A.md");
                assert_eq!((from, to), (2, 4));
                assert_eq!(name_from, NameFrom::FirstLine);
                assert_eq!(name, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_content_only_requires_name() {
        let missing = Cli::try_parse_from([
            "note-refactor", "extract", "A.md", "--from", "1", "--to", "1",
            "--name-from", "content-only",
        ]);
        assert!(missing.is_err());

        let given = Cli::try_parse_from([
            "note-refactor", "extract", "A.md", "--from", "1", "--to", "1",
            "--name-from", "content-only", "--name", "Kept",
        ]);
        assert!(given.is_ok());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "note-refactor", "split-heading", "B.md", "-l", "2", "-n", "-vv",
        ])
        .unwrap();
        assert!(cli.dry_run);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::SplitHeading { level: 2, .. }));
    }

    #[test]
    fn test_name_from_to_naming() {
        assert_eq!(NameFrom::FirstLine.naming(None), Naming::FirstLine);
        assert_eq!(NameFrom::Prefix.naming(Some("x".into())), Naming::Prefix);
        assert_eq!(
            NameFrom::ContentOnly.naming(Some("x".into())),
            Naming::ContentOnly("x".to_string())
        );
    }
}
