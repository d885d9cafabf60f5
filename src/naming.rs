//! Note naming
//!
//! Candidate names come from a block's first line or from the configured
//! prefix. A `NameAllocator` turns candidates into unique, file-safe names.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::assemble::heading_baseline;
use crate::constants as C;

static FORBIDDEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(C::FILE_NAME_FORBIDDEN_PATTERN).expect("file name pattern compiles")
});

/// Supplies unique destination names
///
/// The result has the same length and order as `candidates`, and no two
/// returned names are equal.
pub trait NameAllocator {
    fn allocate(&mut self, candidates: &[String]) -> Vec<String>;
}

/// Strip characters that are not allowed in note file names
pub fn sanitise_file_name(name: &str) -> String {
    FORBIDDEN.replace_all(name, "").trim().to_string()
}

/// File-safe name for a candidate line, without heading or bullet markers
pub fn candidate_name(line: &str) -> String {
    sanitise_file_name(heading_baseline(line))
}

/// `prefix-1`, `prefix-2`, ... (or `1`, `2`, ... without a prefix)
pub fn numbered_names(prefix: &str, count: usize) -> Vec<String> {
    let separator = if prefix.is_empty() { "" } else { "-" };
    (1..=count)
        .map(|i| sanitise_file_name(&format!("{}{}{}", prefix, separator, i)))
        .collect()
}

/// Allocates names not yet taken, appending ` 1`, ` 2`, ... on collision
#[derive(Debug, Clone, Default)]
pub struct UniqueNames {
    taken: HashSet<String>,
}

impl UniqueNames {
    /// Allocator with no names taken
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocator that avoids the given existing names
    pub fn with_existing<I, S>(existing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            taken: existing.into_iter().map(Into::into).collect(),
        }
    }

    fn claim(&mut self, base: &str) -> String {
        let mut name = base.to_string();
        let mut n = 1;
        while self.taken.contains(&name) {
            name = format!("{} {}", base, n);
            n += 1;
        }
        self.taken.insert(name.clone());
        name
    }
}

impl NameAllocator for UniqueNames {
    fn allocate(&mut self, candidates: &[String]) -> Vec<String> {
        candidates
            .iter()
            .map(|candidate| {
                let base = candidate_name(candidate);
                let base = if base.is_empty() {
                    C::UNTITLED_NOTE_NAME.to_string()
                } else {
                    base
                };
                self.claim(&base)
            })
            .collect()
    }
}
