//! Path helpers for the vault host

use std::io;
use std::path::{Path, PathBuf};

/// Resolve a vault-relative note path, refusing anything outside `base`
///
/// Parent (`..`) components and absolute paths are rejected outright. When
/// the target already exists it is canonicalised (with `dunce`, so Windows
/// paths keep their drive form) and checked against the canonical base to
/// catch symlinks that leave the vault.
pub fn secure_path(base: &Path, relative: &str) -> io::Result<PathBuf> {
    let mut result = base.to_path_buf();

    for component in relative.split(['/', '\\']) {
        match component {
            "" | "." => continue,
            ".." => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "Path traversal detected: cannot escape vault directory",
                ));
            }
            _ => {
                if component.len() >= 2 && component.as_bytes()[1] == b':' {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        "Absolute paths are not allowed",
                    ));
                }
                result.push(component);
            }
        }
    }

    if relative.starts_with(['/', '\\']) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "Absolute paths are not allowed",
        ));
    }

    if base.exists() && result.exists() {
        let canonical_base = dunce::canonicalize(base)?;
        let canonical_result = dunce::canonicalize(&result)?;
        if !canonical_result.starts_with(&canonical_base) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "Path traversal detected: resolved path escapes vault directory",
            ));
        }
    }

    Ok(result)
}

/// Display a path with forward slashes
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
