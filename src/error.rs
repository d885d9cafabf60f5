use thiserror::Error;

use crate::edit::EditError;

#[derive(Error, Debug)]
pub enum RefactorError {
    #[error("No content selected to extract")]
    NothingSelected,

    #[error("No bullet points found in the selection to split")]
    NoBulletPoints,

    #[error("Invalid line range {start}..{end} (document has {lines} lines)")]
    InvalidLineRange {
        start: usize,
        end: usize,
        lines: usize,
    },

    #[error("Edit error: {0}")]
    Edit(#[from] EditError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RefactorError>;
