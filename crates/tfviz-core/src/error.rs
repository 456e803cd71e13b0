//! Error types for extraction runs.

use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort an extraction run.
///
/// Missing sections, dangling references and unparseable files are not
/// errors; they are absorbed by the phases and only show up in the logs.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A recognised top-level section has a shape that cannot be traversed.
    #[error("{file}: `{section}` section must be {expected}, found {found}")]
    InvalidSection {
        file: String,
        section: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("root directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file could not be parsed. The parsing phase logs and skips these.
    #[error("failed to parse {file}: {message}")]
    Parse { file: String, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, ExtractError>;
