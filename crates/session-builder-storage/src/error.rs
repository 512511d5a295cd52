//! Storage error types

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Invalid session name: {0}")]
    InvalidName(String),

    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Session \"{name}\" is not a JSON array of paths: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors caused by bad caller input rather than disk state
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, StorageError::InvalidName(_))
    }
}
