//! Host error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("Failed to open file: {path}: {reason}")]
    OpenFailed { path: String, reason: String },

    #[error("Invalid document path: {0}")]
    InvalidPath(String),

    #[error("Editor action failed: {0}")]
    ActionFailed(String),
}
