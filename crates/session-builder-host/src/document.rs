//! Open document snapshot
//!
//! Only titled, still-open documents backed by the `file:` scheme can be
//! saved into a session; untitled buffers and virtual documents have no path
//! to reopen later.

use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

use crate::error::HostError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenDocument {
    /// Document URI as reported by the host
    pub uri: Url,
    /// Transient buffer that was never saved to disk
    pub is_untitled: bool,
    /// Has unsaved modifications
    pub is_dirty: bool,
    /// Still tracked by the host but no longer shown
    pub is_closed: bool,
}

impl OpenDocument {
    pub fn new(uri: Url) -> Self {
        Self {
            uri,
            is_untitled: false,
            is_dirty: false,
            is_closed: false,
        }
    }

    /// Document backed by an absolute filesystem path
    pub fn file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let uri = Url::from_file_path(path)
            .map_err(|()| HostError::InvalidPath(path.display().to_string()))?;
        Ok(Self::new(uri))
    }

    /// New unsaved buffer, e.g. `untitled:Untitled-1`
    pub fn untitled(label: &str) -> Result<Self> {
        let uri = Url::parse(&format!("untitled:{label}"))
            .map_err(|e| HostError::InvalidPath(format!("{label}: {e}")))?;
        Ok(Self {
            is_untitled: true,
            ..Self::new(uri)
        })
    }

    pub fn dirty(mut self) -> Self {
        self.is_dirty = true;
        self
    }

    pub fn closed(mut self) -> Self {
        self.is_closed = true;
        self
    }

    pub fn is_file_scheme(&self) -> bool {
        self.uri.scheme() == "file"
    }

    /// Filesystem path to record in a session, if this document has one
    pub fn session_path(&self) -> Option<String> {
        if self.is_untitled || self.is_closed || !self.is_file_scheme() {
            return None;
        }

        self.uri
            .to_file_path()
            .ok()
            .map(|p| p.to_string_lossy().into_owned())
    }
}

/// Paths of every document that can be stored in a session, in editor order
pub fn sessionable_paths(documents: &[OpenDocument]) -> Vec<String> {
    documents.iter().filter_map(OpenDocument::session_path).collect()
}

/// Whether switching sessions would discard anything the user has open
pub fn has_open_files(documents: &[OpenDocument]) -> bool {
    documents.iter().any(|d| !d.is_untitled && !d.is_closed)
}

/// Modified documents that a save-all would persist
pub fn dirty_count(documents: &[OpenDocument]) -> usize {
    documents
        .iter()
        .filter(|d| d.is_dirty && !d.is_untitled)
        .count()
}
