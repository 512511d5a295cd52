//! Editor document operations

use crate::document::OpenDocument;
use crate::Result;

/// Document side of the host editor
///
/// Calls are synchronous from the caller's point of view; an adapter over an
/// async host blocks until the host answers.
pub trait Editor {
    /// Documents currently known to the editor, in the order they were opened
    fn open_documents(&self) -> Vec<OpenDocument>;

    /// Open the file at `path` in a non-preview editor without taking focus.
    /// Each call fails or succeeds independently.
    fn open_document(&self, path: &str) -> Result<()>;

    fn close_all(&self) -> Result<()>;

    /// Persist every modified document
    fn save_all(&self) -> Result<()>;
}
