//! Session Builder Storage Layer
//!
//! Sessions are stored one per file under `<storage root>/sessions/<name>.json`.
//! Each file holds a plain JSON array of absolute file paths, in the order the
//! documents were open. There is no schema version field.

mod error;
mod name;
mod store;

pub use error::StorageError;
pub use name::SessionName;
pub use store::{Session, SessionStore, SessionSummary, SESSIONS_DIR, SESSION_EXTENSION};

pub type Result<T> = std::result::Result<T, StorageError>;
