//! Session Builder Workflows
//!
//! The user-facing side of sessions:
//! - save the open files under a new name
//! - restore a session, optionally saving and closing the current files first
//! - overwrite a session with the open files (full replacement)
//! - delete a session
//!
//! Every mutation refreshes the injected tree model. Restores are best-effort:
//! one unopenable file never stops the others.

mod error;
mod manager;
mod restore;
mod workflow;

pub use error::SessionError;
pub use manager::{ManagerOptions, Outcome, SessionManager};
pub use restore::{restore_files, RestoreReport};
pub use workflow::{SwitchFlow, SwitchState};

pub type Result<T> = std::result::Result<T, SessionError>;
