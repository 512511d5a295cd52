//! Session error types

use thiserror::Error;

use crate::workflow::SwitchState;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Storage error: {0}")]
    Storage(#[from] session_builder_storage::StorageError),

    #[error("Editor error: {0}")]
    Host(#[from] session_builder_host::HostError),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition { from: SwitchState, to: SwitchState },
}
