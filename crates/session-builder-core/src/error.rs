//! Core error types

use thiserror::Error;

use session_builder_tree::CommandId;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Session error: {0}")]
    Session(#[from] session_builder_session::SessionError),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("{command} takes {expected} argument(s), got {got}")]
    InvalidArguments {
        command: CommandId,
        expected: usize,
        got: usize,
    },
}
