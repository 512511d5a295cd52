//! Session Builder Core
//!
//! Wires the store, tree model and workflows together and exposes the
//! named commands a host editor registers. The host owns one
//! [`SessionBuilder`] and passes itself in on every command.

mod builder;
mod config;
mod error;
mod invocation;

pub use builder::{CommandOutcome, SessionBuilder};
pub use config::Config;
pub use error::CoreError;
pub use invocation::Invocation;

// Re-export core components
pub use session_builder_host::{
    Editor, Host, HostError, InputRequest, Message, MessageLevel, OpenDocument, PickRequest,
    Prompter,
};
pub use session_builder_session::{
    ManagerOptions, Outcome, RestoreReport, SessionError, SessionManager, SwitchState,
};
pub use session_builder_storage::{Session, SessionName, SessionStore, SessionSummary, StorageError};
pub use session_builder_tree::{
    Collapsible, CommandId, NodeKind, SessionAction, SessionTree, SubscriptionId, TreeCommand,
    TreeNode,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
