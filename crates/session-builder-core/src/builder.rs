//! Session Builder container
//!
//! Owns the tree model and the workflows built on it. The tree is created
//! once here and handed to the manager, which refreshes it after every
//! mutation; the host subscribes to the same instance.

use std::sync::Arc;
use url::Url;

use session_builder_host::{Host, Message};
use session_builder_session::{Outcome, SessionManager};
use session_builder_storage::SessionStore;
use session_builder_tree::{CommandId, SessionTree, TreeNode};

use crate::config::Config;
use crate::invocation::Invocation;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Session(Outcome),
    FileOpened(String),
    /// The host could not open the file; the user has been warned
    FileNotOpened(String),
}

pub struct SessionBuilder {
    config: Config,
    tree: Arc<SessionTree>,
    manager: SessionManager,
}

impl SessionBuilder {
    pub fn new(config: Config) -> Self {
        let store = SessionStore::new(&config.storage_root);
        let tree = Arc::new(SessionTree::new(store));
        let manager = SessionManager::new(Arc::clone(&tree), config.manager_options());

        tracing::info!(
            sessions_dir = %tree.store().dir().display(),
            "Session builder initialized"
        );

        Self {
            config,
            tree,
            manager,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Tree model to register with the host's sidebar
    pub fn tree(&self) -> &Arc<SessionTree> {
        &self.tree
    }

    pub fn manager(&self) -> &SessionManager {
        &self.manager
    }

    pub fn store(&self) -> &SessionStore {
        self.manager.store()
    }

    /// Run a command. Failures are shown to the user before being returned.
    pub fn execute<H: Host + ?Sized>(
        &self,
        invocation: &Invocation,
        host: &H,
    ) -> Result<CommandOutcome> {
        tracing::debug!(command = %invocation.command, args = ?invocation.arguments, "Executing command");

        let result = match invocation.command {
            CommandId::SaveSession => self.manager.save_session(host),
            CommandId::RestoreSession => self.manager.restore_session(host),
            CommandId::RestoreNamedSession => {
                self.manager.restore_named_session(host, invocation.argument())
            }
            CommandId::DeleteSession => self.manager.delete_session(host, invocation.argument()),
            CommandId::OverwriteSession => {
                self.manager.overwrite_session(host, invocation.argument())
            }
            CommandId::OpenFile => return Ok(open_file(host, invocation.argument())),
        };

        match result {
            Ok(outcome) => Ok(CommandOutcome::Session(outcome)),
            Err(e) => {
                tracing::error!(command = %invocation.command, error = %e, "Command failed");
                host.notify(Message::error(e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Run the command attached to a tree node, if it has one
    pub fn activate<H: Host + ?Sized>(
        &self,
        node: &TreeNode,
        host: &H,
    ) -> Result<Option<CommandOutcome>> {
        match &node.command {
            Some(command) => self.execute(&Invocation::from(command), host).map(Some),
            None => Ok(None),
        }
    }
}

/// Open a `file:` URI or plain path from a tree leaf
fn open_file<H: Host + ?Sized>(host: &H, target: &str) -> CommandOutcome {
    let path = Url::parse(target)
        .ok()
        .filter(|u| u.scheme() == "file")
        .and_then(|u| u.to_file_path().ok())
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| target.to_string());

    match host.open_document(&path) {
        Ok(()) => CommandOutcome::FileOpened(path),
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "Failed to open file");
            host.notify(Message::warning(format!("Failed to open file: {path}")));
            CommandOutcome::FileNotOpened(path)
        }
    }
}
