//! Tree node data
//!
//! Plain tagged data. The host adapter decides how each kind is drawn.

use serde::Serialize;
use std::path::Path;
use url::Url;

use session_builder_storage::SessionName;

use crate::command::CommandId;

pub const SAVE_LABEL: &str = "💾 Save New Session";
pub const HEADER_LABEL: &str = "───── Sessions ─────";
pub const FILES_LABEL: &str = "📄 View Files";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionAction {
    Restore,
    Overwrite,
    Delete,
}

impl SessionAction {
    pub fn label(&self) -> &'static str {
        match self {
            SessionAction::Restore => "📂 Restore Session",
            SessionAction::Overwrite => "📝 Overwrite Session",
            SessionAction::Delete => "❌ Delete Session",
        }
    }

    pub fn command_id(&self) -> CommandId {
        match self {
            SessionAction::Restore => CommandId::RestoreNamedSession,
            SessionAction::Overwrite => CommandId::OverwriteSession,
            SessionAction::Delete => CommandId::DeleteSession,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NodeKind {
    SaveAction,
    Header,
    Session {
        session: SessionName,
    },
    Action {
        session: SessionName,
        action: SessionAction,
    },
    FilesRoot {
        session: SessionName,
    },
    File {
        session: SessionName,
        path: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Collapsible {
    None,
    Collapsed,
    Expanded,
}

/// Command run when a node is clicked
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeCommand {
    pub command: CommandId,
    pub title: String,
    pub arguments: Vec<String>,
}

impl TreeCommand {
    pub fn new(command: CommandId, title: impl Into<String>) -> Self {
        Self {
            command,
            title: title.into(),
            arguments: Vec::new(),
        }
    }

    pub fn with_argument(mut self, argument: impl Into<String>) -> Self {
        self.arguments.push(argument.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    #[serde(flatten)]
    pub kind: NodeKind,
    pub label: String,
    pub collapsible: Collapsible,
    pub tooltip: Option<String>,
    pub description: Option<String>,
    pub command: Option<TreeCommand>,
}

impl TreeNode {
    fn new(kind: NodeKind, label: impl Into<String>, collapsible: Collapsible) -> Self {
        Self {
            kind,
            label: label.into(),
            collapsible,
            tooltip: None,
            description: None,
            command: None,
        }
    }

    pub fn save_action() -> Self {
        let mut node = Self::new(NodeKind::SaveAction, SAVE_LABEL, Collapsible::None);
        node.command = Some(TreeCommand::new(CommandId::SaveSession, "Save Session"));
        node
    }

    pub fn header() -> Self {
        Self::new(NodeKind::Header, HEADER_LABEL, Collapsible::None)
    }

    pub fn session(name: SessionName) -> Self {
        let tooltip = format!("Click to expand options for \"{name}\"");
        let label = name.to_string();
        let mut node = Self::new(
            NodeKind::Session { session: name },
            label,
            Collapsible::Collapsed,
        );
        node.tooltip = Some(tooltip);
        node
    }

    pub fn action(session: SessionName, action: SessionAction) -> Self {
        let command = TreeCommand::new(action.command_id(), "").with_argument(session.file_name());
        let mut node = Self::new(
            NodeKind::Action { session, action },
            action.label(),
            Collapsible::None,
        );
        node.command = Some(command);
        node
    }

    pub fn files_root(session: SessionName) -> Self {
        Self::new(
            NodeKind::FilesRoot { session },
            FILES_LABEL,
            Collapsible::Collapsed,
        )
    }

    /// Leaf for one stored path; clicking opens that literal path
    pub fn file(session: SessionName, path: String) -> Self {
        let label = Path::new(&path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.clone());

        // Relative or otherwise odd paths still get a command; the host
        // reports the failure when it tries to open them.
        let target = Url::from_file_path(&path)
            .map(String::from)
            .unwrap_or_else(|()| path.clone());

        let mut node = Self::new(
            NodeKind::File {
                session,
                path: path.clone(),
            },
            label,
            Collapsible::None,
        );
        node.tooltip = Some(path.clone());
        node.description = Some(path);
        node.command = Some(TreeCommand::new(CommandId::OpenFile, "Open File").with_argument(target));
        node
    }

    pub fn session_name(&self) -> Option<&SessionName> {
        match &self.kind {
            NodeKind::SaveAction | NodeKind::Header => None,
            NodeKind::Session { session }
            | NodeKind::Action { session, .. }
            | NodeKind::FilesRoot { session }
            | NodeKind::File { session, .. } => Some(session),
        }
    }

    pub fn is_expandable(&self) -> bool {
        self.collapsible != Collapsible::None
    }
}
