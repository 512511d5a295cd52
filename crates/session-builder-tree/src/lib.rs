//! Session Builder Tree Model
//!
//! Read-only projection of the session store for a sidebar:
//! - save action, header, one node per session at the root
//! - restore / overwrite / delete / view-files under a session
//! - one clickable leaf per stored path under view-files
//!
//! Nothing is cached. Every expansion re-reads the store, and `refresh`
//! tells subscribers to redraw after a mutation.

mod command;
mod node;
mod provider;

pub use command::{CommandId, ParseCommandIdError, COMMAND_PREFIX};
pub use node::{Collapsible, NodeKind, SessionAction, TreeCommand, TreeNode};
pub use provider::{SessionTree, SubscriptionId};
