//! Tree data provider over the session store

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use session_builder_storage::{SessionName, SessionStore, StorageError};

use crate::node::{NodeKind, SessionAction, TreeNode};

type Listener = Arc<dyn Fn(u64) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct SessionTree {
    store: SessionStore,
    listeners: RwLock<Vec<(SubscriptionId, Listener)>>,
    next_subscription: AtomicU64,
    /// Bumped on every refresh, for hosts that poll
    generation: AtomicU64,
}

impl SessionTree {
    pub fn new(store: SessionStore) -> Self {
        Self {
            store,
            listeners: RwLock::new(Vec::new()),
            next_subscription: AtomicU64::new(0),
            generation: AtomicU64::new(0),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Top level: save action, then header and sessions once any exist
    pub fn roots(&self) -> Vec<TreeNode> {
        if !self.store.has_sessions_dir() {
            return vec![TreeNode::save_action()];
        }

        let names = match self.store.list() {
            Ok(names) => names,
            Err(e) => {
                tracing::error!(error = %e, "Failed to list sessions");
                return Vec::new();
            }
        };

        let mut nodes = Vec::with_capacity(names.len() + 2);
        nodes.push(TreeNode::save_action());
        nodes.push(TreeNode::header());
        nodes.extend(names.into_iter().map(TreeNode::session));
        nodes
    }

    pub fn children(&self, node: &TreeNode) -> Vec<TreeNode> {
        match &node.kind {
            NodeKind::Session { session } => vec![
                TreeNode::action(session.clone(), SessionAction::Restore),
                TreeNode::action(session.clone(), SessionAction::Overwrite),
                TreeNode::action(session.clone(), SessionAction::Delete),
                TreeNode::files_root(session.clone()),
            ],
            NodeKind::FilesRoot { session } => self.file_nodes(session),
            _ => Vec::new(),
        }
    }

    fn file_nodes(&self, session: &SessionName) -> Vec<TreeNode> {
        match self.store.load(session) {
            Ok(files) => files
                .into_iter()
                .map(|path| TreeNode::file(session.clone(), path))
                .collect(),
            Err(StorageError::NotFound(_)) => Vec::new(),
            Err(e) => {
                tracing::error!(session = %session, error = %e, "Failed to read session file");
                Vec::new()
            }
        }
    }

    /// Register a listener called with the new generation on every refresh
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(u64) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(sub, _)| *sub != id);
        listeners.len() != before
    }

    /// Signal that the store changed and the whole tree must be redrawn
    pub fn refresh(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        // Listeners may subscribe or unsubscribe while being notified
        let listeners: Vec<Listener> = self
            .listeners
            .read()
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();

        tracing::debug!(generation, listeners = listeners.len(), "Session tree refreshed");

        for listener in listeners {
            listener(generation);
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}
