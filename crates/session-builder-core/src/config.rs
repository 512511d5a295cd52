//! Session Builder configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use session_builder_session::ManagerOptions;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Host-provided directory; sessions live in its `sessions` subdirectory
    pub storage_root: PathBuf,
    /// Ask before the save command replaces a session of the same name
    #[serde(default = "default_confirm")]
    pub confirm_save_over_existing: bool,
}

fn default_confirm() -> bool {
    true
}

impl Config {
    pub fn new(storage_root: PathBuf) -> Self {
        Self {
            storage_root,
            confirm_save_over_existing: default_confirm(),
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("session-builder"))
            .unwrap_or_else(|| PathBuf::from(".session-builder"))
    }

    pub fn manager_options(&self) -> ManagerOptions {
        ManagerOptions {
            confirm_save_over_existing: self.confirm_save_over_existing,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}
