//! Externally invocable command ids
//!
//! - `session-builder.saveSession`
//! - `session-builder.restoreSession`
//! - `session-builder.restoreNamedSession <file>`
//! - `session-builder.deleteSession <file>`
//! - `session-builder.overwriteSession <file>`
//! - `session-builder.openFile <uri>`

use serde::{Deserialize, Serialize};
use std::fmt;

pub const COMMAND_PREFIX: &str = "session-builder.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandId {
    #[serde(rename = "session-builder.saveSession")]
    SaveSession,
    #[serde(rename = "session-builder.restoreSession")]
    RestoreSession,
    #[serde(rename = "session-builder.restoreNamedSession")]
    RestoreNamedSession,
    #[serde(rename = "session-builder.deleteSession")]
    DeleteSession,
    #[serde(rename = "session-builder.overwriteSession")]
    OverwriteSession,
    #[serde(rename = "session-builder.openFile")]
    OpenFile,
}

impl CommandId {
    pub const ALL: [CommandId; 6] = [
        CommandId::SaveSession,
        CommandId::RestoreSession,
        CommandId::RestoreNamedSession,
        CommandId::DeleteSession,
        CommandId::OverwriteSession,
        CommandId::OpenFile,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandId::SaveSession => "session-builder.saveSession",
            CommandId::RestoreSession => "session-builder.restoreSession",
            CommandId::RestoreNamedSession => "session-builder.restoreNamedSession",
            CommandId::DeleteSession => "session-builder.deleteSession",
            CommandId::OverwriteSession => "session-builder.overwriteSession",
            CommandId::OpenFile => "session-builder.openFile",
        }
    }

    /// Number of string arguments the command takes
    pub fn arity(&self) -> usize {
        match self {
            CommandId::SaveSession | CommandId::RestoreSession => 0,
            _ => 1,
        }
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCommandIdError(pub String);

impl fmt::Display for ParseCommandIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown command: {}", self.0)
    }
}

impl std::error::Error for ParseCommandIdError {}

impl std::str::FromStr for CommandId {
    type Err = ParseCommandIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        CommandId::ALL
            .into_iter()
            .find(|c| c.as_str() == id)
            .ok_or_else(|| ParseCommandIdError(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_ids() {
        for id in CommandId::ALL {
            assert!(id.as_str().starts_with(COMMAND_PREFIX));
            assert_eq!(id.as_str().parse::<CommandId>().unwrap(), id);
        }
    }

    #[test]
    fn test_unknown_id() {
        assert!("session-builder.rename".parse::<CommandId>().is_err());
        assert!("saveSession".parse::<CommandId>().is_err());
    }

    #[test]
    fn test_serializes_as_id() {
        let json = serde_json::to_string(&CommandId::DeleteSession).unwrap();
        assert_eq!(json, "\"session-builder.deleteSession\"");

        let back: CommandId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CommandId::DeleteSession);
    }
}
