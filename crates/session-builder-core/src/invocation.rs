//! Command invocations
//!
//! A command id plus its string arguments, as a host delivers them when a
//! command is run from a palette, a keybinding or a tree node.

use serde::{Deserialize, Serialize};

use session_builder_tree::{CommandId, TreeCommand};

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub command: CommandId,
    #[serde(default)]
    pub arguments: Vec<String>,
}

impl Invocation {
    pub fn new(command: CommandId) -> Self {
        Self {
            command,
            arguments: Vec::new(),
        }
    }

    pub fn with_argument(mut self, argument: impl Into<String>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    /// Parse a command id and its arguments. Missing arguments are allowed
    /// through so the workflow can tell the user what was wrong; surplus
    /// arguments are rejected.
    pub fn parse(id: &str, arguments: Vec<String>) -> Result<Self> {
        let command: CommandId = id
            .parse()
            .map_err(|_| CoreError::UnknownCommand(id.trim().to_string()))?;

        if arguments.len() > command.arity() {
            return Err(CoreError::InvalidArguments {
                command,
                expected: command.arity(),
                got: arguments.len(),
            });
        }

        Ok(Self { command, arguments })
    }

    /// First argument, or empty when the host sent none
    pub fn argument(&self) -> &str {
        self.arguments.first().map(String::as_str).unwrap_or_default()
    }
}

impl From<&TreeCommand> for Invocation {
    fn from(command: &TreeCommand) -> Self {
        Self {
            command: command.command,
            arguments: command.arguments.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_argument() {
        let invocation = Invocation::parse(
            "session-builder.deleteSession",
            vec!["alpha.json".to_string()],
        )
        .unwrap();
        assert_eq!(invocation.command, CommandId::DeleteSession);
        assert_eq!(invocation.argument(), "alpha.json");
    }

    #[test]
    fn test_missing_argument_passes_through() {
        let invocation = Invocation::parse("session-builder.overwriteSession", Vec::new()).unwrap();
        assert_eq!(invocation.argument(), "");
    }

    #[test]
    fn test_rejects_unknown_and_surplus() {
        assert!(matches!(
            Invocation::parse("session-builder.nope", Vec::new()),
            Err(CoreError::UnknownCommand(id)) if id == "session-builder.nope"
        ));
        assert!(matches!(
            Invocation::parse("session-builder.saveSession", vec!["x".to_string()]),
            Err(CoreError::InvalidArguments {
                expected: 0,
                got: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_deserialize_from_host_payload() {
        let invocation: Invocation = serde_json::from_str(
            r#"{"command": "session-builder.restoreNamedSession", "arguments": ["alpha.json"]}"#,
        )
        .unwrap();
        assert_eq!(
            invocation,
            Invocation::new(CommandId::RestoreNamedSession).with_argument("alpha.json")
        );
    }
}
