//! Session names
//!
//! A session name is the stem of its file, so it has to survive being joined
//! onto the sessions directory without escaping it or producing an invalid
//! filename on any platform.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::StorageError;
use crate::store::SESSION_EXTENSION;
use crate::Result;

const FORBIDDEN_CHARS: &[char] = &['/', '\\', '<', '>', ':', '"', '|', '?', '*'];

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionName(String);

impl SessionName {
    pub fn new(name: impl AsRef<str>) -> Result<Self> {
        let name = name.as_ref().trim();

        if name.is_empty() {
            return Err(StorageError::InvalidName(
                "session name cannot be empty".to_string(),
            ));
        }

        if name == "." || name == ".." {
            return Err(StorageError::InvalidName(format!(
                "\"{name}\" is not a valid session name"
            )));
        }

        if let Some(ch) = name
            .chars()
            .find(|c| FORBIDDEN_CHARS.contains(c) || c.is_control())
        {
            return Err(StorageError::InvalidName(format!(
                "\"{name}\" contains forbidden character {ch:?}"
            )));
        }

        Ok(Self(name.to_string()))
    }

    /// Parse the `<name>.json` form used by command arguments and tree nodes
    pub fn from_file_name(file_name: &str) -> Result<Self> {
        let stem = file_name
            .strip_suffix(SESSION_EXTENSION)
            .and_then(|s| s.strip_suffix('.'))
            .ok_or_else(|| {
                StorageError::InvalidName(format!(
                    "\"{file_name}\" is not a .{SESSION_EXTENSION} session file"
                ))
            })?;

        Self::new(stem)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> String {
        format!("{}.{SESSION_EXTENSION}", self.0)
    }
}

impl fmt::Display for SessionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SessionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SessionName {
    type Error = StorageError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<SessionName> for String {
    fn from(name: SessionName) -> Self {
        name.0
    }
}

impl std::str::FromStr for SessionName {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert_eq!(SessionName::new("bugfixing").unwrap().as_str(), "bugfixing");
        assert_eq!(
            SessionName::new("  db-migration ").unwrap().as_str(),
            "db-migration"
        );
        assert_eq!(
            SessionName::new("release 1.2").unwrap().file_name(),
            "release 1.2.json"
        );
    }

    #[test]
    fn test_rejected_names() {
        for bad in ["", "   ", ".", "..", "a/b", "a\\b", "what?", "x\0y", "tab\there"] {
            let err = SessionName::new(bad).unwrap_err();
            assert!(err.is_invalid_input(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_from_file_name() {
        let name = SessionName::from_file_name("alpha.json").unwrap();
        assert_eq!(name.as_str(), "alpha");

        assert!(SessionName::from_file_name("alpha").is_err());
        assert!(SessionName::from_file_name("alphajson").is_err());
        assert!(SessionName::from_file_name(".json").is_err());
        assert!(SessionName::from_file_name("../escape.json").is_err());
    }
}
