//! Validated display name

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

const MAX_PLAYER_NAME_LENGTH: usize = 32;

/// A player's display name (non-empty, <=32 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerName(String);

impl PlayerName {
    /// Create a validated name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the trimmed name is empty or
    /// longer than 32 characters.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Player name cannot be empty"));
        }
        if trimmed.chars().count() > MAX_PLAYER_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Player name cannot exceed {} characters",
                MAX_PLAYER_NAME_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PlayerName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<PlayerName> for String {
    fn from(name: PlayerName) -> String {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_whitespace() {
        let name = PlayerName::new("  Ravenna  ").unwrap();
        assert_eq!(name.as_str(), "Ravenna");
    }

    #[test]
    fn rejects_empty_and_long_names() {
        assert!(PlayerName::new("   ").is_err());
        assert!(PlayerName::new("x".repeat(33)).is_err());
        assert!(PlayerName::new("x".repeat(32)).is_ok());
    }

    #[test]
    fn deserialize_validates() {
        let result: Result<PlayerName, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }
}
