//! Identifier types for the assistant conversation.
//!
//! The assistant backend owns session identifiers. The client never mints
//! one; it only stores whatever the backend hands out and echoes it back,
//! so the wrapper is a validated string rather than a generated ULID.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when an identifier cannot be built from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseIdError {
    /// The identifier was empty or whitespace only.
    Empty,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "session identifier is empty"),
        }
    }
}

impl std::error::Error for ParseIdError {}

/// Backend-assigned token correlating turns into one logical conversation.
///
/// Never empty. Serializes as the bare string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChatSessionId(String);

impl ChatSessionId {
    /// Wraps a backend-issued identifier, rejecting blank values.
    pub fn new(raw: impl Into<String>) -> Result<Self, ParseIdError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ParseIdError::Empty);
        }
        Ok(Self(raw))
    }

    /// Returns the identifier exactly as the backend issued it.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChatSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ChatSessionId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ChatSessionId {
    type Error = ParseIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ChatSessionId> for String {
    fn from(id: ChatSessionId) -> Self {
        id.0
    }
}
