//! Message types for conversations
//!
//! A conversation history is an ordered slice of [`Message`], oldest first.
//! Histories are owned by the caller and passed into every call; the adapter
//! never keeps one.

use serde::{Deserialize, Serialize};

/// Message role in the conversation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    #[serde(alias = "assistant")]
    Model,
}

impl Role {
    /// Role name as sent on the wire
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Self::User),
            "model" | "assistant" => Ok(Self::Model),
            _ => Err(format!("Invalid role: {s}")),
        }
    }
}

/// A single message in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Defaults to [`Role::User`] when absent
    #[serde(default)]
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a new user message
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
        }
    }

    /// Create a new model message
    #[must_use]
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            content: text.into(),
        }
    }
}

/// Parse a JSON array of `{role?, content}` objects into a history
///
/// # Errors
///
/// Returns an error if the input is not a valid message array
pub fn parse_history(json: &str) -> crate::Result<Vec<Message>> {
    Ok(serde_json::from_str(json)?)
}
