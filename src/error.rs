//! Error types for gemini-chat

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`ChatError`]
pub type Result<T> = std::result::Result<T, ChatError>;

/// Main error type for gemini-chat
#[derive(Debug, Error)]
pub enum ChatError {
    /// Missing or invalid construction input
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Settings file could not be read or parsed
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Caller supplied an unusable argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The remote call returned no usable text
    #[error("Invalid response from API: {0}")]
    InvalidResponse(String),

    /// The remote service reported a classified failure
    #[error("API call failed: {message}")]
    RemoteApi {
        code: u16,
        status: Option<String>,
        message: String,
    },

    /// Any other failure while generating
    #[error("Chat generation failed: {0}")]
    Unexpected(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChatError {
    /// Remote error code, if this error came from the API
    #[must_use]
    pub const fn code(&self) -> Option<u16> {
        match self {
            Self::RemoteApi { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_api_display_wraps_message() {
        let err = ChatError::RemoteApi {
            code: 429,
            status: Some("RESOURCE_EXHAUSTED".into()),
            message: "Quota exceeded".into(),
        };
        assert_eq!(err.to_string(), "API call failed: Quota exceeded");
        assert_eq!(err.code(), Some(429));
    }

    #[test]
    fn test_unexpected_display() {
        let err = ChatError::Unexpected("connection reset".into());
        assert_eq!(err.to_string(), "Chat generation failed: connection reset");
        assert_eq!(err.code(), None);
    }
}
