//! Service layer for the remote generative-language API
//!
//! [`GenerativeClient`] is the seam between the conversation adapter and the
//! transport. [`gemini::GeminiClient`] is the HTTP implementation.

pub mod gemini;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;

pub use self::{
    gemini::GeminiClient,
    types::{GenerateContentRequest, GenerateContentResponse},
};

/// Failure reported by a [`GenerativeClient`]
#[derive(Debug, Error)]
pub enum ClientError {
    /// The service answered with a classified error
    #[error("{code} - {message}")]
    Api {
        code: u16,
        status: Option<String>,
        message: String,
    },

    /// The request never produced a response
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body could not be decoded
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Issues `generateContent` calls against a model
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Send one request to `model` and return the decoded response
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> std::result::Result<GenerateContentResponse, ClientError>;
}
