//! Gemini `generateContent` HTTP client

use async_trait::async_trait;
use reqwest::{header, Client};

use super::{
    types::{ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse},
    ClientError, GenerativeClient,
};
use crate::error::{ChatError, Result};

/// HTTP client for the Gemini REST API
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
}

impl GeminiClient {
    /// Create a client authenticating with `api_key`
    ///
    /// No request is made here.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not a valid header value or the HTTP
    /// client cannot be built
    pub fn new(api_key: &str, base_url: impl Into<String>) -> Result<Self> {
        let mut api_key_header = header::HeaderValue::from_str(api_key)
            .map_err(|_| ChatError::Configuration("Invalid API key format".to_string()))?;
        api_key_header.set_sensitive(true);

        let client = Client::builder()
            .default_headers({
                let mut headers = header::HeaderMap::new();
                headers.insert("x-goog-api-key", api_key_header);
                headers
            })
            .build()
            .map_err(|e| ChatError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Endpoint URL for `model`; accepts both `name` and `models/name`
    #[must_use]
    pub fn endpoint(&self, model: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!("{}/models/{model}:generateContent", self.base_url)
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> std::result::Result<GenerateContentResponse, ClientError> {
        let response = self
            .client
            .post(self.endpoint(model))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(match serde_json::from_slice::<ApiErrorEnvelope>(&body) {
                Ok(envelope) => ClientError::Api {
                    code: envelope.error.code,
                    status: envelope.error.status,
                    message: envelope.error.message,
                },
                Err(_) => ClientError::Api {
                    code: status.as_u16(),
                    status: status.canonical_reason().map(str::to_string),
                    message: String::from_utf8_lossy(&body).into_owned(),
                },
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}
