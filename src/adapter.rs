//! Conversation adapter
//!
//! [`ConversationAdapter`] turns a prompt plus caller-owned history into a
//! single `generateContent` call and normalizes whatever comes back into
//! either the generated text or a [`ChatError`].

use async_trait::async_trait;
use tracing::{debug, error};

use crate::{
    config::{AdapterConfig, MAX_OUTPUT_TOKENS, TOP_P, UNCONSTRAINED_THINKING_BUDGET},
    error::{ChatError, Result},
    messages::{Message, Role},
    services::{
        types::{Content, GenerationConfig, ThinkingConfig, Tool},
        ClientError, GeminiClient, GenerateContentRequest, GenerativeClient,
    },
};

/// Provider-neutral chat interface
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Get the provider name (e.g., "gemini")
    fn provider(&self) -> &str;

    /// Get the model name
    fn model(&self) -> &str;

    /// Generate a reply to `prompt` given the earlier turns in `history`
    async fn chat(&self, prompt: &str, history: &[Message]) -> Result<String>;
}

/// Single-call adapter over a [`GenerativeClient`]
#[derive(Debug)]
pub struct ConversationAdapter<C = GeminiClient> {
    config: AdapterConfig,
    tools: Vec<Tool>,
    client: C,
}

impl ConversationAdapter<GeminiClient> {
    /// Create an adapter backed by the Gemini HTTP client
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Configuration`] if the API key is empty or invalid
    pub fn new(config: AdapterConfig) -> Result<Self> {
        validate_api_key(&config.api_key)?;
        let client = GeminiClient::new(&config.api_key, config.base_url.as_str())?;
        Ok(Self::assemble(config, client))
    }
}

impl<C: GenerativeClient> ConversationAdapter<C> {
    /// Create an adapter over an arbitrary client
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Configuration`] if the API key is empty
    pub fn with_client(config: AdapterConfig, client: C) -> Result<Self> {
        validate_api_key(&config.api_key)?;
        Ok(Self::assemble(config, client))
    }

    fn assemble(config: AdapterConfig, client: C) -> Self {
        Self {
            config,
            tools: vec![Tool::google_search()],
            client,
        }
    }

    /// Settings this adapter was built with
    #[must_use]
    pub const fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Underlying transport
    #[must_use]
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// Assemble the request body for one call
    ///
    /// History entries keep their order and role; the prompt is appended
    /// last as a user turn.
    #[must_use]
    pub fn build_request(&self, prompt: &str, history: &[Message]) -> GenerateContentRequest {
        let contents = history
            .iter()
            .map(Content::from)
            .chain(std::iter::once(Content::text(Role::User, prompt)))
            .collect();

        let thinking_config = self.config.reasoning_enabled().then_some(ThinkingConfig {
            thinking_budget: UNCONSTRAINED_THINKING_BUDGET,
        });

        GenerateContentRequest {
            contents,
            system_instruction: self
                .config
                .effective_system_prompt()
                .map(Content::instruction),
            tools: self.tools.clone(),
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: MAX_OUTPUT_TOKENS,
                top_p: TOP_P,
                thinking_config,
            },
        }
    }

    /// Send `prompt` with `history` and return the generated text unchanged
    ///
    /// # Errors
    ///
    /// - [`ChatError::InvalidArgument`] if the prompt is blank (nothing is sent)
    /// - [`ChatError::InvalidResponse`] if the reply carries no text
    /// - [`ChatError::RemoteApi`] if the service reports an error
    /// - [`ChatError::Unexpected`] for transport or decoding failures
    pub async fn chat(&self, prompt: &str, history: &[Message]) -> Result<String> {
        if prompt.trim().is_empty() {
            return Err(ChatError::InvalidArgument(
                "Prompt cannot be empty".to_string(),
            ));
        }

        let request = self.build_request(prompt, history);
        debug!(
            model = %self.config.model_name,
            turns = request.contents.len(),
            system_instruction = request.system_instruction.is_some(),
            "sending generateContent request"
        );

        match self
            .client
            .generate_content(&self.config.model_name, &request)
            .await
        {
            Ok(response) => response.text().ok_or_else(|| {
                let reason = match response.candidates.first() {
                    None => "no candidates returned".to_string(),
                    Some(candidate) => format!(
                        "no text in first candidate (finish reason: {})",
                        candidate.finish_reason.as_deref().unwrap_or("unknown")
                    ),
                };
                error!("Invalid response from API: {reason}");
                ChatError::InvalidResponse(reason)
            }),
            Err(ClientError::Api {
                code,
                status,
                message,
            }) => {
                error!(code, status = ?status, "Gemini API error: {code} - {message}");
                Err(ChatError::RemoteApi {
                    code,
                    status,
                    message,
                })
            }
            Err(other) => {
                error!("Unexpected error in chat: {other}");
                Err(ChatError::Unexpected(other.to_string()))
            }
        }
    }
}

#[async_trait]
impl<C: GenerativeClient> ChatPlatform for ConversationAdapter<C> {
    fn provider(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.config.model_name
    }

    async fn chat(&self, prompt: &str, history: &[Message]) -> Result<String> {
        ConversationAdapter::chat(self, prompt, history).await
    }
}

fn validate_api_key(api_key: &str) -> Result<()> {
    if api_key.trim().is_empty() {
        return Err(ChatError::Configuration("API key is required".to_string()));
    }
    Ok(())
}
