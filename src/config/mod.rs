//! Configuration for the conversation adapter
//!
//! [`AdapterConfig`] is the immutable set of values an adapter is built from.
//! [`settings`] implements the layered loading that produces one:
//! 1. Global settings (`{config_dir}/gemini-chat/config.json`)
//! 2. Project settings (`./.gemini-chat.json`)
//! 3. Environment variables
//! 4. CLI parameters (highest priority)

pub mod settings;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use self::settings::Settings;

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-001";

/// Public Gemini REST endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Fixed output ceiling sent with every request
pub const MAX_OUTPUT_TOKENS: u32 = 8192;

/// Fixed nucleus sampling value sent with every request
pub const TOP_P: f32 = 0.95;

/// Thinking budget meaning "let the model decide"
pub const UNCONSTRAINED_THINKING_BUDGET: i32 = -1;

/// When to ask the model for extended reasoning
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReasoningMode {
    /// Only when a system prompt is configured
    #[default]
    WithSystemPrompt,
    Always,
    Never,
}

impl std::fmt::Display for ReasoningMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WithSystemPrompt => write!(f, "with-system-prompt"),
            Self::Always => write!(f, "always"),
            Self::Never => write!(f, "never"),
        }
    }
}

impl std::str::FromStr for ReasoningMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "with-system-prompt" | "auto" => Ok(Self::WithSystemPrompt),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            _ => Err(format!("Invalid reasoning mode: {s}")),
        }
    }
}

/// Hide all but the last four characters of an API key
#[must_use]
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let hidden = chars.len() - 4;
    let tail: String = chars[hidden..].iter().collect();
    format!("{}{tail}", "*".repeat(hidden))
}

/// Settings an adapter is constructed from
#[derive(Clone, PartialEq)]
pub struct AdapterConfig {
    pub api_key: String,
    pub model_name: String,
    pub system_prompt: Option<String>,
    pub temperature: f32,
    pub reasoning: ReasoningMode,
    pub base_url: String,
}

impl std::fmt::Debug for AdapterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterConfig")
            .field("api_key", &mask_api_key(&self.api_key))
            .field("model_name", &self.model_name)
            .field("system_prompt", &self.system_prompt)
            .field("temperature", &self.temperature)
            .field("reasoning", &self.reasoning)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl AdapterConfig {
    /// Create a config with default model, temperature and endpoint
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model_name: DEFAULT_MODEL.to_string(),
            system_prompt: None,
            temperature: DEFAULT_TEMPERATURE,
            reasoning: ReasoningMode::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    #[must_use]
    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    #[must_use]
    pub fn with_model(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    #[must_use]
    pub fn with_reasoning(mut self, reasoning: ReasoningMode) -> Self {
        self.reasoning = reasoning;
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// System prompt, if one is set and not blank
    #[must_use]
    pub fn effective_system_prompt(&self) -> Option<&str> {
        self.system_prompt
            .as_deref()
            .filter(|prompt| !prompt.trim().is_empty())
    }

    /// Whether requests should carry the unconstrained thinking budget
    #[must_use]
    pub fn reasoning_enabled(&self) -> bool {
        match self.reasoning {
            ReasoningMode::WithSystemPrompt => self.effective_system_prompt().is_some(),
            ReasoningMode::Always => true,
            ReasoningMode::Never => false,
        }
    }
}

/// Get the configuration directory path
#[must_use]
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gemini-chat")
}

/// Get the global settings file path
#[must_use]
pub fn global_config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// Get the project settings file path in the current directory
#[must_use]
pub fn project_config_path() -> PathBuf {
    PathBuf::from(".gemini-chat.json")
}
