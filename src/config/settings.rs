//! Global and project-specific settings files

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use super::{mask_api_key, AdapterConfig, ReasoningMode};
use crate::error::{ChatError, Result};

/// Environment variables consulted for the API key, in order
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];
pub const MODEL_ENV_VAR: &str = "GEMINI_MODEL";
pub const BASE_URL_ENV_VAR: &str = "GEMINI_BASE_URL";

/// One layer of settings; every field is optional so layers can be merged
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<ReasoningMode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &self.masked_api_key())
            .field("model_name", &self.model_name)
            .field("system_prompt", &self.system_prompt)
            .field("temperature", &self.temperature)
            .field("reasoning", &self.reasoning)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Settings {
    /// Load global settings, then project settings, then the environment
    ///
    /// # Errors
    ///
    /// Returns an error if either settings file exists but cannot be parsed
    pub fn load() -> Result<Self> {
        let global = Self::load_from_path(&super::global_config_path())?;
        let project = Self::load_from_path(&super::project_config_path())?;

        Ok(global
            .merge(project)
            .with_env(|name| std::env::var(name).ok()))
    }

    /// Load settings from a specific path; a missing file yields empty settings
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| ChatError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let settings = serde_json::from_str(&contents).map_err(|e| ChatError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Save settings to a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Overlay `other` on top of `self`; fields set in `other` win
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            api_key: other.api_key.or(self.api_key),
            model_name: other.model_name.or(self.model_name),
            system_prompt: other.system_prompt.or(self.system_prompt),
            temperature: other.temperature.or(self.temperature),
            reasoning: other.reasoning.or(self.reasoning),
            base_url: other.base_url.or(self.base_url),
        }
    }

    /// Overlay values found through `lookup` (normally `std::env::var`)
    #[must_use]
    pub fn with_env(self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let env = Self {
            api_key: API_KEY_ENV_VARS.iter().find_map(|&name| non_empty(name)),
            model_name: non_empty(MODEL_ENV_VAR),
            base_url: non_empty(BASE_URL_ENV_VAR),
            ..Self::default()
        };

        self.merge(env)
    }

    /// API key with everything but the last four characters hidden
    #[must_use]
    pub fn masked_api_key(&self) -> Option<String> {
        self.api_key.as_deref().map(mask_api_key)
    }

    /// Resolve into an [`AdapterConfig`], filling defaults
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is set or the temperature is outside `[0, 1]`
    pub fn into_adapter_config(self) -> Result<AdapterConfig> {
        let api_key = self.api_key.ok_or_else(|| {
            ChatError::Configuration(format!(
                "API key is required (set {} or pass --api-key)",
                API_KEY_ENV_VARS[0]
            ))
        })?;

        let mut config = AdapterConfig::new(api_key);

        if let Some(temperature) = self.temperature {
            if !(0.0..=1.0).contains(&temperature) {
                return Err(ChatError::Configuration(format!(
                    "temperature must be between 0 and 1, got {temperature}"
                )));
            }
            config = config.with_temperature(temperature);
        }
        if let Some(model_name) = self.model_name {
            config = config.with_model(model_name);
        }
        if let Some(system_prompt) = self.system_prompt {
            config = config.with_system_prompt(system_prompt);
        }
        if let Some(reasoning) = self.reasoning {
            config = config.with_reasoning(reasoning);
        }
        if let Some(base_url) = self.base_url {
            config = config.with_base_url(base_url);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = Settings::load_from_path(&temp_dir.path().join("absent.json")).unwrap();
        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn test_save_and_load_settings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.json");

        let settings = Settings {
            model_name: Some("gemini-2.5-pro".into()),
            temperature: Some(0.2),
            reasoning: Some(ReasoningMode::Always),
            ..Settings::default()
        };
        settings.save_to_path(&path).unwrap();

        let loaded = Settings::load_from_path(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_malformed_file_is_config_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".gemini-chat.json");
        fs::write(&path, "{ not json").unwrap();

        let err = Settings::load_from_path(&path).unwrap_err();
        assert!(matches!(err, ChatError::ConfigParse { .. }));
    }

    #[test]
    fn test_project_overrides_global() {
        let global = Settings {
            model_name: Some("global-model".into()),
            system_prompt: Some("global prompt".into()),
            ..Settings::default()
        };
        let project = Settings {
            model_name: Some("project-model".into()),
            ..Settings::default()
        };

        let merged = global.merge(project);
        assert_eq!(merged.model_name.as_deref(), Some("project-model"));
        assert_eq!(merged.system_prompt.as_deref(), Some("global prompt"));
    }

    #[test]
    fn test_env_overrides_files() {
        let file = Settings {
            api_key: Some("file-key".into()),
            model_name: Some("file-model".into()),
            ..Settings::default()
        };

        let merged = file.with_env(env_from(&[
            ("GEMINI_API_KEY", "env-key"),
            ("GEMINI_BASE_URL", "http://localhost:9999"),
        ]));
        assert_eq!(merged.api_key.as_deref(), Some("env-key"));
        assert_eq!(merged.model_name.as_deref(), Some("file-model"));
        assert_eq!(merged.base_url.as_deref(), Some("http://localhost:9999"));
    }

    #[test]
    fn test_google_api_key_fallback_and_blank_env_ignored() {
        let merged = Settings::default().with_env(env_from(&[
            ("GEMINI_API_KEY", "   "),
            ("GOOGLE_API_KEY", "google-key"),
        ]));
        assert_eq!(merged.api_key.as_deref(), Some("google-key"));
    }

    #[test]
    fn test_cli_overrides_env() {
        let env = Settings::default().with_env(env_from(&[("GEMINI_MODEL", "env-model")]));
        let cli = Settings {
            model_name: Some("cli-model".into()),
            ..Settings::default()
        };
        assert_eq!(env.merge(cli).model_name.as_deref(), Some("cli-model"));
    }

    #[test]
    fn test_into_adapter_config_requires_key() {
        let err = Settings::default().into_adapter_config().unwrap_err();
        assert!(matches!(err, ChatError::Configuration(_)));
    }

    #[test]
    fn test_into_adapter_config_rejects_temperature() {
        let settings = Settings {
            api_key: Some("key".into()),
            temperature: Some(1.5),
            ..Settings::default()
        };
        assert!(matches!(
            settings.into_adapter_config(),
            Err(ChatError::Configuration(_))
        ));
    }

    #[test]
    fn test_into_adapter_config_fills_defaults() {
        let settings = Settings {
            api_key: Some("key".into()),
            system_prompt: Some("You are terse.".into()),
            ..Settings::default()
        };
        let config = settings.into_adapter_config().unwrap();
        assert_eq!(config.model_name, super::super::DEFAULT_MODEL);
        assert_eq!(config.base_url, super::super::DEFAULT_BASE_URL);
        assert_eq!(config.system_prompt.as_deref(), Some("You are terse."));
    }

    #[test]
    fn test_debug_masks_api_key() {
        let settings = Settings {
            api_key: Some("supersecret1234".into()),
            ..Settings::default()
        };
        let debug = format!("{settings:?}");
        assert!(!debug.contains("supersecret"));
        assert!(debug.contains("1234"));
    }

    #[test]
    fn test_masked_api_key() {
        let settings = Settings {
            api_key: Some("abcdefgh1234".into()),
            ..Settings::default()
        };
        assert_eq!(settings.masked_api_key().as_deref(), Some("********1234"));

        let short = Settings {
            api_key: Some("abc".into()),
            ..Settings::default()
        };
        assert_eq!(short.masked_api_key().as_deref(), Some("***"));
    }
}
