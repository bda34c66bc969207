//! CLI argument parsing and command routing

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{ReasoningMode, Settings};

/// gemini-chat: talk to Gemini from the terminal
#[derive(Debug, Parser)]
#[command(name = "gemini-chat")]
#[command(about = "Chat with Gemini models from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub overrides: Overrides,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Settings given on the command line; they win over files and environment
#[derive(Debug, Default, Args)]
pub struct Overrides {
    /// API key (defaults to GEMINI_API_KEY / GOOGLE_API_KEY)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// System instruction applied to every turn
    #[arg(short, long, global = true)]
    pub system: Option<String>,

    /// Sampling temperature between 0 and 1
    #[arg(short, long, global = true)]
    pub temperature: Option<f32>,

    /// When to request extended reasoning: with-system-prompt, always, never
    #[arg(long, global = true)]
    pub reasoning: Option<ReasoningMode>,

    /// API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

impl Overrides {
    /// Convert into a settings layer
    #[must_use]
    pub fn into_settings(self) -> Settings {
        Settings {
            api_key: self.api_key,
            model_name: self.model,
            system_prompt: self.system,
            temperature: self.temperature,
            reasoning: self.reasoning,
            base_url: self.base_url,
        }
    }
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start interactive REPL
    Repl,

    /// Send a single prompt and print the reply
    Ask {
        /// The prompt to send
        prompt: String,

        /// JSON file with earlier turns: [{"role": "user"|"model", "content": "..."}]
        #[arg(long)]
        history: Option<PathBuf>,
    },

    /// Show the effective configuration
    Config,

    /// Show version information
    Version,
}

impl Cli {
    /// Parse CLI arguments from environment
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask_with_overrides() {
        let cli = Cli::parse_from([
            "gemini-chat",
            "ask",
            "hello there",
            "--model",
            "gemini-2.5-pro",
            "--temperature",
            "0.2",
            "--reasoning",
            "never",
        ]);

        match cli.command {
            Some(Commands::Ask { ref prompt, ref history }) => {
                assert_eq!(prompt, "hello there");
                assert!(history.is_none());
            }
            ref other => panic!("expected ask, got {other:?}"),
        }

        let settings = cli.overrides.into_settings();
        assert_eq!(settings.model_name.as_deref(), Some("gemini-2.5-pro"));
        assert_eq!(settings.temperature, Some(0.2));
        assert_eq!(settings.reasoning, Some(ReasoningMode::Never));
        assert!(settings.api_key.is_none());
    }

    #[test]
    fn test_invalid_reasoning_rejected() {
        assert!(Cli::try_parse_from(["gemini-chat", "--reasoning", "sometimes", "repl"]).is_err());
    }
}
