//! gemini-chat: conversation adapter for the Gemini `generateContent` API
//!
//! [`ConversationAdapter`] validates a prompt, appends it to caller-supplied
//! history, sends one request with fixed sampling parameters and the search
//! tool, and returns the generated text or a classified [`ChatError`].

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod adapter;
pub mod cli;
pub mod config;
pub mod error;
pub mod messages;
pub mod repl;
pub mod services;

// Re-exports for convenience
pub use adapter::{ChatPlatform, ConversationAdapter};
pub use config::{AdapterConfig, ReasoningMode};
pub use error::{ChatError, Result};
pub use messages::{Message, Role};
