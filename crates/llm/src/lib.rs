//! Conversational fallback model client
//!
//! The dialogue's default path (no scripted conflict/confirmation/rejection
//! turn applies) delegates reply wording to an OpenAI-compatible chat
//! endpoint. This crate holds the receptionist prompt assembly and the
//! backend client. Unavailability is not fatal: the dialogue engine
//! substitutes a fixed apology when a call fails.

pub mod backend;
pub mod prompt;

pub use backend::{ChatBackend, OpenAiBackend};
pub use prompt::{Message, PromptBuilder, Role};

use thiserror::Error;

/// Chat backend errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        LlmError::Network(err.to_string())
    }
}
