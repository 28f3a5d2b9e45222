//! Configuration management for the salon voice agent
//!
//! Supports loading configuration from:
//! - TOML files (`config/default.toml`, `config/{env}.toml`)
//! - Environment variables (`FLEUR_` prefix)
//!
//! Also home to the static business data the dialogue runs on: the service
//! catalog (per-language pricing), synonym tables, booked slots, business
//! hours and the per-language reply templates.

pub mod catalog;
pub mod messages;
pub mod settings;

pub use catalog::{
    ServiceCatalog, ServiceInfo, service_synonyms, CLOSE_MINUTES, OPEN_MINUTES, SLOT_STEP_MINUTES,
};
pub use messages::{confirmation_words, rejection_words, ReplyTemplates};
pub use settings::{
    load_settings, LlmSettings, ServerConfig, SessionConfig, Settings, SpeechConfig,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
