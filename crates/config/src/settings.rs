//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Session lifecycle configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Speech collaborator endpoints (ASR / TTS)
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Conversational fallback model
    #[serde(default)]
    pub llm: LlmSettings,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; empty falls back to localhost defaults
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

/// Session lifecycle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Idle timeout before a session is reclaimed
    #[serde(default = "default_timeout_minutes")]
    pub timeout_minutes: u64,

    /// Maximum concurrent sessions
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// Interval between background idle sweeps
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

fn default_timeout_minutes() -> u64 {
    15
}

fn default_max_sessions() -> usize {
    100
}

fn default_sweep_interval_secs() -> u64 {
    60
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout_minutes: default_timeout_minutes(),
            max_sessions: default_max_sessions(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

/// Speech collaborator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// ASR service endpoint; unset disables audio input (text-only turns)
    #[serde(default)]
    pub asr_endpoint: Option<String>,

    /// TTS service base endpoint
    #[serde(default = "default_tts_endpoint")]
    pub tts_endpoint: String,

    /// TTS API key; unset degrades to text-only replies
    #[serde(default)]
    pub tts_api_key: Option<String>,

    /// English voice id
    #[serde(default = "default_voice_en")]
    pub voice_en: String,

    /// Hindi voice id
    #[serde(default = "default_voice_hi")]
    pub voice_hi: String,
}

fn default_tts_endpoint() -> String {
    "https://api.elevenlabs.io/v1/text-to-speech".to_string()
}

fn default_voice_en() -> String {
    "ZUrEGyu8GFMwnHbvLhv2".to_string()
}

fn default_voice_hi() -> String {
    "1qEiC6qsybMkmnNdVMbK".to_string()
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            asr_endpoint: None,
            tts_endpoint: default_tts_endpoint(),
            tts_api_key: None,
            voice_en: default_voice_en(),
            voice_hi: default_voice_hi(),
        }
    }
}

/// Conversational fallback model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Model name/ID
    #[serde(default = "default_model")]
    pub model: String,

    /// OpenAI-compatible API base endpoint
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,

    /// API key; unset degrades the default path to the apology reply
    #[serde(default)]
    pub api_key: Option<String>,

    /// Maximum tokens per reply (voice replies stay short)
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_llm_endpoint() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_max_tokens() -> usize {
    60
}

fn default_temperature() -> f32 {
    0.4
}

fn default_llm_timeout_secs() -> u64 {
    20
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_llm_endpoint(),
            api_key: None,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_llm_timeout_secs(),
        }
    }
}

/// Load settings with layered precedence:
/// env vars (`FLEUR_`) > `config/{env}.toml` > `config/default.toml` > defaults
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder()
        .add_source(File::with_name("config/default").required(false));

    if let Some(env) = env {
        builder = builder.add_source(File::with_name(&format!("config/{env}")).required(false));
    }

    let config = builder
        .add_source(Environment::with_prefix("FLEUR").separator("__"))
        .build()?;

    let settings: Settings = config.try_deserialize()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.server.port, 8000);
        assert_eq!(s.session.timeout_minutes, 15);
        assert_eq!(s.llm.max_tokens, 60);
        assert!(s.speech.asr_endpoint.is_none());
    }

    #[test]
    fn test_load_without_files_uses_defaults() {
        // No config directory in the test cwd; everything falls back.
        let s = load_settings(None).unwrap();
        assert_eq!(s.session.max_sessions, 100);
        assert_eq!(s.llm.model, "llama-3.3-70b-versatile");
    }

    #[test]
    fn test_settings_round_trip_toml() {
        let s = Settings::default();
        let text = toml::to_string(&s).unwrap();
        let back: Settings = toml::from_str(&text).unwrap();
        assert_eq!(back.server.port, s.server.port);
        assert_eq!(back.speech.voice_hi, s.speech.voice_hi);
    }
}
