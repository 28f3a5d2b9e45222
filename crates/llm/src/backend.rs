//! Chat backend implementations
//!
//! One production backend: any OpenAI-compatible `/chat/completions`
//! endpoint (Groq in the default configuration).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use fleur_config::LlmSettings;

use crate::prompt::Message;
use crate::LlmError;

/// A chat completion backend
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Generate one reply for the given conversation
    async fn complete(&self, messages: &[Message]) -> Result<String, LlmError>;

    /// Whether the backend is configured well enough to try a call
    fn is_available(&self) -> bool;

    fn model_name(&self) -> &str;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    max_tokens: usize,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// OpenAI-compatible chat backend
#[derive(Clone)]
pub struct OpenAiBackend {
    client: Client,
    settings: LlmSettings,
}

impl OpenAiBackend {
    pub fn new(settings: LlmSettings) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| {
                LlmError::Configuration(format!("failed to create HTTP client: {e}"))
            })?;
        Ok(Self { client, settings })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.settings.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatBackend for OpenAiBackend {
    async fn complete(&self, messages: &[Message]) -> Result<String, LlmError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or_else(|| LlmError::Configuration("no API key configured".to_string()))?;

        let request = ChatRequest {
            model: &self.settings.model,
            messages,
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!("{status}: {body}")));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let reply = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|t| t.trim().to_string())
            .unwrap_or_default();

        debug!(model = %self.settings.model, chars = reply.len(), "chat completion received");
        Ok(reply)
    }

    fn is_available(&self) -> bool {
        self.settings.api_key.is_some()
    }

    fn model_name(&self) -> &str {
        &self.settings.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_url_joins_cleanly() {
        let mut settings = LlmSettings::default();
        settings.endpoint = "https://api.groq.com/openai/v1/".to_string();
        let backend = OpenAiBackend::new(settings).unwrap();
        assert_eq!(
            backend.completions_url(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn test_unavailable_without_api_key() {
        let backend = OpenAiBackend::new(LlmSettings::default()).unwrap();
        assert!(!backend.is_available());
    }

    #[test]
    fn test_request_shape() {
        let messages = vec![Message::user("hello")];
        let request = ChatRequest {
            model: "llama-3.3-70b-versatile",
            messages: &messages,
            max_tokens: 60,
            temperature: 0.4,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "llama-3.3-70b-versatile");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 60);
    }
}
