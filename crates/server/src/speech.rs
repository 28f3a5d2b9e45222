//! Speech collaborators
//!
//! HTTP adapters for ASR and TTS. Both degrade instead of failing the
//! turn: a transcription error surfaces as an empty transcript upstream,
//! and a synthesis error simply drops the audio from the response.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use fleur_config::SpeechConfig;
use fleur_core::{CoreError, Language, SpeechToText, TextToSpeech};

const SPEECH_TIMEOUT: Duration = Duration::from_secs(20);

/// ASR over HTTP: posts raw audio, expects `{"text": "..."}` back
pub struct HttpTranscriber {
    client: Client,
    endpoint: String,
}

#[derive(Deserialize)]
struct TranscriptBody {
    #[serde(default)]
    text: String,
}

impl HttpTranscriber {
    pub fn new(endpoint: String) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(SPEECH_TIMEOUT)
            .build()
            .map_err(|e| CoreError::Unavailable(e.to_string()))?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl SpeechToText for HttpTranscriber {
    async fn transcribe(&self, audio: &[u8], language: Language) -> Result<String, CoreError> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("lang", language.code())])
            .header("content-type", "application/octet-stream")
            .body(audio.to_vec())
            .send()
            .await
            .map_err(|e| CoreError::Transcription(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CoreError::Transcription(format!(
                "ASR service returned {}",
                response.status()
            )));
        }

        let body: TranscriptBody = response
            .json()
            .await
            .map_err(|e| CoreError::Transcription(e.to_string()))?;
        Ok(body.text.trim().to_string())
    }

    fn name(&self) -> &str {
        "http-asr"
    }
}

/// ElevenLabs TTS adapter with per-language voices
pub struct ElevenLabsSynthesizer {
    client: Client,
    config: SpeechConfig,
}

impl ElevenLabsSynthesizer {
    pub fn new(config: SpeechConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(SPEECH_TIMEOUT)
            .build()
            .map_err(|e| CoreError::Unavailable(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn voice_id(&self, language: Language) -> &str {
        match language {
            Language::English => &self.config.voice_en,
            Language::Hindi => &self.config.voice_hi,
        }
    }
}

#[async_trait]
impl TextToSpeech for ElevenLabsSynthesizer {
    async fn synthesize(
        &self,
        text: &str,
        language: Language,
    ) -> Result<Option<Vec<u8>>, CoreError> {
        let Some(api_key) = self.config.tts_api_key.as_deref() else {
            return Ok(None);
        };

        let url = format!(
            "{}/{}",
            self.config.tts_endpoint.trim_end_matches('/'),
            self.voice_id(language)
        );
        let body = serde_json::json!({
            "text": text,
            "voice_settings": { "stability": 0.5, "similarity_boost": 0.75 },
        });

        let result = self
            .client
            .post(url)
            .header("xi-api-key", api_key)
            .header("accept", "audio/mpeg")
            .json(&body)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| CoreError::Synthesis(e.to_string()))?;
                Ok(Some(bytes.to_vec()))
            }
            Ok(response) => {
                warn!(status = %response.status(), "TTS request rejected, continuing without audio");
                Ok(None)
            }
            Err(error) => {
                warn!(%error, "TTS request failed, continuing without audio");
                Ok(None)
            }
        }
    }

    fn name(&self) -> &str {
        "elevenlabs"
    }
}
