//! Collaborator traits for pluggable speech backends
//!
//! Transcription and synthesis are external services; the dialogue core
//! only ever sees their degraded results (empty transcript, absent audio).

use async_trait::async_trait;

use crate::error::CoreError;
use crate::language::Language;

/// Speech-to-text collaborator
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe encoded audio to text.
    ///
    /// Callers treat any error as an empty transcript; the dialogue
    /// continues and re-asks the current slot.
    async fn transcribe(&self, audio: &[u8], language: Language) -> Result<String, CoreError>;

    /// Backend name for diagnostics
    fn name(&self) -> &str;
}

/// Text-to-speech collaborator
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Synthesize a reply. `Ok(None)` and `Err(_)` both degrade to a
    /// text-only response.
    async fn synthesize(
        &self,
        text: &str,
        language: Language,
    ) -> Result<Option<Vec<u8>>, CoreError>;

    /// Backend name for diagnostics
    fn name(&self) -> &str;
}
