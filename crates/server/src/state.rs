//! Shared application state

use std::sync::Arc;

use fleur_agent::{SessionRegistry, TurnEngine};
use fleur_config::Settings;
use fleur_core::{SpeechToText, TextToSpeech};

/// Everything the request handlers need, cheap to clone
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub registry: Arc<SessionRegistry>,
    pub engine: Arc<TurnEngine>,
    /// ASR collaborator; absent means text arrives empty and the dialogue
    /// re-asks
    pub transcriber: Option<Arc<dyn SpeechToText>>,
    /// TTS collaborator; absent means text-only replies
    pub synthesizer: Option<Arc<dyn TextToSpeech>>,
}

impl AppState {
    pub fn new(
        settings: Settings,
        registry: Arc<SessionRegistry>,
        engine: Arc<TurnEngine>,
        transcriber: Option<Arc<dyn SpeechToText>>,
        synthesizer: Option<Arc<dyn TextToSpeech>>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            registry,
            engine,
            transcriber,
            synthesizer,
        }
    }
}
