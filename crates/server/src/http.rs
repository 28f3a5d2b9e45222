//! HTTP endpoints
//!
//! `POST /chat` carries one conversational turn as JSON: a session id, a
//! language tag, and either a text transcript or base64-encoded audio.
//! `GET /` and `/health` answer liveness probes, `GET /stats` reports the
//! aggregate booking counters.

use axum::{
    extract::State,
    http::{HeaderValue, Method},
    response::Json,
    routing::{get, post},
    Router,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use fleur_core::{Language, TurnResponse};

use crate::state::AppState;
use crate::ServerError;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.settings.server.cors_origins);

    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .route("/stats", get(stats))
        .route("/chat", post(chat))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Build the CORS layer from configured origins, defaulting to the local
/// dev frontends when none are configured.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let defaults = [
        "http://localhost:3000",
        "http://localhost:5173",
        "http://localhost:5174",
    ];

    let parsed: Vec<HeaderValue> = if origins.is_empty() {
        defaults.iter().filter_map(|o| o.parse().ok()).collect()
    } else {
        origins
            .iter()
            .filter_map(|origin| {
                let value = origin.parse::<HeaderValue>().ok();
                if value.is_none() {
                    warn!(origin, "ignoring invalid CORS origin");
                }
                value
            })
            .collect()
    };

    CorsLayer::new()
        .allow_origin(parsed)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn stats(State(state): State<AppState>) -> Json<serde_json::Value> {
    let snapshot = state.engine.stats().snapshot();
    Json(serde_json::json!({
        "bookings": snapshot.bookings,
        "revenue": snapshot.revenue,
        "active_sessions": state.registry.len(),
    }))
}

/// One conversational turn
#[derive(Debug, Deserialize)]
struct ChatRequest {
    session_id: String,
    lang: String,
    /// Pre-transcribed text; takes precedence over audio
    #[serde(default)]
    text: Option<String>,
    /// Base64-encoded audio for the ASR collaborator
    #[serde(default)]
    audio_base64: Option<String>,
}

impl ChatRequest {
    fn language(&self) -> Result<Language, ServerError> {
        Language::from_str_loose(&self.lang)
            .ok_or_else(|| ServerError::UnsupportedLanguage(self.lang.clone()))
    }

    /// Validate the payload and return the transcript source.
    fn transcript_source(&self) -> Result<TranscriptSource<'_>, ServerError> {
        if let Some(text) = self.text.as_deref() {
            if !text.trim().is_empty() {
                return Ok(TranscriptSource::Text(text));
            }
        }
        match self.audio_base64.as_deref() {
            Some("") => Err(ServerError::EmptyAudio),
            Some(encoded) => {
                let audio = BASE64
                    .decode(encoded)
                    .map_err(|e| ServerError::Malformed(format!("invalid audio encoding: {e}")))?;
                if audio.is_empty() {
                    return Err(ServerError::EmptyAudio);
                }
                Ok(TranscriptSource::Audio(audio))
            }
            None => Err(ServerError::MissingField("text or audio_base64")),
        }
    }
}

enum TranscriptSource<'a> {
    Text(&'a str),
    Audio(Vec<u8>),
}

/// One conversational turn: transcribe, update the session, decide the
/// reply, synthesize.
async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<TurnResponse>, ServerError> {
    let language = request.language()?;
    let source = request.transcript_source()?;

    // Reclaim idle sessions before admitting a new one.
    state.registry.sweep();

    let transcript = match source {
        TranscriptSource::Text(text) => text.trim().to_string(),
        TranscriptSource::Audio(audio) => match &state.transcriber {
            Some(transcriber) => transcriber
                .transcribe(&audio, language)
                .await
                .unwrap_or_else(|error| {
                    warn!(%error, "transcription failed, continuing with empty transcript");
                    String::new()
                }),
            None => String::new(),
        },
    };

    let session = state
        .registry
        .get_or_create(&request.session_id, language)
        .map_err(|_| ServerError::Capacity)?;

    let mut response = {
        let mut guard = session.lock().await;
        state.engine.process_turn(&mut guard, &transcript).await
    };

    if response.done {
        state.registry.remove(&request.session_id);
    }

    if let Some(synthesizer) = &state.synthesizer {
        match synthesizer.synthesize(&response.reply, language).await {
            Ok(Some(bytes)) => response.audio_base64 = Some(BASE64.encode(bytes)),
            Ok(None) => {}
            Err(error) => warn!(%error, "synthesis failed, sending text-only reply"),
        }
    }

    Ok(Json(response))
}
