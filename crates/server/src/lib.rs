//! HTTP boundary for the salon voice agent
//!
//! Validates requests, runs the per-turn pipeline (transcribe, update
//! session, decide turn, synthesize) and frames the result as JSON.
//! Business-logic misses never surface here as failures; only boundary
//! validation does.

pub mod http;
pub mod speech;
pub mod state;

pub use http::create_router;
pub use speech::{ElevenLabsSynthesizer, HttpTranscriber};
pub use state::AppState;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Boundary validation and capacity errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("empty audio file")]
    EmptyAudio,

    #[error("missing form field: {0}")]
    MissingField(&'static str),

    #[error("malformed request: {0}")]
    Malformed(String),

    #[error("session capacity reached")]
    Capacity,

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::UnsupportedLanguage(_)
            | Self::EmptyAudio
            | Self::MissingField(_)
            | Self::Malformed(_) => StatusCode::BAD_REQUEST,
            Self::Capacity => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let body = axum::Json(serde_json::json!({ "detail": self.to_string() }));
        (self.status(), body).into_response()
    }
}
