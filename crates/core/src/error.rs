//! Core error types

use thiserror::Error;

/// Errors surfaced by collaborator backends
///
/// Business-logic non-matches are never errors: extractors return `None`
/// and the slot is simply re-asked next turn. `CoreError` exists for the
/// speech collaborators, and callers degrade on it (empty transcript,
/// absent audio) rather than propagating it to the dialogue.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("transcription backend error: {0}")]
    Transcription(String),

    #[error("synthesis backend error: {0}")]
    Synthesis(String),

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}
