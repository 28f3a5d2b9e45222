//! Core types for the salon booking voice agent
//!
//! This crate provides the foundational types used across all other crates:
//! - Language definitions (English, Hindi)
//! - The booking data model and canonical time type
//! - Collaborator traits for pluggable speech backends (STT, TTS)
//! - The per-turn response record
//! - Error types

pub mod booking;
pub mod error;
pub mod language;
pub mod response;
pub mod traits;

pub use booking::{BookingData, CanonicalTime, Meridiem, SlotKind};
pub use error::CoreError;
pub use language::{is_devanagari, Language};
pub use response::TurnResponse;
pub use traits::{SpeechToText, TextToSpeech};
