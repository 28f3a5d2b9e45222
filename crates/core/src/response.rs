//! Per-turn response record
//!
//! Everything the transport layer needs to answer one conversational turn.

use serde::{Deserialize, Serialize};

use crate::booking::BookingData;
use crate::language::Language;

/// Outcome of one processed turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnResponse {
    /// What the ASR heard (may be empty)
    pub transcript: String,
    /// Reply text in the active language
    pub reply: String,
    /// Synthesized reply audio, when the TTS collaborator produced any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_base64: Option<String>,
    /// Active dialogue language
    pub language: Language,
    /// Session finalized (booking confirmed)
    pub done: bool,
    /// Dialogue ongoing
    #[serde(rename = "continue")]
    pub continue_: bool,
    /// Snapshot of collected slots at the end of this turn
    pub booking: BookingData,
    /// Price of the booked service, set on finalization only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_price: Option<u32>,
}

impl TurnResponse {
    /// A mid-dialogue response (not finalized)
    pub fn ongoing(
        transcript: impl Into<String>,
        reply: impl Into<String>,
        language: Language,
        booking: BookingData,
    ) -> Self {
        Self {
            transcript: transcript.into(),
            reply: reply.into(),
            audio_base64: None,
            language,
            done: false,
            continue_: true,
            booking,
            booking_price: None,
        }
    }

    /// A finalizing response carrying the booked price
    pub fn finalized(
        transcript: impl Into<String>,
        reply: impl Into<String>,
        language: Language,
        booking: BookingData,
        price: u32,
    ) -> Self {
        Self {
            transcript: transcript.into(),
            reply: reply.into(),
            audio_base64: None,
            language,
            done: true,
            continue_: false,
            booking,
            booking_price: Some(price),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_continue_field_rename() {
        let r = TurnResponse::ongoing("hi", "hello", Language::English, BookingData::default());
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["continue"], true);
        assert_eq!(json["done"], false);
        assert!(json.get("booking_price").is_none());
    }

    #[test]
    fn test_finalized_carries_price() {
        let r = TurnResponse::finalized(
            "yes",
            "booked",
            Language::Hindi,
            BookingData::default(),
            500,
        );
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["done"], true);
        assert_eq!(json["continue"], false);
        assert_eq!(json["booking_price"], 500);
        assert_eq!(json["language"], "hi");
    }
}
