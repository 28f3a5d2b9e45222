//! Bilingual slot extraction for the salon voice agent
//!
//! Turns noisy, speech-transcribed English/Hindi utterances into structured
//! booking slot values:
//! - **Time**: idioms ("quarter past"), Hindi बजे grammar, fused words
//!   ("डेढ़", "साढ़े"), 24-hour digits, all normalized to one canonical form
//! - **Date**: Hindi month/relative-day vocabulary, permissive calendar
//!   parsing, past dates rejected
//! - **Name**: self-introduction phrases in either script, or a short bare
//!   utterance
//! - **Service**: ordered synonym/transliteration containment matching
//!
//! An extraction miss is never an error. Every extractor returns `Option`
//! and the dialogue simply re-asks on the next turn.

pub mod chain;
pub mod date;
pub mod hindi;
pub mod name;
pub mod service;
pub mod time;

pub use chain::first_success;
pub use date::resolve_date;
pub use hindi::{
    default_meridiem_policy, extract_hindi_time, normalize_special_times, repair_asr_artifacts,
    word_to_number, MeridiemPolicy,
};
pub use name::extract_name;
pub use service::match_service;
pub use time::{extract_time, normalize_time_phrase};
