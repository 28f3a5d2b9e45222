//! Per-conversation booking session
//!
//! Owns the collected slots and the idle timestamp. Each turn attempts to
//! fill exactly the next missing slot; an extraction miss leaves the state
//! untouched and the same slot is re-asked next turn. A filled slot is
//! never re-derived; only the turn decision logic resets one explicitly.

use std::time::{Duration, Instant};

use chrono::NaiveDate;
use tracing::debug;

use fleur_core::{BookingData, Language, SlotKind};
use fleur_text_processing::{
    extract_name, extract_time, match_service, resolve_date, MeridiemPolicy,
};

/// Conversational state for one session identifier
#[derive(Debug, Clone)]
pub struct BookingSession {
    pub language: Language,
    pub data: BookingData,
    last_interaction: Instant,
}

impl BookingSession {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            data: BookingData::default(),
            last_interaction: Instant::now(),
        }
    }

    /// Mark activity on this session
    pub fn touch(&mut self) {
        self.last_interaction = Instant::now();
    }

    /// How long this session has been idle
    pub fn idle_for(&self) -> Duration {
        self.last_interaction.elapsed()
    }

    /// Run the extractor for the next missing slot against the transcript.
    /// At most one slot is filled per call.
    pub fn update(&mut self, transcript: &str, today: NaiveDate, policy: MeridiemPolicy) {
        if transcript.is_empty() {
            return;
        }
        self.touch();

        let Some(missing) = self.data.next_missing() else {
            return;
        };

        match missing {
            SlotKind::Service => {
                if let Some(service) = match_service(transcript) {
                    self.data.service = Some(service.to_string());
                }
            }
            SlotKind::Name => {
                if let Some(name) = extract_name(transcript) {
                    self.data.name = Some(name);
                }
            }
            SlotKind::Date => {
                if let Some(date) = resolve_date(transcript, self.language, today) {
                    self.data.date = Some(date);
                }
            }
            SlotKind::Time => {
                if let Some(time) = extract_time(transcript, self.language, policy) {
                    self.data.time = Some(time);
                }
            }
        }

        debug!(slot = %missing, filled = self.data.next_missing() != Some(missing),
            "slot extraction attempted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleur_text_processing::default_meridiem_policy;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 25).unwrap()
    }

    fn update(session: &mut BookingSession, transcript: &str) {
        session.update(transcript, today(), default_meridiem_policy);
    }

    #[test]
    fn test_one_slot_per_turn() {
        let mut session = BookingSession::new(Language::English);
        // Everything in one breath still fills only the service slot.
        update(&mut session, "haircut for anjali tomorrow at 4 pm");
        assert_eq!(session.data.service.as_deref(), Some("haircut"));
        assert!(session.data.name.is_none());
        assert!(session.data.time.is_none());
    }

    #[test]
    fn test_full_fill_sequence() {
        let mut session = BookingSession::new(Language::English);
        update(&mut session, "i want a facial");
        update(&mut session, "my name is anjali verma");
        update(&mut session, "tomorrow");
        update(&mut session, "4:30 pm");

        assert!(session.data.is_complete());
        assert_eq!(session.data.service.as_deref(), Some("facial"));
        assert_eq!(session.data.name.as_deref(), Some("Anjali Verma"));
        assert_eq!(session.data.date, NaiveDate::from_ymd_opt(2026, 8, 26));
        assert_eq!(session.data.time.unwrap().to_string(), "4:30 pm");
    }

    #[test]
    fn test_miss_leaves_state_untouched() {
        let mut session = BookingSession::new(Language::English);
        update(&mut session, "i want a facial");
        let before = session.data.clone();
        update(&mut session, "hmm let me think");
        assert_eq!(session.data.name, before.name);
        assert_eq!(session.data.next_missing(), Some(SlotKind::Name));
    }

    #[test]
    fn test_filled_slot_never_overwritten() {
        let mut session = BookingSession::new(Language::English);
        update(&mut session, "book a massage");
        update(&mut session, "rahul");
        // A later service mention does not replace the committed one.
        update(&mut session, "haircut on the 28th");
        assert_eq!(session.data.service.as_deref(), Some("massage"));
        assert_eq!(session.data.date, NaiveDate::from_ymd_opt(2026, 8, 28));
    }

    #[test]
    fn test_empty_transcript_is_a_no_op() {
        let mut session = BookingSession::new(Language::Hindi);
        let before = session.data.clone();
        update(&mut session, "");
        assert_eq!(session.data.service, before.service);
    }

    #[test]
    fn test_hindi_flow() {
        let mut session = BookingSession::new(Language::Hindi);
        update(&mut session, "मुझे फेशियल करवाना है");
        update(&mut session, "मेरा नाम अंजलि है");
        update(&mut session, "कल");
        update(&mut session, "शाम चार बजे");

        assert!(session.data.is_complete());
        assert_eq!(session.data.service.as_deref(), Some("facial"));
        assert_eq!(session.data.time.unwrap().to_string(), "4:00 pm");
    }
}
