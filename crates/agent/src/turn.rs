//! Turn decision logic
//!
//! After a session has absorbed the transcript, the engine picks the
//! outward response, in strict priority order:
//! 1. slot conflict: the requested time is already booked; offer the
//!    nearest free slot and re-ask (a "yes" must not finalize a
//!    double-booked slot, so this runs before confirmation matching)
//! 2. explicit confirmation: finalize, price the service, bump the
//!    aggregate counters
//! 3. explicit rejection: clear the time slot and re-ask (change requests
//!    are assumed to target time)
//! 4. default: delegate reply wording to the chat model with grounding
//!    facts; a failure there degrades to a fixed apology

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use fleur_config::{
    confirmation_words, rejection_words, ReplyTemplates, ServiceCatalog, CLOSE_MINUTES,
    OPEN_MINUTES, SLOT_STEP_MINUTES,
};
use fleur_core::{CanonicalTime, Language, SlotKind, TurnResponse};
use fleur_llm::{ChatBackend, PromptBuilder};
use fleur_text_processing::{default_meridiem_policy, MeridiemPolicy};

use crate::session::BookingSession;
use crate::stats::BookingStats;

/// Earliest free slot at or after the requested time, scanning the
/// half-hour grid up to closing time.
pub fn find_alternate_slot(
    requested: CanonicalTime,
    booked: &std::collections::HashSet<String>,
) -> Option<CanonicalTime> {
    let mut minutes = requested.minutes_from_midnight().max(OPEN_MINUTES);
    while minutes <= CLOSE_MINUTES {
        let slot = CanonicalTime::from_minutes(minutes)?;
        if !booked.contains(&slot.to_string()) {
            return Some(slot);
        }
        minutes += SLOT_STEP_MINUTES;
    }
    None
}

/// The dialogue decision engine, shared across sessions
pub struct TurnEngine {
    catalog: ServiceCatalog,
    backend: Option<Arc<dyn ChatBackend>>,
    stats: Arc<BookingStats>,
    meridiem_policy: MeridiemPolicy,
}

impl TurnEngine {
    pub fn new(catalog: ServiceCatalog, backend: Option<Arc<dyn ChatBackend>>) -> Self {
        Self {
            catalog,
            backend,
            stats: Arc::new(BookingStats::new()),
            meridiem_policy: default_meridiem_policy,
        }
    }

    /// Override the ambiguous Hindi hour policy
    pub fn with_meridiem_policy(mut self, policy: MeridiemPolicy) -> Self {
        self.meridiem_policy = policy;
        self
    }

    pub fn stats(&self) -> Arc<BookingStats> {
        Arc::clone(&self.stats)
    }

    /// Process one conversational turn against today's date.
    pub async fn process_turn(&self, session: &mut BookingSession, transcript: &str) -> TurnResponse {
        self.process_turn_at(session, transcript, Local::now().date_naive()).await
    }

    /// [`process_turn`](Self::process_turn) with an injected "today",
    /// which date extraction and tests pivot on.
    pub async fn process_turn_at(
        &self,
        session: &mut BookingSession,
        transcript: &str,
        today: NaiveDate,
    ) -> TurnResponse {
        session.update(transcript, today, self.meridiem_policy);

        let language = session.language;
        let templates = ReplyTemplates::new(language);
        let collected = session.data.clone();
        let missing = collected.next_missing();
        let lower = transcript.to_lowercase();

        // 1. Slot conflict
        if let (None, Some(time)) = (missing, collected.time) {
            let booked = self.catalog.booked_slots(language);
            if booked.contains(&time.to_string()) {
                session.data.time = None;
                let reply = match find_alternate_slot(time, booked) {
                    Some(alternate) => {
                        templates.conflict_offer(&time.to_string(), &alternate.to_string())
                    }
                    None => templates.conflict_no_alternate(&time.to_string()),
                };
                info!(requested = %time, "slot conflict, re-asking for time");
                return TurnResponse::ongoing(transcript, reply, language, collected);
            }
        }

        // 2. Explicit confirmation
        let confirmed = confirmation_words(language).iter().any(|w| lower.contains(w));
        if missing.is_none() && confirmed {
            let service = collected.service.clone().unwrap_or_default();
            let price = self.catalog.price_for(&service, language).unwrap_or(0);
            self.stats.record_booking(price);

            let reply = templates.booking_confirmed(
                &service,
                collected.name.as_deref().unwrap_or_default(),
                &collected.date_spoken().unwrap_or_default(),
                &collected.time.map(|t| t.to_string()).unwrap_or_default(),
            );
            info!(%service, price, "booking finalized");
            return TurnResponse::finalized(transcript, reply, language, collected, price);
        }

        // 3. Explicit rejection (fires mid-collection too)
        if rejection_words(language).iter().any(|w| lower.contains(w)) {
            session.data.time = None;
            info!("rejection word heard, clearing time slot");
            return TurnResponse::ongoing(
                transcript,
                templates.rejection_reask(),
                language,
                collected,
            );
        }

        // 4. Default: chat model with grounding context
        let reply = self.default_reply(&collected, missing, transcript, &lower, language).await;
        TurnResponse::ongoing(transcript, reply, language, collected)
    }

    async fn default_reply(
        &self,
        collected: &fleur_core::BookingData,
        missing: Option<SlotKind>,
        transcript: &str,
        lower: &str,
        language: Language,
    ) -> String {
        let templates = ReplyTemplates::new(language);
        let Some(backend) = self.backend.as_ref().filter(|b| b.is_available()) else {
            return templates.llm_unavailable().to_string();
        };

        let mut builder = PromptBuilder::new(language).context_line(format!(
            "Business hours: {}. Location: {}.",
            self.catalog.hours(language),
            self.catalog.location(language)
        ));

        if let Some(service) = collected.service.as_deref() {
            if let Some(info) = self.catalog.info_for(service, language) {
                builder = builder.context_line(format!(
                    "Details for '{service}': Price ₹{}, Duration {} minutes.",
                    info.price, info.duration_min
                ));
            }
        }

        if missing == Some(SlotKind::Time) || lower.contains("time") || lower.contains("available")
        {
            let booked = self.catalog.booked_slots(language);
            if booked.is_empty() {
                builder = builder.context_line(
                    "No slots are currently booked. Our working hours are 9 AM to 9 PM.",
                );
            } else {
                let mut slots: Vec<&str> = booked.iter().map(String::as_str).collect();
                slots.sort_unstable();
                builder = builder.context_line(format!(
                    "Currently booked slots are: {}. Our working hours are 9 AM to 9 PM.",
                    slots.join(", ")
                ));
            }
        }

        let task = match missing {
            Some(slot) => format!("ask for the user's {slot}."),
            None => {
                let service = collected.service.as_deref().unwrap_or_default();
                let price = self.catalog.price_for(service, language).unwrap_or(0);
                format!(
                    "confirm the booking for a {service} for {} on {} at {}. \
                     State that the price is ₹{price} and ask for a final 'yes' to confirm.",
                    collected.name.as_deref().unwrap_or_default(),
                    collected.date_spoken().unwrap_or_default(),
                    collected.time.map(|t| t.to_string()).unwrap_or_default(),
                )
            }
        };

        let messages = builder.collected(collected).transcript(transcript).task(task).build();

        match backend.complete(&messages).await {
            Ok(reply) if !reply.is_empty() => reply,
            Ok(_) => templates.llm_error().to_string(),
            Err(error) => {
                warn!(%error, "chat backend failed, degrading to apology");
                templates.llm_error().to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn booked() -> HashSet<String> {
        ["10:00 am", "2:00 pm", "5:30 pm"]
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_alternate_slot_skips_booked() {
        let requested = CanonicalTime::parse("2:00 pm").unwrap();
        let alternate = find_alternate_slot(requested, &booked()).unwrap();
        assert_eq!(alternate.to_string(), "2:30 pm");
    }

    #[test]
    fn test_alternate_slot_clamps_to_opening() {
        let requested = CanonicalTime::parse("7:00 am").unwrap();
        let alternate = find_alternate_slot(requested, &booked()).unwrap();
        assert_eq!(alternate.to_string(), "9:00 am");
    }

    #[test]
    fn test_alternate_slot_none_after_close() {
        let requested = CanonicalTime::parse("9:30 pm").unwrap();
        assert_eq!(find_alternate_slot(requested, &booked()), None);
    }

    #[test]
    fn test_alternate_slot_consecutive_bookings() {
        let booked: HashSet<String> = ["2:00 pm", "2:30 pm", "3:00 pm"]
            .into_iter()
            .map(str::to_string)
            .collect();
        let requested = CanonicalTime::parse("2:00 pm").unwrap();
        let alternate = find_alternate_slot(requested, &booked).unwrap();
        assert_eq!(alternate.to_string(), "3:30 pm");
    }
}
