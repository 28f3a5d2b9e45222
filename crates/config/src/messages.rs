//! Per-language reply templates
//!
//! The scripted turns (conflict, rejection, final confirmation, degraded
//! fallbacks) answer from these templates instead of the language model so
//! the wording stays deterministic.

use fleur_core::Language;

/// Canned replies in one language
#[derive(Debug, Clone, Copy)]
pub struct ReplyTemplates {
    language: Language,
}

impl ReplyTemplates {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    /// Requested slot is taken; offer the nearest free one
    pub fn conflict_offer(&self, requested: &str, alternate: &str) -> String {
        match self.language {
            Language::English => {
                format!("{requested} is booked. Would {alternate} work instead?")
            }
            Language::Hindi => {
                format!("{requested} स्लॉट भरा हुआ है। क्या {alternate} सही रहेगा?")
            }
        }
    }

    /// Requested slot is taken and no free slot remains today
    pub fn conflict_no_alternate(&self, requested: &str) -> String {
        match self.language {
            Language::English => format!(
                "{requested} is booked and no other slot is free today. \
                 Would another day work?"
            ),
            Language::Hindi => format!(
                "{requested} स्लॉट भरा हुआ है और आज कोई और स्लॉट खाली नहीं है। \
                 क्या किसी और दिन बुक करें?"
            ),
        }
    }

    /// User rejected the current time; re-ask for it
    pub fn rejection_reask(&self) -> &'static str {
        match self.language {
            Language::English => "Okay, what time would you prefer instead?",
            Language::Hindi => "ठीक है, आप कौन सा समय चाहेंगे?",
        }
    }

    /// Final booking confirmation
    pub fn booking_confirmed(&self, service: &str, name: &str, date: &str, time: &str) -> String {
        match self.language {
            Language::English => format!(
                "Thank you, your appointment for a {service} is booked for {name} \
                 at {time} on {date}."
            ),
            Language::Hindi => format!(
                "धन्यवाद, आपकी {service} के लिए अपॉइंटमेंट {name} के नाम से \
                 {date} को {time} बजे बुक हो गई है।"
            ),
        }
    }

    /// Language model unreachable (no client configured)
    pub fn llm_unavailable(&self) -> &'static str {
        match self.language {
            Language::English => {
                "I'm sorry, my AI brain is not connected right now. Please try again later."
            }
            Language::Hindi => {
                "माफ़ कीजिए, अभी मेरा सिस्टम उपलब्ध नहीं है। कृपया थोड़ी देर बाद कोशिश करें।"
            }
        }
    }

    /// Language model call failed mid-turn
    pub fn llm_error(&self) -> &'static str {
        match self.language {
            Language::English => {
                "I'm sorry, I'm having a little trouble understanding. Could you please repeat?"
            }
            Language::Hindi => {
                "माफ़ कीजिए, मुझे समझने में थोड़ी दिक्कत हो रही है। कृपया दोहराएँ।"
            }
        }
    }
}

/// Words that mean "yes, book it" in containment matching
pub fn confirmation_words(language: Language) -> &'static [&'static str] {
    match language {
        Language::English => &[
            "yes", "perfect", "confirm", "sure", "book it", "yeah", "ok", "correct", "right",
        ],
        Language::Hindi => &["हाँ", "पक्का", "ठीक है", "कर दो"],
    }
}

/// Words that mean "no / change that" in containment matching
pub fn rejection_words(language: Language) -> &'static [&'static str] {
    match language {
        Language::English => &["no", "change", "not", "nope"],
        Language::Hindi => &["नहीं", "बदल"],
    }
}
