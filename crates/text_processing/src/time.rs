//! Time phrase normalization and the per-turn extraction chain
//!
//! [`normalize_time_phrase`] turns one suspected time substring into a
//! [`CanonicalTime`]. [`extract_time`] runs the full ordered fallback chain
//! over a whole utterance: special-word substitution, the Hindi बजे
//! grammar, number-word translation plus generic pattern scanning, and a
//! last-resort permissive digit parse.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use fleur_core::{CanonicalTime, Language, Meridiem};

use crate::chain::first_success;
use crate::hindi::{
    extract_hindi_time, normalize_special_times, repair_asr_artifacts, MeridiemPolicy,
};

static QUARTER_PAST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"quarter past (\d{1,2})").expect("valid regex"));
static HALF_PAST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"half past (\d{1,2})").expect("valid regex"));
static QUARTER_TO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"quarter to (\d{1,2})").expect("valid regex"));
static O_CLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})\s*o'?clock").expect("valid regex"));
static CLOCK_AMPM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})(?::(\d{2}))?\s*(am|pm)").expect("valid regex"));
static CLOCK_24H: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([01]?[0-9]|2[0-3]):([0-5][0-9])\b").expect("valid regex"));

/// Generic time-bearing substrings, scanned in order over pre-translated
/// text. The first hit is handed to [`normalize_time_phrase`]. Each pattern
/// swallows a flanking am/pm token (and a trailing "o'clock" left over from
/// बजे translation) so the normalizer keeps the meridiem context.
static TIME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?:(?:am|pm)\s+)?quarter past \d{1,2}(?:\s*o'?clock)?(?:\s*(?:am|pm))?",
        r"(?:(?:am|pm)\s+)?half past \d{1,2}(?:\s*o'?clock)?(?:\s*(?:am|pm))?",
        r"(?:(?:am|pm)\s+)?quarter to \d{1,2}(?:\s*o'?clock)?(?:\s*(?:am|pm))?",
        r"\d{1,2}(:\d{2})?\s*(am|pm)",
        r"\b([01]?[0-9]|2[0-3]):[0-5][0-9]\b",
        r"(?:(?:am|pm)\s+)?\d{1,2}\s*o'?clock(?:\s*(?:am|pm))?",
        r"(?:around|about|sharp)\s*\d{1,2}(:\d{2})?\s*(am|pm)?",
        r"(midnight|noon)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

/// Any hour outside 1–12 wraps into the 12-hour range instead of being
/// rejected.
fn fold_hour(hour: u32) -> u32 {
    ((hour + 11) % 12) + 1
}

/// Meridiem from an explicit am/pm token in the phrase, else from the
/// spoken-hour heuristic (12 and above reads as afternoon).
fn infer_meridiem(phrase: &str, hour: u32) -> Meridiem {
    if phrase.contains("pm") || (hour >= 12 && !phrase.contains("am")) {
        Meridiem::Pm
    } else {
        Meridiem::Am
    }
}

/// Normalize one time phrase to canonical form, first matching rule wins:
/// idioms, "H o'clock", explicit `H[:MM] am|pm`, 24-hour `HH:MM`,
/// midnight/noon. Returns `None` when nothing matches.
pub fn normalize_time_phrase(phrase: &str) -> Option<CanonicalTime> {
    let t = phrase.to_lowercase();
    let t = t.trim();

    if let Some(caps) = QUARTER_PAST.captures(t) {
        let h: u32 = caps[1].parse().ok()?;
        return CanonicalTime::new(fold_hour(h), 15, infer_meridiem(t, h));
    }

    if let Some(caps) = HALF_PAST.captures(t) {
        let h: u32 = caps[1].parse().ok()?;
        return CanonicalTime::new(fold_hour(h), 30, infer_meridiem(t, h));
    }

    if let Some(caps) = QUARTER_TO.captures(t) {
        let h: u32 = caps[1].parse().ok()?;
        // Meridiem follows the hour the speaker said, before the decrement,
        // so "quarter to 1" lands on 12:45 am.
        let meridiem = infer_meridiem(t, h);
        let prev = if h > 1 { h - 1 } else { 12 };
        return CanonicalTime::new(fold_hour(prev), 45, meridiem);
    }

    if let Some(caps) = O_CLOCK.captures(t) {
        let h: u32 = caps[1].parse().ok()?;
        return CanonicalTime::new(fold_hour(h), 0, infer_meridiem(t, h));
    }

    if let Some(caps) = CLOCK_AMPM.captures(t) {
        let h: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps.get(2).map_or(Some(0), |m| m.as_str().parse().ok())?;
        let meridiem = if &caps[3] == "pm" { Meridiem::Pm } else { Meridiem::Am };
        return CanonicalTime::new(fold_hour(h), minute, meridiem);
    }

    if let Some(caps) = CLOCK_24H.captures(t) {
        let h: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps[2].parse().ok()?;
        return CanonicalTime::from_hm24(h, minute);
    }

    if t.contains("midnight") {
        return CanonicalTime::new(12, 0, Meridiem::Am);
    }
    if t.contains("noon") {
        return CanonicalTime::new(12, 0, Meridiem::Pm);
    }

    None
}

const ENGLISH_NUMBER_WORDS: &[(&str, &str)] = &[
    ("one", "1"),
    ("two", "2"),
    ("three", "3"),
    ("four", "4"),
    ("five", "5"),
    ("six", "6"),
    ("seven", "7"),
    ("eight", "8"),
    ("nine", "9"),
    ("ten", "10"),
    ("eleven", "11"),
    ("twelve", "12"),
];

const HINDI_TIME_WORDS: &[(&str, &str)] = &[
    ("एक", "1"),
    ("दो", "2"),
    ("तीन", "3"),
    ("चार", "4"),
    ("पांच", "5"),
    ("पाँच", "5"),
    ("छह", "6"),
    ("सात", "7"),
    ("आठ", "8"),
    ("नौ", "9"),
    ("दस", "10"),
    ("ग्यारह", "11"),
    ("बारह", "12"),
    ("बजे", "o'clock"),
    ("सुबह", "am"),
    ("शाम", "pm"),
    ("रात", "pm"),
    ("दोपहर", "pm"),
];

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

fn replace_word(text: &str, word: &str, replacement: &str) -> String {
    let pattern = format!(r"\b{}\b", regex::escape(word));
    match Regex::new(&pattern) {
        Ok(re) => re.replace_all(text, replacement).into_owned(),
        Err(_) => text.to_string(),
    }
}

/// Translate spelled-out clock vocabulary (and, for Hindi, बजे/meridian
/// words) into digit/English form and collapse whitespace.
fn translate_number_words(text: &str, language: Language) -> String {
    static REDUNDANT_OCLOCK: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(\d{1,2}:\d{2})\s*o'?clock").expect("valid regex"));

    let mut out = text.to_string();
    for (word, digit) in ENGLISH_NUMBER_WORDS {
        out = replace_word(&out, word, digit);
    }
    if language == Language::Hindi {
        for (word, replacement) in HINDI_TIME_WORDS {
            out = replace_word(&out, word, replacement);
        }
    }
    // A बजे translated to "o'clock" after an H:MM reading carries no
    // information and confuses the pattern scan.
    let out = REDUNDANT_OCLOCK.replace_all(&out, "$1");
    WHITESPACE.replace_all(&out, " ").trim().to_string()
}

/// Last resort for digit-bearing text nothing else matched: read the first
/// bare clock reading as a 24-hour time.
fn fuzzy_digit_time(text: &str) -> Option<CanonicalTime> {
    static BARE_CLOCK: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"\b(\d{1,2})(?::(\d{2}))?\b").expect("valid regex"));
    let caps = BARE_CLOCK.captures(text)?;
    let hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps.get(2).map_or(Some(0), |m| m.as_str().parse().ok())?;
    CanonicalTime::from_hm24(hour, minute)
}

/// Full per-turn time extraction: ordered fallback chain, first success
/// wins, `None` when every stage misses (the slot is simply re-asked).
pub fn extract_time(
    transcript: &str,
    language: Language,
    policy: MeridiemPolicy,
) -> Option<CanonicalTime> {
    let raw = transcript.to_lowercase();
    let substituted = normalize_special_times(&raw);

    // The बजे grammar scans the original text (it needs untouched numeral
    // words). When the special-word pre-pass rewrote the utterance, the
    // rewrite feeds the generic normalizer instead: the grammar would read
    // "साढ़े तीन बजे" as exactly three.
    if language == Language::Hindi && substituted == raw {
        if let Some(padded) = extract_hindi_time(&raw, policy) {
            debug!(time = %padded, "hindi lexical time matched");
            return CanonicalTime::parse(&padded);
        }
    }

    let repaired = repair_asr_artifacts(&substituted);
    let translated = translate_number_words(&repaired, language);
    debug!(text = %translated, "scanning translated text for time patterns");

    let scan = |text: &str| -> Option<CanonicalTime> {
        TIME_PATTERNS
            .iter()
            .find_map(|pattern| pattern.find(text))
            .and_then(|m| normalize_time_phrase(m.as_str()))
    };
    let fuzzy = |text: &str| -> Option<CanonicalTime> {
        if text.chars().any(|c| c.is_ascii_digit()) {
            fuzzy_digit_time(text)
        } else {
            None
        }
    };

    first_success(&translated, &[&scan, &fuzzy])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hindi::default_meridiem_policy;

    fn norm(s: &str) -> Option<String> {
        normalize_time_phrase(s).map(|t| t.to_string())
    }

    fn extract(s: &str, lang: Language) -> Option<String> {
        extract_time(s, lang, default_meridiem_policy).map(|t| t.to_string())
    }

    #[test]
    fn test_canonical_form_is_idempotent() {
        for h in 1..=12 {
            for mm in [0, 15, 30, 45] {
                for suffix in ["am", "pm"] {
                    let s = format!("{h}:{mm:02} {suffix}");
                    assert_eq!(norm(&s), Some(s));
                }
            }
        }
    }

    #[test]
    fn test_idioms() {
        assert_eq!(norm("quarter past 4"), Some("4:15 am".to_string()));
        assert_eq!(norm("quarter past 4 pm"), Some("4:15 pm".to_string()));
        assert_eq!(norm("half past 3 pm"), Some("3:30 pm".to_string()));
        assert_eq!(norm("quarter to 5"), Some("4:45 am".to_string()));
    }

    #[test]
    fn test_quarter_to_one_wraps_to_midnight_side() {
        assert_eq!(norm("quarter to 1"), Some("12:45 am".to_string()));
    }

    #[test]
    fn test_o_clock() {
        assert_eq!(norm("4 o'clock"), Some("4:00 am".to_string()));
        assert_eq!(norm("4 oclock pm"), Some("4:00 pm".to_string()));
        assert_eq!(norm("14 o'clock"), Some("2:00 pm".to_string()));
    }

    #[test]
    fn test_24_hour_clock() {
        assert_eq!(norm("14:30"), Some("2:30 pm".to_string()));
        assert_eq!(norm("09:05"), Some("9:05 am".to_string()));
        assert_eq!(norm("00:15"), Some("12:15 am".to_string()));
    }

    #[test]
    fn test_hour_folding_in_explicit_form() {
        assert_eq!(norm("13:00 pm"), Some("1:00 pm".to_string()));
    }

    #[test]
    fn test_midnight_noon() {
        assert_eq!(norm("midnight"), Some("12:00 am".to_string()));
        assert_eq!(norm("noon"), Some("12:00 pm".to_string()));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(norm("sometime later"), None);
        assert_eq!(norm(""), None);
    }

    #[test]
    fn test_extract_english_phrases() {
        assert_eq!(extract("let's do 4:30 pm please", Language::English), Some("4:30 pm".to_string()));
        assert_eq!(extract("book me at quarter past 10 am", Language::English), Some("10:15 am".to_string()));
        assert_eq!(extract("four pm works", Language::English), Some("4:00 pm".to_string()));
        assert_eq!(extract("at 14:30", Language::English), Some("2:30 pm".to_string()));
    }

    #[test]
    fn test_extract_hindi_lexical_path() {
        assert_eq!(extract("चार बजे शाम", Language::Hindi), Some("4:00 pm".to_string()));
        assert_eq!(extract("सुबह ग्यारह बजे", Language::Hindi), Some("11:00 am".to_string()));
    }

    #[test]
    fn test_extract_hindi_fused_words() {
        // "डेढ़ बजे" rewrites to "1:30 बजे"; meridiem resolves downstream.
        let got = extract("डेढ़ बजे", Language::Hindi);
        assert!(matches!(got.as_deref(), Some(t) if t.starts_with("1:30")), "got {got:?}");
        assert_eq!(extract("ढाई बजे दोपहर", Language::Hindi), Some("2:30 pm".to_string()));
        assert_eq!(extract("साढ़े तीन बजे शाम", Language::Hindi), Some("3:30 pm".to_string()));
    }

    #[test]
    fn test_extract_asr_artifact_repair() {
        assert_eq!(extract("4 बजे स्राव", Language::Hindi), Some("4:00 pm".to_string()));
    }

    #[test]
    fn test_extract_fuzzy_digit_fallback() {
        assert_eq!(extract("around 16", Language::English), Some("4:00 pm".to_string()));
        assert_eq!(extract("no numbers here", Language::English), None);
    }
}
