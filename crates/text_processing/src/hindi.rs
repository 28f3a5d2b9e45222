//! Hindi language utilities
//!
//! Shared Hindi text handling: Devanagari number words, fused time-word
//! substitution ("डेढ़", "साढ़े"), ASR artifact repair, and the dedicated
//! बजे time grammar.

use once_cell::sync::Lazy;
use regex::Regex;

use fleur_core::Meridiem;

/// Policy deciding the meridiem of an ambiguous Hindi hour (no सुबह/शाम
/// word present). Kept injectable because the defaulting is a guess about
/// speaker intent, not grammar.
pub type MeridiemPolicy = fn(u32) -> Meridiem;

/// Default ambiguous-hour policy: 1–7 reads as afternoon/evening, the rest
/// as morning. "चार बजे" is far more often 4 pm than 4 am in a salon.
pub fn default_meridiem_policy(hour: u32) -> Meridiem {
    if (1..=7).contains(&hour) {
        Meridiem::Pm
    } else {
        Meridiem::Am
    }
}

/// Convert a Hindi hour word (Devanagari script) to its numeric value.
///
/// Only the clock range 1–12 is handled; spelling variants included.
pub fn word_to_number(word: &str) -> Option<u32> {
    match word {
        "एक" => Some(1),
        "दो" => Some(2),
        "तीन" => Some(3),
        "चार" => Some(4),
        "पांच" | "पाँच" => Some(5),
        "छह" | "छः" | "छे" => Some(6),
        "सात" => Some(7),
        "आठ" => Some(8),
        "नौ" => Some(9),
        "दस" => Some(10),
        "ग्यारह" => Some(11),
        "बारह" => Some(12),
        _ => None,
    }
}

/// Fused Hindi time words that rewrite to a digit or English idiom, feeding
/// the generic normalizer downstream (not the बजे grammar).
const SPECIAL_HINDI_TIMES: &[(&str, &str)] = &[
    ("डेढ़", "1:30"),
    ("ढाई", "2:30"),
    ("सवा", "quarter past"),
    ("पौने", "quarter to"),
    ("साढ़े", "half past"),
];

/// Midnight/noon vocabulary in both scripts.
const SPECIAL_TIMES_GENERAL: &[(&str, &str)] = &[
    ("midnight", "12:00 am"),
    ("noon", "12:00 pm"),
    ("मध्यरात्रि", "12:00 am"),
    ("दोपहर बारह", "12:00 pm"),
    ("रात बारह", "12:00 am"),
];

fn replace_word(text: &str, word: &str, replacement: &str) -> String {
    // Word-bounded, case-insensitive replacement; \b is Unicode-aware so it
    // works for Devanagari too.
    let pattern = format!(r"(?i)\b{}\b", regex::escape(word));
    match Regex::new(&pattern) {
        Ok(re) => re.replace_all(text, replacement).into_owned(),
        Err(_) => text.to_string(),
    }
}

/// Rewrite special time vocabulary (midnight/noon both scripts, then the
/// fused Hindi words) in place.
pub fn normalize_special_times(text: &str) -> String {
    let mut out = text.to_string();
    for (word, replacement) in SPECIAL_TIMES_GENERAL {
        out = replace_word(&out, word, replacement);
    }
    for (word, replacement) in SPECIAL_HINDI_TIMES {
        out = replace_word(&out, word, replacement);
    }
    out
}

static ASR_SHAAM_AFTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*बजे\s*स्राव").expect("valid regex"));
static ASR_SHAAM_BEFORE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"स्राव\s*(\d+)\s*बजे").expect("valid regex"));

/// Repair a recurring ASR mishearing: "स्राव" for "शाम" around बजे phrases.
pub fn repair_asr_artifacts(text: &str) -> String {
    let out = ASR_SHAAM_AFTER.replace_all(text, "$1 बजे शाम");
    let out = ASR_SHAAM_BEFORE.replace_all(&out, "शाम $1 बजे");
    out.replace("स्राव", "शाम")
}

static HINDI_TIME: Lazy<Regex> = Lazy::new(|| {
    // [meridian-word] number-word[:MM] बजे [meridian-word]
    Regex::new(
        r"(?:(सुबह|शाम|रात|दोपहर)\s*)?(एक|दो|तीन|चार|पांच|पाँच|छह|छः|छे|सात|आठ|नौ|दस|ग्यारह|बारह)(?::(\d{2}))?\s*बजे\s*(?:(सुबह|शाम|रात|दोपहर))?",
    )
    .expect("valid regex")
});

/// Extract a Hindi lexical time ("चार बजे शाम") as a padded
/// `HH:MM am|pm` string. The caller re-canonicalizes before storing.
///
/// The meridian word may sit before or after the numeral+बजे anchor. With
/// no meridian word at all, `policy` decides.
pub fn extract_hindi_time(text: &str, policy: MeridiemPolicy) -> Option<String> {
    let caps = HINDI_TIME.captures(text)?;

    let meridian_word = caps
        .get(1)
        .or_else(|| caps.get(4))
        .map(|m| m.as_str());
    let hour = word_to_number(caps.get(2)?.as_str())?;
    let minutes: u32 = caps
        .get(3)
        .map(|m| m.as_str().parse().unwrap_or(0))
        .unwrap_or(0);

    let meridiem = match meridian_word {
        Some("सुबह") => Meridiem::Am,
        Some("शाम") | Some("रात") | Some("दोपहर") => Meridiem::Pm,
        _ => policy(hour),
    };

    Some(format!("{hour:02}:{minutes:02} {meridiem}"))
}
