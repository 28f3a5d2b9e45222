//! Name extraction
//!
//! Two strategies, first success wins: an explicit self-introduction phrase
//! in either script, or a short bare utterance (1-3 word tokens) that is
//! not confusable with domain vocabulary. Captured names are stripped of
//! non-name characters and title-cased.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// Words a short bare utterance may not contain and still count as a name.
const STOP_WORDS: &[&str] =
    &["pm", "am", "yes", "no", "ok", "book", "date", "time", "service", "हाँ", "नहीं"];

static INTRO_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(
            r"(?i)(?:my name is|this is|i am|call me|named|under the name|put it under the name)\s+([a-z\s\-]+)",
        )
        .expect("valid regex"),
        // The honorific tail (हूँ/है) is optional, so the capture is anchored
        // to the end of the utterance to keep it from going lazy-minimal.
        Regex::new(r"(?:मेरा नाम|नाम है|मैं|मेरे नाम से|के नाम से)\s+([\w\s]+?)\s*(?:हूँ|हूं|है)?\s*$")
            .expect("valid regex"),
    ]
});

static NON_NAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z\s\-\u{0900}-\u{097F}]").expect("valid regex"));

static WORD_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\w\-]+").expect("valid regex"));

/// Uppercase the first letter of each word (and each hyphenated part).
/// Devanagari has no case and passes through unchanged.
fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            word.split('-')
                .map(|part| {
                    let mut graphemes = part.graphemes(true);
                    match graphemes.next() {
                        Some(first) => first.to_uppercase() + graphemes.as_str(),
                        None => String::new(),
                    }
                })
                .collect::<Vec<_>>()
                .join("-")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pull a personal name out of the transcript, or `None` to re-ask later.
pub fn extract_name(transcript: &str) -> Option<String> {
    for pattern in INTRO_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(transcript) {
            let raw = caps.get(1)?.as_str();
            let cleaned = NON_NAME_CHARS.replace_all(raw, "");
            let cleaned = cleaned.trim();
            if !cleaned.is_empty() {
                return Some(title_case(cleaned));
            }
        }
    }

    let words: Vec<&str> = transcript.split_whitespace().collect();
    if (1..=3).contains(&words.len()) && words.iter().all(|w| WORD_TOKEN.is_match(w)) {
        let has_stop_word = words
            .iter()
            .any(|w| STOP_WORDS.contains(&w.to_lowercase().as_str()));
        if !has_stop_word {
            return Some(title_case(&words.join(" ")));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_introduction() {
        assert_eq!(
            extract_name("my name is anjali verma"),
            Some("Anjali Verma".to_string())
        );
        assert_eq!(extract_name("call me rahul"), Some("Rahul".to_string()));
        assert_eq!(
            extract_name("put it under the name priya mehta"),
            Some("Priya Mehta".to_string())
        );
    }

    #[test]
    fn test_hindi_introduction() {
        assert_eq!(
            extract_name("मेरा नाम अंजलि वर्मा है"),
            Some("अंजलि वर्मा".to_string())
        );
        assert_eq!(extract_name("मैं रोहित हूँ"), Some("रोहित".to_string()));
    }

    #[test]
    fn test_bare_short_utterance() {
        assert_eq!(extract_name("anjali verma"), Some("Anjali Verma".to_string()));
        assert_eq!(extract_name("rahul"), Some("Rahul".to_string()));
        assert_eq!(
            extract_name("anne-marie d'souza"),
            Some("Anne-Marie D'souza".to_string())
        );
    }

    #[test]
    fn test_bare_utterance_too_long() {
        assert_eq!(extract_name("i want to book something"), None);
        // Four clean tokens are still too many to be a name.
        assert_eq!(extract_name("raj kumar singh yadav"), None);
    }

    #[test]
    fn test_stop_words_block_bare_path() {
        assert_eq!(extract_name("yes"), None);
        assert_eq!(extract_name("4 pm"), None);
        assert_eq!(extract_name("book now"), None);
    }

    #[test]
    fn test_hindi_yes_no_are_not_names() {
        assert_eq!(extract_name("हाँ"), None);
        assert_eq!(extract_name("नहीं"), None);
    }

    #[test]
    fn test_empty() {
        assert_eq!(extract_name(""), None);
        assert_eq!(extract_name("   "), None);
    }
}
