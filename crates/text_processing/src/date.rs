//! Date extraction
//!
//! Hindi month and relative-day vocabulary is rewritten to English first,
//! then the text goes through a permissive parse: relative words, day+month
//! phrases in either order, numeric day/month dates, and a bare day-of-month
//! fallback defaulting unresolved components to today. A date strictly
//! before today is rejected; no past-dated bookings.

use chrono::{Datelike, Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use fleur_core::Language;

const HINDI_DATE_WORDS: &[(&str, &str)] = &[
    ("जनवरी", "january"),
    ("फरवरी", "february"),
    ("मार्च", "march"),
    ("अप्रैल", "april"),
    ("मई", "may"),
    ("जून", "june"),
    ("जुलाई", "july"),
    ("अगस्त", "august"),
    ("सितंबर", "september"),
    ("अक्टूबर", "october"),
    ("नवंबर", "november"),
    ("दिसंबर", "december"),
    ("आज", "today"),
    ("कल", "tomorrow"),
    ("परसों", "day after tomorrow"),
];

fn month_number(word: &str) -> Option<u32> {
    let months = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];
    let word = word.trim_end_matches('.');
    months
        .iter()
        .position(|m| *m == word || (word.len() >= 3 && m.starts_with(word)))
        .map(|i| i as u32 + 1)
}

static DAY_MONTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2})(?:st|nd|rd|th)?\s+([a-z]+\.?)(?:\s+(\d{4}))?").expect("valid regex")
});
static MONTH_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([a-z]+\.?)\s+(\d{1,2})(?:st|nd|rd|th)?(?:,?\s+(\d{4}))?").expect("valid regex")
});
static NUMERIC_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2})[/-](\d{1,2})(?:[/-](\d{2,4}))?\b").expect("valid regex")
});
static ORDINAL_DAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})(?:st|nd|rd|th)\b").expect("valid regex"));
static BARE_DAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{1,2})\b").expect("valid regex"));

fn replace_word(text: &str, word: &str, replacement: &str) -> String {
    let pattern = format!(r"\b{}\b", regex::escape(word));
    match Regex::new(&pattern) {
        Ok(re) => re.replace_all(text, replacement).into_owned(),
        Err(_) => text.to_string(),
    }
}

fn year_from(capture: Option<regex::Match<'_>>, default: i32) -> i32 {
    match capture {
        Some(m) => {
            let y: i32 = m.as_str().parse().unwrap_or(default);
            if y < 100 {
                2000 + y
            } else {
                y
            }
        }
        None => default,
    }
}

fn parse_day_month(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    for caps in DAY_MONTH.captures_iter(text) {
        let Some(month) = month_number(&caps[2]) else { continue };
        let day: u32 = caps[1].parse().ok()?;
        let year = year_from(caps.get(3), today.year());
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some(date);
        }
    }
    None
}

fn parse_month_day(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    for caps in MONTH_DAY.captures_iter(text) {
        let Some(month) = month_number(&caps[1]) else { continue };
        let day: u32 = caps[2].parse().ok()?;
        let year = year_from(caps.get(3), today.year());
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some(date);
        }
    }
    None
}

fn parse_numeric(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let caps = NUMERIC_DATE.captures(text)?;
    let a: u32 = caps[1].parse().ok()?;
    let b: u32 = caps[2].parse().ok()?;
    let year = year_from(caps.get(3), today.year());
    // Day-first reading, swapped when only the other order is valid.
    NaiveDate::from_ymd_opt(year, b, a).or_else(|| NaiveDate::from_ymd_opt(year, a, b))
}

fn parse_bare_day(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let caps = ORDINAL_DAY
        .captures(text)
        .or_else(|| BARE_DAY.captures(text))?;
    let day: u32 = caps[1].parse().ok()?;
    if !(1..=31).contains(&day) {
        return None;
    }
    NaiveDate::from_ymd_opt(today.year(), today.month(), day)
}

/// Resolve a spoken date against `today`. Past dates are treated as a miss.
pub fn resolve_date(transcript: &str, language: Language, today: NaiveDate) -> Option<NaiveDate> {
    let mut text = transcript.to_lowercase();
    if language == Language::Hindi {
        for (word, replacement) in HINDI_DATE_WORDS {
            text = replace_word(&text, word, replacement);
        }
    }

    let resolved = if text.contains("day after tomorrow") {
        Some(today + Duration::days(2))
    } else if text.contains("tomorrow") {
        Some(today + Duration::days(1))
    } else if text.contains("today") {
        Some(today)
    } else {
        parse_day_month(&text, today)
            .or_else(|| parse_month_day(&text, today))
            .or_else(|| parse_numeric(&text, today))
            .or_else(|| parse_bare_day(&text, today))
    }?;

    if resolved < today {
        debug!(%resolved, "spoken date is in the past, rejecting");
        return None;
    }
    Some(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 25).unwrap()
    }

    #[test]
    fn test_relative_words() {
        assert_eq!(resolve_date("today please", Language::English, today()), Some(today()));
        assert_eq!(
            resolve_date("tomorrow", Language::English, today()),
            NaiveDate::from_ymd_opt(2026, 8, 26)
        );
        assert_eq!(
            resolve_date("day after tomorrow", Language::English, today()),
            NaiveDate::from_ymd_opt(2026, 8, 27)
        );
    }

    #[test]
    fn test_hindi_relative_words() {
        assert_eq!(
            resolve_date("कल का समय", Language::Hindi, today()),
            NaiveDate::from_ymd_opt(2026, 8, 26)
        );
        assert_eq!(
            resolve_date("परसों", Language::Hindi, today()),
            NaiveDate::from_ymd_opt(2026, 8, 27)
        );
    }

    #[test]
    fn test_day_month_phrases() {
        assert_eq!(
            resolve_date("on the 30th august", Language::English, today()),
            NaiveDate::from_ymd_opt(2026, 8, 30)
        );
        assert_eq!(
            resolve_date("september 3", Language::English, today()),
            NaiveDate::from_ymd_opt(2026, 9, 3)
        );
        assert_eq!(
            resolve_date("5 september 2027", Language::English, today()),
            NaiveDate::from_ymd_opt(2027, 9, 5)
        );
    }

    #[test]
    fn test_hindi_month_names() {
        assert_eq!(
            resolve_date("30 अगस्त", Language::Hindi, today()),
            NaiveDate::from_ymd_opt(2026, 8, 30)
        );
    }

    #[test]
    fn test_numeric_dates() {
        assert_eq!(
            resolve_date("28/8", Language::English, today()),
            NaiveDate::from_ymd_opt(2026, 8, 28)
        );
        assert_eq!(
            resolve_date("28/8/2027", Language::English, today()),
            NaiveDate::from_ymd_opt(2027, 8, 28)
        );
    }

    #[test]
    fn test_bare_day_of_month() {
        assert_eq!(
            resolve_date("the 28th works", Language::English, today()),
            NaiveDate::from_ymd_opt(2026, 8, 28)
        );
        assert_eq!(
            resolve_date("28", Language::English, today()),
            NaiveDate::from_ymd_opt(2026, 8, 28)
        );
    }

    #[test]
    fn test_past_dates_rejected() {
        assert_eq!(resolve_date("1 january", Language::English, today()), None);
        assert_eq!(resolve_date("24/8", Language::English, today()), None);
        assert_eq!(resolve_date("the 3rd", Language::English, today()), None);
    }

    #[test]
    fn test_no_date_content() {
        assert_eq!(resolve_date("i would like a haircut", Language::English, today()), None);
        assert_eq!(resolve_date("", Language::English, today()), None);
    }
}
