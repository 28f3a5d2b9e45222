//! First-success extractor combinator
//!
//! Extraction strategies are ordered lists of pure `text -> Option<T>`
//! functions. Priority lives in the list order, each stage stays
//! independently testable, and the first stage that produces a value wins.

/// Run `extractors` against `text` in order, returning the first success.
pub fn first_success<T>(text: &str, extractors: &[&dyn Fn(&str) -> Option<T>]) -> Option<T> {
    extractors.iter().find_map(|extract| extract(text))
}
