//! Service matching
//!
//! Exact substring containment of each known synonym or transliteration
//! against the lowercased utterance, in declaration order. No fuzzy
//! matching; the synonym tables already carry the ASR variants worth
//! accepting.

use tracing::debug;

use fleur_config::service_synonyms;

/// Map an utterance to a canonical service key, first synonym hit wins.
pub fn match_service(utterance: &str) -> Option<&'static str> {
    let text = utterance.to_lowercase();
    for (service, synonyms) in service_synonyms() {
        if synonyms.iter().any(|syn| text.contains(syn)) {
            debug!(service, "service synonym matched");
            return Some(service);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_synonyms() {
        assert_eq!(match_service("I'd like a haircut please"), Some("haircut"));
        assert_eq!(match_service("just a quick cut"), Some("haircut"));
        assert_eq!(match_service("book me a Hair Spa"), Some("hair spa"));
    }

    #[test]
    fn test_hindi_synonyms() {
        assert_eq!(match_service("मुझे बाल कटाना है"), Some("haircut"));
        assert_eq!(match_service("मेहंदी लगवानी है"), Some("henna"));
        assert_eq!(match_service("फेशियल करवाना है"), Some("facial"));
    }

    #[test]
    fn test_declaration_order_wins() {
        // Mentions two services; the earlier declaration wins.
        assert_eq!(match_service("a facial and a pedicure"), Some("facial"));
        // The broad word "cut" belongs to the haircut group.
        assert_eq!(match_service("an undercut look"), Some("haircut"));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(match_service("what are your hours"), None);
        assert_eq!(match_service(""), None);
    }
}
