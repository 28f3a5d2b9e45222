//! Salon service catalog and business facts
//!
//! Static business data: which services exist, what they cost, how long
//! they take, which slots are already taken, and the synonym tables the
//! service matcher scans. Pricing is duplicated per language with
//! language-appropriate keys; a canonical key missing from the active
//! language's table falls back to the English table, since price is a
//! language-independent business fact.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use fleur_core::Language;

/// Opening time of the booking grid, minutes from midnight (9:00 am)
pub const OPEN_MINUTES: u32 = 9 * 60;
/// Closing time of the booking grid, minutes from midnight (9:00 pm)
pub const CLOSE_MINUTES: u32 = 21 * 60;
/// Granularity of the booking grid
pub const SLOT_STEP_MINUTES: u32 = 30;

/// Price and duration for one service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// Price in INR
    pub price: u32,
    /// Appointment duration in minutes
    pub duration_min: u32,
}

/// Synonyms and transliterations per canonical service key, in declaration
/// order. The matcher tries them in this order and the first containment
/// hit wins, so broader words ("cut") sit after the specific phrases that
/// contain them.
pub fn service_synonyms() -> &'static [(&'static str, &'static [&'static str])] {
    &[
        ("haircut", &["haircut", "hair cut", "cut", "बाल काटना", "बाल कटाना", "हेयरकट", "हेयर कट"]),
        ("hair color", &["hair color", "हेयर कलर", "बाल रंगना", "रंगना"]),
        ("styling", &["styling", "स्टाइलिंग", "सजावट"]),
        ("facial", &["facial", "फेशियल", "चेहरा"]),
        ("party makeup", &["party makeup", "पार्टी मेकअप", "मेकअप"]),
        ("bridal makeup", &["bridal makeup", "ब्राइडल मेकअप", "शादी का मेकअप"]),
        ("massage", &["massage", "मालिश", "स्पा"]),
        ("manicure", &["manicure", "मैनिकॉर", "हाथों की देखभाल"]),
        ("pedicure", &["pedicure", "पेडीकॉर", "पैरों की देखभाल"]),
        ("waxing", &["waxing", "वैक्सिंग", "मोम"]),
        ("threading", &["threading", "थ्रेडिंग", "बाल हटाना"]),
        ("beard trim", &["beard trim", "दाढ़ी ट्रिम", "दाढ़ी काटना"]),
        ("shave", &["shave", "शेव", "मूंछ काटना"]),
        ("hair spa", &["hair spa", "हेयर स्पा"]),
        ("keratin treatment", &["keratin treatment", "केराटिन ट्रीटमेंट"]),
        ("rebonding", &["rebonding", "रीबांडिंग"]),
        ("henna", &["henna", "मेहंदी", "हीना", "मेहंदी लगाना"]),
        ("hair wash", &["hair wash", "बाल धोना"]),
        ("scalp treatment", &["scalp treatment", "स्कैल्प ट्रीटमेंट"]),
        ("detan", &["detan", "डेटन", "डिटैन"]),
        ("nail art", &["nail art", "नेल आर्ट", "नाखून सजावट"]),
    ]
}

/// Per-language slice of the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageCatalog {
    /// Spoken business-hours sentence
    pub hours: String,
    /// Spoken location sentence
    pub location: String,
    /// Priced services, keyed in this language
    pub services: HashMap<String, ServiceInfo>,
    /// Canonical time strings already taken
    pub booked_slots: HashSet<String>,
}

/// The full bilingual catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCatalog {
    pub en: LanguageCatalog,
    pub hi: LanguageCatalog,
}

impl ServiceCatalog {
    fn for_language(&self, language: Language) -> &LanguageCatalog {
        match language {
            Language::English => &self.en,
            Language::Hindi => &self.hi,
        }
    }

    /// Service details in the active language, falling back to English
    pub fn info_for(&self, key: &str, language: Language) -> Option<ServiceInfo> {
        self.for_language(language)
            .services
            .get(key)
            .or_else(|| self.en.services.get(key))
            .copied()
    }

    /// Price lookup with English-catalog fallback
    pub fn price_for(&self, key: &str, language: Language) -> Option<u32> {
        self.info_for(key, language).map(|info| info.price)
    }

    pub fn hours(&self, language: Language) -> &str {
        &self.for_language(language).hours
    }

    pub fn location(&self, language: Language) -> &str {
        &self.for_language(language).location
    }

    /// Canonical time strings already taken for this language's calendar
    pub fn booked_slots(&self, language: Language) -> &HashSet<String> {
        &self.for_language(language).booked_slots
    }
}

fn default_booked_slots() -> HashSet<String> {
    ["10:00 am", "2:00 pm", "5:30 pm"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn services(entries: &[(&str, u32, u32)]) -> HashMap<String, ServiceInfo> {
    entries
        .iter()
        .map(|&(key, price, duration_min)| {
            (key.to_string(), ServiceInfo { price, duration_min })
        })
        .collect()
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self {
            en: LanguageCatalog {
                hours: "We are open daily 9 AM to 9 PM.".to_string(),
                location: "Fleur Salon, Connaught Place, New Delhi.".to_string(),
                services: services(&[
                    ("haircut", 500, 30),
                    ("hair color", 1800, 90),
                    ("styling", 700, 45),
                    ("facial", 1200, 60),
                    ("party makeup", 2000, 90),
                    ("bridal makeup", 5000, 180),
                    ("massage", 1500, 60),
                    ("manicure", 700, 60),
                    ("pedicure", 700, 60),
                    ("nail art", 1000, 60),
                ]),
                booked_slots: default_booked_slots(),
            },
            hi: LanguageCatalog {
                hours: "हम सुबह 9 बजे से रात 9 बजे तक खुले हैं।".to_string(),
                location: "फ्लोर सैलून, कनॉट प्लेस, दिल्ली।".to_string(),
                services: services(&[
                    ("बाल कटना", 500, 30),
                    ("बाल रंगना", 1800, 90),
                    ("सजावट", 700, 45),
                    ("फेशियल", 1200, 60),
                    ("पार्टी मेकअप", 2000, 90),
                    ("ब्राइडल मेकअप", 5000, 180),
                    ("मालिश", 1500, 60),
                    ("मैनिकॉर", 700, 60),
                    ("पेडीकॉर", 700, 60),
                    ("नेल आर्ट", 1000, 60),
                ]),
                booked_slots: default_booked_slots(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_price_lookup() {
        let catalog = ServiceCatalog::default();
        assert_eq!(catalog.price_for("haircut", Language::English), Some(500));
        assert_eq!(
            catalog.info_for("bridal makeup", Language::English).unwrap().duration_min,
            180
        );
    }

    #[test]
    fn test_hindi_falls_back_to_english_catalog() {
        let catalog = ServiceCatalog::default();
        // Canonical keys are English; the Hindi table keys differ, so the
        // fallback carries the price.
        assert_eq!(catalog.price_for("haircut", Language::Hindi), Some(500));
        assert_eq!(catalog.price_for("facial", Language::Hindi), Some(1200));
    }

    #[test]
    fn test_unknown_service_has_no_price() {
        let catalog = ServiceCatalog::default();
        assert_eq!(catalog.price_for("tattoo", Language::English), None);
    }

    #[test]
    fn test_booked_slots_seeded() {
        let catalog = ServiceCatalog::default();
        for lang in [Language::English, Language::Hindi] {
            let booked = catalog.booked_slots(lang);
            assert!(booked.contains("10:00 am"));
            assert!(booked.contains("2:00 pm"));
            assert!(booked.contains("5:30 pm"));
        }
    }

    #[test]
    fn test_every_synonym_group_is_nonempty() {
        for (key, synonyms) in service_synonyms() {
            assert!(!synonyms.is_empty(), "no synonyms for {key}");
            // The canonical key itself is always its own first synonym.
            assert_eq!(synonyms[0], *key);
        }
    }

    #[test]
    fn test_grid_constants() {
        assert_eq!(OPEN_MINUTES, 540);
        assert_eq!(CLOSE_MINUTES, 1260);
        assert_eq!(CLOSE_MINUTES % SLOT_STEP_MINUTES, 0);
    }
}
