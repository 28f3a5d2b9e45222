//! Booking data model
//!
//! Collected appointment slots and the canonical 12-hour time type.
//!
//! Slots are filled in a fixed order (`service → name → date → time`); a
//! later slot is never attempted while an earlier one is still empty. A
//! slot holds either a fully normalized value or nothing; extractors never
//! commit partial values.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The four appointment slots, in fill order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    Service,
    Name,
    Date,
    Time,
}

impl SlotKind {
    /// Fill order for the booking dialogue
    pub fn all() -> &'static [SlotKind] {
        &[Self::Service, Self::Name, Self::Date, Self::Time]
    }

    /// Slot name as used in LLM task instructions
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Name => "name",
            Self::Date => "date",
            Self::Time => "time",
        }
    }
}

impl std::fmt::Display for SlotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// am/pm marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Meridiem {
    Am,
    Pm,
}

impl std::fmt::Display for Meridiem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Am => write!(f, "am"),
            Self::Pm => write!(f, "pm"),
        }
    }
}

/// Canonical 12-hour appointment time
///
/// Renders as `H:MM am|pm` with no leading hour zero and a lowercase
/// meridiem: the lock-step storage format every extraction path must
/// re-canonicalize into before a value is persisted. Booked-slot membership
/// checks compare these rendered strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanonicalTime {
    hour: u32,
    minute: u32,
    meridiem: Meridiem,
}

impl CanonicalTime {
    /// Create a canonical time; hour must be 1–12
    pub fn new(hour: u32, minute: u32, meridiem: Meridiem) -> Option<Self> {
        if (1..=12).contains(&hour) && minute < 60 {
            Some(Self { hour, minute, meridiem })
        } else {
            None
        }
    }

    /// Parse `H:MM am|pm`, tolerating a padded hour (`04:00 pm`) and an
    /// uppercase meridiem. Minutes and meridiem are mandatory; hours
    /// outside 1–12 are rejected (folding happens upstream).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        let mut parts = s.split_whitespace();
        let clock = parts.next()?;
        let meridiem = match parts.next()? {
            "am" => Meridiem::Am,
            "pm" => Meridiem::Pm,
            _ => return None,
        };
        if parts.next().is_some() {
            return None;
        }
        let (h, m) = clock.split_once(':')?;
        let hour: u32 = h.parse().ok()?;
        let minute: u32 = m.parse().ok()?;
        Self::new(hour, minute, meridiem)
    }

    /// Convert from a 24-hour clock reading
    pub fn from_hm24(hour: u32, minute: u32) -> Option<Self> {
        if hour >= 24 || minute >= 60 {
            return None;
        }
        let (h12, meridiem) = match hour {
            0 => (12, Meridiem::Am),
            1..=11 => (hour, Meridiem::Am),
            12 => (12, Meridiem::Pm),
            _ => (hour - 12, Meridiem::Pm),
        };
        Self::new(h12, minute, meridiem)
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn meridiem(&self) -> Meridiem {
        self.meridiem
    }

    /// Minutes since midnight (12:00 am == 0), used by the free-slot scan
    pub fn minutes_from_midnight(&self) -> u32 {
        let base = match (self.hour, self.meridiem) {
            (12, Meridiem::Am) => 0,
            (12, Meridiem::Pm) => 12 * 60,
            (h, Meridiem::Am) => h * 60,
            (h, Meridiem::Pm) => (h + 12) * 60,
        };
        base + self.minute
    }

    /// Inverse of [`minutes_from_midnight`](Self::minutes_from_midnight)
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        if minutes >= 24 * 60 {
            return None;
        }
        Self::from_hm24(minutes / 60, minutes % 60)
    }
}

impl std::fmt::Display for CanonicalTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{:02} {}", self.hour, self.minute, self.meridiem)
    }
}

impl Serialize for CanonicalTime {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CanonicalTime {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid canonical time: {s}")))
    }
}

/// Collected appointment slots for one conversation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingData {
    /// Canonical service key (English catalog key)
    pub service: Option<String>,
    /// Customer name, title-cased
    pub name: Option<String>,
    /// Appointment date
    #[serde(with = "booking_date", default)]
    pub date: Option<NaiveDate>,
    /// Appointment time in canonical form
    pub time: Option<CanonicalTime>,
}

impl BookingData {
    /// First slot in fill order that is still empty
    pub fn next_missing(&self) -> Option<SlotKind> {
        for slot in SlotKind::all() {
            let filled = match slot {
                SlotKind::Service => self.service.is_some(),
                SlotKind::Name => self.name.is_some(),
                SlotKind::Date => self.date.is_some(),
                SlotKind::Time => self.time.is_some(),
            };
            if !filled {
                return Some(*slot);
            }
        }
        None
    }

    pub fn is_complete(&self) -> bool {
        self.next_missing().is_none()
    }

    /// Spoken rendering of the date, e.g. `26 August 2026`
    pub fn date_spoken(&self) -> Option<String> {
        self.date.map(|d| d.format("%d %B %Y").to_string())
    }
}

/// Dates travel on the wire in the spoken `%d %B %Y` form
mod booking_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => serializer.serialize_some(&d.format("%d %B %Y").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let value: Option<String> = Option::deserialize(deserializer)?;
        match value {
            None => Ok(None),
            Some(s) => NaiveDate::parse_from_str(&s, "%d %B %Y")
                .map(Some)
                .map_err(|e| serde::de::Error::custom(format!("invalid booking date {s}: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_display_has_no_leading_zero() {
        let t = CanonicalTime::new(4, 0, Meridiem::Pm).unwrap();
        assert_eq!(t.to_string(), "4:00 pm");
    }

    #[test]
    fn test_parse_accepts_padded_hour() {
        let t = CanonicalTime::parse("04:00 pm").unwrap();
        assert_eq!(t.to_string(), "4:00 pm");
        let t = CanonicalTime::parse("11:30 AM").unwrap();
        assert_eq!(t.to_string(), "11:30 am");
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!(CanonicalTime::parse("0:30 am").is_none());
        assert!(CanonicalTime::parse("13:00 pm").is_none());
        assert!(CanonicalTime::parse("5:61 pm").is_none());
        assert!(CanonicalTime::parse("5 pm").is_none());
    }

    #[test]
    fn test_from_hm24() {
        assert_eq!(CanonicalTime::from_hm24(0, 15).unwrap().to_string(), "12:15 am");
        assert_eq!(CanonicalTime::from_hm24(12, 0).unwrap().to_string(), "12:00 pm");
        assert_eq!(CanonicalTime::from_hm24(14, 30).unwrap().to_string(), "2:30 pm");
        assert_eq!(CanonicalTime::from_hm24(9, 5).unwrap().to_string(), "9:05 am");
    }

    #[test]
    fn test_minutes_round_trip() {
        for s in ["12:00 am", "9:00 am", "12:30 pm", "8:45 pm"] {
            let t = CanonicalTime::parse(s).unwrap();
            let back = CanonicalTime::from_minutes(t.minutes_from_midnight()).unwrap();
            assert_eq!(t, back);
        }
    }

    #[test]
    fn test_next_missing_order() {
        let mut data = BookingData::default();
        assert_eq!(data.next_missing(), Some(SlotKind::Service));

        data.service = Some("haircut".to_string());
        assert_eq!(data.next_missing(), Some(SlotKind::Name));

        data.name = Some("Anjali Verma".to_string());
        assert_eq!(data.next_missing(), Some(SlotKind::Date));

        data.date = NaiveDate::from_ymd_opt(2030, 1, 15);
        assert_eq!(data.next_missing(), Some(SlotKind::Time));

        data.time = CanonicalTime::parse("4:00 pm");
        assert_eq!(data.next_missing(), None);
        assert!(data.is_complete());
    }

    #[test]
    fn test_booking_serializes_spoken_date() {
        let data = BookingData {
            service: Some("facial".to_string()),
            name: Some("Meera".to_string()),
            date: NaiveDate::from_ymd_opt(2030, 9, 5),
            time: CanonicalTime::parse("10:30 am"),
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["date"], "05 September 2030");
        assert_eq!(json["time"], "10:30 am");

        let back: BookingData = serde_json::from_value(json).unwrap();
        assert_eq!(back.date, data.date);
        assert_eq!(back.time, data.time);
    }
}
