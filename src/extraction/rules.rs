//! Rule-based feature extraction
//!
//! Each strategy is a pure function of the input text. Strategies are tried
//! in list order and the first one that matches wins, so the result for a
//! given input is always the same.

use regex::Regex;
use std::sync::LazyLock;

use crate::models::Features;

/// A single regex with one capture group
pub struct PatternStrategy {
    pub name: &'static str,
    pattern: Regex,
}

impl PatternStrategy {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("extraction pattern is valid"),
        }
    }

    /// The trimmed first capture group, if the pattern matches
    #[must_use]
    pub fn apply(&self, text: &str) -> Option<String> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

/// Duration pattern with the factor that turns its number into days
pub struct DurationStrategy {
    strategy: PatternStrategy,
    days_per_unit: u32,
}

impl DurationStrategy {
    fn new(name: &'static str, pattern: &str, days_per_unit: u32) -> Self {
        Self {
            strategy: PatternStrategy::new(name, pattern),
            days_per_unit,
        }
    }

    /// Days in `1..=max_days`. Anything outside is no duration at all.
    #[must_use]
    pub fn apply(&self, text: &str, max_days: u32) -> Option<u32> {
        self.strategy
            .apply(text)?
            .parse::<u32>()
            .ok()?
            .checked_mul(self.days_per_unit)
            .filter(|days| (1..=max_days).contains(days))
    }
}

/// Word-boundary membership test against a fixed keyword list
pub struct VocabularyScan {
    keywords: Vec<(&'static str, Regex)>,
}

impl VocabularyScan {
    fn new(keywords: &[&'static str]) -> Self {
        let keywords = keywords
            .iter()
            .map(|keyword| {
                let pattern = format!(r"(?i)\b{}s?\b", regex::escape(keyword));
                (*keyword, Regex::new(&pattern).expect("keyword pattern is valid"))
            })
            .collect();
        Self { keywords }
    }

    /// Every keyword present in the text, in list order
    #[must_use]
    pub fn matches(&self, text: &str) -> Vec<String> {
        self.keywords
            .iter()
            .filter(|(_, pattern)| pattern.is_match(text))
            .map(|(keyword, _)| (*keyword).to_string())
            .collect()
    }

    /// The first keyword in list order present in the text
    #[must_use]
    pub fn first_match(&self, text: &str) -> Option<String> {
        self.keywords
            .iter()
            .find(|(_, pattern)| pattern.is_match(text))
            .map(|(keyword, _)| (*keyword).to_string())
    }
}

// A run of capitalized words, optionally after "the"
const PLACE_NAME: &str = r"(?:(?i:the)\s+)?([A-Z][\p{L}'-]*(?:\s+[A-Z][\p{L}'-]*)*)";
// Shortest lowercase-tolerant run of words up to a phrase boundary
const PLAIN_PLACE: &str = r"([a-z][a-z\s]*?)";
const TERMINATOR: &str = r"(?:,|\.|!|\?|\s+(?:in|for|on|with|and|during|next|this)\b";

// Capitalized words that end a place name rather than continue it
const NAME_STOP_WORDS: &[&str] = &[
    "i", "i'm", "i'd", "i'll", "in", "for", "with", "and", "or", "but", "on", "at", "by", "from",
    "to", "during", "next", "this", "then", "please", "we", "we're", "my", "our", "me", "us",
    "you", "it", "is", "are", "was", "can", "could", "would", "will", "let", "where", "when",
];

static DESTINATION_STRATEGIES: LazyLock<Vec<PatternStrategy>> = LazyLock::new(|| {
    let named = |name, lead: &str| {
        PatternStrategy::new(name, &format!(r"(?i:{lead})\s+{PLACE_NAME}"))
    };
    let plain = |name, lead: &str, allow_end: bool| {
        let end = if allow_end { "|$)" } else { ")" };
        PatternStrategy::new(
            name,
            &format!(r"(?i)\b{lead}\s+{PLAIN_PLACE}{TERMINATOR}{end}"),
        )
    };

    vec![
        named("trip-to", r"\btrip\s+to"),
        named("travel-to", r"\btravel(?:l?ing)?\s+to"),
        named("visit", r"\bvisit(?:ing)?"),
        named("vacation-in", r"\b(?:vacation|holiday)\s+in"),
        named("itinerary-for", r"\bitinerary\s+for"),
        named("going-to", r"\bgoing\s+to"),
        named("to", r"\bto"),
        plain("plain-trip-to", r"trip\s+to", true),
        plain("plain-travel-to", r"travel(?:l?ing)?\s+to", true),
        plain("plain-visiting", r"visiting", true),
        plain("plain-vacation-in", r"vacation\s+in", true),
        plain("plain-itinerary-for", r"itinerary\s+for", true),
        plain("plain-to", r"to", false),
    ]
});

static DURATION_STRATEGIES: LazyLock<Vec<DurationStrategy>> = LazyLock::new(|| {
    vec![
        DurationStrategy::new("n-days", r"(?i)\b(\d+)\s*-?\s*days?\b", 1),
        DurationStrategy::new("for-n-nights", r"(?i)\bfor\s+(\d+)\s+nights?\b", 1),
        DurationStrategy::new("n-nights", r"(?i)\b(\d+)\s*-?\s*nights?\b", 1),
        DurationStrategy::new("n-weeks", r"(?i)\b(\d+)\s*-?\s*weeks?\b", 7),
    ]
});

static CUISINE_VOCABULARY: LazyLock<VocabularyScan> = LazyLock::new(|| {
    VocabularyScan::new(&[
        "food",
        "cuisine",
        "restaurant",
        "dining",
        "eat",
        "meal",
        "breakfast",
        "lunch",
        "dinner",
        "snack",
        "cafe",
        "wine",
        "beer",
        "drink",
        "bar",
        "pub",
        "street food",
        "local food",
        "traditional food",
        "culinary",
        "gastronomy",
        "seafood",
        "vegetarian",
        "vegan",
    ])
});

static PLACE_VOCABULARY: LazyLock<VocabularyScan> = LazyLock::new(|| {
    VocabularyScan::new(&[
        "museum",
        "art",
        "history",
        "beach",
        "hiking",
        "nature",
        "shopping",
        "nightlife",
        "adventure",
        "relax",
        "culture",
        "sightseeing",
        "tour",
        "park",
        "festival",
        "concert",
        "sport",
        "outdoor",
        "photography",
        "historical",
        "monument",
        "temple",
        "church",
        "cathedral",
        "palace",
        "castle",
        "ruin",
        "ancient",
        "market",
        "water sport",
        "night market",
        "gallery",
        "architecture",
    ])
});

static TRANSPORT_VOCABULARY: LazyLock<VocabularyScan> = LazyLock::new(|| {
    VocabularyScan::new(&[
        "transport",
        "bus",
        "train",
        "subway",
        "metro",
        "taxi",
        "car",
        "rental",
        "bike",
        "walking",
        "public transport",
        "tram",
        "ferry",
        "boat",
        "scooter",
        "motorcycle",
    ])
});

/// Destination from the first matching phrasing template
#[must_use]
pub fn extract_destination(text: &str) -> Option<String> {
    DESTINATION_STRATEGIES
        .iter()
        .find_map(|s| s.apply(text).and_then(|raw| trim_place_name(&raw)))
}

/// Cut a captured name at the first stop word. `None` if nothing is left.
fn trim_place_name(raw: &str) -> Option<String> {
    let words: Vec<&str> = raw
        .split_whitespace()
        .take_while(|word| !NAME_STOP_WORDS.contains(&word.to_lowercase().as_str()))
        .collect();
    (!words.is_empty()).then(|| words.join(" "))
}

/// Trip length in days from the first matching duration pattern
#[must_use]
pub fn extract_duration(text: &str, max_days: u32) -> Option<u32> {
    DURATION_STRATEGIES
        .iter()
        .find_map(|s| s.apply(text, max_days))
}

#[must_use]
pub fn extract_cuisines(text: &str) -> Vec<String> {
    CUISINE_VOCABULARY.matches(text)
}

#[must_use]
pub fn extract_places(text: &str) -> Vec<String> {
    PLACE_VOCABULARY.matches(text)
}

#[must_use]
pub fn extract_transport(text: &str) -> Option<String> {
    TRANSPORT_VOCABULARY.first_match(text)
}

/// Full rule-based extraction. Destination may still be the placeholder.
#[must_use]
pub fn extract(text: &str, max_days: u32) -> Features {
    let destination = extract_destination(text).unwrap_or_default();
    let mut features = Features::for_destination(destination);
    features.duration_days = extract_duration(text, max_days);
    features.cuisine_preferences = Some(extract_cuisines(text)).filter(|v| !v.is_empty());
    features.place_preferences = Some(extract_places(text)).filter(|v| !v.is_empty());
    features.transport_preferences = extract_transport(text);
    features
}
