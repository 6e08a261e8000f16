//! Keyword-based risk scoring for coded-language markers.
//!
//! A fixed marker list is checked against the input by case-insensitive
//! substring containment. The match count alone drives the risk bucket;
//! the AI classification never feeds into it.

/// Marker words that hint at coded language.
///
/// Defined once, never mutated. Entries are stored lowercase.
pub const SUSPICIOUS_KEYWORDS: &[&str] = &[
    "eagle", "package", "midnight", "sunrise", "rainbow", "storm", "gift", "fireworks",
    "uncle", "party", "signal", "drop", "payload", "merch", "courier",
];

/// Count marker-list entries occurring anywhere in `text`, case-insensitive.
///
/// Pure substring containment: "EAGLE-eyed watcher" counts as one match for
/// "eagle". No tokenization, stemming, or word-boundary checks.
pub fn keyword_score(text: &str) -> usize {
    let haystack = text.to_lowercase();
    SUSPICIOUS_KEYWORDS
        .iter()
        .filter(|word| haystack.contains(*word))
        .count()
}

/// Severity tier derived purely from the keyword match count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskBucket {
    Low,
    Moderate,
    High,
}

impl RiskBucket {
    /// Fixed thresholds: 0 matches → Low, 1..=2 → Moderate, 3+ → High.
    pub fn from_score(score: usize) -> Self {
        match score {
            0 => Self::Low,
            1..=2 => Self::Moderate,
            _ => Self::High,
        }
    }

    /// The user-facing banner line for this tier.
    pub fn banner(&self) -> &'static str {
        match self {
            Self::Low => "Low Risk – No suspicious patterns found.",
            Self::Moderate => "Moderate Risk – A few potential code words detected.",
            Self::High => "High Risk – Multiple coded keywords detected.",
        }
    }
}
