//! Core data models for slangtrack
//!
//! These models are shared by the cascade, the vault and the trend
//! pipeline. Everything persisted is serde-serializable.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Where a word currently sits in the slang lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Recognized standard English
    Standard,
    /// Listed in the curated slang archive
    EstablishedSlang,
    /// Unknown to static sources but observed in the wild
    EmergingSlang,
    /// Unknown everywhere, no mentions found
    #[default]
    UnknownNeologism,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Standard => "standard",
            Classification::EstablishedSlang => "established_slang",
            Classification::EmergingSlang => "emerging_slang",
            Classification::UnknownNeologism => "unknown_neologism",
        }
    }

    pub fn is_slang(&self) -> bool {
        matches!(
            self,
            Classification::EstablishedSlang | Classification::EmergingSlang
        )
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provenance of a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Lexicon,
    SlangArchive,
    DynamicScrape,
    #[default]
    NotFound,
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Lexicon => write!(f, "lexicon"),
            DataSource::SlangArchive => write!(f, "slang_archive"),
            DataSource::DynamicScrape => write!(f, "dynamic_scrape"),
            DataSource::NotFound => write!(f, "not_found"),
        }
    }
}

/// Source bucket a mention was observed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Niche,
    Mainstream,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Niche => "niche",
            Bucket::Mainstream => "mainstream",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "niche" => Some(Bucket::Niche),
            "mainstream" => Some(Bucket::Mainstream),
            _ => None,
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification record for one word, keyed by its lower-case form.
///
/// Records are replaced whole on every write; there is no field-level merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
    /// Lower-case lookup key
    pub word: String,
    /// Casing as first supplied by the caller
    #[serde(default)]
    pub display: String,
    pub classification: Classification,
    /// Share of mentions found in niche sources, 0.0..=1.0
    pub slang_ratio: f64,
    /// Mean compound sentiment, -1.0..=1.0
    pub average_sentiment: f64,
    pub data_source: DataSource,
    pub last_analyzed: DateTime<Utc>,
    /// Free-text era description ("1920s", "Victorian", "2026 (New)")
    #[serde(default)]
    pub origin_era: Option<String>,
    #[serde(default)]
    pub meaning: Option<String>,
    /// Mentions seen by the dynamic layer
    #[serde(default)]
    pub mention_count: u32,
    /// Mean heuristic slang score over dynamic-layer mentions
    #[serde(default)]
    pub slang_score: Option<f64>,
}

impl WordRecord {
    pub fn new(display: &str, classification: Classification, data_source: DataSource) -> Self {
        Self {
            word: normalize_word(display),
            display: display.trim().to_string(),
            classification,
            slang_ratio: 0.0,
            average_sentiment: 0.0,
            data_source,
            last_analyzed: Utc::now(),
            origin_era: None,
            meaning: None,
            mention_count: 0,
            slang_score: None,
        }
    }

    pub fn with_ratio(mut self, slang_ratio: f64) -> Self {
        self.slang_ratio = slang_ratio.clamp(0.0, 1.0);
        self
    }

    pub fn with_sentiment(mut self, sentiment: f64) -> Self {
        self.average_sentiment = sentiment.clamp(-1.0, 1.0);
        self
    }

    pub fn with_era(mut self, era: Option<String>) -> Self {
        self.origin_era = era;
        self
    }

    pub fn with_meaning(mut self, meaning: Option<String>) -> Self {
        self.meaning = meaning;
        self
    }

    /// True when both records carry the same verdict, ignoring timestamps
    pub fn same_verdict(&self, other: &WordRecord) -> bool {
        self.word == other.word
            && self.classification == other.classification
            && self.slang_ratio == other.slang_ratio
            && self.average_sentiment == other.average_sentiment
            && self.data_source == other.data_source
    }
}

/// A single observed usage of a keyword
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentionEvent {
    /// Stable upstream identifier, used for deduplication
    pub id: String,
    pub keyword: String,
    /// Community the mention came from (e.g. a subreddit)
    pub source: String,
    pub bucket: Bucket,
    pub content: String,
    pub observed_at: DateTime<Utc>,
}

/// Aggregated mention count for one (date, bucket, word)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub bucket: Bucket,
    pub count: u64,
}

/// Lower-case, trimmed form used for every lookup
pub fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keys_are_lowercase_but_keep_display() {
        let rec = WordRecord::new(" Rizz ", Classification::EmergingSlang, DataSource::DynamicScrape);
        assert_eq!(rec.word, "rizz");
        assert_eq!(rec.display, "Rizz");
    }

    #[test]
    fn test_builders_clamp_ranges() {
        let rec = WordRecord::new("x", Classification::Standard, DataSource::Lexicon)
            .with_ratio(1.7)
            .with_sentiment(-3.0);
        assert_eq!(rec.slang_ratio, 1.0);
        assert_eq!(rec.average_sentiment, -1.0);
    }

    #[test]
    fn test_classification_serializes_snake_case() {
        let json = serde_json::to_string(&Classification::EstablishedSlang).unwrap();
        assert_eq!(json, "\"established_slang\"");
        assert_eq!(Classification::UnknownNeologism.to_string(), "unknown_neologism");
    }

    #[test]
    fn test_bucket_parse() {
        assert_eq!(Bucket::parse("Niche"), Some(Bucket::Niche));
        assert_eq!(Bucket::parse(" mainstream "), Some(Bucket::Mainstream));
        assert_eq!(Bucket::parse("other"), None);
    }
}
