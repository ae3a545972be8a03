//! Curated slang archive
//!
//! Word → polarity/era/meaning reference, loaded from TOML or JSON.

use super::{read_resource, ResourceError, ResourceResult};
use crate::models::normalize_word;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::error;

const BUILTIN_ARCHIVE: &str = include_str!("../../data/slang_archive.toml");

/// Sentiment polarity recorded for an archived slang term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Polarity {
    /// Unrecognized labels are neutral
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "positive" => Polarity::Positive,
            "negative" => Polarity::Negative,
            _ => Polarity::Neutral,
        }
    }

    pub fn score(&self) -> f64 {
        match self {
            Polarity::Positive => 0.5,
            Polarity::Negative => -0.5,
            Polarity::Neutral => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    pub word: String,
    /// positive | negative | neutral
    #[serde(default)]
    pub sentiment: String,
    #[serde(default)]
    pub origin_era: Option<String>,
    #[serde(default)]
    pub meaning: Option<String>,
}

impl ArchiveEntry {
    pub fn polarity(&self) -> Polarity {
        Polarity::from_label(&self.sentiment)
    }
}

#[derive(Deserialize)]
struct ArchiveFile {
    #[serde(default)]
    entry: Vec<ArchiveEntry>,
}

/// Read-only slang reference keyed by lower-case word
#[derive(Debug, Clone, Default)]
pub struct SlangArchive {
    entries: HashMap<String, ArchiveEntry>,
}

impl SlangArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        Self::from_embedded(BUILTIN_ARCHIVE)
    }

    /// Archive from bundled TOML. A broken bundle is logged and leaves the
    /// archive empty.
    fn from_embedded(text: &str) -> Self {
        let mut archive = Self::new();
        match parse_toml(text) {
            Ok(entries) => {
                archive.extend(entries);
            }
            Err(e) => error!("Embedded slang archive is invalid, starting empty: {}", e),
        }
        archive
    }

    pub fn insert(&mut self, entry: ArchiveEntry) {
        let key = normalize_word(&entry.word);
        if !key.is_empty() {
            self.entries.insert(key, entry);
        }
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = ArchiveEntry>) -> usize {
        let mut n = 0;
        for entry in entries {
            self.insert(entry);
            n += 1;
        }
        n
    }

    /// Load a `.toml` (`[[entry]]` tables) or `.json` (array) archive
    pub fn load_file(&mut self, path: &Path) -> ResourceResult<usize> {
        let text = read_resource(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        let entries = match ext.as_str() {
            "toml" => parse_toml(&text)?,
            "json" => serde_json::from_str::<Vec<ArchiveEntry>>(&text)?,
            _ => return Err(ResourceError::UnsupportedFormat(path.to_path_buf())),
        };
        Ok(self.extend(entries))
    }

    pub fn get(&self, word: &str) -> Option<&ArchiveEntry> {
        self.entries.get(&normalize_word(word))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    pub fn entries(&self) -> impl Iterator<Item = &ArchiveEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_toml(text: &str) -> ResourceResult<Vec<ArchiveEntry>> {
    let file: ArchiveFile = toml::from_str(text)?;
    Ok(file.entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_archive_parses() {
        assert!(parse_toml(BUILTIN_ARCHIVE).is_ok());
        let archive = SlangArchive::builtin();
        assert!(archive.len() >= 20);

        let rizz = archive.get("RIZZ").unwrap();
        assert_eq!(rizz.polarity(), Polarity::Positive);
        assert_eq!(rizz.origin_era.as_deref(), Some("2022"));
    }

    #[test]
    fn test_builtin_archive_covers_every_century() {
        let archive = SlangArchive::builtin();
        for century in ["1600s", "1700s", "1800s", "1900s", "2000s"] {
            assert!(
                archive
                    .entries()
                    .any(|e| e.origin_era.as_deref().unwrap_or("").contains(century)),
                "no archive entry for {}",
                century
            );
        }
    }

    #[test]
    fn test_broken_embedded_archive_is_empty() {
        assert!(SlangArchive::from_embedded("[[entry]]\nword = ").is_empty());
        assert_eq!(
            SlangArchive::from_embedded("[[entry]]\nword = \"opp\"\n").len(),
            1
        );
    }

    #[test]
    fn test_polarity_mapping() {
        assert_eq!(Polarity::from_label("Positive").score(), 0.5);
        assert_eq!(Polarity::from_label("negative").score(), -0.5);
        assert_eq!(Polarity::from_label("neutral").score(), 0.0);
        assert_eq!(Polarity::from_label("meh").score(), 0.0);
    }

    #[test]
    fn test_load_json_archive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extra.json");
        std::fs::write(
            &path,
            r#"[{"word": "Glazing", "sentiment": "negative", "origin_era": "2024"}]"#,
        )
        .unwrap();

        let mut archive = SlangArchive::new();
        assert_eq!(archive.load_file(&path).unwrap(), 1);
        let entry = archive.get("glazing").unwrap();
        assert_eq!(entry.polarity(), Polarity::Negative);
        assert!(entry.meaning.is_none());
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extra.csv");
        std::fs::write(&path, "word,sentiment\n").unwrap();
        let err = SlangArchive::new().load_file(&path).unwrap_err();
        assert!(matches!(err, ResourceError::UnsupportedFormat(_)));
    }
}
