//! Static lexical resources
//!
//! Everything the classifier needs to know about "normal" language, loaded
//! once at startup and never mutated afterwards:
//!
//! - [`Lexicon`]: baseline vocabulary plus a sense lexicon
//! - [`SlangArchive`]: curated slang entries with polarity and era
//! - [`SentimentAnalyzer`]: compound sentiment over free text
//!
//! [`LexicalResources`] bundles the three into one immutable handle that is
//! shared by the scorer and the cascade.

mod archive;
mod sentiment;

pub use archive::{ArchiveEntry, Polarity, SlangArchive};
pub use sentiment::{SentimentAnalyzer, SentimentScores};

use crate::config::ResourcesConfig;
use crate::models::normalize_word;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

const BUILTIN_VOCABULARY: &str = include_str!("../../data/baseline_vocab.txt");
const BUILTIN_SENSES: &str = include_str!("../../data/senses.tsv");

/// Errors raised while loading resource files
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML archive: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid JSON archive: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported archive format: {0}")]
    UnsupportedFormat(PathBuf),
}

pub type ResourceResult<T> = Result<T, ResourceError>;

pub(crate) fn read_resource(path: &Path) -> ResourceResult<String> {
    std::fs::read_to_string(path).map_err(|source| ResourceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Baseline vocabulary and sense lexicon
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    vocabulary: HashSet<String>,
    senses: HashMap<String, u32>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Embedded vocabulary and senses
    pub fn builtin() -> Self {
        let mut lexicon = Self::new();
        lexicon.extend_from_word_list(BUILTIN_VOCABULARY);
        lexicon.extend_from_senses(BUILTIN_SENSES);
        lexicon
    }

    pub fn add_word(&mut self, word: &str) {
        let word = normalize_word(word);
        if !word.is_empty() {
            self.vocabulary.insert(word);
        }
    }

    pub fn add_senses(&mut self, word: &str, count: u32) {
        let word = normalize_word(word);
        if !word.is_empty() && count > 0 {
            *self.senses.entry(word).or_insert(0) += count;
        }
    }

    /// One word per line; blank lines and `#` comments are skipped
    pub fn extend_from_word_list(&mut self, text: &str) -> usize {
        let mut added = 0;
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            self.add_word(line);
            added += 1;
        }
        added
    }

    /// `word<TAB>count` per line; a bare word counts as one sense
    pub fn extend_from_senses(&mut self, text: &str) -> usize {
        let mut added = 0;
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.split('\t');
            let word = parts.next().unwrap_or_default();
            let count = parts
                .next()
                .and_then(|c| c.trim().parse::<u32>().ok())
                .unwrap_or(1);
            self.add_senses(word, count);
            added += 1;
        }
        added
    }

    pub fn load_word_list(&mut self, path: &Path) -> ResourceResult<usize> {
        let text = read_resource(path)?;
        Ok(self.extend_from_word_list(&text))
    }

    pub fn load_senses(&mut self, path: &Path) -> ResourceResult<usize> {
        let text = read_resource(path)?;
        Ok(self.extend_from_senses(&text))
    }

    /// Case-insensitive vocabulary membership
    pub fn contains(&self, word: &str) -> bool {
        self.vocabulary.contains(&normalize_word(word))
    }

    /// Number of recognized senses in the sense lexicon
    pub fn sense_count(&self, word: &str) -> u32 {
        self.senses.get(&normalize_word(word)).copied().unwrap_or(0)
    }

    /// In the vocabulary or has at least one recognized sense
    pub fn is_standard(&self, word: &str) -> bool {
        self.contains(word) || self.sense_count(word) > 0
    }

    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty() && self.senses.is_empty()
    }
}

/// Immutable handle over all static resources
#[derive(Debug, Clone, Default)]
pub struct LexicalResources {
    pub lexicon: Lexicon,
    pub archive: SlangArchive,
    pub sentiment: SentimentAnalyzer,
}

impl LexicalResources {
    pub fn new(lexicon: Lexicon, archive: SlangArchive, sentiment: SentimentAnalyzer) -> Self {
        Self {
            lexicon,
            archive,
            sentiment,
        }
    }

    /// Built-in data only
    pub fn builtin() -> Self {
        Self::new(
            Lexicon::builtin(),
            SlangArchive::builtin(),
            SentimentAnalyzer::new(),
        )
    }

    /// Built-in data (unless skipped) layered with configured files
    pub fn load(config: &ResourcesConfig) -> ResourceResult<Self> {
        let (mut lexicon, mut archive) = if config.skip_builtin {
            (Lexicon::new(), SlangArchive::new())
        } else {
            (Lexicon::builtin(), SlangArchive::builtin())
        };

        for path in &config.vocabulary_files {
            let n = lexicon.load_word_list(path)?;
            debug!("Loaded {} vocabulary words from {}", n, path.display());
        }
        for path in &config.sense_files {
            let n = lexicon.load_senses(path)?;
            debug!("Loaded {} sense entries from {}", n, path.display());
        }
        for path in &config.archive_files {
            let n = archive.load_file(path)?;
            debug!("Loaded {} archive entries from {}", n, path.display());
        }

        Ok(Self::new(lexicon, archive, SentimentAnalyzer::new()))
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_vocabulary() {
        let lexicon = Lexicon::builtin();
        assert!(lexicon.contains("friend"));
        assert!(lexicon.contains("London"));
        assert!(lexicon.contains("cooked"));
        assert!(!lexicon.contains("rizz"));
        assert!(!lexicon.contains("skibidi"));
        assert!(!lexicon.contains("# baseline english vocabulary, one word per line."));
    }

    #[test]
    fn test_senses_make_a_word_standard() {
        let mut lexicon = Lexicon::new();
        assert!(!lexicon.is_standard("running"));
        lexicon.extend_from_senses("running\t6\nbare\n");
        assert_eq!(lexicon.sense_count("Running"), 6);
        assert_eq!(lexicon.sense_count("bare"), 1);
        assert!(lexicon.is_standard("running"));
        assert!(!lexicon.contains("running"));
    }

    #[test]
    fn test_load_word_list_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        std::fs::write(&path, "Zephyr\n\n# comment\nquokka\n").unwrap();

        let mut lexicon = Lexicon::new();
        assert_eq!(lexicon.load_word_list(&path).unwrap(), 2);
        assert!(lexicon.contains("zephyr"));
        assert!(lexicon.contains("QUOKKA"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut lexicon = Lexicon::new();
        let err = lexicon
            .load_word_list(Path::new("/definitely/not/here.txt"))
            .unwrap_err();
        assert!(matches!(err, ResourceError::Io { .. }));
    }

    #[test]
    fn test_load_layers_files_over_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let vocab = dir.path().join("extra.txt");
        std::fs::write(&vocab, "glorp\n").unwrap();

        let config = ResourcesConfig {
            vocabulary_files: vec![vocab],
            ..Default::default()
        };
        let resources = LexicalResources::load(&config).unwrap();
        assert!(resources.lexicon.contains("glorp"));
        assert!(resources.lexicon.contains("friend"));
        assert!(resources.archive.get("rizz").is_some());

        let bare = LexicalResources::load(&ResourcesConfig {
            skip_builtin: true,
            ..Default::default()
        })
        .unwrap();
        assert!(bare.lexicon.is_empty());
        assert!(bare.archive.is_empty());
    }
}
