//! Engine facade
//!
//! [`SlangEngine`] wires the shared lexical resources, the vault, a signal
//! collector and configuration into the operations the CLI exposes:
//! classify, score, trend analysis, timeline, collection and seeding.

mod mock;

pub use mock::{generate_mock_history, MockProfile, MOCK_WORDS};

use crate::classifier::{
    CascadeResult, ClassificationCascade, CollectSummary, SlangVerdict,
};
use crate::collector::SignalCollector;
use crate::config::TrackerConfig;
use crate::lexicon::LexicalResources;
use crate::models::{normalize_word, WordRecord};
use crate::timeline::{sample_anchors, Timeline};
use crate::trend::{TrendAnalyzer, TrendReport};
use crate::vault::{VaultResult, WordVault};
use chrono::{NaiveDate, Utc};
use rand::Rng;
use std::sync::Arc;

pub struct SlangEngine {
    config: TrackerConfig,
    vault: Arc<dyn WordVault>,
    cascade: ClassificationCascade,
    analyzer: TrendAnalyzer,
}

impl SlangEngine {
    pub fn new(
        config: TrackerConfig,
        resources: Arc<LexicalResources>,
        vault: Arc<dyn WordVault>,
        collector: Box<dyn SignalCollector>,
    ) -> Self {
        let cascade = ClassificationCascade::new(resources, vault.clone(), collector, &config);
        let analyzer = TrendAnalyzer::new(&config.forecast, config.alert.clone());
        Self {
            config,
            vault,
            cascade,
            analyzer,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn vault(&self) -> &dyn WordVault {
        self.vault.as_ref()
    }

    /// Run the classification cascade for `word`
    pub fn classify(&self, word: &str) -> CascadeResult<WordRecord> {
        self.cascade.classify(word)
    }

    /// Heuristic slang score for a single mention
    pub fn score(&self, word: &str, context: &str, source: &str) -> SlangVerdict {
        self.cascade.scorer().score(word, context, source)
    }

    /// Trend report from stored daily counts; None without any counts
    pub fn analyze_trend(&self, word: &str) -> VaultResult<Option<TrendReport>> {
        let key = normalize_word(word);
        let counts = self.vault.daily_counts(&key)?;
        Ok(self.analyzer.analyze(&key, &counts))
    }

    /// Timeline for a word already in the vault; None when it is unknown
    pub fn get_timeline(&self, word: &str) -> VaultResult<Option<Timeline>> {
        self.get_timeline_with(word, &mut rand::rng())
    }

    pub fn get_timeline_with<R: Rng + ?Sized>(
        &self,
        word: &str,
        rng: &mut R,
    ) -> VaultResult<Option<Timeline>> {
        let Some(target) = self.vault.get(word)? else {
            return Ok(None);
        };
        sample_anchors(&target, self.vault.as_ref(), rng).map(Some)
    }

    /// Fold fresh mentions into the log and daily counts
    pub fn collect(&self, word: &str) -> CascadeResult<CollectSummary> {
        self.cascade.collect(word)
    }

    /// Insert archive records the vault does not have yet
    pub fn seed_archive(&self) -> CascadeResult<usize> {
        self.cascade.seed_archive()
    }

    /// Write synthetic history for the demo words, ending today
    pub fn generate_mock_history<R: Rng>(&self, days: u32, rng: &mut R) -> VaultResult<usize> {
        self.generate_mock_history_until(days, Utc::now().date_naive(), rng)
    }

    pub fn generate_mock_history_until<R: Rng>(
        &self,
        days: u32,
        end: NaiveDate,
        rng: &mut R,
    ) -> VaultResult<usize> {
        generate_mock_history(self.vault.as_ref(), &MOCK_WORDS, days, end, rng)
    }
}
