//! Classification cascade
//!
//! Resolves a word's lifecycle status by trying progressively more
//! expensive sources and stopping at the first match:
//!
//! 1. vault (already analyzed)
//! 2. standard lexicon / slang archive, in the configured order
//! 3. dynamic layer: live mentions from every configured source, then the
//!    global feed if those found nothing
//!
//! Every call ends with exactly one vault write transaction.

use super::scorer::SlangScorer;
use crate::collector::SignalCollector;
use crate::config::{ResolutionOrder, SourcesConfig, TrackerConfig};
use crate::lexicon::{ArchiveEntry, LexicalResources};
use crate::models::{
    normalize_word, Bucket, Classification, DataSource, MentionEvent, WordRecord,
};
use crate::vault::{VaultError, WordVault};
use chrono::{Datelike, Utc};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Error, Debug)]
pub enum CascadeError {
    #[error("Cannot classify an empty word")]
    EmptyWord,

    #[error("Vault write failed: {0}")]
    Vault(#[from] VaultError),
}

pub type CascadeResult<T> = Result<T, CascadeError>;

/// Outcome of one collection pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectSummary {
    /// Mentions returned by the collector across all sources
    pub fetched: usize,
    /// Mentions not previously in the log
    pub new_mentions: usize,
    /// (day, bucket) counts rewritten
    pub counts_updated: usize,
}

#[derive(Debug, Clone, Copy)]
enum StaticLayer {
    Lexicon,
    Archive,
}

pub struct ClassificationCascade {
    resources: Arc<LexicalResources>,
    scorer: SlangScorer,
    vault: Arc<dyn WordVault>,
    collector: Box<dyn SignalCollector>,
    sources: SourcesConfig,
    order: ResolutionOrder,
    request_delay: Duration,
}

impl ClassificationCascade {
    pub fn new(
        resources: Arc<LexicalResources>,
        vault: Arc<dyn WordVault>,
        collector: Box<dyn SignalCollector>,
        config: &TrackerConfig,
    ) -> Self {
        let scorer = SlangScorer::new(
            resources.clone(),
            config.sources.clone(),
            config.scoring.clone(),
        );
        Self {
            resources,
            scorer,
            vault,
            collector,
            sources: config.sources.clone(),
            order: config.resolution.order,
            request_delay: Duration::from_millis(config.collector.request_delay_ms),
        }
    }

    pub fn scorer(&self) -> &SlangScorer {
        &self.scorer
    }

    /// Classify `word`, persisting the resulting record
    pub fn classify(&self, word: &str) -> CascadeResult<WordRecord> {
        let key = normalize_word(word);
        if key.is_empty() {
            return Err(CascadeError::EmptyWord);
        }

        if let Some(mut record) = self.vault.get(&key)? {
            debug!("'{}' found in vault ({})", key, record.classification);
            record.last_analyzed = Utc::now();
            self.persist(&record)?;
            return Ok(record);
        }

        let record = match self.resolve_static(word) {
            Some(record) => {
                self.persist(&record)?;
                record
            }
            None => {
                let (record, mentions) = self.resolve_dynamic(word);
                // Mentions, their daily counts and the record commit together
                self.vault
                    .store_mentions(&key, &mentions, Some(&record))
                    .inspect_err(log_vault_error)?;
                record
            }
        };

        info!(
            "Classified '{}' as {} via {}",
            record.word, record.classification, record.data_source
        );
        Ok(record)
    }

    /// Lexicon and archive layers in the configured order
    fn resolve_static(&self, word: &str) -> Option<WordRecord> {
        let layers = match self.order {
            ResolutionOrder::LexiconFirst => [StaticLayer::Lexicon, StaticLayer::Archive],
            ResolutionOrder::ArchiveFirst => [StaticLayer::Archive, StaticLayer::Lexicon],
        };

        layers.into_iter().find_map(|layer| match layer {
            StaticLayer::Lexicon => {
                if self.resources.lexicon.is_standard(word) {
                    debug!("'{}' is standard English", word);
                    Some(
                        WordRecord::new(word, Classification::Standard, DataSource::Lexicon)
                            .with_ratio(0.0),
                    )
                } else {
                    None
                }
            }
            StaticLayer::Archive => self.resources.archive.get(word).map(|entry| {
                debug!("'{}' found in slang archive", word);
                archive_record(word, entry)
            }),
        })
    }

    /// Record for a word the static layers do not know, plus the mentions
    /// that back it
    fn resolve_dynamic(&self, word: &str) -> (WordRecord, Vec<MentionEvent>) {
        debug!("'{}' unknown to static sources, querying live sources", word);
        let mut calls = 0;
        let mut mentions = self.gather(word, &mut calls);
        if mentions.is_empty() {
            if let Some(global) = self.sources.global() {
                debug!("No mentions of '{}' in configured sources, trying {}", word, global);
                mentions = self.fetch_paced(word, global, Bucket::Mainstream, &mut calls);
            }
        }
        if mentions.is_empty() {
            let record =
                WordRecord::new(word, Classification::UnknownNeologism, DataSource::NotFound);
            return (record, mentions);
        }

        let total = mentions.len();
        let niche = mentions.iter().filter(|m| m.bucket == Bucket::Niche).count();
        let sentiment = mean(
            mentions
                .iter()
                .map(|m| self.resources.sentiment.compound(&m.content)),
        );
        let slang_score = mean(
            mentions
                .iter()
                .map(|m| self.scorer.score(word, &m.content, &m.source).score),
        );

        let mut record =
            WordRecord::new(word, Classification::EmergingSlang, DataSource::DynamicScrape)
                .with_ratio(niche as f64 / total as f64)
                .with_sentiment(sentiment)
                .with_era(Some(format!("{} (New)", Utc::now().year())));
        record.mention_count = u32::try_from(total).unwrap_or(u32::MAX);
        record.slang_score = Some((slang_score * 100.0).round() / 100.0);
        (record, mentions)
    }

    /// Query every configured source, niche first
    fn gather(&self, word: &str, calls: &mut usize) -> Vec<MentionEvent> {
        let targets = self
            .sources
            .niche_sources
            .iter()
            .map(|s| (s, Bucket::Niche))
            .chain(
                self.sources
                    .mainstream_sources
                    .iter()
                    .map(|s| (s, Bucket::Mainstream)),
            );

        let mut mentions = Vec::new();
        for (source, bucket) in targets {
            mentions.extend(self.fetch_paced(word, source, bucket, calls));
        }
        mentions
    }

    /// One upstream call, preceded by the request delay unless it is the
    /// first call of this pass
    fn fetch_paced(
        &self,
        word: &str,
        source: &str,
        bucket: Bucket,
        calls: &mut usize,
    ) -> Vec<MentionEvent> {
        if *calls > 0 && !self.request_delay.is_zero() {
            std::thread::sleep(self.request_delay);
        }
        *calls += 1;

        let found = self.collector.fetch(word, source, bucket);
        debug!(
            "{}: {} mentions of '{}' in {} ({})",
            self.collector.name(),
            found.len(),
            word,
            source,
            bucket
        );
        found
    }

    /// Fetch live mentions and fold them into the mention log and daily
    /// counts without touching the word's classification
    pub fn collect(&self, word: &str) -> CascadeResult<CollectSummary> {
        let key = normalize_word(word);
        if key.is_empty() {
            return Err(CascadeError::EmptyWord);
        }
        let mentions = self.gather(&key, &mut 0);
        let batch = self
            .vault
            .store_mentions(&key, &mentions, None)
            .inspect_err(log_vault_error)?;
        let summary = CollectSummary {
            fetched: mentions.len(),
            new_mentions: batch.new_mentions,
            counts_updated: batch.counts_updated,
        };
        info!(
            "Collected {} mentions of '{}' ({} new)",
            summary.fetched, key, summary.new_mentions
        );
        Ok(summary)
    }

    /// Insert an established-slang record for every archive entry the vault
    /// does not know yet. Returns how many were written.
    pub fn seed_archive(&self) -> CascadeResult<usize> {
        let mut written = 0;
        for entry in self.resources.archive.entries() {
            if self.vault.get(&entry.word)?.is_some() {
                continue;
            }
            self.persist(&archive_record(&entry.word, entry))?;
            written += 1;
        }
        info!("Seeded {} archive records", written);
        Ok(written)
    }

    fn persist(&self, record: &WordRecord) -> CascadeResult<()> {
        self.vault.put(record).inspect_err(log_vault_error)?;
        Ok(())
    }
}

fn log_vault_error(e: &VaultError) {
    error!("Vault write failed: {}", e);
}

fn archive_record(word: &str, entry: &ArchiveEntry) -> WordRecord {
    WordRecord::new(word, Classification::EstablishedSlang, DataSource::SlangArchive)
        .with_ratio(1.0)
        .with_sentiment(entry.polarity().score())
        .with_era(entry.origin_era.clone())
        .with_meaning(entry.meaning.clone())
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}
