//! Signal collectors
//!
//! A collector turns (keyword, source) into the mentions observed there.
//! Collectors never fail: upstream problems are logged and surface as an
//! empty result, which the cascade treats as "no mentions found".

mod reddit;

pub use reddit::RedditCollector;

use crate::models::{normalize_word, Bucket, MentionEvent};
use std::collections::HashMap;

/// Source of raw mention events
pub trait SignalCollector {
    /// Mentions of `keyword` in `source`, tagged with `bucket`. Empty on error.
    fn fetch(&self, keyword: &str, source: &str, bucket: Bucket) -> Vec<MentionEvent>;

    /// Short name for logs
    fn name(&self) -> &str;
}

/// In-memory collector serving canned mentions per source.
///
/// Used by tests and offline mode. Only events whose content contains the
/// keyword (case-insensitive) are returned.
#[derive(Debug, Clone, Default)]
pub struct StaticCollector {
    by_source: HashMap<String, Vec<MentionEvent>>,
}

impl StaticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one mention under `source`
    pub fn with_mention(mut self, source: &str, id: &str, keyword: &str, content: &str) -> Self {
        self.add(MentionEvent {
            id: id.to_string(),
            keyword: normalize_word(keyword),
            source: source.to_string(),
            // Re-tagged by the bucket passed to fetch
            bucket: Bucket::Mainstream,
            content: content.to_string(),
            observed_at: chrono::Utc::now(),
        });
        self
    }

    pub fn add(&mut self, event: MentionEvent) {
        self.by_source
            .entry(event.source.to_lowercase())
            .or_default()
            .push(event);
    }

    pub fn is_empty(&self) -> bool {
        self.by_source.is_empty()
    }
}

impl SignalCollector for StaticCollector {
    fn fetch(&self, keyword: &str, source: &str, bucket: Bucket) -> Vec<MentionEvent> {
        let needle = normalize_word(keyword);
        self.by_source
            .get(&source.to_lowercase())
            .map(|events| {
                events
                    .iter()
                    .filter(|e| e.content.to_lowercase().contains(&needle))
                    .map(|e| MentionEvent {
                        keyword: needle.clone(),
                        bucket,
                        ..e.clone()
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn name(&self) -> &str {
        "static"
    }
}
