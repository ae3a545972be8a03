//! Subreddit search collector (sync HTTP via ureq)

use super::SignalCollector;
use crate::config::CollectorConfig;
use crate::models::{normalize_word, Bucket, MentionEvent};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: Post,
}

#[derive(Debug, Deserialize)]
struct Post {
    name: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    selftext: String,
    #[serde(default)]
    created_utc: f64,
}

/// Queries `/r/{source}/search.json` for recent posts mentioning a keyword
pub struct RedditCollector {
    agent: ureq::Agent,
    config: CollectorConfig,
}

impl RedditCollector {
    pub fn new(config: CollectorConfig) -> Self {
        let agent = ureq::config::Config::builder()
            .http_status_as_error(false)
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build()
            .new_agent();
        Self { agent, config }
    }

    fn search_url(&self, source: &str) -> String {
        format!(
            "{}/r/{}/search.json",
            self.config.base_url.trim_end_matches('/'),
            source
        )
    }

    fn try_fetch(&self, keyword: &str, source: &str) -> Result<Option<Listing>, ureq::Error> {
        let response = self
            .agent
            .get(&self.search_url(source))
            .header("User-Agent", &self.config.user_agent)
            .query("q", keyword)
            .query("restrict_sr", "1")
            .query("sort", "new")
            .query("limit", &self.config.limit.to_string())
            .call()?;

        let status = response.status().as_u16();
        if status == 429 {
            warn!("Rate limited by r/{}, skipping", source);
            return Ok(None);
        }
        if status != 200 {
            warn!("r/{} returned HTTP {}", source, status);
            return Ok(None);
        }

        let listing: Listing = response.into_body().read_json()?;
        Ok(Some(listing))
    }
}

impl SignalCollector for RedditCollector {
    fn fetch(&self, keyword: &str, source: &str, bucket: Bucket) -> Vec<MentionEvent> {
        match self.try_fetch(keyword, source) {
            Ok(Some(listing)) => {
                let events = listing_to_events(listing, keyword, source, bucket);
                debug!("r/{}: {} mentions of '{}'", source, events.len(), keyword);
                events
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Request to r/{} failed: {}", source, e);
                Vec::new()
            }
        }
    }

    fn name(&self) -> &str {
        "reddit"
    }
}

fn listing_to_events(
    listing: Listing,
    keyword: &str,
    source: &str,
    bucket: Bucket,
) -> Vec<MentionEvent> {
    let keyword = normalize_word(keyword);
    listing
        .data
        .children
        .into_iter()
        .map(|child| {
            let post = child.data;
            let observed_at = DateTime::<Utc>::from_timestamp(post.created_utc as i64, 0)
                .unwrap_or_else(Utc::now);
            MentionEvent {
                id: post.name,
                keyword: keyword.clone(),
                source: source.to_string(),
                bucket,
                content: format!("{} {}", post.title, post.selftext).trim().to_string(),
                observed_at,
            }
        })
        .collect()
}
