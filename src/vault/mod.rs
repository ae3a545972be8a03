//! Word Vault - durable store of classification records and mention counts
//!
//! The vault holds three things:
//! - word → [`WordRecord`] (whole-record replace, never merged)
//! - the mention log, deduplicated by event id
//! - (date, bucket, word) → count, with replace-on-conflict upserts
//!
//! [`RedbVault`] is the shipped implementation; anything implementing
//! [`WordVault`] can stand in for it.

mod redb_vault;

pub use redb_vault::RedbVault;

use crate::models::{Bucket, DailyCount, MentionEvent, WordRecord};
use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the vault
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Failed to open vault: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Vault transaction failed: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Vault table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Vault storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Vault commit failed: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Corrupt vault record: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Cannot create vault directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type VaultResult<T> = Result<T, VaultError>;

/// What one [`WordVault::store_mentions`] call changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MentionBatch {
    /// Mentions not previously in the log
    pub new_mentions: usize,
    /// (day, bucket) counts rewritten
    pub counts_updated: usize,
}

/// Storage contract consumed by the cascade, the trend pipeline and the
/// anchor sampler.
pub trait WordVault {
    /// Case-insensitive lookup
    fn get(&self, word: &str) -> VaultResult<Option<WordRecord>>;

    /// Replace the record for `record.word` in a single transaction
    fn put(&self, record: &WordRecord) -> VaultResult<()>;

    /// Records whose era text contains `pattern` (case-insensitive)
    fn list_by_era_pattern(&self, pattern: &str) -> VaultResult<Vec<WordRecord>>;

    /// Set the count for (date, bucket, word), replacing any previous value
    fn upsert_daily_count(
        &self,
        date: NaiveDate,
        bucket: Bucket,
        word: &str,
        count: u64,
    ) -> VaultResult<()>;

    /// Replace several counts for one word
    fn upsert_daily_counts(&self, word: &str, counts: &[DailyCount]) -> VaultResult<()> {
        for c in counts {
            self.upsert_daily_count(c.date, c.bucket, word, c.count)?;
        }
        Ok(())
    }

    /// All stored counts for a word, in no particular order
    fn daily_counts(&self, word: &str) -> VaultResult<Vec<DailyCount>>;

    /// Append to the mention log. Returns false if the id was already present.
    fn record_mention(&self, event: &MentionEvent) -> VaultResult<bool>;

    /// Log `mentions` for `word`, rewrite the daily counts of every day they
    /// touch from the deduplicated log, and put `record` if given. All of it
    /// commits together or not at all.
    fn store_mentions(
        &self,
        word: &str,
        mentions: &[MentionEvent],
        record: Option<&WordRecord>,
    ) -> VaultResult<MentionBatch>;

    /// Logged mentions for a keyword
    fn mentions(&self, word: &str) -> VaultResult<Vec<MentionEvent>>;

    /// Every stored record
    fn records(&self) -> VaultResult<Vec<WordRecord>>;

    fn len(&self) -> VaultResult<usize> {
        Ok(self.records()?.len())
    }
}

#[cfg(test)]
mod tests;
