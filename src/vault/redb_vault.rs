//! redb-backed vault

use super::{MentionBatch, VaultError, VaultResult, WordVault};
use crate::models::{normalize_word, Bucket, DailyCount, MentionEvent, WordRecord};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use redb::{Database, ReadableTable, TableDefinition};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

// redb table definitions
const WORDS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("words");
const MENTIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("mentions");
/// (word, yyyy-mm-dd, bucket) -> count
const DAILY_TABLE: TableDefinition<(&str, &str, &str), u64> = TableDefinition::new("daily_counts");

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Vault persisted in a single redb file
pub struct RedbVault {
    db: Database,
    path: Option<PathBuf>,
}

impl RedbVault {
    /// Create or open a vault file
    pub fn open(path: &Path) -> VaultResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| VaultError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let db = Database::create(path)?;
        let vault = Self {
            db,
            path: Some(path.to_path_buf()),
        };
        vault.init_tables()?;
        debug!("Opened vault at {}", path.display());
        Ok(vault)
    }

    /// Non-persistent vault (tests, dry runs)
    pub fn in_memory() -> VaultResult<Self> {
        let db = redb::Builder::new().create_with_backend(redb::backends::InMemoryBackend::new())?;
        let vault = Self { db, path: None };
        vault.init_tables()?;
        Ok(vault)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Create every table up front so readers never see a missing one
    fn init_tables(&self) -> VaultResult<()> {
        let txn = self.db.begin_write()?;
        {
            txn.open_table(WORDS_TABLE)?;
            txn.open_table(MENTIONS_TABLE)?;
            txn.open_table(DAILY_TABLE)?;
        }
        txn.commit()?;
        Ok(())
    }
}

impl WordVault for RedbVault {
    fn get(&self, word: &str) -> VaultResult<Option<WordRecord>> {
        let key = normalize_word(word);
        let txn = self.db.begin_read()?;
        let table = txn.open_table(WORDS_TABLE)?;
        let record = match table.get(key.as_str())? {
            Some(value) => Some(serde_json::from_slice(value.value())?),
            None => None,
        };
        Ok(record)
    }

    fn put(&self, record: &WordRecord) -> VaultResult<()> {
        let key = normalize_word(&record.word);
        let value = serde_json::to_vec(record)?;

        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(WORDS_TABLE)?;
            table.insert(key.as_str(), value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    fn list_by_era_pattern(&self, pattern: &str) -> VaultResult<Vec<WordRecord>> {
        let needle = pattern.to_lowercase();
        Ok(self
            .records()?
            .into_iter()
            .filter(|r| {
                r.origin_era
                    .as_deref()
                    .map(|era| era.to_lowercase().contains(&needle))
                    .unwrap_or(false)
            })
            .collect())
    }

    fn upsert_daily_count(
        &self,
        date: NaiveDate,
        bucket: Bucket,
        word: &str,
        count: u64,
    ) -> VaultResult<()> {
        self.upsert_daily_counts(
            word,
            &[DailyCount {
                date,
                bucket,
                count,
            }],
        )
    }

    fn upsert_daily_counts(&self, word: &str, counts: &[DailyCount]) -> VaultResult<()> {
        let word = normalize_word(word);
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(DAILY_TABLE)?;
            for c in counts {
                let date = c.date.format(DATE_FORMAT).to_string();
                table.insert((word.as_str(), date.as_str(), c.bucket.as_str()), c.count)?;
            }
        }
        txn.commit()?;
        Ok(())
    }

    fn daily_counts(&self, word: &str) -> VaultResult<Vec<DailyCount>> {
        let word = normalize_word(word);
        let txn = self.db.begin_read()?;
        let table = txn.open_table(DAILY_TABLE)?;

        let mut counts = Vec::new();
        for item in table.iter()? {
            let (key, value) = item?;
            let (w, date, bucket) = key.value();
            if w != word {
                continue;
            }
            let (Ok(date), Some(bucket)) =
                (NaiveDate::parse_from_str(date, DATE_FORMAT), Bucket::parse(bucket))
            else {
                warn!("Skipping malformed daily count key ({}, {}, {})", w, date, bucket);
                continue;
            };
            counts.push(DailyCount {
                date,
                bucket,
                count: value.value(),
            });
        }
        Ok(counts)
    }

    fn record_mention(&self, event: &MentionEvent) -> VaultResult<bool> {
        let value = serde_json::to_vec(event)?;
        let txn = self.db.begin_write()?;
        let inserted = {
            let mut table = txn.open_table(MENTIONS_TABLE)?;
            let exists = table.get(event.id.as_str())?.is_some();
            if !exists {
                table.insert(event.id.as_str(), value.as_slice())?;
            }
            !exists
        };
        txn.commit()?;
        Ok(inserted)
    }

    fn store_mentions(
        &self,
        word: &str,
        mentions: &[MentionEvent],
        record: Option<&WordRecord>,
    ) -> VaultResult<MentionBatch> {
        let word = normalize_word(word);
        let mut batch = MentionBatch::default();

        let txn = self.db.begin_write()?;
        {
            let mut log = txn.open_table(MENTIONS_TABLE)?;
            let mut touched: BTreeSet<NaiveDate> = BTreeSet::new();
            for event in mentions {
                if log.get(event.id.as_str())?.is_none() {
                    let value = serde_json::to_vec(event)?;
                    log.insert(event.id.as_str(), value.as_slice())?;
                    batch.new_mentions += 1;
                }
                touched.insert(event.observed_at.date_naive());
            }

            let mut per_day: BTreeMap<(NaiveDate, Bucket), u64> = BTreeMap::new();
            for item in log.iter()? {
                let (_, value) = item?;
                let event: MentionEvent = serde_json::from_slice(value.value())?;
                let date = event.observed_at.date_naive();
                if touched.contains(&date) && normalize_word(&event.keyword) == word {
                    *per_day.entry((date, event.bucket)).or_insert(0) += 1;
                }
            }

            let mut daily = txn.open_table(DAILY_TABLE)?;
            for ((date, bucket), count) in &per_day {
                let date = date.format(DATE_FORMAT).to_string();
                daily.insert((word.as_str(), date.as_str(), bucket.as_str()), *count)?;
            }
            batch.counts_updated = per_day.len();

            if let Some(record) = record {
                let value = serde_json::to_vec(record)?;
                let mut words = txn.open_table(WORDS_TABLE)?;
                words.insert(normalize_word(&record.word).as_str(), value.as_slice())?;
            }
        }
        txn.commit()?;
        Ok(batch)
    }

    fn mentions(&self, word: &str) -> VaultResult<Vec<MentionEvent>> {
        let word = normalize_word(word);
        let txn = self.db.begin_read()?;
        let table = txn.open_table(MENTIONS_TABLE)?;

        let mut events = Vec::new();
        for item in table.iter()? {
            let (_, value) = item?;
            let event: MentionEvent = serde_json::from_slice(value.value())?;
            if normalize_word(&event.keyword) == word {
                events.push(event);
            }
        }
        Ok(events)
    }

    fn records(&self) -> VaultResult<Vec<WordRecord>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(WORDS_TABLE)?;

        let mut records = Vec::new();
        for item in table.iter()? {
            let (_, value) = item?;
            records.push(serde_json::from_slice(value.value())?);
        }
        Ok(records)
    }
}

// redb::Database handles cleanup on Drop automatically
