use super::*;
use crate::models::{Classification, DataSource};
use chrono::{TimeZone, Utc};
use tempfile::tempdir;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

fn mention(id: &str, keyword: &str) -> MentionEvent {
    MentionEvent {
        id: id.to_string(),
        keyword: keyword.to_string(),
        source: "ukdrill".to_string(),
        bucket: Bucket::Niche,
        content: format!("{} is everywhere", keyword),
        observed_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
    }
}

#[test]
fn test_put_and_case_insensitive_get() {
    let vault = RedbVault::in_memory().unwrap();
    let record = WordRecord::new("Rizz", Classification::EmergingSlang, DataSource::DynamicScrape)
        .with_ratio(0.75);
    vault.put(&record).unwrap();

    let found = vault.get("RIZZ").unwrap().unwrap();
    assert_eq!(found.word, "rizz");
    assert_eq!(found.display, "Rizz");
    assert_eq!(found.slang_ratio, 0.75);
    assert!(vault.get("gyatt").unwrap().is_none());
}

#[test]
fn test_put_replaces_whole_record() {
    let vault = RedbVault::in_memory().unwrap();
    let first = WordRecord::new("peng", Classification::EstablishedSlang, DataSource::SlangArchive)
        .with_era(Some("2010s".to_string()))
        .with_meaning(Some("attractive".to_string()));
    vault.put(&first).unwrap();

    let second = WordRecord::new("peng", Classification::UnknownNeologism, DataSource::NotFound);
    vault.put(&second).unwrap();

    let found = vault.get("peng").unwrap().unwrap();
    assert_eq!(found.classification, Classification::UnknownNeologism);
    assert!(found.origin_era.is_none());
    assert!(found.meaning.is_none());
    assert_eq!(vault.len().unwrap(), 1);
}

#[test]
fn test_list_by_era_pattern() {
    let vault = RedbVault::in_memory().unwrap();
    let eras = [("fopdoodle", "1600s"), ("gigglemug", "Victorian 1800s"), ("bling", "2000s")];
    for (word, era) in eras {
        let rec = WordRecord::new(word, Classification::EstablishedSlang, DataSource::SlangArchive)
            .with_era(Some(era.to_string()));
        vault.put(&rec).unwrap();
    }
    vault
        .put(&WordRecord::new("friend", Classification::Standard, DataSource::Lexicon))
        .unwrap();

    let victorian = vault.list_by_era_pattern("victorian").unwrap();
    assert_eq!(victorian.len(), 1);
    assert_eq!(victorian[0].word, "gigglemug");

    assert_eq!(vault.list_by_era_pattern("1800s").unwrap().len(), 1);
    assert!(vault.list_by_era_pattern("1900s").unwrap().is_empty());
}

#[test]
fn test_daily_count_upsert_replaces() {
    let vault = RedbVault::in_memory().unwrap();
    vault.upsert_daily_count(day(1), Bucket::Niche, "Aura", 5).unwrap();
    vault.upsert_daily_count(day(1), Bucket::Niche, "aura", 7).unwrap();
    vault.upsert_daily_count(day(1), Bucket::Mainstream, "aura", 2).unwrap();
    vault.upsert_daily_count(day(2), Bucket::Niche, "cooked", 9).unwrap();

    let mut counts = vault.daily_counts("AURA").unwrap();
    counts.sort_by_key(|c| (c.date, c.bucket));
    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0].bucket, Bucket::Niche);
    assert_eq!(counts[0].count, 7);
    assert_eq!(counts[1].count, 2);
}

#[test]
fn test_mentions_deduplicated_by_id() {
    let vault = RedbVault::in_memory().unwrap();
    assert!(vault.record_mention(&mention("t3_abc", "rizz")).unwrap());
    assert!(!vault.record_mention(&mention("t3_abc", "rizz")).unwrap());
    assert!(vault.record_mention(&mention("t3_def", "rizz")).unwrap());
    assert!(vault.record_mention(&mention("t3_ghi", "aura")).unwrap());

    assert_eq!(vault.mentions("Rizz").unwrap().len(), 2);
    assert_eq!(vault.mentions("aura").unwrap().len(), 1);
}

#[test]
fn test_store_mentions_commits_log_counts_and_record_together() {
    let vault = RedbVault::in_memory().unwrap();
    let mut mainstream = mention("t3_m", "gyatt");
    mainstream.bucket = Bucket::Mainstream;
    let batch = [mention("t3_a", "gyatt"), mention("t3_a", "gyatt"), mainstream];
    let record = WordRecord::new("gyatt", Classification::EmergingSlang, DataSource::DynamicScrape);

    let stored = vault.store_mentions("Gyatt", &batch, Some(&record)).unwrap();
    assert_eq!(
        stored,
        MentionBatch {
            new_mentions: 2,
            counts_updated: 2
        }
    );
    assert_eq!(vault.mentions("gyatt").unwrap().len(), 2);
    assert!(vault.get("gyatt").unwrap().is_some());

    // Replaying the batch rewrites the same counts instead of adding to them
    let again = vault.store_mentions("gyatt", &batch, None).unwrap();
    assert_eq!(again.new_mentions, 0);
    let mut counts = vault.daily_counts("gyatt").unwrap();
    counts.sort_by_key(|c| c.bucket);
    assert_eq!(counts.len(), 2);
    assert!(counts.iter().all(|c| c.date == day(1) && c.count == 1));
}

#[test]
fn test_store_mentions_ignores_other_keywords_on_same_day() {
    let vault = RedbVault::in_memory().unwrap();
    vault.record_mention(&mention("t3_x", "aura")).unwrap();
    vault
        .store_mentions("rizz", &[mention("t3_y", "rizz")], None)
        .unwrap();
    assert_eq!(vault.daily_counts("rizz").unwrap()[0].count, 1);
    assert!(vault.daily_counts("aura").unwrap().is_empty());
    assert!(vault.get("rizz").unwrap().is_none());
}

#[test]
fn test_persistence() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("nested").join("vault.redb");

    {
        let vault = RedbVault::open(&path).expect("create vault");
        let rec = WordRecord::new("delulu", Classification::EstablishedSlang, DataSource::SlangArchive);
        vault.put(&rec).expect("put");
        vault.upsert_daily_count(day(3), Bucket::Mainstream, "delulu", 11).expect("upsert");
        // Explicit drop to release the file lock before reopening
        drop(vault);
    }

    let vault = RedbVault::open(&path).expect("reopen vault");
    assert_eq!(vault.path(), Some(path.as_path()));
    let rec = vault.get("delulu").unwrap().unwrap();
    assert_eq!(rec.classification, Classification::EstablishedSlang);
    assert_eq!(vault.daily_counts("delulu").unwrap()[0].count, 11);
}
