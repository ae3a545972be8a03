//! Timeline anchor sampling
//!
//! Places a word on a 400-year axis next to one randomly chosen historical
//! slang term per century, so its age can be read against known reference
//! points. Era metadata is free text ("Victorian 1800s", "1920s flapper",
//! "2026 (New)"), mapped to an approximate year by [`era_to_year`].

use crate::models::WordRecord;
use crate::vault::{VaultResult, WordVault};
use chrono::{Datelike, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Era substrings sampled for anchors, oldest first
pub const CENTURY_BUCKETS: [&str; 5] = ["1600s", "1700s", "1800s", "1900s", "2000s"];

/// Ordered (needles, year) table; the first entry with a matching needle wins
const ERA_TABLE: &[(&[&str], i32)] = &[
    (&["1600"], 1650),
    (&["1700", "1750"], 1750),
    (&["1770"], 1770),
    (&["1800"], 1850),
    (&["victorian"], 1880),
    (&["1830"], 1830),
    (&["1840"], 1840),
    (&["1880"], 1880),
    (&["1890", "flapper"], 1895),
    (&["1900"], 1905),
    (&["1910"], 1915),
    (&["1920"], 1925),
    (&["1930"], 1935),
    (&["1950"], 1955),
    (&["1960"], 1965),
    (&["1980"], 1985),
    (&["1990"], 1995),
    (&["2000"], 2005),
    (&["2010"], 2015),
    (&["2020"], 2023),
    (&["2021"], 2021),
    (&["2022"], 2022),
    (&["2023"], 2023),
    (&["2024"], 2024),
    (&["2025"], 2025),
];

static YEAR_RE: OnceLock<Regex> = OnceLock::new();

fn year_re() -> &'static Regex {
    YEAR_RE.get_or_init(|| Regex::new(r"\d{4}").expect("valid regex"))
}

/// Approximate year for an era description. Never fails: unrecognized or
/// empty text maps to the current year.
pub fn era_to_year(era: &str) -> i32 {
    era_to_year_or(era, Utc::now().year())
}

/// [`era_to_year`] with an explicit fallback year
pub fn era_to_year_or(era: &str, fallback: i32) -> i32 {
    let era = era.to_lowercase();
    if era.trim().is_empty() {
        return fallback;
    }

    if let Some((_, year)) = ERA_TABLE
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| era.contains(n)))
    {
        return *year;
    }

    year_re()
        .find(&era)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(fallback)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorRole {
    Target,
    Anchor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineAnchor {
    pub word: String,
    pub year: i32,
    pub role: AnchorRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub era: Option<String>,
}

impl TimelineAnchor {
    fn from_record(record: &WordRecord, role: AnchorRole) -> Self {
        let era = record.origin_era.clone();
        Self {
            word: display_or_key(record),
            year: era_to_year(era.as_deref().unwrap_or_default()),
            role,
            era,
        }
    }
}

fn display_or_key(record: &WordRecord) -> String {
    if record.display.is_empty() {
        record.word.clone()
    } else {
        record.display.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub target: TimelineAnchor,
    /// At most one per century bucket, in bucket order
    pub anchors: Vec<TimelineAnchor>,
}

impl Timeline {
    /// Target and anchors together, oldest first (stable on ties)
    pub fn sorted(&self) -> Vec<&TimelineAnchor> {
        let mut all: Vec<&TimelineAnchor> = self.anchors.iter().collect();
        all.push(&self.target);
        all.sort_by_key(|a| a.year);
        all
    }

    /// Years separating the target from the oldest anchor
    pub fn span(&self) -> i32 {
        self.sorted()
            .first()
            .map(|oldest| self.target.year - oldest.year)
            .unwrap_or(0)
    }
}

/// Build a timeline for `target`, drawing one random vault record per
/// century bucket. Buckets with no matching records are left out; the
/// target never anchors itself.
pub fn sample_anchors<R: Rng + ?Sized>(
    target: &WordRecord,
    vault: &dyn WordVault,
    rng: &mut R,
) -> VaultResult<Timeline> {
    let mut anchors = Vec::new();
    for bucket in CENTURY_BUCKETS {
        let candidates: Vec<WordRecord> = vault
            .list_by_era_pattern(bucket)?
            .into_iter()
            .filter(|r| r.word != target.word)
            .collect();
        if let Some(pick) = candidates.choose(rng) {
            anchors.push(TimelineAnchor::from_record(pick, AnchorRole::Anchor));
        }
    }

    Ok(Timeline {
        target: TimelineAnchor::from_record(target, AnchorRole::Target),
        anchors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Classification, DataSource};
    use crate::vault::RedbVault;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn record(word: &str, era: &str) -> WordRecord {
        WordRecord::new(word, Classification::EstablishedSlang, DataSource::SlangArchive)
            .with_era(Some(era.to_string()))
    }

    #[test]
    fn test_era_table_order() {
        assert_eq!(era_to_year_or("1600s", 0), 1650);
        assert_eq!(era_to_year_or("Mid 1750s", 0), 1750);
        // "1800" is checked before "victorian"
        assert_eq!(era_to_year_or("Victorian 1800s", 0), 1850);
        assert_eq!(era_to_year_or("Victorian", 0), 1880);
        assert_eq!(era_to_year_or("Flapper era", 0), 1895);
        assert_eq!(era_to_year_or("Early 1900s (1920s)", 0), 1905);
        assert_eq!(era_to_year_or("1920s", 0), 1925);
        assert_eq!(era_to_year_or("2010s", 0), 2015);
        assert_eq!(era_to_year_or("2020s", 0), 2023);
        assert_eq!(era_to_year_or("2022", 0), 2022);
    }

    #[test]
    fn test_era_fallbacks() {
        assert_eq!(era_to_year_or("2026 (New)", 0), 2026);
        assert_eq!(era_to_year_or("circa 1066", 0), 1066);
        assert_eq!(era_to_year_or("", 2030), 2030);
        assert_eq!(era_to_year_or("   ", 2030), 2030);
        assert_eq!(era_to_year_or("Ancient times", 2030), 2030);
        assert_eq!(era_to_year(""), Utc::now().year());
    }

    #[test]
    fn test_sample_anchors_one_per_bucket() {
        let vault = RedbVault::in_memory().unwrap();
        for (w, e) in [
            ("fopdoodle", "1600s"),
            ("bedswerver", "1600s"),
            ("gigglemug", "Victorian 1800s"),
            ("bling", "2000s"),
        ] {
            vault.put(&record(w, e)).unwrap();
        }
        let target = record("rizz", "2022");
        vault.put(&target).unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let timeline = sample_anchors(&target, &vault, &mut rng).unwrap();

        assert_eq!(timeline.target.year, 2022);
        assert_eq!(timeline.target.role, AnchorRole::Target);
        assert_eq!(timeline.anchors.len(), 3);
        assert!(["fopdoodle", "bedswerver"].contains(&timeline.anchors[0].word.as_str()));
        assert_eq!(timeline.anchors[1].year, 1850);
        assert_eq!(timeline.anchors[2].word, "bling");
        assert!(timeline.anchors.iter().all(|a| a.role == AnchorRole::Anchor));
    }

    #[test]
    fn test_target_never_anchors_itself() {
        let vault = RedbVault::in_memory().unwrap();
        let target = record("bling", "2000s");
        vault.put(&target).unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let timeline = sample_anchors(&target, &vault, &mut rng).unwrap();
        assert!(timeline.anchors.is_empty());
        assert_eq!(timeline.span(), 0);
    }

    #[test]
    fn test_sorted_is_chronological() {
        let timeline = Timeline {
            target: TimelineAnchor {
                word: "rizz".into(),
                year: 2022,
                role: AnchorRole::Target,
                era: None,
            },
            anchors: vec![
                TimelineAnchor {
                    word: "bling".into(),
                    year: 2005,
                    role: AnchorRole::Anchor,
                    era: None,
                },
                TimelineAnchor {
                    word: "fopdoodle".into(),
                    year: 1650,
                    role: AnchorRole::Anchor,
                    era: None,
                },
            ],
        };
        let years: Vec<i32> = timeline.sorted().iter().map(|a| a.year).collect();
        assert_eq!(years, vec![1650, 2005, 2022]);
        assert_eq!(timeline.span(), 372);
    }
}
