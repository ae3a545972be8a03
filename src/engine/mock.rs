//! Synthetic mention history
//!
//! Writes daily counts with three recognizable shapes so the trend pipeline
//! can be exercised without any live collection.

use crate::models::{Bucket, DailyCount};
use crate::vault::{VaultResult, WordVault};
use chrono::{Duration, NaiveDate};
use rand::Rng;
use tracing::info;

/// Shape of a synthetic series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockProfile {
    /// Flat, busy niche; exponentially rising mainstream
    Rising,
    /// Fading niche; large flat mainstream
    Saturated,
    /// Strong niche, small mainstream, both flat
    StableNiche,
}

impl MockProfile {
    /// Expected (niche, mainstream) on day `i` plus Gaussian-ish noise
    fn sample<R: Rng>(&self, i: u32, rng: &mut R) -> (u64, u64) {
        let i = i as f64;
        let (niche, mainstream) = match self {
            MockProfile::Rising => (
                50.0 + noise(rng, 5.0),
                10.0 * (0.05 * i).exp() + noise(rng, 2.0),
            ),
            MockProfile::Saturated => (
                (50.0 - 0.5 * i).max(10.0) + noise(rng, 5.0),
                300.0 + noise(rng, 20.0),
            ),
            MockProfile::StableNiche => (80.0 + noise(rng, 10.0), 20.0 + noise(rng, 5.0)),
        };
        (to_count(niche), to_count(mainstream))
    }
}

/// Built-in demo words
pub const MOCK_WORDS: [(&str, MockProfile); 3] = [
    ("aura", MockProfile::Rising),
    ("cooked", MockProfile::Saturated),
    ("peng", MockProfile::StableNiche),
];

/// Approximately normal noise (Irwin-Hall, 12 uniforms)
fn noise<R: Rng>(rng: &mut R, sd: f64) -> f64 {
    let sum: f64 = (0..12).map(|_| rng.random::<f64>()).sum();
    (sum - 6.0) * sd
}

fn to_count(x: f64) -> u64 {
    if x.is_finite() && x > 0.0 {
        x as u64
    } else {
        0
    }
}

/// Write `days` days of counts ending at `end` for every profile.
///
/// Uses replace semantics, so re-running overwrites instead of
/// accumulating. Returns the number of (day, bucket) counts written.
pub fn generate_mock_history<R: Rng>(
    vault: &dyn WordVault,
    profiles: &[(&str, MockProfile)],
    days: u32,
    end: NaiveDate,
    rng: &mut R,
) -> VaultResult<usize> {
    let start = end - Duration::days(i64::from(days.saturating_sub(1)));
    let mut written = 0;

    for (word, profile) in profiles {
        let mut counts = Vec::with_capacity(days as usize * 2);
        for i in 0..days {
            let date = start + Duration::days(i64::from(i));
            let (niche, mainstream) = profile.sample(i, rng);
            counts.push(DailyCount {
                date,
                bucket: Bucket::Niche,
                count: niche,
            });
            counts.push(DailyCount {
                date,
                bucket: Bucket::Mainstream,
                count: mainstream,
            });
        }
        vault.upsert_daily_counts(word, &counts)?;
        written += counts.len();
    }

    info!("Generated {} mock daily counts", written);
    Ok(written)
}
