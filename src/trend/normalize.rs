//! Daily-count normalization

use crate::models::{Bucket, DailyCount};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One calendar day of a normalized series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub niche: u64,
    pub mainstream: u64,
    pub total: u64,
    /// (mainstream + 1) / (niche + 1)
    pub ratio: f64,
    /// mainstream / (total + 1)
    pub saturation: f64,
}

impl SeriesPoint {
    fn new(date: NaiveDate, niche: u64, mainstream: u64) -> Self {
        let total = niche.saturating_add(mainstream);
        Self {
            date,
            niche,
            mainstream,
            total,
            ratio: (mainstream as f64 + 1.0) / (niche as f64 + 1.0),
            saturation: mainstream as f64 / (total as f64 + 1.0),
        }
    }
}

/// Column of a [`NormalizedSeries`] that can be forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesColumn {
    Niche,
    Mainstream,
    Total,
    Ratio,
    Saturation,
}

impl SeriesColumn {
    pub fn value(&self, point: &SeriesPoint) -> f64 {
        match self {
            SeriesColumn::Niche => point.niche as f64,
            SeriesColumn::Mainstream => point.mainstream as f64,
            SeriesColumn::Total => point.total as f64,
            SeriesColumn::Ratio => point.ratio,
            SeriesColumn::Saturation => point.saturation,
        }
    }
}

/// Gap-free daily series, oldest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSeries {
    points: Vec<SeriesPoint>,
}

impl NormalizedSeries {
    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&SeriesPoint> {
        self.points.last()
    }

    pub fn column(&self, column: SeriesColumn) -> Vec<f64> {
        self.points.iter().map(|p| column.value(p)).collect()
    }

    pub fn total_niche(&self) -> u64 {
        self.points.iter().fold(0u64, |acc, p| acc.saturating_add(p.niche))
    }

    pub fn total_mainstream(&self) -> u64 {
        self.points.iter().fold(0u64, |acc, p| acc.saturating_add(p.mainstream))
    }
}

/// Build a contiguous daily series from sparse, unordered counts.
///
/// Every day between the first and last observed date gets a row; days
/// with no counts are zero. Duplicate (date, bucket) entries are summed.
pub fn normalize(counts: &[DailyCount]) -> NormalizedSeries {
    let mut by_day: BTreeMap<NaiveDate, (u64, u64)> = BTreeMap::new();
    for c in counts {
        let entry = by_day.entry(c.date).or_insert((0, 0));
        match c.bucket {
            Bucket::Niche => entry.0 = entry.0.saturating_add(c.count),
            Bucket::Mainstream => entry.1 = entry.1.saturating_add(c.count),
        }
    }

    let (Some(first), Some(last)) = (
        by_day.keys().next().copied(),
        by_day.keys().next_back().copied(),
    ) else {
        return NormalizedSeries::default();
    };

    let points = first
        .iter_days()
        .take_while(|d| *d <= last)
        .map(|date| {
            let (niche, mainstream) = by_day.get(&date).copied().unwrap_or((0, 0));
            SeriesPoint::new(date, niche, mainstream)
        })
        .collect();

    NormalizedSeries { points }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(day: u32, bucket: Bucket, count: u64) -> DailyCount {
        DailyCount {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            bucket,
            count,
        }
    }

    #[test]
    fn test_empty_input() {
        let series = normalize(&[]);
        assert!(series.is_empty());
        assert!(series.last().is_none());
    }

    #[test]
    fn test_gaps_are_zero_filled() {
        let series = normalize(&[
            count(5, Bucket::Mainstream, 4),
            count(1, Bucket::Niche, 3),
        ]);
        assert_eq!(series.len(), 5);

        let dates: Vec<_> = series.points().iter().map(|p| p.date).collect();
        for pair in dates.windows(2) {
            assert_eq!(pair[1] - pair[0], chrono::Duration::days(1));
        }

        let gap = series.points()[2];
        assert_eq!(gap.total, 0);
        assert_eq!(gap.ratio, 1.0);
        assert_eq!(gap.saturation, 0.0);
    }

    #[test]
    fn test_metrics() {
        let series = normalize(&[count(1, Bucket::Niche, 1), count(1, Bucket::Mainstream, 3)]);
        let p = series.points()[0];
        assert_eq!(p.total, 4);
        assert_eq!(p.ratio, 2.0);
        assert_eq!(p.saturation, 0.6);
    }

    #[test]
    fn test_duplicate_keys_sum() {
        let series = normalize(&[count(2, Bucket::Niche, 2), count(2, Bucket::Niche, 5)]);
        assert_eq!(series.points()[0].niche, 7);
        assert_eq!(series.total_niche(), 7);
        assert_eq!(series.total_mainstream(), 0);
    }

    #[test]
    fn test_huge_counts_saturate() {
        let series = normalize(&[
            count(1, Bucket::Niche, u64::MAX),
            count(1, Bucket::Niche, 1),
            count(1, Bucket::Mainstream, u64::MAX),
            count(2, Bucket::Niche, 5),
        ]);
        let p = series.points()[0];
        assert_eq!(p.niche, u64::MAX);
        assert_eq!(p.total, u64::MAX);
        assert_eq!(series.total_niche(), u64::MAX);
        assert_eq!(series.total_mainstream(), u64::MAX);
    }

    #[test]
    fn test_column_extraction() {
        let series = normalize(&[count(1, Bucket::Niche, 2), count(2, Bucket::Mainstream, 6)]);
        assert_eq!(series.column(SeriesColumn::Niche), vec![2.0, 0.0]);
        assert_eq!(series.column(SeriesColumn::Total), vec![2.0, 6.0]);
    }
}
