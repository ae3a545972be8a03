//! Trend analysis pipeline
//!
//! ```text
//! daily counts ──▶ normalize ──▶ forecast (niche, mainstream) ──▶ growth
//!                     │                                            │
//!                     └──── ratio / saturation        cringe alert ┘
//! ```
//!
//! Growth is measured on the forecast trend, from the last observed day to
//! the end of the horizon ("slang velocity").

mod forecast;
mod growth;
mod normalize;

pub use forecast::{forecast, model_for, HoltLinear, LinearTrend, TrendModel};
pub use growth::{cringe_alert, growth_rate, LifecycleStage};
pub use normalize::{normalize, NormalizedSeries, SeriesColumn, SeriesPoint};

use crate::config::{AlertConfig, ForecastConfig};
use crate::models::DailyCount;
use serde::Serialize;
use tracing::debug;

/// Full trend verdict for one word
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendReport {
    pub word: String,
    pub historical: NormalizedSeries,
    /// None when the history is too short to fit
    pub mainstream_trend: Option<Vec<f64>>,
    pub niche_trend: Option<Vec<f64>>,
    pub mainstream_growth: f64,
    pub niche_growth: f64,
    /// Ratio on the last observed day
    pub current_ratio: f64,
    /// Saturation on the last observed day
    pub saturation: f64,
    pub cringe_alert: bool,
    pub verdict: LifecycleStage,
    pub horizon_days: usize,
    pub model: String,
}

impl TrendReport {
    pub fn trend_available(&self) -> bool {
        self.mainstream_trend.is_some() && self.niche_trend.is_some()
    }
}

/// Runs the normalize → forecast → evaluate pipeline
pub struct TrendAnalyzer {
    model: Box<dyn TrendModel>,
    horizon: usize,
    alert: AlertConfig,
}

impl TrendAnalyzer {
    pub fn new(forecast: &ForecastConfig, alert: AlertConfig) -> Self {
        Self {
            model: model_for(forecast),
            horizon: forecast.horizon_days,
            alert,
        }
    }

    pub fn with_model(model: Box<dyn TrendModel>, horizon: usize, alert: AlertConfig) -> Self {
        Self {
            model,
            horizon,
            alert,
        }
    }

    /// None when there are no counts at all
    pub fn analyze(&self, word: &str, counts: &[DailyCount]) -> Option<TrendReport> {
        let historical = normalize(counts);
        let last = *historical.last()?;

        let mainstream_trend = forecast(
            &historical,
            SeriesColumn::Mainstream,
            self.horizon,
            self.model.as_ref(),
        );
        let niche_trend = forecast(
            &historical,
            SeriesColumn::Niche,
            self.horizon,
            self.model.as_ref(),
        );

        let growth = |trend: &Option<Vec<f64>>| {
            trend
                .as_deref()
                .map(|t| growth_rate(t, self.horizon))
                .unwrap_or(0.0)
        };
        let mainstream_growth = growth(&mainstream_trend);
        let niche_growth = growth(&niche_trend);

        let alert = cringe_alert(mainstream_growth, niche_growth, &self.alert);
        let verdict = LifecycleStage::assess(
            alert,
            historical.total_niche(),
            historical.total_mainstream(),
            &self.alert,
        );

        debug!(
            "{}: {} days, mainstream {:+.3}, niche {:+.3}, {}",
            word,
            historical.len(),
            mainstream_growth,
            niche_growth,
            verdict
        );

        Some(TrendReport {
            word: word.to_string(),
            historical,
            mainstream_trend,
            niche_trend,
            mainstream_growth,
            niche_growth,
            current_ratio: last.ratio,
            saturation: last.saturation,
            cringe_alert: alert,
            verdict,
            horizon_days: self.horizon,
            model: self.model.name().to_string(),
        })
    }
}
