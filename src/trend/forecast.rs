//! Trend forecasting
//!
//! A [`TrendModel`] fits a daily series and returns one smoothed trend value
//! per observed day followed by `horizon` extrapolated values.

use super::normalize::{NormalizedSeries, SeriesColumn};
use crate::config::{ForecastConfig, ForecastModel};

pub trait TrendModel {
    fn name(&self) -> &'static str;

    /// `values.len() + horizon` trend values, or None for fewer than two points
    fn fit_extrapolate(&self, values: &[f64], horizon: usize) -> Option<Vec<f64>>;
}

/// Double exponential smoothing (Holt's linear method)
#[derive(Debug, Clone, Copy)]
pub struct HoltLinear {
    pub alpha: f64,
    pub beta: f64,
}

impl Default for HoltLinear {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            beta: 0.3,
        }
    }
}

impl TrendModel for HoltLinear {
    fn name(&self) -> &'static str {
        "holt"
    }

    fn fit_extrapolate(&self, values: &[f64], horizon: usize) -> Option<Vec<f64>> {
        if values.len() < 2 {
            return None;
        }
        let alpha = self.alpha.clamp(0.0, 1.0);
        let beta = self.beta.clamp(0.0, 1.0);

        let mut level = values[0];
        let mut slope = values[1] - values[0];
        let mut out = Vec::with_capacity(values.len() + horizon);
        out.push(level);

        for &y in &values[1..] {
            let prev = level;
            level = alpha * y + (1.0 - alpha) * (level + slope);
            slope = beta * (level - prev) + (1.0 - beta) * slope;
            out.push(level);
        }

        out.extend((1..=horizon).map(|h| level + h as f64 * slope));
        Some(out)
    }
}

/// Ordinary least-squares straight line through the series
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearTrend;

impl TrendModel for LinearTrend {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn fit_extrapolate(&self, values: &[f64], horizon: usize) -> Option<Vec<f64>> {
        let n = values.len();
        if n < 2 {
            return None;
        }
        let nf = n as f64;
        let mean_x = (nf - 1.0) / 2.0;
        let mean_y = values.iter().sum::<f64>() / nf;

        let (mut cov, mut var) = (0.0, 0.0);
        for (i, &y) in values.iter().enumerate() {
            let dx = i as f64 - mean_x;
            cov += dx * (y - mean_y);
            var += dx * dx;
        }
        let slope = cov / var;
        let intercept = mean_y - slope * mean_x;

        Some(
            (0..n + horizon)
                .map(|x| intercept + slope * x as f64)
                .collect(),
        )
    }
}

/// Model selected by configuration
pub fn model_for(config: &ForecastConfig) -> Box<dyn TrendModel> {
    match config.model {
        ForecastModel::Holt => Box::new(HoltLinear {
            alpha: config.alpha,
            beta: config.beta,
        }),
        ForecastModel::Linear => Box::new(LinearTrend),
    }
}

/// Forecast one column of `series` `horizon` days past its last point
pub fn forecast(
    series: &NormalizedSeries,
    column: SeriesColumn,
    horizon: usize,
    model: &dyn TrendModel,
) -> Option<Vec<f64>> {
    model.fit_extrapolate(&series.column(column), horizon)
}
