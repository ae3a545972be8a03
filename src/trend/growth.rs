//! Growth rates, the cringe alert and lifecycle staging

use crate::config::AlertConfig;
use serde::{Deserialize, Serialize};

/// Relative change of a trend over its last `horizon` steps.
///
/// Compares the value `horizon` steps before the end with the final value.
/// Returns 0.0 when the trend is too short or the starting value is not
/// positive.
pub fn growth_rate(trend: &[f64], horizon: usize) -> f64 {
    if trend.len() <= horizon {
        return 0.0;
    }
    let current = trend[trend.len() - horizon - 1];
    let future = trend[trend.len() - 1];
    if current <= 0.0 {
        return 0.0;
    }
    (future - current) / current
}

/// True when mainstream adoption is outpacing its niche origin.
///
/// With a flat or shrinking niche any mainstream growth above
/// `dying_niche_threshold` fires; otherwise mainstream must grow faster
/// than `alert_multiplier` times the niche rate.
pub fn cringe_alert(mainstream_growth: f64, niche_growth: f64, config: &AlertConfig) -> bool {
    if niche_growth <= 0.0 {
        return mainstream_growth > config.dying_niche_threshold;
    }
    mainstream_growth > config.alert_multiplier * niche_growth
}

/// Coarse lifecycle verdict for a word with trend data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleStage {
    /// Still mostly used where it started
    Niche,
    /// Widely used, roughly in step with its origin
    Peak,
    /// Saturated: mainstream volume dwarfs niche volume
    Mainstream,
    /// Mainstream growth outpacing niche growth
    Cringe,
    /// No usable mention data
    Unknown,
}

impl LifecycleStage {
    /// Stage from the cringe alert and total mention volumes
    pub fn assess(cringe: bool, niche_total: u64, mainstream_total: u64, config: &AlertConfig) -> Self {
        if cringe {
            return LifecycleStage::Cringe;
        }
        if niche_total == 0 && mainstream_total == 0 {
            return LifecycleStage::Unknown;
        }
        if niche_total > mainstream_total {
            return LifecycleStage::Niche;
        }
        if mainstream_total as f64 > config.alert_multiplier * niche_total as f64 {
            return LifecycleStage::Mainstream;
        }
        LifecycleStage::Peak
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleStage::Niche => "Niche",
            LifecycleStage::Peak => "Peak",
            LifecycleStage::Mainstream => "Mainstream",
            LifecycleStage::Cringe => "Cringe",
            LifecycleStage::Unknown => "Unknown",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            LifecycleStage::Niche => "underground, still owned by its niche",
            LifecycleStage::Peak => "peak usage, niche and mainstream in balance",
            LifecycleStage::Mainstream => "saturated, everyone is saying it",
            LifecycleStage::Cringe => "going mainstream too fast",
            LifecycleStage::Unknown => "not enough data",
        }
    }
}

impl std::fmt::Display for LifecycleStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
