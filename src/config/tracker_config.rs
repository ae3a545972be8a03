//! Tracker configuration support
//!
//! Loads configuration from `slangtrack.toml` or `.slangtrackrc.json` in the
//! working directory, or from an explicit path.
//!
//! # Configuration Format
//!
//! ```toml
//! # slangtrack.toml
//!
//! [sources]
//! niche_sources = ["london", "ukdrill"]
//! mainstream_sources = ["teenagers", "AskReddit"]
//! global_source = "all"
//!
//! [scoring]
//! score_threshold = 0.6
//!
//! [alert]
//! alert_multiplier = 3.0
//! dying_niche_threshold = 0.1
//!
//! [forecast]
//! horizon_days = 14
//! model = "holt"
//!
//! [collector]
//! request_delay_ms = 1000
//!
//! [resolution]
//! order = "lexicon_first"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = "slangtrack.toml";
pub const JSON_CONFIG_FILE_NAME: &str = ".slangtrackrc.json";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub sources: SourcesConfig,
    pub scoring: ScoringConfig,
    pub alert: AlertConfig,
    pub forecast: ForecastConfig,
    pub collector: CollectorConfig,
    pub resolution: ResolutionConfig,
    pub resources: ResourcesConfig,
}

/// Named source buckets queried by the dynamic layer
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Specialist communities, the early-adoption signal
    pub niche_sources: Vec<String>,
    /// Broad communities, the saturation signal
    pub mainstream_sources: Vec<String>,
    /// Site-wide feed tried last when every bucket comes back empty.
    /// Empty disables the fallback.
    pub global_source: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            niche_sources: vec!["london".to_string(), "ukdrill".to_string()],
            mainstream_sources: vec!["teenagers".to_string(), "AskReddit".to_string()],
            global_source: "all".to_string(),
        }
    }
}

impl SourcesConfig {
    pub fn is_niche(&self, source: &str) -> bool {
        self.niche_sources
            .iter()
            .any(|s| s.eq_ignore_ascii_case(source))
    }

    /// The fallback feed, if enabled
    pub fn global(&self) -> Option<&str> {
        let source = self.global_source.trim();
        (!source.is_empty()).then_some(source)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// `is_slang` iff score is strictly above this
    pub score_threshold: f64,
    /// |compound| above which a context counts as high intensity
    pub intensity_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            score_threshold: 0.6,
            intensity_threshold: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Mainstream growth must exceed niche growth times this
    pub alert_multiplier: f64,
    /// Mainstream growth that triggers when niche is flat or shrinking
    pub dying_niche_threshold: f64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            alert_multiplier: 3.0,
            dying_niche_threshold: 0.1,
        }
    }
}

/// Which trend model family the forecaster uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ForecastModel {
    /// Double exponential smoothing (level + trend)
    #[default]
    Holt,
    /// Ordinary least-squares straight line
    Linear,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub horizon_days: usize,
    pub model: ForecastModel,
    /// Level smoothing factor (Holt)
    pub alpha: f64,
    /// Trend smoothing factor (Holt)
    pub beta: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon_days: 14,
            model: ForecastModel::Holt,
            alpha: 0.5,
            beta: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CollectorConfig {
    pub base_url: String,
    pub user_agent: String,
    /// Results requested per source
    pub limit: u32,
    pub timeout_secs: u64,
    /// Pause between consecutive upstream calls
    pub request_delay_ms: u64,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.reddit.com".to_string(),
            user_agent: "SlangResearchBot/1.0".to_string(),
            limit: 100,
            timeout_secs: 10,
            request_delay_ms: 1000,
        }
    }
}

/// Relative order of the two static layers in the cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionOrder {
    #[default]
    LexiconFirst,
    ArchiveFirst,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResolutionConfig {
    pub order: ResolutionOrder,
}

/// Optional resource files layered over the built-in data
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResourcesConfig {
    /// Newline-separated word lists
    pub vocabulary_files: Vec<PathBuf>,
    /// `word<TAB>sense_count` files
    pub sense_files: Vec<PathBuf>,
    /// Slang archive (.toml or .json)
    pub archive_files: Vec<PathBuf>,
    /// Skip the embedded vocabulary and archive
    pub skip_builtin: bool,
}

/// Load configuration, falling back to defaults on any problem.
///
/// An explicit path wins; otherwise `slangtrack.toml` then
/// `.slangtrackrc.json` are tried in `dir`.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> TrackerConfig {
    if let Some(path) = explicit {
        match load_config_file(path) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
                return TrackerConfig::default();
            }
        }
    }

    for name in [CONFIG_FILE_NAME, JSON_CONFIG_FILE_NAME] {
        let path = dir.join(name);
        if !path.exists() {
            continue;
        }
        match load_config_file(&path) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
            }
        }
    }

    debug!("No config found, using defaults");
    TrackerConfig::default()
}

/// Load a config file, picking the format from its extension
pub fn load_config_file(path: &Path) -> anyhow::Result<TrackerConfig> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let config = if is_json {
        serde_json::from_str(&content)?
    } else {
        toml::from_str(&content)?
    };
    Ok(config)
}

/// Example config written by `slangtrack init`
pub const EXAMPLE_CONFIG: &str = r#"# slangtrack configuration

[sources]
# Specialist communities (early-adoption signal)
niche_sources = ["london", "ukdrill"]
# Broad communities (saturation signal)
mainstream_sources = ["teenagers", "AskReddit"]
# Tried only when every source above finds nothing ("" disables)
global_source = "all"

[scoring]
score_threshold = 0.6
intensity_threshold = 0.5

[alert]
# Cringe when mainstream growth > alert_multiplier * niche growth
alert_multiplier = 3.0
# ...or, with a flat/dying niche, when mainstream growth exceeds this
dying_niche_threshold = 0.1

[forecast]
horizon_days = 14
model = "holt"   # or "linear"
alpha = 0.5
beta = 0.3

[collector]
base_url = "https://www.reddit.com"
user_agent = "SlangResearchBot/1.0"
limit = 100
timeout_secs = 10
request_delay_ms = 1000

[resolution]
order = "lexicon_first"   # or "archive_first"

[resources]
# vocabulary_files = ["words.txt"]
# sense_files = ["senses.tsv"]
# archive_files = ["my_slang.toml"]
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_rules() {
        let config = TrackerConfig::default();
        assert_eq!(config.scoring.score_threshold, 0.6);
        assert_eq!(config.alert.alert_multiplier, 3.0);
        assert_eq!(config.alert.dying_niche_threshold, 0.1);
        assert_eq!(config.forecast.horizon_days, 14);
        assert_eq!(config.resolution.order, ResolutionOrder::LexiconFirst);
        assert!(config.sources.is_niche("ukdrill"));
        assert!(config.sources.is_niche("London"));
        assert!(!config.sources.is_niche("AskReddit"));
        assert_eq!(config.sources.global(), Some("all"));
    }

    #[test]
    fn test_empty_global_source_disables_fallback() {
        let config: TrackerConfig = toml::from_str("[sources]\nglobal_source = \"\"\n").unwrap();
        assert_eq!(config.sources.global(), None);
        assert_eq!(config.sources.niche_sources.len(), 2);
    }

    #[test]
    fn test_example_config_parses_to_defaults() {
        let config: TrackerConfig = toml::from_str(EXAMPLE_CONFIG).unwrap();
        assert_eq!(config, TrackerConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let toml_str = r#"
[alert]
alert_multiplier = 2.0

[forecast]
model = "linear"
"#;
        let config: TrackerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.alert.alert_multiplier, 2.0);
        assert_eq!(config.alert.dying_niche_threshold, 0.1);
        assert_eq!(config.forecast.model, ForecastModel::Linear);
        assert_eq!(config.forecast.horizon_days, 14);
    }

    #[test]
    fn test_load_config_from_dir_and_fallback() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_config(None, dir.path()), TrackerConfig::default());

        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[resolution]\norder = \"archive_first\"\n",
        )
        .unwrap();
        let config = load_config(None, dir.path());
        assert_eq!(config.resolution.order, ResolutionOrder::ArchiveFirst);
    }

    #[test]
    fn test_invalid_explicit_config_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();
        assert_eq!(load_config(Some(&path), dir.path()), TrackerConfig::default());
    }

    #[test]
    fn test_json_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(JSON_CONFIG_FILE_NAME),
            r#"{"sources": {"niche_sources": ["CasualUK"]}}"#,
        )
        .unwrap();
        let config = load_config(None, dir.path());
        assert_eq!(config.sources.niche_sources, vec!["CasualUK".to_string()]);
        assert_eq!(config.sources.mainstream_sources.len(), 2);
    }
}
