//! Configuration module for slangtrack
//!
//! This module handles:
//! - Tracker configuration (slangtrack.toml)
//! - Source bucket lists and decision thresholds
//! - Forecast and collector settings

mod tracker_config;

pub use tracker_config::{
    load_config, load_config_file, AlertConfig, CollectorConfig, ForecastConfig, ForecastModel,
    ResolutionConfig, ResolutionOrder, ResourcesConfig, ScoringConfig, SourcesConfig,
    TrackerConfig, CONFIG_FILE_NAME, EXAMPLE_CONFIG, JSON_CONFIG_FILE_NAME,
};
