//! slangtrack - slang lifecycle classifier and trend forecaster
//!
//! Decides where a word sits between standard English, niche slang,
//! mainstream use and "cringe", and measures how fast it is moving:
//!
//! - [`classifier`]: heuristic scorer and the vault → lexicon → archive →
//!   live-source cascade
//! - [`trend`]: gap-filled daily series, forecasting, growth and the
//!   cringe alert
//! - [`timeline`]: era parsing and century anchors
//! - [`vault`]: redb-backed persistence
//! - [`collector`]: live mention sources
//! - [`engine`]: the facade tying it together

pub mod classifier;
pub mod collector;
pub mod config;
pub mod engine;
pub mod lexicon;
pub mod models;
pub mod timeline;
pub mod trend;
pub mod vault;

pub use engine::SlangEngine;
