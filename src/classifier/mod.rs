//! Word classification
//!
//! Two pieces:
//! - [`SlangScorer`]: per-mention slang likelihood from lexical, sentiment
//!   and source signals
//! - [`ClassificationCascade`]: vault → lexicon/archive → live sources,
//!   producing and persisting one [`WordRecord`](crate::models::WordRecord)
//!
//! The lexicon/archive layers are pure lookups against the shared
//! [`LexicalResources`](crate::lexicon::LexicalResources); only the dynamic
//! layer touches the network.

mod cascade;
mod scorer;

pub use cascade::{CascadeError, CascadeResult, ClassificationCascade, CollectSummary};
pub use scorer::{SlangScorer, SlangVerdict};
