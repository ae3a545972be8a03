//! Heuristic slang scorer
//!
//! Scores a single mention of a word from three independent signals:
//! corpus absence, sentiment intensity of the surrounding text, and whether
//! the mention came from a niche source.

use crate::config::{ScoringConfig, SourcesConfig};
use crate::lexicon::LexicalResources;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const BASE_SCORE: f64 = 0.1;
const NOT_IN_DICTIONARY: f64 = 0.4;
const STANDARD_PENALTY: f64 = 0.1;
const HIGH_INTENSITY: f64 = 0.2;
const NICHE_SOURCE: f64 = 0.3;

/// Outcome of scoring one mention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlangVerdict {
    pub is_slang: bool,
    /// Clamped to [0, 1], rounded to two decimals
    pub score: f64,
    /// Human-readable reasons, in rule order
    pub reasons: Vec<String>,
}

/// Pure, deterministic slang-likelihood scorer
#[derive(Debug, Clone)]
pub struct SlangScorer {
    resources: Arc<LexicalResources>,
    sources: SourcesConfig,
    scoring: ScoringConfig,
}

impl SlangScorer {
    pub fn new(
        resources: Arc<LexicalResources>,
        sources: SourcesConfig,
        scoring: ScoringConfig,
    ) -> Self {
        Self {
            resources,
            sources,
            scoring,
        }
    }

    pub fn resources(&self) -> &LexicalResources {
        &self.resources
    }

    pub fn threshold(&self) -> f64 {
        self.scoring.score_threshold
    }

    /// Score `word` as used in `context`, observed in `source`
    pub fn score(&self, word: &str, context: &str, source: &str) -> SlangVerdict {
        let mut score = BASE_SCORE;
        let mut reasons = Vec::new();

        // No sense disambiguation: slang uses of standard words ("cooked")
        // score as standard.
        if self.resources.lexicon.is_standard(word) {
            score -= STANDARD_PENALTY;
        } else {
            score += NOT_IN_DICTIONARY;
            reasons.push("Not in standard dictionary".to_string());
        }

        if !context.trim().is_empty() {
            let compound = self.resources.sentiment.compound(context);
            if compound.abs() > self.scoring.intensity_threshold {
                score += HIGH_INTENSITY;
                reasons.push(format!("High sentiment intensity ({:.2})", compound));
            }
        }

        if self.sources.is_niche(source) {
            score += NICHE_SOURCE;
            reasons.push("Found in niche source".to_string());
        }

        let score = round2(score.clamp(0.0, 1.0));

        SlangVerdict {
            is_slang: score > self.scoring.score_threshold,
            score,
            reasons,
        }
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> SlangScorer {
        SlangScorer::new(
            LexicalResources::builtin().shared(),
            SourcesConfig::default(),
            ScoringConfig::default(),
        )
    }

    #[test]
    fn test_niche_slang_high_intensity() {
        let verdict = scorer().score("rizz", "This guy has insane rizz", "ukdrill");
        assert!(verdict.is_slang);
        assert!(verdict.score > 0.6);
        assert_eq!(verdict.reasons.len(), 3);
        assert_eq!(verdict.reasons[0], "Not in standard dictionary");
        assert!(verdict.reasons[1].starts_with("High sentiment intensity"));
        assert_eq!(verdict.reasons[2], "Found in niche source");
    }

    #[test]
    fn test_mainstream_common_word() {
        let verdict = scorer().score("friend", "He is my best friend", "AskReddit");
        assert!(!verdict.is_slang);
        assert!(verdict.score < 0.6);
    }

    #[test]
    fn test_niche_but_common_word() {
        let verdict = scorer().score("London", "I live in London", "london");
        assert!(!verdict.is_slang);
        assert_eq!(verdict.score, 0.3);
        assert_eq!(verdict.reasons, vec!["Found in niche source".to_string()]);
    }

    #[test]
    fn test_unknown_word_intense_mainstream_context() {
        let verdict = scorer().score("skibidi", "What the hell is skibidi toilet", "memes");
        assert!(verdict.is_slang);
        assert_eq!(verdict.score, 0.7);
    }

    #[test]
    fn test_standard_word_in_bland_context_floors_at_zero() {
        let verdict = scorer().score("apple", "an apple", "AskReddit");
        assert_eq!(verdict.score, 0.0);
        assert!(verdict.reasons.is_empty());
    }

    #[test]
    fn test_empty_context_has_no_intensity() {
        let verdict = scorer().score("rizz", "", "AskReddit");
        assert_eq!(verdict.score, 0.5);
        assert!(!verdict.is_slang);
    }

    #[test]
    fn test_score_bounds_and_threshold_hold_for_all_rule_combinations() {
        let s = scorer();
        let words = ["rizz", "friend"];
        let contexts = ["", "the bus", "What the hell is this", "best best love"];
        let sources = ["ukdrill", "AskReddit"];
        for w in words {
            for c in contexts {
                for src in sources {
                    let v = s.score(w, c, src);
                    assert!((0.0..=1.0).contains(&v.score), "{} {} {}", w, c, src);
                    assert_eq!(v.is_slang, v.score > 0.6);
                }
            }
        }
    }

    #[test]
    fn test_threshold_is_configurable() {
        let strict = SlangScorer::new(
            LexicalResources::builtin().shared(),
            SourcesConfig::default(),
            ScoringConfig {
                score_threshold: 0.75,
                ..Default::default()
            },
        );
        let verdict = strict.score("skibidi", "What the hell is skibidi toilet", "memes");
        assert!(!verdict.is_slang);
    }
}
