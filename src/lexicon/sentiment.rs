//! Lexicon-based sentiment intensity
//!
//! A rule-based scorer in the VADER family: per-token valence from a
//! fixed lexicon, adjusted for boosters, negation, capitalization and
//! exclamation marks, then squashed into a compound score on [-1, 1].
//! Deterministic and allocation-light; no model files.

use std::collections::HashMap;

/// Normalization constant for the compound squash
const ALPHA: f64 = 15.0;
/// Valence nudge from an intensifier or dampener
const BOOST: f64 = 0.293;
/// Extra valence for an ALL-CAPS sentiment word in mixed-case text
const CAPS_BOOST: f64 = 0.733;
/// Negated valence multiplier
const NEGATION_SCALAR: f64 = -0.74;
/// Per-'!' emphasis, capped at four marks
const EXCLAMATION_BOOST: f64 = 0.292;
/// How many preceding tokens a negation reaches
const NEGATION_WINDOW: usize = 3;

const VALENCES: &[(&str, f64)] = &[
    // positive
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("brilliant", 2.8),
    ("cool", 1.3),
    ("enjoy", 2.2),
    ("excellent", 3.2),
    ("excited", 2.5),
    ("fantastic", 2.6),
    ("free", 1.6),
    ("fresh", 1.3),
    ("friend", 2.2),
    ("fun", 2.3),
    ("funny", 1.9),
    ("glad", 2.0),
    ("good", 1.9),
    ("great", 3.1),
    ("haha", 2.2),
    ("happy", 2.7),
    ("hope", 1.9),
    ("laugh", 2.2),
    ("lol", 2.9),
    ("love", 3.2),
    ("loved", 2.9),
    ("lucky", 1.9),
    ("nice", 1.8),
    ("perfect", 2.7),
    ("proud", 2.1),
    ("rich", 2.6),
    ("safe", 1.9),
    ("smile", 1.5),
    ("strong", 2.3),
    ("sweet", 2.0),
    ("thank", 1.5),
    ("thanks", 1.9),
    ("win", 2.8),
    ("wonderful", 2.7),
    ("wow", 2.8),
    ("yay", 2.4),
    // negative
    ("angry", -2.3),
    ("annoying", -1.7),
    ("awful", -2.0),
    ("bad", -2.5),
    ("boring", -1.3),
    ("broke", -1.8),
    ("crazy", -1.4),
    ("cringe", -2.0),
    ("cry", -2.1),
    ("damn", -1.7),
    ("dead", -3.3),
    ("die", -2.9),
    ("fail", -2.5),
    ("fear", -2.2),
    ("fuck", -2.5),
    ("hate", -2.7),
    ("hell", -2.5),
    ("horrible", -2.5),
    ("hurt", -2.4),
    ("insane", -2.4),
    ("kill", -3.7),
    ("lame", -1.8),
    ("lose", -1.7),
    ("lost", -1.3),
    ("mess", -1.5),
    ("pain", -2.3),
    ("poor", -2.1),
    ("problem", -1.7),
    ("sad", -2.1),
    ("scared", -2.2),
    ("shit", -2.6),
    ("sick", -2.3),
    ("sorry", -0.3),
    ("stupid", -2.4),
    ("terrible", -2.1),
    ("tired", -1.9),
    ("trash", -1.6),
    ("ugly", -2.3),
    ("weird", -0.7),
    ("worry", -1.9),
    ("worse", -2.1),
    ("worst", -3.1),
    ("wrong", -2.1),
    ("wtf", -2.8),
];

const BOOSTERS: &[&str] = &[
    "absolutely",
    "completely",
    "extremely",
    "hella",
    "incredibly",
    "insanely",
    "mad",
    "really",
    "so",
    "super",
    "totally",
    "very",
];

const DAMPENERS: &[&str] = &["barely", "hardly", "kinda", "slightly", "somewhat", "sorta"];

const NEGATIONS: &[&str] = &[
    "aint", "can't", "cannot", "cant", "didn't", "didnt", "doesn't", "doesnt", "don't", "dont",
    "isn't", "isnt", "never", "no", "nobody", "none", "not", "nothing", "wasn't", "wasnt",
    "won't", "wont", "without",
];

/// Polarity breakdown for one text
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SentimentScores {
    /// Normalized overall score in [-1, 1]
    pub compound: f64,
    /// Share of positive valence mass
    pub positive: f64,
    /// Share of negative valence mass
    pub negative: f64,
    /// Share of neutral tokens
    pub neutral: f64,
}

impl SentimentScores {
    /// Absolute compound, the "intensity" used by the scorer
    pub fn intensity(&self) -> f64 {
        self.compound.abs()
    }
}

/// Fixed-lexicon sentiment model
#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
    valences: HashMap<&'static str, f64>,
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self {
            valences: VALENCES.iter().copied().collect(),
        }
    }

    pub fn valence(&self, token: &str) -> Option<f64> {
        self.valences.get(token).copied()
    }

    /// Compound score only
    pub fn compound(&self, text: &str) -> f64 {
        self.polarity_scores(text).compound
    }

    pub fn polarity_scores(&self, text: &str) -> SentimentScores {
        let raw: Vec<&str> = text
            .split_whitespace()
            .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric() && c != '\''))
            .filter(|t| !t.is_empty())
            .collect();
        if raw.is_empty() {
            return SentimentScores::default();
        }

        let lowered: Vec<String> = raw.iter().map(|t| t.to_lowercase()).collect();
        let mixed_case = raw.iter().any(|t| !is_shouting(t));

        let mut sentiments = Vec::with_capacity(raw.len());
        let mut neutral_tokens = 0usize;

        for (i, token) in lowered.iter().enumerate() {
            let Some(mut valence) = self.valence(token) else {
                if !BOOSTERS.contains(&token.as_str()) && !DAMPENERS.contains(&token.as_str()) {
                    neutral_tokens += 1;
                }
                continue;
            };

            if mixed_case && is_shouting(raw[i]) {
                valence += CAPS_BOOST * valence.signum();
            }

            if i > 0 {
                let prev = lowered[i - 1].as_str();
                if BOOSTERS.contains(&prev) {
                    valence += BOOST * valence.signum();
                } else if DAMPENERS.contains(&prev) {
                    valence -= BOOST * valence.signum();
                }
            }

            let start = i.saturating_sub(NEGATION_WINDOW);
            if lowered[start..i]
                .iter()
                .any(|t| NEGATIONS.contains(&t.as_str()))
            {
                valence *= NEGATION_SCALAR;
            }

            sentiments.push(valence);
        }

        let mut sum: f64 = sentiments.iter().sum();
        if sum != 0.0 {
            let marks = text.chars().filter(|c| *c == '!').count().min(4) as f64;
            sum += marks * EXCLAMATION_BOOST * sum.signum();
        }

        let compound = (sum / (sum * sum + ALPHA).sqrt()).clamp(-1.0, 1.0);

        let pos_mass: f64 = sentiments.iter().filter(|v| **v > 0.0).map(|v| v + 1.0).sum();
        let neg_mass: f64 = sentiments.iter().filter(|v| **v < 0.0).map(|v| v.abs() + 1.0).sum();
        let neu_mass = neutral_tokens as f64;
        let total = pos_mass + neg_mass + neu_mass;

        if total == 0.0 {
            return SentimentScores {
                compound,
                ..Default::default()
            };
        }

        SentimentScores {
            compound,
            positive: pos_mass / total,
            negative: neg_mass / total,
            neutral: neu_mass / total,
        }
    }
}

fn is_shouting(token: &str) -> bool {
    token.chars().count() > 1
        && token.chars().any(|c| c.is_alphabetic())
        && token.chars().filter(|c| c.is_alphabetic()).all(|c| c.is_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_neutral_text() {
        let sia = SentimentAnalyzer::new();
        assert_eq!(sia.compound(""), 0.0);
        assert_eq!(sia.compound("I live in London"), 0.0);
        let scores = sia.polarity_scores("the bus is blue");
        assert_eq!(scores.neutral, 1.0);
    }

    #[test]
    fn test_polarity_direction() {
        let sia = SentimentAnalyzer::new();
        assert!(sia.compound("He is my best friend") > 0.5);
        assert!(sia.compound("What the hell is skibidi toilet") < -0.5);
        assert!(sia.compound("This guy has insane rizz").abs() > 0.5);
    }

    #[test]
    fn test_negation_flips_valence() {
        let sia = SentimentAnalyzer::new();
        assert!(sia.compound("this is good") > 0.0);
        assert!(sia.compound("this is not good") < 0.0);
    }

    #[test]
    fn test_boosters_caps_and_exclamations_intensify() {
        let sia = SentimentAnalyzer::new();
        let base = sia.compound("that was good");
        assert!(sia.compound("that was very good") > base);
        assert!(sia.compound("that was GOOD") > base);
        assert!(sia.compound("that was good!!") > base);
        assert!(sia.compound("that was kinda good") < base);
    }

    #[test]
    fn test_compound_is_bounded() {
        let sia = SentimentAnalyzer::new();
        let text = "best best best AMAZING love love wonderful perfect!!!!!!";
        let c = sia.compound(text);
        assert!(c > 0.9 && c <= 1.0);
        let scores = sia.polarity_scores(text);
        let sum = scores.positive + scores.negative + scores.neutral;
        assert!((sum - 1.0).abs() < 1e-9);
    }
}
