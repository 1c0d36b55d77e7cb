//! Scoring for the fuzzy backend
//!
//! A raw nucleo score is weighted by where in a word the match lands and by
//! how contiguous it is. Exact substring hits are multiplied on top.

use super::fuzzy::{FuzzyMatch, MatchType};

/// Weights applied to a raw fuzzy score
#[derive(Debug, Clone)]
pub struct ScoringWeights {
    /// Share of the raw score added per unit of proximity
    pub proximity: f64,
    /// Multiplier for exact substring matches
    pub exact_bonus: f64,
    /// Multiplier for matches of a single word of a multi-word query
    pub word_penalty: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            proximity: 1.0,
            exact_bonus: 10.0,
            word_penalty: 0.7,
        }
    }
}

impl ScoringWeights {
    /// Multiplier for where the match sits inside the haystack's words
    pub fn placement(&self, match_type: MatchType) -> f64 {
        match match_type {
            MatchType::FullWord => 1.0,
            MatchType::MultiWord => 0.9,
            MatchType::WordStart => 0.8,
            MatchType::WordEnd => 0.6,
            MatchType::WordMiddle => 0.4,
        }
    }

    /// Score of one field match
    pub fn score(&self, fuzzy: &FuzzyMatch, proximity: f64, is_exact: bool) -> f64 {
        let raw = f64::from(fuzzy.score);
        let weighted = raw * (self.placement(fuzzy.match_type) + proximity * self.proximity);
        if is_exact {
            weighted * self.exact_bonus
        } else {
            weighted
        }
    }
}
