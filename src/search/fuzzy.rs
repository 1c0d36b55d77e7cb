//! Fuzzy matching backend using nucleo-matcher
//!
//! Scores every record field with the Smith-Waterman style matcher from
//! nucleo-matcher (used in Helix editor), then weights the raw score by
//! where in a word the match lands. Whole-query matches beat matches of
//! single query words.

use nucleo_matcher::{Config, Matcher, Utf32String};
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::AppError;

use super::index::{IndexRecord, TextIndex};
use super::ranking::ScoringWeights;

/// Match result with score and position information
#[derive(Debug, Clone)]
pub struct FuzzyMatch {
    /// Base fuzzy match score from nucleo
    pub score: u32,
    /// Char positions of an exact occurrence in the haystack, if any
    pub positions: Vec<u32>,
    pub match_type: MatchType,
}

/// Classification of where the match occurs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchType {
    /// Exact full word match
    FullWord,
    /// Match at beginning of word
    WordStart,
    /// Match at end of word
    WordEnd,
    /// Match in middle of word, or scattered
    WordMiddle,
    /// Match spans multiple words
    MultiWord,
}

/// Fuzzy matcher wrapping a nucleo `Matcher`
pub struct FuzzyMatcher {
    matcher: Matcher,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FuzzyMatcher {
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(Config::DEFAULT),
        }
    }

    /// Perform fuzzy matching between needle and haystack
    pub fn fuzzy_match(&mut self, haystack: &str, needle: &str) -> Option<FuzzyMatch> {
        if needle.trim().is_empty() {
            return None;
        }

        let haystack_nfc: String = haystack.nfc().collect();
        let needle_nfc: String = needle.nfc().collect();

        let haystack_utf32 = Utf32String::from(haystack_nfc.as_str());
        let needle_utf32 = Utf32String::from(needle_nfc.as_str());
        let score = self
            .matcher
            .fuzzy_match(haystack_utf32.slice(..), needle_utf32.slice(..))?;

        let positions = find_match_positions(&haystack_nfc, &needle_nfc);
        let match_type = classify_match_type(&haystack_nfc, &needle_nfc, &positions);

        Some(FuzzyMatch {
            score: score as u32,
            positions,
            match_type,
        })
    }

    /// Case-insensitive substring check
    pub fn exact_match(&self, haystack: &str, needle: &str) -> bool {
        !needle.is_empty() && haystack.to_lowercase().contains(&needle.to_lowercase())
    }

    /// Closeness of matched positions: 1.0 for a contiguous run
    pub fn calculate_proximity_score(&self, positions: &[u32]) -> f64 {
        if positions.len() <= 1 {
            return 0.0;
        }
        let total_gap: u32 = positions.windows(2).map(|w| w[1] - w[0]).sum();
        let avg_gap = total_gap as f64 / (positions.len() - 1) as f64;
        (1.0 / avg_gap).min(1.0)
    }
}

/// Char positions of the first case-insensitive occurrence of `needle`
fn find_match_positions(haystack: &str, needle: &str) -> Vec<u32> {
    let hay: Vec<char> = haystack.to_lowercase().chars().collect();
    let pat: Vec<char> = needle.to_lowercase().chars().collect();
    if pat.is_empty() || pat.len() > hay.len() {
        return Vec::new();
    }
    hay.windows(pat.len())
        .position(|w| w == pat.as_slice())
        .map(|start| (start..start + pat.len()).map(|i| i as u32).collect())
        .unwrap_or_default()
}

fn classify_match_type(haystack: &str, needle: &str, positions: &[u32]) -> MatchType {
    let (Some(&first), Some(&last)) = (positions.first(), positions.last()) else {
        return MatchType::WordMiddle;
    };

    let needle_lower = needle.to_lowercase();
    if haystack
        .unicode_words()
        .any(|word| word.to_lowercase() == needle_lower)
    {
        return MatchType::FullWord;
    }

    if needle.trim().contains(char::is_whitespace) {
        return MatchType::MultiWord;
    }

    let chars: Vec<char> = haystack.chars().collect();
    let boundary = |c: Option<&char>| c.map_or(true, |c| !c.is_alphanumeric());
    let at_start = first == 0 || boundary(chars.get(first as usize - 1));
    let at_end = boundary(chars.get(last as usize + 1));

    match (at_start, at_end) {
        (true, true) => MatchType::FullWord,
        (true, false) => MatchType::WordStart,
        (false, true) => MatchType::WordEnd,
        (false, false) => MatchType::WordMiddle,
    }
}

/// Index that scans all records with the fuzzy matcher on every query
pub struct FuzzyIndex {
    records: Vec<IndexRecord>,
    weights: ScoringWeights,
}

impl FuzzyIndex {
    pub fn build(records: Vec<IndexRecord>) -> Self {
        Self {
            records,
            weights: ScoringWeights::default(),
        }
    }

    /// Best score of `needle` over the record's fields
    fn score_text(&self, matcher: &mut FuzzyMatcher, needle: &str, record: &IndexRecord) -> Option<f64> {
        record
            .texts
            .iter()
            .filter(|t| !t.is_empty())
            .filter_map(|haystack| {
                let fuzzy = matcher.fuzzy_match(haystack, needle)?;
                let is_exact = matcher.exact_match(haystack, needle);
                let proximity = matcher.calculate_proximity_score(&fuzzy.positions);
                Some(self.weights.score(&fuzzy, proximity, is_exact))
            })
            .reduce(f64::max)
    }

    /// Whole-query score, or the penalized best single-word score when higher
    fn score_record(&self, matcher: &mut FuzzyMatcher, query: &str, words: &[&str], record: &IndexRecord) -> Option<f64> {
        let whole = self.score_text(matcher, query, record);
        if words.len() <= 1 {
            return whole;
        }
        words
            .iter()
            .filter_map(|word| self.score_text(matcher, word, record))
            .map(|score| score * self.weights.word_penalty)
            .chain(whole)
            .reduce(f64::max)
    }
}

impl TextIndex for FuzzyIndex {
    fn search(&self, normalized_query: &str) -> Result<Vec<String>, AppError> {
        let query = normalized_query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let words: Vec<&str> = query.unicode_words().collect();
        let mut matcher = FuzzyMatcher::new();

        let mut scored: Vec<(f64, &str)> = self
            .records
            .iter()
            .filter_map(|record| {
                self.score_record(&mut matcher, query, &words, record)
                    .map(|score| (score, record.id.as_str()))
            })
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        Ok(scored.into_iter().map(|(_, id)| id.to_string()).collect())
    }
}
