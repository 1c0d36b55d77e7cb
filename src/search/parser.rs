//! Query Parser
//!
//! Derives the normalized search term and the set of quoted exact-match
//! phrases from a raw query string.

use super::normalize::normalize;

/// Parsed search query
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuery {
    /// Original unmodified query
    pub original: String,
    /// Whole query, normalized, handed to the text index
    pub normalized_term: String,
    /// Normalized quoted phrases, first occurrence order, no duplicates
    pub quoted_phrases: Vec<String>,
}

/// Query parser
pub struct QueryParser;

impl QueryParser {
    /// Parse a search query into its components
    pub fn parse(query: &str) -> ParsedQuery {
        ParsedQuery {
            original: query.to_string(),
            normalized_term: normalize(query),
            quoted_phrases: extract_quoted(query),
        }
    }
}

/// Extract the quoted phrases of a raw query
///
/// Splits on `"` and keeps every odd-indexed segment. The remainder after an
/// unpaired final quote counts as a phrase. Segments that are empty, before
/// or after normalization, are dropped.
pub fn extract_quoted(raw: &str) -> Vec<String> {
    let mut phrases: Vec<String> = Vec::new();

    for segment in raw.split('"').skip(1).step_by(2) {
        if segment.is_empty() {
            continue;
        }
        let phrase = normalize(segment);
        if phrase.trim().is_empty() || phrases.contains(&phrase) {
            continue;
        }
        phrases.push(phrase);
    }

    phrases
}
