//! Text canonicalization for search comparisons
//!
//! Strips a fixed punctuation class, collapses whitespace runs and
//! lowercases. The result is stable under repeated application.

use std::sync::LazyLock;

use regex::Regex;

/// Characters removed before comparison
static STRIP_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[.,/#!$%^&*;:{}=\-_`~()?"'\[\]]"#).expect("valid strip pattern"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid whitespace pattern"));

/// Canonicalize a single string
///
/// A run of two or more whitespace characters becomes one space; a lone
/// whitespace character is kept as is. No trimming is applied.
pub fn normalize(input: &str) -> String {
    let stripped = STRIP_CHARS.replace_all(input, "");
    WHITESPACE_RUN.replace_all(&stripped, " ").to_lowercase()
}

/// Canonicalize each string and join with a single space
pub fn normalize_list<S: AsRef<str>>(inputs: &[S]) -> String {
    inputs
        .iter()
        .map(|s| normalize(s.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}
