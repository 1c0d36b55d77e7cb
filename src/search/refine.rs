//! Result refinement for quoted queries
//!
//! Annotates candidates whose field values equal a quoted phrase after
//! normalization, then splits the candidate list into the quoted results
//! and the remaining unquoted ones.

use crate::model::search_doc::scalar_texts;
use crate::model::SearchDocument;

use super::normalize::normalize;

/// Field name shown for matches in the `Label` field
const LABEL_FIELD: &str = "Label";
const LABEL_ANNOTATION: &str = "Name";

/// A candidate together with the fields that matched a quoted phrase exactly
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<'a> {
    pub document: &'a SearchDocument,
    pub exacts: Vec<String>,
}

impl<'a> SearchResult<'a> {
    pub fn new(document: &'a SearchDocument) -> Self {
        Self {
            document,
            exacts: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.document.id
    }
}

/// Partitioned results of one search
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Refined<'a> {
    pub results: Vec<SearchResult<'a>>,
    /// Candidates left out of `results`; `None` when nothing was partitioned
    pub unquoted_results: Option<Vec<SearchResult<'a>>>,
}

/// Partition `candidates` by the quoted `phrases`
///
/// With no phrases every candidate is a result. Otherwise a candidate is
/// kept when one of its values equals a phrase (annotated) or contains one.
/// The split is applied only when it keeps some but not all candidates.
pub fn refine<'a>(candidates: Vec<&'a SearchDocument>, phrases: &[String]) -> Refined<'a> {
    let mut annotated: Vec<SearchResult<'a>> = candidates.into_iter().map(SearchResult::new).collect();

    if phrases.is_empty() {
        return Refined {
            results: annotated,
            unquoted_results: None,
        };
    }

    let mut keep = Vec::with_capacity(annotated.len());
    for result in annotated.iter_mut() {
        let mut contains_phrase = false;

        for (name, value) in &result.document.fields {
            let mut field_exact = false;
            for text in scalar_texts(value) {
                let normalized = normalize(&text);
                if phrases.iter().any(|p| *p == normalized) {
                    field_exact = true;
                }
                if phrases.iter().any(|p| normalized.contains(p.as_str())) {
                    contains_phrase = true;
                }
            }
            if field_exact {
                result.exacts.push(annotation_name(name).to_string());
            }
        }

        keep.push(!result.exacts.is_empty() || contains_phrase);
    }

    let kept = keep.iter().filter(|k| **k).count();
    if kept == 0 || kept == annotated.len() {
        return Refined {
            results: annotated,
            unquoted_results: None,
        };
    }

    let mut results = Vec::with_capacity(kept);
    let mut unquoted = Vec::with_capacity(annotated.len() - kept);
    for (result, keep) in annotated.into_iter().zip(keep) {
        if keep {
            results.push(result);
        } else {
            unquoted.push(result);
        }
    }

    Refined {
        results,
        unquoted_results: Some(unquoted),
    }
}

fn annotation_name(field: &str) -> &str {
    if field == LABEL_FIELD {
        LABEL_ANNOTATION
    } else {
        field
    }
}
