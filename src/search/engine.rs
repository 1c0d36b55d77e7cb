//! Search Engine Integration
//!
//! Ties together query parsing, the text index and result refinement:
//! raw query → parse → index → refine.

use std::sync::Arc;

use tracing::debug;

use crate::error::AppError;
use crate::model::SearchDocument;

use super::index::{IndexBackend, SearchCatalog};
use super::parser::{ParsedQuery, QueryParser};
use super::refine::{refine, Refined};

/// Outcome of one search: the derived query state and the partitioned results
#[derive(Debug, Clone)]
pub struct SearchOutcome<'a> {
    pub query: ParsedQuery,
    pub refined: Refined<'a>,
}

/// Search engine over a shared, read-only catalog
#[derive(Clone)]
pub struct SearchEngine {
    catalog: Arc<SearchCatalog>,
}

impl SearchEngine {
    pub fn new(catalog: Arc<SearchCatalog>) -> Self {
        Self { catalog }
    }

    /// Build the catalog for a document set
    pub fn build(documents: Vec<SearchDocument>, backend: IndexBackend) -> Result<Self, AppError> {
        Ok(Self::new(Arc::new(SearchCatalog::build(documents, backend)?)))
    }

    pub fn catalog(&self) -> &SearchCatalog {
        &self.catalog
    }

    /// Run a raw query through the whole pipeline
    pub fn search(&self, raw_query: &str) -> Result<SearchOutcome<'_>, AppError> {
        let query = QueryParser::parse(raw_query);
        let candidates = self.catalog.search(&query.normalized_term)?;
        debug!(
            "Query '{}' → {} candidates, {} quoted phrase(s)",
            query.normalized_term,
            candidates.len(),
            query.quoted_phrases.len()
        );
        let refined = refine(candidates, &query.quoted_phrases);
        Ok(SearchOutcome { query, refined })
    }
}
