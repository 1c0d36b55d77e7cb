//! Index adapter over interchangeable full-text backends

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;

use crate::error::AppError;
use crate::model::SearchDocument;

use super::fuzzy::FuzzyIndex;
use super::normalize::normalize_list;
use super::inverted::InvertedIndex;

/// Fields fed to the index, besides the id
pub const INDEXED_FIELDS: [&str; 4] = ["Biography", "Publications", "Label", "AllText"];

/// A text index over search documents
pub trait TextIndex: Send + Sync {
    /// Ranked ids of documents matching a normalized query
    fn search(&self, normalized_query: &str) -> Result<Vec<String>, AppError>;
}

/// The record a backend indexes for one document
#[derive(Debug, Clone, PartialEq)]
pub struct IndexRecord {
    pub id: String,
    /// Normalized field texts in [`INDEXED_FIELDS`] order
    pub texts: [String; 4],
}

impl IndexRecord {
    pub fn from_document(document: &SearchDocument) -> Self {
        Self {
            id: document.id.clone(),
            texts: INDEXED_FIELDS.map(|field| normalize_list(&document.field_texts(field))),
        }
    }
}

/// Which backend a catalog builds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexBackend {
    /// tantivy inverted index with BM25 ranking
    #[default]
    Inverted,
    /// nucleo fuzzy matching with multi-signal scoring
    Fuzzy,
}

impl FromStr for IndexBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inverted" | "tantivy" => Ok(IndexBackend::Inverted),
            "fuzzy" | "nucleo" => Ok(IndexBackend::Fuzzy),
            other => Err(AppError::InvalidInput(format!(
                "Unknown index backend '{}' (expected inverted or fuzzy)",
                other
            ))),
        }
    }
}

impl fmt::Display for IndexBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexBackend::Inverted => write!(f, "inverted"),
            IndexBackend::Fuzzy => write!(f, "fuzzy"),
        }
    }
}

/// Session-wide document set plus the index built over it
///
/// Built once and only read afterwards.
pub struct SearchCatalog {
    documents: Vec<SearchDocument>,
    by_id: HashMap<String, usize>,
    index: Box<dyn TextIndex>,
}

impl SearchCatalog {
    pub fn build(documents: Vec<SearchDocument>, backend: IndexBackend) -> Result<Self, AppError> {
        let records: Vec<IndexRecord> = documents.iter().map(IndexRecord::from_document).collect();
        let index: Box<dyn TextIndex> = match backend {
            IndexBackend::Inverted => Box::new(InvertedIndex::build(&records)?),
            IndexBackend::Fuzzy => Box::new(FuzzyIndex::build(records)),
        };
        debug!("Built {} index over {} documents", backend, documents.len());
        Ok(Self::with_index(documents, index))
    }

    /// Wrap an already built index
    pub fn with_index(documents: Vec<SearchDocument>, index: Box<dyn TextIndex>) -> Self {
        let by_id = documents
            .iter()
            .enumerate()
            .map(|(pos, doc)| (doc.id.clone(), pos))
            .collect();
        Self {
            documents,
            by_id,
            index,
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&SearchDocument> {
        self.by_id.get(id).map(|&pos| &self.documents[pos])
    }

    /// Ranked candidate documents; ids without a document are skipped
    pub fn search(&self, normalized_query: &str) -> Result<Vec<&SearchDocument>, AppError> {
        if normalized_query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let ids = self.index.search(normalized_query)?;
        Ok(ids.iter().filter_map(|id| self.get(id)).collect())
    }
}
