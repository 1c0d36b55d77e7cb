//! In-memory inverted index backed by tantivy
//!
//! Ranking is tantivy's BM25 over the indexed fields. The id is stored as
//! an untokenized string so hits can be resolved back to documents.

use tantivy::collector::TopDocs;
use tantivy::query::QueryParser;
use tantivy::schema::{Field, Schema, Value, STORED, STRING, TEXT};
use tantivy::{Index, IndexReader, IndexWriter, TantivyDocument};
use tracing::{debug, warn};

use crate::error::AppError;

use super::index::{IndexRecord, TextIndex, INDEXED_FIELDS};

/// Writer heap for a single indexing thread
const WRITER_HEAP_BYTES: usize = 20_000_000;

pub struct InvertedIndex {
    reader: IndexReader,
    query_parser: QueryParser,
    id_field: Field,
    num_docs: usize,
}

impl InvertedIndex {
    pub fn build(records: &[IndexRecord]) -> Result<Self, AppError> {
        let mut schema_builder = Schema::builder();
        let id_field = schema_builder.add_text_field("id", STRING | STORED);
        let text_fields: Vec<Field> = INDEXED_FIELDS
            .iter()
            .map(|name| schema_builder.add_text_field(name, TEXT))
            .collect();
        let schema = schema_builder.build();

        let index = Index::create_in_ram(schema);
        let mut writer: IndexWriter = index.writer_with_num_threads(1, WRITER_HEAP_BYTES)?;

        for record in records {
            let mut doc = TantivyDocument::default();
            doc.add_text(id_field, &record.id);
            for (field, text) in text_fields.iter().zip(record.texts.iter()) {
                if !text.is_empty() {
                    doc.add_text(*field, text);
                }
            }
            writer.add_document(doc)?;
        }
        writer.commit()?;

        let reader = index.reader()?;
        let query_parser = QueryParser::for_index(&index, text_fields);
        debug!("Indexed {} documents", records.len());

        Ok(Self {
            reader,
            query_parser,
            id_field,
            num_docs: records.len(),
        })
    }
}

impl TextIndex for InvertedIndex {
    fn search(&self, normalized_query: &str) -> Result<Vec<String>, AppError> {
        if self.num_docs == 0 {
            return Ok(Vec::new());
        }

        let (query, errors) = self.query_parser.parse_query_lenient(normalized_query);
        if !errors.is_empty() {
            warn!("Query '{}' parsed leniently: {} issue(s)", normalized_query, errors.len());
        }

        let searcher = self.reader.searcher();
        let top_docs = searcher.search(&query, &TopDocs::with_limit(self.num_docs))?;

        let mut ids = Vec::with_capacity(top_docs.len());
        for (_score, address) in top_docs {
            let doc: TantivyDocument = searcher.doc(address)?;
            if let Some(id) = doc.get_first(self.id_field).and_then(|v| v.as_str()) {
                ids.push(id.to_string());
            }
        }
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, label: &str, all_text: &str) -> IndexRecord {
        IndexRecord {
            id: id.to_string(),
            texts: [String::new(), String::new(), label.to_string(), all_text.to_string()],
        }
    }

    #[test]
    fn test_search_finds_matching_documents() {
        let index = InvertedIndex::build(&[
            record("Q1", "Ann Lee", "teacher in Hartford"),
            record("Q2", "Bob Ray", "minister"),
        ])
        .unwrap();

        assert_eq!(index.search("hartford").unwrap(), vec!["Q1"]);
        assert_eq!(index.search("bob").unwrap(), vec!["Q2"]);
        assert!(index.search("nobody").unwrap().is_empty());
    }

    #[test]
    fn test_or_semantics_over_terms() {
        let index = InvertedIndex::build(&[
            record("Q1", "Ann Lee", ""),
            record("Q2", "Bob Ray", ""),
            record("Q3", "Cy Young", ""),
        ])
        .unwrap();

        let mut ids = index.search("ann bob").unwrap();
        ids.sort();
        assert_eq!(ids, vec!["Q1", "Q2"]);
    }

    #[test]
    fn test_ranks_denser_match_first() {
        let index = InvertedIndex::build(&[
            record("Q1", "Ann Lee", "studied law"),
            record("Q2", "Yale Yale", "yale college yale divinity"),
        ])
        .unwrap();

        let ids = index.search("yale").unwrap();
        assert_eq!(ids.first().map(String::as_str), Some("Q2"));
    }

    #[test]
    fn test_lenient_query_syntax() {
        let index = InvertedIndex::build(&[record("Q1", "Ann Lee", "")]).unwrap();
        // stray operators must not fail the search
        assert!(index.search("ann +").is_ok());
        assert!(index.search("ann @ (").is_ok());
    }

    #[test]
    fn test_empty_index() {
        let index = InvertedIndex::build(&[]).unwrap();
        assert!(index.search("anything").unwrap().is_empty());
    }
}
