//! Search over the precomputed exhibit index
//!
//! A raw query is normalized and split into quoted phrases, the normalized
//! term goes to a full-text backend, and the ranked candidates are
//! partitioned by exact phrase matches.

pub mod engine;
pub mod fuzzy;
pub mod index;
pub mod inverted;
pub mod normalize;
pub mod parser;
pub mod ranking;
pub mod refine;


pub use engine::{SearchEngine, SearchOutcome};
pub use index::IndexBackend;
pub use refine::SearchResult;
