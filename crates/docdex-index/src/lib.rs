//! # docdex-index
//!
//! The document index: storage backends, the ingest pipeline and the
//! search engine.
//!
//! ## Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`MemoryStore`] | In-memory store for tests and development |
//! | [`SqliteStore`] | Persistent SQLite store with JSON fingerprint column |
//! | [`Indexer`] | Ingest pipeline: extract → vectorize → insert |
//! | [`SearchEngine`] | Metadata and vector query modes |
//!
//! ## Query modes
//!
//! - **Metadata**: ASCII case-insensitive substring match over filename
//!   and media type; empty queries are rejected.
//! - **Vector**: the query (text or image bytes) is fingerprinted with the
//!   same pipeline as indexed documents, scored against every stored
//!   fingerprint of the same class, thresholded and ranked.

pub mod indexer;
pub mod memory;
pub mod search;
pub mod sqlite;

pub use indexer::Indexer;
pub use memory::MemoryStore;
pub use search::SearchEngine;
pub use sqlite::SqliteStore;

use docdex_core::Document;

/// Shared metadata-match predicate: ASCII case-insensitive substring over
/// filename and media type, the `LIKE` semantics of the original storage
/// layer. Both store backends use this so results never depend on the
/// backend.
pub(crate) fn metadata_matches(doc: &Document, query: &str) -> bool {
    let query = query.to_ascii_lowercase();
    doc.filename.to_ascii_lowercase().contains(&query)
        || doc.media_type.as_str().contains(&query)
}
