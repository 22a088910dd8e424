//! Error types for docdex.

use thiserror::Error;

/// Main error type for docdex operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Content extraction failed
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractError),

    /// Document ingest failed
    #[error("ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// Search failed
    #[error("search error: {0}")]
    Search(#[from] SearchError),

    /// Store operation failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Content extraction errors.
///
/// These never cross the extractor boundary: extraction recovers every
/// failure into empty content plus an `Unavailable` metadata record. The
/// type exists for the extractor's internal fallible helpers.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Document store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store initialization failed: {0}")]
    Init(String),

    #[error("insert failed: {0}")]
    Insert(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Ingest pipeline errors.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("file too large: {size_bytes} bytes, max {max_bytes}")]
    TooLarge { size_bytes: u64, max_bytes: u64 },

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Search errors.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Metadata search requires a non-empty query string.
    #[error("query must not be empty")]
    EmptyQuery,

    /// Vector search could not turn the query into a comparable fingerprint.
    #[error("could not derive a usable fingerprint from the query")]
    EmptyQueryFingerprint,

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for docdex operations.
pub type Result<T> = std::result::Result<T, Error>;
