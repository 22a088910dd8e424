//! # docdex-core
//!
//! Core types and traits for the docdex document indexing and
//! similarity-search engine.
//!
//! ## Architecture
//!
//! The engine is a pipeline over uploaded files:
//!
//! ```text
//! bytes + MediaType → Extractor → Vectorizer → DocumentStore
//!                                                   ↓
//!                                    SearchRequest → DocumentMatch
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Document`] | A persisted document with its fingerprint |
//! | [`MediaType`] | Closed set of supported upload types |
//! | [`Fingerprint`] | Class-tagged fixed-shape content summary |
//! | [`ExtractionResult`] | Decoded content plus metadata |
//! | [`DocumentMatch`] | A search hit with an optional score |
//!
//! ## Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`DocumentStore`] | Persist and retrieve document rows |
//!
//! ## Related Crates
//!
//! - `docdex-extract`: media-type-specific content extraction
//! - `docdex-vector`: fingerprint generation and similarity scoring
//! - `docdex-index`: store implementations, ingest pipeline, search engine

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, ExtractError, IngestError, Result, SearchError, StoreError};
pub use traits::*;
pub use types::*;
