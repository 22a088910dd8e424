//! Core traits for docdex components.
//!
//! The only trait seam in the engine is [`DocumentStore`]: extraction and
//! vectorization are pure functions dispatched over the closed
//! [`MediaType`](crate::types::MediaType) set, but storage backends are
//! swappable (in-memory for tests, SQLite for persistence).

use async_trait::async_trait;

use crate::error::StoreError;
use crate::types::{Document, IndexStats, NewDocument};

/// Trait for document storage.
///
/// Implementations must serialize concurrent inserts (an insert is atomic:
/// either the full row persists or none of it does) and give readers a
/// transactionally-consistent snapshot. Ids are assigned monotonically,
/// starting at 1.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Initialize the backing storage (create tables, etc.).
    async fn init(&self) -> Result<(), StoreError>;

    /// Insert a document atomically and return its assigned id.
    async fn insert(&self, doc: NewDocument) -> Result<i64, StoreError>;

    /// Fetch a document by id.
    async fn get(&self, id: i64) -> Result<Option<Document>, StoreError>;

    /// Snapshot of all stored documents, in id order.
    async fn all(&self) -> Result<Vec<Document>, StoreError>;

    /// ASCII case-insensitive substring match over filename and media
    /// type (the `LIKE` semantics of the original storage layer).
    /// Results come back in natural storage order.
    async fn find_metadata(&self, query: &str) -> Result<Vec<Document>, StoreError>;

    /// Store statistics.
    async fn stats(&self) -> Result<IndexStats, StoreError>;
}
