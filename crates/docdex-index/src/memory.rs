//! In-memory document store.
//!
//! Keeps all rows in memory behind a single `RwLock`, which makes inserts
//! trivially atomic and gives readers a consistent snapshot. Useful for
//! tests and development; [`SqliteStore`](crate::SqliteStore) is the
//! persistent backend.

use async_trait::async_trait;
use docdex_core::{Document, DocumentStore, IndexStats, NewDocument, StoreError};
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::metadata_matches;

struct Inner {
    next_id: i64,
    documents: BTreeMap<i64, Document>,
}

/// In-memory document store.
///
/// # Example
///
/// ```rust
/// use docdex_index::MemoryStore;
/// use docdex_core::DocumentStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryStore::new();
/// store.init().await?;
/// assert_eq!(store.stats().await?.total_documents, 0);
/// # Ok(())
/// # }
/// ```
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_id: 1,
                documents: BTreeMap::new(),
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn init(&self) -> Result<(), StoreError> {
        debug!("MemoryStore initialized");
        Ok(())
    }

    async fn insert(&self, doc: NewDocument) -> Result<i64, StoreError> {
        // Id assignment and insertion happen under one write guard, so
        // concurrent inserts can neither skip nor reuse an id.
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;
        inner.documents.insert(id, doc.into_document(id));
        debug!("inserted document {id}");
        Ok(id)
    }

    async fn get(&self, id: i64) -> Result<Option<Document>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.documents.get(&id).cloned())
    }

    async fn all(&self) -> Result<Vec<Document>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.documents.values().cloned().collect())
    }

    async fn find_metadata(&self, query: &str) -> Result<Vec<Document>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .documents
            .values()
            .filter(|doc| metadata_matches(doc, query))
            .cloned()
            .collect())
    }

    async fn stats(&self) -> Result<IndexStats, StoreError> {
        let inner = self.inner.read().await;
        Ok(IndexStats {
            total_documents: inner.documents.len() as u64,
            fingerprinted_documents: inner
                .documents
                .values()
                .filter(|doc| !doc.fingerprint.is_empty())
                .count() as u64,
            last_insert: inner.documents.values().map(|doc| doc.uploaded_at).max(),
        })
    }
}
