//! Ingest pipeline: extract → vectorize → insert.

use chrono::Utc;
use docdex_core::{
    Document, DocumentStore, Error, IngestConfig, IngestError, MediaType, NewDocument, StoreError,
};
use docdex_extract::Extractor;
use docdex_vector::Vectorizer;
use std::sync::Arc;
use tracing::{debug, info};

/// Drives a document through the full pipeline into the store.
pub struct Indexer {
    store: Arc<dyn DocumentStore>,
    extractor: Extractor,
    vectorizer: Vectorizer,
    config: IngestConfig,
}

impl Indexer {
    /// Create an indexer over the given store.
    pub fn new(store: Arc<dyn DocumentStore>, vectorizer: Vectorizer, config: IngestConfig) -> Self {
        Self {
            store,
            extractor: Extractor::new(),
            vectorizer,
            config,
        }
    }

    /// Ingest one upload: size guard, extraction, vectorization, then an
    /// atomic insert. Returns the stored document.
    ///
    /// Extraction failures degrade to an unindexed (empty-fingerprint)
    /// document rather than failing the ingest; oversized uploads and
    /// storage failures are surfaced as errors.
    pub async fn ingest(
        &self,
        filename: &str,
        media_type: MediaType,
        bytes: &[u8],
    ) -> Result<Document, Error> {
        let size_bytes = bytes.len() as u64;
        if size_bytes > self.config.max_file_size {
            return Err(IngestError::TooLarge {
                size_bytes,
                max_bytes: self.config.max_file_size,
            }
            .into());
        }

        debug!("ingesting {filename} ({media_type}, {size_bytes} bytes)");
        let extraction = self.extractor.extract(bytes, media_type);
        let fingerprint = self.vectorizer.vectorize(&extraction.content);

        let new_doc = NewDocument {
            filename: filename.to_string(),
            media_type,
            size_bytes,
            uploaded_at: Utc::now(),
            metadata: extraction.metadata,
            fingerprint,
        };

        let id = self.store.insert(new_doc).await.map_err(IngestError::Store)?;
        let doc = self
            .store
            .get(id)
            .await
            .map_err(IngestError::Store)?
            .ok_or_else(|| {
                IngestError::Store(StoreError::Query(format!("inserted row {id} missing")))
            })?;

        info!(
            "indexed {} as document {} (fingerprint: {:?}, {} components)",
            filename,
            doc.id,
            doc.fingerprint.class(),
            doc.fingerprint.len()
        );
        Ok(doc)
    }
}
