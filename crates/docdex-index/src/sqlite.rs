//! SQLite-backed document store.
//!
//! One `documents` table; metadata and fingerprint are JSON text columns,
//! which round-trips every float component exactly. Inserts run inside an
//! explicit transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use docdex_core::{
    Document, DocumentMetadata, DocumentStore, Fingerprint, IndexStats, MediaType, NewDocument,
    StoreError,
};
use rusqlite::{params, Connection, Row};
use std::path::Path;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::metadata_matches;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS documents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    filename TEXT NOT NULL,
    media_type TEXT NOT NULL,
    size_bytes INTEGER NOT NULL,
    uploaded_at TEXT NOT NULL,
    metadata TEXT NOT NULL,
    fingerprint TEXT NOT NULL DEFAULT '{\"class\":\"empty\"}'
);
";

/// SQLite document store.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a database file.
    ///
    /// An unreadable existing file is deleted and recreated, matching the
    /// behavior of the original storage layer.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = match Self::probe(path) {
            Ok(conn) => conn,
            Err(e) => {
                warn!("existing database at {path:?} is unusable ({e}), recreating");
                let _ = std::fs::remove_file(path);
                Self::probe(path).map_err(|e| StoreError::Init(e.to_string()))?
            }
        };
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|e| StoreError::Init(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn probe(path: &Path) -> Result<Connection, rusqlite::Error> {
        let conn = Connection::open(path)?;
        // A corrupt or non-database file fails here, not on first use.
        conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        })?;
        Ok(conn)
    }
}

fn row_to_document(row: &Row<'_>) -> rusqlite::Result<Document> {
    let media_type: String = row.get("media_type")?;
    let uploaded_at: String = row.get("uploaded_at")?;
    let metadata: String = row.get("metadata")?;
    let fingerprint: String = row.get("fingerprint")?;

    Ok(Document {
        id: row.get("id")?,
        filename: row.get("filename")?,
        media_type: parse_media_type(&media_type),
        size_bytes: row.get::<_, i64>("size_bytes")? as u64,
        uploaded_at: DateTime::parse_from_rfc3339(&uploaded_at)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_default(),
        metadata: serde_json::from_str(&metadata).unwrap_or(DocumentMetadata::Unavailable {
            error: "unreadable metadata column".to_string(),
        }),
        fingerprint: serde_json::from_str(&fingerprint).unwrap_or(Fingerprint::Empty),
    })
}

fn parse_media_type(s: &str) -> MediaType {
    match s {
        "pdf" => MediaType::Pdf,
        "docx" => MediaType::Docx,
        "image" => MediaType::Image,
        _ => MediaType::Svg,
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn init(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        conn.execute_batch(SCHEMA)
            .map_err(|e| StoreError::Init(e.to_string()))?;
        debug!("SqliteStore initialized");
        Ok(())
    }

    async fn insert(&self, doc: NewDocument) -> Result<i64, StoreError> {
        let metadata = serde_json::to_string(&doc.metadata)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let fingerprint = serde_json::to_string(&doc.fingerprint)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let mut conn = self.conn.lock().await;
        let tx = conn
            .transaction()
            .map_err(|e| StoreError::Insert(e.to_string()))?;
        tx.execute(
            "INSERT INTO documents (filename, media_type, size_bytes, uploaded_at, metadata, fingerprint)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                doc.filename,
                doc.media_type.as_str(),
                doc.size_bytes as i64,
                doc.uploaded_at.to_rfc3339(),
                metadata,
                fingerprint,
            ],
        )
        .map_err(|e| StoreError::Insert(e.to_string()))?;
        let id = tx.last_insert_rowid();
        tx.commit().map_err(|e| StoreError::Insert(e.to_string()))?;

        debug!("inserted document {id}");
        Ok(id)
    }

    async fn get(&self, id: i64) -> Result<Option<Document>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare("SELECT * FROM documents WHERE id = ?1")
            .map_err(|e| StoreError::Query(e.to_string()))?;
        let mut rows = stmt
            .query_map(params![id], row_to_document)
            .map_err(|e| StoreError::Query(e.to_string()))?;
        match rows.next() {
            Some(row) => Ok(Some(row.map_err(|e| StoreError::Query(e.to_string()))?)),
            None => Ok(None),
        }
    }

    async fn all(&self) -> Result<Vec<Document>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare("SELECT * FROM documents ORDER BY id")
            .map_err(|e| StoreError::Query(e.to_string()))?;
        let rows = stmt
            .query_map([], row_to_document)
            .map_err(|e| StoreError::Query(e.to_string()))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| StoreError::Query(e.to_string()))
    }

    async fn find_metadata(&self, query: &str) -> Result<Vec<Document>, StoreError> {
        // Filter in one place (shared with MemoryStore) so match semantics
        // do not depend on the backend. The corpus is scanned linearly for
        // vector search anyway.
        let all = self.all().await?;
        Ok(all
            .into_iter()
            .filter(|doc| metadata_matches(doc, query))
            .collect())
    }

    async fn stats(&self) -> Result<IndexStats, StoreError> {
        let all = self.all().await?;
        Ok(IndexStats {
            total_documents: all.len() as u64,
            fingerprinted_documents: all
                .iter()
                .filter(|doc| !doc.fingerprint.is_empty())
                .count() as u64,
            last_insert: all.iter().map(|doc| doc.uploaded_at).max(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docdex_core::FingerprintClass;

    fn new_doc(filename: &str, media_type: MediaType, fingerprint: Fingerprint) -> NewDocument {
        NewDocument {
            filename: filename.to_string(),
            media_type,
            size_bytes: 2048,
            uploaded_at: Utc::now(),
            metadata: DocumentMetadata::Pdf {
                page_count: 2,
                title: None,
            },
            fingerprint,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_roundtrip() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.init().await.unwrap();

        let fingerprint = Fingerprint::Text(vec![2.0, 1.0, 0.5]);
        let id = store
            .insert(new_doc("report.pdf", MediaType::Pdf, fingerprint.clone()))
            .await
            .unwrap();

        let doc = store.get(id).await.unwrap().unwrap();
        assert_eq!(doc.filename, "report.pdf");
        assert_eq!(doc.media_type, MediaType::Pdf);
        assert_eq!(doc.size_bytes, 2048);
        assert_eq!(doc.fingerprint, fingerprint);
    }

    #[tokio::test]
    async fn test_fingerprint_column_roundtrips_floats_exactly() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.init().await.unwrap();

        let values: Vec<f32> = (0..768).map(|i| 1.0 / (i as f32 + 7.0)).collect();
        let id = store
            .insert(new_doc(
                "photo.png",
                MediaType::Image,
                Fingerprint::Image(values.clone()),
            ))
            .await
            .unwrap();

        let doc = store.get(id).await.unwrap().unwrap();
        assert_eq!(doc.fingerprint.class(), Some(FingerprintClass::Image));
        assert_eq!(doc.fingerprint.values(), values.as_slice());
    }

    #[tokio::test]
    async fn test_ids_are_monotonic() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.init().await.unwrap();

        let a = store
            .insert(new_doc("a.pdf", MediaType::Pdf, Fingerprint::Empty))
            .await
            .unwrap();
        let b = store
            .insert(new_doc("b.pdf", MediaType::Pdf, Fingerprint::Empty))
            .await
            .unwrap();
        assert!(b > a);
    }

    #[tokio::test]
    async fn test_find_metadata_substring() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.init().await.unwrap();

        store
            .insert(new_doc(
                "Quarterly Report.pdf",
                MediaType::Pdf,
                Fingerprint::Empty,
            ))
            .await
            .unwrap();
        store
            .insert(new_doc("invoice.pdf", MediaType::Pdf, Fingerprint::Empty))
            .await
            .unwrap();

        let hits = store.find_metadata("Report").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].filename, "Quarterly Report.pdf");
    }

    #[tokio::test]
    async fn test_open_recreates_corrupt_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.db");
        std::fs::write(&path, b"definitely not a sqlite file, padded to be long enough \
                                so the header check cannot mistake it for one")
            .unwrap();

        let store = SqliteStore::open(&path).unwrap();
        store.init().await.unwrap();
        let stats = store.stats().await.unwrap();
        assert_eq!(stats.total_documents, 0);
    }

    #[tokio::test]
    async fn test_persistence_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.init().await.unwrap();
            store
                .insert(new_doc("kept.pdf", MediaType::Pdf, Fingerprint::Empty))
                .await
                .unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        store.init().await.unwrap();
        let all = store.all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].filename, "kept.pdf");
    }
}
