//! Minimal end-to-end example: index two documents in memory, then run a
//! metadata search and a vector search.
//!
//! Run with: `cargo run --example index_and_search`

use docdex_core::{DocumentStore, IngestConfig, MediaType, QueryInput, SearchConfig, SearchRequest};
use docdex_index::{Indexer, MemoryStore, SearchEngine};
use docdex_vector::Vectorizer;
use std::io::{Cursor, Write};
use std::sync::Arc;

fn docx_bytes(text: &str) -> Vec<u8> {
    let xml = format!(
        r#"<?xml version="1.0"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t>{text}</w:t></w:r></w:p></w:body></w:document>"#
    );
    let mut bytes = Vec::new();
    {
        let mut writer = zip::ZipWriter::new(Cursor::new(&mut bytes));
        writer
            .start_file(
                "word/document.xml",
                zip::write::SimpleFileOptions::default(),
            )
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap();
    }
    bytes
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    store.init().await?;

    let indexer = Indexer::new(
        Arc::clone(&store),
        Vectorizer::default(),
        IngestConfig::default(),
    );
    let engine = SearchEngine::new(
        Arc::clone(&store),
        Vectorizer::default(),
        SearchConfig::default(),
    );

    indexer
        .ingest(
            "Quarterly Report.docx",
            MediaType::Docx,
            &docx_bytes("quarterly revenue grew while quarterly costs held steady"),
        )
        .await?;
    indexer
        .ingest(
            "invoice.docx",
            MediaType::Docx,
            &docx_bytes("payment due in thirty days"),
        )
        .await?;

    let matches = engine
        .search(SearchRequest::Metadata {
            query: "Report".to_string(),
        })
        .await?;
    println!("metadata search for \"Report\":");
    for m in &matches {
        println!("  #{} {}", m.id, m.filename);
    }

    let matches = engine
        .search(SearchRequest::Vector {
            input: QueryInput::Text("quarterly revenue".to_string()),
        })
        .await?;
    println!("vector search for \"quarterly revenue\":");
    for m in &matches {
        println!("  #{} {} (score {:.4})", m.id, m.filename, m.score.unwrap());
    }

    Ok(())
}
