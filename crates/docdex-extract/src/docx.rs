//! DOCX content extractor.
//!
//! A DOCX file is an OOXML zip container; the document body lives in
//! `word/document.xml`. Text is the concatenation of `w:t` runs, with
//! paragraph ends mapped to newlines and breaks/tabs to spaces.

use docdex_core::{DocumentMetadata, ExtractError, ExtractionResult, RawContent};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use tracing::{debug, warn};
use zip::ZipArchive;

/// Extract text and metadata from DOCX bytes.
///
/// Container or XML failures degrade to empty content; this function
/// never errors.
#[must_use]
pub fn extract(bytes: &[u8]) -> ExtractionResult {
    match try_extract(bytes) {
        Ok(result) => result,
        Err(e) => {
            warn!("DOCX extraction failed: {e}");
            ExtractionResult {
                metadata: DocumentMetadata::Unavailable {
                    error: e.to_string(),
                },
                content: RawContent::Empty,
            }
        }
    }
}

fn try_extract(bytes: &[u8]) -> Result<ExtractionResult, ExtractError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| ExtractError::Parse(e.to_string()))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractError::Parse(e.to_string()))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractError::Parse(e.to_string()))?;

    let text = document_text(&xml)?;
    let word_count = count_words(&text);
    debug!("extracted {} words from DOCX body", word_count);

    Ok(ExtractionResult {
        metadata: DocumentMetadata::Docx {
            text_length: text.chars().count(),
            word_count,
        },
        content: RawContent::Text(text),
    })
}

/// Walk the document XML and collect visible text.
fn document_text(xml: &str) -> Result<String, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if e.local_name().into_inner() == b"t" {
                    in_text_run = true;
                }
            }
            Ok(Event::Empty(e)) => {
                if matches!(e.local_name().into_inner(), b"br" | b"tab") {
                    text.push(' ');
                }
            }
            Ok(Event::Text(t)) if in_text_run => {
                let run = t.unescape().map_err(|e| ExtractError::Parse(e.to_string()))?;
                text.push_str(&run);
            }
            Ok(Event::End(e)) => match e.local_name().into_inner() {
                b"t" => in_text_run = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractError::Parse(e.to_string())),
            Ok(_) => {}
        }
    }

    Ok(text)
}

/// Word count: maximal runs of alphanumeric/underscore characters.
fn count_words(text: &str) -> usize {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty())
        .count()
}
