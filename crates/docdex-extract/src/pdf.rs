//! PDF content extractor.
//!
//! Uses pdf-extract for text content and lopdf for page count and the
//! document-info title.

use docdex_core::{DocumentMetadata, ExtractError, ExtractionResult, RawContent};
use tracing::{debug, warn};

/// Extract text and metadata from PDF bytes.
///
/// Parse failures degrade to empty content; this function never errors.
#[must_use]
pub fn extract(bytes: &[u8]) -> ExtractionResult {
    match try_extract(bytes) {
        Ok(result) => result,
        Err(e) => {
            warn!("PDF extraction failed: {e}");
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
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractError::Parse(e.to_string()))?;

    let (page_count, title) = read_document_info(bytes);
    debug!(
        "extracted {} chars from {} PDF page(s)",
        text.len(),
        page_count
    );

    Ok(ExtractionResult {
        metadata: DocumentMetadata::Pdf { page_count, title },
        content: RawContent::Text(text),
    })
}

/// Best-effort page count and title via lopdf. Structural problems here
/// must not fail an extraction whose text already parsed.
fn read_document_info(bytes: &[u8]) -> (u32, Option<String>) {
    let doc = match lopdf::Document::load_mem(bytes) {
        Ok(doc) => doc,
        Err(e) => {
            debug!("could not read PDF structure: {e}");
            return (0, None);
        }
    };

    let page_count = doc.get_pages().len() as u32;

    let title = doc
        .trailer
        .get(b"Info")
        .ok()
        .and_then(|obj| obj.as_reference().ok())
        .and_then(|id| doc.get_object(id).ok())
        .and_then(|obj| obj.as_dict().ok())
        .and_then(|dict| dict.get(b"Title").ok())
        .and_then(|obj| obj.as_str().ok())
        .map(|raw| String::from_utf8_lossy(raw).into_owned())
        .filter(|title| !title.is_empty());

    (page_count, title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupt_pdf_degrades_to_empty() {
        let result = extract(b"%PDF-1.7 truncated nonsense");
        assert_eq!(result.content, RawContent::Empty);
        assert!(matches!(
            result.metadata,
            DocumentMetadata::Unavailable { .. }
        ));
    }

    #[test]
    fn test_empty_input_degrades_to_empty() {
        let result = extract(&[]);
        assert_eq!(result.content, RawContent::Empty);
    }

    #[test]
    fn test_read_document_info_on_garbage_is_zero() {
        let (pages, title) = read_document_info(b"not a pdf at all");
        assert_eq!(pages, 0);
        assert!(title.is_none());
    }

    #[test]
    fn test_read_document_info_counts_pages() {
        // Build a minimal two-page document with lopdf itself.
        use lopdf::{dictionary, Document, Object};

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let page1 = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
        });
        let page2 = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
        });

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page1.into(), page2.into()],
                "Count" => 2,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();

        let (pages, _title) = read_document_info(&bytes);
        assert_eq!(pages, 2);
    }
}
