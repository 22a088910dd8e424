//! SVG content extractor.
//!
//! SVG carries no vectorizable content; extraction reads width, height
//! and namespace off the root element and stops there.

use docdex_core::{DocumentMetadata, ExtractError, ExtractionResult, RawContent};
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::warn;

/// Extract root-element attributes from SVG bytes.
///
/// Parse failures degrade to empty content; this function never errors.
#[must_use]
pub fn extract(bytes: &[u8]) -> ExtractionResult {
    match try_extract(bytes) {
        Ok(result) => result,
        Err(e) => {
            warn!("SVG extraction failed: {e}");
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
    let xml = std::str::from_utf8(bytes).map_err(|e| ExtractError::Parse(e.to_string()))?;
    let mut reader = Reader::from_str(xml);

    loop {
        match reader.read_event() {
            Ok(Event::Start(e) | Event::Empty(e)) => {
                if e.local_name().into_inner() != b"svg" {
                    return Err(ExtractError::Parse(format!(
                        "unexpected root element: {}",
                        String::from_utf8_lossy(e.name().into_inner())
                    )));
                }

                let mut width = None;
                let mut height = None;
                let mut namespace = None;

                for attr in e.attributes() {
                    let attr = attr.map_err(|e| ExtractError::Parse(e.to_string()))?;
                    let value = attr
                        .unescape_value()
                        .map_err(|e| ExtractError::Parse(e.to_string()))?
                        .into_owned();
                    match attr.key.into_inner() {
                        b"width" => width = Some(value),
                        b"height" => height = Some(value),
                        b"xmlns" => namespace = Some(value),
                        _ => {}
                    }
                }

                return Ok(ExtractionResult {
                    metadata: DocumentMetadata::Svg {
                        width,
                        height,
                        namespace,
                    },
                    content: RawContent::Empty,
                });
            }
            Ok(Event::Eof) => {
                return Err(ExtractError::Parse("no root element found".to_string()))
            }
            Err(e) => return Err(ExtractError::Parse(e.to_string())),
            // XML declarations, comments and whitespace before the root
            Ok(_) => {}
        }
    }
}
