//! Image content extractor.
//!
//! Decodes an uploaded image into a packed RGB8 pixel buffer for the
//! histogram vectorizer.

use docdex_core::{DocumentMetadata, ExtractError, ExtractionResult, PixelBuffer, RawContent};
use tracing::{debug, warn};

/// Extract pixel data and metadata from encoded image bytes.
///
/// Decode failures degrade to empty content; this function never errors.
#[must_use]
pub fn extract(bytes: &[u8]) -> ExtractionResult {
    match try_extract(bytes) {
        Ok(result) => result,
        Err(e) => {
            warn!("image extraction failed: {e}");
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
    let format = image::guess_format(bytes).map_or_else(
        |_| "unknown".to_string(),
        |f| format!("{f:?}").to_lowercase(),
    );

    let img = image::load_from_memory(bytes).map_err(|e| ExtractError::Decode(e.to_string()))?;

    // Histograms are computed over a 3-channel representation regardless
    // of the source color model.
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    debug!("decoded {width}x{height} {format} image");

    Ok(ExtractionResult {
        metadata: DocumentMetadata::Image {
            width,
            height,
            format,
        },
        content: RawContent::Pixels(PixelBuffer {
            width,
            height,
            rgb: rgb.into_raw(),
        }),
    })
}
