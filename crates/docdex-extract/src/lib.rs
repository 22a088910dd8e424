//! # docdex-extract
//!
//! Content extraction from uploaded files for the docdex indexing pipeline.
//!
//! Given a byte stream and its declared [`MediaType`], the [`Extractor`]
//! produces an [`ExtractionResult`]: raw content for the vectorizer (text
//! or pixel data) plus a type-specific metadata record.
//!
//! ## Supported Formats
//!
//! | Media type | Content | Metadata |
//! |------------|---------|----------|
//! | PDF | extracted text | page count, document-info title |
//! | DOCX | concatenated `w:t` runs | text length, word count |
//! | Image (PNG/JPEG) | RGB8 pixel buffer | dimensions, format |
//! | SVG | none | root-element width/height/namespace |
//!
//! ## Totality
//!
//! Extraction never fails past this boundary. A corrupt or unreadable
//! file degrades to [`RawContent::Empty`](docdex_core::RawContent::Empty)
//! with [`DocumentMetadata::Unavailable`](docdex_core::DocumentMetadata)
//! recording the cause; callers must treat empty output as a valid,
//! indexable-as-empty result.

pub mod docx;
pub mod image;
pub mod pdf;
pub mod svg;

use docdex_core::{ExtractionResult, MediaType};

/// Feature extractor over the closed media-type set.
///
/// Dispatch is a single exhaustive `match`: adding a media type is a
/// compile-time-checked change, not a runtime registry lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct Extractor;

impl Extractor {
    /// Create a new extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Decode an upload into raw content and metadata.
    ///
    /// Pure with respect to external state; the input bytes are already
    /// fully in memory.
    #[must_use]
    pub fn extract(&self, bytes: &[u8], media_type: MediaType) -> ExtractionResult {
        match media_type {
            MediaType::Pdf => pdf::extract(bytes),
            MediaType::Docx => docx::extract(bytes),
            MediaType::Image => image::extract(bytes),
            MediaType::Svg => svg::extract(bytes),
        }
    }
}
