//! Core types for docdex.
//!
//! This module contains the shared data structures used across the engine:
//!
//! ## Documents
//! - [`Document`]: a persisted document row with its fingerprint
//! - [`NewDocument`]: the insert payload before an id is assigned
//! - [`MediaType`]: the closed set of supported upload types
//! - [`DocumentMetadata`]: per-type attributes captured at extraction time
//!
//! ## Extraction
//! - [`ExtractionResult`]: decoded content plus metadata
//! - [`RawContent`]: extracted text, pixel data, or nothing
//! - [`PixelBuffer`]: packed RGB8 pixel data
//!
//! ## Fingerprints
//! - [`Fingerprint`]: a class-tagged fixed-shape numeric summary
//! - [`FingerprintClass`]: the comparability class (text vs image)
//!
//! ## Search
//! - [`SearchRequest`] / [`QueryInput`]: the two query modes
//! - [`DocumentMatch`]: a matching document with an optional score
//!
//! ## Configuration
//! - [`VectorizerConfig`], [`SearchConfig`], [`IngestConfig`]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Media types
// ============================================================================

/// The closed set of media types the engine accepts.
///
/// Dispatch over this enum is exhaustive: adding a new type is a
/// compile-time-checked change everywhere content is decoded or classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Pdf,
    Docx,
    Image,
    Svg,
}

impl MediaType {
    /// Map a file extension to a media type.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(MediaType::Pdf),
            "docx" => Some(MediaType::Docx),
            "jpg" | "jpeg" | "png" => Some(MediaType::Image),
            "svg" => Some(MediaType::Svg),
            _ => None,
        }
    }

    /// Stable string form, used for persistence and metadata matching.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Pdf => "pdf",
            MediaType::Docx => "docx",
            MediaType::Image => "image",
            MediaType::Svg => "svg",
        }
    }

    /// The fingerprint class documents of this type produce, if any.
    ///
    /// SVG carries no extractable content and therefore no class.
    #[must_use]
    pub fn fingerprint_class(&self) -> Option<FingerprintClass> {
        match self {
            MediaType::Pdf | MediaType::Docx => Some(FingerprintClass::Text),
            MediaType::Image => Some(FingerprintClass::Image),
            MediaType::Svg => None,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Fingerprints
// ============================================================================

/// Comparability class of a fingerprint.
///
/// Two fingerprints are comparable only if their classes match; the class
/// also fixes the vector length (vocabulary size for text, three times the
/// per-channel bin count for images).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FingerprintClass {
    Text,
    Image,
}

/// A fixed-shape numeric summary of a document's content, tagged with the
/// class it belongs to.
///
/// `Empty` means the document is unindexed (no extractable content, or
/// extraction degraded to nothing). A fingerprint is owned by exactly one
/// document and never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class", content = "values", rename_all = "lowercase")]
pub enum Fingerprint {
    Empty,
    Text(Vec<f32>),
    Image(Vec<f32>),
}

impl Fingerprint {
    /// The class tag, or `None` for an empty fingerprint.
    #[must_use]
    pub fn class(&self) -> Option<FingerprintClass> {
        match self {
            Fingerprint::Empty => None,
            Fingerprint::Text(_) => Some(FingerprintClass::Text),
            Fingerprint::Image(_) => Some(FingerprintClass::Image),
        }
    }

    /// The numeric components (empty slice for `Empty`).
    #[must_use]
    pub fn values(&self) -> &[f32] {
        match self {
            Fingerprint::Empty => &[],
            Fingerprint::Text(v) | Fingerprint::Image(v) => v,
        }
    }

    /// Number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values().len()
    }

    /// Whether this fingerprint carries no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }
}

// ============================================================================
// Extraction
// ============================================================================

/// Packed RGB8 pixel data decoded from an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Interleaved R,G,B bytes, row-major, `width * height * 3` long
    pub rgb: Vec<u8>,
}

impl PixelBuffer {
    /// Total pixel count.
    #[must_use]
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Raw content produced by the feature extractor.
#[derive(Debug, Clone, PartialEq)]
pub enum RawContent {
    /// Extracted text (PDF, DOCX)
    Text(String),
    /// Decoded pixel data (images)
    Pixels(PixelBuffer),
    /// No vectorizable content (SVG, or extraction degraded)
    Empty,
}

/// Output of the feature extractor: decoded content plus a metadata record.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionResult {
    /// Type-specific attributes captured during decoding
    pub metadata: DocumentMetadata,
    /// The content handed to the vectorizer
    pub content: RawContent,
}

/// Type-specific metadata captured at extraction time.
///
/// Opaque to the index: it is stored and returned with matches but never
/// interpreted beyond serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocumentMetadata {
    Pdf {
        page_count: u32,
        title: Option<String>,
    },
    Docx {
        text_length: usize,
        word_count: usize,
    },
    Image {
        width: u32,
        height: u32,
        format: String,
    },
    Svg {
        width: Option<String>,
        height: Option<String>,
        namespace: Option<String>,
    },
    /// Extraction failed; the pipeline degraded to empty content.
    Unavailable { error: String },
}

// ============================================================================
// Documents
// ============================================================================

/// A persisted document row.
///
/// Rows are immutable after insert: the lifecycle is create-on-upload,
/// read-many-on-search. Ids are unique and monotonically assigned by the
/// store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique id assigned on insert
    pub id: i64,
    /// Original filename as declared by the uploader
    pub filename: String,
    /// Declared media type
    pub media_type: MediaType,
    /// Size of the uploaded bytes
    pub size_bytes: u64,
    /// Insertion timestamp
    pub uploaded_at: DateTime<Utc>,
    /// Type-specific attributes
    pub metadata: DocumentMetadata,
    /// Content fingerprint (`Empty` for unindexed documents)
    pub fingerprint: Fingerprint,
}

/// Insert payload: everything except the store-assigned id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDocument {
    pub filename: String,
    pub media_type: MediaType,
    pub size_bytes: u64,
    pub uploaded_at: DateTime<Utc>,
    pub metadata: DocumentMetadata,
    pub fingerprint: Fingerprint,
}

impl NewDocument {
    /// Attach the id assigned by the store.
    #[must_use]
    pub fn into_document(self, id: i64) -> Document {
        Document {
            id,
            filename: self.filename,
            media_type: self.media_type,
            size_bytes: self.size_bytes,
            uploaded_at: self.uploaded_at,
            metadata: self.metadata,
            fingerprint: self.fingerprint,
        }
    }
}

// ============================================================================
// Search
// ============================================================================

/// Input for a vector-mode query.
#[derive(Debug, Clone)]
pub enum QueryInput {
    /// Free text, fingerprinted with the bag-of-words scheme
    Text(String),
    /// Encoded image bytes, fingerprinted with the color-histogram scheme
    ImageBytes(Vec<u8>),
}

/// A search request. The two modes are mutually exclusive per request.
#[derive(Debug, Clone)]
pub enum SearchRequest {
    /// Substring match over filename and media type
    Metadata { query: String },
    /// Nearest-neighbor ranking over stored fingerprints
    Vector { input: QueryInput },
}

/// A matching document returned from a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMatch {
    pub id: i64,
    pub filename: String,
    pub media_type: MediaType,
    pub size_bytes: u64,
    pub uploaded_at: DateTime<Utc>,
    pub metadata: DocumentMetadata,
    /// Similarity score; present only for vector-mode results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl DocumentMatch {
    /// Build a match from a stored document.
    #[must_use]
    pub fn from_document(doc: Document, score: Option<f32>) -> Self {
        Self {
            id: doc.id,
            filename: doc.filename,
            media_type: doc.media_type,
            size_bytes: doc.size_bytes,
            uploaded_at: doc.uploaded_at,
            metadata: doc.metadata,
            score,
        }
    }
}

/// Index statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Total documents stored
    pub total_documents: u64,
    /// Documents carrying a non-empty fingerprint
    pub fingerprinted_documents: u64,
    /// Timestamp of the most recent insert
    pub last_insert: Option<DateTime<Utc>>,
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for the vectorizer.
///
/// The defaults fix the two fingerprint shapes: 100-dimensional text
/// vectors and 768-dimensional (3 × 256) image histograms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerConfig {
    /// Number of most-frequent tokens kept in a text fingerprint
    #[serde(default = "default_vocabulary_size")]
    pub vocabulary_size: usize,
    /// Histogram bins per color channel
    #[serde(default = "default_bins_per_channel")]
    pub bins_per_channel: usize,
}

fn default_vocabulary_size() -> usize {
    100
}

fn default_bins_per_channel() -> usize {
    256
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            vocabulary_size: default_vocabulary_size(),
            bins_per_channel: default_bins_per_channel(),
        }
    }
}

impl VectorizerConfig {
    /// Length of a non-empty text-class fingerprint.
    #[must_use]
    pub fn text_dimension(&self) -> usize {
        self.vocabulary_size
    }

    /// Length of a non-empty image-class fingerprint.
    #[must_use]
    pub fn image_dimension(&self) -> usize {
        self.bins_per_channel * 3
    }
}

/// Configuration for vector search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Scores at or below this cutoff are excluded from results.
    /// The comparison is strict: a score must exceed the threshold.
    #[serde(default = "default_relevance_threshold")]
    pub relevance_threshold: f32,
}

fn default_relevance_threshold() -> f32 {
    0.1
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            relevance_threshold: default_relevance_threshold(),
        }
    }
}

/// Configuration for the ingest pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Maximum accepted upload size in bytes
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

fn default_max_file_size() -> u64 {
    10 * 1024 * 1024
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== MediaType Tests ====================

    #[test]
    fn test_media_type_from_extension() {
        assert_eq!(MediaType::from_extension("pdf"), Some(MediaType::Pdf));
        assert_eq!(MediaType::from_extension("PDF"), Some(MediaType::Pdf));
        assert_eq!(MediaType::from_extension("docx"), Some(MediaType::Docx));
        assert_eq!(MediaType::from_extension("jpg"), Some(MediaType::Image));
        assert_eq!(MediaType::from_extension("jpeg"), Some(MediaType::Image));
        assert_eq!(MediaType::from_extension("png"), Some(MediaType::Image));
        assert_eq!(MediaType::from_extension("svg"), Some(MediaType::Svg));
        assert_eq!(MediaType::from_extension("exe"), None);
        assert_eq!(MediaType::from_extension(""), None);
    }

    #[test]
    fn test_media_type_fingerprint_class() {
        assert_eq!(
            MediaType::Pdf.fingerprint_class(),
            Some(FingerprintClass::Text)
        );
        assert_eq!(
            MediaType::Docx.fingerprint_class(),
            Some(FingerprintClass::Text)
        );
        assert_eq!(
            MediaType::Image.fingerprint_class(),
            Some(FingerprintClass::Image)
        );
        assert_eq!(MediaType::Svg.fingerprint_class(), None);
    }

    #[test]
    fn test_media_type_serialization() {
        assert_eq!(serde_json::to_string(&MediaType::Pdf).unwrap(), "\"pdf\"");
        assert_eq!(serde_json::to_string(&MediaType::Svg).unwrap(), "\"svg\"");
    }

    #[test]
    fn test_media_type_display_matches_as_str() {
        for mt in [
            MediaType::Pdf,
            MediaType::Docx,
            MediaType::Image,
            MediaType::Svg,
        ] {
            assert_eq!(mt.to_string(), mt.as_str());
        }
    }

    // ==================== Fingerprint Tests ====================

    #[test]
    fn test_fingerprint_class_and_len() {
        let empty = Fingerprint::Empty;
        assert_eq!(empty.class(), None);
        assert_eq!(empty.len(), 0);
        assert!(empty.is_empty());

        let text = Fingerprint::Text(vec![1.0, 2.0]);
        assert_eq!(text.class(), Some(FingerprintClass::Text));
        assert_eq!(text.len(), 2);
        assert!(!text.is_empty());

        let image = Fingerprint::Image(vec![0.5; 768]);
        assert_eq!(image.class(), Some(FingerprintClass::Image));
        assert_eq!(image.len(), 768);
    }

    #[test]
    fn test_fingerprint_serialization_roundtrip() {
        let fp = Fingerprint::Text(vec![2.0, 1.0, 0.0]);
        let json = serde_json::to_string(&fp).unwrap();
        assert!(json.contains("\"class\":\"text\""));
        let back: Fingerprint = serde_json::from_str(&json).unwrap();
        assert_eq!(fp, back);
    }

    #[test]
    fn test_fingerprint_empty_serialization() {
        let json = serde_json::to_string(&Fingerprint::Empty).unwrap();
        assert!(json.contains("\"class\":\"empty\""));
        let back: Fingerprint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Fingerprint::Empty);
    }

    #[test]
    fn test_fingerprint_float_roundtrip_is_exact() {
        // JSON serialization must preserve components exactly for
        // similarity comparison after a store round-trip.
        let values: Vec<f32> = (0..768).map(|i| 1.0 / (i as f32 + 3.0)).collect();
        let fp = Fingerprint::Image(values.clone());
        let json = serde_json::to_string(&fp).unwrap();
        let back: Fingerprint = serde_json::from_str(&json).unwrap();
        assert_eq!(back.values(), values.as_slice());
    }

    // ==================== PixelBuffer Tests ====================

    #[test]
    fn test_pixel_buffer_pixel_count() {
        let buf = PixelBuffer {
            width: 10,
            height: 10,
            rgb: vec![0; 300],
        };
        assert_eq!(buf.pixel_count(), 100);

        let empty = PixelBuffer {
            width: 0,
            height: 10,
            rgb: vec![],
        };
        assert_eq!(empty.pixel_count(), 0);
    }

    // ==================== DocumentMetadata Tests ====================

    #[test]
    fn test_document_metadata_serialization() {
        let meta = DocumentMetadata::Pdf {
            page_count: 3,
            title: Some("Annual Report".to_string()),
        };
        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains("\"kind\":\"pdf\""));
        assert!(json.contains("\"page_count\":3"));

        let back: DocumentMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(meta, back);
    }

    #[test]
    fn test_document_metadata_unavailable() {
        let meta = DocumentMetadata::Unavailable {
            error: "truncated stream".to_string(),
        };
        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains("\"kind\":\"unavailable\""));
    }

    // ==================== Document Tests ====================

    #[test]
    fn test_new_document_into_document() {
        let new_doc = NewDocument {
            filename: "notes.docx".to_string(),
            media_type: MediaType::Docx,
            size_bytes: 512,
            uploaded_at: Utc::now(),
            metadata: DocumentMetadata::Docx {
                text_length: 40,
                word_count: 8,
            },
            fingerprint: Fingerprint::Text(vec![1.0; 100]),
        };
        let doc = new_doc.clone().into_document(7);
        assert_eq!(doc.id, 7);
        assert_eq!(doc.filename, new_doc.filename);
        assert_eq!(doc.fingerprint, new_doc.fingerprint);
    }

    #[test]
    fn test_document_serialization_roundtrip() {
        let doc = Document {
            id: 1,
            filename: "photo.png".to_string(),
            media_type: MediaType::Image,
            size_bytes: 2048,
            uploaded_at: Utc::now(),
            metadata: DocumentMetadata::Image {
                width: 10,
                height: 10,
                format: "png".to_string(),
            },
            fingerprint: Fingerprint::Image(vec![0.01; 768]),
        };
        let json = serde_json::to_string(&doc).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, back);
    }

    #[test]
    fn test_document_match_score_omitted_when_none() {
        let doc = Document {
            id: 2,
            filename: "diagram.svg".to_string(),
            media_type: MediaType::Svg,
            size_bytes: 100,
            uploaded_at: Utc::now(),
            metadata: DocumentMetadata::Svg {
                width: Some("100".to_string()),
                height: Some("50".to_string()),
                namespace: Some("http://www.w3.org/2000/svg".to_string()),
            },
            fingerprint: Fingerprint::Empty,
        };
        let m = DocumentMatch::from_document(doc, None);
        let json = serde_json::to_string(&m).unwrap();
        assert!(!json.contains("score"));
    }

    // ==================== Config Tests ====================

    #[test]
    fn test_vectorizer_config_default() {
        let config = VectorizerConfig::default();
        assert_eq!(config.vocabulary_size, 100);
        assert_eq!(config.bins_per_channel, 256);
        assert_eq!(config.text_dimension(), 100);
        assert_eq!(config.image_dimension(), 768);
    }

    #[test]
    fn test_search_config_default() {
        let config = SearchConfig::default();
        assert!((config.relevance_threshold - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn test_ingest_config_default() {
        let config = IngestConfig::default();
        assert_eq!(config.max_file_size, 10 * 1024 * 1024);
    }

    #[test]
    fn test_config_serde_defaults() {
        let config: VectorizerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, VectorizerConfig::default());

        let config: SearchConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SearchConfig::default());
    }
}
