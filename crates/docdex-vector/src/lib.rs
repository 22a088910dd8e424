//! # docdex-vector
//!
//! Fingerprint generation and similarity scoring for docdex.
//!
//! Two vectorization schemes, selected by the extractor's output kind:
//!
//! - **Text → bag-of-words**: token frequencies of the most frequent
//!   distinct tokens, in a vector of exactly
//!   [`VectorizerConfig::vocabulary_size`](docdex_core::VectorizerConfig)
//!   components (default 100).
//! - **Image → color histogram**: per-channel intensity frequencies in a
//!   vector of exactly `3 × bins_per_channel` components (default 768).
//!
//! Both are pure functions: no I/O, no hidden state, and the same input
//! bytes always produce bit-identical fingerprints. The deliberate absence
//! of learned embeddings keeps the engine dependency-free and
//! reproducible.

pub mod bow;
pub mod histogram;
pub mod similarity;

pub use similarity::cosine_similarity;

use docdex_core::{Fingerprint, PixelBuffer, RawContent, VectorizerConfig};
use tracing::debug;

/// Vectorizer configured with explicit fingerprint shapes.
///
/// Thresholds and dimensions come in through [`VectorizerConfig`] at
/// construction; there is no process-wide state.
#[derive(Debug, Clone, Default)]
pub struct Vectorizer {
    config: VectorizerConfig,
}

impl Vectorizer {
    /// Create a vectorizer with the given configuration.
    #[must_use]
    pub fn new(config: VectorizerConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }

    /// Fingerprint extracted content.
    #[must_use]
    pub fn vectorize(&self, content: &RawContent) -> Fingerprint {
        let fingerprint = match content {
            RawContent::Text(text) => self.vectorize_text(text),
            RawContent::Pixels(pixels) => self.vectorize_pixels(pixels),
            RawContent::Empty => Fingerprint::Empty,
        };
        debug!(
            "vectorized content into {:?} fingerprint of length {}",
            fingerprint.class(),
            fingerprint.len()
        );
        fingerprint
    }

    /// Fingerprint a piece of text.
    #[must_use]
    pub fn vectorize_text(&self, text: &str) -> Fingerprint {
        bow::bag_of_words(text, self.config.vocabulary_size)
    }

    /// Fingerprint decoded pixel data.
    #[must_use]
    pub fn vectorize_pixels(&self, pixels: &PixelBuffer) -> Fingerprint {
        histogram::color_histogram(pixels, self.config.bins_per_channel)
    }
}
