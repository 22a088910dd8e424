//! Color-histogram image vectorizer.
//!
//! Computes per-channel intensity histograms over RGB8 pixel data,
//! concatenated in R, G, B order, normalized by total pixel count.

use docdex_core::{Fingerprint, PixelBuffer};

/// Convert pixel data into an image-class fingerprint of exactly
/// `3 * bins_per_channel` components.
///
/// Every bin is divided by `width * height`, so components are
/// frequencies in `[0, 1]` and each channel's bins sum to 1. A
/// zero-pixel image yields [`Fingerprint::Empty`].
#[must_use]
pub fn color_histogram(pixels: &PixelBuffer, bins_per_channel: usize) -> Fingerprint {
    if bins_per_channel == 0 {
        return Fingerprint::Empty;
    }

    let total = pixels.pixel_count();
    if total == 0 || pixels.rgb.is_empty() {
        return Fingerprint::Empty;
    }

    // Intensities per bin; 256 bins map one intensity to one bin.
    let bin_width = 256usize.div_ceil(bins_per_channel);

    let mut counts = vec![0u64; bins_per_channel * 3];
    for pixel in pixels.rgb.chunks_exact(3) {
        for (channel, &value) in pixel.iter().enumerate() {
            let bin = (value as usize / bin_width).min(bins_per_channel - 1);
            counts[channel * bins_per_channel + bin] += 1;
        }
    }

    let total = total as f64;
    let values = counts
        .iter()
        .map(|&c| (c as f64 / total) as f32)
        .collect();

    Fingerprint::Image(values)
}
