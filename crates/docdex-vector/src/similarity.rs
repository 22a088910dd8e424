//! Cosine similarity over class-tagged fingerprints.

use docdex_core::Fingerprint;

/// Compute the cosine similarity between two fingerprints.
///
/// Defined as `dot(a, b) / (‖a‖ · ‖b‖)`, accumulated in `f64`. Returns
/// `0.0` — never an error — when the fingerprints are not comparable:
/// mismatched classes, mismatched lengths, either side empty, or either
/// side zero-magnitude. Both fingerprint schemes produce non-negative
/// components, so scores land in `[0, 1]` in practice.
#[must_use]
pub fn cosine_similarity(a: &Fingerprint, b: &Fingerprint) -> f32 {
    let (Some(class_a), Some(class_b)) = (a.class(), b.class()) else {
        return 0.0;
    };
    if class_a != class_b {
        return 0.0;
    }

    let (va, vb) = (a.values(), b.values());
    if va.len() != vb.len() || va.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in va.iter().zip(vb) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a.sqrt() * norm_b.sqrt())) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(values: Vec<f32>) -> Fingerprint {
        Fingerprint::Text(values)
    }

    #[test]
    fn test_self_similarity_is_one() {
        let fp = text(vec![3.0, 1.0, 2.0]);
        assert!((cosine_similarity(&fp, &fp) - 1.0).abs() < 1e-6);

        let img = Fingerprint::Image(vec![0.25; 768]);
        assert!((cosine_similarity(&img, &img) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_symmetry() {
        let a = text(vec![1.0, 2.0, 3.0]);
        let b = text(vec![3.0, 2.0, 1.0]);
        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    #[test]
    fn test_orthogonal_vectors_score_zero() {
        let a = text(vec![1.0, 0.0, 0.0]);
        let b = text(vec![0.0, 1.0, 0.0]);
        assert!(cosine_similarity(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn test_length_mismatch_scores_zero() {
        let a = text(vec![1.0, 2.0]);
        let b = text(vec![1.0, 2.0, 3.0]);
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_class_mismatch_scores_zero() {
        // Same length, different classes: still not comparable.
        let a = Fingerprint::Text(vec![1.0; 768]);
        let b = Fingerprint::Image(vec![1.0; 768]);
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_empty_fingerprint_scores_zero() {
        let a = Fingerprint::Empty;
        let b = text(vec![1.0, 2.0]);
        assert_eq!(cosine_similarity(&a, &b), 0.0);
        assert_eq!(cosine_similarity(&b, &a), 0.0);
        assert_eq!(cosine_similarity(&a, &a), 0.0);
    }

    #[test]
    fn test_zero_magnitude_scores_zero() {
        let a = text(vec![0.0, 0.0, 0.0]);
        let b = text(vec![1.0, 2.0, 3.0]);
        assert_eq!(cosine_similarity(&a, &b), 0.0);
        assert_eq!(cosine_similarity(&a, &a), 0.0);
    }

    #[test]
    fn test_scaled_vectors_are_identical() {
        let a = text(vec![1.0, 2.0, 3.0]);
        let b = text(vec![2.0, 4.0, 6.0]);
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-6);
    }
}
