//! Bag-of-words text vectorizer.
//!
//! Lowercases the input, tokenizes into maximal runs of
//! alphanumeric/underscore characters, counts token frequencies, keeps
//! the most frequent distinct tokens and emits their counts as a
//! fixed-length vector.

use docdex_core::Fingerprint;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Convert text into a text-class fingerprint of exactly
/// `vocabulary_size` components.
///
/// Position *i* holds the frequency of the *i*-th selected token; tokens
/// are ranked by descending count with first-encountered order breaking
/// ties, which makes the output deterministic. Positions past the number
/// of distinct tokens are zero. Text with no tokens yields
/// [`Fingerprint::Empty`], not a zero-filled vector.
#[must_use]
pub fn bag_of_words(text: &str, vocabulary_size: usize) -> Fingerprint {
    if vocabulary_size == 0 {
        return Fingerprint::Empty;
    }

    let lowered = text.to_lowercase();

    // Counts plus first-seen order in one pass.
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for token in tokens(&lowered) {
        match counts.entry(token) {
            Entry::Occupied(mut e) => *e.get_mut() += 1,
            Entry::Vacant(e) => {
                e.insert(1);
                order.push(token);
            }
        }
    }

    if order.is_empty() {
        return Fingerprint::Empty;
    }

    let mut ranked: Vec<(usize, &str)> = order.into_iter().enumerate().collect();
    ranked.sort_by(|a, b| counts[b.1].cmp(&counts[a.1]).then(a.0.cmp(&b.0)));

    let mut values = vec![0.0f32; vocabulary_size];
    for (slot, (_, token)) in ranked.iter().take(vocabulary_size).enumerate() {
        values[slot] = counts[*token] as f32;
    }

    Fingerprint::Text(values)
}

/// Word boundary is any character outside `[A-Za-z0-9_]` and their
/// Unicode equivalents.
fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docdex_core::FingerprintClass;

    #[test]
    fn test_fingerprint_has_exact_vocabulary_length() {
        let fp = bag_of_words("alpha alpha beta", 100);
        assert_eq!(fp.class(), Some(FingerprintClass::Text));
        assert_eq!(fp.len(), 100);
    }

    #[test]
    fn test_top_tokens_lead_the_vector() {
        // "alpha" twice, "beta" once: the first two populated positions
        // carry those counts, the rest stay zero.
        let fp = bag_of_words("alpha alpha beta", 100);
        let values = fp.values();
        assert_eq!(values[0], 2.0);
        assert_eq!(values[1], 1.0);
        assert!(values[2..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_ties_break_by_first_encountered_order() {
        // All counts equal; order of appearance decides the positions.
        let fp = bag_of_words("zebra apple mango", 3);
        assert_eq!(fp.values(), &[1.0, 1.0, 1.0]);

        // Mixed counts: "two" (2) outranks all singles, which keep
        // appearance order.
        let fp = bag_of_words("one two two three", 4);
        assert_eq!(fp.values(), &[2.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_lowercasing_merges_case_variants() {
        let fp = bag_of_words("Rust rust RUST", 10);
        assert_eq!(fp.values()[0], 3.0);
        assert!(fp.values()[1..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_punctuation_is_a_word_boundary() {
        let fp = bag_of_words("hello,world;hello.", 10);
        assert_eq!(fp.values()[0], 2.0); // hello
        assert_eq!(fp.values()[1], 1.0); // world
    }

    #[test]
    fn test_underscore_is_part_of_a_token() {
        let fp = bag_of_words("snake_case snake_case other", 10);
        assert_eq!(fp.values()[0], 2.0);
        assert_eq!(fp.values()[1], 1.0);
    }

    #[test]
    fn test_empty_text_yields_empty_fingerprint() {
        assert_eq!(bag_of_words("", 100), Fingerprint::Empty);
        assert_eq!(bag_of_words("   \n\t  ", 100), Fingerprint::Empty);
        assert_eq!(bag_of_words("!!! ... ???", 100), Fingerprint::Empty);
    }

    #[test]
    fn test_more_tokens_than_vocabulary_truncates() {
        let text: String = (0..150)
            .map(|i| format!("word{i} "))
            .collect::<Vec<_>>()
            .join("");
        let fp = bag_of_words(&text, 100);
        assert_eq!(fp.len(), 100);
        assert!(fp.values().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_determinism() {
        let text = "the quick brown fox jumps over the lazy dog the end";
        let a = bag_of_words(text, 100);
        let b = bag_of_words(text, 100);
        assert_eq!(a, b);
    }
}
