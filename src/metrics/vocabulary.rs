//! Vocabulary diversity metrics.

use crate::metrics::text::{split_sentences, tokenize};
use crate::metrics::{round1, round2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyMetrics {
    /// Type-token ratio: unique words over total words.
    pub vocabulary_diversity: f64,
    pub avg_word_length: f64,
    pub sentence_count: usize,
    pub unique_word_count: usize,
}

/// Type-token ratio, average word length, and sentence count.
///
/// No words means no vocabulary: every field is 0, even when the raw text
/// still splits into sentence-like pieces (digits or punctuation only).
pub fn compute_vocabulary_metrics(transcript: &str) -> VocabularyMetrics {
    let words = tokenize(transcript);

    if words.is_empty() {
        return VocabularyMetrics {
            vocabulary_diversity: 0.0,
            avg_word_length: 0.0,
            sentence_count: 0,
            unique_word_count: 0,
        };
    }

    let sentence_count = split_sentences(transcript).len();

    let unique: HashSet<&str> = words.iter().map(String::as_str).collect();
    let total_len: usize = words.iter().map(String::len).sum();

    VocabularyMetrics {
        vocabulary_diversity: round2(unique.len() as f64 / words.len() as f64),
        avg_word_length: round1(total_len as f64 / words.len() as f64),
        sentence_count,
        unique_word_count: unique.len(),
    }
}
