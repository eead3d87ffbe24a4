//! Core speech-rate metrics: word count, WPM, sentence-length stats.

use crate::metrics::round1;
use crate::metrics::text::{split_sentences, tokenize};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreMetrics {
    pub word_count: usize,
    pub words_per_minute: f64,
    pub avg_sentence_length: f64,
    pub longest_sentence_length: usize,
    pub shortest_sentence_length: usize,
}

/// Word count, words-per-minute, and sentence-length statistics.
///
/// WPM is 0 when the duration is not positive. With no sentences, all
/// sentence-length fields are 0.
pub fn compute_core_metrics(transcript: &str, duration_seconds: f64) -> CoreMetrics {
    let word_count = tokenize(transcript).len();

    let words_per_minute = if duration_seconds > 0.0 {
        round1(word_count as f64 / duration_seconds * 60.0)
    } else {
        0.0
    };

    let sentence_lengths: Vec<usize> = split_sentences(transcript)
        .iter()
        .map(|s| tokenize(s).len())
        .collect();

    let (avg, longest, shortest) = if sentence_lengths.is_empty() {
        (0.0, 0, 0)
    } else {
        let total: usize = sentence_lengths.iter().sum();
        (
            round1(total as f64 / sentence_lengths.len() as f64),
            sentence_lengths.iter().copied().max().unwrap_or(0),
            sentence_lengths.iter().copied().min().unwrap_or(0),
        )
    };

    CoreMetrics {
        word_count,
        words_per_minute,
        avg_sentence_length: avg,
        longest_sentence_length: longest,
        shortest_sentence_length: shortest,
    }
}
