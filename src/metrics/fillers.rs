//! Filler-word analysis.
//!
//! Three categories, each driven by a configurable list:
//! - single tokens ("um"), matched exactly against tokenized words;
//! - multi-token phrases ("you know"), matched as non-overlapping substrings
//!   of the lowercased raw text;
//! - sentence-initial words ("so"), counted only as a sentence's first token
//!   and labeled distinctly from mid-sentence use.

use crate::asr::WordTimestamp;
use crate::config::FillerConfig;
use crate::metrics::round1;
use crate::metrics::text::{split_sentences, tokenize};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillerMetrics {
    pub filler_count: usize,
    pub filler_density: f64,
    pub most_common_filler: String,
    /// Per-label occurrence counts, in first-encountered order.
    pub filler_details: Vec<FillerCount>,
    /// Single-token filler occurrences with their recording position.
    pub filler_timeline: Vec<FillerEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillerCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillerEvent {
    pub filler: String,
    /// Start time in seconds of the matching word timestamp.
    pub position: f64,
}

impl FillerMetrics {
    /// Occurrence count for a label, 0 if absent. Test/display convenience.
    pub fn detail_count(&self, label: &str) -> usize {
        self.filler_details
            .iter()
            .find(|d| d.label == label)
            .map(|d| d.count)
            .unwrap_or(0)
    }
}

/// Ordered label→count accumulator; insertion order breaks ties downstream.
#[derive(Default)]
struct OrderedCounts(Vec<FillerCount>);

impl OrderedCounts {
    fn bump(&mut self, label: &str) {
        match self.0.iter_mut().find(|d| d.label == label) {
            Some(entry) => entry.count += 1,
            None => self.0.push(FillerCount {
                label: label.to_string(),
                count: 1,
            }),
        }
    }
}

/// Count filler words across all three categories.
///
/// Timeline positions come from `word_timestamps` by token index. This
/// assumes tokenization yields the same word count and order as the ASR word
/// list; when the two diverge (contractions, hyphenation) positions can
/// under- or mis-report. Counts themselves never depend on timestamps.
pub fn compute_filler_metrics(
    transcript: &str,
    word_timestamps: Option<&[WordTimestamp]>,
    config: &FillerConfig,
) -> FillerMetrics {
    let text_lower = transcript.to_lowercase();
    let words = tokenize(transcript);
    let word_count = words.len();

    let mut counts = OrderedCounts::default();
    let mut timeline = Vec::new();

    // Single-token fillers, with index-aligned timeline tagging
    for (i, word) in words.iter().enumerate() {
        if config.single.iter().any(|f| f == word) {
            counts.bump(word);
            if let Some(timestamps) = word_timestamps {
                if let Some(ts) = timestamps.get(i) {
                    timeline.push(FillerEvent {
                        filler: word.clone(),
                        position: ts.start,
                    });
                }
            }
        }
    }

    // Phrase fillers: non-overlapping substring scan, cursor advances past
    // each match so overlapping occurrences are not double-counted
    for phrase in &config.phrases {
        let phrase_lower = phrase.to_lowercase();
        if phrase_lower.is_empty() {
            continue;
        }
        let mut search_from = 0;
        while let Some(found) = text_lower[search_from..].find(&phrase_lower) {
            counts.bump(phrase);
            search_from += found + phrase_lower.len();
        }
    }

    // Sentence-initial fillers, labeled apart from mid-sentence use
    for sentence in split_sentences(transcript) {
        if let Some(first_word) = tokenize(&sentence).first() {
            if config.sentence_start.iter().any(|f| f == first_word) {
                counts.bump(&format!("{} (start)", first_word));
            }
        }
    }

    let filler_count: usize = counts.0.iter().map(|d| d.count).sum();
    let filler_density = if word_count > 0 {
        round1(filler_count as f64 / word_count as f64 * 100.0)
    } else {
        0.0
    };

    // Highest raw count wins; ties go to the first-encountered label
    let mut most_common_filler = "none".to_string();
    let mut best = 0usize;
    for detail in &counts.0 {
        if detail.count > best {
            best = detail.count;
            most_common_filler = detail.label.clone();
        }
    }

    FillerMetrics {
        filler_count,
        filler_density,
        most_common_filler,
        filler_details: counts.0,
        filler_timeline: timeline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_config() -> FillerConfig {
        FillerConfig::default()
    }

    #[test]
    fn counts_single_fillers() {
        let m = compute_filler_metrics("um I was like thinking um", None, &default_config());
        assert_eq!(m.detail_count("um"), 2);
        assert_eq!(m.detail_count("like"), 1);
        assert_eq!(m.filler_count, 3);
    }

    #[test]
    fn sentence_start_filler_tagged_distinctly() {
        let m = compute_filler_metrics(
            "So, um, I think it is fine. I did so as well.",
            None,
            &default_config(),
        );
        assert_eq!(m.detail_count("so (start)"), 1);
        assert_eq!(m.detail_count("um"), 1);
        // Mid-sentence "so" is not a filler at all
        assert_eq!(m.detail_count("so"), 0);
        assert_eq!(m.filler_count, 2);
    }

    #[test]
    fn phrase_filler_non_overlapping_scan() {
        let m = compute_filler_metrics(
            "you know what you know is you know",
            None,
            &default_config(),
        );
        assert_eq!(m.detail_count("you know"), 3);
    }

    #[test]
    fn phrase_filler_cursor_advances_past_match() {
        let config = FillerConfig {
            single: vec![],
            phrases: vec!["aa".to_string()],
            sentence_start: vec![],
        };
        // "aaaa" contains three overlapping "aa" but only two non-overlapping
        let m = compute_filler_metrics("aaaa", None, &config);
        assert_eq!(m.detail_count("aa"), 2);
    }

    #[test]
    fn density_is_percentage_of_words() {
        // 2 fillers in 8 words = 25%
        let m = compute_filler_metrics(
            "um this is a longer um test here",
            None,
            &default_config(),
        );
        assert_eq!(m.filler_count, 2);
        assert_eq!(m.filler_density, 25.0);
    }

    #[test]
    fn empty_transcript_is_neutral() {
        let m = compute_filler_metrics("", None, &default_config());
        assert_eq!(m.filler_count, 0);
        assert_eq!(m.filler_density, 0.0);
        assert_eq!(m.most_common_filler, "none");
        assert!(m.filler_details.is_empty());
        assert!(m.filler_timeline.is_empty());
    }

    #[test]
    fn most_common_ties_break_by_insertion_order() {
        // "uh" and "um" both appear once; "uh" is first in the default list
        // but "um" is encountered first in the text. Insertion order is
        // encounter order, so "um" wins.
        let m = compute_filler_metrics("um and then uh", None, &default_config());
        assert_eq!(m.most_common_filler, "um");
    }

    #[test]
    fn timeline_uses_index_aligned_timestamps() {
        let timestamps = vec![
            WordTimestamp::new("um", 0.5, 0.7),
            WordTimestamp::new("hello", 1.0, 1.4),
            WordTimestamp::new("um", 2.0, 2.2),
        ];
        let m = compute_filler_metrics("um hello um", Some(&timestamps), &default_config());
        assert_eq!(m.filler_timeline.len(), 2);
        assert_eq!(m.filler_timeline[0].position, 0.5);
        assert_eq!(m.filler_timeline[1].position, 2.0);
    }

    #[test]
    fn timeline_alignment_failure_boundary() {
        // Tokenization splits "it's" into one token but suppose the ASR
        // emitted two words: indices past the timestamp list are skipped,
        // the count is still right.
        let timestamps = vec![WordTimestamp::new("um", 0.5, 0.7)];
        let m = compute_filler_metrics("um like", Some(&timestamps), &default_config());
        assert_eq!(m.filler_count, 2);
        // "like" is at token index 1, beyond the timestamp list
        assert_eq!(m.filler_timeline.len(), 1);
    }

    #[test]
    fn no_timestamps_means_empty_timeline_but_full_counts() {
        let m = compute_filler_metrics("um um um", None, &default_config());
        assert_eq!(m.filler_count, 3);
        assert!(m.filler_timeline.is_empty());
    }
}
