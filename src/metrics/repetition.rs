//! Repetition analysis: immediate word runs and repeated phrases.
//!
//! Word runs and phrase n-grams count differently on purpose: a run of the
//! same word is one disfluency event (the scan jumps past it), while phrase
//! counting slides one token at a time and does count overlapping windows,
//! treating repeated phrases as a frequency signal.

use crate::config::RepetitionConfig;
use crate::metrics::text::tokenize;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Common short English phrases that are not meaningful repetitions.
const COMMON_PHRASES: &[&str] = &[
    "i think", "it is", "in the", "of the", "to the", "and the", "on the", "is a", "for the",
];

/// How many repeated phrases to report at most.
const TOP_PHRASES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepetitionMetrics {
    pub repetition_count: usize,
    pub repeated_words: Vec<RepeatedWord>,
    pub repeated_phrases: Vec<RepeatedPhrase>,
}

/// A maximal run of the same word said back to back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepeatedWord {
    pub word: String,
    /// Total occurrences in the run (3 for "the the the").
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepeatedPhrase {
    pub phrase: String,
    pub count: usize,
}

/// Detect immediate word repetitions and repeated phrases.
pub fn compute_repetition_metrics(transcript: &str, config: &RepetitionConfig) -> RepetitionMetrics {
    let words = tokenize(transcript);

    let repeated_words = find_word_runs(&words);
    let repeated_phrases = find_repeated_phrases(&words, config);

    RepetitionMetrics {
        repetition_count: repeated_words.len() + repeated_phrases.len(),
        repeated_words,
        repeated_phrases,
    }
}

/// Maximal runs of >=2 identical consecutive tokens, one event per run.
/// The scan position jumps past each run, so runs never double-count.
fn find_word_runs(words: &[String]) -> Vec<RepeatedWord> {
    let mut runs = Vec::new();
    let mut i = 0;
    while i + 1 < words.len() {
        if words[i] == words[i + 1] {
            let word = words[i].clone();
            let mut count = 1;
            while i + 1 < words.len() && words[i] == words[i + 1] {
                count += 1;
                i += 1;
            }
            runs.push(RepeatedWord { word, count });
        }
        i += 1;
    }
    runs
}

/// Contiguous n-grams (overlapping windows included) occurring >=2 times,
/// minus the common-phrase stoplist; top results by count, ties by first
/// occurrence in the transcript.
fn find_repeated_phrases(words: &[String], config: &RepetitionConfig) -> Vec<RepeatedPhrase> {
    let mut counter: HashMap<String, (usize, usize)> = HashMap::new();
    let mut order = 0usize;

    for length in config.min_phrase_len..=config.max_phrase_len {
        if length == 0 || words.len() < length {
            continue;
        }
        for window in words.windows(length) {
            let phrase = window.join(" ");
            let entry = counter.entry(phrase).or_insert_with(|| {
                let slot = (0, order);
                order += 1;
                slot
            });
            entry.0 += 1;
        }
    }

    let mut phrases: Vec<(String, usize, usize)> = counter
        .into_iter()
        .filter(|(phrase, (count, _))| *count >= 2 && !COMMON_PHRASES.contains(&phrase.as_str()))
        .map(|(phrase, (count, first_seen))| (phrase, count, first_seen))
        .collect();

    phrases.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    phrases.truncate(TOP_PHRASES);

    phrases
        .into_iter()
        .map(|(phrase, count, _)| RepeatedPhrase { phrase, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_config() -> RepetitionConfig {
        RepetitionConfig::default()
    }

    #[test]
    fn detects_triple_word_run_as_one_event() {
        let m = compute_repetition_metrics("the the the", &default_config());
        assert_eq!(
            m.repeated_words,
            vec![RepeatedWord {
                word: "the".to_string(),
                count: 3
            }]
        );
        // The overlapping bigram "the the" also qualifies as a repeated
        // phrase, so the total is the run event plus one phrase event.
        assert_eq!(
            m.repeated_phrases,
            vec![RepeatedPhrase {
                phrase: "the the".to_string(),
                count: 2
            }]
        );
        assert_eq!(m.repetition_count, 2);
    }

    #[test]
    fn separate_runs_are_separate_events() {
        let m = compute_repetition_metrics("go go stop wait wait wait", &default_config());
        assert_eq!(m.repeated_words.len(), 2);
        assert_eq!(m.repeated_words[0].word, "go");
        assert_eq!(m.repeated_words[0].count, 2);
        assert_eq!(m.repeated_words[1].word, "wait");
        assert_eq!(m.repeated_words[1].count, 3);
    }

    #[test]
    fn no_repetition_in_distinct_words() {
        let m = compute_repetition_metrics("every word here differs", &default_config());
        assert_eq!(m.repetition_count, 0);
        assert!(m.repeated_words.is_empty());
        assert!(m.repeated_phrases.is_empty());
    }

    #[test]
    fn repeated_phrase_detected() {
        let m = compute_repetition_metrics(
            "we should really focus now because we should really try",
            &default_config(),
        );
        let phrases: Vec<&str> = m.repeated_phrases.iter().map(|p| p.phrase.as_str()).collect();
        assert!(phrases.contains(&"we should"));
        assert!(phrases.contains(&"should really"));
        assert!(phrases.contains(&"we should really"));
    }

    #[test]
    fn ngram_counting_includes_overlapping_windows() {
        // "a b a b a b" -> bigram "a b" appears 3 times via sliding windows
        let m = compute_repetition_metrics("a b a b a b", &default_config());
        let ab = m
            .repeated_phrases
            .iter()
            .find(|p| p.phrase == "a b")
            .expect("phrase 'a b' should be reported");
        assert_eq!(ab.count, 3);
    }

    #[test]
    fn common_phrases_are_excluded() {
        let m = compute_repetition_metrics(
            "it is cold and it is late and it is dark",
            &default_config(),
        );
        assert!(m.repeated_phrases.iter().all(|p| p.phrase != "it is"));
    }

    #[test]
    fn phrases_sorted_by_count_descending() {
        let m = compute_repetition_metrics(
            "red car red car red car blue sky blue sky",
            &default_config(),
        );
        for pair in m.repeated_phrases.windows(2) {
            assert!(pair[0].count >= pair[1].count);
        }
    }

    #[test]
    fn top_ten_cap() {
        // 12 distinct repeated bigrams; only 10 survive. The tokenizer
        // drops digits, so the distinct words must be letters only.
        let names = [
            "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
            "eleven", "twelve",
        ];
        let mut text = String::new();
        for name in names {
            let pair = format!("alpha{name} beta{name} ");
            text.push_str(&pair);
            text.push_str("x ");
            text.push_str(&pair);
            text.push_str("y ");
        }
        let config = RepetitionConfig {
            min_phrase_len: 2,
            max_phrase_len: 2,
        };
        let m = compute_repetition_metrics(&text, &config);
        assert_eq!(m.repeated_phrases.len(), 10);
    }

    #[test]
    fn count_sums_runs_and_phrases() {
        let m = compute_repetition_metrics("no no the big dog saw the big dog", &default_config());
        let expected = m.repeated_words.len() + m.repeated_phrases.len();
        assert_eq!(m.repetition_count, expected);
        assert!(m.repetition_count >= 3); // "no no" + "the big"/"big dog"/...
    }

    #[test]
    fn empty_transcript() {
        let m = compute_repetition_metrics("", &default_config());
        assert_eq!(m.repetition_count, 0);
    }

    #[test]
    fn pure_function_is_deterministic() {
        let text = "we should really focus now because we should really try";
        let a = compute_repetition_metrics(text, &default_config());
        let b = compute_repetition_metrics(text, &default_config());
        assert_eq!(a, b);
    }
}
