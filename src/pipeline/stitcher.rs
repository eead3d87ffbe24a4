//! Merges per-chunk transcription results back into one recording-level
//! result.
//!
//! Chunk results arrive in completion order, not recording order; merging
//! sorts by window start before anything else. Word timestamps are shifted
//! from chunk-relative to recording-absolute time using the chunk's window
//! start.

use crate::asr::{TranscriptionOutput, WordTimestamp};
use crate::metrics::round3;

/// A transcribed chunk tagged with its absolute window.
#[derive(Debug, Clone)]
pub struct ChunkTranscriptionResult {
    /// Window start in milliseconds.
    pub start_time: u64,
    /// Window end in milliseconds.
    pub end_time: u64,
    pub result: TranscriptionOutput,
}

/// Merge chunk results into a single recording-level transcription.
///
/// Transcripts are trimmed and joined with single spaces; chunks whose
/// transcript is empty contribute nothing. `model_used` is taken from the
/// first chunk in recording order that reports one. Timestamps are offset
/// by the chunk window start and kept at millisecond precision.
pub fn merge_chunk_results(mut results: Vec<ChunkTranscriptionResult>) -> TranscriptionOutput {
    results.sort_by_key(|r| r.start_time);

    let mut transcript_parts = Vec::new();
    let mut word_timestamps = Vec::new();
    let mut model_used = String::new();

    for chunk in results {
        let offset_secs = chunk.start_time as f64 / 1000.0;

        let trimmed = chunk.result.transcript.trim();
        if !trimmed.is_empty() {
            transcript_parts.push(trimmed.to_string());
        }

        for ts in chunk.result.word_timestamps {
            word_timestamps.push(WordTimestamp::new(
                ts.word,
                round3(ts.start + offset_secs),
                round3(ts.end + offset_secs),
            ));
        }

        if model_used.is_empty() && !chunk.result.model_used.is_empty() {
            model_used = chunk.result.model_used;
        }
    }

    TranscriptionOutput {
        transcript: transcript_parts.join(" "),
        word_timestamps,
        model_used,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(
        start_time: u64,
        end_time: u64,
        transcript: &str,
        timestamps: Vec<WordTimestamp>,
        model: &str,
    ) -> ChunkTranscriptionResult {
        ChunkTranscriptionResult {
            start_time,
            end_time,
            result: TranscriptionOutput {
                transcript: transcript.to_string(),
                word_timestamps: timestamps,
                model_used: model.to_string(),
            },
        }
    }

    #[test]
    fn empty_input_merges_to_empty_output() {
        let merged = merge_chunk_results(Vec::new());
        assert_eq!(merged, TranscriptionOutput::default());
    }

    #[test]
    fn joins_transcripts_in_recording_order() {
        let results = vec![
            chunk(10_000, 20_000, "second part", vec![], "base"),
            chunk(0, 10_000, "first part", vec![], "base"),
        ];
        let merged = merge_chunk_results(results);
        assert_eq!(merged.transcript, "first part second part");
    }

    #[test]
    fn offsets_timestamps_by_window_start() {
        let results = vec![
            chunk(
                0,
                5_000,
                "hello",
                vec![WordTimestamp::new("hello", 0.5, 1.0)],
                "base",
            ),
            chunk(
                5_000,
                10_000,
                "world",
                vec![WordTimestamp::new("world", 0.25, 0.75)],
                "base",
            ),
        ];
        let merged = merge_chunk_results(results);
        assert_eq!(merged.word_timestamps.len(), 2);
        assert_eq!(merged.word_timestamps[0].start, 0.5);
        assert_eq!(merged.word_timestamps[1].start, 5.25);
        assert_eq!(merged.word_timestamps[1].end, 5.75);
    }

    #[test]
    fn merged_timestamps_are_monotonic() {
        let results = vec![
            chunk(
                7_000,
                12_000,
                "later words",
                vec![
                    WordTimestamp::new("later", 0.0, 0.4),
                    WordTimestamp::new("words", 0.5, 0.9),
                ],
                "base",
            ),
            chunk(
                0,
                7_000,
                "early words",
                vec![
                    WordTimestamp::new("early", 0.0, 0.4),
                    WordTimestamp::new("words", 0.5, 0.9),
                ],
                "base",
            ),
        ];
        let merged = merge_chunk_results(results);
        for pair in merged.word_timestamps.windows(2) {
            assert!(pair[1].start >= pair[0].start);
        }
    }

    #[test]
    fn input_order_does_not_matter() {
        let a = vec![
            chunk(0, 3_000, "one", vec![WordTimestamp::new("one", 0.1, 0.5)], "base"),
            chunk(3_000, 6_000, "two", vec![WordTimestamp::new("two", 0.1, 0.5)], "base"),
        ];
        let mut b = a.clone();
        b.reverse();
        assert_eq!(merge_chunk_results(a), merge_chunk_results(b));
    }

    #[test]
    fn empty_chunk_transcripts_are_skipped() {
        let results = vec![
            chunk(0, 5_000, "speech here", vec![], "base"),
            chunk(5_000, 8_000, "   ", vec![], "base"),
            chunk(8_000, 12_000, "more speech", vec![], "base"),
        ];
        let merged = merge_chunk_results(results);
        // No doubled spaces from the silent chunk
        assert_eq!(merged.transcript, "speech here more speech");
    }

    #[test]
    fn model_comes_from_first_nonempty_in_recording_order() {
        let results = vec![
            chunk(5_000, 10_000, "later", vec![], "medium"),
            chunk(0, 5_000, "", vec![], ""),
        ];
        let merged = merge_chunk_results(results);
        assert_eq!(merged.model_used, "medium");
    }

    #[test]
    fn timestamps_round_to_millisecond_precision() {
        let results = vec![chunk(
            333,
            5_000,
            "word",
            vec![WordTimestamp::new("word", 0.1001, 0.2002)],
            "base",
        )];
        let merged = merge_chunk_results(results);
        assert_eq!(merged.word_timestamps[0].start, 0.433);
        assert_eq!(merged.word_timestamps[0].end, 0.533);
    }
}
