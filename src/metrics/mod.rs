//! Transcript analytics.
//!
//! Every analyzer is a pure function over the transcript text, the optional
//! word timestamps, and its config section. [`compute_all_metrics`] runs them
//! all and flattens the results into one report.

pub mod core;
pub mod fillers;
pub mod pacing;
pub mod pauses;
pub mod repetition;
pub mod text;
pub mod vocabulary;

pub use self::core::{compute_core_metrics, CoreMetrics};
pub use fillers::{compute_filler_metrics, FillerCount, FillerEvent, FillerMetrics};
pub use pacing::{compute_pacing_metrics, PacingMetrics};
pub use pauses::{compute_pause_metrics, Pause, PauseMetrics};
pub use repetition::{compute_repetition_metrics, RepeatedPhrase, RepeatedWord, RepetitionMetrics};
pub use vocabulary::{compute_vocabulary_metrics, VocabularyMetrics};

use crate::asr::WordTimestamp;
use crate::config::Config;
use serde::{Deserialize, Serialize};

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// All analyzer outputs, flattened into a single flat JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    #[serde(flatten)]
    pub core: CoreMetrics,
    #[serde(flatten)]
    pub fillers: FillerMetrics,
    #[serde(flatten)]
    pub repetition: RepetitionMetrics,
    #[serde(flatten)]
    pub pauses: PauseMetrics,
    #[serde(flatten)]
    pub vocabulary: VocabularyMetrics,
    #[serde(flatten)]
    pub pacing: PacingMetrics,
}

/// Run every analyzer over one transcript.
///
/// Pure: no I/O, no shared state, deterministic for identical inputs.
pub fn compute_all_metrics(
    transcript: &str,
    duration_seconds: f64,
    word_timestamps: Option<&[WordTimestamp]>,
    config: &Config,
) -> MetricsReport {
    let core = compute_core_metrics(transcript, duration_seconds);
    let word_count = core.word_count;

    MetricsReport {
        core,
        fillers: compute_filler_metrics(transcript, word_timestamps, &config.fillers),
        repetition: compute_repetition_metrics(transcript, &config.repetition),
        pauses: compute_pause_metrics(word_timestamps, &config.pauses),
        vocabulary: compute_vocabulary_metrics(transcript),
        pacing: compute_pacing_metrics(
            duration_seconds,
            word_count,
            word_timestamps,
            &config.pacing,
        ),
    }
}
