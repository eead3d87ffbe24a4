//! Pacing metrics: articulation rate and speaking-time ratio.

use crate::asr::WordTimestamp;
use crate::config::PacingConfig;
use crate::metrics::round1;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacingMetrics {
    /// Words per minute of actual speaking time, pauses excluded.
    pub articulation_rate: f64,
    /// Fraction of the recording spent speaking, as a percentage.
    pub speaking_time_ratio: f64,
}

impl PacingMetrics {
    fn empty() -> Self {
        Self {
            articulation_rate: 0.0,
            speaking_time_ratio: 0.0,
        }
    }
}

/// Articulation rate and speaking-time ratio from word timings.
///
/// Pause time is the sum of inter-word gaps strictly above the gap
/// threshold; speaking time is the recording duration minus that, floored
/// just above zero so the rate stays finite. Requires at least two
/// timestamps and a positive duration, otherwise both figures are 0.
pub fn compute_pacing_metrics(
    duration_seconds: f64,
    word_count: usize,
    word_timestamps: Option<&[WordTimestamp]>,
    config: &PacingConfig,
) -> PacingMetrics {
    let timestamps = match word_timestamps {
        Some(ts) if ts.len() >= 2 && duration_seconds > 0.0 => ts,
        _ => return PacingMetrics::empty(),
    };

    let total_pause: f64 = timestamps
        .windows(2)
        .map(|pair| pair[1].start - pair[0].end)
        .filter(|gap| *gap > config.gap_threshold_secs)
        .sum();

    let speaking_time = (duration_seconds - total_pause).max(0.01);

    PacingMetrics {
        articulation_rate: round1(word_count as f64 / speaking_time * 60.0),
        speaking_time_ratio: round1(speaking_time / duration_seconds * 100.0),
    }
}
