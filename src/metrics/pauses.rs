//! Pause analysis over inter-word gaps.

use crate::asr::WordTimestamp;
use crate::config::PauseConfig;
use crate::metrics::{round2, round3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauseMetrics {
    /// Longest non-noise gap in seconds.
    pub longest_pause_seconds: f64,
    /// Mean of all non-noise gaps in seconds.
    pub avg_pause_duration: f64,
    /// Number of gaps at or above the significance threshold.
    pub pause_count_over_1s: usize,
    /// The significant pauses, in recording order.
    pub pauses: Vec<Pause>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pause {
    /// Gap length in seconds.
    pub duration: f64,
    pub after_word: String,
    pub before_word: String,
    /// End time of the word preceding the pause, in seconds.
    pub position: f64,
}

impl PauseMetrics {
    fn empty() -> Self {
        Self {
            longest_pause_seconds: 0.0,
            avg_pause_duration: 0.0,
            pause_count_over_1s: 0,
            pauses: Vec::new(),
        }
    }
}

/// Analyze gaps between consecutive word timestamps.
///
/// Gaps are rounded to millisecond precision. Gaps at or below the noise
/// floor are timing jitter and are discarded before any statistic is
/// computed; the longest/average figures cover every remaining gap, while
/// the returned pause list only holds gaps at or above the significance
/// threshold. Fewer than two timestamps yields the all-zero result.
pub fn compute_pause_metrics(
    word_timestamps: Option<&[WordTimestamp]>,
    config: &PauseConfig,
) -> PauseMetrics {
    let timestamps = match word_timestamps {
        Some(ts) if ts.len() >= 2 => ts,
        _ => return PauseMetrics::empty(),
    };

    let mut gaps = Vec::new();
    for pair in timestamps.windows(2) {
        let gap = round3(pair[1].start - pair[0].end);
        if gap > config.noise_floor_secs {
            gaps.push(Pause {
                duration: gap,
                after_word: pair[0].word.clone(),
                before_word: pair[1].word.clone(),
                position: round3(pair[0].end),
            });
        }
    }

    if gaps.is_empty() {
        return PauseMetrics::empty();
    }

    let longest = gaps
        .iter()
        .map(|p| p.duration)
        .fold(f64::MIN, f64::max);
    let avg = gaps.iter().map(|p| p.duration).sum::<f64>() / gaps.len() as f64;

    let significant: Vec<Pause> = gaps
        .into_iter()
        .filter(|p| p.duration >= config.significant_threshold_secs)
        .collect();

    PauseMetrics {
        longest_pause_seconds: round2(longest),
        avg_pause_duration: round2(avg),
        pause_count_over_1s: significant.len(),
        pauses: significant,
    }
}
