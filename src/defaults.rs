//! Default configuration constants for speakscope.
//!
//! This module provides shared constants used across different configuration
//! types to ensure consistency and eliminate duplication.

/// Default speech-to-text model identifier.
///
/// "base" offers a good balance between latency and accuracy for the
/// single-user fluency-feedback use case. "medium" trades speed for accuracy.
pub const DEFAULT_MODEL: &str = "base";

/// Minimum silence gap (milliseconds) the chunker splits on.
///
/// 400ms is long enough to sit between phrases but short enough that most
/// recordings with natural pauses produce more than one chunk.
pub const MIN_SILENCE_MS: u64 = 400;

/// Loudness threshold (dBFS) below which audio counts as silence.
///
/// -40 dBFS sits well below conversational speech levels while staying above
/// typical room noise picked up by consumer microphones.
pub const SILENCE_THRESHOLD_DBFS: f64 = -40.0;

/// Padding of silence (milliseconds) retained at each cut edge.
///
/// Keeping 200ms of the detected silence on both sides of a cut avoids
/// clipping soft word onsets and endings at chunk boundaries.
pub const KEEP_SILENCE_MS: u64 = 200;

/// Recording duration (seconds) above which the chunked path is taken.
///
/// Recordings at or below this length are transcribed in one pass; longer
/// ones are split on silence and transcribed chunk-by-chunk in parallel.
pub const LONG_RECORDING_THRESHOLD_SECS: u64 = 30;

/// Upper bound on concurrent chunk transcriptions.
///
/// The effective pool size is min(chunk count, this cap). Four keeps a
/// desktop machine responsive while the heavy ASR calls run.
pub const MAX_PARALLEL_TRANSCRIPTIONS: usize = 4;

/// Single-token filler words, matched against tokenized words exactly.
pub const SINGLE_FILLERS: &[&str] = &["uh", "um", "like", "basically", "actually"];

/// Multi-token filler phrases, matched as substrings of the lowercased text.
pub const PHRASE_FILLERS: &[&str] = &["you know"];

/// Words that only count as fillers when they open a sentence.
pub const SENTENCE_START_FILLERS: &[&str] = &["so"];

/// Inter-word gap (seconds) at or above which a pause is significant.
pub const PAUSE_THRESHOLD_SECS: f64 = 1.0;

/// Inter-word gap (seconds) at or below which a gap is timing noise.
///
/// ASR word boundaries jitter by tens of milliseconds; gaps this small are
/// discarded before any pause statistics are computed.
pub const PAUSE_NOISE_FLOOR_SECS: f64 = 0.1;

/// Minimum repeated-phrase length in words.
pub const MIN_PHRASE_LEN: usize = 2;

/// Maximum repeated-phrase length in words.
pub const MAX_PHRASE_LEN: usize = 3;

/// Inter-word gap (seconds) above which time counts as non-speaking.
///
/// Looser than the pause noise floor on purpose: pacing measures total time
/// lost to hesitation, so brief articulatory gaps still count as speaking.
pub const PACING_GAP_THRESHOLD_SECS: f64 = 0.25;
