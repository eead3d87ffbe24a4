//! Audio decoding and silence-detection collaborator traits.

use crate::config::ChunkingConfig;
use crate::error::{Result, SpeakscopeError};
use std::sync::Arc;

/// Tunable parameters for silence detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SilenceParams {
    /// Minimum silence gap to split on, in milliseconds.
    pub min_silence_ms: u64,
    /// Loudness threshold below which audio counts as silence, in dBFS.
    pub threshold_dbfs: f64,
    /// Silence retained at each cut edge, in milliseconds.
    pub keep_silence_ms: u64,
}

impl Default for SilenceParams {
    fn default() -> Self {
        Self {
            min_silence_ms: crate::defaults::MIN_SILENCE_MS,
            threshold_dbfs: crate::defaults::SILENCE_THRESHOLD_DBFS,
            keep_silence_ms: crate::defaults::KEEP_SILENCE_MS,
        }
    }
}

impl From<&ChunkingConfig> for SilenceParams {
    fn from(config: &ChunkingConfig) -> Self {
        Self {
            min_silence_ms: config.min_silence_ms,
            threshold_dbfs: config.silence_threshold_dbfs,
            keep_silence_ms: config.keep_silence_ms,
        }
    }
}

/// Trait for audio decoding.
///
/// Implementations parse encoded audio bytes and report the clip duration.
pub trait AudioDecoder: Send + Sync {
    /// Decode `audio` and return its duration in milliseconds.
    fn decode_and_measure(&self, audio: &[u8]) -> Result<u64>;
}

/// Trait for silence detection.
///
/// Implementations split a clip at detected silence gaps and return the
/// sub-clips in original order, each re-encoded as canonical 16-bit PCM WAV.
/// An empty result means "no silence found"; callers must not drop the
/// recording in that case.
pub trait SilenceDetector: Send + Sync {
    fn detect_silence_and_split(&self, audio: &[u8], params: &SilenceParams)
        -> Result<Vec<Vec<u8>>>;
}

impl<T: AudioDecoder + ?Sized> AudioDecoder for Arc<T> {
    fn decode_and_measure(&self, audio: &[u8]) -> Result<u64> {
        (**self).decode_and_measure(audio)
    }
}

impl<T: SilenceDetector + ?Sized> SilenceDetector for Arc<T> {
    fn detect_silence_and_split(
        &self,
        audio: &[u8],
        params: &SilenceParams,
    ) -> Result<Vec<Vec<u8>>> {
        (**self).detect_silence_and_split(audio, params)
    }
}

/// Mock audio backend for testing.
///
/// Treats the audio bytes as opaque: duration is scripted via a fixed
/// bytes-per-millisecond rate, and splitting returns scripted segments.
#[derive(Debug, Clone)]
pub struct MockAudioBackend {
    /// Bytes per millisecond used to fabricate durations.
    bytes_per_ms: u64,
    /// Segments returned by silence detection; None means "split evenly
    /// into this many pieces" driven by `split_count`.
    split_count: usize,
    should_fail: bool,
}

impl MockAudioBackend {
    /// Backend that reports 1 byte == 1 ms and finds no silence.
    pub fn new() -> Self {
        Self {
            bytes_per_ms: 1,
            split_count: 0,
            should_fail: false,
        }
    }

    /// Configure how many bytes map to one millisecond.
    pub fn with_bytes_per_ms(mut self, bytes_per_ms: u64) -> Self {
        self.bytes_per_ms = bytes_per_ms.max(1);
        self
    }

    /// Configure silence detection to cut the clip into `count` even pieces.
    pub fn with_split_count(mut self, count: usize) -> Self {
        self.split_count = count;
        self
    }

    /// Configure all operations to fail.
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }
}

impl Default for MockAudioBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioDecoder for MockAudioBackend {
    fn decode_and_measure(&self, audio: &[u8]) -> Result<u64> {
        if self.should_fail {
            return Err(SpeakscopeError::AudioDecode {
                message: "mock decode failure".to_string(),
            });
        }
        Ok(audio.len() as u64 / self.bytes_per_ms)
    }
}

impl SilenceDetector for MockAudioBackend {
    fn detect_silence_and_split(
        &self,
        audio: &[u8],
        _params: &SilenceParams,
    ) -> Result<Vec<Vec<u8>>> {
        if self.should_fail {
            return Err(SpeakscopeError::SilenceDetection {
                message: "mock silence detection failure".to_string(),
            });
        }
        if self.split_count < 2 || audio.is_empty() {
            return Ok(Vec::new());
        }

        let piece = audio.len() / self.split_count;
        let mut segments: Vec<Vec<u8>> = audio
            .chunks(piece.max(1))
            .map(|chunk| chunk.to_vec())
            .collect();
        // Even split can leave a remainder piece; fold it into the last one.
        while segments.len() > self.split_count {
            let tail = segments
                .pop()
                .unwrap_or_default();
            if let Some(last) = segments.last_mut() {
                last.extend_from_slice(&tail);
            }
        }
        Ok(segments)
    }
}
