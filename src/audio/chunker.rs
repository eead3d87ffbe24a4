//! Silence-based audio chunking.
//!
//! Splits a recording at detected silence gaps and assigns each sub-clip an
//! absolute time window. The silence detector only returns relative sub-clip
//! audio, so the accumulated window assignment here is the authoritative
//! mapping back to recording time. The chunk sequence always partitions
//! `[0, total_duration_ms]` with no gaps and no overlaps.

use crate::audio::backend::{AudioDecoder, SilenceDetector, SilenceParams};
use crate::error::Result;
use serde::Serialize;

/// One sub-clip of a recording with its absolute time window.
#[derive(Debug, Clone, Serialize)]
pub struct AudioChunk {
    /// Absolute start of this chunk's window, in milliseconds.
    pub start_time: u64,
    /// Absolute end of this chunk's window, in milliseconds.
    pub end_time: u64,
    /// Encoded audio for this chunk.
    #[serde(skip)]
    pub audio: Vec<u8>,
}

impl AudioChunk {
    /// Window length in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.end_time - self.start_time
    }
}

/// Splits recordings into contiguous chunks at silence boundaries.
pub struct AudioChunker<D, S> {
    decoder: D,
    detector: S,
    params: SilenceParams,
}

impl<D: AudioDecoder, S: SilenceDetector> AudioChunker<D, S> {
    /// Create a chunker with default silence parameters.
    pub fn new(decoder: D, detector: S) -> Self {
        Self::with_params(decoder, detector, SilenceParams::default())
    }

    /// Create a chunker with custom silence parameters.
    pub fn with_params(decoder: D, detector: S, params: SilenceParams) -> Self {
        Self {
            decoder,
            detector,
            params,
        }
    }

    /// Split `audio` into ordered chunks covering the whole recording.
    ///
    /// Returns the chunks and the total recording duration in milliseconds.
    /// When the detector finds no silence, the whole recording comes back as
    /// a single chunk; the recording is never dropped. Zero-length audio
    /// yields one zero-duration chunk.
    pub fn split(&self, audio: &[u8]) -> Result<(Vec<AudioChunk>, u64)> {
        let total_ms = self.decoder.decode_and_measure(audio)?;

        if total_ms == 0 {
            return Ok((
                vec![AudioChunk {
                    start_time: 0,
                    end_time: 0,
                    audio: audio.to_vec(),
                }],
                0,
            ));
        }

        let segments = self.detector.detect_silence_and_split(audio, &self.params)?;

        if segments.is_empty() {
            return Ok((
                vec![AudioChunk {
                    start_time: 0,
                    end_time: total_ms,
                    audio: audio.to_vec(),
                }],
                total_ms,
            ));
        }

        // Assign contiguous windows by accumulating measured segment
        // durations. Retained silence padding means the sum can drift from
        // the decoded total; boundaries are clamped and the final chunk is
        // pinned to the total so coverage of [0, total_ms] is exact.
        let last_index = segments.len() - 1;
        let mut chunks = Vec::with_capacity(segments.len());
        let mut cursor = 0u64;

        for (i, segment) in segments.into_iter().enumerate() {
            let segment_ms = self.decoder.decode_and_measure(&segment)?;
            let start = cursor;
            let end = if i == last_index {
                total_ms
            } else {
                (cursor + segment_ms).min(total_ms)
            };
            let end = end.max(start);
            chunks.push(AudioChunk {
                start_time: start,
                end_time: end,
                audio: segment,
            });
            cursor = end;
        }

        Ok((chunks, total_ms))
    }
}
