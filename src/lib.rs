//! Speech fluency analysis for recorded speech.
//!
//! Takes encoded audio plus a model identifier and produces a transcript
//! with a full set of fluency metrics: speech rate, filler words, pauses,
//! repetition, vocabulary, and pacing. Long recordings are split at silence
//! gaps and transcribed concurrently before analysis.
//!
//! The ASR engine and audio decoding are collaborators behind traits
//! ([`asr::Transcriber`], [`audio::AudioDecoder`], [`audio::SilenceDetector`]);
//! the crate ships a WAV-backed audio implementation and mocks for testing.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod asr;
pub mod audio;
pub mod config;
pub mod defaults;
pub mod error;
pub mod metrics;
pub mod pipeline;

pub use config::Config;
pub use error::{Result, SpeakscopeError};
pub use pipeline::{AnalysisPipeline, AnalysisReport};

/// Crate version, for diagnostics and report tagging.
pub fn version_string() -> String {
    format!("speakscope {}", env!("CARGO_PKG_VERSION"))
}
