use crate::error::{Result, SpeakscopeError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A single transcribed word with its position in the recording.
///
/// Produced by the ASR collaborator. `start` and `end` are seconds from the
/// beginning of the transcribed clip; after merging, from the beginning of
/// the whole recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordTimestamp {
    pub word: String,
    pub start: f64,
    pub end: f64,
}

impl WordTimestamp {
    pub fn new(word: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            word: word.into(),
            start,
            end,
        }
    }
}

/// Result of transcribing one piece of audio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TranscriptionOutput {
    pub transcript: String,
    pub word_timestamps: Vec<WordTimestamp>,
    pub model_used: String,
}

/// Trait for speech-to-text transcription.
///
/// This trait allows swapping implementations (a real ASR engine vs mock).
/// Implementations are blocking; callers run them on a blocking thread pool.
pub trait Transcriber: Send + Sync {
    /// Transcribe encoded audio bytes to text with word timestamps.
    fn transcribe(&self, audio: &[u8]) -> Result<TranscriptionOutput>;

    /// Get the name of the loaded model
    fn model_name(&self) -> &str;

    /// Check if the transcriber is ready
    fn is_ready(&self) -> bool;
}

/// Implement Transcriber for Arc<T> to allow sharing across tasks.
impl<T: Transcriber + ?Sized> Transcriber for Arc<T> {
    fn transcribe(&self, audio: &[u8]) -> Result<TranscriptionOutput> {
        (**self).transcribe(audio)
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }

    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }
}

/// Mock transcriber for testing.
///
/// Returns a fixed transcript with evenly spaced word timestamps, or a
/// scripted failure.
#[derive(Debug, Clone)]
pub struct MockTranscriber {
    model_name: String,
    response: String,
    /// Seconds per word in the fabricated timestamps.
    word_spacing: f64,
    should_fail: bool,
}

impl MockTranscriber {
    /// Create a new mock transcriber with default settings
    pub fn new(model_name: &str) -> Self {
        Self {
            model_name: model_name.to_string(),
            response: "mock transcription".to_string(),
            word_spacing: 0.5,
            should_fail: false,
        }
    }

    /// Configure the mock to return a specific transcript
    pub fn with_response(mut self, response: &str) -> Self {
        self.response = response.to_string();
        self
    }

    /// Configure the spacing between fabricated word timestamps
    pub fn with_word_spacing(mut self, seconds: f64) -> Self {
        self.word_spacing = seconds;
        self
    }

    /// Configure the mock to fail on transcribe
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }
}

impl Transcriber for MockTranscriber {
    fn transcribe(&self, _audio: &[u8]) -> Result<TranscriptionOutput> {
        if self.should_fail {
            return Err(SpeakscopeError::Transcription {
                message: "mock transcription failure".to_string(),
            });
        }

        let word_timestamps = self
            .response
            .split_whitespace()
            .enumerate()
            .map(|(i, word)| {
                let start = i as f64 * self.word_spacing;
                WordTimestamp::new(word, start, start + self.word_spacing * 0.8)
            })
            .collect();

        Ok(TranscriptionOutput {
            transcript: self.response.clone(),
            word_timestamps,
            model_used: self.model_name.clone(),
        })
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn is_ready(&self) -> bool {
        !self.should_fail
    }
}
