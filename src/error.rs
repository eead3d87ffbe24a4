//! Error types for speakscope.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpeakscopeError {
    // Configuration errors
    #[error("Failed to parse configuration: {message}")]
    ConfigParse { message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Invalid input (rejected before any processing)
    #[error("Empty audio input")]
    EmptyAudio,

    #[error("Unknown model: {model}. Available: {available}")]
    UnknownModel { model: String, available: String },

    // Unprocessable content
    #[error("No speech detected in the audio")]
    NoSpeechDetected,

    // Collaborator failures (audio decode, silence detection, ASR)
    #[error("Audio decode failed: {message}")]
    AudioDecode { message: String },

    #[error("Silence detection failed: {message}")]
    SilenceDetection { message: String },

    #[error("Transcription failed: {message}")]
    Transcription { message: String },

    #[error("Background task failed: {message}")]
    TaskJoin { message: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

impl SpeakscopeError {
    /// True for errors the caller should surface as a client error
    /// (bad request): the input was rejected before any processing.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            SpeakscopeError::EmptyAudio | SpeakscopeError::UnknownModel { .. }
        )
    }

    /// True when transcription succeeded but produced no usable speech.
    /// Unprocessable content, not a fault.
    pub fn is_no_speech(&self) -> bool {
        matches!(self, SpeakscopeError::NoSpeechDetected)
    }
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, SpeakscopeError>;
