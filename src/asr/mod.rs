//! Speech-to-text collaborator interfaces.
//!
//! The actual ASR engine lives outside this crate. `Transcriber` is the seam:
//! implementations receive encoded audio bytes and return a transcript with
//! per-word timestamps. `TranscriptionService` keeps loaded model handles in
//! an explicit registry so callers never touch global state.

pub mod catalog;
pub mod service;
pub mod transcriber;

pub use catalog::{default_model, get_model, list_models, ModelInfo};
pub use service::{ModelLoader, TranscriptionService};
pub use transcriber::{MockTranscriber, Transcriber, TranscriptionOutput, WordTimestamp};
