//! Audio collaborators and silence-based chunking.
//!
//! Decoding and silence detection are external concerns behind the
//! `AudioDecoder` and `SilenceDetector` traits; `AudioChunker` owns the logic
//! that turns their output into a contiguous, fully-covering chunk sequence.

pub mod backend;
pub mod chunker;
pub mod wav;

pub use backend::{AudioDecoder, MockAudioBackend, SilenceDetector, SilenceParams};
pub use chunker::{AudioChunk, AudioChunker};
pub use wav::WavBackend;
