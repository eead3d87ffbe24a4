//! Recording analysis pipeline: orchestration and chunk-result stitching.

pub mod orchestrator;
pub mod stitcher;

pub use orchestrator::{AnalysisPipeline, AnalysisReport};
pub use stitcher::{merge_chunk_results, ChunkTranscriptionResult};
