//! End-to-end analysis orchestration.
//!
//! One entry point takes encoded audio and a model identifier and returns the
//! full analysis report. Short recordings are transcribed in one pass; long
//! ones are split at silence gaps, transcribed concurrently under a
//! semaphore, and stitched back together. Transcription is blocking work and
//! always runs on the blocking thread pool.

use crate::asr::{Transcriber, TranscriptionOutput, TranscriptionService};
use crate::audio::{AudioChunker, AudioDecoder, SilenceDetector, SilenceParams};
use crate::config::Config;
use crate::error::{Result, SpeakscopeError};
use crate::metrics::{compute_all_metrics, MetricsReport};
use crate::pipeline::stitcher::{merge_chunk_results, ChunkTranscriptionResult};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task;

/// Everything the analysis produces for one recording.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub transcript: String,
    pub duration_seconds: f64,
    pub word_timestamps: Vec<crate::asr::WordTimestamp>,
    pub metrics: MetricsReport,
    pub model_used: String,
}

/// Drives decode, chunking, transcription, merge, and metrics.
pub struct AnalysisPipeline<D, S> {
    service: Arc<TranscriptionService>,
    decoder: D,
    detector: S,
    config: Config,
}

impl<D, S> AnalysisPipeline<D, S>
where
    D: AudioDecoder + Clone + 'static,
    S: SilenceDetector + Clone + 'static,
{
    pub fn new(service: Arc<TranscriptionService>, decoder: D, detector: S, config: Config) -> Self {
        Self {
            service,
            decoder,
            detector,
            config,
        }
    }

    /// Analyze one recording end to end.
    ///
    /// Rejects empty audio and unknown models before any decoding happens.
    /// A transcript that comes back blank after transcription means no
    /// speech was detected, which is its own error rather than an empty
    /// report.
    pub async fn analyze(&self, audio: Vec<u8>, model_id: &str) -> Result<AnalysisReport> {
        if audio.is_empty() {
            return Err(SpeakscopeError::EmptyAudio);
        }

        let transcriber = self.service.ensure_loaded(model_id)?;
        let total_ms = self.decoder.decode_and_measure(&audio)?;
        let duration_seconds = total_ms as f64 / 1000.0;

        let threshold_ms = self.config.chunking.long_recording_threshold_secs * 1000;
        let output = if total_ms <= threshold_ms {
            transcribe_blocking(transcriber, audio).await?
        } else {
            self.transcribe_chunked(transcriber, audio).await?
        };

        if output.transcript.trim().is_empty() {
            return Err(SpeakscopeError::NoSpeechDetected);
        }

        let metrics = compute_all_metrics(
            &output.transcript,
            duration_seconds,
            Some(&output.word_timestamps),
            &self.config,
        );

        Ok(AnalysisReport {
            transcript: output.transcript,
            duration_seconds,
            word_timestamps: output.word_timestamps,
            metrics,
            model_used: output.model_used,
        })
    }

    /// Split at silence, transcribe chunks concurrently, merge.
    ///
    /// Every spawned task is awaited before any error propagates, so no
    /// chunk transcription is left running when this returns.
    async fn transcribe_chunked(
        &self,
        transcriber: Arc<dyn Transcriber>,
        audio: Vec<u8>,
    ) -> Result<TranscriptionOutput> {
        let chunker = AudioChunker::with_params(
            self.decoder.clone(),
            self.detector.clone(),
            SilenceParams::from(&self.config.chunking),
        );
        let (chunks, _) = task::spawn_blocking(move || chunker.split(&audio))
            .await
            .map_err(join_error)??;

        let max_parallel = self
            .config
            .chunking
            .max_parallel_transcriptions
            .min(chunks.len())
            .max(1);
        let permits = Arc::new(Semaphore::new(max_parallel));

        let mut handles = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            let transcriber = transcriber.clone();
            let permits = permits.clone();
            handles.push(tokio::spawn(async move {
                let _permit = permits
                    .acquire_owned()
                    .await
                    .map_err(|e| SpeakscopeError::Other(e.to_string()))?;
                let start_time = chunk.start_time;
                let end_time = chunk.end_time;
                let audio = chunk.audio;
                let result = task::spawn_blocking(move || transcriber.transcribe(&audio))
                    .await
                    .map_err(join_error)??;
                Ok::<_, SpeakscopeError>(ChunkTranscriptionResult {
                    start_time,
                    end_time,
                    result,
                })
            }));
        }

        // Await every task before looking at outcomes.
        let mut outcomes = Vec::with_capacity(handles.len());
        for handle in handles {
            outcomes.push(handle.await);
        }

        let mut results = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            results.push(outcome.map_err(join_error)??);
        }

        Ok(merge_chunk_results(results))
    }
}

async fn transcribe_blocking(
    transcriber: Arc<dyn Transcriber>,
    audio: Vec<u8>,
) -> Result<TranscriptionOutput> {
    task::spawn_blocking(move || transcriber.transcribe(&audio))
        .await
        .map_err(join_error)?
}

fn join_error(e: task::JoinError) -> SpeakscopeError {
    SpeakscopeError::TaskJoin {
        message: e.to_string(),
    }
}
