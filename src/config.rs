use crate::defaults;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub stt: SttConfig,
    pub chunking: ChunkingConfig,
    pub fillers: FillerConfig,
    pub pauses: PauseConfig,
    pub repetition: RepetitionConfig,
    pub pacing: PacingConfig,
}

/// Speech-to-text configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SttConfig {
    pub model: String,
}

/// Silence-based chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Minimum silence gap to split on, in milliseconds.
    pub min_silence_ms: u64,
    /// Loudness threshold below which audio is silence, in dBFS.
    pub silence_threshold_dbfs: f64,
    /// Silence retained at each cut edge, in milliseconds.
    pub keep_silence_ms: u64,
    /// Recordings longer than this take the chunked path, in seconds.
    pub long_recording_threshold_secs: u64,
    /// Cap on concurrent chunk transcriptions.
    pub max_parallel_transcriptions: usize,
}

/// Filler word lists, all matched case-insensitively
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FillerConfig {
    /// Single-token fillers, exact token match.
    pub single: Vec<String>,
    /// Multi-token phrases, substring match on the raw text.
    pub phrases: Vec<String>,
    /// Fillers only when they start a sentence.
    pub sentence_start: Vec<String>,
}

/// Pause analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PauseConfig {
    /// Gaps at or above this are significant pauses, in seconds.
    pub significant_threshold_secs: f64,
    /// Gaps at or below this are timing noise and discarded, in seconds.
    pub noise_floor_secs: f64,
}

/// Repetition analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RepetitionConfig {
    pub min_phrase_len: usize,
    pub max_phrase_len: usize,
}

/// Pacing analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PacingConfig {
    /// Gaps strictly above this count as non-speaking time, in seconds.
    pub gap_threshold_secs: f64,
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            model: defaults::DEFAULT_MODEL.to_string(),
        }
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            min_silence_ms: defaults::MIN_SILENCE_MS,
            silence_threshold_dbfs: defaults::SILENCE_THRESHOLD_DBFS,
            keep_silence_ms: defaults::KEEP_SILENCE_MS,
            long_recording_threshold_secs: defaults::LONG_RECORDING_THRESHOLD_SECS,
            max_parallel_transcriptions: defaults::MAX_PARALLEL_TRANSCRIPTIONS,
        }
    }
}

impl Default for FillerConfig {
    fn default() -> Self {
        Self {
            single: defaults::SINGLE_FILLERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            phrases: defaults::PHRASE_FILLERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            sentence_start: defaults::SENTENCE_START_FILLERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Default for PauseConfig {
    fn default() -> Self {
        Self {
            significant_threshold_secs: defaults::PAUSE_THRESHOLD_SECS,
            noise_floor_secs: defaults::PAUSE_NOISE_FLOOR_SECS,
        }
    }
}

impl Default for RepetitionConfig {
    fn default() -> Self {
        Self {
            min_phrase_len: defaults::MIN_PHRASE_LEN,
            max_phrase_len: defaults::MAX_PHRASE_LEN,
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            gap_threshold_secs: defaults::PACING_GAP_THRESHOLD_SECS,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns an error for invalid TOML.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(e) => {
                let not_found = e
                    .downcast_ref::<std::io::Error>()
                    .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
                    .unwrap_or(false);
                if not_found {
                    eprintln!("speakscope: no config at {}, using defaults", path.display());
                    Ok(Self::default())
                } else {
                    Err(e)
                }
            }
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - SPEAKSCOPE_MODEL → stt.model
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model) = std::env::var("SPEAKSCOPE_MODEL") {
            if !model.is_empty() {
                self.stt.model = model;
            }
        }
        self
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/speakscope/config.toml on Linux
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("speakscope").join("config.toml"))
    }
}
