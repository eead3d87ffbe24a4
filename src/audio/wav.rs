//! WAV implementation of the audio collaborator traits.
//!
//! Decodes 16-bit PCM WAV with hound, measures duration from the sample
//! count, and detects silence with RMS-per-window thresholding. Detected
//! sub-clips are re-encoded as mono 16-bit PCM WAV so every chunk handed to
//! the transcriber is in the same canonical format.

use crate::audio::backend::{AudioDecoder, SilenceDetector, SilenceParams};
use crate::error::{Result, SpeakscopeError};
use std::io::Cursor;

/// RMS window length for the silence scan.
const WINDOW_MS: u64 = 10;

/// Hound-backed audio backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavBackend;

impl WavBackend {
    pub fn new() -> Self {
        Self
    }

    /// Parse WAV bytes into mono i16 samples plus the sample rate.
    fn read_mono(&self, audio: &[u8]) -> Result<(Vec<i16>, u32)> {
        let mut reader =
            hound::WavReader::new(Cursor::new(audio)).map_err(|e| SpeakscopeError::AudioDecode {
                message: format!("Failed to parse WAV data: {}", e),
            })?;

        let spec = reader.spec();
        if spec.sample_format != hound::SampleFormat::Int || spec.bits_per_sample != 16 {
            return Err(SpeakscopeError::AudioDecode {
                message: format!(
                    "Unsupported WAV format: {:?} {}-bit (expected 16-bit PCM)",
                    spec.sample_format, spec.bits_per_sample
                ),
            });
        }

        let raw: Vec<i16> = reader
            .samples::<i16>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| SpeakscopeError::AudioDecode {
                message: format!("Failed to read WAV samples: {}", e),
            })?;

        // Downmix to mono by averaging channels
        let channels = spec.channels as usize;
        let mono = if channels > 1 {
            raw.chunks_exact(channels)
                .map(|frame| {
                    let sum: i32 = frame.iter().map(|&s| s as i32).sum();
                    (sum / channels as i32) as i16
                })
                .collect()
        } else {
            raw
        };

        Ok((mono, spec.sample_rate))
    }

    /// Encode mono samples back into 16-bit PCM WAV bytes.
    fn encode_mono(&self, samples: &[i16], sample_rate: u32) -> Result<Vec<u8>> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).map_err(|e| {
                SpeakscopeError::SilenceDetection {
                    message: format!("Failed to encode segment: {}", e),
                }
            })?;
            for &sample in samples {
                writer
                    .write_sample(sample)
                    .map_err(|e| SpeakscopeError::SilenceDetection {
                        message: format!("Failed to encode segment: {}", e),
                    })?;
            }
            writer
                .finalize()
                .map_err(|e| SpeakscopeError::SilenceDetection {
                    message: format!("Failed to encode segment: {}", e),
                })?;
        }
        Ok(cursor.into_inner())
    }
}

impl AudioDecoder for WavBackend {
    fn decode_and_measure(&self, audio: &[u8]) -> Result<u64> {
        let reader =
            hound::WavReader::new(Cursor::new(audio)).map_err(|e| SpeakscopeError::AudioDecode {
                message: format!("Failed to parse WAV data: {}", e),
            })?;
        let spec = reader.spec();
        if spec.sample_rate == 0 {
            return Err(SpeakscopeError::AudioDecode {
                message: "WAV header reports zero sample rate".to_string(),
            });
        }
        // duration() is frames per channel, independent of channel count.
        Ok(reader.duration() as u64 * 1000 / spec.sample_rate as u64)
    }
}

impl SilenceDetector for WavBackend {
    fn detect_silence_and_split(
        &self,
        audio: &[u8],
        params: &SilenceParams,
    ) -> Result<Vec<Vec<u8>>> {
        let (samples, sample_rate) = self.read_mono(audio)?;
        if samples.is_empty() {
            return Ok(Vec::new());
        }

        let window = ((sample_rate as u64 * WINDOW_MS / 1000) as usize).max(1);
        let threshold = dbfs_to_linear(params.threshold_dbfs);

        // One flag per window: does it fall below the silence threshold?
        let silent: Vec<bool> = samples
            .chunks(window)
            .map(|w| rms(w) < threshold)
            .collect();

        let min_silence_windows = (params.min_silence_ms / WINDOW_MS).max(1) as usize;
        let silence_runs = find_runs(&silent, min_silence_windows);
        if silence_runs.is_empty() {
            return Ok(Vec::new());
        }

        // Non-silent ranges are the complement of the qualifying silence
        // runs, padded with keep_silence on each side. Padding is clamped to
        // half of the adjacent silence run so neighbors never overlap.
        let keep_windows = (params.keep_silence_ms / WINDOW_MS) as usize;
        let mut ranges: Vec<(usize, usize)> = Vec::new();
        let mut cursor = 0usize;
        for &(run_start, run_end) in &silence_runs {
            if run_start > cursor {
                ranges.push((cursor, run_start));
            }
            cursor = run_end;
        }
        if cursor < silent.len() {
            ranges.push((cursor, silent.len()));
        }
        if ranges.len() < 2 {
            // A single voiced region means the silence was all leading or
            // trailing; treat as no usable split point.
            return Ok(Vec::new());
        }

        let mut segments = Vec::with_capacity(ranges.len());
        for (i, &(start, end)) in ranges.iter().enumerate() {
            let pad_before = if i == 0 {
                start.min(keep_windows)
            } else {
                let gap = start - ranges[i - 1].1;
                keep_windows.min(gap / 2)
            };
            let pad_after = if i == ranges.len() - 1 {
                keep_windows.min(silent.len() - end)
            } else {
                let gap = ranges[i + 1].0 - end;
                keep_windows.min(gap.div_ceil(2))
            };

            let first_sample = (start - pad_before) * window;
            let last_sample = ((end + pad_after) * window).min(samples.len());
            segments.push(self.encode_mono(&samples[first_sample..last_sample], sample_rate)?);
        }

        Ok(segments)
    }
}

/// Convert a dBFS level to linear amplitude on the 0.0–1.0 scale.
fn dbfs_to_linear(dbfs: f64) -> f64 {
    10f64.powf(dbfs / 20.0)
}

/// Root-mean-square level of a sample window, normalized to full scale.
fn rms(samples: &[i16]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_squares: f64 = samples
        .iter()
        .map(|&s| {
            let x = s as f64 / i16::MAX as f64;
            x * x
        })
        .sum();
    (sum_squares / samples.len() as f64).sqrt()
}

/// Indices of maximal `true` runs in `flags` of at least `min_len` windows.
fn find_runs(flags: &[bool], min_len: usize) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;
    for (i, &flag) in flags.iter().enumerate() {
        match (flag, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                if i - s >= min_len {
                    runs.push((s, i));
                }
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        if flags.len() - s >= min_len {
            runs.push((s, flags.len()));
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: u32 = 16000;

    fn make_wav(samples: &[i16]) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: RATE,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
        cursor.into_inner()
    }

    fn tone(ms: u64) -> Vec<i16> {
        // Loud square-ish signal well above -40 dBFS
        (0..(RATE as u64 * ms / 1000))
            .map(|i| if i % 2 == 0 { 12000 } else { -12000 })
            .collect()
    }

    fn quiet(ms: u64) -> Vec<i16> {
        vec![0i16; (RATE as u64 * ms / 1000) as usize]
    }

    #[test]
    fn measures_duration_from_sample_count() {
        let backend = WavBackend::new();
        let wav = make_wav(&quiet(1500));
        assert_eq!(backend.decode_and_measure(&wav).unwrap(), 1500);
    }

    #[test]
    fn rejects_non_wav_bytes() {
        let backend = WavBackend::new();
        let err = backend.decode_and_measure(b"definitely not wav").unwrap_err();
        assert!(matches!(err, SpeakscopeError::AudioDecode { .. }));
    }

    #[test]
    fn no_silence_means_empty_segment_list() {
        let backend = WavBackend::new();
        let wav = make_wav(&tone(1000));
        let segments = backend
            .detect_silence_and_split(&wav, &SilenceParams::default())
            .unwrap();
        assert!(segments.is_empty());
    }

    #[test]
    fn splits_on_silence_gap() {
        let backend = WavBackend::new();
        let mut samples = tone(800);
        samples.extend(quiet(600));
        samples.extend(tone(800));
        let wav = make_wav(&samples);

        let segments = backend
            .detect_silence_and_split(&wav, &SilenceParams::default())
            .unwrap();
        assert_eq!(segments.len(), 2);

        // Each segment must be a decodable canonical WAV clip
        for segment in &segments {
            let ms = backend.decode_and_measure(segment).unwrap();
            assert!(ms >= 800, "segment too short: {ms}ms");
        }
    }

    #[test]
    fn short_gap_below_min_silence_does_not_split() {
        let backend = WavBackend::new();
        let mut samples = tone(800);
        samples.extend(quiet(200)); // below the 400ms default
        samples.extend(tone(800));
        let wav = make_wav(&samples);

        let segments = backend
            .detect_silence_and_split(&wav, &SilenceParams::default())
            .unwrap();
        assert!(segments.is_empty());
    }

    #[test]
    fn keep_silence_pads_segments() {
        let backend = WavBackend::new();
        let mut samples = tone(1000);
        samples.extend(quiet(1000));
        samples.extend(tone(1000));
        let wav = make_wav(&samples);

        let segments = backend
            .detect_silence_and_split(&wav, &SilenceParams::default())
            .unwrap();
        assert_eq!(segments.len(), 2);

        // 1000ms of voice plus ~200ms of retained silence on the cut edge
        let first_ms = backend.decode_and_measure(&segments[0]).unwrap();
        assert!(
            (1150..=1350).contains(&first_ms),
            "expected ~1200ms, got {first_ms}ms"
        );
    }

    #[test]
    fn padded_segments_do_not_overlap() {
        let backend = WavBackend::new();
        // 500ms gap with 300ms keep_silence would overlap without clamping
        let params = SilenceParams {
            min_silence_ms: 400,
            threshold_dbfs: -40.0,
            keep_silence_ms: 300,
        };
        let mut samples = tone(1000);
        samples.extend(quiet(500));
        samples.extend(tone(1000));
        let wav = make_wav(&samples);

        let segments = backend.detect_silence_and_split(&wav, &params).unwrap();
        assert_eq!(segments.len(), 2);
        let total: u64 = segments
            .iter()
            .map(|s| backend.decode_and_measure(s).unwrap())
            .sum();
        assert!(total <= 2500, "segments overlap: {total}ms > 2500ms");
    }

    #[test]
    fn stereo_input_downmixes_before_scanning() {
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: RATE,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for frame in tone(1000) {
            writer.write_sample(frame).unwrap();
            writer.write_sample(frame).unwrap();
        }
        writer.finalize().unwrap();
        let wav = cursor.into_inner();

        let backend = WavBackend::new();
        assert_eq!(backend.decode_and_measure(&wav).unwrap(), 1000);
        let segments = backend
            .detect_silence_and_split(&wav, &SilenceParams::default())
            .unwrap();
        assert!(segments.is_empty());
    }

    #[test]
    fn dbfs_conversion() {
        assert!((dbfs_to_linear(0.0) - 1.0).abs() < 1e-9);
        assert!((dbfs_to_linear(-20.0) - 0.1).abs() < 1e-9);
        assert!(dbfs_to_linear(-40.0) < 0.011);
    }

    #[test]
    fn find_runs_respects_min_len() {
        let flags = [false, true, true, false, true, true, true, false];
        assert_eq!(find_runs(&flags, 3), vec![(4, 7)]);
        assert_eq!(find_runs(&flags, 2), vec![(1, 3), (4, 7)]);
    }

    #[test]
    fn find_runs_handles_trailing_run() {
        let flags = [false, true, true];
        assert_eq!(find_runs(&flags, 2), vec![(1, 3)]);
    }
}
