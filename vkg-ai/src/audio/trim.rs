//! Silence trimming and duration policy
//!
//! Leading and trailing low-energy frames are removed, then the remaining
//! duration is checked against fixed bounds. The bounds are compiled in so
//! every caller is evaluated the same way.

use super::error::{IntakeError, IntakeWarning};
use super::types::{Rejection, ValidAudio, ValidationOutcome, Waveform};
use std::ops::Range;
use tracing::debug;

/// Frames quieter than this (RMS, dB relative to full scale) count as silence
pub const SILENCE_THRESHOLD_DBFS: f32 = -25.0;

/// Below this the clip is rejected
pub const MIN_DURATION_SECS: f64 = 1.0;

/// Below this the clip is accepted with a low-confidence warning
pub const WARN_DURATION_SECS: f64 = 2.0;

/// Longer clips are truncated to this
pub const MAX_DURATION_SECS: f64 = 10.0;

/// Capability: locate the active (non-silent) span of a waveform
///
/// Implementations must be conservative: any sample that belongs to an
/// active segment stays inside the returned range. An empty range means the
/// whole waveform is silence.
pub trait EnergyTrimmer: Send + Sync {
    fn active_range(&self, samples: &[f32]) -> Range<usize>;
}

/// Frame-RMS trimmer
///
/// Whole frames are kept at both edges, so the range can only err towards
/// keeping a little extra silence.
#[derive(Debug, Clone, Copy)]
pub struct RmsTrimmer {
    threshold_dbfs: f32,
    frame_length: usize,
    hop_length: usize,
}

impl Default for RmsTrimmer {
    fn default() -> Self {
        Self {
            threshold_dbfs: SILENCE_THRESHOLD_DBFS,
            frame_length: 2048,
            hop_length: 512,
        }
    }
}

impl RmsTrimmer {
    /// Calculate RMS (Root Mean Square) of samples
    fn calculate_rms(samples: &[f32]) -> f32 {
        if samples.is_empty() {
            return 0.0;
        }

        let sum_squares: f32 = samples.iter().map(|&s| s * s).sum();
        (sum_squares / samples.len() as f32).sqrt()
    }

    /// Convert dB to linear amplitude
    fn db_to_linear(db: f32) -> f32 {
        10.0_f32.powf(db / 20.0)
    }
}

impl EnergyTrimmer for RmsTrimmer {
    fn active_range(&self, samples: &[f32]) -> Range<usize> {
        let threshold = Self::db_to_linear(self.threshold_dbfs);
        let mut first: Option<usize> = None;
        let mut last_end = 0;

        let mut start = 0;
        while start < samples.len() {
            let end = (start + self.frame_length).min(samples.len());
            if Self::calculate_rms(&samples[start..end]) > threshold {
                first.get_or_insert(start);
                last_end = end;
            }
            if end == samples.len() {
                break;
            }
            start += self.hop_length;
        }

        match first {
            Some(first) => first..last_end,
            None => 0..0,
        }
    }
}

/// Applies trimming and the duration policy
#[derive(Debug, Clone)]
pub struct DurationValidator<T> {
    trimmer: T,
}

impl<T: EnergyTrimmer> DurationValidator<T> {
    pub fn new(trimmer: T) -> Self {
        Self { trimmer }
    }

    /// Trim silence, then accept, warn, cap, or reject by duration
    pub fn validate(&self, waveform: Waveform) -> ValidationOutcome {
        let sample_rate = waveform.sample_rate;
        let range = self.trimmer.active_range(&waveform.samples);

        if range.is_empty() {
            debug!("No active audio found in {} samples", waveform.len());
            return ValidationOutcome::Invalid(Rejection::new(IntakeError::SilenceOnly));
        }

        debug!(
            "Active range {}..{} of {} samples",
            range.start,
            range.end,
            waveform.len()
        );

        let mut samples = waveform.samples;
        samples.truncate(range.end);
        samples.drain(..range.start);

        let mut trimmed = Waveform::new(samples, sample_rate);
        let mut duration_seconds = trimmed.duration_seconds();

        if duration_seconds < MIN_DURATION_SECS {
            return ValidationOutcome::Invalid(Rejection::new(IntakeError::TooShort {
                duration_seconds,
            }));
        }

        let mut warnings = Vec::new();
        if duration_seconds < WARN_DURATION_SECS {
            warnings.push(IntakeWarning::ShortAudioLowConfidence);
        }

        let max_samples = (MAX_DURATION_SECS * sample_rate as f64).round() as usize;
        if trimmed.len() > max_samples {
            debug!(
                "Truncating {:.2}s of audio to {:.1}s",
                duration_seconds, MAX_DURATION_SECS
            );
            trimmed.samples.truncate(max_samples);
            warnings.push(IntakeWarning::TrimmedToMaxDuration);
            duration_seconds = MAX_DURATION_SECS;
        }

        ValidationOutcome::Valid(ValidAudio {
            waveform: trimmed,
            duration_seconds,
            warnings,
        })
    }
}
