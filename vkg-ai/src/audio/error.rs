//! Intake rejection reasons and advisory warnings
//!
//! Every rejection is a distinct, user-facing reason. Callers resubmit
//! different audio; none of these are fatal to the process.

use serde::Serialize;
use thiserror::Error;

/// Why the intake pipeline rejected an input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntakeError {
    /// Input absent or not a string
    #[error("Audio input must be a base64 string")]
    InvalidInputType,

    /// Input empty after trimming whitespace
    #[error("Empty audio input")]
    EmptyInput,

    /// Input is not strict base64
    #[error("Invalid base64 encoding")]
    InvalidEncoding,

    /// Decoded payload below the size floor
    #[error("Decoded audio data too small to be valid ({len} bytes)")]
    TooSmall { len: usize },

    /// Container could not be parsed or decoded
    #[error("Unsupported or corrupted audio format")]
    UnsupportedOrCorruptFormat,

    /// More than two channels
    #[error("Unsupported multi-channel audio ({channels} channels)")]
    UnsupportedChannelLayout { channels: usize },

    /// Nothing left after silence trimming
    #[error("Audio contains only silence")]
    SilenceOnly,

    /// Trimmed audio shorter than the minimum duration
    #[error("Audio too short after trimming ({duration_seconds:.2}s)")]
    TooShort { duration_seconds: f64 },

    /// Resampler could not be constructed or failed mid-stream
    ///
    /// Valid loader output cannot trigger this; it exists so resampler
    /// failures surface instead of panicking.
    #[error("Resampling failed: {0}")]
    ResampleFailed(String),
}

impl IntakeError {
    /// Stable machine-readable reason code
    pub fn code(&self) -> &'static str {
        match self {
            IntakeError::InvalidInputType => "invalid_input_type",
            IntakeError::EmptyInput => "empty_input",
            IntakeError::InvalidEncoding => "invalid_encoding",
            IntakeError::TooSmall { .. } => "too_small",
            IntakeError::UnsupportedOrCorruptFormat => "unsupported_or_corrupt_format",
            IntakeError::UnsupportedChannelLayout { .. } => "unsupported_channel_layout",
            IntakeError::SilenceOnly => "silence_only_audio",
            IntakeError::TooShort { .. } => "audio_too_short",
            IntakeError::ResampleFailed(_) => "resample_failed",
        }
    }

    /// Measured duration reported alongside duration-policy rejections
    pub fn duration_seconds(&self) -> Option<f64> {
        match self {
            IntakeError::SilenceOnly => Some(0.0),
            IntakeError::TooShort { duration_seconds } => Some(*duration_seconds),
            _ => None,
        }
    }
}

/// Non-fatal advisory attached to a successful outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IntakeWarning {
    /// Trimmed duration in [1.0s, 2.0s); downstream results deserve less weight
    #[serde(rename = "short_audio_low_confidence")]
    ShortAudioLowConfidence,
    /// Audio longer than the cap was truncated to the first 10 seconds
    #[serde(rename = "audio_trimmed_to_max_duration")]
    TrimmedToMaxDuration,
}

impl IntakeWarning {
    pub fn code(&self) -> &'static str {
        match self {
            IntakeWarning::ShortAudioLowConfidence => "short_audio_low_confidence",
            IntakeWarning::TrimmedToMaxDuration => "audio_trimmed_to_max_duration",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct() {
        let errors = [
            IntakeError::InvalidInputType,
            IntakeError::EmptyInput,
            IntakeError::InvalidEncoding,
            IntakeError::TooSmall { len: 10 },
            IntakeError::UnsupportedOrCorruptFormat,
            IntakeError::UnsupportedChannelLayout { channels: 6 },
            IntakeError::SilenceOnly,
            IntakeError::TooShort {
                duration_seconds: 0.5,
            },
            IntakeError::ResampleFailed("x".to_string()),
        ];
        let mut codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_duration_reported_for_duration_rejections() {
        assert_eq!(IntakeError::SilenceOnly.duration_seconds(), Some(0.0));
        assert_eq!(
            IntakeError::TooShort {
                duration_seconds: 0.5
            }
            .duration_seconds(),
            Some(0.5)
        );
        assert_eq!(IntakeError::InvalidEncoding.duration_seconds(), None);
    }

    #[test]
    fn test_warning_serializes_as_code() {
        let json = serde_json::to_string(&IntakeWarning::TrimmedToMaxDuration).unwrap();
        assert_eq!(json, "\"audio_trimmed_to_max_duration\"");
    }
}
