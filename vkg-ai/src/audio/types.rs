//! Waveform and outcome types shared by the intake stages

use super::error::{IntakeError, IntakeWarning};
use serde::Serialize;

/// PCM samples with an explicit channel layout
#[derive(Debug, Clone, PartialEq)]
pub enum Samples {
    /// Single channel
    Mono(Vec<f32>),
    /// One vector per channel; frames beyond the shortest channel are ignored
    Planar(Vec<Vec<f32>>),
    /// Frame-major interleaved samples (L, R, L, R, ...)
    Interleaved { data: Vec<f32>, channels: usize },
}

impl Samples {
    /// Interpret a row-major 2-D matrix whose axis order is unknown
    ///
    /// The channel axis is taken to be the one with the smaller extent: a
    /// real recording always has at least as many samples as channels. On a
    /// tie the second axis is treated as channels. Returns `None` when `data`
    /// does not hold `rows * cols` values.
    pub fn from_matrix(data: Vec<f32>, rows: usize, cols: usize) -> Option<Self> {
        if rows.checked_mul(cols)? != data.len() {
            return None;
        }

        if rows == 1 || cols == 1 {
            return Some(Samples::Mono(data));
        }

        if rows < cols {
            // (channels, samples)
            let planar = data.chunks_exact(cols).map(|row| row.to_vec()).collect();
            Some(Samples::Planar(planar))
        } else {
            // (samples, channels)
            Some(Samples::Interleaved {
                data,
                channels: cols,
            })
        }
    }

    pub fn channel_count(&self) -> usize {
        match self {
            Samples::Mono(_) => 1,
            Samples::Planar(channels) => channels.len(),
            Samples::Interleaved { channels, .. } => *channels,
        }
    }

    /// Number of frames (samples per channel)
    pub fn frame_count(&self) -> usize {
        match self {
            Samples::Mono(data) => data.len(),
            Samples::Planar(channels) => channels.iter().map(Vec::len).min().unwrap_or(0),
            Samples::Interleaved { data, channels } => {
                if *channels == 0 {
                    0
                } else {
                    data.len() / channels
                }
            }
        }
    }
}

/// Loader output: samples at the container's native rate
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    pub samples: Samples,
    pub sample_rate: u32,
}

/// Mono waveform at a known sample rate
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl Waveform {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Audio that passed every intake stage
#[derive(Debug, Clone, PartialEq)]
pub struct ValidAudio {
    pub waveform: Waveform,
    pub duration_seconds: f64,
    pub warnings: Vec<IntakeWarning>,
}

impl ValidAudio {
    pub fn sample_rate(&self) -> u32 {
        self.waveform.sample_rate
    }
}

/// Rejection with the warnings collected before the failing stage
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub reason: IntakeError,
    pub warnings: Vec<IntakeWarning>,
}

impl Rejection {
    pub fn new(reason: IntakeError) -> Self {
        Self {
            reason,
            warnings: Vec::new(),
        }
    }
}

/// Result of one intake pipeline run
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    Valid(ValidAudio),
    Invalid(Rejection),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid(_))
    }

    pub fn warnings(&self) -> &[IntakeWarning] {
        match self {
            ValidationOutcome::Valid(audio) => &audio.warnings,
            ValidationOutcome::Invalid(rejection) => &rejection.warnings,
        }
    }

    pub fn reason(&self) -> Option<&IntakeError> {
        match self {
            ValidationOutcome::Valid(_) => None,
            ValidationOutcome::Invalid(rejection) => Some(&rejection.reason),
        }
    }

    /// Serializable view without the sample array
    pub fn summary(&self) -> OutcomeSummary {
        match self {
            ValidationOutcome::Valid(audio) => OutcomeSummary {
                is_valid: true,
                error: None,
                duration_sec: Some(audio.duration_seconds),
                sample_rate: Some(audio.sample_rate()),
                warnings: audio.warnings.clone(),
            },
            ValidationOutcome::Invalid(rejection) => OutcomeSummary {
                is_valid: false,
                error: Some(ErrorSummary {
                    code: rejection.reason.code(),
                    message: rejection.reason.to_string(),
                }),
                duration_sec: rejection.reason.duration_seconds(),
                sample_rate: None,
                warnings: rejection.warnings.clone(),
            },
        }
    }
}

/// Transport-facing summary of a [`ValidationOutcome`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeSummary {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_sec: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,
    pub warnings: Vec<IntakeWarning>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorSummary {
    pub code: &'static str,
    pub message: String,
}
