//! Intake pipeline orchestration
//!
//! Stages run strictly in order: base64 decode → container load → normalize
//! → trim & validate. The first failing stage ends the run; later stages
//! never see its input.
//!
//! The pipeline holds no per-request state, so one instance can be shared
//! across worker threads.

use super::decode::{check_min_size, decode_base64_audio, decode_base64_text, decode_base64_value};
use super::error::IntakeError;
use super::loader::{ContainerLoader, SymphoniaLoader};
use super::normalize::Normalizer;
use super::resampler::{Resampler, SincResampler};
use super::trim::{DurationValidator, EnergyTrimmer, RmsTrimmer};
use super::types::{Rejection, ValidationOutcome, Waveform};
use serde_json::Value;
use tracing::{info, warn};

/// Stage bundle for one intake configuration
#[derive(Debug, Clone)]
pub struct IntakePipeline<L = SymphoniaLoader, R = SincResampler, T = RmsTrimmer> {
    loader: L,
    normalizer: Normalizer<R>,
    validator: DurationValidator<T>,
}

impl Default for IntakePipeline {
    fn default() -> Self {
        Self::with_stages(SymphoniaLoader, SincResampler::default(), RmsTrimmer::default())
    }
}

impl IntakePipeline {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<L, R, T> IntakePipeline<L, R, T>
where
    L: ContainerLoader,
    R: Resampler,
    T: EnergyTrimmer,
{
    /// Build a pipeline from explicit stage implementations
    pub fn with_stages(loader: L, resampler: R, trimmer: T) -> Self {
        Self {
            loader,
            normalizer: Normalizer::new(resampler),
            validator: DurationValidator::new(trimmer),
        }
    }

    /// Run all stages on a base64 string
    pub fn process(&self, encoded: &str) -> ValidationOutcome {
        self.finish(decode_base64_audio(encoded))
    }

    /// Run all stages on a JSON field that should hold a base64 string
    pub fn process_value(&self, value: Option<&Value>) -> ValidationOutcome {
        self.finish(decode_base64_value(value))
    }

    /// Run all stages on base64 text that arrived as raw bytes
    ///
    /// Bytes that are not UTF-8 are rejected as `InvalidInputType`.
    pub fn process_text(&self, raw: &[u8]) -> ValidationOutcome {
        self.finish(decode_base64_text(raw))
    }

    /// Run the stages after base64 decoding on raw container bytes
    ///
    /// The size floor still applies.
    pub fn process_bytes(&self, bytes: Vec<u8>) -> ValidationOutcome {
        self.finish(check_min_size(bytes))
    }

    fn finish(&self, decoded: Result<Vec<u8>, IntakeError>) -> ValidationOutcome {
        let outcome = match decoded.and_then(|bytes| self.load_and_normalize(bytes)) {
            Ok(waveform) => self.validator.validate(waveform),
            Err(reason) => ValidationOutcome::Invalid(Rejection::new(reason)),
        };
        log_outcome(&outcome);
        outcome
    }

    fn load_and_normalize(&self, bytes: Vec<u8>) -> Result<Waveform, IntakeError> {
        let decoded = self.loader.load(bytes)?;
        self.normalizer.normalize(decoded)
    }
}

/// Run the default pipeline on a base64 string
pub fn process_audio(encoded: &str) -> ValidationOutcome {
    IntakePipeline::default().process(encoded)
}

fn log_outcome(outcome: &ValidationOutcome) {
    match outcome {
        ValidationOutcome::Valid(audio) => info!(
            "Audio accepted: {:.2}s at {} Hz, warnings={:?}",
            audio.duration_seconds,
            audio.sample_rate(),
            audio.warnings
        ),
        ValidationOutcome::Invalid(rejection) => warn!(
            "Audio rejected ({}): {}",
            rejection.reason.code(),
            rejection.reason
        ),
    }
}
