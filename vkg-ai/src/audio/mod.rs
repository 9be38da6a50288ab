//! Audio intake & validation
//!
//! Turns an untrusted base64 upload into a clean mono 16 kHz waveform of
//! bounded duration, or a precise rejection reason.
//!
//! Stages (leaf-first):
//! - [`decode`]: strict base64 decoding and size floor
//! - [`loader`]: container parsing to PCM (symphonia)
//! - [`normalize`]: mono downmix and resampling (rubato)
//! - [`trim`]: silence trimming and duration policy
//! - [`pipeline`]: ordered, short-circuiting orchestration

pub mod decode;
pub mod error;
pub mod loader;
pub mod normalize;
pub mod pipeline;
pub mod resampler;
pub mod trim;
pub mod types;

pub use error::{IntakeError, IntakeWarning};
pub use loader::{ContainerLoader, SymphoniaLoader};
pub use normalize::{Normalizer, TARGET_SAMPLE_RATE};
pub use pipeline::{process_audio, IntakePipeline};
pub use resampler::{Resampler, SincResampler};
pub use trim::{DurationValidator, EnergyTrimmer, RmsTrimmer};
pub use types::{DecodedAudio, OutcomeSummary, Samples, ValidAudio, ValidationOutcome, Waveform};
