//! VakyaGuard audio intake and decision fusion
//!
//! - [`audio`]: untrusted base64 upload → validated mono 16 kHz waveform
//! - [`fusion`]: detector confidences → explainable verdict
//! - [`report`]: transport-facing response shape

pub mod audio;
pub mod fusion;
pub mod report;

pub use audio::{process_audio, IntakeError, IntakePipeline, ValidationOutcome};
pub use fusion::{fuse, Decision, FusionResult, SignalScore, SignalSet};
pub use report::AnalysisReport;
