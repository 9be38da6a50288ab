//! Decision fusion
//!
//! Turns independently produced detector confidences into a single
//! AUTHENTIC / SYNTHETIC / UNCERTAIN verdict with an explanation trail.

pub mod engine;
pub mod signals;

pub use engine::{fuse, Decision, FusionPolicy, FusionResult};
pub use signals::{reference_signals, SignalInputError, SignalScore, SignalSet, AASIST, HFI, REFERENCE_WEIGHTS, TNS};
