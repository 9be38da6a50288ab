//! Detector confidence signals and their fixed weights

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// AASIST-style spoofing classifier
pub const AASIST: &str = "aasist";
/// Harmonic/formant indicator
pub const HFI: &str = "hfi";
/// Temporal-naturalness indicator
pub const TNS: &str = "tns";

/// Reference signal weights; they sum to 1.0
pub const REFERENCE_WEIGHTS: [(&str, f64); 3] = [(AASIST, 0.40), (HFI, 0.35), (TNS, 0.25)];

/// Caller-side validation failure for detector outputs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SignalInputError {
    #[error("Confidence out of range [0, 1]: {0}")]
    ConfidenceOutOfRange(f64),

    #[error("Weight out of range [0, 1]: {0}")]
    WeightOutOfRange(f64),
}

/// One detector's confidence and its fixed weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignalScore {
    pub confidence: f64,
    pub weight: f64,
}

impl SignalScore {
    /// Validated constructor for transport-layer callers
    ///
    /// Fusion itself does not re-check ranges; build scores through here.
    pub fn new(confidence: f64, weight: f64) -> Result<Self, SignalInputError> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(SignalInputError::ConfidenceOutOfRange(confidence));
        }
        if !(0.0..=1.0).contains(&weight) {
            return Err(SignalInputError::WeightOutOfRange(weight));
        }
        Ok(Self { confidence, weight })
    }
}

/// Signal identifier → score, ordered by identifier
pub type SignalSet = BTreeMap<String, SignalScore>;

/// Build the three reference signals with their fixed weights
pub fn reference_signals(aasist: f64, hfi: f64, tns: f64) -> Result<SignalSet, SignalInputError> {
    let confidences = [aasist, hfi, tns];
    REFERENCE_WEIGHTS
        .iter()
        .zip(confidences)
        .map(|((name, weight), confidence)| {
            SignalScore::new(confidence, *weight).map(|score| (name.to_string(), score))
        })
        .collect()
}
