//! Transport-facing analysis report

use crate::audio::{OutcomeSummary, ValidationOutcome};
use crate::fusion::{Decision, FusionResult, SignalSet};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scores {
    pub authenticity_score: f64,
    pub trust_index: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Provenance {
    pub human_probability: f64,
    pub synthetic_probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalView {
    pub confidence: f64,
    pub weight: f64,
}

/// Full response for one analysed upload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub decision: Decision,
    pub scores: Scores,
    pub provenance: Provenance,
    pub signals: BTreeMap<String, SignalView>,
    /// Explanation trail joined with single spaces
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<OutcomeSummary>,
}

impl AnalysisReport {
    pub fn new(signals: &SignalSet, result: &FusionResult) -> Self {
        Self {
            decision: result.decision,
            scores: Scores {
                authenticity_score: result.authenticity_score,
                trust_index: result.trust_index,
                confidence: result.confidence,
            },
            provenance: Provenance {
                human_probability: result.trust_index,
                synthetic_probability: round3(1.0 - result.trust_index),
            },
            signals: signals
                .iter()
                .map(|(name, score)| {
                    (
                        name.clone(),
                        SignalView {
                            confidence: score.confidence,
                            weight: score.weight,
                        },
                    )
                })
                .collect(),
            explanation: result.explanation.join(" "),
            audio: None,
        }
    }

    /// Attach the intake summary for the analysed audio
    pub fn with_audio(mut self, outcome: &ValidationOutcome) -> Self {
        self.audio = Some(outcome.summary());
        self
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
