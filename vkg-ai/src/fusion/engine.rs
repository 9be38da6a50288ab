//! Decision fusion
//!
//! Combines per-detector confidences into one explainable verdict:
//! 1. Weighted authenticity score
//! 2. Trust index = score minus weak-signal and disagreement penalties
//! 3. Threshold decision on the clamped trust index
//! 4. Decision confidence from the distance to the ambiguous midpoint
//!
//! Pure and total: identical inputs always give identical results.

use super::signals::SignalSet;
use serde::Serialize;
use tracing::debug;

pub const WEAK_SIGNAL_EXPLANATION: &str = "weak human-likeness indicator present";
pub const MULTIPLE_WEAK_EXPLANATION: &str = "multiple signals indicate synthetic characteristics";
pub const DISAGREEMENT_EXPLANATION: &str = "high disagreement between modules";
pub const AUTHENTIC_EXPLANATION: &str =
    "Signals consistently indicate natural human speech.";
pub const SYNTHETIC_EXPLANATION: &str =
    "Signals indicate synthetic or manipulated speech characteristics.";
pub const UNCERTAIN_EXPLANATION: &str =
    "Signals are inconclusive; further analysis is recommended.";

/// Fused verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Authentic,
    Synthetic,
    Uncertain,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Authentic => "AUTHENTIC",
            Decision::Synthetic => "SYNTHETIC",
            Decision::Uncertain => "UNCERTAIN",
        }
    }
}

/// Outcome of one fusion call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FusionResult {
    pub decision: Decision,
    pub authenticity_score: f64,
    pub trust_index: f64,
    pub confidence: f64,
    pub explanation: Vec<String>,
}

/// Thresholds and penalties for fusion
///
/// Compiled-in policy; [`FusionPolicy::REFERENCE`] is the only instance
/// callers get through [`fuse`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusionPolicy {
    /// Confidence below this marks a weak signal
    pub weak_threshold: f64,
    /// Penalty when at least one signal is weak
    pub weak_penalty: f64,
    /// Extra penalty when two or more signals are weak
    pub multiple_weak_penalty: f64,
    /// Max-min spread above this counts as disagreement
    pub disagreement_threshold: f64,
    pub disagreement_penalty: f64,
    /// Trust index at or above this is AUTHENTIC
    pub authentic_threshold: f64,
    /// Trust index at or below this is SYNTHETIC
    pub synthetic_threshold: f64,
    /// Trust index where the decision is least certain
    pub midpoint: f64,
    /// Scales midpoint distance so confidence reaches 1.0 near the boundaries
    pub confidence_scale: f64,
}

impl FusionPolicy {
    pub const REFERENCE: FusionPolicy = FusionPolicy {
        weak_threshold: 0.40,
        weak_penalty: 0.15,
        multiple_weak_penalty: 0.20,
        disagreement_threshold: 0.40,
        disagreement_penalty: 0.10,
        authentic_threshold: 0.75,
        synthetic_threshold: 0.45,
        midpoint: 0.60,
        confidence_scale: 1.6,
    };

    /// Fuse signals under this policy
    pub fn fuse(&self, signals: &SignalSet) -> FusionResult {
        let mut explanation = Vec::new();

        let authenticity_score: f64 = signals
            .values()
            .map(|s| s.weight * s.confidence)
            .sum();

        let mut trust_index = authenticity_score;

        let weak_count = signals
            .values()
            .filter(|s| s.confidence < self.weak_threshold)
            .count();

        if weak_count >= 1 {
            trust_index -= self.weak_penalty;
            explanation.push(WEAK_SIGNAL_EXPLANATION.to_string());
        }
        if weak_count >= 2 {
            trust_index -= self.multiple_weak_penalty;
            explanation.push(MULTIPLE_WEAK_EXPLANATION.to_string());
        }

        if let Some(spread) = spread(signals) {
            if spread > self.disagreement_threshold {
                trust_index -= self.disagreement_penalty;
                explanation.push(DISAGREEMENT_EXPLANATION.to_string());
            }
        }

        let trust_index = trust_index.clamp(0.0, 1.0);

        let decision = if trust_index >= self.authentic_threshold {
            explanation.push(AUTHENTIC_EXPLANATION.to_string());
            Decision::Authentic
        } else if trust_index <= self.synthetic_threshold {
            explanation.push(SYNTHETIC_EXPLANATION.to_string());
            Decision::Synthetic
        } else {
            explanation.push(UNCERTAIN_EXPLANATION.to_string());
            Decision::Uncertain
        };

        let confidence = ((trust_index - self.midpoint).abs() * self.confidence_scale).clamp(0.0, 1.0);

        debug!(
            "Fused {} signals: score={:.3} weak={} trust={:.3} -> {} ({:.3})",
            signals.len(),
            authenticity_score,
            weak_count,
            trust_index,
            decision.as_str(),
            confidence
        );

        FusionResult {
            decision,
            authenticity_score,
            trust_index,
            confidence,
            explanation,
        }
    }
}

impl Default for FusionPolicy {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// Fuse signals under the reference policy
pub fn fuse(signals: &SignalSet) -> FusionResult {
    FusionPolicy::REFERENCE.fuse(signals)
}

/// max − min confidence, `None` for an empty set
fn spread(signals: &SignalSet) -> Option<f64> {
    let mut confidences = signals.values().map(|s| s.confidence);
    let first = confidences.next()?;
    let (min, max) = confidences.fold((first, first), |(lo, hi), c| (lo.min(c), hi.max(c)));
    Some(max - min)
}
