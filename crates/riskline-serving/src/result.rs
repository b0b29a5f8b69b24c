//! Prediction outcomes and risk tiers.

use serde::{Deserialize, Serialize};

/// Discretization of the default probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub const HIGH_THRESHOLD: f64 = 0.70;
    pub const MEDIUM_THRESHOLD: f64 = 0.40;

    /// Fixed thresholds: p >= 0.70 is high, p >= 0.40 is medium.
    #[must_use]
    pub fn from_probability(probability: f64) -> Self {
        if probability >= Self::HIGH_THRESHOLD {
            Self::High
        } else if probability >= Self::MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        };
        f.write_str(name)
    }
}

/// Binary outcome of a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultLabel {
    WillRepay,
    WillDefault,
}

impl DefaultLabel {
    #[must_use]
    pub fn from_class(label: u8) -> Self {
        if label == 0 {
            Self::WillRepay
        } else {
            Self::WillDefault
        }
    }
}

impl std::fmt::Display for DefaultLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DefaultLabel::WillRepay => "will_repay",
            DefaultLabel::WillDefault => "will_default",
        };
        f.write_str(name)
    }
}

/// One prediction: label, default probability, derived tier.
///
/// Ephemeral — produced per request and handed to the caller; never
/// written back to the run registry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: DefaultLabel,
    pub probability: f64,
    pub tier: RiskTier,
}
