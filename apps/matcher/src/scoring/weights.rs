use serde::{Deserialize, Serialize};

use crate::errors::ConfigurationError;
use crate::models::result::Verdict;

/// Allowed deviation of `hard + semantic` from 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Rounds to one decimal place. Never returns negative zero.
pub(crate) fn round1(value: f64) -> f64 {
    // `-0.0 + 0.0 == +0.0`
    (value * 10.0).round() / 10.0 + 0.0
}

#[derive(Debug, Deserialize)]
struct RawWeights {
    hard: f64,
    semantic: f64,
}

/// Validated hard-skill / semantic weight pair. Always sums to 1.0 within tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWeights")]
pub struct WeightConfig {
    hard: f64,
    semantic: f64,
}

impl WeightConfig {
    pub fn new(hard: f64, semantic: f64) -> Result<Self, ConfigurationError> {
        let invalid = |reason: &str| ConfigurationError::InvalidWeights {
            hard,
            semantic,
            reason: reason.to_string(),
        };

        if !hard.is_finite() || !semantic.is_finite() {
            return Err(invalid("weights must be finite numbers"));
        }
        if !(0.0..=1.0).contains(&hard) || !(0.0..=1.0).contains(&semantic) {
            return Err(invalid("each weight must be within [0, 1]"));
        }
        if (hard + semantic - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(invalid("weights must sum to 1.0"));
        }

        Ok(Self { hard, semantic })
    }

    pub fn hard(&self) -> f64 {
        self.hard
    }

    pub fn semantic(&self) -> f64 {
        self.semantic
    }

    /// `round(hard × hard_score + semantic × semantic_score, 1)`.
    pub fn combine(&self, hard_score: f64, semantic_score: f64) -> f64 {
        round1(self.hard * hard_score + self.semantic * semantic_score)
    }
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            hard: 0.7,
            semantic: 0.3,
        }
    }
}

impl TryFrom<RawWeights> for WeightConfig {
    type Error = ConfigurationError;

    fn try_from(raw: RawWeights) -> Result<Self, Self::Error> {
        Self::new(raw.hard, raw.semantic)
    }
}

/// Inclusive lower bounds of the High and Medium verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerdictThresholds {
    high: f64,
    medium: f64,
}

impl VerdictThresholds {
    pub fn new(high: f64, medium: f64) -> Result<Self, ConfigurationError> {
        let in_range = |v: f64| (0.0..=100.0).contains(&v);
        if !in_range(high) || !in_range(medium) || medium > high {
            return Err(ConfigurationError::InvalidThresholds { high, medium });
        }
        Ok(Self { high, medium })
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn medium(&self) -> f64 {
        self.medium
    }

    pub fn verdict_for(&self, final_score: f64) -> Verdict {
        if final_score >= self.high {
            Verdict::High
        } else if final_score >= self.medium {
            Verdict::Medium
        } else {
            Verdict::Low
        }
    }
}

impl Default for VerdictThresholds {
    fn default() -> Self {
        Self {
            high: 75.0,
            medium: 50.0,
        }
    }
}
