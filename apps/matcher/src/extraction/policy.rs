use serde::{Deserialize, Serialize};

use crate::errors::ConfigurationError;

/// String similarity used by the fuzzy pass. Both return a value in [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMetric {
    /// 1 - levenshtein / max(len).
    #[default]
    Levenshtein,
    JaroWinkler,
}

impl SimilarityMetric {
    pub fn similarity(self, a: &str, b: &str) -> f64 {
        match self {
            SimilarityMetric::Levenshtein => strsim::normalized_levenshtein(a, b),
            SimilarityMetric::JaroWinkler => strsim::jaro_winkler(a, b),
        }
    }
}

/// Tunable thresholds for near-miss variant matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyPolicy {
    pub enabled: bool,
    pub metric: SimilarityMetric,
    /// Minimum similarity for a fuzzy hit to be accepted (inclusive).
    pub acceptance_threshold: f64,
    /// Fuzzy confidence is never reported below this.
    pub confidence_floor: f64,
    /// Candidates whose length differs from the n-gram by more than this are skipped.
    pub max_length_delta: usize,
    /// N-grams shorter than this never go through the fuzzy pass.
    pub min_fuzzy_chars: usize,
    /// Only compare against variants sharing the n-gram's first character.
    pub require_same_initial: bool,
}

impl Default for FuzzyPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            metric: SimilarityMetric::Levenshtein,
            acceptance_threshold: 0.85,
            confidence_floor: 0.6,
            max_length_delta: 2,
            min_fuzzy_chars: 4,
            require_same_initial: true,
        }
    }
}

impl FuzzyPolicy {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(self.acceptance_threshold > 0.0 && self.acceptance_threshold <= 1.0) {
            return Err(ConfigurationError::InvalidPolicy(format!(
                "acceptance_threshold must be in (0, 1], got {}",
                self.acceptance_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.confidence_floor) {
            return Err(ConfigurationError::InvalidPolicy(format!(
                "confidence_floor must be in [0, 1], got {}",
                self.confidence_floor
            )));
        }
        if self.min_fuzzy_chars == 0 {
            return Err(ConfigurationError::InvalidPolicy(
                "min_fuzzy_chars must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Confidence reported for an accepted fuzzy hit.
    pub fn confidence_for(&self, similarity: f64) -> f64 {
        similarity.max(self.confidence_floor).min(1.0)
    }
}
