use std::path::PathBuf;

use thiserror::Error;

/// Fatal setup errors. Raised before any matching work begins.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Invalid weights (hard={hard}, semantic={semantic}): {reason}")]
    InvalidWeights {
        hard: f64,
        semantic: f64,
        reason: String,
    },

    #[error("Ambiguous vocabulary: variant '{variant}' maps to both '{first}' and '{second}'")]
    AmbiguousVariant {
        variant: String,
        first: String,
        second: String,
    },

    #[error("Vocabulary contains no skills")]
    EmptyVocabulary,

    #[error("Invalid skill entry: {0}")]
    InvalidSkillEntry(String),

    #[error("Invalid matching policy: {0}")]
    InvalidPolicy(String),

    #[error("Invalid verdict thresholds (high={high}, medium={medium})")]
    InvalidThresholds { high: f64, medium: f64 },

    #[error("Could not read vocabulary at {}: {source}", path.display())]
    VocabularyIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed vocabulary artifact: {0}")]
    VocabularyParse(#[from] serde_json::Error),
}

/// Errors returned by the async entry point.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Matching task failed: {0}")]
    Task(String),
}
