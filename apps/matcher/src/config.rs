use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::errors::ConfigurationError;
use crate::scoring::weights::WeightConfig;

/// Engine configuration loaded from environment variables.
/// Every variable is optional; unset values fall back to the defaults below.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// External vocabulary artifact. `None` uses the bundled one.
    pub vocabulary_path: Option<PathBuf>,
    pub hard_weight: f64,
    pub semantic_weight: f64,
    pub fuzzy_threshold: f64,
    pub confidence_floor: f64,
    pub max_length_delta: usize,
    pub high_threshold: f64,
    pub medium_threshold: f64,
    /// Strip company boilerplate from job descriptions before matching.
    pub strip_job_boilerplate: bool,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            vocabulary_path: None,
            hard_weight: 0.7,
            semantic_weight: 0.3,
            fuzzy_threshold: 0.85,
            confidence_floor: 0.6,
            max_length_delta: 2,
            high_threshold: 75.0,
            medium_threshold: 50.0,
            strip_job_boilerplate: true,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        Ok(Config {
            vocabulary_path: std::env::var("MATCHER_VOCABULARY_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            hard_weight: parse_env("MATCHER_HARD_WEIGHT", defaults.hard_weight)?,
            semantic_weight: parse_env("MATCHER_SEMANTIC_WEIGHT", defaults.semantic_weight)?,
            fuzzy_threshold: parse_env("MATCHER_FUZZY_THRESHOLD", defaults.fuzzy_threshold)?,
            confidence_floor: parse_env("MATCHER_CONFIDENCE_FLOOR", defaults.confidence_floor)?,
            max_length_delta: parse_env("MATCHER_MAX_LENGTH_DELTA", defaults.max_length_delta)?,
            high_threshold: parse_env("MATCHER_HIGH_THRESHOLD", defaults.high_threshold)?,
            medium_threshold: parse_env("MATCHER_MEDIUM_THRESHOLD", defaults.medium_threshold)?,
            strip_job_boilerplate: parse_env(
                "MATCHER_STRIP_JOB_BOILERPLATE",
                defaults.strip_job_boilerplate,
            )?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }

    /// Default weights for requests that do not bring their own.
    pub fn weights(&self) -> Result<WeightConfig, ConfigurationError> {
        WeightConfig::new(self.hard_weight, self.semantic_weight)
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: '{raw}'")),
        Err(_) => Ok(default),
    }
}
