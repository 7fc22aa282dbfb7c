use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::job::JobRequirements;
use crate::models::skill::SkillMatch;
use crate::scoring::weights::WeightConfig;

/// Categorical label derived from thresholding the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    High,
    Medium,
    Low,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::High => "High",
            Verdict::Medium => "Medium",
            Verdict::Low => "Low",
        }
    }
}

/// Range the hard score could take if fuzzy matches were all wrong (lower)
/// or all certain (upper).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBounds {
    pub lower: f64,
    pub upper: f64,
}

/// Wall-clock data about one match run. Not part of the deterministic output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchTelemetry {
    pub processing_time_ms: f64,
    pub resume_tokens: usize,
    pub job_tokens: usize,
    pub vocabulary_version: String,
    pub completed_at: DateTime<Utc>,
}

/// Full output of one match request. Built once; owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub hard_score: f64,     // 0 – 100
    pub semantic_score: f64, // 0 – 100
    pub final_score: f64,    // 0 – 100, one decimal
    pub verdict: Verdict,
    /// Job skills also found in the resume, in job order.
    pub matched_skills: Vec<String>,
    /// Job skills absent from the resume, in job order.
    pub missing_skills: Vec<String>,
    /// Missing skills the job requires (unlabelled ones included).
    pub missing_must_have: Vec<String>,
    /// Missing skills the job only lists as preferred.
    pub missing_nice_to_have: Vec<String>,
    /// Resume skills the job does not ask for, in resume order.
    pub extra_skills: Vec<String>,
    pub suggestions: Vec<String>,
    pub feedback: String,
    pub resume_skills: Vec<SkillMatch>,
    pub job_skills: Vec<SkillMatch>,
    pub job_requirements: JobRequirements,
    pub common_keywords: Vec<String>,
    /// Mean resume-side confidence over matched skills.
    pub match_confidence: f64,
    pub confidence_bounds: ConfidenceBounds,
    pub weights: WeightConfig,
    pub semantic_backend: String,
    pub telemetry: MatchTelemetry,
}
