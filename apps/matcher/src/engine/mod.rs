//! Match orchestration: the only component that sees both documents.
//!
//! Pipeline per request:
//!   normalize + extract (resume ‖ clean + extract + requirements for the job)
//!   → score → gap analysis → feedback → MatchResult
//!
//! The engine is immutable and cheap to clone; clones share the vocabulary and scorer.

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Config;
use crate::errors::{ConfigurationError, MatchError};
use crate::extraction::extractor::extract;
use crate::extraction::policy::FuzzyPolicy;
use crate::gap::{analyze_with_priorities, summarize_feedback};
use crate::job::{clean_job_description, read_requirements, JobRequirements};
use crate::models::result::{MatchResult, MatchTelemetry};
use crate::models::skill::SkillSet;
use crate::scoring::scorer::{self, confidence_bounds, match_confidence};
use crate::scoring::semantic::{SemanticScorer, TfIdfCosineScorer};
use crate::scoring::weights::{VerdictThresholds, WeightConfig};
use crate::text::keywords::{common_keywords, DEFAULT_KEYWORD_LIMIT};
use crate::text::normalizer::{normalize, NormalizedDocument};
use crate::vocabulary::Vocabulary;

/// Request-independent matching policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchPolicy {
    pub fuzzy: FuzzyPolicy,
    pub thresholds: VerdictThresholds,
    /// Maximum number of shared keywords reported.
    pub keyword_limit: usize,
    /// Drop "About us", benefits and equal-opportunity text from the job before reading it.
    #[serde(default = "default_strip_job_boilerplate")]
    pub strip_job_boilerplate: bool,
}

fn default_strip_job_boilerplate() -> bool {
    true
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            fuzzy: FuzzyPolicy::default(),
            thresholds: VerdictThresholds::default(),
            keyword_limit: DEFAULT_KEYWORD_LIMIT,
            strip_job_boilerplate: default_strip_job_boilerplate(),
        }
    }
}

impl MatchPolicy {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.fuzzy.validate()?;
        // Re-run the constructor check in case the policy was deserialized.
        VerdictThresholds::new(self.thresholds.high(), self.thresholds.medium())?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct MatchEngine {
    vocabulary: Arc<Vocabulary>,
    policy: MatchPolicy,
    semantic: Arc<dyn SemanticScorer>,
}

impl std::fmt::Debug for MatchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchEngine")
            .field("vocabulary_version", &self.vocabulary.version())
            .field("policy", &self.policy)
            .field("semantic_backend", &self.semantic.backend())
            .finish()
    }
}

impl MatchEngine {
    /// Builds an engine using the TF-IDF cosine semantic scorer.
    pub fn new(
        vocabulary: Arc<Vocabulary>,
        policy: MatchPolicy,
    ) -> Result<Self, ConfigurationError> {
        policy.validate()?;
        Ok(Self {
            vocabulary,
            policy,
            semantic: Arc::new(TfIdfCosineScorer),
        })
    }

    /// Swaps the semantic scorer (e.g. an embedding-backed implementation).
    pub fn with_semantic_scorer(mut self, scorer: Arc<dyn SemanticScorer>) -> Self {
        self.semantic = scorer;
        self
    }

    /// Loads the configured vocabulary (or the bundled one) and policy.
    pub fn from_config(config: &Config) -> Result<Self, ConfigurationError> {
        let vocabulary = match &config.vocabulary_path {
            Some(path) => Vocabulary::from_path(path)?,
            None => Vocabulary::bundled()?,
        };

        let policy = MatchPolicy {
            fuzzy: FuzzyPolicy {
                acceptance_threshold: config.fuzzy_threshold,
                confidence_floor: config.confidence_floor,
                max_length_delta: config.max_length_delta,
                ..FuzzyPolicy::default()
            },
            thresholds: VerdictThresholds::new(config.high_threshold, config.medium_threshold)?,
            keyword_limit: DEFAULT_KEYWORD_LIMIT,
            strip_job_boilerplate: config.strip_job_boilerplate,
        };

        Self::new(Arc::new(vocabulary), policy)
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    /// Validates the weights, then matches. Invalid weights fail before any work is done.
    pub fn match_texts(
        &self,
        resume_text: &str,
        job_text: &str,
        hard_weight: f64,
        semantic_weight: f64,
    ) -> Result<MatchResult, ConfigurationError> {
        let weights = WeightConfig::new(hard_weight, semantic_weight)?;
        Ok(self.match_with_weights(resume_text, job_text, &weights))
    }

    /// Runs the full pipeline with already-validated weights. Never fails.
    pub fn match_with_weights(
        &self,
        resume_text: &str,
        job_text: &str,
        weights: &WeightConfig,
    ) -> MatchResult {
        let started = Instant::now();

        let ((resume_doc, resume_skills), (job_doc, job_skills, requirements)) = rayon::join(
            || self.read_document(resume_text),
            || self.read_job(job_text),
        );

        let scores = scorer::score(
            &resume_skills,
            &job_skills,
            &resume_doc,
            &job_doc,
            weights,
            self.semantic.as_ref(),
        );
        let verdict = self.policy.thresholds.verdict_for(scores.final_score);

        let gaps = analyze_with_priorities(&resume_skills, &job_skills, &requirements);
        let feedback = summarize_feedback(&gaps, &self.vocabulary);
        let keywords = common_keywords(&resume_doc, &job_doc, self.policy.keyword_limit);

        let processing_time_ms = started.elapsed().as_secs_f64() * 1000.0;

        info!(
            "Match complete: final={} (hard={}, semantic={}) verdict={} matched={} missing={} (must-have {}) in {:.2}ms",
            scores.final_score,
            scores.hard_score,
            scores.semantic_score,
            verdict.as_str(),
            gaps.matched.len(),
            gaps.missing.len(),
            gaps.missing_must_have.len(),
            processing_time_ms
        );

        MatchResult {
            hard_score: scores.hard_score,
            semantic_score: scores.semantic_score,
            final_score: scores.final_score,
            verdict,
            match_confidence: match_confidence(&resume_skills, &job_skills),
            confidence_bounds: confidence_bounds(&resume_skills, &job_skills),
            matched_skills: gaps.matched,
            missing_skills: gaps.missing,
            missing_must_have: gaps.missing_must_have,
            missing_nice_to_have: gaps.missing_nice_to_have,
            extra_skills: gaps.extra,
            suggestions: gaps.suggestions,
            feedback,
            resume_skills: resume_skills.as_slice().to_vec(),
            job_skills: job_skills.as_slice().to_vec(),
            job_requirements: requirements,
            common_keywords: keywords,
            weights: *weights,
            semantic_backend: self.semantic.backend().to_string(),
            telemetry: MatchTelemetry {
                processing_time_ms,
                resume_tokens: resume_doc.tokens.len(),
                job_tokens: job_doc.tokens.len(),
                vocabulary_version: self.vocabulary.version().to_string(),
                completed_at: Utc::now(),
            },
        }
    }

    /// Async entry point for tokio hosts. Runs the pipeline on the blocking pool.
    pub async fn match_texts_async(
        &self,
        resume_text: impl Into<String>,
        job_text: impl Into<String>,
        hard_weight: f64,
        semantic_weight: f64,
    ) -> Result<MatchResult, MatchError> {
        let weights = WeightConfig::new(hard_weight, semantic_weight)?;
        let engine = self.clone();
        let resume_text = resume_text.into();
        let job_text = job_text.into();

        tokio::task::spawn_blocking(move || {
            engine.match_with_weights(&resume_text, &job_text, &weights)
        })
        .await
        .map_err(|e| MatchError::Task(e.to_string()))
    }

    fn read_document(&self, text: &str) -> (NormalizedDocument, SkillSet) {
        let doc = normalize(text);
        let skills = extract(&doc, &self.vocabulary, &self.policy.fuzzy);
        (doc, skills)
    }

    fn read_job(&self, text: &str) -> (NormalizedDocument, SkillSet, JobRequirements) {
        let text = if self.policy.strip_job_boilerplate {
            Cow::Owned(clean_job_description(text))
        } else {
            Cow::Borrowed(text)
        };
        let (doc, skills) = self.read_document(&text);
        let requirements = read_requirements(&text, &skills, &self.vocabulary, &self.policy.fuzzy);
        (doc, skills, requirements)
    }
}
