use serde::{Deserialize, Serialize};

use crate::models::result::ConfidenceBounds;
use crate::models::skill::{MatchKind, SkillSet};
use crate::scoring::semantic::SemanticScorer;
use crate::scoring::weights::{round1, WeightConfig};
use crate::text::normalizer::NormalizedDocument;

/// The three scores of one match, each rounded to one decimal place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub hard_score: f64,
    pub semantic_score: f64,
    pub final_score: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Hard-skill score
// ────────────────────────────────────────────────────────────────────────────

/// Percentage of the job's required skills found in the resume.
///
/// Each shared skill counts with the resume-side confidence, so a fuzzy sighting
/// contributes less than an exact one. A job with no recognized skills scores 100.
pub fn hard_skill_score(resume: &SkillSet, job: &SkillSet) -> f64 {
    if job.is_empty() {
        return 100.0;
    }

    let covered: f64 = job
        .iter()
        .filter_map(|required| resume.get(&required.canonical))
        .map(|found| found.confidence)
        .sum();

    round1(covered / job.len() as f64 * 100.0)
}

/// Computes hard, semantic and final scores.
///
/// The final score combines the already-rounded components, so
/// `final == round(w_h × hard + w_s × semantic, 1)` holds for the reported values.
pub fn score(
    resume_skills: &SkillSet,
    job_skills: &SkillSet,
    resume_doc: &NormalizedDocument,
    job_doc: &NormalizedDocument,
    weights: &WeightConfig,
    semantic: &dyn SemanticScorer,
) -> ScoreBreakdown {
    let hard_score = hard_skill_score(resume_skills, job_skills);
    let semantic_score = round1(semantic.score(resume_doc, job_doc).clamp(0.0, 100.0));
    let final_score = weights.combine(hard_score, semantic_score);

    ScoreBreakdown {
        hard_score,
        semantic_score,
        final_score,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Match confidence
// ────────────────────────────────────────────────────────────────────────────

/// Mean resume-side confidence over the matched skills; 1.0 when nothing matched.
pub fn match_confidence(resume: &SkillSet, job: &SkillSet) -> f64 {
    let confidences: Vec<f64> = job
        .iter()
        .filter_map(|required| resume.get(&required.canonical))
        .map(|found| found.confidence)
        .collect();

    if confidences.is_empty() {
        return 1.0;
    }
    confidences.iter().sum::<f64>() / confidences.len() as f64
}

/// Range the hard score could take if every fuzzy match were wrong (lower) or
/// fully right (upper).
pub fn confidence_bounds(resume: &SkillSet, job: &SkillSet) -> ConfidenceBounds {
    if job.is_empty() {
        return ConfidenceBounds {
            lower: 100.0,
            upper: 100.0,
        };
    }

    let (mut exact, mut fuzzy) = (0usize, 0usize);
    for required in job {
        match resume.get(&required.canonical).map(|m| m.kind) {
            Some(MatchKind::Exact) => exact += 1,
            Some(MatchKind::Fuzzy) => fuzzy += 1,
            None => {}
        }
    }

    let total = job.len() as f64;
    ConfidenceBounds {
        lower: round1(exact as f64 / total * 100.0),
        upper: round1((exact + fuzzy) as f64 / total * 100.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::skill::SkillMatch;
    use crate::text::normalizer::normalize;

    fn exact(canonical: &str) -> SkillMatch {
        SkillMatch {
            canonical: canonical.to_string(),
            kind: MatchKind::Exact,
            confidence: 1.0,
            surface: canonical.to_lowercase(),
            position: 0,
        }
    }

    fn fuzzy(canonical: &str, confidence: f64) -> SkillMatch {
        SkillMatch {
            kind: MatchKind::Fuzzy,
            confidence,
            ..exact(canonical)
        }
    }

    fn set(matches: Vec<SkillMatch>) -> SkillSet {
        SkillSet::from_ordered(matches)
    }

    struct FixedScorer(f64);

    impl SemanticScorer for FixedScorer {
        fn backend(&self) -> &'static str {
            "fixed"
        }

        fn score(&self, _: &NormalizedDocument, _: &NormalizedDocument) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_hard_score_two_of_three() {
        let resume = set(vec![exact("Python"), exact("AWS"), exact("Docker")]);
        let job = set(vec![exact("Python"), exact("Kubernetes"), exact("AWS")]);
        assert_eq!(hard_skill_score(&resume, &job), 66.7);
    }

    #[test]
    fn test_hard_score_is_asymmetric() {
        let resume = set(vec![exact("Python"), exact("AWS"), exact("Docker")]);
        let job = set(vec![exact("Python")]);
        assert_eq!(hard_skill_score(&resume, &job), 100.0);
        assert_eq!(hard_skill_score(&job, &resume), 33.3);
    }

    #[test]
    fn test_empty_job_scores_full_marks() {
        let resume = set(vec![exact("Python")]);
        assert_eq!(hard_skill_score(&resume, &SkillSet::default()), 100.0);
        assert_eq!(hard_skill_score(&SkillSet::default(), &SkillSet::default()), 100.0);
    }

    #[test]
    fn test_empty_resume_scores_zero() {
        let job = set(vec![exact("Python"), exact("Golang")]);
        assert_eq!(hard_skill_score(&SkillSet::default(), &job), 0.0);
    }

    #[test]
    fn test_fuzzy_match_counts_with_its_confidence() {
        let resume = set(vec![exact("Python"), fuzzy("Kubernetes", 0.9)]);
        let job = set(vec![exact("Python"), exact("Kubernetes")]);
        // (1.0 + 0.9) / 2
        assert_eq!(hard_skill_score(&resume, &job), 95.0);
    }

    #[test]
    fn test_final_score_combines_rounded_components() {
        let resume = set(vec![exact("Python"), exact("AWS"), exact("Docker")]);
        let job = set(vec![exact("Python"), exact("Kubernetes"), exact("AWS")]);
        let weights = WeightConfig::default();

        let breakdown = score(
            &resume,
            &job,
            &normalize("a"),
            &normalize("b"),
            &weights,
            &FixedScorer(40.04),
        );

        assert_eq!(breakdown.hard_score, 66.7);
        assert_eq!(breakdown.semantic_score, 40.0);
        assert_eq!(breakdown.final_score, weights.combine(66.7, 40.0));
        assert_eq!(breakdown.final_score, 58.7);
    }

    #[test]
    fn test_semantic_score_is_clamped() {
        let empty = SkillSet::default();
        let doc = normalize("x");
        let weights = WeightConfig::new(0.0, 1.0).unwrap();

        let high = score(&empty, &empty, &doc, &doc, &weights, &FixedScorer(140.0));
        assert_eq!(high.semantic_score, 100.0);

        let low = score(&empty, &empty, &doc, &doc, &weights, &FixedScorer(-5.0));
        assert_eq!(low.semantic_score, 0.0);
        assert_eq!(low.final_score, 0.0);
    }

    #[test]
    fn test_no_overlap_scores_positive_zero() {
        let resume = set(vec![exact("Cooking")]);
        let job = set(vec![exact("Python"), exact("AWS")]);
        let breakdown = score(
            &resume,
            &job,
            &normalize("Cooking and gardening"),
            &normalize("Python AWS"),
            &WeightConfig::default(),
            &crate::scoring::semantic::TfIdfCosineScorer,
        );

        for value in [
            breakdown.hard_score,
            breakdown.semantic_score,
            breakdown.final_score,
        ] {
            assert_eq!(value, 0.0);
            assert!(value.is_sign_positive(), "got {value}");
        }

        let bounds = confidence_bounds(&resume, &job);
        assert!(bounds.lower.is_sign_positive() && bounds.upper.is_sign_positive());
    }

    #[test]
    fn test_match_confidence() {
        let resume = set(vec![exact("Python"), fuzzy("Kubernetes", 0.8)]);
        let job = set(vec![exact("Python"), exact("Kubernetes"), exact("AWS")]);
        assert!((match_confidence(&resume, &job) - 0.9).abs() < 1e-9);

        assert_eq!(match_confidence(&SkillSet::default(), &job), 1.0);
    }

    #[test]
    fn test_confidence_bounds_bracket_hard_score() {
        let resume = set(vec![exact("Python"), fuzzy("Kubernetes", 0.9)]);
        let job = set(vec![exact("Python"), exact("Kubernetes"), exact("AWS"), exact("Golang")]);

        let bounds = confidence_bounds(&resume, &job);
        let hard = hard_skill_score(&resume, &job);

        assert_eq!(bounds.lower, 25.0);
        assert_eq!(bounds.upper, 50.0);
        assert!(bounds.lower <= hard && hard <= bounds.upper);
    }

    #[test]
    fn test_confidence_bounds_for_empty_job() {
        let bounds = confidence_bounds(&SkillSet::default(), &SkillSet::default());
        assert_eq!(bounds.lower, 100.0);
        assert_eq!(bounds.upper, 100.0);
    }
}
