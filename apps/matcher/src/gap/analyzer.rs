use serde::{Deserialize, Serialize};

use crate::job::{JobRequirements, SkillPriority};
use crate::models::skill::SkillSet;
use crate::vocabulary::Vocabulary;

const SUGGESTION_PREFIX: &str = "Consider acquiring or highlighting: ";
const NO_GAPS_FEEDBACK: &str = "Excellent skill alignment! No major gaps detected.";

/// Skill-level differences between a resume and a job description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GapAnalysis {
    /// Job skills present in the resume, in job order.
    pub matched: Vec<String>,
    /// Job skills absent from the resume, in job order.
    pub missing: Vec<String>,
    /// The part of `missing` the job requires.
    pub missing_must_have: Vec<String>,
    /// The part of `missing` the job only prefers.
    pub missing_nice_to_have: Vec<String>,
    /// Resume skills the job does not ask for, in resume order.
    pub extra: Vec<String>,
    /// One actionable line per missing skill.
    pub suggestions: Vec<String>,
}

/// Partitions both skill sets. Every job skill lands in exactly one of
/// `matched` / `missing`; every resume skill in exactly one of `matched` / `extra`.
pub fn analyze(resume: &SkillSet, job: &SkillSet) -> GapAnalysis {
    let (matched, missing): (Vec<String>, Vec<String>) = job
        .iter()
        .map(|m| m.canonical.clone())
        .partition(|canonical| resume.contains(canonical));

    let extra = resume
        .iter()
        .filter(|m| !job.contains(&m.canonical))
        .map(|m| m.canonical.clone())
        .collect();

    let suggestions = missing
        .iter()
        .map(|skill| format!("{SUGGESTION_PREFIX}{skill}"))
        .collect();

    GapAnalysis {
        matched,
        missing_must_have: missing.clone(),
        missing_nice_to_have: Vec::new(),
        missing,
        extra,
        suggestions,
    }
}

/// Like [`analyze`], with missing skills split by the priority the job gives them.
/// Skills without a stated priority count as must-have.
pub fn analyze_with_priorities(
    resume: &SkillSet,
    job: &SkillSet,
    requirements: &JobRequirements,
) -> GapAnalysis {
    let mut gaps = analyze(resume, job);
    let (nice, must): (Vec<String>, Vec<String>) =
        gaps.missing.iter().cloned().partition(|skill| {
            requirements.priority_of(skill) == Some(SkillPriority::NiceToHave)
        });
    gaps.missing_must_have = must;
    gaps.missing_nice_to_have = nice;
    gaps
}

// ────────────────────────────────────────────────────────────────────────────
// Feedback
// ────────────────────────────────────────────────────────────────────────────

/// One-line, human-readable summary of the gaps, grouped by skill category.
///
/// Missing skills are bucketed by their vocabulary category; each bucket names at
/// most a handful of skills. Matched skills follow. Sections are joined by `" | "`.
pub fn summarize_feedback(gaps: &GapAnalysis, vocabulary: &Vocabulary) -> String {
    let mut programming = Vec::new();
    let mut cloud = Vec::new();
    let mut data = Vec::new();
    let mut other = Vec::new();

    for skill in &gaps.missing {
        let bucket = match vocabulary.category_of(skill) {
            Some("programming") => &mut programming,
            Some("cloud") => &mut cloud,
            Some("data") => &mut data,
            _ => &mut other,
        };
        bucket.push(skill.as_str());
    }

    let mut parts = Vec::new();
    if !programming.is_empty() {
        parts.push(format!("Programming: consider learning {}", head(&programming, 3)));
    }
    if !cloud.is_empty() {
        parts.push(format!(
            "Cloud: add projects showcasing {} deployment",
            head(&cloud, 2)
        ));
    }
    if !data.is_empty() {
        parts.push(format!(
            "Data science: build portfolio projects with {}",
            head(&data, 2)
        ));
    }
    if !other.is_empty() {
        parts.push(format!("Technical: gain experience with {}", head(&other, 3)));
    }
    if !gaps.matched.is_empty() {
        let matched: Vec<&str> = gaps.matched.iter().map(String::as_str).collect();
        parts.push(format!("Strong match in: {}", head(&matched, 5)));
    }

    if parts.is_empty() {
        return NO_GAPS_FEEDBACK.to_string();
    }
    parts.join(" | ")
}

fn head(skills: &[&str], limit: usize) -> String {
    skills[..skills.len().min(limit)].join(", ")
}
