//! Splits job skills into must-have and nice-to-have.
//!
//! The job text is cut into clauses (lines, then `;`, `•` and sentence ends). A clause
//! that names only must-have indicators ("required", "must have") or only nice-to-have
//! indicators ("preferred", "a plus") takes that priority. Otherwise it inherits the
//! priority of the last labelled heading ("Nice to have:") in the same block, and
//! falls back to must-have. A blank line ends the block.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::extraction::extractor::extract;
use crate::extraction::policy::FuzzyPolicy;
use crate::models::skill::SkillSet;
use crate::text::normalizer::normalize;
use crate::vocabulary::Vocabulary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillPriority {
    MustHave,
    NiceToHave,
}

static MUST_HAVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:required|requirements?|must\s+have|must\s+be|mandatory|essential|necessary|should\s+have|need\s+to\s+have|expertise\s+in)\b",
    )
    .expect("valid must-have regex")
});

static NICE_TO_HAVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:preferred|nice\s+to\s+have|good\s+to\s+have|plus|bonus|additional|desirable|advantage(?:ous)?|would\s+be\s+great|ideal\s+candidate)\b",
    )
    .expect("valid nice-to-have regex")
});

static CLAUSE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[;•]|\.(?:\s|$)").expect("valid clause break regex"));

/// Priority a clause states on its own, if it states exactly one.
pub fn classify_clause(clause: &str) -> Option<SkillPriority> {
    match (MUST_HAVE.is_match(clause), NICE_TO_HAVE.is_match(clause)) {
        (true, false) => Some(SkillPriority::MustHave),
        (false, true) => Some(SkillPriority::NiceToHave),
        _ => None,
    }
}

/// Non-empty clauses of `text`, each with the priority it carries.
pub fn prioritized_clauses(text: &str) -> Vec<(SkillPriority, &str)> {
    let mut clauses = Vec::new();
    let mut heading: Option<SkillPriority> = None;

    for line in text.lines() {
        if line.trim().is_empty() {
            heading = None;
            continue;
        }

        for clause in CLAUSE_BREAK.split(line).map(str::trim) {
            if clause.is_empty() {
                continue;
            }
            if let Some(labelled) = clause
                .split_once(':')
                .and_then(|(label, _)| classify_clause(label))
            {
                heading = Some(labelled);
            }
            let priority = classify_clause(clause)
                .or(heading)
                .unwrap_or(SkillPriority::MustHave);
            clauses.push((priority, clause));
        }
    }

    clauses
}

/// Splits `job_skills` by priority, keeping job order within each list.
///
/// A skill seen in any must-have clause is must-have. A skill seen only in
/// nice-to-have clauses is nice-to-have. A skill no single clause accounts for
/// (e.g. an n-gram spanning a clause break) defaults to must-have.
pub fn split_by_priority(
    job_text: &str,
    job_skills: &SkillSet,
    vocabulary: &Vocabulary,
    policy: &FuzzyPolicy,
) -> (Vec<String>, Vec<String>) {
    let mut must: HashSet<String> = HashSet::new();
    let mut nice: HashSet<String> = HashSet::new();

    for (priority, clause) in prioritized_clauses(job_text) {
        let found = extract(&normalize(clause), vocabulary, policy);
        let bucket = match priority {
            SkillPriority::MustHave => &mut must,
            SkillPriority::NiceToHave => &mut nice,
        };
        bucket.extend(found.canonicals());
    }

    job_skills
        .iter()
        .map(|m| m.canonical.clone())
        .partition(|canonical| must.contains(canonical) || !nice.contains(canonical))
}
