//! Job-description reading that goes beyond skill extraction: boilerplate removal,
//! must-have / nice-to-have split and the stated years of experience.

pub mod boilerplate;
pub mod experience;
pub mod priority;

use serde::{Deserialize, Serialize};

use crate::extraction::policy::FuzzyPolicy;
use crate::models::skill::SkillSet;
use crate::vocabulary::Vocabulary;

pub use boilerplate::clean_job_description;
pub use experience::{extract_experience_required, ExperienceRequirement};
pub use priority::{classify_clause, split_by_priority, SkillPriority};

/// What a job description asks for beyond its flat skill list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRequirements {
    /// Job skills in job order that are required.
    pub must_have: Vec<String>,
    /// Job skills in job order that are only preferred.
    pub nice_to_have: Vec<String>,
    pub experience: Option<ExperienceRequirement>,
}

impl JobRequirements {
    pub fn priority_of(&self, canonical: &str) -> Option<SkillPriority> {
        if self.must_have.iter().any(|s| s == canonical) {
            Some(SkillPriority::MustHave)
        } else if self.nice_to_have.iter().any(|s| s == canonical) {
            Some(SkillPriority::NiceToHave)
        } else {
            None
        }
    }
}

/// Reads the requirements of a job whose skills were already extracted from `job_text`.
pub fn read_requirements(
    job_text: &str,
    job_skills: &SkillSet,
    vocabulary: &Vocabulary,
    policy: &FuzzyPolicy,
) -> JobRequirements {
    let (must_have, nice_to_have) = split_by_priority(job_text, job_skills, vocabulary, policy);
    JobRequirements {
        must_have,
        nice_to_have,
        experience: extract_experience_required(job_text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::extractor::extract;
    use crate::text::normalizer::normalize;

    // Enterprise-style posting with a labelled requirements line and an about footer.
    const ENTERPRISE_JD: &str = "Software Engineer, Platform Team\n\
        Join our team building microservices. 3-5 years of experience required.\n\
        Required: Java, Spring Boot, SQL. Preferred: Kubernetes, CI/CD experience.\n\
        About Us: Global enterprise running Salesforce and SAP.";

    #[test]
    fn test_read_requirements_on_cleaned_posting() {
        let vocabulary = Vocabulary::bundled().unwrap();
        let policy = FuzzyPolicy::default();
        let cleaned = clean_job_description(ENTERPRISE_JD);
        let skills = extract(&normalize(&cleaned), &vocabulary, &policy);

        let requirements = read_requirements(&cleaned, &skills, &vocabulary, &policy);

        assert_eq!(
            requirements.must_have,
            vec!["Microservices", "Java", "Spring Boot", "SQL"]
        );
        assert_eq!(requirements.nice_to_have, vec!["Kubernetes", "CI/CD"]);
        assert_eq!(
            requirements.experience.map(|e| e.to_string()),
            Some("3-5 years".to_string())
        );
        assert_eq!(
            requirements.priority_of("Kubernetes"),
            Some(SkillPriority::NiceToHave)
        );
        assert_eq!(requirements.priority_of("Rust"), None);
    }

    #[test]
    fn test_empty_job_has_no_requirements() {
        let vocabulary = Vocabulary::bundled().unwrap();
        let requirements =
            read_requirements("", &SkillSet::default(), &vocabulary, &FuzzyPolicy::default());
        assert_eq!(requirements, JobRequirements::default());
    }
}
