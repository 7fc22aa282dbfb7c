//! Removes company boilerplate from a job description so that perks, culture blurbs
//! and legal footers do not contribute skills or semantic weight.
//!
//! A boilerplate section starts at a line whose leading words are a known heading
//! ("About us:", "Benefits", "Why join us?") and runs until a blank line or a line
//! that opens a requirements, responsibilities or qualifications section.
//! Everything from an equal-opportunity statement onward is dropped.

use std::sync::LazyLock;

use regex::Regex;

static BOILERPLATE_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:about\s+(?:the\s+)?company|about\s+us|company\s+overview|why\s+join\s+us|our\s+culture|benefits|perks|(?:what\s+)?we\s+offer)\s*(?:[:?!-]|$)",
    )
    .expect("valid boilerplate heading regex")
});

static SECTION_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:requirements|responsibilities|qualifications)\b")
        .expect("valid section heading regex")
});

static EQUAL_OPPORTUNITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bequal\s+opportunity\b").expect("valid equal opportunity regex")
});

/// Returns `text` without boilerplate sections. Line structure of the kept text is preserved.
pub fn clean_job_description(text: &str) -> String {
    let text = match EQUAL_OPPORTUNITY.find(text) {
        Some(footer) => &text[..footer.start()],
        None => text,
    };

    let mut kept: Vec<&str> = Vec::new();
    let mut skipping = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            skipping = false;
            kept.push("");
            continue;
        }

        if BOILERPLATE_HEADING.is_match(trimmed) {
            // "About us: ... Requirements: Rust" keeps the tail.
            match SECTION_HEADING.find(trimmed) {
                Some(section) => {
                    skipping = false;
                    kept.push(&trimmed[section.start()..]);
                }
                None => skipping = true,
            }
            continue;
        }

        if skipping && SECTION_HEADING.find(trimmed).is_some_and(|m| m.start() == 0) {
            skipping = false;
        }
        if !skipping {
            kept.push(line);
        }
    }

    kept.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_about_paragraph_is_removed() {
        let jd = "Backend Engineer\n\nAbout the company\nWe ship Kafka-powered fintech.\nFounded in 2012.\n\nRequirements: Rust, PostgreSQL";
        let cleaned = clean_job_description(jd);

        assert!(!cleaned.contains("Kafka"));
        assert!(!cleaned.contains("2012"));
        assert!(cleaned.contains("Backend Engineer"));
        assert!(cleaned.contains("Requirements: Rust, PostgreSQL"));
    }

    #[test]
    fn test_single_line_about_section_is_removed() {
        let jd = "Required: Java, Spring Boot, SQL.\nAbout Us: Fast-paced startup running Python on AWS.";
        let cleaned = clean_job_description(jd);
        assert_eq!(cleaned, "Required: Java, Spring Boot, SQL.");
    }

    #[test]
    fn test_requirements_line_ends_boilerplate_without_blank_line() {
        let jd = "Benefits:\nFree lunch, Docker swag\nRequirements:\nGolang, Kubernetes";
        let cleaned = clean_job_description(jd);

        assert!(!cleaned.contains("Docker"));
        assert!(cleaned.starts_with("Requirements:"));
        assert!(cleaned.contains("Golang, Kubernetes"));
    }

    #[test]
    fn test_heading_followed_by_requirements_on_same_line_keeps_tail() {
        let jd = "Why join us? Great team. Requirements: Terraform and AWS";
        assert_eq!(clean_job_description(jd), "Requirements: Terraform and AWS");
    }

    #[test]
    fn test_equal_opportunity_footer_is_truncated() {
        let jd = "Must have Python.\n\nEqual opportunity employer. Our HR team uses Salesforce.";
        assert_eq!(clean_job_description(jd), "Must have Python.");
    }

    #[test]
    fn test_heading_words_inside_a_sentence_are_kept() {
        let jd = "Experience with benefits administration systems in Python\nYou will learn what we offer customers";
        assert_eq!(clean_job_description(jd), jd);
    }

    #[test]
    fn test_empty_text_stays_empty() {
        assert_eq!(clean_job_description(""), "");
        assert_eq!(clean_job_description("\n\n  \n"), "");
    }
}
