use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Years of experience a job asks for. `max_years` is set only for ranges ("3-5 years").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceRequirement {
    pub min_years: u32,
    pub max_years: Option<u32>,
}

impl fmt::Display for ExperienceRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max_years {
            Some(max) => write!(f, "{}-{} years", self.min_years, max),
            None => write!(f, "{}+ years", self.min_years),
        }
    }
}

/// Tried in order; the first pattern that matches anywhere in the text wins.
/// Ranges come first so "3-5 years" is not read as "5+ years".
static EXPERIENCE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(\d+)[-\s]*(?:to|-)[-\s]*(\d+)\s*years?\s*(?:of\s*)?experience",
        r"(\d+)\+?\s*years?\s*(?:of\s*)?experience",
        r"minimum\s*(\d+)\s*years?\s*experience",
        r"at\s*least\s*(\d+)\s*years?\s*experience",
        r"(\d+)\s*years?\s*minimum\s*experience",
        r"experience:\s*(\d+)[-\s]*(?:to|-)[-\s]*(\d+)\s*years?",
        r"experience:\s*(\d+)\+?\s*years?",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid experience regex"))
    .collect()
});

/// Reads the required years of experience from a job description, if it states them.
pub fn extract_experience_required(text: &str) -> Option<ExperienceRequirement> {
    let lower = text.to_lowercase();
    EXPERIENCE_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(&lower).and_then(|caps| from_captures(&caps)))
}

fn from_captures(caps: &Captures<'_>) -> Option<ExperienceRequirement> {
    let first: u32 = caps.get(1)?.as_str().parse().ok()?;
    let second: Option<u32> = match caps.get(2) {
        Some(m) => Some(m.as_str().parse().ok()?),
        None => None,
    };

    Some(match second {
        Some(second) => ExperienceRequirement {
            min_years: first.min(second),
            max_years: Some(first.max(second)),
        },
        None => ExperienceRequirement {
            min_years: first,
            max_years: None,
        },
    })
}
