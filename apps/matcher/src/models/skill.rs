use serde::{Deserialize, Serialize};

fn default_category() -> String {
    "general".to_string()
}

/// One canonical skill and the surface forms that resolve to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub canonical: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub variants: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Fuzzy,
}

/// A canonical skill detected in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub canonical: String,
    pub kind: MatchKind,
    /// 1.0 for exact; similarity (never below the configured floor) for fuzzy.
    pub confidence: f64,
    /// Normalized n-gram that triggered the match.
    pub surface: String,
    /// Token index of the first appearance of this canonical skill.
    pub position: usize,
}

impl SkillMatch {
    pub fn is_exact(&self) -> bool {
        self.kind == MatchKind::Exact
    }

    /// True when `self` should replace `other` for the same canonical skill.
    /// Exact always outranks fuzzy regardless of numeric confidence.
    pub fn outranks(&self, other: &SkillMatch) -> bool {
        match (self.kind, other.kind) {
            (MatchKind::Exact, MatchKind::Fuzzy) => true,
            (MatchKind::Fuzzy, MatchKind::Exact) => false,
            _ => self.confidence > other.confidence,
        }
    }
}

/// One document's extraction result: one match per canonical skill, ordered by
/// first appearance in the text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet {
    matches: Vec<SkillMatch>,
}

impl SkillSet {
    /// Callers guarantee one entry per canonical skill.
    pub(crate) fn from_ordered(matches: Vec<SkillMatch>) -> Self {
        Self { matches }
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SkillMatch> {
        self.matches.iter()
    }

    pub fn get(&self, canonical: &str) -> Option<&SkillMatch> {
        self.matches.iter().find(|m| m.canonical == canonical)
    }

    pub fn contains(&self, canonical: &str) -> bool {
        self.get(canonical).is_some()
    }

    pub fn canonicals(&self) -> Vec<String> {
        self.matches.iter().map(|m| m.canonical.clone()).collect()
    }

    pub fn as_slice(&self) -> &[SkillMatch] {
        &self.matches
    }
}

impl<'a> IntoIterator for &'a SkillSet {
    type Item = &'a SkillMatch;
    type IntoIter = std::slice::Iter<'a, SkillMatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.iter()
    }
}
