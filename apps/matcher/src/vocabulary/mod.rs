//! Skill vocabulary: canonical skill to surface variants, loaded from a versioned JSON artifact.
//!
//! Every canonical name and variant is run through the text normalizer so lookups
//! use the same key form as document n-grams. The canonical name is itself a variant.
//! A key claimed by two different canonical skills is rejected at build time.
//!
//! Immutable after construction; share it across requests as `Arc<Vocabulary>`.

use std::collections::{BTreeMap, HashMap};
use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::ConfigurationError;
use crate::models::skill::SkillEntry;
use crate::text::normalizer::{normalize, MAX_NGRAM_LEN};

/// Artifact shipped with the crate, used when no external vocabulary is configured.
pub const BUNDLED_ARTIFACT: &str = include_str!("../../vocabulary/skills.v1.json");

/// On-disk vocabulary format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyArtifact {
    pub version: String,
    pub skills: Vec<SkillEntry>,
}

/// A normalized variant key and the skill it resolves to.
#[derive(Debug, Clone)]
pub struct VariantKey {
    pub key: String,
    pub char_len: usize,
    skill: usize,
}

#[derive(Debug)]
pub struct Vocabulary {
    version: String,
    entries: Vec<SkillEntry>,
    variants: Vec<VariantKey>,
    index: HashMap<String, usize>,
    by_canonical: HashMap<String, usize>,
    /// char length → positions in `variants`, in artifact order.
    by_length: BTreeMap<usize, Vec<usize>>,
}

/// Validates an artifact and builds the lookup indexes.
pub fn build_vocabulary(artifact: VocabularyArtifact) -> Result<Vocabulary, ConfigurationError> {
    if artifact.skills.is_empty() {
        return Err(ConfigurationError::EmptyVocabulary);
    }

    let mut variants: Vec<VariantKey> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut by_canonical: HashMap<String, usize> = HashMap::new();
    let mut seen_canonicals: HashMap<String, usize> = HashMap::new();

    for (skill, entry) in artifact.skills.iter().enumerate() {
        let canonical = entry.canonical.trim();
        if canonical.is_empty() {
            return Err(ConfigurationError::InvalidSkillEntry(format!(
                "skill #{skill} has an empty canonical name"
            )));
        }
        if let Some(&first) = seen_canonicals.get(&canonical.to_lowercase()) {
            return Err(ConfigurationError::AmbiguousVariant {
                variant: canonical.to_lowercase(),
                first: artifact.skills[first].canonical.clone(),
                second: entry.canonical.clone(),
            });
        }
        seen_canonicals.insert(canonical.to_lowercase(), skill);
        by_canonical.insert(entry.canonical.clone(), skill);

        for surface in std::iter::once(&entry.canonical).chain(entry.variants.iter()) {
            let doc = normalize(surface);
            if doc.is_empty() {
                return Err(ConfigurationError::InvalidSkillEntry(format!(
                    "variant '{surface}' of '{canonical}' is empty after normalization"
                )));
            }
            if doc.tokens.len() > MAX_NGRAM_LEN {
                return Err(ConfigurationError::InvalidSkillEntry(format!(
                    "variant '{surface}' of '{canonical}' is longer than {MAX_NGRAM_LEN} words"
                )));
            }

            let key = doc.joined();
            match index.get(&key) {
                Some(&owner) if owner == skill => continue,
                Some(&owner) => {
                    return Err(ConfigurationError::AmbiguousVariant {
                        variant: key,
                        first: artifact.skills[owner].canonical.clone(),
                        second: entry.canonical.clone(),
                    });
                }
                None => {
                    index.insert(key.clone(), skill);
                    variants.push(VariantKey {
                        char_len: key.chars().count(),
                        key,
                        skill,
                    });
                }
            }
        }
    }

    let mut by_length: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (pos, variant) in variants.iter().enumerate() {
        by_length.entry(variant.char_len).or_default().push(pos);
    }

    info!(
        "Skill vocabulary v{} loaded: {} skills, {} variants",
        artifact.version,
        artifact.skills.len(),
        variants.len()
    );

    Ok(Vocabulary {
        version: artifact.version,
        entries: artifact.skills,
        variants,
        index,
        by_canonical,
        by_length,
    })
}

impl Vocabulary {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigurationError> {
        let artifact: VocabularyArtifact = serde_json::from_str(json)?;
        build_vocabulary(artifact)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigurationError> {
        let json = std::fs::read_to_string(path).map_err(|source| {
            ConfigurationError::VocabularyIo {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::from_json_str(&json)
    }

    /// The vocabulary compiled into the crate.
    pub fn bundled() -> Result<Self, ConfigurationError> {
        Self::from_json_str(BUNDLED_ARTIFACT)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    pub fn entries(&self) -> &[SkillEntry] {
        &self.entries
    }

    /// Exact lookup of an already-normalized key.
    pub fn resolve(&self, key: &str) -> Option<&SkillEntry> {
        self.index.get(key).map(|&skill| &self.entries[skill])
    }

    /// Variants whose character length falls in `lengths`, in a stable order.
    pub fn variants_with_length(
        &self,
        lengths: RangeInclusive<usize>,
    ) -> impl Iterator<Item = (&VariantKey, &SkillEntry)> {
        self.by_length
            .range(lengths)
            .flat_map(|(_, positions)| positions.iter())
            .map(move |&pos| {
                let variant = &self.variants[pos];
                (variant, &self.entries[variant.skill])
            })
    }

    pub fn category_of(&self, canonical: &str) -> Option<&str> {
        self.by_canonical
            .get(canonical)
            .map(|&skill| self.entries[skill].category.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(canonical: &str, variants: &[&str]) -> SkillEntry {
        SkillEntry {
            canonical: canonical.to_string(),
            category: "general".to_string(),
            variants: variants.iter().map(|v| v.to_string()).collect(),
        }
    }

    fn artifact(skills: Vec<SkillEntry>) -> VocabularyArtifact {
        VocabularyArtifact {
            version: "test".to_string(),
            skills,
        }
    }

    #[test]
    fn test_canonical_and_variants_resolve_to_same_entry() {
        let vocab = build_vocabulary(artifact(vec![entry(
            "Machine Learning",
            &["ML", "machine-learning"],
        )]))
        .unwrap();

        for key in ["machine learning", "ml", "machine-learning"] {
            assert_eq!(vocab.resolve(key).unwrap().canonical, "Machine Learning");
        }
        assert_eq!(vocab.variant_count(), 3);
    }

    #[test]
    fn test_variant_shared_by_two_skills_is_rejected() {
        let err = build_vocabulary(artifact(vec![
            entry("JavaScript", &["js"]),
            entry("JSON", &["JS"]),
        ]))
        .unwrap_err();

        match err {
            ConfigurationError::AmbiguousVariant {
                variant,
                first,
                second,
            } => {
                assert_eq!(variant, "js");
                assert_eq!(first, "JavaScript");
                assert_eq!(second, "JSON");
            }
            other => panic!("expected AmbiguousVariant, got {other:?}"),
        }
    }

    #[test]
    fn test_variant_colliding_with_other_canonical_is_rejected() {
        let err = build_vocabulary(artifact(vec![
            entry("Go", &[]),
            entry("Golang", &["go"]),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigurationError::AmbiguousVariant { .. }));
    }

    #[test]
    fn test_repeated_variant_within_one_skill_is_collapsed() {
        let vocab = build_vocabulary(artifact(vec![entry("Rust", &["rust", "RUST", "Rust."])]))
            .unwrap();
        assert_eq!(vocab.variant_count(), 1);
    }

    #[test]
    fn test_duplicate_canonical_is_rejected() {
        let err = build_vocabulary(artifact(vec![entry("Rust", &[]), entry("rust ", &["rs"])]))
            .unwrap_err();

        match err {
            ConfigurationError::AmbiguousVariant {
                variant,
                first,
                second,
            } => {
                assert_eq!(variant, "rust");
                assert_eq!(first, "Rust");
                assert_eq!(second, "rust ");
            }
            other => panic!("expected AmbiguousVariant, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_artifact_is_rejected() {
        let err = build_vocabulary(artifact(vec![])).unwrap_err();
        assert!(matches!(err, ConfigurationError::EmptyVocabulary));
    }

    #[test]
    fn test_variant_that_normalizes_to_nothing_is_rejected() {
        let err = build_vocabulary(artifact(vec![entry("Rust", &["!!!"])])).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidSkillEntry(_)));
    }

    #[test]
    fn test_variant_longer_than_three_words_is_rejected() {
        let err = build_vocabulary(artifact(vec![entry(
            "Ruby on Rails",
            &["ruby on the rails"],
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidSkillEntry(_)));
    }

    #[test]
    fn test_variants_with_length_filters_by_char_count() {
        let vocab = build_vocabulary(artifact(vec![
            entry("AWS", &[]),
            entry("Kubernetes", &["k8s"]),
            entry("Docker", &[]),
        ]))
        .unwrap();

        let keys: Vec<&str> = vocab
            .variants_with_length(3..=3)
            .map(|(v, _)| v.key.as_str())
            .collect();
        assert_eq!(keys, vec!["aws", "k8s"]);

        let keys: Vec<&str> = vocab
            .variants_with_length(5..=7)
            .map(|(v, _)| v.key.as_str())
            .collect();
        assert_eq!(keys, vec!["docker"]);
    }

    #[test]
    fn test_bundled_vocabulary_is_valid() {
        let vocab = Vocabulary::bundled().unwrap();
        assert!(!vocab.is_empty());
        assert_eq!(vocab.version(), "2024.11");
        assert_eq!(vocab.resolve("k8s").unwrap().canonical, "Kubernetes");
        assert_eq!(vocab.resolve("c++").unwrap().canonical, "C++");
        assert_eq!(vocab.category_of("Python"), Some("programming"));
    }

    #[test]
    fn test_bundled_vocabulary_keeps_related_tools_apart() {
        let vocab = Vocabulary::bundled().unwrap();
        let pairs = [
            ("powershell", "PowerShell"),
            ("bash", "Bash"),
            ("keras", "Keras"),
            ("tensorflow", "TensorFlow"),
            ("opencv", "OpenCV"),
            ("ubuntu", "Ubuntu"),
            ("linux", "Linux"),
            ("asp.net", "ASP.NET"),
            ("spring", "Spring"),
            ("spring boot", "Spring Boot"),
            ("github actions", "GitHub Actions"),
            ("swiftui", "SwiftUI"),
            ("matplotlib", "Matplotlib"),
            ("bitbucket", "Bitbucket"),
            ("rabbitmq", "RabbitMQ"),
            ("oracle", "Oracle Database"),
        ];
        for (key, canonical) in pairs {
            assert_eq!(vocab.resolve(key).unwrap().canonical, canonical, "key {key:?}");
        }

        // Bare single letters and common English words stay out of the index.
        for key in ["r", "c", "go", "less"] {
            assert!(vocab.resolve(key).is_none(), "key {key:?}");
        }
    }

    #[test]
    fn test_from_path_reads_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skills.json");
        std::fs::write(
            &path,
            r#"{"version": "7", "skills": [{"canonical": "Rust", "category": "programming"}]}"#,
        )
        .unwrap();

        let vocab = Vocabulary::from_path(&path).unwrap();
        assert_eq!(vocab.version(), "7");
        assert_eq!(vocab.len(), 1);
    }

    #[test]
    fn test_from_path_missing_file_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Vocabulary::from_path(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigurationError::VocabularyIo { .. }));
    }

    #[test]
    fn test_malformed_json_reports_parse_error() {
        let err = Vocabulary::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigurationError::VocabularyParse(_)));
    }
}
