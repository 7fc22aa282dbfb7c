pub mod config;
pub mod engine;
pub mod errors;
pub mod extraction;
pub mod gap;
pub mod job;
pub mod models;
pub mod scoring;
pub mod telemetry;
pub mod text;
pub mod vocabulary;

pub use config::Config;
pub use engine::{MatchEngine, MatchPolicy};
pub use errors::{ConfigurationError, MatchError};
pub use job::{ExperienceRequirement, JobRequirements, SkillPriority};
pub use models::result::{ConfidenceBounds, MatchResult, MatchTelemetry, Verdict};
pub use models::skill::{MatchKind, SkillEntry, SkillMatch, SkillSet};
pub use scoring::semantic::{SemanticScorer, TfIdfCosineScorer};
pub use scoring::weights::{VerdictThresholds, WeightConfig};
pub use vocabulary::{build_vocabulary, Vocabulary, VocabularyArtifact};
