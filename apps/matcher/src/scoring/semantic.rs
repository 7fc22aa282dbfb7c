//! Semantic scoring: a pluggable lexical proxy for overall textual relevance.
//!
//! The engine holds an `Arc<dyn SemanticScorer>`; `TfIdfCosineScorer` is the default.

use std::collections::BTreeMap;

use crate::text::normalizer::NormalizedDocument;
use crate::text::stopwords::is_stopword;

/// Scores how related two documents are, in [0, 100].
pub trait SemanticScorer: Send + Sync {
    /// Short label reported in `MatchResult::semantic_backend`.
    fn backend(&self) -> &'static str;

    fn score(&self, resume: &NormalizedDocument, job: &NormalizedDocument) -> f64;
}

/// Cosine similarity over TF-IDF vectors of the two documents.
///
/// Terms are normalized tokens that contain a letter and are not stopwords.
/// IDF uses the smoothed form `ln((1 + n) / (1 + df)) + 1` over the pair (n = 2),
/// so terms unique to one side weigh more than shared ones.
/// Ordered maps keep the floating-point summation order, and so the result, stable.
#[derive(Debug, Clone, Copy, Default)]
pub struct TfIdfCosineScorer;

impl SemanticScorer for TfIdfCosineScorer {
    fn backend(&self) -> &'static str {
        "tfidf-cosine"
    }

    fn score(&self, resume: &NormalizedDocument, job: &NormalizedDocument) -> f64 {
        let resume_tf = term_frequencies(resume);
        let job_tf = term_frequencies(job);
        if resume_tf.is_empty() || job_tf.is_empty() {
            return 0.0;
        }

        let resume_vec = weigh(&resume_tf, &job_tf);
        let job_vec = weigh(&job_tf, &resume_tf);

        let dot: f64 = resume_vec
            .iter()
            .filter_map(|(term, w)| job_vec.get(term).map(|v| w * v))
            .sum();
        let norm = |v: &BTreeMap<&str, f64>| v.values().map(|w| w * w).sum::<f64>().sqrt();
        let denom = norm(&resume_vec) * norm(&job_vec);

        // An empty `f64` sum is -0.0.
        if denom == 0.0 || dot <= 0.0 {
            return 0.0;
        }
        (dot / denom * 100.0).clamp(0.0, 100.0)
    }
}

fn term_frequencies(doc: &NormalizedDocument) -> BTreeMap<&str, f64> {
    let mut tf = BTreeMap::new();
    for token in &doc.tokens {
        if is_stopword(token) || !token.chars().any(|c| c.is_ascii_alphabetic()) {
            continue;
        }
        *tf.entry(token.as_str()).or_insert(0.0) += 1.0;
    }
    tf
}

fn weigh<'a>(tf: &BTreeMap<&'a str, f64>, other: &BTreeMap<&str, f64>) -> BTreeMap<&'a str, f64> {
    const DOCS: f64 = 2.0;
    tf.iter()
        .map(|(&term, &count)| {
            let df = if other.contains_key(term) { 2.0 } else { 1.0 };
            let idf = ((1.0 + DOCS) / (1.0 + df)).ln() + 1.0;
            (term, count * idf)
        })
        .collect()
}
