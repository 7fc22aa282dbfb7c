//! Resolves n-grams of a normalized document against the skill vocabulary.
//!
//! Algorithm:
//! 1. Exact pass: walk n-grams left to right, longest window first at each position.
//!    A hit covers its tokens; overlapping windows are not considered again
//!    (leftmost-longest wins).
//! 2. Compound pass: a still-uncovered single token joined by `/` or `-`
//!    (`python/django`, `kubernetes-based`) is split into parts. The parts joined by
//!    spaces are tried first, then each part on its own. Any hit covers the token.
//! 3. Fuzzy pass: uncovered n-grams of at least `min_fuzzy_chars` are compared against
//!    variants within `max_length_delta` characters (and, by default, the same initial).
//!    The best candidate at or above `acceptance_threshold` becomes a fuzzy match.
//! 4. Dedup: one match per canonical skill. Exact beats fuzzy; otherwise higher confidence wins.
//!
//! Tie-break between different skills with equal similarity: longer common substring with
//! the n-gram, then lexically smaller canonical name.

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::debug;

use crate::extraction::policy::FuzzyPolicy;
use crate::models::skill::{MatchKind, SkillMatch, SkillSet};
use crate::text::normalizer::{NGram, NormalizedDocument};
use crate::vocabulary::Vocabulary;

/// Similarities closer than this are treated as equal for tie-breaking.
const SIMILARITY_EPSILON: f64 = 1e-9;

const COMPOUND_SEPARATORS: [char; 2] = ['/', '-'];

/// Extracts the canonical skills present in `doc`. Empty documents yield an empty set.
pub fn extract(
    doc: &NormalizedDocument,
    vocabulary: &Vocabulary,
    policy: &FuzzyPolicy,
) -> SkillSet {
    let mut collector = Collector::default();
    let mut covered = vec![false; doc.tokens.len()];

    for ngram in &doc.ngrams {
        if is_covered(&covered, ngram) {
            continue;
        }
        if let Some(entry) = vocabulary.resolve(&ngram.text) {
            cover(&mut covered, ngram);
            collector.record(SkillMatch {
                canonical: entry.canonical.clone(),
                kind: MatchKind::Exact,
                confidence: 1.0,
                surface: ngram.text.clone(),
                position: ngram.start,
            });
        }
    }

    for ngram in doc.ngrams.iter().filter(|ngram| ngram.len == 1) {
        if is_covered(&covered, ngram) || !ngram.text.contains(COMPOUND_SEPARATORS) {
            continue;
        }
        let hits = compound_parts(&ngram.text, vocabulary);
        if hits.is_empty() {
            continue;
        }
        cover(&mut covered, ngram);
        for (part, canonical) in hits {
            collector.record(SkillMatch {
                canonical: canonical.to_string(),
                kind: MatchKind::Exact,
                confidence: 1.0,
                surface: part,
                position: ngram.start,
            });
        }
    }

    if policy.enabled {
        let mut cache: HashMap<&str, Option<Candidate<'_>>> = HashMap::new();

        for ngram in &doc.ngrams {
            if is_covered(&covered, ngram) || !is_fuzzy_eligible(&ngram.text, policy) {
                continue;
            }

            let best = *cache
                .entry(ngram.text.as_str())
                .or_insert_with(|| best_candidate(&ngram.text, vocabulary, policy));

            if let Some(candidate) = best {
                debug!(
                    "Fuzzy skill match: '{}' → {} (similarity {:.3})",
                    ngram.text, candidate.canonical, candidate.similarity
                );
                cover(&mut covered, ngram);
                collector.record(SkillMatch {
                    canonical: candidate.canonical.to_string(),
                    kind: MatchKind::Fuzzy,
                    confidence: policy.confidence_for(candidate.similarity),
                    surface: ngram.text.clone(),
                    position: ngram.start,
                });
            }
        }
    }

    collector.finish()
}

/// Exact hits inside a `/` or `-` joined token, as `(surface, canonical)` in token order.
fn compound_parts<'v>(token: &str, vocabulary: &'v Vocabulary) -> Vec<(String, &'v str)> {
    let parts: Vec<&str> = token
        .split(COMPOUND_SEPARATORS)
        .filter(|part| !part.is_empty())
        .collect();
    if parts.len() < 2 {
        return Vec::new();
    }

    let spaced = parts.join(" ");
    if let Some(entry) = vocabulary.resolve(&spaced) {
        return vec![(spaced, entry.canonical.as_str())];
    }

    parts
        .into_iter()
        .filter_map(|part| {
            vocabulary
                .resolve(part)
                .map(|entry| (part.to_string(), entry.canonical.as_str()))
        })
        .collect()
}

fn is_covered(covered: &[bool], ngram: &NGram) -> bool {
    covered[ngram.start..ngram.end()].iter().any(|&c| c)
}

fn cover(covered: &mut [bool], ngram: &NGram) {
    covered[ngram.start..ngram.end()].fill(true);
}

fn is_fuzzy_eligible(text: &str, policy: &FuzzyPolicy) -> bool {
    text.chars().count() >= policy.min_fuzzy_chars
        && text.chars().any(|c| c.is_ascii_alphabetic())
}

// ────────────────────────────────────────────────────────────────────────────
// Fuzzy candidate selection
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct Candidate<'v> {
    canonical: &'v str,
    similarity: f64,
    /// Longest common substring (chars) between the n-gram and the variant.
    overlap: usize,
}

impl Candidate<'_> {
    fn beats(&self, other: &Candidate<'_>) -> bool {
        if (self.similarity - other.similarity).abs() > SIMILARITY_EPSILON {
            return self.similarity > other.similarity;
        }
        match self.overlap.cmp(&other.overlap) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => self.canonical < other.canonical,
        }
    }
}

fn best_candidate<'v>(
    text: &str,
    vocabulary: &'v Vocabulary,
    policy: &FuzzyPolicy,
) -> Option<Candidate<'v>> {
    let len = text.chars().count();
    let initial = text.chars().next();
    let lengths = len.saturating_sub(policy.max_length_delta)..=len + policy.max_length_delta;

    let mut best: Option<Candidate<'v>> = None;

    for (variant, entry) in vocabulary.variants_with_length(lengths) {
        if policy.require_same_initial && variant.key.chars().next() != initial {
            continue;
        }

        let similarity = policy.metric.similarity(text, &variant.key);
        if similarity < policy.acceptance_threshold {
            continue;
        }

        let candidate = Candidate {
            canonical: &entry.canonical,
            similarity,
            overlap: longest_common_substring(text, &variant.key),
        };
        if best.map_or(true, |current| candidate.beats(&current)) {
            best = Some(candidate);
        }
    }

    best
}

/// Length in chars of the longest contiguous run shared by `a` and `b`.
fn longest_common_substring(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut prev = vec![0usize; b.len() + 1];
    let mut longest = 0;

    for &ca in &a {
        let mut row = vec![0usize; b.len() + 1];
        for (j, &cb) in b.iter().enumerate() {
            if ca == cb {
                row[j + 1] = prev[j] + 1;
                longest = longest.max(row[j + 1]);
            }
        }
        prev = row;
    }

    longest
}

// ────────────────────────────────────────────────────────────────────────────
// Deduplication
// ────────────────────────────────────────────────────────────────────────────

struct Slot {
    first_seen: usize,
    best: SkillMatch,
}

#[derive(Default)]
struct Collector {
    slots: Vec<Slot>,
    by_canonical: HashMap<String, usize>,
}

impl Collector {
    fn record(&mut self, candidate: SkillMatch) {
        match self.by_canonical.get(&candidate.canonical) {
            Some(&i) => {
                let slot = &mut self.slots[i];
                slot.first_seen = slot.first_seen.min(candidate.position);
                if candidate.outranks(&slot.best) {
                    slot.best = candidate;
                }
            }
            None => {
                self.by_canonical
                    .insert(candidate.canonical.clone(), self.slots.len());
                self.slots.push(Slot {
                    first_seen: candidate.position,
                    best: candidate,
                });
            }
        }
    }

    fn finish(mut self) -> SkillSet {
        // Stable: equal positions keep discovery order.
        self.slots.sort_by_key(|slot| slot.first_seen);
        let matches = self
            .slots
            .into_iter()
            .map(|slot| SkillMatch {
                position: slot.first_seen,
                ..slot.best
            })
            .collect();
        SkillSet::from_ordered(matches)
    }
}
