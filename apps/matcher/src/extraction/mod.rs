// Skill extraction: normalized document + vocabulary → ordered, duplicate-free skill matches.
// Exact lookup first, pruned fuzzy matching second. Policy lives apart from mechanism.

pub mod extractor;
pub mod policy;
