// Text handling shared by extraction and scoring.
// Everything here is pure: identical input always yields identical output.

pub mod keywords;
pub mod normalizer;
pub mod stopwords;
