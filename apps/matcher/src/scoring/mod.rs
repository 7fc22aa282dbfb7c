// Scoring: hard-skill overlap, lexical semantic proxy, weighted final score and verdict.

pub mod scorer;
pub mod semantic;
pub mod weights;
