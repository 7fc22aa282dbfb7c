pub mod analyzer;

pub use analyzer::{analyze, analyze_with_priorities, summarize_feedback, GapAnalysis};
