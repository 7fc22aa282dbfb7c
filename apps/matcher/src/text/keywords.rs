use std::collections::BTreeSet;

use crate::text::normalizer::NormalizedDocument;
use crate::text::stopwords::is_stopword;

/// Default cap on the number of shared keywords reported per match.
pub const DEFAULT_KEYWORD_LIMIT: usize = 15;

const MIN_KEYWORD_CHARS: usize = 3;

/// Meaningful words shared by both documents, sorted alphabetically.
///
/// A keyword is alphabetic, at least three characters, and not a stopword.
pub fn common_keywords(
    resume: &NormalizedDocument,
    job: &NormalizedDocument,
    limit: usize,
) -> Vec<String> {
    let resume_words: BTreeSet<&str> = meaningful(resume).collect();

    meaningful(job)
        .filter(|w| resume_words.contains(w))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .take(limit)
        .map(str::to_string)
        .collect()
}

fn meaningful(doc: &NormalizedDocument) -> impl Iterator<Item = &str> {
    doc.tokens.iter().map(String::as_str).filter(|t| {
        t.len() >= MIN_KEYWORD_CHARS
            && t.chars().all(|c| c.is_ascii_alphabetic())
            && !is_stopword(t)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::normalizer::normalize;

    #[test]
    fn test_shared_meaningful_words_are_sorted() {
        let resume = normalize("Built scalable payment services with Python and Docker");
        let job = normalize("We need scalable Python services for payment processing");
        assert_eq!(
            common_keywords(&resume, &job, DEFAULT_KEYWORD_LIMIT),
            vec!["payment", "python", "scalable", "services"]
        );
    }

    #[test]
    fn test_filters_stopwords_short_and_non_alphabetic_tokens() {
        let resume = normalize("5 years of experience with c++ and go at the bank");
        let job = normalize("5 years of experience with c++ and go at the bank");
        assert_eq!(common_keywords(&resume, &job, 15), vec!["bank"]);
    }

    #[test]
    fn test_respects_limit() {
        let text = "alpha bravo charlie delta echo foxtrot";
        let doc = normalize(text);
        assert_eq!(common_keywords(&doc, &doc, 2), vec!["alpha", "bravo"]);
    }

    #[test]
    fn test_empty_document_has_no_keywords() {
        let doc = normalize("python rust");
        assert!(common_keywords(&doc, &normalize(""), 15).is_empty());
    }
}
