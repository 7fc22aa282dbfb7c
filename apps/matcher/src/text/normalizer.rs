//! Turns free text into a canonical token stream plus 1–3 token n-grams.
//!
//! Lowercases, replaces every character outside `[a-z0-9+#./\- ]` with a space,
//! collapses whitespace and tokenizes. Skill punctuation survives (`c++`, `c#`,
//! `node.js`, `ci/cd`); sentence punctuation hanging off a token does not.

use serde::{Deserialize, Serialize};

/// Longest n-gram window considered for multi-word skill names.
pub const MAX_NGRAM_LEN: usize = 3;

/// A contiguous window of tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NGram {
    pub text: String,
    /// Index of the first token in the window.
    pub start: usize,
    /// Number of tokens in the window (1..=MAX_NGRAM_LEN).
    pub len: usize,
}

impl NGram {
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Per-request normalized view of one input text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedDocument {
    pub tokens: Vec<String>,
    /// Every window, ordered by start position then longest window first.
    pub ngrams: Vec<NGram>,
    /// Character length of the original input.
    pub char_len: usize,
}

impl NormalizedDocument {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens joined by a single space. This is the key form used by the vocabulary index.
    pub fn joined(&self) -> String {
        self.tokens.join(" ")
    }
}

/// Normalizes `text`. Never fails; blank input yields an empty document.
pub fn normalize(text: &str) -> NormalizedDocument {
    let cleaned: String = text
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| if is_kept(c) { c } else { ' ' })
        .collect();

    let tokens: Vec<String> = cleaned
        .split_whitespace()
        .map(trim_token)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    let ngrams = build_ngrams(&tokens);

    NormalizedDocument {
        tokens,
        ngrams,
        char_len: text.chars().count(),
    }
}

fn is_kept(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '+' | '#' | '.' | '/' | '-' | ' ')
}

/// Drops sentence punctuation ("docker." / "-python") while keeping ".net" and "c++".
fn trim_token(token: &str) -> &str {
    token
        .trim_end_matches(['.', '-', '/'])
        .trim_start_matches(['-', '/'])
}

fn build_ngrams(tokens: &[String]) -> Vec<NGram> {
    let mut ngrams = Vec::with_capacity(tokens.len() * MAX_NGRAM_LEN);

    for start in 0..tokens.len() {
        let longest = MAX_NGRAM_LEN.min(tokens.len() - start);
        for len in (1..=longest).rev() {
            ngrams.push(NGram {
                text: tokens[start..start + len].join(" "),
                start,
                len,
            });
        }
    }

    ngrams
}
