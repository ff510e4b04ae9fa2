//! Phrase matching of extracted text against a vocabulary
//!
//! Text is normalized the way PDF extraction output needs it: lowercase,
//! hyphenated line breaks joined (`infor-\nmation` → `information`), other
//! line breaks turned into spaces, then split on whitespace.
//!
//! A single-word term matches if the word occurs anywhere. A multi-word term
//! matches only if its words occur adjacent and in order (an n-gram match);
//! all words being present somewhere in the document is not enough.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::vocabulary::Vocabulary;

/// Split extracted text into normalized word tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .replace("\r\n", "\n")
        .replace("-\n", "")
        .replace('\n', " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Vocabulary terms found in one document, in vocabulary order.
///
/// Unique by construction: each vocabulary term is tested once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchResult(Vec<String>);

impl MatchResult {
    pub fn terms(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, term: &str) -> bool {
        self.0.iter().any(|t| t == term)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for MatchResult {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Return the vocabulary terms present in `text`.
///
/// Pure: the same inputs always give the same result. Empty text gives an
/// empty result.
pub fn match_terms(text: &str, vocabulary: &Vocabulary) -> MatchResult {
    let tokens = tokenize(text);
    if tokens.is_empty() {
        return MatchResult::default();
    }
    let present: FxHashSet<&str> = tokens.iter().map(String::as_str).collect();

    vocabulary
        .terms()
        .iter()
        .filter(|term| {
            let words = term.tokens();
            // Cheap reject before scanning windows
            if !words.iter().all(|w| present.contains(w.as_str())) {
                return false;
            }
            term.arity() == 1 || contains_ngram(&tokens, words)
        })
        .map(|term| term.text().to_string())
        .collect()
}

/// Whether `needle` occurs as a contiguous run in `haystack`
fn contains_ngram(haystack: &[String], needle: &[String]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}
