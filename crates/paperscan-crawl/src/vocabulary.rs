//! Vocabulary loading
//!
//! Word list format: one term per line, terms may contain spaces (phrases).
//! Blank lines and lines starting with `#` are ignored; terms are trimmed
//! and lowercased.

use std::path::Path;

use anyhow::{Context, Result};
use rustc_hash::FxHashSet;

use crate::error::ConfigError;

/// A vocabulary term with its pre-split word tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    text: String,
    tokens: Vec<String>,
}

impl Term {
    /// Normalized term text (lowercase, single spaces)
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Number of words; > 1 means phrase matching
    pub fn arity(&self) -> usize {
        self.tokens.len()
    }
}

/// Ordered, de-duplicated set of search terms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    terms: Vec<Term>,
}

impl Vocabulary {
    /// Build from raw terms, keeping first-seen order.
    pub fn new<I, S>(terms: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = FxHashSet::default();
        let mut out = Vec::new();
        for raw in terms {
            let tokens: Vec<String> = raw
                .as_ref()
                .to_lowercase()
                .split_whitespace()
                .map(str::to_string)
                .collect();
            if tokens.is_empty() {
                continue;
            }
            let text = tokens.join(" ");
            if seen.insert(text.clone()) {
                out.push(Term { text, tokens });
            }
        }
        if out.is_empty() {
            return Err(ConfigError::EmptyVocabulary);
        }
        Ok(Self { terms: out })
    }

    /// Parse word list text, dropping blank and `#` comment lines.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Self::new(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Read and parse a word list file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read word list: {}", path.display()))?;
        let vocabulary = Self::parse(&content)
            .with_context(|| format!("Invalid word list: {}", path.display()))?;
        log::info!("Loaded {} terms from {}", vocabulary.len(), path.display());
        Ok(vocabulary)
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Term texts in vocabulary order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(Term::text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_drops_comments_and_blanks() {
        let v = Vocabulary::parse("# header\nBERT\n\n  Machine Learning  \n#skip me\nfun\n").unwrap();
        assert_eq!(
            v.texts().collect::<Vec<_>>(),
            vec!["bert", "machine learning", "fun"]
        );
    }

    #[test]
    fn phrase_tokens() {
        let v = Vocabulary::parse("neural   machine translation").unwrap();
        let term = &v.terms()[0];
        assert_eq!(term.text(), "neural machine translation");
        assert_eq!(term.tokens(), ["neural", "machine", "translation"]);
        assert_eq!(term.arity(), 3);
    }

    #[test]
    fn duplicates_collapse() {
        let v = Vocabulary::new(["LSTM", "lstm", "Lstm "]).unwrap();
        assert_eq!(v.len(), 1);
    }

    #[test]
    fn empty_is_error() {
        assert_eq!(
            Vocabulary::parse("# only comments\n\n"),
            Err(ConfigError::EmptyVocabulary)
        );
        assert_eq!(
            Vocabulary::new(Vec::<String>::new()),
            Err(ConfigError::EmptyVocabulary)
        );
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("words.txt");
        std::fs::write(&path, "attention\ntransformer\n").unwrap();
        let v = Vocabulary::load(&path).unwrap();
        assert_eq!(v.len(), 2);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(Vocabulary::load(&dir.path().join("nope.txt")).is_err());
    }
}
