//! Crawl configuration
//!
//! One parameterized configuration replaces per-venue crawler variants: the
//! archive's URL scheme and code maps live in [`Archive`], the slice of the
//! identifier space to enumerate lives in [`CrawlConfig`].

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::candidate::{Candidate, check_space, generate};
use crate::dispatch::PartitionPolicy;
use crate::error::ConfigError;

/// Default archive host (no trailing slash)
pub const DEFAULT_BASE_URL: &str = "http://aclweb.org/anthology";

/// Page the archive redirects to for missing documents
pub const DEFAULT_SOFT_404_URL: &str = "https://www.aclweb.org/404.shtml";

/// Highest sequence number tried per group by default
pub const DEFAULT_MAX_SEQUENCE: u32 = 999;

/// Archive URL scheme and identifier code maps
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Archive {
    pub base_url: String,
    /// Appended after the zero-padded sequence number (e.g. ".pdf")
    pub suffix: String,
    pub soft_404_url: Option<String>,
    /// Venue name → venue code (e.g. "acl" → "P")
    pub venues: BTreeMap<String, String>,
    /// Submission type name → code (e.g. "l" → "1")
    pub submission_types: BTreeMap<String, String>,
}

impl Default for Archive {
    fn default() -> Self {
        let venues = [("acl", "P"), ("naacl", "N"), ("emnlp", "D")];
        let submission_types = [("l", "1"), ("s", "2")];
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            suffix: ".pdf".to_string(),
            soft_404_url: Some(DEFAULT_SOFT_404_URL.to_string()),
            venues: to_map(&venues),
            submission_types: to_map(&submission_types),
        }
    }
}

fn to_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// Look up a name (case-insensitive) in a code map, also accepting a known
/// code verbatim.
fn resolve<'a>(map: &'a BTreeMap<String, String>, key: &str) -> Option<&'a str> {
    let key = key.trim();
    map.iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, code)| code)
        .or_else(|| map.values().find(|code| code.as_str() == key))
        .map(String::as_str)
}

impl Archive {
    /// Venue code for a venue name or code
    pub fn venue_code(&self, venue: &str) -> Result<&str, ConfigError> {
        resolve(&self.venues, venue).ok_or_else(|| ConfigError::UnknownVenue(venue.to_string()))
    }

    /// Submission type code for a type name or code
    pub fn submission_type_code(&self, stype: &str) -> Result<&str, ConfigError> {
        resolve(&self.submission_types, stype)
            .ok_or_else(|| ConfigError::UnknownSubmissionType(stype.to_string()))
    }

    /// Fetch URL for a candidate:
    /// `{base}/{venue}{year}-{type}{seq:03}{suffix}`
    pub fn url(&self, candidate: &Candidate) -> String {
        format!(
            "{}/{}{}",
            self.base_url.trim_end_matches('/'),
            candidate.id(),
            self.suffix
        )
    }
}

/// Which slice of the identifier space to crawl, and how to split it
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub archive: Archive,
    /// Venue names or codes
    pub venues: Vec<String>,
    /// Two-digit years as they appear in identifiers
    pub years: Vec<String>,
    /// Submission type names or codes
    pub submission_types: Vec<String>,
    pub max_sequence: u32,
    pub workers: usize,
    pub policy: PartitionPolicy,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            archive: Archive::default(),
            venues: split_list("acl,naacl,emnlp"),
            years: split_list("13,14,15,16,17,18,19"),
            submission_types: split_list("l,s"),
            max_sequence: DEFAULT_MAX_SEQUENCE,
            workers: 1,
            policy: PartitionPolicy::Contiguous,
        }
    }
}

impl CrawlConfig {
    /// Check everything that can be checked before any work starts.
    ///
    /// Does not enumerate the candidate space.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        let (venue_codes, type_codes) = self.codes()?;
        check_space(&venue_codes, &self.years, &type_codes, self.max_sequence)
    }

    /// Enumerate the full ordered candidate space.
    pub fn candidates(&self) -> Result<Vec<Candidate>, ConfigError> {
        let (venue_codes, type_codes) = self.codes()?;
        generate(&venue_codes, &self.years, &type_codes, self.max_sequence)
    }

    /// Resolve selected venue and type names to archive codes
    fn codes(&self) -> Result<(Vec<String>, Vec<String>), ConfigError> {
        let venue_codes = self
            .venues
            .iter()
            .map(|v| self.archive.venue_code(v).map(str::to_string))
            .collect::<Result<Vec<_>, _>>()?;
        let type_codes = self
            .submission_types
            .iter()
            .map(|t| self.archive.submission_type_code(t).map(str::to_string))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((venue_codes, type_codes))
    }
}

/// Split a comma-separated CLI list, dropping empty entries
pub fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
