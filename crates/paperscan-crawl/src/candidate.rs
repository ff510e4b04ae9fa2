//! Candidate identifiers and the identifier space generator

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One not-yet-fetched document identifier, e.g. `P18-1005`.
///
/// Candidates in the same group share (venue, year, submission type) and
/// differ only in `sequence_number`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    pub venue: String,
    pub year: String,
    pub submission_type: String,
    pub sequence_number: u32,
}

impl Candidate {
    pub fn new(venue: &str, year: &str, submission_type: &str, sequence_number: u32) -> Self {
        Self {
            venue: venue.to_string(),
            year: year.to_string(),
            submission_type: submission_type.to_string(),
            sequence_number,
        }
    }

    /// Archive identifier: `{venue}{year}-{type}{seq:03}`
    pub fn id(&self) -> String {
        format!(
            "{}{}-{}{:03}",
            self.venue, self.year, self.submission_type, self.sequence_number
        )
    }

    /// Whether `other` belongs to the same (venue, year, type) group
    pub fn same_group(&self, other: &Self) -> bool {
        self.venue == other.venue
            && self.year == other.year
            && self.submission_type == other.submission_type
    }
}

impl std::fmt::Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.id())
    }
}

/// Check the inputs of [`generate`] without enumerating anything.
pub fn check_space(
    venue_codes: &[String],
    years: &[String],
    type_codes: &[String],
    max_sequence: u32,
) -> Result<(), ConfigError> {
    if venue_codes.is_empty() {
        return Err(ConfigError::EmptyVenues);
    }
    if years.is_empty() {
        return Err(ConfigError::EmptyYears);
    }
    if type_codes.is_empty() {
        return Err(ConfigError::EmptySubmissionTypes);
    }
    if max_sequence == 0 {
        return Err(ConfigError::ZeroMaxSequence);
    }
    if let Some(bad) = years
        .iter()
        .find(|y| y.is_empty() || !y.bytes().all(|b| b.is_ascii_digit()))
    {
        return Err(ConfigError::InvalidYear(bad.clone()));
    }
    Ok(())
}

/// Enumerate every candidate, nested venue → year → type → sequence number.
///
/// Sequence numbers run from 1 to `max_sequence` inclusive. The order is
/// load-bearing: pruning relies on ascending sequence numbers within a group.
pub fn generate(
    venue_codes: &[String],
    years: &[String],
    type_codes: &[String],
    max_sequence: u32,
) -> Result<Vec<Candidate>, ConfigError> {
    check_space(venue_codes, years, type_codes, max_sequence)?;

    let capacity = venue_codes.len() * years.len() * type_codes.len() * max_sequence as usize;
    let mut candidates = Vec::with_capacity(capacity);
    for venue in venue_codes {
        for year in years {
            for stype in type_codes {
                candidates.extend(
                    (1..=max_sequence).map(|seq| Candidate::new(venue, year, stype, seq)),
                );
            }
        }
    }
    log::debug!("Generated {} candidates", candidates.len());
    Ok(candidates)
}
