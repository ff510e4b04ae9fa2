//! Error types for the crawl pipeline
//!
//! Per-candidate failures never surface here as run-level errors: transport
//! errors are a [`FetchOutcome`](paperscan_core::FetchOutcome) variant and
//! extraction errors degrade to an empty match set. Only configuration
//! problems and partition crashes are reported as errors.

use std::time::Duration;

/// Invalid or empty configuration. Fatal before any fetch starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyVenues,
    EmptyYears,
    EmptySubmissionTypes,
    ZeroMaxSequence,
    UnknownVenue(String),
    UnknownSubmissionType(String),
    InvalidYear(String),
    ZeroWorkers,
    /// A zero time budget fails every call; the payload names the setting
    ZeroTimeout(&'static str),
    EmptyVocabulary,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyVenues => write!(f, "no venues configured"),
            Self::EmptyYears => write!(f, "no years configured"),
            Self::EmptySubmissionTypes => write!(f, "no submission types configured"),
            Self::ZeroMaxSequence => write!(f, "max sequence number must be at least 1"),
            Self::UnknownVenue(v) => write!(f, "unknown venue: {v}"),
            Self::UnknownSubmissionType(t) => write!(f, "unknown submission type: {t}"),
            Self::InvalidYear(y) => write!(f, "invalid year (expected digits only): {y}"),
            Self::ZeroWorkers => write!(f, "worker count must be at least 1"),
            Self::ZeroTimeout(name) => write!(f, "{name} must be greater than zero"),
            Self::EmptyVocabulary => write!(f, "vocabulary has no terms"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Text extraction failure for one document
#[derive(Debug)]
pub enum ExtractionError {
    /// Could not create or write the staging area
    Staging(std::io::Error),
    /// Could not start the extractor process
    Spawn(std::io::Error),
    /// Extractor exceeded its time budget and was killed
    Timeout(Duration),
    /// Extractor exited unsuccessfully (corrupt or unsupported document)
    Failed { status: Option<i32> },
    /// Extractor settings that would fail every document
    Config(ConfigError),
}

impl std::fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Staging(e) => write!(f, "staging: {e}"),
            Self::Spawn(e) => write!(f, "spawn: {e}"),
            Self::Timeout(d) => write!(f, "timed out after {:.1}s", d.as_secs_f64()),
            Self::Failed { status: Some(code) } => write!(f, "extractor exited with status {code}"),
            Self::Failed { status: None } => write!(f, "extractor terminated by signal"),
            Self::Config(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ExtractionError {}

/// A partition that could not complete (its worker panicked)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionError {
    pub partition: usize,
    pub message: String,
}

impl std::fmt::Display for PartitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "partition {}: {}", self.partition, self.message)
    }
}

impl std::error::Error for PartitionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        assert_eq!(
            ConfigError::UnknownVenue("cvpr".into()).to_string(),
            "unknown venue: cvpr"
        );
        assert_eq!(
            ConfigError::ZeroWorkers.to_string(),
            "worker count must be at least 1"
        );
    }

    #[test]
    fn zero_timeout_display() {
        assert_eq!(
            ConfigError::ZeroTimeout("extract.timeout_secs").to_string(),
            "extract.timeout_secs must be greater than zero"
        );
    }

    #[test]
    fn extraction_timeout_display() {
        let err = ExtractionError::Timeout(Duration::from_millis(1500));
        assert_eq!(err.to_string(), "timed out after 1.5s");
    }

    #[test]
    fn extraction_failed_display() {
        assert_eq!(
            ExtractionError::Failed { status: Some(1) }.to_string(),
            "extractor exited with status 1"
        );
        assert!(ExtractionError::Failed { status: None }
            .to_string()
            .contains("signal"));
    }

    #[test]
    fn partition_error_display() {
        let err = PartitionError {
            partition: 3,
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "partition 3: boom");
    }
}
