//! Paperscan Crawl - keyword crawl over a sequentially numbered paper archive
//!
//! Enumerates candidate identifiers (venue, year, submission type, sequence
//! number), fetches each document, extracts its text and reports which
//! vocabulary terms it contains. A not-found result ends a group early.
//!
//! # Features
//!
//! - Skip-ahead pruning on the first missing sequence number per group
//! - Partitioned parallel crawl with rayon
//! - Phrase (n-gram) matching tolerant of hyphenated line breaks
//! - JSON Lines output
//!
//! # Example
//!
//! ```ignore
//! use paperscan_core::{HttpFetcher, ProgressContext};
//! use paperscan_crawl::{CrawlConfig, PdfToText, Vocabulary, run};
//!
//! let config = CrawlConfig { workers: 4, ..Default::default() };
//! let vocabulary = Vocabulary::load("wordlist.txt".as_ref())?;
//! let fetcher = HttpFetcher::new(Duration::from_secs(60), config.archive.soft_404_url.clone())?;
//! let output = run(&config, &vocabulary, &fetcher, &PdfToText::default(), &ProgressContext::new())?;
//! println!("{} documents", output.records.len());
//! ```

pub mod candidate;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod extract;
pub mod matcher;
pub mod report;
pub mod runner;
pub mod sink;
pub mod stats;
pub mod vocabulary;
pub mod worker;

// Re-exports
pub use candidate::{Candidate, check_space, generate};
pub use config::{Archive, CrawlConfig, split_list};
pub use dispatch::{PartitionPolicy, partition};
pub use error::{ConfigError, ExtractionError, PartitionError};
pub use extract::{ExtractText, PdfToText};
pub use matcher::{MatchResult, match_terms};
pub use report::TermCounts;
pub use runner::{RunOutput, run};
pub use sink::{ResultRecord, read_jsonl, write_jsonl};
pub use stats::Summary;
pub use vocabulary::Vocabulary;
