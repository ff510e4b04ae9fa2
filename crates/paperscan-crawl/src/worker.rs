//! Fetch-and-prune worker
//!
//! Processes one partition sequentially. The only state carried between
//! candidates is the previous candidate and its fetch outcome, threaded
//! through a fold so partitions stay independent.
//!
//! Skip-ahead rule: after a not-found, later candidates of the same group
//! with an equal or higher sequence number are not fetched. Sequence numbers
//! are assumed dense from 1, so the first gap marks the end of the group.
//! A transport error never prunes; it says nothing about whether the
//! document exists.

use std::time::Instant;

use indicatif::ProgressBar;
use paperscan_core::{Fetch, FetchOutcome};

use crate::candidate::Candidate;
use crate::config::Archive;
use crate::extract::ExtractText;
use crate::matcher::{MatchResult, match_terms};
use crate::sink::ResultRecord;
use crate::stats::PartitionStats;
use crate::vocabulary::Vocabulary;

/// Fetch outcome without the payload, kept for the pruning decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LastOutcome {
    Found,
    NotFound,
    TransportError,
}

/// Previous (candidate, outcome) pair within a partition
#[derive(Debug, Default, Clone, Copy)]
struct PruneState<'c> {
    last: Option<(&'c Candidate, LastOutcome)>,
}

impl<'c> PruneState<'c> {
    fn skips(&self, candidate: &Candidate) -> bool {
        match self.last {
            Some((prev, LastOutcome::NotFound)) => {
                prev.same_group(candidate) && prev.sequence_number <= candidate.sequence_number
            }
            _ => false,
        }
    }

    fn after(candidate: &'c Candidate, outcome: LastOutcome) -> Self {
        Self {
            last: Some((candidate, outcome)),
        }
    }
}

/// Fold accumulator for one partition
struct PartitionRun<'c> {
    state: PruneState<'c>,
    records: Vec<ResultRecord>,
    stats: PartitionStats,
}

/// Records and counters produced by one partition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionOutput {
    /// Found documents, in processing order
    pub records: Vec<ResultRecord>,
    pub stats: PartitionStats,
}

/// Shared read-only inputs for every partition
#[derive(Clone, Copy)]
pub struct Worker<'a> {
    pub archive: &'a Archive,
    pub vocabulary: &'a Vocabulary,
    pub fetcher: &'a dyn Fetch,
    pub extractor: &'a dyn ExtractText,
}

impl std::fmt::Debug for Worker<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worker")
            .field("base_url", &self.archive.base_url)
            .field("terms", &self.vocabulary.len())
            .finish_non_exhaustive()
    }
}

impl<'a> Worker<'a> {
    /// Process one partition start to finish.
    ///
    /// Per-candidate failures are absorbed into the stats; this never fails.
    pub fn process_partition(
        &self,
        partition: usize,
        candidates: &[Candidate],
        pb: &ProgressBar,
    ) -> PartitionOutput {
        let start = Instant::now();
        let init = PartitionRun {
            state: PruneState::default(),
            records: Vec::new(),
            stats: PartitionStats::new(partition, candidates.len()),
        };

        let mut run = candidates.iter().fold(init, |run, candidate| {
            pb.set_message(candidate.id());
            let run = self.step(run, candidate);
            pb.inc(1);
            run
        });

        run.stats.elapsed = start.elapsed();
        PartitionOutput {
            records: run.records,
            stats: run.stats,
        }
    }

    fn step<'c>(&self, mut run: PartitionRun<'c>, candidate: &'c Candidate) -> PartitionRun<'c> {
        let url = self.archive.url(candidate);

        if run.state.skips(candidate) {
            // State carries forward unchanged: the earlier not-found still governs
            log::debug!("Skip downloading {url}");
            run.stats.pruned += 1;
            return run;
        }

        log::debug!("Downloading {url}");
        run.stats.fetched += 1;
        let outcome = match self.fetcher.fetch(&url) {
            FetchOutcome::Found(bytes) => {
                run.stats.found += 1;
                let matched_terms = self.match_document(&url, &bytes, &mut run.stats);
                run.records.push(ResultRecord {
                    candidate: candidate.clone(),
                    url,
                    matched_terms,
                });
                LastOutcome::Found
            }
            FetchOutcome::NotFound => {
                log::debug!("404: {url}");
                run.stats.not_found += 1;
                LastOutcome::NotFound
            }
            FetchOutcome::TransportError(message) => {
                log::warn!("{url}: {message}");
                run.stats.transport_errors += 1;
                LastOutcome::TransportError
            }
        };

        run.state = PruneState::after(candidate, outcome);
        run
    }

    /// Extract and match; extraction failure yields an empty result.
    fn match_document(&self, url: &str, bytes: &[u8], stats: &mut PartitionStats) -> MatchResult {
        match self.extractor.extract_text(bytes) {
            Ok(text) => match_terms(&text, self.vocabulary),
            Err(e) => {
                log::warn!("{url}: text extraction failed: {e}");
                stats.extraction_errors += 1;
                MatchResult::default()
            }
        }
    }
}
