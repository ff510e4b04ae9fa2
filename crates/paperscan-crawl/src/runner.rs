//! Crawl runner: validate, partition, fan out, merge

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Instant;

use anyhow::{Context, Result};
use paperscan_core::{Fetch, ProgressContext, fmt_num};
use rayon::prelude::*;

use crate::candidate::Candidate;
use crate::config::CrawlConfig;
use crate::dispatch::partition;
use crate::error::PartitionError;
use crate::extract::ExtractText;
use crate::sink::ResultRecord;
use crate::stats::{PartitionStats, Summary};
use crate::vocabulary::Vocabulary;
use crate::worker::{PartitionOutput, Worker};

/// Everything a finished run produced
#[derive(Debug)]
pub struct RunOutput {
    /// Records of all completed partitions, concatenated in partition order
    pub records: Vec<ResultRecord>,
    pub summary: Summary,
    /// Partitions that died; their candidates have no records
    pub failures: Vec<PartitionError>,
}

/// Run a full crawl.
///
/// Fails only on setup problems (invalid configuration, unusable extractor,
/// thread pool creation). Once workers start, a failing partition is reported
/// in [`RunOutput::failures`] and the others still contribute their records.
pub fn run(
    config: &CrawlConfig,
    vocabulary: &Vocabulary,
    fetcher: &dyn Fetch,
    extractor: &dyn ExtractText,
    progress: &ProgressContext,
) -> Result<RunOutput> {
    let start = Instant::now();

    config.validate().context("Invalid crawl configuration")?;
    extractor
        .preflight()
        .context("Text extractor is not usable")?;

    let candidates = config.candidates().context("Invalid crawl configuration")?;
    let partitions = partition(&candidates, config.workers, config.policy)
        .context("Failed to partition candidates")?;
    log::info!(
        "Crawling {} candidates in {} {} partitions ({} terms)",
        fmt_num(candidates.len()),
        partitions.len(),
        config.policy,
        vocabulary.len()
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .build()
        .context("Failed to create thread pool")?;

    let worker = Worker {
        archive: &config.archive,
        vocabulary,
        fetcher,
        extractor,
    };

    let results: Vec<Result<PartitionOutput, PartitionError>> = pool.install(|| {
        partitions
            .par_iter()
            .enumerate()
            .map(|(idx, part)| run_partition(&worker, idx, part, progress))
            .collect()
    });

    let mut records = Vec::new();
    let mut stats: Vec<PartitionStats> = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(output) => {
                records.extend(output.records);
                stats.push(output.stats);
            }
            Err(e) => {
                log::error!("{e}");
                failures.push(e);
            }
        }
    }

    let summary = Summary::from_partitions(
        &stats,
        candidates.len(),
        partitions.len(),
        failures.len(),
        start.elapsed(),
    );

    Ok(RunOutput {
        records,
        summary,
        failures,
    })
}

fn run_partition(
    worker: &Worker<'_>,
    idx: usize,
    candidates: &[Candidate],
    progress: &ProgressContext,
) -> Result<PartitionOutput, PartitionError> {
    let pb = progress.partition_bar(&format!("partition_{idx:02}"), candidates.len());

    let result = catch_unwind(AssertUnwindSafe(|| {
        worker.process_partition(idx, candidates, &pb)
    }));
    pb.finish_and_clear();

    match result {
        Ok(output) => {
            if !progress.is_tty() {
                output.stats.log();
            }
            Ok(output)
        }
        Err(payload) => Err(PartitionError {
            partition: idx,
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("worker panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("worker panicked: {s}")
    } else {
        "worker panicked".to_string()
    }
}
