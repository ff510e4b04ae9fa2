//! Crawl subcommand - fetch, extract, match, write JSON Lines

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use paperscan_core::{HttpFetcher, SharedProgress};
use paperscan_crawl::{PartitionPolicy, Vocabulary, write_jsonl};

use super::SelectionArgs;
use crate::config::Config;

#[derive(Args, Debug)]
pub struct CrawlArgs {
    /// Word list: one term or phrase per line, `#` for comments
    pub wordlist: PathBuf,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Number of parallel workers
    #[arg(short = 'j', long = "jobs")]
    pub jobs: Option<usize>,

    /// Deal candidates round-robin instead of in contiguous blocks
    #[arg(long)]
    pub striped: bool,

    /// Output file (JSON Lines)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: CrawlArgs, config: &Config, progress: &SharedProgress) -> Result<()> {
    config.validate().context("Invalid configuration")?;

    let workers = args.jobs.unwrap_or(config.workers.default);
    if workers > config.workers.max {
        anyhow::bail!(
            "--jobs {workers} exceeds the configured maximum of {}",
            config.workers.max
        );
    }
    let policy = if args.striped {
        PartitionPolicy::Striped
    } else {
        config.workers.policy
    };
    let output = args
        .output
        .unwrap_or_else(|| config.output.path.clone());

    let vocabulary = Vocabulary::load(&args.wordlist)?;
    let crawl_config = args.selection.crawl_config(config, workers, policy);

    let fetcher = HttpFetcher::new(
        Duration::from_secs(config.http.timeout_secs),
        crawl_config.archive.soft_404_url.clone(),
    )
    .context("Failed to build HTTP client")?;
    let extractor = config.extract.extractor();

    log::info!("Crawling {}", crawl_config.archive.base_url);
    log::info!("  Output: {}", output.display());
    log::info!("  Workers: {workers} ({policy})");

    let result = paperscan_crawl::run(&crawl_config, &vocabulary, &fetcher, &extractor, progress)?;
    write_jsonl(&output, &result.records)?;

    if progress.is_tty() {
        result.summary.print();
    } else {
        result.summary.log();
    }

    Ok(())
}
