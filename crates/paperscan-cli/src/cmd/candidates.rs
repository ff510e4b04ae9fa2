//! Candidates subcommand - dry run listing every URL a crawl would try

use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use clap::Args;

use paperscan_crawl::PartitionPolicy;

use super::SelectionArgs;
use crate::config::Config;

#[derive(Args, Debug)]
pub struct CandidatesArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,
}

pub fn run(args: CandidatesArgs, config: &Config) -> Result<()> {
    let crawl_config = args
        .selection
        .crawl_config(config, 1, PartitionPolicy::Contiguous);
    let candidates = crawl_config
        .candidates()
        .context("Invalid candidate selection")?;

    let mut out = BufWriter::new(std::io::stdout().lock());
    for candidate in &candidates {
        writeln!(out, "{}", crawl_config.archive.url(candidate))?;
    }
    out.flush()?;

    log::info!("{} candidates", candidates.len());
    Ok(())
}
