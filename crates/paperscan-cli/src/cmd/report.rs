//! Report subcommand - per-year term counts from a crawl result

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use paperscan_crawl::{TermCounts, Vocabulary, read_jsonl};

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Word list used for the crawl (sets column order)
    pub wordlist: PathBuf,

    /// Result file written by `crawl`
    pub result: PathBuf,
}

pub fn run(args: ReportArgs) -> Result<()> {
    let vocabulary = Vocabulary::load(&args.wordlist)?;
    let records = read_jsonl(&args.result)?;
    log::info!(
        "Read {} records from {}",
        records.len(),
        args.result.display()
    );

    let counts = TermCounts::from_records(&records, &vocabulary);
    println!("{}", counts.format_table());
    Ok(())
}
