//! paperscan - keyword crawler for sequentially numbered paper archives
//!
//! Enumerates proceedings identifiers, downloads each paper, and records
//! which words and phrases from a word list occur in it.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "paperscan")]
#[command(about = "Keyword crawler for sequentially numbered paper archives")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ./paperscan.toml or ~/.config/paperscan/config.toml)
    #[arg(long, global = true)]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Crawl the archive and match every paper against a word list
    Crawl(cmd::crawl::CrawlArgs),
    /// Print candidate URLs without fetching anything
    Candidates(cmd::candidates::CandidatesArgs),
    /// Per-year term counts from a result file
    Report(cmd::report::ReportArgs),
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Progress context (TTY auto-detect)
    let progress = Arc::new(paperscan_core::ProgressContext::new());

    // TTY: warn unless --debug, the bars show activity.
    // Non-TTY: info unless --debug, logs are the only progress output.
    let is_tty = progress.is_tty();
    let multi = if is_tty { Some(progress.multi()) } else { None };
    let quiet = is_tty && !cli.debug;
    paperscan_core::init_logging(
        paperscan_core::Verbosity::from_flags(quiet, cli.debug),
        multi,
    );

    let config = if let Some(path) = cli.config {
        Config::from_file(&path)?
    } else {
        Config::load()?
    };

    match cli.command {
        Command::Crawl(args) => cmd::crawl::run(args, &config, &progress),
        Command::Candidates(args) => cmd::candidates::run(args, &config),
        Command::Report(args) => cmd::report::run(args),
        Command::Config => {
            cmd::show_config(&config);
            Ok(())
        }
    }
}
