//! Paperscan Core - Common infrastructure for archive crawlers
//!
//! This crate provides the fetch capability, HTTP transport, logging
//! and progress reporting shared by the crawl pipeline and the CLI.

pub mod fetch;
pub mod http;
pub mod logging;
pub mod progress;

// Re-exports for convenience
pub use fetch::{Fetch, FetchOutcome};
pub use http::{HttpError, HttpFetcher, ResponseClass, SHARED_RUNTIME, classify};
pub use logging::{IndicatifLogger, Verbosity, init_logging};
pub use progress::{ProgressContext, SharedProgress, fmt_num};
