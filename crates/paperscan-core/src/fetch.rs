//! Fetch capability consumed by crawl workers

/// Result of fetching one document URL.
///
/// `NotFound` is an expected outcome, not a failure: it drives the
/// skip-ahead heuristic in the crawl worker. Only `NotFound` may prune.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Document body
    Found(Vec<u8>),
    /// HTTP 404, or a redirect to the archive's not-found page
    NotFound,
    /// Network or HTTP failure other than not-found
    TransportError(String),
}

/// Synchronous document fetcher.
///
/// Called from rayon worker threads, so implementations must be `Sync`.
/// Each call blocks until the outcome is known.
pub trait Fetch: Sync {
    fn fetch(&self, url: &str) -> FetchOutcome;
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn fetch(&self, url: &str) -> FetchOutcome {
        (**self).fetch(url)
    }
}
