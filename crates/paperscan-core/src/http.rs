//! HTTP fetch with not-found classification.
//!
//! Uses async reqwest internally, but presents a sync interface for
//! compatibility with rayon workers. Redirects are followed so that a soft
//! not-found (redirect to the archive's 404 page) can be recognised by the
//! final URL.

use std::sync::LazyLock;
use std::time::Duration;

use crate::fetch::{Fetch, FetchOutcome};

/// Connect timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Error types for HTTP operations
#[derive(Debug)]
pub enum HttpError {
    /// HTTP error with optional status code
    Http {
        status: Option<u16>,
        message: String,
    },
    /// Client construction failed
    Client(String),
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http {
                status: Some(s),
                message,
            } => write!(f, "HTTP {s}: {message}"),
            Self::Http {
                status: None,
                message,
            } => write!(f, "HTTP error: {message}"),
            Self::Client(message) => write!(f, "HTTP client: {message}"),
        }
    }
}

impl std::error::Error for HttpError {}

impl HttpError {
    /// Create HTTP error from reqwest error
    pub fn from_reqwest(e: &reqwest::Error) -> Self {
        Self::Http {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}

/// Shared tokio runtime for HTTP operations.
pub static SHARED_RUNTIME: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
});

/// How a completed HTTP response maps onto a fetch outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass {
    /// Body should be read and returned as `Found`
    Document,
    /// 404 or soft-404 redirect
    NotFound,
    /// Any other non-success status
    Failed(u16),
}

/// Classify a response by status and final (post-redirect) URL.
///
/// Both a literal 404 and a redirect that lands on `soft_404_url` count as
/// not-found; the pruning heuristic depends on seeing either one.
pub fn classify(final_url: &str, status: u16, soft_404_url: Option<&str>) -> ResponseClass {
    if status == 404 {
        return ResponseClass::NotFound;
    }
    if soft_404_url.is_some_and(|target| same_url(final_url, target)) {
        return ResponseClass::NotFound;
    }
    if (200..300).contains(&status) {
        ResponseClass::Document
    } else {
        ResponseClass::Failed(status)
    }
}

/// URL equality ignoring a trailing slash
fn same_url(a: &str, b: &str) -> bool {
    a.trim_end_matches('/') == b.trim_end_matches('/')
}

/// Blocking [`Fetch`] implementation over a pooled reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    soft_404_url: Option<String>,
}

impl HttpFetcher {
    /// Build a fetcher with a per-request timeout.
    ///
    /// A zero timeout is rejected: every request would fail as a transport
    /// error and nothing would ever be pruned.
    pub fn new(request_timeout: Duration, soft_404_url: Option<String>) -> Result<Self, HttpError> {
        if request_timeout.is_zero() {
            return Err(HttpError::Client(
                "request timeout must be greater than zero".to_string(),
            ));
        }
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(request_timeout)
            .pool_max_idle_per_host(8)
            .build()
            .map_err(|e| HttpError::Client(e.to_string()))?;
        Ok(Self {
            client,
            soft_404_url,
        })
    }

    async fn fetch_async(&self, url: &str) -> Result<FetchOutcome, HttpError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| HttpError::from_reqwest(&e))?;

        let status = response.status().as_u16();
        match classify(response.url().as_str(), status, self.soft_404_url.as_deref()) {
            ResponseClass::NotFound => Ok(FetchOutcome::NotFound),
            ResponseClass::Failed(status) => Err(HttpError::Http {
                status: Some(status),
                message: format!("unexpected status for {url}"),
            }),
            ResponseClass::Document => {
                let body = response
                    .bytes()
                    .await
                    .map_err(|e| HttpError::from_reqwest(&e))?;
                Ok(FetchOutcome::Found(body.to_vec()))
            }
        }
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> FetchOutcome {
        SHARED_RUNTIME
            .handle()
            .block_on(self.fetch_async(url))
            .unwrap_or_else(|e| FetchOutcome::TransportError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOFT_404: &str = "https://www.aclweb.org/404.shtml";

    #[test]
    fn status_404_is_not_found() {
        assert_eq!(
            classify("http://aclweb.org/anthology/P18-1999.pdf", 404, None),
            ResponseClass::NotFound
        );
    }

    #[test]
    fn redirect_to_soft_404_is_not_found() {
        assert_eq!(
            classify(SOFT_404, 200, Some(SOFT_404)),
            ResponseClass::NotFound
        );
        assert_eq!(
            classify("https://www.aclweb.org/404.shtml/", 200, Some(SOFT_404)),
            ResponseClass::NotFound
        );
    }

    #[test]
    fn ok_is_document() {
        assert_eq!(
            classify(
                "https://aclanthology.org/P18-1001.pdf",
                200,
                Some(SOFT_404)
            ),
            ResponseClass::Document
        );
    }

    #[test]
    fn server_error_is_failed() {
        assert_eq!(
            classify("http://x/P18-1001.pdf", 503, None),
            ResponseClass::Failed(503)
        );
    }

    #[test]
    fn forbidden_is_not_pruning() {
        // Only 404 may prune; 403 stays a transport failure
        assert_eq!(
            classify("http://x/P18-1001.pdf", 403, Some(SOFT_404)),
            ResponseClass::Failed(403)
        );
    }

    #[test]
    fn display_http_with_status() {
        let err = HttpError::Http {
            status: Some(500),
            message: "test".to_string(),
        };
        assert_eq!(format!("{err}"), "HTTP 500: test");
    }

    #[test]
    fn display_http_without_status() {
        let err = HttpError::Http {
            status: None,
            message: "timeout".to_string(),
        };
        assert_eq!(format!("{err}"), "HTTP error: timeout");
    }

    #[test]
    fn fetcher_builds() {
        assert!(HttpFetcher::new(Duration::from_secs(5), Some(SOFT_404.into())).is_ok());
    }

    #[test]
    fn zero_timeout_rejected() {
        let err = HttpFetcher::new(Duration::ZERO, None).unwrap_err();
        assert!(matches!(err, HttpError::Client(_)));
        assert!(err.to_string().contains("greater than zero"));
    }

    fn local_fetcher(server: &mockito::ServerGuard) -> HttpFetcher {
        HttpFetcher::new(
            Duration::from_secs(5),
            Some(format!("{}/404.shtml", server.url())),
        )
        .unwrap()
    }

    #[test]
    fn redirect_to_soft_404_fetches_as_not_found() {
        let mut server = mockito::Server::new();
        let redirect = server
            .mock("GET", "/anthology/P18-1999.pdf")
            .with_status(302)
            .with_header("location", &format!("{}/404.shtml", server.url()))
            .expect(1)
            .create();
        let landing = server
            .mock("GET", "/404.shtml")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html>Page not found</html>")
            .expect(1)
            .create();

        let fetcher = local_fetcher(&server);
        let outcome = fetcher.fetch(&format!("{}/anthology/P18-1999.pdf", server.url()));

        assert_eq!(outcome, FetchOutcome::NotFound);
        redirect.assert();
        landing.assert();
    }

    #[test]
    fn status_codes_map_to_outcomes() {
        let mut server = mockito::Server::new();
        let _found = server
            .mock("GET", "/anthology/P18-1001.pdf")
            .with_status(200)
            .with_body("%PDF-1.4")
            .create();
        let _missing = server
            .mock("GET", "/anthology/P18-1002.pdf")
            .with_status(404)
            .create();
        let _broken = server
            .mock("GET", "/anthology/P18-1003.pdf")
            .with_status(503)
            .create();

        let fetcher = local_fetcher(&server);
        let url = |id: &str| format!("{}/anthology/{id}.pdf", server.url());

        assert_eq!(
            fetcher.fetch(&url("P18-1001")),
            FetchOutcome::Found(b"%PDF-1.4".to_vec())
        );
        assert_eq!(fetcher.fetch(&url("P18-1002")), FetchOutcome::NotFound);
        assert!(matches!(
            fetcher.fetch(&url("P18-1003")),
            FetchOutcome::TransportError(msg) if msg.contains("503")
        ));
    }
}
