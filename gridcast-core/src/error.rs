use reqwest::StatusCode;
use thiserror::Error;

/// Failures the pipeline can end with.
///
/// Every variant is terminal for a run: nothing is retried or recovered
/// mid-pipeline. The binary decides what to log and exits non-zero.
#[derive(Debug, Error)]
pub enum GridcastError {
    /// The location reference dataset could not be fetched or parsed.
    #[error("could not load the locations dataset: {0}")]
    DataUnavailable(String),

    /// No table entry scored at or above the similarity cutoff.
    #[error("no location closely matches {query:?}; try the full \"City, State\" spelling")]
    NotFound { query: String },

    /// A display-key lookup matched zero or several records. More than one
    /// should be unreachable after deduplication, but is checked rather
    /// than assumed.
    #[error("found {count} locations for {key:?}, expected exactly one")]
    AmbiguousKey { key: String, count: usize },

    /// A weather endpoint answered with a non-success status. The raw body
    /// is kept for the terminal log line.
    #[error("{endpoint} request failed with status {status}")]
    Api {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    /// A weather endpoint answered successfully but the payload did not
    /// decode into the expected shape.
    #[error("unexpected {endpoint} response: {detail}")]
    Parse {
        endpoint: &'static str,
        detail: String,
    },

    /// Transport-level failure: timeout, DNS, TLS, connection reset.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The interactive prompt failed or was canceled.
    #[error("prompt failed: {0}")]
    Prompt(String),
}
