// src/error.rs
// =============================================================================
// Error types for every failure class in the harvester.
//
// - FetchError: one page could not be fetched. Logged, never escalated.
// - SinkError: the output file could not be written.
// - ScrapeError: what the caller of scrape() sees.
// - SessionError: a start request the interactive session refused.
//
// thiserror generates Display and From impls so `?` converts between them.
// =============================================================================

use thiserror::Error;

/// Failure fetching a single page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request exceeded the configured fetch timeout
    #[error("request timed out")]
    Timeout,

    /// DNS failure, refused connection, TLS handshake, ...
    #[error("connection failed: {0}")]
    Connect(String),

    /// The response arrived but its body could not be read as text
    #[error("could not read response body: {0}")]
    Body(String),

    /// Anything else reqwest reports (including building the client)
    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FetchError::Timeout
        } else if error.is_connect() {
            FetchError::Connect(error.to_string())
        } else if error.is_body() || error.is_decode() {
            FetchError::Body(error.to_string())
        } else {
            FetchError::Request(error.to_string())
        }
    }
}

/// Failure persisting rows.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("could not write output file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("could not write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("could not write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outcome of a crawl that did not succeed.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("no seed URLs given")]
    NoSeeds,

    #[error("invalid URL: {0}")]
    InvalidSeed(String),

    #[error("could not build HTTP client: {0}")]
    Client(#[source] FetchError),

    #[error("failed to save results: {0}")]
    Sink(#[from] SinkError),
}

/// A start request the session refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("a crawl is already running")]
    Busy,

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("no output file chosen")]
    NoOutput,
}
