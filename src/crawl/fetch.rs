// src/crawl/fetch.rs
// =============================================================================
// This module fetches pages over HTTP.
//
// The crawl loop only knows about the Fetcher trait, so tests can swap in an
// in-memory site. HttpFetcher is the real implementation on top of reqwest.
//
// Key behavior:
// - One reqwest Client for the whole crawl (connection pooling)
// - Per-request timeout from CrawlConfig
// - The status code is reported, not judged: a 404 page still has a body,
//   and that body is scanned for emails like any other
// =============================================================================

use async_trait::async_trait;
use reqwest::{redirect, Client};
use tracing::debug;
use url::Url;

use crate::config::CrawlConfig;
use crate::error::FetchError;

// How many redirects a single fetch may follow
const MAX_REDIRECTS: usize = 10;

/// A fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// HTTP status code of the final response
    pub status: u16,
    /// Response body decoded as text
    pub body: String,
}

impl Page {
    #[cfg(test)]
    pub(crate) fn ok(body: impl Into<String>) -> Self {
        Page { status: 200, body: body.into() }
    }
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Page, FetchError>;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Builds the shared client. The only failure is a TLS backend that
    // cannot initialize.
    pub fn new(config: &CrawlConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.fetch_timeout)
            .user_agent(config.user_agent.as_str())
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(HttpFetcher { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Page, FetchError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            debug!("GET {} returned HTTP {}", url, status.as_u16());
        }

        let body = response.text().await?;

        Ok(Page {
            status: status.as_u16(),
            body,
        })
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does #[async_trait] do?
//    - It rewrites `async fn` in the trait into a method returning a boxed
//      future, so the trait can be used as `dyn Fetcher`
//
// 2. Why is `?` enough on send() and text()?
//    - `impl From<reqwest::Error> for FetchError` (see error.rs) sorts the
//      reqwest error into Timeout / Connect / Body / Request
// -----------------------------------------------------------------------------
