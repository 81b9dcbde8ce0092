// src/config.rs
// =============================================================================
// Crawl settings.
//
// CrawlConfig is built from the command line (see cli.rs) but has sensible
// defaults so the session and the tests can construct one directly.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::sink::OutputFormat;

/// Default cap on the number of pages a crawl visits
pub const DEFAULT_MAX_PAGES: usize = 100;

/// Default per-request timeout, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Page budget: the most URLs the crawl will ever mark visited
    pub max_pages: usize,
    /// Timeout applied to each fetch (no timeout on the crawl as a whole)
    #[serde(with = "secs")]
    pub fetch_timeout: Duration,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Output format when the chosen path has no known extension
    pub format: OutputFormat,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        CrawlConfig {
            max_pages: DEFAULT_MAX_PAGES,
            fetch_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: default_user_agent(),
            format: OutputFormat::Xlsx,
        }
    }
}

impl CrawlConfig {
    // Same config with a different page budget. Handy for tests and the session.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }
}

pub fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

// Durations are stored as whole seconds.
mod secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
