// src/lib.rs
// =============================================================================
// email-harvester: crawl a site breadth-first and collect email addresses.
//
// Module map:
// - crawl:     the crawl loop, the HTTP fetcher, the frontier queue
// - extract:   links, emails and URL validation (pure functions)
// - sink:      CSV / JSON output
// - session:   start / busy / finish controller for interactive front ends
// - fault_log: error boundary for the process entry point
// - config, cli, error, logging: the usual plumbing
//
// The one-call entry point is crawl::scrape (or crawl::spawn_scrape to run it
// in the background).
// =============================================================================

pub mod cli;
pub mod config;
pub mod crawl;
pub mod error;
pub mod extract;
pub mod fault_log;
pub mod logging;
pub mod session;
pub mod sink;

pub use config::CrawlConfig;
pub use crawl::{scrape, spawn_scrape, spawn_scrape_with, CrawlReport};
pub use error::ScrapeError;
pub use sink::Row;
