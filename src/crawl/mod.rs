// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling from one or more seed URLs
// - Page budget (max pages visited) instead of a depth limit
// - Sequential: one request in flight at a time
// - Per-page failures are logged and skipped, never fatal
// - Cooperative cancellation between pages
//
// Submodules:
// - engine: the crawl loop and the scrape()/spawn_scrape() entry points
//   (spawn_scrape_with takes the fetcher from the caller)
// - fetch: the Fetcher trait and its reqwest implementation
// - frontier: the FIFO queue of URLs waiting to be visited
// =============================================================================

mod engine;
mod fetch;
mod frontier;

pub use engine::{scrape, spawn_scrape, spawn_scrape_with, CrawlReport};
pub use fetch::{Fetcher, HttpFetcher, Page};
pub use frontier::Frontier;
