// src/crawl/engine.rs
// =============================================================================
// The crawl loop: a bounded breadth-first walk that harvests email addresses.
//
// How it works:
// 1. Validate the seed URLs (nothing is fetched if one is malformed)
// 2. Pop the oldest URL off the frontier, skip it if already visited
// 3. Fetch it; on success queue its links and record every email match
// 4. Mark it visited whether the fetch worked or not
// 5. Repeat until the frontier is empty or the page budget is spent
// 6. Hand every row to the sink in one go
//
// Budget rules:
// - at most `max_pages` URLs are ever marked visited
// - links stop being queued once visited + queued reaches `max_pages`, which
//   bounds memory without limiting which links get a chance
//
// A page that fails to fetch is logged and contributes no links and no
// emails. It never stops the crawl.
// =============================================================================

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use super::fetch::{Fetcher, HttpFetcher, Page};
use super::frontier::Frontier;
use crate::config::CrawlConfig;
use crate::error::{FetchError, ScrapeError};
use crate::extract::{extract_emails, extract_links, is_valid_parsed};
use crate::sink::{sink_for, Row, Sink};

/// What a finished crawl produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlReport {
    /// Every URL processed, in the order it was processed
    pub visited: Vec<String>,
    /// Harvested rows, in discovery order
    pub rows: Vec<Row>,
    /// How many visited pages failed to fetch
    pub failed: usize,
    /// True when the crawl stopped early because it was cancelled
    pub cancelled: bool,
    /// The file the rows were written to
    pub output: PathBuf,
}

// Everything the loop mutates, owned in one place and consumed at the end
#[derive(Debug, Default)]
struct CrawlState {
    frontier: Frontier,
    visited: HashSet<String>,
    visit_order: Vec<String>,
    rows: Vec<Row>,
    failed: usize,
    cancelled: bool,
}

impl CrawlState {
    fn new(seeds: Vec<Url>) -> Self {
        CrawlState {
            frontier: Frontier::from_seeds(seeds.into_iter().map(String::from)),
            ..CrawlState::default()
        }
    }

    fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    fn mark_visited(&mut self, url: String) {
        if self.visited.insert(url.clone()) {
            self.visit_order.push(url);
        }
    }

    // Whether the frontier may still grow
    fn has_room(&self, budget: usize) -> bool {
        self.visited.len() + self.frontier.len() < budget
    }

    // Queue the page's links and record its emails
    fn absorb(&mut self, page_url: &Url, page: &Page, budget: usize) {
        let current = page_url.as_str();
        let mut queued = 0;

        for link in extract_links(&page.body, page_url) {
            if !self.has_room(budget) {
                break;
            }
            if !is_valid_parsed(&link) {
                continue;
            }
            // The page being processed is about to be marked visited; don't
            // leave a copy of it behind in the frontier
            let link = String::from(link);
            if link == current || self.is_visited(&link) {
                continue;
            }
            if self.frontier.push(link) {
                queued += 1;
            }
        }

        let before = self.rows.len();
        self.rows.extend(extract_emails(&page.body).map(|email| Row::new(current, email)));

        debug!(
            "{}: HTTP {}, {} link(s) queued, {} email(s) found",
            current,
            page.status,
            queued,
            self.rows.len() - before
        );
    }

    fn into_report(self, output: PathBuf) -> CrawlReport {
        CrawlReport {
            visited: self.visit_order,
            rows: self.rows,
            failed: self.failed,
            cancelled: self.cancelled,
            output,
        }
    }
}

// Crawls from `seeds` and writes every (URL, email) row to `sink`
//
// Parameters:
//   fetcher: how pages are retrieved (HttpFetcher outside of tests)
//   sink: where rows are written once the loop is done
//   seeds: starting URLs; every one must pass is_valid_url
//   config: page budget (max_pages) is the only field read here
//   cancel: checked between pages; a cancelled crawl still saves its rows
//
// Returns: the report, or an error for bad input or an unwritable sink.
// Individual page failures are never returned as errors.
pub async fn scrape<F, S>(
    fetcher: &F,
    sink: &S,
    seeds: &[String],
    config: &CrawlConfig,
    cancel: &CancellationToken,
) -> Result<CrawlReport, ScrapeError>
where
    F: Fetcher + ?Sized,
    S: Sink + ?Sized,
{
    let seeds = validate_seeds(seeds)?;
    let state = crawl(fetcher, seeds, config.max_pages, cancel).await;

    sink.persist(&state.rows)?;
    info!(
        "Data saved to {} ({} row(s) from {} page(s))",
        sink.destination().display(),
        state.rows.len(),
        state.visit_order.len()
    );

    Ok(state.into_report(sink.destination().to_path_buf()))
}

// Runs scrape() with the real HTTP fetcher on a background task.
//
// The caller keeps the JoinHandle and awaits it when it wants the outcome;
// the token is the only thing shared with the task.
pub fn spawn_scrape(
    seeds: Vec<String>,
    output: PathBuf,
    config: CrawlConfig,
    cancel: CancellationToken,
) -> JoinHandle<Result<CrawlReport, ScrapeError>> {
    tokio::spawn(async move {
        let fetcher = HttpFetcher::new(&config).map_err(ScrapeError::Client)?;
        let sink = sink_for(&output, config.format);
        scrape(&fetcher, &sink, &seeds, &config, &cancel).await
    })
}

// Same as spawn_scrape, with a fetcher supplied by the caller.
pub fn spawn_scrape_with(
    fetcher: Arc<dyn Fetcher>,
    seeds: Vec<String>,
    output: PathBuf,
    config: CrawlConfig,
    cancel: CancellationToken,
) -> JoinHandle<Result<CrawlReport, ScrapeError>> {
    tokio::spawn(async move {
        let sink = sink_for(&output, config.format);
        scrape(fetcher.as_ref(), &sink, &seeds, &config, &cancel).await
    })
}

fn validate_seeds(seeds: &[String]) -> Result<Vec<Url>, ScrapeError> {
    if seeds.is_empty() {
        return Err(ScrapeError::NoSeeds);
    }

    seeds
        .iter()
        .map(|seed| {
            let seed = seed.trim();
            match Url::parse(seed) {
                Ok(url) if is_valid_parsed(&url) => Ok(url),
                _ => Err(ScrapeError::InvalidSeed(seed.to_string())),
            }
        })
        .collect()
}

async fn crawl<F>(fetcher: &F, seeds: Vec<Url>, budget: usize, cancel: &CancellationToken) -> CrawlState
where
    F: Fetcher + ?Sized,
{
    let mut state = CrawlState::new(seeds);

    while !state.frontier.is_empty() && state.visited.len() < budget {
        if cancel.is_cancelled() {
            info!("Crawl cancelled after {} page(s)", state.visited.len());
            state.cancelled = true;
            break;
        }

        let Some(url) = state.frontier.pop() else {
            break;
        };
        if state.is_visited(&url) {
            continue;
        }

        info!("Scraping: {}", url);
        match fetch_page(fetcher, &url).await {
            Ok((page_url, page)) => state.absorb(&page_url, &page, budget),
            Err(e) => {
                warn!("Failed to scrape {}: {}", url, e);
                state.failed += 1;
            }
        }

        state.mark_visited(url);
    }

    state
}

async fn fetch_page<F>(fetcher: &F, url: &str) -> Result<(Url, Page), FetchError>
where
    F: Fetcher + ?Sized,
{
    // Frontier entries were serialized from a Url, so this only fails if the
    // url crate disagrees with its own output
    let page_url = Url::parse(url).map_err(|e| FetchError::Request(e.to_string()))?;
    let page = fetcher.fetch(&page_url).await?;
    Ok((page_url, page))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why `F: Fetcher + ?Sized`?
//    - ?Sized lets callers pass a trait object (&dyn Fetcher) as well as a
//      concrete type like &HttpFetcher
//    - Tests pass an in-memory FakeSite instead of touching the network
//
// 2. Why does absorb() take &mut self instead of returning new links?
//    - The budget check needs the live sizes of the visited set and the
//      frontier while links are being added, one link at a time
//
// 3. What is `let ... else`?
//    - `let Some(url) = x else { break };` binds url or runs the else block
//    - The else block must leave the scope (break, continue, return)
//
// 4. Why is the sink called only once?
//    - Rows are kept in memory and written at the end, so a crawl that
//      fails halfway through never leaves a half-written file behind
// -----------------------------------------------------------------------------
