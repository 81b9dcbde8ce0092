// src/session.rs
// =============================================================================
// The interactive controller: one URL field, one trigger, a busy indicator,
// and a success or error notification at the end.
//
// A front end (the CLI in main.rs, or a GUI) drives it like this:
//   start()   - trigger pressed; refused while a crawl is running
//   is_busy() - show the busy indicator, keep the trigger disabled
//   finish()  - wait for the crawl; busy is cleared no matter how it ended
//
// The crawl itself runs on a background task (spawn_scrape). The session
// only holds its JoinHandle and a cancellation token. A session built with
// with_fetcher() crawls through that fetcher instead of reqwest.
// =============================================================================

use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::CrawlConfig;
use crate::crawl::{spawn_scrape, spawn_scrape_with, CrawlReport, Fetcher};
use crate::error::{ScrapeError, SessionError};
use crate::extract::is_valid_url;
use crate::fault_log::{describe_join_error, FaultLog};
use crate::sink::resolve_output;

/// What the front end should show once a crawl is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// "Data saved to <output>"
    Success {
        output: PathBuf,
        rows: usize,
        pages: usize,
        cancelled: bool,
    },
    /// "Failed to scrape: <message>"
    Error { message: String },
    /// The crawl task died; the fault went to the error log and the front
    /// end just returns to idle
    Reset,
}

struct Running {
    handle: JoinHandle<Result<CrawlReport, ScrapeError>>,
    cancel: CancellationToken,
}

pub struct ScrapeSession {
    config: CrawlConfig,
    faults: Arc<dyn FaultLog>,
    fetcher: Option<Arc<dyn Fetcher>>,
    running: Option<Running>,
}

impl ScrapeSession {
    pub fn new(config: CrawlConfig, faults: Arc<dyn FaultLog>) -> Self {
        ScrapeSession {
            config,
            faults,
            fetcher: None,
            running: None,
        }
    }

    // Session whose crawls go through `fetcher` rather than an HttpFetcher
    pub fn with_fetcher(config: CrawlConfig, faults: Arc<dyn FaultLog>, fetcher: Arc<dyn Fetcher>) -> Self {
        ScrapeSession {
            fetcher: Some(fetcher),
            ..ScrapeSession::new(config, faults)
        }
    }

    // Trigger pressed.
    //
    // Parameters:
    //   urls: the URL field (the CLI allows several)
    //   output: the path picked in the "Save As" step; None or empty means
    //           the user backed out and nothing should run
    pub fn start(&mut self, urls: &[String], output: Option<PathBuf>) -> Result<(), SessionError> {
        if self.running.is_some() {
            return Err(SessionError::Busy);
        }

        let urls: Vec<String> = urls.iter().map(|u| u.trim().to_string()).collect();
        if urls.is_empty() {
            return Err(SessionError::InvalidUrl(String::new()));
        }
        if let Some(bad) = urls.iter().find(|u| !is_valid_url(u)) {
            return Err(SessionError::InvalidUrl(bad.clone()));
        }

        let output = match output {
            Some(path) if !path.as_os_str().is_empty() => path,
            _ => return Err(SessionError::NoOutput),
        };

        let (file, format) = resolve_output(&output, self.config.format);
        info!(
            "Starting crawl of {} (saving {} to {})",
            urls.join(", "),
            format.extension(),
            file.display()
        );

        let cancel = CancellationToken::new();
        let config = self.config.clone();
        let handle = match &self.fetcher {
            Some(fetcher) => spawn_scrape_with(fetcher.clone(), urls, output, config, cancel.clone()),
            None => spawn_scrape(urls, output, config, cancel.clone()),
        };
        self.running = Some(Running { handle, cancel });
        Ok(())
    }

    pub fn is_busy(&self) -> bool {
        self.running.is_some()
    }

    /// Token that stops the running crawl at the next page boundary.
    pub fn cancel_token(&self) -> Option<CancellationToken> {
        self.running.as_ref().map(|running| running.cancel.clone())
    }

    // Waits for the running crawl. Returns None if nothing was running.
    pub async fn finish(&mut self) -> Option<Notification> {
        // Taken before awaiting, so the session is idle again whatever happens
        let running = self.running.take()?;

        let notification = match running.handle.await {
            Ok(Ok(report)) => Notification::Success {
                output: report.output,
                rows: report.rows.len(),
                pages: report.visited.len(),
                cancelled: report.cancelled,
            },
            Ok(Err(e)) => Notification::Error {
                message: format!("Failed to scrape: {}", e),
            },
            Err(join_error) => {
                self.faults.record(&describe_join_error(join_error));
                Notification::Reset
            }
        };

        Some(notification)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does finish() call `self.running.take()` first?
//    - take() moves the Running value out and leaves None behind, so the
//      session reads as idle even if awaiting the task reports a panic
//
// 2. What is a JoinError?
//    - Awaiting a JoinHandle gives Err(JoinError) when the task panicked
//      or was aborted; the panic never reaches the caller's thread
//
// 3. Why `Arc<dyn FaultLog>`?
//    - main.rs and the session share one log; tests pass an in-memory one
// -----------------------------------------------------------------------------
