// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Install logging
// 3. Run the app inside the error boundary (fault_log::guard), so any error
//    or panic that escapes ends up in the error log
// 4. Start a crawl session, show a heartbeat while it runs, Ctrl-C cancels
// 5. Exit with proper code (0 = saved, 1 = bad input or failed crawl,
//    2 = uncaught fault)
// =============================================================================

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use email_harvester::cli::Cli;
use email_harvester::fault_log::{self, FaultLog, FileFaultLog};
use email_harvester::logging;
use email_harvester::session::{Notification, ScrapeSession};

// How often the busy indicator reports that the crawl is still going
const HEARTBEAT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbose) {
        eprintln!("Warning: {}", e);
    }

    let error_log = Arc::new(FileFaultLog::new(&cli.error_log));
    let faults: Arc<dyn FaultLog> = error_log.clone();

    let exit_code = match fault_log::guard(faults.as_ref(), run(cli, faults.clone())).await {
        Some(code) => code,
        None => 2,
    };

    if exit_code == 2 {
        eprintln!("💥 Unexpected failure, details appended to {}", error_log.path().display());
    }

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = results saved
//   Ok(1) = invalid input or the crawl failed (e.g. unwritable output)
//   Err   = unexpected error, handled by the boundary in main
async fn run(cli: Cli, faults: Arc<dyn FaultLog>) -> Result<i32> {
    let mut session = ScrapeSession::new(cli.to_config(), faults);

    if let Err(e) = session.start(&cli.urls, Some(cli.output.clone())) {
        eprintln!("Error: {}", e);
        return Ok(1);
    }

    println!("🔍 Harvesting emails from: {}", cli.urls.join(", "));
    println!("📊 Page budget: {}", cli.max_pages);

    let cancel = session.cancel_token();
    let started = Instant::now();
    let mut heartbeat = tokio::time::interval(HEARTBEAT);
    heartbeat.tick().await; // the first tick completes immediately

    let finish = session.finish();
    tokio::pin!(finish);

    let notification = loop {
        tokio::select! {
            notification = &mut finish => break notification,
            _ = heartbeat.tick() => {
                info!("Still crawling ({}s elapsed)", started.elapsed().as_secs());
            }
            Ok(()) = tokio::signal::ctrl_c(), if cancel.as_ref().is_some_and(|c| !c.is_cancelled()) => {
                warn!("Interrupted, finishing the current page and saving what was found");
                if let Some(cancel) = &cancel {
                    cancel.cancel();
                }
            }
        }
    };

    Ok(report(notification))
}

fn report(notification: Option<Notification>) -> i32 {
    match notification {
        Some(Notification::Success {
            output,
            rows,
            pages,
            cancelled,
        }) => {
            println!("📄 Crawled {} page(s){}", pages, if cancelled { " (cancelled)" } else { "" });
            println!("✅ {} email(s) saved to {}", rows, output.display());
            0
        }
        Some(Notification::Error { message }) => {
            eprintln!("❌ {}", message);
            1
        }
        Some(Notification::Reset) | None => 2,
    }
}
