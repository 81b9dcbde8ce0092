// src/fault_log.rs
// =============================================================================
// The error boundary at the process entry point.
//
// Anything that escapes the application (an error returned from run(), or
// a panic anywhere in the task running it) is caught by guard() and written
// through a FaultLog. The log is injected, so tests use an in-memory one.
//
// FileFaultLog appends to a fixed file (app_errors.log by default). The file
// is opened on each write and closed straight after; nothing holds it open
// between faults.
// =============================================================================

use std::any::Any;
use std::fs::OpenOptions;
use std::future::Future;
use std::io::Write;
use std::path::{Path, PathBuf};

use tokio::task::JoinError;
use tracing::error;

/// Default name of the error log, relative to the working directory
pub const DEFAULT_ERROR_LOG: &str = "app_errors.log";

pub trait FaultLog: Send + Sync {
    /// Record one fault. Must not fail: a broken log is reported and ignored.
    fn record(&self, fault: &str);
}

#[derive(Debug, Clone)]
pub struct FileFaultLog {
    path: PathBuf,
}

impl FileFaultLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileFaultLog { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FaultLog for FileFaultLog {
    fn record(&self, fault: &str) {
        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| writeln!(file, "{}", fault.trim_end()));

        if let Err(e) = written {
            error!("Could not write to {}: {}", self.path.display(), e);
        }
    }
}

// Runs the application future on its own task and catches whatever escapes.
//
// Returns: Some(value) on success, None if the future failed or panicked
// (after the fault has been logged and recorded).
pub async fn guard<F, T>(log: &dyn FaultLog, app: F) -> Option<T>
where
    F: Future<Output = anyhow::Result<T>> + Send + 'static,
    T: Send + 'static,
{
    match tokio::spawn(app).await {
        Ok(Ok(value)) => Some(value),
        Ok(Err(e)) => {
            error!("{:#}", e);
            // {:?} on anyhow::Error prints the cause chain and, when
            // RUST_BACKTRACE is set, the backtrace
            log.record(&format!("{:?}", e));
            None
        }
        Err(join_error) => {
            let fault = describe_join_error(join_error);
            error!("{}", fault);
            log.record(&fault);
            None
        }
    }
}

// Turns a failed join into a one-line description of what went wrong
pub fn describe_join_error(join_error: JoinError) -> String {
    if join_error.is_panic() {
        format!("panic: {}", panic_message(join_error.into_panic().as_ref()))
    } else {
        "task was cancelled".to_string()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::MemoryFaultLog;
    use super::*;
    use anyhow::{anyhow, Context};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_success_passes_through() {
        let log = MemoryFaultLog::default();
        let result = guard(&log, async { Ok(7) }).await;

        assert_eq!(result, Some(7));
        assert!(log.entries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_error_chain_recorded() {
        let log = MemoryFaultLog::default();
        let result: Option<()> = guard(&log, async {
            Err(anyhow!("disk full")).context("saving results")
        })
        .await;

        assert_eq!(result, None);
        let entries = log.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].contains("saving results"));
        assert!(entries[0].contains("disk full"));
    }

    #[tokio::test]
    async fn test_panic_recorded() {
        let log = MemoryFaultLog::default();
        let result: Option<()> = guard(&log, async {
            let corrupted = true;
            if corrupted {
                panic!("frontier corrupted");
            }
            Ok(())
        })
        .await;

        assert_eq!(result, None);
        assert_eq!(
            *log.entries.lock().unwrap(),
            vec!["panic: frontier corrupted".to_string()]
        );
    }

    #[test]
    fn test_file_log_appends() {
        let dir = TempDir::new().unwrap();
        let log = FileFaultLog::new(dir.path().join(DEFAULT_ERROR_LOG));

        // Not created until the first fault
        assert!(!log.path().exists());

        log.record("first fault\n");
        log.record("second fault");

        let content = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(content, "first fault\nsecond fault\n");
    }

    #[test]
    fn test_unwritable_log_does_not_panic() {
        let dir = TempDir::new().unwrap();
        let log = FileFaultLog::new(dir.path().join("missing").join("errors.log"));
        log.record("lost");
    }
}
