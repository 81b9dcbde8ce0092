// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The command line stands in for a desktop form: the URL field
// becomes positional arguments, the "Save As" dialog becomes --output, and
// the rest are settings the form had hard-coded (100 pages, 10 s timeout).
// =============================================================================

use clap::builder::TypedValueParser;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{default_user_agent, CrawlConfig, DEFAULT_MAX_PAGES, DEFAULT_TIMEOUT_SECS};
use crate::fault_log::DEFAULT_ERROR_LOG;
use crate::sink::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "email-harvester",
    version,
    about = "Crawl a website and collect every email address it mentions",
    long_about = "email-harvester starts from one or more URLs, follows links breadth-first up to a page \
                  budget, and saves every (page URL, email) pair it finds to an Excel, CSV or JSON file."
)]
pub struct Cli {
    /// URL(s) to start crawling from (e.g., https://example.com)
    #[arg(required = true)]
    pub urls: Vec<String>,

    /// File to save results to; a .xlsx/.csv/.json extension picks the format,
    /// otherwise --format decides and its extension is added if missing
    #[arg(short, long)]
    pub output: PathBuf,

    /// Maximum number of pages to visit
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES, value_parser = clap::value_parser!(u64).range(1..).map(|n| n as usize))]
    pub max_pages: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Xlsx)]
    pub format: OutputFormat,

    /// User-Agent header to send
    #[arg(long, default_value_t = default_user_agent())]
    pub user_agent: String,

    /// Where uncaught faults are appended
    #[arg(long, default_value = DEFAULT_ERROR_LOG)]
    pub error_log: PathBuf,

    /// Enable debug logging (RUST_LOG overrides this)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn to_config(&self) -> CrawlConfig {
        CrawlConfig {
            max_pages: self.max_pages,
            fetch_timeout: Duration::from_secs(self.timeout),
            user_agent: self.user_agent.clone(),
            format: self.format,
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does `value_parser!(u64).range(1..).map(...)` do?
//    - clap parses the text as u64 and rejects 0 with a normal usage error
//    - `.map` comes from the TypedValueParser trait, which must be in scope
//
// 2. Why a separate to_config()?
//    - The library never sees clap types; tests build CrawlConfig directly
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["email-harvester", "https://example.com", "-o", "out"]).unwrap();
        let config = cli.to_config();

        assert_eq!(cli.urls, vec!["https://example.com"]);
        assert_eq!(cli.error_log, PathBuf::from("app_errors.log"));
        assert_eq!(config, CrawlConfig::default());
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "email-harvester",
            "https://a.example.com",
            "https://b.example.com",
            "--output",
            "emails.json",
            "--max-pages",
            "5",
            "--timeout",
            "3",
            "--format",
            "json",
            "-v",
        ])
        .unwrap();
        let config = cli.to_config();

        assert_eq!(cli.urls.len(), 2);
        assert!(cli.verbose);
        assert_eq!(config.max_pages, 5);
        assert_eq!(config.fetch_timeout, Duration::from_secs(3));
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_budget_parsed_as_usize() {
        let cli = Cli::try_parse_from([
            "email-harvester",
            "https://example.com",
            "-o",
            "out",
            "--max-pages",
            "1",
        ])
        .unwrap();
        assert_eq!(cli.max_pages, 1usize);
        assert_eq!(cli.to_config().format, OutputFormat::Xlsx);
    }

    #[test]
    fn test_zero_budget_rejected() {
        let result = Cli::try_parse_from([
            "email-harvester",
            "https://example.com",
            "-o",
            "out.csv",
            "--max-pages",
            "0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_output_required() {
        assert!(Cli::try_parse_from(["email-harvester", "https://example.com"]).is_err());
    }
}
