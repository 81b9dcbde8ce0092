// src/extract/email.rs
// Pulls email addresses out of raw page text with a single regex.
//
// The match runs over the raw body, markup included, so an address inside a
// mailto: href or an HTML comment is found just like one in visible text.
// No validation past the pattern, no deduplication.

use once_cell::sync::Lazy;
use regex::Regex;

// local part, '@', dotted domain labels, then a top-level label of 2+ letters
const EMAIL_PATTERN: &str = r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"));

/// Every match of the email pattern in `text`, left to right.
pub fn extract_emails(text: &str) -> impl Iterator<Item = &str> {
    EMAIL_RE.find_iter(text).map(|m| m.as_str())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Lazy<Regex> compiles the pattern on first use, once per process.
//    find_iter() yields matches left to right, duplicates included.
// -----------------------------------------------------------------------------
