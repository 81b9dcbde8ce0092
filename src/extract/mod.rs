// src/extract/mod.rs
// =============================================================================
// Everything the crawler pulls out of a fetched page.
//
// Submodules:
// - html: anchor hrefs, resolved to absolute URLs
// - email: email addresses matched in the raw body
// - validate: syntactic URL check deciding what may enter the frontier
//
// All three are pure functions over strings, so the crawl loop can be tested
// without a network.
// =============================================================================

mod email;
mod html;
mod validate;

pub use email::extract_emails;
pub use html::extract_links;
pub use validate::{is_valid_parsed, is_valid_url};
