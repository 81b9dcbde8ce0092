// src/extract/html.rs
// =============================================================================
// This module extracts links from HTML pages.
//
// We use the `scraper` crate to parse the page and select every <a href>,
// and the `url` crate to resolve each href against the page it came from
// (the same way a browser turns "/docs" into "https://example.com/docs").
//
// Nothing is filtered here: mailto:, javascript: and friends all come back
// as absolute URLs. Deciding which ones are worth crawling is the job of
// validate::is_valid_url.
// =============================================================================

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("a[href] is a valid selector"));

// Extracts all links from HTML content
//
// Parameters:
//   html: the HTML content to parse
//   base: the URL of the page (for resolving relative links)
//
// Returns: a lazy iterator of absolute URLs, in document order
//
// The parsed document is dropped before this returns; only the raw href
// strings are kept, and each one is resolved when the iterator reaches it.
// scraper's Html is not Send, so it must never be held across an .await in
// the crawl task.
//
// Example:
//   html = "<a href='/docs'>Docs</a>"
//   base = "https://example.com"
//   yields "https://example.com/docs"
pub fn extract_links<'a>(html: &str, base: &'a Url) -> impl Iterator<Item = Url> + 'a {
    let hrefs = collect_hrefs(html);
    hrefs.into_iter().filter_map(move |href| resolve_url(base, &href))
}

fn collect_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}

// Resolves a possibly-relative URL to an absolute URL
//
// Examples:
//   base = "https://example.com/page"
//   href = "/docs"              -> Some("https://example.com/docs")
//   href = "../other"           -> Some("https://example.com/other")
//   href = "https://other.com"  -> Some("https://other.com/")
//   href = "http://[::1"        -> None (unparseable)
fn resolve_url(base: &Url, href: &str) -> Option<Url> {
    // Url::join handles absolute hrefs too: they simply replace the base
    base.join(href.trim()).ok()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why `impl Iterator<Item = Url> + 'a`?
//    - The links are produced lazily; `'a` says the iterator borrows `base`
//      and may not outlive it
//
// 2. What does base.join() handle?
//    - "/team", "../x", "?page=2" and "//cdn.example.com/a" all resolve
//      against the page URL; unparseable hrefs are skipped
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn links(html: &str, base: &str) -> Vec<String> {
        let base = Url::parse(base).unwrap();
        extract_links(html, &base).map(|u| u.to_string()).collect()
    }

    #[test]
    fn test_extract_absolute_link() {
        let html = r#"<a href="https://www.rust-lang.org">Rust</a>"#;
        assert_eq!(links(html, "https://example.com"), vec!["https://www.rust-lang.org/"]);
    }

    #[test]
    fn test_resolve_relative_link() {
        let html = r#"<a href="/docs">Docs</a>"#;
        assert_eq!(links(html, "https://example.com/page"), vec!["https://example.com/docs"]);
    }

    #[test]
    fn test_document_order_and_duplicates_kept() {
        let html = r#"
            <a href="https://rust-lang.org">Rust</a>
            <a href="/docs">Docs</a>
            <a href="../about">About</a>
            <a href="/docs">Docs again</a>
        "#;
        assert_eq!(
            links(html, "https://example.com/page/"),
            vec![
                "https://rust-lang.org/",
                "https://example.com/docs",
                "https://example.com/about",
                "https://example.com/docs",
            ]
        );
    }

    #[test]
    fn test_non_http_schemes_are_not_filtered_here() {
        let html = r#"<a href="mailto:test@example.com">Email</a>"#;
        assert_eq!(links(html, "https://example.com"), vec!["mailto:test@example.com"]);
    }

    #[test]
    fn test_anchor_without_href_ignored() {
        let html = r#"<a name="top">Top</a><a href="">Self</a>"#;
        assert_eq!(links(html, "https://example.com/a"), vec!["https://example.com/a"]);
    }

    #[test]
    fn test_unparseable_href_dropped() {
        let html = r#"<a href="http://[::1">Broken</a>"#;
        assert!(links(html, "https://example.com").is_empty());
    }
}
