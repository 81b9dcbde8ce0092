// src/extract/validate.rs
// =============================================================================
// Syntactic URL validation.
//
// A URL is worth crawling when it is http(s) with a well-formed host. There
// is no reachability check: "https://nothing-here.example" is valid.
//
// Accepted hosts:
// - IPv4 and IPv6 literals
// - dotted domain names whose labels are 1-63 ASCII letters, digits and
//   hyphens (no leading/trailing hyphen), ending in a top-level label of 2+
//   letters or an IDNA "xn--" label
//
// Rejected: other schemes (mailto:, javascript:, ftp:, file:, ...),
// single-label hosts like "localhost", and anything Url::parse refuses.
// =============================================================================

use url::{Host, Url};

pub fn is_valid_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => is_valid_parsed(&url),
        Err(_) => false,
    }
}

// Same check for an already-parsed URL (the crawl loop has these)
pub fn is_valid_parsed(url: &Url) -> bool {
    if url.scheme() != "http" && url.scheme() != "https" {
        return false;
    }

    match url.host() {
        Some(Host::Domain(domain)) => is_valid_domain(domain),
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
        None => false,
    }
}

fn is_valid_domain(domain: &str) -> bool {
    // A trailing dot is a legal fully-qualified form
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    let labels: Vec<&str> = domain.split('.').collect();

    if labels.len() < 2 || !labels.iter().all(|label| is_valid_label(label)) {
        return false;
    }

    // split always yields at least one item, and we checked for two
    let tld = labels[labels.len() - 1];
    tld.starts_with("xn--") || (tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= 63
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does url::Host distinguish?
//    - Domain("example.com"), Ipv4(..) and Ipv6(..); only domains get the
//      label and TLD checks
//
// 2. Why two functions?
//    - is_valid_url takes user text; is_valid_parsed is used on links that
//      were already resolved to a Url, so they aren't parsed twice
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_urls() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("http://sub.example.co.uk/path?q=1#frag"));
        assert!(is_valid_url("https://example.com:8443/"));
        assert!(is_valid_url("http://127.0.0.1:8080/page"));
        assert!(is_valid_url("http://[::1]/"));
        assert!(is_valid_url("https://bücher.example/"));
    }

    #[test]
    fn test_wrong_scheme() {
        assert!(!is_valid_url("mailto:someone@example.com"));
        assert!(!is_valid_url("javascript:void(0)"));
        assert!(!is_valid_url("ftp://example.com/file"));
        assert!(!is_valid_url("file:///etc/passwd"));
    }

    #[test]
    fn test_bad_hosts() {
        assert!(!is_valid_url("http://localhost/"));
        assert!(!is_valid_url("https://example.c"));
        assert!(!is_valid_url("https://example.123"));
        assert!(!is_valid_url("https://-bad-.example.com"));
        assert!(!is_valid_url("https://a..b.com"));
    }

    #[test]
    fn test_not_a_url() {
        assert!(!is_valid_url(""));
        assert!(!is_valid_url("example.com"));
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url("https://"));
    }
}
