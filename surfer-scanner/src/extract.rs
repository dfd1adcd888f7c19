//! Anchor extraction for fetched pages.

use crate::error::{Result, ScanError};
use scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::debug;

#[allow(clippy::expect_used)]
static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("hardcoded selector is valid"));

/// Strip a single trailing `/`, if present.
pub fn strip_trailing_slash(link: &str) -> &str {
    link.strip_suffix('/').unwrap_or(link)
}

/// Return the href targets of every anchor in `html`, in document order.
///
/// Root-relative hrefs (leading `/`) are prefixed with `source_url` by plain
/// concatenation, so `/about` on `http://site.com/docs` yields
/// `http://site.com/docs/about`. Other relative forms pass through untouched
/// and are left for the link filter to reject. Duplicates are kept.
///
/// Fails with [`ScanError::ParseError`] when the page is not valid UTF-8.
pub fn extract_links(source_url: &str, html: &[u8]) -> Result<Vec<String>> {
    let text = std::str::from_utf8(html)
        .map_err(|e| ScanError::ParseError(format!("{} is not valid UTF-8: {}", source_url, e)))?;

    let document = Html::parse_document(text);
    let mut links = Vec::new();

    for element in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if href.is_empty() {
            continue;
        }

        let link = if href.starts_with('/') {
            format!("{}{}", source_url, href)
        } else {
            href.to_string()
        };

        links.push(strip_trailing_slash(&link).to_string());
    }

    debug!("Extracted {} links from {}", links.len(), source_url);
    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_relative_href_is_concatenated() {
        let html = br#"<html><body><a href="/about">About</a></body></html>"#;
        let links = extract_links("http://site.com", html).unwrap();
        assert_eq!(links, vec!["http://site.com/about"]);
    }

    #[test]
    fn test_concatenation_does_not_join_paths() {
        let html = br#"<a href="/about">About</a>"#;
        let links = extract_links("http://site.com/docs", html).unwrap();
        assert_eq!(links, vec!["http://site.com/docs/about"]);
    }

    #[test]
    fn test_single_trailing_slash_removed() {
        let html = br#"
            <a href="http://a.com/">a</a>
            <a href="http://b.com/x//">b</a>
            <a href="/">root</a>
        "#;
        let links = extract_links("http://site.com", html).unwrap();
        assert_eq!(links, vec!["http://a.com", "http://b.com/x/", "http://site.com"]);
    }

    #[test]
    fn test_anchors_without_href_and_empty_hrefs_skipped() {
        let html = br#"
            <a name="top">anchor</a>
            <a href="">empty</a>
            <a href="http://kept.com">kept</a>
            <link href="http://not-an-anchor.com/style">
        "#;
        let links = extract_links("http://site.com", html).unwrap();
        assert_eq!(links, vec!["http://kept.com"]);
    }

    #[test]
    fn test_document_order_and_duplicates_preserved() {
        let html = br#"
            <a href="http://b.com">b</a>
            <a href="http://a.com">a</a>
            <a href="http://b.com/">b again</a>
        "#;
        let links = extract_links("http://site.com", html).unwrap();
        assert_eq!(links, vec!["http://b.com", "http://a.com", "http://b.com"]);
    }

    #[test]
    fn test_other_relative_forms_untouched() {
        let html = br##"<a href="page.html">p</a><a href="#frag">f</a><a href="mailto:x@y.z">m</a>"##;
        let links = extract_links("http://site.com", html).unwrap();
        assert_eq!(links, vec!["page.html", "#frag", "mailto:x@y.z"]);
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let html = [0x3c, 0x61, 0xff, 0xfe, 0x3e];
        let err = extract_links("http://site.com", &html).unwrap_err();
        assert!(matches!(err, ScanError::ParseError(_)));
        assert!(err.is_fetch_error());
    }

    #[test]
    fn test_strip_trailing_slash() {
        assert_eq!(strip_trailing_slash("http://a.com/"), "http://a.com");
        assert_eq!(strip_trailing_slash("http://a.com"), "http://a.com");
        assert_eq!(strip_trailing_slash("/"), "");
    }
}
