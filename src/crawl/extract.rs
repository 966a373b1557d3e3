// src/crawl/extract.rs
// =============================================================================
// Pulls hyperlinks out of an HTML page.
//
// We use the `scraper` crate (built on html5ever) to parse the page and the
// `url` crate to turn relative hrefs into absolute URLs.
//
// Only http/https links come back. mailto:, tel:, javascript:, data: and the
// like are dropped here, so nothing downstream ever sees them. Every link is
// returned in normalized form, each one once, in the order it first appears.
// =============================================================================

use super::normalize::{is_web_scheme, normalize};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

// Extracts all web links from an HTML page
//
// Parameters:
//   base_url: the URL of the page (for resolving relative links)
//   html: the page body
//
// Example:
//   base_url = "https://example.com/page/"
//   html = "<a href='../docs#intro'>Docs</a>"
//   result = ["https://example.com/docs"]
pub fn extract_links(base_url: &str, html: &str) -> Vec<String> {
    let mut links = Vec::new();

    let base = match Url::parse(base_url) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("Cannot resolve links against invalid base URL {}: {}", base_url, e);
            return links;
        }
    };

    let document = Html::parse_document(html);

    // "a[href]" is a constant selector, it always parses
    let selector = Selector::parse("a[href]").expect("a[href] is a valid selector");

    let mut seen = HashSet::new();
    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        // join() handles both absolute and relative hrefs
        let Ok(absolute) = base.join(href.trim()) else {
            continue;
        };

        if !is_web_scheme(absolute.as_str()) {
            continue;
        }

        let link = normalize(absolute.as_str());
        if seen.insert(link.clone()) {
            links.push(link);
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_absolute_link() {
        let html = r#"<a href="https://www.rust-lang.org">Rust</a>"#;
        let links = extract_links("https://example.com", html);
        assert_eq!(links, vec!["https://www.rust-lang.org/"]);
    }

    #[test]
    fn test_resolve_relative_link() {
        let html = r#"<a href="/docs">Docs</a> <a href="../about">About</a>"#;
        let links = extract_links("https://example.com/page/sub", html);
        assert_eq!(links, vec!["https://example.com/docs", "https://example.com/about"]);
    }

    #[test]
    fn test_skips_non_web_schemes() {
        let html = r#"
            <a href="mailto:test@example.com">Email</a>
            <a href="tel:+123">Call</a>
            <a href="javascript:void(0)">JS</a>
            <a href="ftp://example.com/file">FTP</a>
        "#;
        let links = extract_links("https://example.com", html);
        assert!(links.is_empty());
    }

    #[test]
    fn test_fragments_collapse_to_one_link() {
        let html = r##"
            <a href="/a#one">One</a>
            <a href="/a#two">Two</a>
            <a href="#top">Top</a>
        "##;
        let links = extract_links("http://example.com/", html);
        assert_eq!(links, vec!["http://example.com/a", "http://example.com/"]);
    }

    #[test]
    fn test_anchor_without_href_is_ignored() {
        let html = r#"<a name="x">No link</a><a href="/ok">Ok</a>"#;
        let links = extract_links("http://example.com/", html);
        assert_eq!(links, vec!["http://example.com/ok"]);
    }

    #[test]
    fn test_invalid_base_returns_nothing() {
        let links = extract_links("not a url", r#"<a href="/x">x</a>"#);
        assert!(links.is_empty());
    }
}
