// src/crawl/normalize.rs
// =============================================================================
// URL normalization and same-site checks.
//
// Every dedup and scoping decision in the crawler compares the normalized
// form of a URL, never the raw string from an href. Normalized means:
// - no #fragment and no ?query
// - an explicit scheme (http:// is assumed when missing)
// - a non-empty path ("/" when missing)
//
// Dropping the query means "/list?page=1" and "/list?page=2" are one page:
// crawled once, logged once, saved to one file.
//
// normalize() never fails. Input the `url` crate can't parse still comes back
// as a best-effort string with the three properties above, and running
// normalize() on its own output always gives the same string back.
// =============================================================================

use url::Url;

pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    let resource = match trimmed.find(['#', '?']) {
        Some(idx) => &trimmed[..idx],
        None => trimmed,
    };

    let with_scheme = if has_scheme(resource) {
        resource.to_string()
    } else {
        // "//host/path" (protocol-relative) and bare "host/path" both land here
        format!("http://{}", resource.trim_start_matches('/'))
    };

    match Url::parse(&with_scheme) {
        Ok(mut url) if url.has_host() => {
            url.set_fragment(None);
            if url.path().is_empty() {
                url.set_path("/");
            }
            url.into()
        }
        _ => ensure_path(with_scheme),
    }
}

// The host (and port, if any) of a URL, lowercased.
// This is the identity used for same-site scoping.
pub fn site_of(url: &str) -> String {
    if let Ok(parsed) = Url::parse(url) {
        if let Some(host) = parsed.host_str() {
            return match parsed.port() {
                Some(port) => format!("{}:{}", host, port).to_lowercase(),
                None => host.to_lowercase(),
            };
        }
    }

    let rest = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    let end = rest.find(['/', '?']).unwrap_or(rest.len());
    rest[..end].to_lowercase()
}

// True when `site` is the seed site itself or one of its subdomains.
//
// Matching happens on whole labels: "blog.example.com" is in scope for
// "example.com", "notexample.com" is not.
pub fn in_scope(site: &str, seed_site: &str) -> bool {
    if seed_site.is_empty() {
        return false;
    }
    site == seed_site
        || site
            .strip_suffix(seed_site)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

pub fn is_web_scheme(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

// "scheme://" where scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
fn has_scheme(s: &str) -> bool {
    let Some((scheme, _)) = s.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

// Best-effort fallback for strings the url crate rejects
fn ensure_path(mut s: String) -> String {
    let authority_start = s.find("://").map(|idx| idx + 3).unwrap_or(0);
    if !s[authority_start..].contains('/') {
        s.push('/');
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_fragment() {
        assert_eq!(normalize("http://example.com/page#top"), "http://example.com/page");
    }

    #[test]
    fn test_defaults_scheme_to_http() {
        assert_eq!(normalize("example.com/docs"), "http://example.com/docs");
        assert_eq!(normalize("//example.com/docs"), "http://example.com/docs");
    }

    #[test]
    fn test_defaults_path_to_slash() {
        assert_eq!(normalize("https://example.com"), "https://example.com/");
        assert_eq!(normalize("https://example.com?q=1"), "https://example.com/");
    }

    #[test]
    fn test_drops_query() {
        assert_eq!(normalize("http://example.com/a?page=2#x"), "http://example.com/a");
        assert_eq!(normalize("http://example.com/a#x?y"), "http://example.com/a");
        assert_eq!(normalize("http://example.com/list?page=1"), normalize("http://example.com/list?page=2"));
    }

    #[test]
    fn test_onion_address() {
        let onion = "http://expyuzz4wqqyqhjn.onion";
        assert_eq!(normalize(onion), "http://expyuzz4wqqyqhjn.onion/");
    }

    #[test]
    fn test_same_resource_normalizes_identically() {
        assert_eq!(normalize("HTTP://Example.COM"), normalize("http://example.com/#intro"));
    }

    #[test]
    fn test_malformed_input_is_best_effort() {
        assert_eq!(normalize("http://exa mple.com"), "http://exa mple.com/");
        assert_eq!(normalize("http://exa mple.com?x"), "http://exa mple.com/");
        assert_eq!(normalize(""), "http:///");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "http://example.com",
            "https://Example.com:443/a/b?c=d#e",
            "example.com",
            "//cdn.example.com/x",
            "http://example.com:8080",
            "foo://host",
            "mailto:someone@example.com",
            "file:///tmp/page.html",
            "http://exa mple.com",
            "http://exa mple.com?x=1",
            "#only-a-fragment",
            "",
            "   http://example.com/padded   ",
            "http://[::1]:3000/ipv6",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_site_of() {
        assert_eq!(site_of("http://Example.com/a"), "example.com");
        assert_eq!(site_of("http://127.0.0.1:8080/"), "127.0.0.1:8080");
        assert_eq!(site_of("http://exa mple.com/x"), "exa mple.com");
    }

    #[test]
    fn test_in_scope() {
        assert!(in_scope("example.com", "example.com"));
        assert!(in_scope("blog.example.com", "example.com"));
        assert!(!in_scope("notexample.com", "example.com"));
        assert!(!in_scope("other.com", "example.com"));
        assert!(!in_scope("example.com", "blog.example.com"));
        assert!(!in_scope("example.com", ""));
    }

    #[test]
    fn test_is_web_scheme() {
        assert!(is_web_scheme("http://a.com/"));
        assert!(is_web_scheme("HTTPS://a.com/"));
        assert!(!is_web_scheme("ftp://a.com/"));
        assert!(!is_web_scheme("mailto:a@b.com"));
    }
}
