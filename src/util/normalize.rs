use url::Url;

/// Coerces a user-supplied address into a fetchable absolute URL.
///
/// Rules are applied in order:
/// - Surrounding whitespace is trimmed
/// - `feed://host/path` becomes `http://host/path`
/// - `http://` and `https://` URLs are returned as-is
/// - Anything else gets `http://` prepended
///
/// This is a pure string transform. It never fails; a malformed address is
/// coerced and left for the fetcher to reject.
///
/// # Examples
///
/// ```
/// use feedfinder::util::coerce_url;
///
/// assert_eq!(coerce_url("  example.com/blog "), "http://example.com/blog");
/// assert_eq!(coerce_url("feed://example.com/rss"), "http://example.com/rss");
/// assert_eq!(coerce_url("https://example.com"), "https://example.com");
/// ```
pub fn coerce_url(input: &str) -> String {
    let url = input.trim();

    if let Some(rest) = url.strip_prefix("feed://") {
        return format!("http://{rest}");
    }

    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_owned();
    }

    format!("http://{url}")
}

/// Resolves a potentially relative href against a base URL.
///
/// Uses standard URL joining, so absolute hrefs replace the base,
/// protocol-relative hrefs inherit its scheme and path-relative hrefs are
/// joined onto its directory.
///
/// If the base cannot be parsed or the join fails, the href is returned
/// unchanged. Such a URL will fail to fetch and be treated as "not a feed".
pub fn resolve_url(base_url: &str, href: &str) -> String {
    match Url::parse(base_url).and_then(|base| base.join(href)) {
        Ok(resolved) => resolved.to_string(),
        Err(e) => {
            tracing::debug!(base = %base_url, href = %href, error = %e, "Could not resolve href");
            href.to_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- coerce_url ---

    #[test]
    fn test_coerce_trims_whitespace() {
        assert_eq!(coerce_url("  http://example.com  "), "http://example.com");
        assert_eq!(coerce_url("\texample.com\n"), "http://example.com");
    }

    #[test]
    fn test_coerce_feed_scheme() {
        assert_eq!(
            coerce_url("feed://example.com/atom.xml"),
            "http://example.com/atom.xml"
        );
    }

    #[test]
    fn test_coerce_keeps_http_and_https() {
        assert_eq!(coerce_url("http://example.com/"), "http://example.com/");
        assert_eq!(coerce_url("https://example.com/"), "https://example.com/");
    }

    #[test]
    fn test_coerce_prepends_http() {
        assert_eq!(
            coerce_url("www.example.com/blog/"),
            "http://www.example.com/blog/"
        );
    }

    #[test]
    fn test_coerce_garbage_is_coerced_not_rejected() {
        assert_eq!(coerce_url("asdasd"), "http://asdasd");
        assert_eq!(coerce_url(""), "http://");
    }

    #[test]
    fn test_coerce_other_scheme_is_prefixed() {
        // Only feed:// is rewritten; other schemes are treated as host text
        assert_eq!(coerce_url("ftp://example.com"), "http://ftp://example.com");
    }

    // --- resolve_url ---

    #[test]
    fn test_resolve_absolute_url() {
        assert_eq!(
            resolve_url("https://example.com", "https://other.com/feed"),
            "https://other.com/feed"
        );
    }

    #[test]
    fn test_resolve_root_relative_url() {
        assert_eq!(
            resolve_url("https://example.com/page", "/feed.xml"),
            "https://example.com/feed.xml"
        );
    }

    #[test]
    fn test_resolve_protocol_relative() {
        assert_eq!(
            resolve_url("https://example.com", "//cdn.example.com/feed"),
            "https://cdn.example.com/feed"
        );
    }

    #[test]
    fn test_resolve_relative_path() {
        assert_eq!(
            resolve_url("https://example.com/blog/", "feed.xml"),
            "https://example.com/blog/feed.xml"
        );
        assert_eq!(
            resolve_url("https://example.com/blog/post", "feed.xml"),
            "https://example.com/blog/feed.xml"
        );
    }

    #[test]
    fn test_resolve_empty_href_is_base() {
        assert_eq!(
            resolve_url("https://example.com/blog/", ""),
            "https://example.com/blog/"
        );
    }

    #[test]
    fn test_resolve_unparseable_base_returns_href() {
        assert_eq!(resolve_url("not a url", "feed.xml"), "feed.xml");
    }
}
