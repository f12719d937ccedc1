/// Suffixes that mark an anchor href as pointing at a feed document.
const FEED_SUFFIXES: [&str; 4] = [".rss", ".rdf", ".xml", ".atom"];

/// Substrings that make an anchor href look feed-related.
const FEEDLIKE_KEYWORDS: [&str; 5] = ["rss", "rdf", "xml", "atom", "feed"];

/// Decides whether a fetched body is feed content (RSS, RDF or Atom).
///
/// The check is deliberately shallow: it does not validate the feed, it only
/// separates "looks like a feed" from "looks like an HTML page".
///
/// Any `<html` marker wins. HTML error pages and wrappers often mention RSS in
/// their text or embed feed namespaces, and must not be mistaken for feeds.
/// Otherwise the body is a feed if it contains at least one `<rss`, `<rdf` or
/// `<feed` marker, compared case-insensitively.
///
/// # Examples
///
/// ```
/// use feedfinder::feed::is_feed_data;
///
/// assert!(is_feed_data(r#"<?xml version="1.0"?><rss version="2.0"></rss>"#));
/// assert!(is_feed_data("<FEED xmlns=\"http://www.w3.org/2005/Atom\">"));
/// assert!(!is_feed_data("<html><body><rss></rss></body></html>"));
/// ```
pub fn is_feed_data(text: &str) -> bool {
    let data = text.to_lowercase();
    if data.contains("<html") {
        return false;
    }

    let markers = data.matches("<rss").count()
        + data.matches("<rdf").count()
        + data.matches("<feed").count();
    markers > 0
}

/// Returns `true` if the href ends in a feed file extension
/// (`.rss`, `.rdf`, `.xml`, `.atom`), ignoring case.
pub fn is_feed_url(href: &str) -> bool {
    let lower = href.to_lowercase();
    FEED_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix))
}

/// Returns `true` if the href mentions a feed keyword anywhere
/// (`rss`, `rdf`, `xml`, `atom`, `feed`), ignoring case.
pub fn is_feedlike_url(href: &str) -> bool {
    let lower = href.to_lowercase();
    FEEDLIKE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}
