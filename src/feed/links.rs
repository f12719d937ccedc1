use crate::feed::classify::{is_feed_url, is_feedlike_url};
use crate::util::resolve_url;
use scraper::{Html, Selector};

/// `<link type="...">` values that advertise a feed.
const FEED_LINK_TYPES: [&str; 5] = [
    "application/rss+xml",
    "text/xml",
    "application/atom+xml",
    "application/x.atom+xml",
    "application/x-atom+xml",
];

/// Where a candidate URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    /// `<link>` element with a feed MIME type
    LinkTag,
    /// Same-site `<a>` whose href ends in a feed extension
    LocalAnchor,
    /// `<a>` whose href mentions a feed keyword anywhere
    RemoteAnchor,
    /// Conventional feed filename joined onto the seed URL
    GuessedPath,
}

/// A URL harvested from markup that has not yet been confirmed as a feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The href exactly as it appeared in the page
    pub href: String,
    /// `href` resolved against the page's base URL
    pub url: String,
    pub source: CandidateSource,
}

impl Candidate {
    pub fn new(base_url: &str, href: &str, source: CandidateSource) -> Self {
        Self {
            href: href.to_owned(),
            url: resolve_url(base_url, href),
            source,
        }
    }
}

/// Candidates extracted from one HTML page, grouped by source, each in
/// document order.
///
/// An anchor can be both local and remote, in which case it appears in both
/// lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    pub link_tags: Vec<Candidate>,
    pub local_anchors: Vec<Candidate>,
    pub remote_anchors: Vec<Candidate>,
}

/// Extracts feed candidates from an HTML page.
///
/// The parsed document is dropped before returning, so the result can be held
/// across `.await` points.
pub fn extract_candidates(html: &str, base_url: &str) -> CandidateSet {
    let document = Html::parse_document(html);
    let (local_anchors, remote_anchors) = anchor_candidates(&document, base_url);

    CandidateSet {
        link_tags: link_tag_candidates(&document, base_url),
        local_anchors,
        remote_anchors,
    }
}

fn link_tag_candidates(document: &Html, base_url: &str) -> Vec<Candidate> {
    let Ok(selector) = Selector::parse("link[type]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter(|link| {
            link.value()
                .attr("type")
                .is_some_and(|t| FEED_LINK_TYPES.contains(&t))
        })
        .map(|link| {
            let href = link.value().attr("href").unwrap_or("");
            Candidate::new(base_url, href, CandidateSource::LinkTag)
        })
        .collect()
}

fn anchor_candidates(document: &Html, base_url: &str) -> (Vec<Candidate>, Vec<Candidate>) {
    let mut local = Vec::new();
    let mut remote = Vec::new();

    let Ok(selector) = Selector::parse("a[href]") else {
        return (local, remote);
    };

    for anchor in document.select(&selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };

        if !href.contains("://") && is_feed_url(href) {
            local.push(Candidate::new(base_url, href, CandidateSource::LocalAnchor));
        }
        if is_feedlike_url(href) {
            remote.push(Candidate::new(base_url, href, CandidateSource::RemoteAnchor));
        }
    }

    (local, remote)
}
