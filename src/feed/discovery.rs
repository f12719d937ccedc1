use crate::feed::classify::is_feed_data;
use crate::feed::fetcher::{Fetcher, DEFAULT_MAX_RESPONSE_BYTES};
use crate::feed::links::{extract_candidates, Candidate, CandidateSource};
use crate::feed::rank::rank;
use crate::feed::verifier::{self, FeedVerdict};
use crate::util::coerce_url;
use std::time::Duration;

/// Conventional feed filenames tried when nothing on the page points at a feed.
pub const DEFAULT_GUESS_PATHS: [&str; 6] = [
    "atom.xml",
    "index.atom",
    "index.rdf",
    "rss.xml",
    "index.xml",
    "index.rss",
];

/// Default bound on in-flight verification fetches per stage.
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 32;

/// Settings for one discovery run.
#[derive(Debug, Clone)]
pub struct FinderOptions {
    /// Run every stage instead of stopping at the first one that confirms a feed
    pub check_all: bool,
    /// User agent override; `None` sends `feedfinder/<version>`
    pub user_agent: Option<String>,
    /// Per-fetch timeout; `None` means no timeout
    pub timeout: Option<Duration>,
    /// Filenames joined onto the seed URL in the guessing stage
    pub guess_paths: Vec<String>,
    /// Upper bound on concurrent fetches within a stage
    pub max_concurrent_fetches: usize,
    /// Response size cap per fetch
    pub max_response_bytes: usize,
}

impl Default for FinderOptions {
    fn default() -> Self {
        Self {
            check_all: false,
            user_agent: None,
            timeout: None,
            guess_paths: DEFAULT_GUESS_PATHS.iter().map(|p| (*p).to_owned()).collect(),
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }
}

/// Heuristic stages run after the seed page turns out not to be a feed,
/// in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    LinkTags,
    LocalAnchors,
    RemoteAnchors,
    GuessedPaths,
}

impl Stage {
    const ALL: [Stage; 4] = [
        Stage::LinkTags,
        Stage::LocalAnchors,
        Stage::RemoteAnchors,
        Stage::GuessedPaths,
    ];

    fn name(self) -> &'static str {
        match self {
            Stage::LinkTags => "<link> tags",
            Stage::LocalAnchors => "local <a> links",
            Stage::RemoteAnchors => "remote <a> links",
            Stage::GuessedPaths => "guessed paths",
        }
    }
}

/// Discovers feed URLs for a website.
///
/// Holds the fetcher and options for a discovery run. Reusable across seeds;
/// each [`find`](Self::find) call is independent.
#[derive(Debug, Clone)]
pub struct FeedFinder {
    fetcher: Fetcher,
    options: FinderOptions,
}

impl FeedFinder {
    /// Creates a finder with a fresh HTTP client.
    pub fn new(options: FinderOptions) -> Self {
        Self::with_client(reqwest::Client::new(), options)
    }

    /// Creates a finder that shares an existing HTTP client.
    pub fn with_client(client: reqwest::Client, options: FinderOptions) -> Self {
        let fetcher = Fetcher::new(
            client,
            options.user_agent.clone(),
            options.timeout,
            options.max_response_bytes,
        );
        Self { fetcher, options }
    }

    /// Options this finder was built with.
    pub fn options(&self) -> &FinderOptions {
        &self.options
    }

    /// Fetches `url`, returning `None` (after logging) on any failure.
    pub async fn get_feed(&self, url: &str) -> Option<String> {
        self.fetcher.get_feed(url).await
    }

    /// Checks whether `url` serves feed content. Fetch failures yield `false`.
    pub async fn is_feed(&self, url: &str) -> bool {
        verifier::check(&self.fetcher, url).await.is_feed
    }

    /// Concurrently checks `urls`, returning a verdict for each in input order.
    pub async fn verify<S: AsRef<str>>(&self, urls: &[S]) -> Vec<FeedVerdict> {
        verifier::verify_all(&self.fetcher, urls, self.options.max_concurrent_fetches).await
    }

    /// Concurrently filters `urls` down to confirmed feeds, in input order.
    pub async fn filter_is_feed<S: AsRef<str>>(&self, urls: &[S]) -> Vec<String> {
        verifier::filter_is_feed(&self.fetcher, urls, self.options.max_concurrent_fetches).await
    }

    /// Discovers feeds for a seed address.
    ///
    /// The seed is normalized with [`coerce_url`] and fetched. If it is itself
    /// a feed, it is the only result. Otherwise candidates are verified stage
    /// by stage: `<link>` tags, local `<a>` links, remote `<a>` links, then
    /// guessed filenames. Unless [`FinderOptions::check_all`] is set, the
    /// first stage that confirms anything ends the search.
    ///
    /// Never fails: an unreachable seed yields an empty list, and failures
    /// while checking candidates only exclude those candidates.
    pub async fn find(&self, url: &str) -> Vec<String> {
        let url = coerce_url(url);

        let Some(text) = self.get_feed(&url).await else {
            return Vec::new();
        };

        if is_feed_data(&text) {
            tracing::info!(url = %url, "Seed URL is a feed");
            return vec![url];
        }

        let mut candidates = extract_candidates(&text, &url);
        drop(text);

        let mut found: Vec<String> = Vec::new();
        for stage in Stage::ALL {
            tracing::info!(stage = stage.name(), "Looking for feeds");

            let batch: Vec<Candidate> = match stage {
                Stage::LinkTags => std::mem::take(&mut candidates.link_tags),
                Stage::LocalAnchors => std::mem::take(&mut candidates.local_anchors),
                Stage::RemoteAnchors => std::mem::take(&mut candidates.remote_anchors),
                Stage::GuessedPaths => self.guessed_candidates(&url),
            };
            let urls: Vec<&str> = batch.iter().map(|c| c.url.as_str()).collect();

            found.extend(self.filter_is_feed(&urls).await);
            tracing::info!(
                stage = stage.name(),
                candidates = urls.len(),
                found = found.len(),
                "Stage complete"
            );

            if !found.is_empty() && !self.options.check_all {
                break;
            }
        }

        rank(&found)
    }

    fn guessed_candidates(&self, url: &str) -> Vec<Candidate> {
        self.options
            .guess_paths
            .iter()
            .map(|path| Candidate::new(url, path, CandidateSource::GuessedPath))
            .collect()
    }
}

/// Discovers feed URLs for `url` using a one-off [`FeedFinder`].
///
/// # Examples
///
/// ```no_run
/// use feedfinder::{find_feeds, FinderOptions};
///
/// # async fn demo() {
/// let feeds = find_feeds("xkcd.com", &FinderOptions::default()).await;
/// for feed in feeds {
///     println!("{feed}");
/// }
/// # }
/// ```
pub async fn find_feeds(url: &str, options: &FinderOptions) -> Vec<String> {
    FeedFinder::new(options.clone()).find(url).await
}
