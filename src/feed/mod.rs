//! Feed discovery: turn a website address into the feed URLs it publishes.
//!
//! The pipeline runs leaf-first through these submodules:
//!
//! - [`fetcher`] - HTTP retrieval with timeout, size cap and user agent
//! - [`classify`] - Decide whether a body is feed content or an HTML page
//! - [`links`] - Harvest candidate URLs from `<link>` and `<a>` elements
//! - [`verifier`] - Concurrently fetch and classify a batch of candidates
//! - [`rank`] - Deduplicate and order confirmed feeds by likelihood
//! - [`discovery`] - Sequence the stages with early exit
//!
//! # Example
//!
//! ```no_run
//! use feedfinder::feed::{FeedFinder, FinderOptions};
//!
//! # async fn demo() {
//! let finder = FeedFinder::new(FinderOptions {
//!     check_all: true,
//!     ..FinderOptions::default()
//! });
//! let feeds = finder.find("dan.iel.fm").await;
//! # }
//! ```

mod classify;
mod discovery;
mod fetcher;
mod links;
mod rank;
mod verifier;

pub use classify::{is_feed_data, is_feed_url, is_feedlike_url};
pub use discovery::{
    find_feeds, FeedFinder, FinderOptions, DEFAULT_GUESS_PATHS, DEFAULT_MAX_CONCURRENT_FETCHES,
};
pub use fetcher::{FetchError, Fetcher, DEFAULT_MAX_RESPONSE_BYTES, DEFAULT_USER_AGENT};
pub use links::{extract_candidates, Candidate, CandidateSet, CandidateSource};
pub use rank::{rank, score};
pub use verifier::FeedVerdict;
