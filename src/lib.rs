//! Discover RSS, Atom and RDF feed URLs for a website from a single seed URL.
//!
//! ```no_run
//! # async fn demo() {
//! let feeds = feedfinder::find_feeds("xkcd.com", &feedfinder::FinderOptions::default()).await;
//! # }
//! ```

pub mod config;
pub mod feed;
pub mod util;

pub use feed::{find_feeds, FeedFinder, FinderOptions};
