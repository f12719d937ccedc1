//! Utility functions for URL handling.
//!
//! - **Normalization**: turn a human-typed address into a fetchable URL
//! - **Resolution**: join hrefs harvested from markup onto a base URL
//!
//! # Examples
//!
//! ```
//! use feedfinder::util::{coerce_url, resolve_url};
//!
//! let seed = coerce_url("example.com/blog/");
//! assert_eq!(seed, "http://example.com/blog/");
//!
//! let feed = resolve_url(&seed, "atom.xml");
//! assert_eq!(feed, "http://example.com/blog/atom.xml");
//! ```

mod normalize;

pub use normalize::{coerce_url, resolve_url};
