use std::collections::HashSet;

/// Keywords in descending priority; the first one present decides the score.
const KEYWORD_WEIGHTS: [(&str, i32); 5] = [
    ("atom", 5),
    ("rss", 4),
    ("rdf", 3),
    (".xml", 2),
    ("feed", 1),
];

/// Heuristic feed-likelihood score of a confirmed feed URL.
///
/// Only used to order results; it never decides whether something is a feed.
/// Comment feeds and GeoRSS feeds sink below everything else.
///
/// # Examples
///
/// ```
/// use feedfinder::feed::score;
///
/// assert_eq!(score("http://x.com/comments/feed"), -2);
/// assert_eq!(score("http://x.com/atom.xml"), 5);
/// assert_eq!(score("http://x.com/posts"), 0);
/// ```
pub fn score(url: &str) -> i32 {
    if url.contains("comments") {
        return -2;
    }
    if url.contains("georss") {
        return -1;
    }

    KEYWORD_WEIGHTS
        .iter()
        .find(|(kw, _)| url.contains(kw))
        .map_or(0, |&(_, weight)| weight)
}

/// Deduplicates feed URLs and orders them by descending [`score`].
///
/// Duplicates are removed by exact string match, keeping the first
/// occurrence. The sort is stable, so equally scored URLs keep first-seen
/// order and ranking an already ranked list is a no-op.
pub fn rank<S: AsRef<str>>(urls: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ranked: Vec<String> = urls
        .iter()
        .map(AsRef::as_ref)
        .filter(|url| seen.insert(*url))
        .map(str::to_owned)
        .collect();

    ranked.sort_by_key(|url| std::cmp::Reverse(score(url)));
    ranked
}
