use crate::feed::classify::is_feed_data;
use crate::feed::fetcher::Fetcher;
use futures::stream::{self, StreamExt};

/// Classification of a single fetched URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedVerdict {
    pub url: String,
    pub is_feed: bool,
}

/// Fetches `url` and classifies the body. A failed fetch is "not a feed".
pub async fn check(fetcher: &Fetcher, url: &str) -> FeedVerdict {
    let is_feed = match fetcher.get_feed(url).await {
        Some(text) => is_feed_data(&text),
        None => false,
    };
    tracing::debug!(url = %url, is_feed = is_feed, "Checked candidate");

    FeedVerdict {
        url: url.to_owned(),
        is_feed,
    }
}

/// Checks a batch of URLs concurrently and returns one verdict per input,
/// in input order.
///
/// Up to `max_concurrent` fetches are in flight at once (a value of 0 is
/// treated as 1). A batch no larger than that is issued fully in parallel;
/// a larger one is issued in waves, each new fetch starting as an earlier
/// one finishes. Each check is independent: a slow or failing URL only
/// affects its own verdict, and the call returns once every check has either
/// completed or timed out.
pub async fn verify_all<S: AsRef<str>>(
    fetcher: &Fetcher,
    urls: &[S],
    max_concurrent: usize,
) -> Vec<FeedVerdict> {
    stream::iter(urls)
        .map(|url| check(fetcher, url.as_ref()))
        // Ordered buffering so verdicts line up with the input list
        .buffered(max_concurrent.max(1))
        .collect()
        .await
}

/// Filters `urls` down to those confirmed to serve feed content, preserving
/// their relative order.
pub async fn filter_is_feed<S: AsRef<str>>(
    fetcher: &Fetcher,
    urls: &[S],
    max_concurrent: usize,
) -> Vec<String> {
    if urls.is_empty() {
        return Vec::new();
    }

    verify_all(fetcher, urls, max_concurrent)
        .await
        .into_iter()
        .filter(|verdict| verdict.is_feed)
        .map(|verdict| verdict.url)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::fetcher::DEFAULT_MAX_RESPONSE_BYTES;
    use pretty_assertions::assert_eq;
    use std::time::{Duration, Instant};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const RSS: &str = r#"<?xml version="1.0"?><rss version="2.0"><channel></channel></rss>"#;
    const HTML: &str = "<html><body>Not a feed</body></html>";

    fn fetcher(timeout: Option<Duration>) -> Fetcher {
        Fetcher::new(
            reqwest::Client::new(),
            None,
            timeout,
            DEFAULT_MAX_RESPONSE_BYTES,
        )
    }

    async fn mount(server: &MockServer, route: &str, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(template)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_filter_keeps_feeds_in_input_order() {
        let server = MockServer::start().await;
        mount(&server, "/a.xml", ResponseTemplate::new(200).set_body_string(RSS)).await;
        mount(&server, "/page", ResponseTemplate::new(200).set_body_string(HTML)).await;
        mount(&server, "/b.xml", ResponseTemplate::new(200).set_body_string(RSS)).await;
        mount(&server, "/gone", ResponseTemplate::new(404)).await;

        let urls: Vec<String> = ["/b.xml", "/page", "/gone", "/a.xml"]
            .iter()
            .map(|p| format!("{}{}", server.uri(), p))
            .collect();

        let feeds = filter_is_feed(&fetcher(None), &urls, 8).await;
        assert_eq!(feeds, vec![urls[0].clone(), urls[3].clone()]);
    }

    #[tokio::test]
    async fn test_verify_all_returns_one_verdict_per_url() {
        let server = MockServer::start().await;
        mount(&server, "/feed", ResponseTemplate::new(200).set_body_string(RSS)).await;

        let urls = vec![format!("{}/feed", server.uri()), format!("{}/missing", server.uri())];
        let verdicts = verify_all(&fetcher(None), &urls, 4).await;

        assert_eq!(
            verdicts,
            vec![
                FeedVerdict { url: urls[0].clone(), is_feed: true },
                FeedVerdict { url: urls[1].clone(), is_feed: false },
            ]
        );
    }

    #[tokio::test]
    async fn test_slow_url_times_out_without_failing_batch() {
        let server = MockServer::start().await;
        mount(
            &server,
            "/slow.xml",
            ResponseTemplate::new(200)
                .set_body_string(RSS)
                .set_delay(Duration::from_secs(10)),
        )
        .await;
        mount(&server, "/fast.xml", ResponseTemplate::new(200).set_body_string(RSS)).await;

        let urls = vec![
            format!("{}/slow.xml", server.uri()),
            format!("{}/fast.xml", server.uri()),
        ];
        let feeds = filter_is_feed(&fetcher(Some(Duration::from_millis(200))), &urls, 8).await;
        assert_eq!(feeds, vec![urls[1].clone()]);
    }

    #[tokio::test]
    async fn test_checks_run_concurrently() {
        let server = MockServer::start().await;
        for i in 0..4 {
            mount(
                &server,
                &format!("/{i}.xml"),
                ResponseTemplate::new(200)
                    .set_body_string(RSS)
                    .set_delay(Duration::from_millis(300)),
            )
            .await;
        }

        let urls: Vec<String> = (0..4).map(|i| format!("{}/{i}.xml", server.uri())).collect();
        let start = Instant::now();
        let feeds = filter_is_feed(&fetcher(None), &urls, 8).await;

        assert_eq!(feeds.len(), 4);
        // Sequential checks would take at least 1.2s
        assert!(start.elapsed() < Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn test_batch_over_bound_runs_in_waves() {
        let server = MockServer::start().await;
        for i in 0..3 {
            mount(
                &server,
                &format!("/{i}.xml"),
                ResponseTemplate::new(200)
                    .set_body_string(RSS)
                    .set_delay(Duration::from_millis(200)),
            )
            .await;
        }

        let urls: Vec<String> = (0..3).map(|i| format!("{}/{i}.xml", server.uri())).collect();
        let start = Instant::now();
        let feeds = filter_is_feed(&fetcher(None), &urls, 1).await;

        assert_eq!(feeds, urls);
        // One fetch in flight at a time
        assert!(start.elapsed() >= Duration::from_millis(600));
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let feeds = filter_is_feed::<String>(&fetcher(None), &[], 8).await;
        assert!(feeds.is_empty());
    }
}
