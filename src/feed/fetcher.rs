use encoding_rs::{Encoding, UTF_8};
use futures::StreamExt;
use std::time::Duration;
use thiserror::Error;

/// Default response size cap (5MB). Feeds and landing pages beyond this are
/// treated as fetch failures.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 5 * 1024 * 1024;

/// User agent sent when none is configured: `feedfinder/<version>`.
pub const DEFAULT_USER_AGENT: &str = concat!("feedfinder/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur while fetching a URL.
///
/// None of these are fatal to discovery: the pipeline logs them and treats the
/// URL as "not a feed". An HTTP error status is not among them; a 403 or 404
/// page still delivers a body worth inspecting.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, body read, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// Request exceeded the configured per-fetch timeout
    #[error("Request timed out")]
    Timeout,
    /// Response body exceeded the configured size limit
    #[error("Response too large")]
    ResponseTooLarge,
}

/// Retrieves URL bodies as text.
///
/// Wraps a shared [`reqwest::Client`] together with the per-fetch settings
/// that every request in a discovery run uses. Cloning is cheap; the client
/// is reference-counted internally.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    user_agent: String,
    timeout: Option<Duration>,
    max_response_bytes: usize,
}

impl Fetcher {
    /// Creates a fetcher.
    ///
    /// # Arguments
    ///
    /// * `client` - HTTP client (caller controls TLS, redirects, proxies)
    /// * `user_agent` - Overrides [`DEFAULT_USER_AGENT`] when set
    /// * `timeout` - Per-fetch timeout; `None` waits indefinitely
    /// * `max_response_bytes` - Body size cap
    pub fn new(
        client: reqwest::Client,
        user_agent: Option<String>,
        timeout: Option<Duration>,
        max_response_bytes: usize,
    ) -> Self {
        Self {
            client,
            user_agent: user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned()),
            timeout,
            max_response_bytes,
        }
    }

    /// The agent string sent with every request.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Fetches `url` and returns its body decoded as text.
    ///
    /// The body is returned whatever the HTTP status, so bot-blocking and
    /// soft-404 pages can still be classified and searched for links. Non-2xx
    /// statuses are only logged.
    ///
    /// Decoding honours a byte order mark, then the `charset` of the
    /// `Content-Type` header, and falls back to UTF-8. Malformed sequences
    /// are replaced rather than rejected, so a body that was read completely
    /// always yields text.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Network`] - Connection, TLS or body read errors
    /// - [`FetchError::Timeout`] - The configured timeout expired
    /// - [`FetchError::ResponseTooLarge`] - Body exceeded the size cap
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let request = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, &self.user_agent);

        let max_bytes = self.max_response_bytes;
        let work = async move {
            let response = request.send().await?;

            let status = response.status();
            if !status.is_success() {
                tracing::debug!(url = %response.url(), status = %status, "Non-success status, reading body anyway");
            }

            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);

            let bytes = read_limited_bytes(response, max_bytes).await?;
            Ok::<_, FetchError>((bytes, content_type))
        };

        let (bytes, content_type) = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, work)
                .await
                .map_err(|_| FetchError::Timeout)??,
            None => work.await?,
        };

        Ok(decode_body(&bytes, content_type.as_deref()))
    }

    /// Fetches `url`, logging and swallowing any failure.
    ///
    /// Returns `None` when the fetch failed for any reason. This is the entry
    /// point the discovery pipeline uses, since no fetch failure may abort it.
    pub async fn get_feed(&self, url: &str) -> Option<String> {
        match self.fetch(url).await {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Error while fetching URL");
                None
            }
        }
    }
}

/// Decodes a response body: BOM first, then the header charset, then UTF-8.
fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(charset_label)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);

    // `decode` sniffs a BOM before falling back to `encoding`
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::debug!(encoding = used.name(), "Replaced malformed sequences while decoding body");
    }
    text.into_owned()
}

/// Extracts the `charset` parameter from a `Content-Type` value.
fn charset_label(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(['"', '\''].as_ref()))
    })
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(FetchError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(FetchError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
