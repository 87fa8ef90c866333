use super::dedup::dedup_by_id;
use super::types::{FeedDocument, NewsArticle};
use futures::StreamExt;
use std::time::Duration;
use thiserror::Error;
use url::Url;

const MAX_FEED_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Query parameter carrying the cache-busting timestamp.
pub const CACHE_BUST_PARAM: &str = "t";

/// The only message shown to the user when a load fails, whatever the cause.
pub const LOAD_FAILED_MESSAGE: &str = "No se pudieron cargar las noticias de ISOTools.";

/// Errors that can occur while loading the news feed.
///
/// All variants collapse to [`LOAD_FAILED_MESSAGE`] in the UI; the detail
/// is only logged.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,
    /// Body was not valid JSON (or not a JSON object)
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Response body exceeded the 10MB size limit
    #[error("Response too large")]
    ResponseTooLarge,
    /// Configured feed URL could not be parsed
    #[error("Invalid feed URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl FetchError {
    /// Text shown in the view for this failure.
    pub fn user_message(&self) -> &'static str {
        LOAD_FAILED_MESSAGE
    }
}

/// Append `t=<epoch millis>` to the feed URL, keeping any existing query.
///
/// A `t` already present in the base URL is replaced.
pub fn cache_busting_url(base: &str, now_millis: i64) -> Result<Url, FetchError> {
    let mut url = Url::parse(base)?;
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| *k != CACHE_BUST_PARAM)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (k, v) in &kept {
            pairs.append_pair(k, v);
        }
        pairs.append_pair(CACHE_BUST_PARAM, &now_millis.to_string());
    }
    Ok(url)
}

/// Fetch and decode the feed document with a single GET.
///
/// No retry is attempted. `timeout` of `None` waits indefinitely.
pub async fn fetch_document(
    client: &reqwest::Client,
    base_url: &str,
    timeout: Option<Duration>,
) -> Result<FeedDocument, FetchError> {
    let url = cache_busting_url(base_url, chrono::Utc::now().timestamp_millis())?;
    tracing::debug!(url = %url, "Fetching news feed");

    let request = get_body(client, &url);
    let bytes = match timeout {
        Some(limit) => tokio::time::timeout(limit, request)
            .await
            .map_err(|_| FetchError::Timeout)??,
        None => request.await?,
    };

    let value: serde_json::Value = serde_json::from_slice(&bytes)?;
    Ok(FeedDocument::from_value(value)?)
}

async fn get_body(client: &reqwest::Client, url: &Url) -> Result<Vec<u8>, FetchError> {
    let response = client.get(url.as_str()).send().await?;

    if !response.status().is_success() {
        return Err(FetchError::HttpStatus(response.status().as_u16()));
    }

    read_limited_bytes(response, MAX_FEED_SIZE).await
}

/// Run one complete load: fetch, extract `daily_news`, dedup by id.
pub async fn load_articles(
    client: &reqwest::Client,
    base_url: &str,
    timeout: Option<Duration>,
) -> Result<Vec<NewsArticle>, FetchError> {
    let document = fetch_document(client, base_url, timeout).await?;
    let articles = dedup_by_id(document.articles());
    tracing::info!(count = articles.len(), "News feed loaded");
    Ok(articles)
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
