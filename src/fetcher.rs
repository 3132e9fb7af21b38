//! Rate-limited Wikipedia fetching with retry/backoff.
//!
//! The fetcher owns the two collaborator duties the cleaning pipeline
//! deliberately stays out of: retrieving page HTML (and random title
//! batches) over HTTP, and building the canonical page URL for a title.

use std::collections::HashSet;
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{Error, Result};

/// Site root used for canonical page links.
pub const WIKIPEDIA_BASE_URL: &str = "https://en.wikipedia.org/";
/// MediaWiki API endpoint used for random title enumeration.
pub const WIKIPEDIA_API_URL: &str = "https://en.wikipedia.org/w/api.php";

/// Statuses worth retrying: rate limiting and transient server failures.
const RETRYABLE_STATUS: [u16; 5] = [429, 500, 502, 503, 504];

/// Largest random-title batch the API serves per request.
const RANDOM_BATCH_LIMIT: usize = 500;

/// Title path segments keep the characters MediaWiki leaves readable.
const TITLE_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'-')
    .remove(b'.')
    .remove(b'~');

/// Connection and politeness settings for a [`Fetcher`].
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub user_agent: String,
    pub retries: u32,
    pub backoff_base: Duration,
    pub request_delay: Duration,
    pub timeout: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: format!(
                "wikiharvest/{} (https://github.com/wikiharvest/wikiharvest)",
                env!("CARGO_PKG_VERSION")
            ),
            retries: 3,
            backoff_base: Duration::from_millis(500),
            request_delay: Duration::from_secs(1),
            timeout: Duration::from_secs(15),
        }
    }
}

impl FetcherConfig {
    /// Lighter settings for batched API calls (random title enumeration).
    #[must_use]
    pub fn api_defaults() -> Self {
        Self {
            retries: 2,
            request_delay: Duration::from_millis(200),
            ..Self::default()
        }
    }
}

/// Minimum-delay gate between consecutive requests.
///
/// The lock is held across the sleep so concurrent callers queue up behind
/// one global rate limit.
#[derive(Debug)]
struct RateLimiter {
    delay: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_call: Mutex::new(None),
        }
    }

    async fn wait(&self) {
        let mut last_call = self.last_call.lock().await;
        if let Some(previous) = *last_call {
            let elapsed = previous.elapsed();
            if elapsed < self.delay {
                tokio::time::sleep(self.delay - elapsed).await;
            }
        }
        *last_call = Some(Instant::now());
    }
}

/// HTTP client for Wikipedia pages and the MediaWiki API.
#[derive(Debug)]
pub struct Fetcher {
    client: reqwest::Client,
    config: FetcherConfig,
    limiter: RateLimiter,
}

impl Fetcher {
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;
        let limiter = RateLimiter::new(config.request_delay);
        Ok(Self {
            client,
            config,
            limiter,
        })
    }

    /// Canonical page URL for a title (spaces become underscores, the rest
    /// is percent-encoded).
    #[must_use]
    pub fn page_url(title: &str) -> String {
        let formatted = title.replace(' ', "_");
        let encoded = utf8_percent_encode(&formatted, TITLE_SEGMENT).to_string();
        Url::parse(WIKIPEDIA_BASE_URL)
            .and_then(|base| base.join(&format!("wiki/{encoded}")))
            .map_or_else(
                |_| format!("{WIKIPEDIA_BASE_URL}wiki/{encoded}"),
                |joined| joined.to_string(),
            )
    }

    /// Fetch one article page as UTF-8 HTML.
    pub async fn fetch_page_html(&self, title: &str) -> Result<String> {
        let url = Self::page_url(title);
        info!(title, url = %url, "fetching page");
        let response = self.get_with_retry(&url, &[]).await?;
        let bytes = response.bytes().await?;
        debug!(title, len = bytes.len(), "page fetched");
        Ok(crate::encoding::decode_html(&bytes))
    }

    /// Fetch `count` unique random article titles from the API, preserving
    /// arrival order. Stops early (with whatever was gathered) if the API
    /// returns an empty batch.
    pub async fn random_titles(&self, count: usize) -> Result<Vec<String>> {
        let mut titles: Vec<String> = Vec::with_capacity(count);
        let mut seen: HashSet<String> = HashSet::with_capacity(count);
        if count == 0 {
            return Ok(titles);
        }

        info!(count, "fetching random page titles");
        while titles.len() < count {
            let batch_size = (count - titles.len()).min(RANDOM_BATCH_LIMIT);
            let limit = batch_size.to_string();
            let params: [(&str, &str); 5] = [
                ("action", "query"),
                ("format", "json"),
                ("list", "random"),
                ("rnnamespace", "0"),
                ("rnlimit", &limit),
            ];

            let response = self.get_with_retry(WIKIPEDIA_API_URL, &params).await?;
            let payload: RandomQueryResponse = response.json().await?;
            let batch = payload.query.random;
            if batch.is_empty() {
                warn!("random title API returned an empty batch; stopping early");
                break;
            }
            for page in batch {
                if seen.insert(page.title.clone()) {
                    titles.push(page.title);
                }
            }
            debug!(unique = titles.len(), "random title batch processed");
        }

        titles.truncate(count);
        Ok(titles)
    }

    /// One rate-limited GET with exponential backoff on transient failures.
    async fn get_with_retry(&self, url: &str, query: &[(&str, &str)]) -> Result<reqwest::Response> {
        let mut attempt: u32 = 0;
        loop {
            self.limiter.wait().await;
            let result = self.client.get(url).query(query).send().await;

            match result {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }
                    if RETRYABLE_STATUS.contains(&status.as_u16()) && attempt < self.config.retries
                    {
                        self.backoff(url, attempt, &format!("HTTP {status}")).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(Error::Fetch(format!("HTTP {status} for {url}")));
                }
                Err(err) => {
                    if attempt < self.config.retries {
                        self.backoff(url, attempt, &err.to_string()).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(err.into());
                }
            }
        }
    }

    async fn backoff(&self, url: &str, attempt: u32, cause: &str) {
        let delay = self.config.backoff_base * 2_u32.saturating_pow(attempt);
        warn!(
            url,
            attempt = attempt + 1,
            retries = self.config.retries,
            cause,
            "retrying after {:.1}s",
            delay.as_secs_f64()
        );
        tokio::time::sleep(delay).await;
    }
}

#[derive(Debug, Deserialize)]
struct RandomQueryResponse {
    #[serde(default)]
    query: RandomQuery,
}

#[derive(Debug, Default, Deserialize)]
struct RandomQuery {
    #[serde(default)]
    random: Vec<RandomPage>,
}

#[derive(Debug, Deserialize)]
struct RandomPage {
    title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_url_underscores_and_encodes() {
        assert_eq!(
            Fetcher::page_url("Ada Lovelace"),
            "https://en.wikipedia.org/wiki/Ada_Lovelace"
        );
        assert_eq!(
            Fetcher::page_url("C++ (programming language)"),
            "https://en.wikipedia.org/wiki/C%2B%2B_%28programming_language%29"
        );
    }

    #[test]
    fn page_url_encodes_slashes() {
        assert_eq!(
            Fetcher::page_url("AC/DC"),
            "https://en.wikipedia.org/wiki/AC%2FDC"
        );
    }

    #[test]
    fn api_defaults_are_lighter_than_page_defaults() {
        let api = FetcherConfig::api_defaults();
        let page = FetcherConfig::default();
        assert!(api.request_delay < page.request_delay);
        assert!(api.retries < page.retries);
    }

    #[test]
    fn random_response_parses_expected_shape() {
        let json = r#"{"batchcomplete":"","query":{"random":[
            {"id":1,"ns":0,"title":"First"},{"id":2,"ns":0,"title":"Second"}]}}"#;
        let payload: RandomQueryResponse =
            serde_json::from_str(json).expect("valid API payload");
        let titles: Vec<&str> = payload
            .query
            .random
            .iter()
            .map(|page| page.title.as_str())
            .collect();
        assert_eq!(titles, ["First", "Second"]);
    }

    #[test]
    fn random_response_tolerates_missing_query() {
        let payload: RandomQueryResponse =
            serde_json::from_str("{}").expect("empty payload still parses");
        assert!(payload.query.random.is_empty());
    }
}
