//! HTTP access to the news digests and the GitHub Releases API.
//!
//! Every fetch resolves to a [`FetchOutcome`] instead of an `Err`: the pages
//! degrade to an empty state on any failure, so callers match on the outcome
//! and decide how loudly to log it.
//!
//! # Endpoints
//!
//! - `GET {data_base_url}/latest.json` and `/latest_cn.json`: [`NewsDigest`]
//! - `GET {api}/repos/{owner}/{repo}/releases/latest`: one [`Release`]
//! - `GET {api}/repos/{owner}/{repo}/releases`: all [`Release`]s
//!
//! No retries and no backoff: a slow request simply delays the page. The
//! only time limit is the optional client timeout from [`SiteConfig`].

use crate::config::SiteConfig;
use crate::error::FetchError;
use crate::models::{Language, NewsDigest, Release};
use crate::utils::truncate_for_log;
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Result of a single best-effort fetch.
#[derive(Debug)]
pub enum FetchOutcome<T> {
    Loaded(T),
    Failed(FetchError),
}

#[cfg(test)]
impl<T> FetchOutcome<T> {
    /// Discard the failure reason.
    pub fn loaded(self) -> Option<T> {
        match self {
            FetchOutcome::Loaded(value) => Some(value),
            FetchOutcome::Failed(_) => None,
        }
    }
}

impl<T> From<Result<T, FetchError>> for FetchOutcome<T> {
    fn from(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(value) => FetchOutcome::Loaded(value),
            Err(e) => FetchOutcome::Failed(e),
        }
    }
}

/// Build the shared HTTP client from configuration.
pub fn build_client(config: &SiteConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder().user_agent(config.user_agent.clone());
    if let Some(secs) = config.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build()
}

/// GET `url` and decode the body as JSON.
#[instrument(level = "info", skip(client, headers))]
async fn fetch_json<T>(client: &Client, url: &str, headers: HeaderMap) -> FetchOutcome<T>
where
    T: DeserializeOwned,
{
    let t0 = Instant::now();
    let result = get_json(client, url, headers).await;
    let dt = t0.elapsed();

    match &result {
        Ok(_) => debug!(elapsed_ms = dt.as_millis() as u64, "Fetched JSON"),
        Err(e) => debug!(elapsed_ms = dt.as_millis() as u64, error = %e, "Fetch failed"),
    }
    result.into()
}

async fn get_json<T>(client: &Client, url: &str, headers: HeaderMap) -> Result<T, FetchError>
where
    T: DeserializeOwned,
{
    let request_error = |source| FetchError::Request {
        url: url.to_string(),
        source,
    };

    let response = client
        .get(url)
        .headers(headers)
        .send()
        .await
        .map_err(request_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    let body = response.text().await.map_err(request_error)?;
    serde_json::from_str(&body).map_err(|source| {
        debug!(body_preview = %truncate_for_log(&body, 300), "Response body did not decode");
        FetchError::Decode {
            url: url.to_string(),
            source,
        }
    })
}

fn github_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
    headers
}

/// Fetch the day's digest for one language.
pub async fn fetch_digest(
    client: &Client,
    config: &SiteConfig,
    language: Language,
) -> FetchOutcome<NewsDigest> {
    fetch_json(client, &config.digest_url(language), HeaderMap::new()).await
}

/// Fetch the most recent release of the configured repository.
pub async fn fetch_latest_release(client: &Client, config: &SiteConfig) -> FetchOutcome<Release> {
    fetch_json(client, &config.latest_release_url(), github_headers()).await
}

/// Fetch the releases list of the configured repository.
pub async fn fetch_releases(client: &Client, config: &SiteConfig) -> FetchOutcome<Vec<Release>> {
    fetch_json(client, &config.releases_url(), github_headers()).await
}
