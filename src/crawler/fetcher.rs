//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client from the `[fetch]` configuration
//! - Mapping non-success responses and network faults to [`TransportError`]
//! - Concurrent batched fetching with per-element failure capture

use crate::config::FetchConfig;
use crate::TransportError;
use async_trait::async_trait;
use bytes::Bytes;
use futures::future::join_all;
use reqwest::{Client, StatusCode};
use std::sync::Arc;

/// Outcome of one GET: the response bytes or the captured failure
pub type FetchOutcome = Result<Bytes, TransportError>;

/// Status codes treated as a successful fetch
pub const SUCCESS_STATUSES: [StatusCode; 3] = [
    StatusCode::OK,
    StatusCode::CREATED,
    StatusCode::NON_AUTHORITATIVE_INFORMATION,
];

/// Issues GET requests and returns raw bytes
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> FetchOutcome;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get(&self, url: &str) -> FetchOutcome {
        (**self).get(url).await
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetch configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use ycrawler::config::FetchConfig;
/// use ycrawler::crawler::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    if config.accept_invalid_certs {
        tracing::warn!("TLS certificate validation is disabled");
    }

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout())
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`Transport`] backed by a shared `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> FetchOutcome {
        tracing::debug!("Request GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| classify_error(url, e))?;

        if !SUCCESS_STATUSES.contains(&status) {
            tracing::warn!("Request failed GET {} {}", url, status.as_u16());
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        tracing::trace!("Response {} ({} bytes)", url, body.len());
        Ok(body)
    }
}

fn classify_error(url: &str, error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout {
            url: url.to_string(),
        }
    } else {
        TransportError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}

/// Fetches every URL concurrently as one batch
///
/// The batch itself never fails: each element resolves to its own
/// [`FetchOutcome`], and the result is positionally aligned with `urls`.
/// No concurrency cap is applied, a batch of N URLs opens N requests.
pub async fn fetch_batch<T, S>(transport: &T, urls: &[S]) -> Vec<FetchOutcome>
where
    T: Transport + ?Sized,
    S: AsRef<str>,
{
    let outcomes = join_all(urls.iter().map(|url| transport.get(url.as_ref()))).await;

    let failed = outcomes.iter().filter(|o| o.is_err()).count();
    if failed > 0 {
        tracing::debug!("Batch of {} finished with {} failures", urls.len(), failed);
    }

    outcomes
}
