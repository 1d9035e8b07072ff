//! kinopoisk.dev HTTP client.
//!
//! Direct HTTP via reqwest; auth is a single `X-API-KEY` header. Implements
//! [`PersonFetcher`] so related-person resolution can run against the live
//! API while tests inject stubs.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Error;
use crate::normalize::fix_photo_url;
use crate::resolver::PersonFetcher;
use crate::types::{FullPersonRecord, SearchCandidate};

const API_BASE: &str = "https://api.kinopoisk.dev/v1.4";
const SEARCH_LIMIT: u32 = 30;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    docs: Vec<SearchCandidate>,
}

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 250,
            max_backoff_ms: 2_000,
        }
    }
}

pub struct KinopoiskClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
    retry: RetryPolicy,
}

impl KinopoiskClient {
    /// Rejects an empty token up front so no request ever goes out
    /// unauthenticated.
    pub fn new(token: impl Into<String>) -> Result<Self, Error> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::MissingToken);
        }
        Ok(Self {
            client: reqwest::Client::new(),
            token,
            base_url: API_BASE.to_string(),
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Search persons by free-text query.
    ///
    /// Photo URLs in search results carry the same duplicated-scheme defect
    /// as full records and are repaired on the way in.
    pub async fn search_persons(&self, query: &str) -> Result<Vec<SearchCandidate>, Error> {
        let response: SearchResponse = self
            .get_json(
                "/person/search",
                &[
                    ("query", query.to_string()),
                    ("limit", SEARCH_LIMIT.to_string()),
                ],
            )
            .await?;
        Ok(fix_candidate_photos(response.docs))
    }

    /// Fetch the full record for one person.
    pub async fn get_person(&self, id: i64) -> Result<FullPersonRecord, Error> {
        self.get_json(&format!("/person/{}", id), &[]).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        let request = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .header("X-API-KEY", &self.token)
            .header(reqwest::header::ACCEPT, "*/*")
            .query(query);

        let response = send_with_retry(request, &self.retry).await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl PersonFetcher for KinopoiskClient {
    async fn fetch_person(&self, id: i64) -> Result<FullPersonRecord, Error> {
        self.get_person(id).await
    }
}

fn fix_candidate_photos(docs: Vec<SearchCandidate>) -> Vec<SearchCandidate> {
    docs.into_iter()
        .map(|mut candidate| {
            if let Some(photo) = candidate.photo.take() {
                candidate.photo = Some(fix_photo_url(&photo));
            }
            candidate
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Retry
// ---------------------------------------------------------------------------

fn retryable_status(status: reqwest::StatusCode) -> bool {
    status == reqwest::StatusCode::TOO_MANY_REQUESTS
        || status == reqwest::StatusCode::REQUEST_TIMEOUT
        || status.is_server_error()
}

fn retry_delay(
    attempt: u32,
    policy: &RetryPolicy,
    retry_after: Option<&reqwest::header::HeaderValue>,
) -> Duration {
    if let Some(value) = retry_after.and_then(|v| v.to_str().ok()) {
        if let Ok(secs) = value.parse::<u64>() {
            return Duration::from_secs(secs.min(30));
        }
    }

    let exponent = 2u64.saturating_pow(attempt.saturating_sub(1));
    let base = policy
        .initial_backoff_ms
        .saturating_mul(exponent)
        .min(policy.max_backoff_ms);
    let jitter = (std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos() as u64)
        .unwrap_or(0))
        % 150;
    Duration::from_millis(base.saturating_add(jitter))
}

/// Send a request, retrying 408/429/5xx responses and transport
/// timeouts/connect failures with capped exponential backoff. `Retry-After`
/// is honored when the server supplies it.
async fn send_with_retry(
    request: reqwest::RequestBuilder,
    policy: &RetryPolicy,
) -> Result<reqwest::Response, Error> {
    let attempts = policy.max_attempts.max(1);
    for attempt in 1..=attempts {
        let Some(cloned) = request.try_clone() else {
            return request.send().await.map_err(Error::Http);
        };

        match cloned.send().await {
            Ok(response) => {
                let status = response.status();
                if retryable_status(status) && attempt < attempts {
                    let delay = retry_delay(
                        attempt,
                        policy,
                        response.headers().get(reqwest::header::RETRY_AFTER),
                    );
                    log::warn!(
                        "kinopoisk retry {}/{} after status {} (sleep {:?})",
                        attempt,
                        attempts,
                        status,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    continue;
                }
                return Ok(response);
            }
            Err(err) => {
                let retryable_transport = err.is_timeout() || err.is_connect();
                if retryable_transport && attempt < attempts {
                    let delay = retry_delay(attempt, policy, None);
                    log::warn!(
                        "kinopoisk retry {}/{} after transport error: {} (sleep {:?})",
                        attempt,
                        attempts,
                        err,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    continue;
                }
                return Err(Error::Http(err));
            }
        }
    }

    Err(Error::Api {
        status: 0,
        message: "request exhausted retries".to_string(),
    })
}
