// src/services/fetch.rs

//! HTTP fetch client with bounded retries.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};

use crate::error::{AppError, Result};
use crate::logging::Logger;

/// Successful fetch result.
#[derive(Debug)]
pub struct FetchOutcome {
    pub body: Vec<u8>,
    pub status: u16,
}

/// Retry tuning for transient failures.
///
/// Defaults mirror the usual retryable-HTTP settings: 3 retries (4 attempts
/// total) with exponential backoff between 1s and 30s.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub min_wait: Duration,
    pub max_wait: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            min_wait: Duration::from_secs(1),
            max_wait: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Backoff before retry number `attempt` (0-based).
    ///
    /// Exponential growth capped at `max_wait`, with jitter keeping the wait
    /// in the upper half of the capped window so sequential runs do not hit
    /// a recovering server on a fixed cadence.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt.min(16)).unwrap_or(u32::MAX);
        let capped = self
            .min_wait
            .saturating_mul(factor)
            .min(self.max_wait)
            .max(self.min_wait);

        let window = (capped.as_millis() as u64 / 2).max(1);
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.subsec_nanos() as u64)
            .unwrap_or(0);
        capped - Duration::from_millis(nanos % window)
    }
}

/// HTTP GET client with retry/backoff resilience.
pub struct Fetcher {
    client: Client,
    policy: RetryPolicy,
}

impl Fetcher {
    /// Create a fetcher with the default retry policy.
    pub fn new() -> Result<Self> {
        Self::with_policy(RetryPolicy::default())
    }

    /// Create a fetcher with a custom retry policy.
    pub fn with_policy(policy: RetryPolicy) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("fetchncache/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { client, policy })
    }

    /// GET a URL with the given headers.
    ///
    /// Network errors and 5xx responses are retried within the policy
    /// budget. Any final status other than 200 is a terminal failure; no
    /// file is ever written here.
    pub async fn fetch(&self, url: &str, headers: &HeaderMap, logger: &Logger) -> Result<FetchOutcome> {
        let mut attempt = 0u32;

        loop {
            match self.client.get(url).headers(headers.clone()).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status == StatusCode::OK {
                        let body = response.bytes().await.map_err(|e| AppError::FetchFailed {
                            url: url.to_string(),
                            source: e,
                        })?;
                        return Ok(FetchOutcome {
                            body: body.to_vec(),
                            status: status.as_u16(),
                        });
                    }

                    if !status.is_server_error() || attempt >= self.policy.max_retries {
                        return Err(AppError::UnexpectedStatus(status.as_u16()));
                    }

                    logger.debug(&format!(
                        "Status {} from {}, retry {}/{}",
                        status.as_u16(),
                        url,
                        attempt + 1,
                        self.policy.max_retries
                    ));
                }
                Err(error) => {
                    if attempt >= self.policy.max_retries {
                        return Err(AppError::FetchFailed {
                            url: url.to_string(),
                            source: error,
                        });
                    }

                    logger.debug(&format!(
                        "Request to {} failed ({}), retry {}/{}",
                        url,
                        error,
                        attempt + 1,
                        self.policy.max_retries
                    ));
                }
            }

            tokio::time::sleep(self.policy.backoff(attempt)).await;
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_stays_within_policy_bounds() {
        let policy = RetryPolicy::default();
        for attempt in 0..8 {
            let wait = policy.backoff(attempt);
            assert!(wait >= policy.min_wait / 2, "attempt {attempt}: {wait:?}");
            assert!(wait <= policy.max_wait, "attempt {attempt}: {wait:?}");
        }
    }

    #[test]
    fn backoff_caps_at_max_wait_for_large_attempts() {
        let policy = RetryPolicy {
            max_retries: 3,
            min_wait: Duration::from_millis(100),
            max_wait: Duration::from_millis(800),
        };
        let wait = policy.backoff(30);
        assert!(wait <= policy.max_wait);
        assert!(wait > policy.max_wait / 2);
    }
}
