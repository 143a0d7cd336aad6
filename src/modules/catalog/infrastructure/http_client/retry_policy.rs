//! Bounded retry with backoff for transient catalog failures
//!
//! Only primary fetches are retried. Secondary fetches degrade to empty
//! defaults instead, so spending attempts on them buys nothing.

use crate::shared::errors::{AppError, AppResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Attempts after the first one
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    /// Add up to 10% random delay on top of the backoff
    pub jitter: bool,
}

impl RetryPolicy {
    /// Policy for primary tasks
    pub fn primary(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: Duration::from_millis(400),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }

    /// Single attempt, no waiting
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            backoff_multiplier: 1.0,
            jitter: false,
        }
    }

    /// Delay before retry number `attempt + 1`. A server-provided
    /// `Retry-After` wins but is still capped.
    pub fn calculate_delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        if let Some(server_delay) = retry_after {
            return server_delay.min(self.max_delay);
        }

        let millis =
            self.base_delay.as_millis() as f64 * self.backoff_multiplier.powi(attempt as i32);
        let mut delay = Duration::from_millis(millis as u64).min(self.max_delay);

        if self.jitter && !delay.is_zero() {
            let jitter_ms = (delay.as_millis() as f64 * 0.1 * rand::random::<f64>()) as u64;
            delay += Duration::from_millis(jitter_ms);
        }

        delay
    }

    /// Run `operation` until it succeeds, fails permanently, or the attempts
    /// run out. The last error is returned unchanged.
    pub async fn run<F, Fut, T>(&self, operation: F, operation_name: &str) -> AppResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(value) => {
                    if attempt > 0 {
                        debug!("{} succeeded after {} retries", operation_name, attempt);
                    }
                    return Ok(value);
                }
                Err(error) if !error.is_retryable() => {
                    debug!("{} failed with non-retryable error: {}", operation_name, error);
                    return Err(error);
                }
                Err(error) if attempt >= self.max_retries => {
                    if self.max_retries > 0 {
                        warn!(
                            "{} failed on final attempt {} ({}), giving up",
                            operation_name,
                            attempt + 1,
                            error
                        );
                    }
                    return Err(error);
                }
                Err(error) => {
                    let delay = self.calculate_delay(attempt, retry_after_hint(&error));
                    warn!(
                        "{} failed on attempt {} ({}), retrying in {:?}",
                        operation_name,
                        attempt + 1,
                        error,
                        delay
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::primary(2)
    }
}

/// Information extracted from a 429 response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateLimitInfo {
    pub retry_after: Option<Duration>,
    pub remaining: Option<u32>,
    pub limit: Option<u32>,
}

impl RateLimitInfo {
    pub fn from_headers(headers: &reqwest::header::HeaderMap) -> Self {
        let number = |name: &str| {
            headers
                .get(name)
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.trim().parse::<u64>().ok())
        };

        Self {
            retry_after: number("retry-after").map(Duration::from_secs),
            remaining: number("x-ratelimit-remaining").map(|n| n as u32),
            limit: number("x-ratelimit-limit").map(|n| n as u32),
        }
    }
}

/// The transport encodes `Retry-After` into the rate-limit message as
/// "retry after Ns"; recover it so the wait honours the server.
fn retry_after_hint(error: &AppError) -> Option<Duration> {
    let AppError::RateLimitError(msg) = error else {
        return None;
    };
    let rest = msg.split("retry after ").nth(1)?;
    let secs: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    secs.parse::<u64>().ok().map(Duration::from_secs)
}
