//! Rate-limited HTTP transport for the catalog API
//!
//! Owns the reqwest client, a governor limiter shared by every view, and the
//! API-key interceptor. Retries are not done here: the aggregation layer
//! decides which fetches deserve another attempt.

use super::api_key_interceptor::ApiKeyInterceptor;
use super::retry_policy::RateLimitInfo;
use crate::modules::catalog::domain::CatalogTransport;
use crate::modules::catalog::infrastructure::adapters::tmdb::models::TmdbError;
use crate::shared::config::AppConfig;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::{LogContext, Stopwatch};
use async_trait::async_trait;
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use reqwest::{Client, Response, Url};
use serde_json::Value;
use std::num::NonZeroU32;
use std::time::Duration;

type DirectLimiter = GovernorRateLimiter<
    governor::state::direct::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
    governor::middleware::NoOpMiddleware,
>;

pub struct RateLimitClient {
    client: Client,
    rate_limiter: DirectLimiter,
    interceptor: ApiKeyInterceptor,
    base_url: String,
    provider_name: String,
}

impl RateLimitClient {
    /// Client for the TMDB catalog, configured from the app config
    pub fn for_tmdb(config: &AppConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("marquee/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            rate_limiter: Self::create_rate_limiter(config.requests_per_second, config.burst),
            interceptor: ApiKeyInterceptor::new(&config.api_url, &config.api_key),
            base_url: config.api_url.trim_end_matches('/').to_string(),
            provider_name: "TMDB".to_string(),
        })
    }

    fn create_rate_limiter(requests_per_second: f64, burst_size: u32) -> DirectLimiter {
        let period = if requests_per_second > 0.0 {
            Duration::from_secs_f64(1.0 / requests_per_second)
        } else {
            Duration::from_secs(1)
        };
        let burst = NonZeroU32::new(burst_size.max(1)).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN))
            .allow_burst(burst);

        GovernorRateLimiter::direct(quota)
    }

    /// Absolute URL for a catalog path, with the query and the API key applied
    pub fn build_url(&self, path: &str, query: &[(String, String)]) -> AppResult<Url> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut url = Url::parse(&raw).map_err(|e| {
            AppError::ValidationError(format!("Invalid catalog URL '{}': {}", raw, e))
        })?;

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        Ok(self.interceptor.intercept(url))
    }

    async fn read_error(&self, response: Response) -> AppError {
        let status = response.status();

        if status.as_u16() == 429 {
            let info = RateLimitInfo::from_headers(response.headers());
            let message = match info.retry_after {
                Some(delay) => format!(
                    "{} rate limit exceeded, retry after {}s",
                    self.provider_name,
                    delay.as_secs()
                ),
                None => format!("{} rate limit exceeded", self.provider_name),
            };
            return AppError::RateLimitError(message);
        }

        let body = response.text().await.unwrap_or_default();
        let upstream = serde_json::from_str::<TmdbError>(&body)
            .ok()
            .map(|e| e.status_message)
            .filter(|m| !m.trim().is_empty());

        AppError::from_status(status.as_u16(), upstream)
    }

    async fn parse_response(&self, response: Response) -> AppResult<Value> {
        let text = response.text().await.map_err(|e| {
            AppError::SerializationError(format!(
                "Failed to read {} response: {}",
                self.provider_name, e
            ))
        })?;

        serde_json::from_str(&text).map_err(|e| {
            let preview: String = text.chars().take(200).collect();
            AppError::SerializationError(format!(
                "Failed to parse {} response: {}. Response: {}",
                self.provider_name, e, preview
            ))
        })
    }

    /// Whether the limiter has a token right now
    pub fn can_make_request_now(&self) -> bool {
        self.rate_limiter.check().is_ok()
    }

    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }
}

#[async_trait]
impl CatalogTransport for RateLimitClient {
    async fn get_json(&self, path: &str, query: &[(String, String)]) -> AppResult<Value> {
        let url = self.build_url(path, query)?;

        self.rate_limiter.until_ready().await;

        LogContext::upstream_request(&self.provider_name, path);
        let timer = Stopwatch::start(format!("{} GET {}", self.provider_name, path));

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(AppError::from)?;

        let status = response.status();
        LogContext::upstream_response(
            &self.provider_name,
            path,
            status.as_u16(),
            timer.elapsed_ms(),
        );

        if !status.is_success() {
            return Err(self.read_error(response).await);
        }

        self.parse_response(response).await
    }
}

impl std::fmt::Debug for RateLimitClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimitClient")
            .field("provider_name", &self.provider_name)
            .field("base_url", &self.base_url)
            .field("interceptor", &self.interceptor)
            .finish()
    }
}
