//! Application configuration
//!
//! Values come from the process environment (optionally seeded from a `.env`
//! file via dotenvy). Only the API key is mandatory.

use crate::shared::errors::{AppError, AppResult};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Catalog API base; every request under it gets the key appended
    pub api_url: String,
    pub api_key: String,
    /// Image CDN base, already ending with `/`
    pub image_base_url: String,
    pub language: String,
    pub region: String,
    /// Upper bound for a single fetch task
    pub request_timeout: Duration,
    /// Extra attempts granted to primary tasks on transient failures
    pub primary_retries: u32,
    pub requests_per_second: f64,
    pub burst: u32,
}

impl AppConfig {
    /// Defaults for everything except the key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: api_key.into(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            language: "en-US".to_string(),
            region: "IN".to_string(),
            request_timeout: Duration::from_secs(8),
            primary_retries: 2,
            requests_per_second: 20.0,
            burst: 40,
        }
    }

    /// Load configuration from the environment
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("TMDB_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AppError::ConfigError("TMDB_API_KEY is not set".to_string()))?;

        let mut config = Self::new(api_key.trim());

        if let Some(url) = lookup("TMDB_API_URL") {
            config.api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = lookup("TMDB_IMAGE_BASE_URL") {
            config.image_base_url = if url.ends_with('/') {
                url
            } else {
                format!("{}/", url)
            };
        }
        if let Some(language) = lookup("MARQUEE_LANGUAGE") {
            config.language = language;
        }
        if let Some(region) = lookup("MARQUEE_REGION") {
            config.region = region;
        }
        if let Some(secs) = lookup("MARQUEE_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = parse_var("MARQUEE_REQUEST_TIMEOUT_SECS", &secs)?;
            if secs == 0 {
                return Err(AppError::ConfigError(
                    "MARQUEE_REQUEST_TIMEOUT_SECS must be positive".to_string(),
                ));
            }
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(retries) = lookup("MARQUEE_PRIMARY_RETRIES") {
            config.primary_retries = parse_var("MARQUEE_PRIMARY_RETRIES", &retries)?;
        }
        if let Some(rate) = lookup("MARQUEE_REQUESTS_PER_SECOND") {
            let rate: f64 = parse_var("MARQUEE_REQUESTS_PER_SECOND", &rate)?;
            if !(rate > 0.0) {
                return Err(AppError::ConfigError(
                    "MARQUEE_REQUESTS_PER_SECOND must be positive".to_string(),
                ));
            }
            config.requests_per_second = rate;
        }
        if let Some(burst) = lookup("MARQUEE_BURST") {
            config.burst = parse_var("MARQUEE_BURST", &burst)?;
        }

        Ok(config)
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_primary_retries(mut self, retries: u32) -> Self {
        self.primary_retries = retries;
        self
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, raw: &str) -> AppResult<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| AppError::ConfigError(format!("{} has an invalid value: '{}'", name, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tokio_test::{assert_err, assert_ok};

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_key_is_a_config_error() {
        let err = assert_err!(AppConfig::from_lookup(lookup_from(&[])));
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn test_defaults_applied() {
        let config = assert_ok!(AppConfig::from_lookup(lookup_from(&[("TMDB_API_KEY", "abc")])));
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.image_base_url, DEFAULT_IMAGE_BASE_URL);
        assert_eq!(config.language, "en-US");
        assert_eq!(config.region, "IN");
        assert_eq!(config.request_timeout, Duration::from_secs(8));
        assert_eq!(config.primary_retries, 2);
    }

    #[test]
    fn test_overrides_are_normalized() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("TMDB_API_KEY", "abc"),
            ("TMDB_API_URL", "http://localhost:9000/3/"),
            ("TMDB_IMAGE_BASE_URL", "http://img.local/t/p"),
            ("MARQUEE_REQUEST_TIMEOUT_SECS", "3"),
            ("MARQUEE_PRIMARY_RETRIES", "0"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "http://localhost:9000/3");
        assert_eq!(config.image_base_url, "http://img.local/t/p/");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.primary_retries, 0);
    }

    #[test]
    fn test_invalid_numbers_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("TMDB_API_KEY", "abc"),
            ("MARQUEE_REQUEST_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));

        let err = AppConfig::from_lookup(lookup_from(&[
            ("TMDB_API_KEY", "abc"),
            ("MARQUEE_REQUESTS_PER_SECOND", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }
}
