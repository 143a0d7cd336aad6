//! Single point where the process-wide API key meets outgoing requests
//!
//! Every URL under the configured API base gets `api_key` appended. URLs
//! pointing anywhere else (image CDN, video hosts) pass through untouched.

use reqwest::Url;

#[derive(Clone)]
pub struct ApiKeyInterceptor {
    api_base: String,
    api_key: String,
}

impl ApiKeyInterceptor {
    pub fn new(api_base: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn applies_to(&self, url: &str) -> bool {
        url.starts_with(&self.api_base)
    }

    /// Returns the URL with exactly one `api_key` parameter when it targets
    /// the API base. Any caller-supplied key is replaced.
    pub fn intercept(&self, mut url: Url) -> Url {
        if !self.applies_to(url.as_str()) {
            return url;
        }

        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(k, _)| k != "api_key")
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        {
            let mut pairs = url.query_pairs_mut();
            pairs.clear();
            for (k, v) in &kept {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("api_key", &self.api_key);
        }

        url
    }
}

impl std::fmt::Debug for ApiKeyInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyInterceptor")
            .field("api_base", &self.api_base)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interceptor() -> ApiKeyInterceptor {
        ApiKeyInterceptor::new("https://api.themoviedb.org/3/", "secret")
    }

    #[test]
    fn test_key_appended_under_api_base() {
        let url = Url::parse("https://api.themoviedb.org/3/movie/550?language=en-US").unwrap();
        let out = interceptor().intercept(url);
        assert_eq!(
            out.as_str(),
            "https://api.themoviedb.org/3/movie/550?language=en-US&api_key=secret"
        );
    }

    #[test]
    fn test_existing_key_replaced_not_duplicated() {
        let url = Url::parse("https://api.themoviedb.org/3/movie/550?api_key=old&page=2").unwrap();
        let out = interceptor().intercept(url);
        let keys: Vec<_> = out
            .query_pairs()
            .filter(|(k, _)| k == "api_key")
            .map(|(_, v)| v.into_owned())
            .collect();
        assert_eq!(keys, vec!["secret".to_string()]);
    }

    #[test]
    fn test_foreign_urls_untouched() {
        let url = Url::parse("https://image.tmdb.org/t/p/w500/abc.jpg").unwrap();
        let out = interceptor().intercept(url.clone());
        assert_eq!(out, url);
    }

    #[test]
    fn test_debug_hides_key() {
        let rendered = format!("{:?}", interceptor());
        assert!(!rendered.contains("secret"));
    }
}
