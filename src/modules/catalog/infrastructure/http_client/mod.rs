pub mod api_key_interceptor;
pub mod rate_limit_client;
pub mod retry_policy;

pub use api_key_interceptor::ApiKeyInterceptor;
pub use rate_limit_client::RateLimitClient;
pub use retry_policy::{RateLimitInfo, RetryPolicy};
