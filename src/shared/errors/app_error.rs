use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout("Request timeout".to_string())
        } else if err.is_connect() {
            AppError::ExternalServiceError("Failed to connect to external service".to_string())
        } else if let Some(status) = err.status() {
            AppError::from_status(status.as_u16(), None)
        } else {
            AppError::ApiError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::ValidationError(format!("Invalid number: {}", err))
    }
}

impl AppError {
    /// Map an HTTP status to an error, preferring the upstream message when the
    /// catalog sent one.
    pub fn from_status(status: u16, upstream_message: Option<String>) -> Self {
        let message =
            |fallback: &str| upstream_message.clone().unwrap_or_else(|| fallback.to_string());
        match status {
            429 => AppError::RateLimitError(message("Too many requests")),
            404 => AppError::NotFound(message("External resource not found")),
            401 | 403 => {
                AppError::Unauthorized(message("Not authorized to access external service"))
            }
            408 => AppError::Timeout(message("Upstream request timeout")),
            500..=599 => {
                AppError::ExternalServiceError(message(&format!("Server error: {}", status)))
            }
            _ => AppError::ApiError(message(&format!("HTTP error: {}", status))),
        }
    }

    /// Whether a later attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::ExternalServiceError(_)
            | AppError::RateLimitError(_)
            | AppError::Timeout(_) => true,
            AppError::ApiError(msg) => {
                let msg = msg.to_lowercase();
                !msg.contains("not found")
                    && !msg.contains("unauthorized")
                    && !msg.contains("forbidden")
                    && !msg.contains("bad request")
            }
            AppError::NotFound(_)
            | AppError::Unauthorized(_)
            | AppError::SerializationError(_)
            | AppError::ValidationError(_)
            | AppError::Cancelled
            | AppError::ConfigError(_)
            | AppError::InternalError(_) => false,
        }
    }

    /// The bare message carried by the error, without the variant prefix.
    /// `None` when the error carries nothing worth showing to a user.
    pub fn message(&self) -> Option<&str> {
        let msg = match self {
            AppError::ApiError(m)
            | AppError::NotFound(m)
            | AppError::Unauthorized(m)
            | AppError::RateLimitError(m)
            | AppError::SerializationError(m)
            | AppError::ValidationError(m)
            | AppError::ExternalServiceError(m)
            | AppError::Timeout(m)
            | AppError::ConfigError(m)
            | AppError::InternalError(m) => m.as_str(),
            AppError::Cancelled => return None,
        };
        let trimmed = msg.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping_prefers_upstream_message() {
        let err = AppError::from_status(
            404,
            Some("The resource you requested could not be found.".into()),
        );
        assert_eq!(
            err,
            AppError::NotFound("The resource you requested could not be found.".to_string())
        );

        let err = AppError::from_status(503, None);
        assert!(matches!(err, AppError::ExternalServiceError(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_permanent_errors_are_not_retryable() {
        assert!(!AppError::NotFound("x".into()).is_retryable());
        assert!(!AppError::Unauthorized("x".into()).is_retryable());
        assert!(!AppError::ApiError("Bad request".into()).is_retryable());
        assert!(AppError::ApiError("upstream hiccup".into()).is_retryable());
        assert!(!AppError::Cancelled.is_retryable());
    }

    #[test]
    fn test_message_strips_empty_payloads() {
        assert_eq!(AppError::ApiError("   ".into()).message(), None);
        assert_eq!(AppError::Cancelled.message(), None);
        assert_eq!(AppError::Timeout("slow".into()).message(), Some("slow"));
    }
}
