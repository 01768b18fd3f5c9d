//! Error types for the Kalshi market-data client.

use thiserror::Error;

/// Errors that can occur when talking to Kalshi.
#[derive(Debug, Error)]
pub enum KalshiError {
    /// API request failed.
    #[error("API error: {status_code} - {message}")]
    Api {
        /// HTTP status code.
        status_code: u16,
        /// Error message from API.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimit {
        /// Seconds to wait before retry.
        retry_after_secs: u64,
    },

    /// Network error.
    #[error("network error: {0}")]
    Network(String),

    /// Request timeout.
    #[error("request timeout: {0}")]
    Timeout(String),

    /// Invalid request parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl KalshiError {
    /// Creates an API error from status code and message.
    pub fn api(status_code: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status_code,
            message: message.into(),
        }
    }

    /// Creates a rate limit error.
    pub fn rate_limit(retry_after_secs: u64) -> Self {
        Self::RateLimit { retry_after_secs }
    }

    /// Seconds the venue asked us to wait, for rate-limit responses.
    #[must_use]
    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            Self::RateLimit { retry_after_secs } => Some(*retry_after_secs),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for KalshiError {
    /// The request URL is dropped from the message.
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Network(format!("connection failed: {err}"))
        } else if err.is_decode() {
            Self::Serialization(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for KalshiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias for Kalshi operations.
pub type Result<T> = std::result::Result<T, KalshiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_construction() {
        let err = KalshiError::api(400, "bad request");
        assert!(matches!(
            err,
            KalshiError::Api {
                status_code: 400,
                ..
            }
        ));
        assert!(err.to_string().contains("400"));
        assert!(err.to_string().contains("bad request"));
        assert_eq!(err.retry_after_secs(), None);
    }

    #[test]
    fn test_rate_limit_error_construction() {
        let err = KalshiError::rate_limit(60);
        assert!(err.to_string().contains("60"));
        assert_eq!(err.retry_after_secs(), Some(60));
    }

    #[test]
    fn test_network_error_has_no_retry_after() {
        let err = KalshiError::Network("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));
        assert_eq!(err.retry_after_secs(), None);
    }

    #[test]
    fn test_invalid_request_display() {
        let err = KalshiError::InvalidRequest("limit must be positive".to_string());
        assert!(err.to_string().contains("invalid request"));
    }
}
