//! Error types for the sportsbook odds client.

use thiserror::Error;

/// Errors that can occur when fetching sportsbook odds.
#[derive(Debug, Error)]
pub enum OddsError {
    /// API request failed.
    #[error("API error: {status_code} - {message}")]
    Api {
        /// HTTP status code.
        status_code: u16,
        /// Error message from API.
        message: String,
    },

    /// Request quota or rate limit exhausted.
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

    /// Configuration error (e.g. missing API key).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl OddsError {
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

    /// Seconds the aggregator asked us to wait, for quota or rate-limit
    /// responses.
    #[must_use]
    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            Self::RateLimit { retry_after_secs } => Some(*retry_after_secs),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for OddsError {
    /// The request URL carries the API key, so it is dropped from the message.
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

impl From<serde_json::Error> for OddsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias for odds operations.
pub type Result<T> = std::result::Result<T, OddsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = OddsError::api(401, "invalid api key");
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("invalid api key"));
        assert_eq!(err.retry_after_secs(), None);
    }

    #[test]
    fn test_rate_limit_retry_after() {
        let err = OddsError::rate_limit(30);
        assert!(err.to_string().contains("30s"));
        assert_eq!(err.retry_after_secs(), Some(30));
    }

    #[test]
    fn test_configuration_error_display() {
        let err = OddsError::Configuration("ODDS_API_KEY is not set".to_string());
        assert!(err.to_string().contains("configuration"));
        assert_eq!(err.retry_after_secs(), None);
    }
}
