use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use mispricing_engine::ServiceError;
use serde_json::json;

/// Handler error rendered as `{ "error": ... }`.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl ApiError {
    /// Upstream failures are 502. A missing odds source or a rate-limited
    /// upstream is 503.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        if self.0.retry_after_secs().is_some() {
            return StatusCode::SERVICE_UNAVAILABLE;
        }
        match self.0 {
            ServiceError::OddsUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::Kalshi(_) | ServiceError::Odds(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::warn!(status = status.as_u16(), error = %self.0, "Request failed");

        let mut response = (status, Json(json!({ "error": self.0.to_string() }))).into_response();
        if let Some(secs) = self.0.retry_after_secs() {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mispricing_kalshi::KalshiError;
    use mispricing_odds::OddsError;

    #[test]
    fn test_status_codes() {
        let upstream = ApiError(ServiceError::from(KalshiError::api(500, "boom")));
        assert_eq!(upstream.status_code(), StatusCode::BAD_GATEWAY);

        let missing = ApiError(ServiceError::OddsUnavailable);
        assert_eq!(missing.status_code(), StatusCode::SERVICE_UNAVAILABLE);

        let limited = ApiError(ServiceError::from(OddsError::rate_limit(30)));
        assert_eq!(limited.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_rate_limited_response_sets_retry_after() {
        let response = ApiError(ServiceError::from(KalshiError::rate_limit(12))).into_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.headers()[header::RETRY_AFTER], "12");
    }

    #[test]
    fn test_upstream_failure_has_no_retry_after() {
        let response = ApiError(ServiceError::from(KalshiError::api(500, "boom"))).into_response();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert!(response.headers().get(header::RETRY_AFTER).is_none());
    }
}
