use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    #[must_use]
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/", get(handlers::root))
            .route("/health", get(handlers::health))
            .route("/kalshi/fifa/markets", get(handlers::fifa_markets))
            .route("/kalshi/fifa/analysis", get(handlers::fifa_analysis))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Starts the web server listening on the specified address.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind to the address or serve requests.
    pub async fn serve(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Web API listening on {}", addr);

        axum::serve(listener, self.router()).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::QueryDefaults;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use mispricing_engine::service::Result as ServiceResult;
    use mispricing_engine::{MispricingService, OddsSource, QuoteSource};
    use mispricing_kalshi::{KalshiError, Market, MarketStatus, MarketsQuery};
    use mispricing_odds::{Bookmaker, Event, OddsError};
    use serde_json::Value;
    use std::sync::Mutex;
    use tower::ServiceExt;

    const TITLE: &str = "France vs Spain Winner?";

    fn market(outcome: &str, ask: u32) -> Market {
        Market {
            ticker: format!("KXWCGAME-26JUN11FRAESP-{outcome}"),
            event_ticker: "KXWCGAME-26JUN11FRAESP".to_string(),
            title: TITLE.to_string(),
            subtitle: None,
            yes_sub_title: Some(outcome.to_string()),
            status: MarketStatus::Open,
            yes_bid: Some(ask - 2),
            yes_ask: Some(ask),
            no_bid: None,
            no_ask: None,
            last_price: None,
            volume_24h: None,
            close_time: None,
        }
    }

    #[derive(Default)]
    struct RecordingQuotes {
        last_query: Mutex<Option<MarketsQuery>>,
    }

    #[async_trait]
    impl QuoteSource for RecordingQuotes {
        async fn fetch_markets(&self, query: &MarketsQuery) -> ServiceResult<Vec<Market>> {
            *self.last_query.lock().unwrap() = Some(query.clone());
            Ok(vec![
                market("France", 40),
                market("Spain", 30),
                market("Draw", 27),
            ])
        }
    }

    struct DownQuotes;

    #[async_trait]
    impl QuoteSource for DownQuotes {
        async fn fetch_markets(&self, _query: &MarketsQuery) -> ServiceResult<Vec<Market>> {
            Err(KalshiError::api(503, "maintenance").into())
        }
    }

    struct ThrottledOdds;

    #[async_trait]
    impl OddsSource for ThrottledOdds {
        async fn fetch_events(&self) -> ServiceResult<Vec<Event>> {
            Err(OddsError::rate_limit(45).into())
        }
    }

    struct StaticOdds;

    #[async_trait]
    impl OddsSource for StaticOdds {
        async fn fetch_events(&self) -> ServiceResult<Vec<Event>> {
            Ok(vec![Event::new("France", "Spain").with_bookmaker(
                Bookmaker::three_way("book", &[("France", 2.0), ("Spain", 4.0), ("Draw", 4.0)]),
            )])
        }
    }

    fn router_with(service: MispricingService) -> Router {
        ApiServer::new(AppState::new(service, QueryDefaults::default())).router()
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_root_and_health() {
        let service = MispricingService::new(Arc::new(RecordingQuotes::default()));

        let (status, body) = get_json(router_with(service.clone()), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["message"].is_string());

        let (status, body) = get_json(router_with(service), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["odds_configured"], false);
    }

    #[tokio::test]
    async fn test_markets_uses_defaults() {
        let quotes = Arc::new(RecordingQuotes::default());
        let service = MispricingService::new(quotes.clone());

        let (status, body) = get_json(router_with(service), "/kalshi/fifa/markets").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["series_ticker"], "KXWCGAME");
        assert_eq!(body["match_count"], 1);
        assert_eq!(body["matches"][0]["match"], TITLE);
        assert_eq!(body["matches"][0]["outcomes"][0]["team"], "France");
        assert_eq!(body["matches"][0]["total_ask_prob"], 0.97);

        let query = quotes.last_query.lock().unwrap().clone().unwrap();
        assert_eq!(query.status.as_deref(), Some("open"));
        assert_eq!(query.limit, 200);
    }

    #[tokio::test]
    async fn test_markets_query_params() {
        let quotes = Arc::new(RecordingQuotes::default());
        let service = MispricingService::new(quotes.clone());

        let (status, body) = get_json(
            router_with(service),
            "/kalshi/fifa/markets?series_ticker=KXOTHER&status=closed",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["series_ticker"], "KXOTHER");

        let query = quotes.last_query.lock().unwrap().clone().unwrap();
        assert_eq!(query.series_ticker.as_deref(), Some("KXOTHER"));
        assert_eq!(query.status.as_deref(), Some("closed"));
    }

    #[tokio::test]
    async fn test_analysis_reports_signals() {
        let service = MispricingService::new(Arc::new(RecordingQuotes::default()))
            .with_odds(Arc::new(StaticOdds));

        let (status, body) = get_json(router_with(service), "/kalshi/fifa/analysis").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["match_count"], 1);

        let rows = body["matches"][0]["analysis"].as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["team"], "France");
        assert_eq!(rows[0]["signal"], "Undervalued");
        assert_eq!(rows[1]["signal"], "Overvalued");
        assert_eq!(rows[2]["signal"], "Fair");
    }

    #[tokio::test]
    async fn test_analysis_without_odds_is_503() {
        let service = MispricingService::new(Arc::new(RecordingQuotes::default()));

        let (status, body) = get_json(router_with(service), "/kalshi/fifa/analysis").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["error"].as_str().unwrap().contains("not configured"));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_502() {
        let service = MispricingService::new(Arc::new(DownQuotes));

        let (status, body) = get_json(router_with(service), "/kalshi/fifa/markets").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].as_str().unwrap().contains("503"));
    }

    #[tokio::test]
    async fn test_rate_limited_upstream_is_503_with_retry_after() {
        let service = MispricingService::new(Arc::new(RecordingQuotes::default()))
            .with_odds(Arc::new(ThrottledOdds));

        let response = router_with(service)
            .oneshot(
                Request::builder()
                    .uri("/kalshi/fifa/analysis")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.headers()["retry-after"], "45");
    }
}
