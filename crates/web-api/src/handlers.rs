use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use mispricing_engine::{AnalysisOverview, MarketsOverview};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub odds_configured: bool,
}

/// Optional series filters; absent values use the configured defaults.
#[derive(Debug, Default, Deserialize)]
pub struct SeriesParams {
    pub series_ticker: Option<String>,
    pub status: Option<String>,
}

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Kalshi mispricing tracker".to_string(),
    })
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        odds_configured: state.service.has_odds(),
    })
}

/// Lists the series' matches with per-outcome implied probabilities.
///
/// # Errors
/// Returns `502 Bad Gateway` if Kalshi cannot be reached.
pub async fn fifa_markets(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SeriesParams>,
) -> Result<Json<MarketsOverview>, ApiError> {
    let query = state.query(params.series_ticker, params.status);
    let overview = state.service.markets(&query).await?;
    Ok(Json(overview))
}

/// Compares the series' Kalshi prices with sportsbook consensus.
///
/// # Errors
/// Returns `502 Bad Gateway` if either source fails, or
/// `503 Service Unavailable` if no odds API key is configured.
pub async fn fifa_analysis(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SeriesParams>,
) -> Result<Json<AnalysisOverview>, ApiError> {
    let query = state.query(params.series_ticker, params.status);
    let overview = state.service.analysis(&query).await?;
    Ok(Json(overview))
}
