//! Data sources and the request-scoped mispricing service.
//!
//! The service fetches a fresh snapshot of both sources per call and runs
//! the pure pipeline over it. Nothing is cached between calls.

use crate::grouper::OutcomeGrouper;
use crate::pipeline::MispricingPipeline;
use crate::types::{EventReport, OutcomeSet, RawQuote};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mispricing_kalshi::{KalshiClient, KalshiError, Market, MarketsQuery};
use mispricing_odds::{Event, OddsClient, OddsError};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

// =============================================================================
// Errors
// =============================================================================

/// Failures fetching either source. The pure stages never fail.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("kalshi: {0}")]
    Kalshi(#[from] KalshiError),

    #[error("sportsbook odds: {0}")]
    Odds(#[from] OddsError),

    /// Analysis was requested but no odds source is configured.
    #[error("sportsbook odds source is not configured")]
    OddsUnavailable,
}

impl ServiceError {
    /// Retry-after hint from whichever upstream rate-limited us.
    #[must_use]
    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            Self::Kalshi(e) => e.retry_after_secs(),
            Self::Odds(e) => e.retry_after_secs(),
            Self::OddsUnavailable => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;

// =============================================================================
// Source Traits
// =============================================================================

/// Source of prediction-market contracts.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetches every market matching `query`.
    async fn fetch_markets(&self, query: &MarketsQuery) -> Result<Vec<Market>>;
}

/// Source of sportsbook events with bookmaker odds.
#[async_trait]
pub trait OddsSource: Send + Sync {
    async fn fetch_events(&self) -> Result<Vec<Event>>;
}

/// Kalshi-backed quote source with a page cap.
#[derive(Debug)]
pub struct KalshiQuoteSource {
    client: KalshiClient,
    max_pages: u32,
}

impl KalshiQuoteSource {
    #[must_use]
    pub fn new(client: KalshiClient, max_pages: u32) -> Self {
        Self { client, max_pages }
    }
}

#[async_trait]
impl QuoteSource for KalshiQuoteSource {
    async fn fetch_markets(&self, query: &MarketsQuery) -> Result<Vec<Market>> {
        Ok(self.client.get_all_markets(query, self.max_pages).await?)
    }
}

#[async_trait]
impl OddsSource for OddsClient {
    async fn fetch_events(&self) -> Result<Vec<Event>> {
        Ok(OddsClient::fetch_events(self).await?)
    }
}

// =============================================================================
// Responses
// =============================================================================

/// Grouped prediction-market outcome sets for a series.
#[derive(Debug, Clone, Serialize)]
pub struct MarketsOverview {
    pub series_ticker: String,
    pub match_count: usize,
    pub matches: Vec<OutcomeSet>,
}

/// Mispricing reports for a series.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOverview {
    pub series_ticker: String,
    pub match_count: usize,
    pub matches: Vec<EventReport>,
    pub generated_at: DateTime<Utc>,
}

// =============================================================================
// Service
// =============================================================================

/// Fetches both sources and runs the mispricing pipeline.
#[derive(Clone)]
pub struct MispricingService {
    quotes: Arc<dyn QuoteSource>,
    odds: Option<Arc<dyn OddsSource>>,
}

impl std::fmt::Debug for MispricingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MispricingService")
            .field("odds_configured", &self.odds.is_some())
            .finish_non_exhaustive()
    }
}

impl MispricingService {
    /// Creates a service without an odds source; only `markets` is usable.
    pub fn new(quotes: Arc<dyn QuoteSource>) -> Self {
        Self { quotes, odds: None }
    }

    /// Attaches the sportsbook odds source.
    #[must_use]
    pub fn with_odds(mut self, odds: Arc<dyn OddsSource>) -> Self {
        self.odds = Some(odds);
        self
    }

    /// Returns true if `analysis` can run.
    #[must_use]
    pub fn has_odds(&self) -> bool {
        self.odds.is_some()
    }

    async fn fetch_quotes(&self, query: &MarketsQuery) -> Result<Vec<RawQuote>> {
        let markets = self.quotes.fetch_markets(query).await?;
        Ok(markets.iter().map(RawQuote::from).collect())
    }

    /// Groups the series' contracts into outcome sets.
    ///
    /// # Errors
    /// Returns error if the quote source fails.
    pub async fn markets(&self, query: &MarketsQuery) -> Result<MarketsOverview> {
        let quotes = self.fetch_quotes(query).await?;
        let matches = OutcomeGrouper::group(&quotes);

        Ok(MarketsOverview {
            series_ticker: query.series_ticker.clone().unwrap_or_default(),
            match_count: matches.len(),
            matches,
        })
    }

    /// Fetches both sources concurrently and produces mispricing reports.
    ///
    /// # Errors
    /// Returns `OddsUnavailable` without an odds source, or the first
    /// source failure.
    pub async fn analysis(&self, query: &MarketsQuery) -> Result<AnalysisOverview> {
        let odds = self.odds.as_ref().ok_or(ServiceError::OddsUnavailable)?;

        let (quotes, events) = tokio::try_join!(self.fetch_quotes(query), odds.fetch_events())?;
        let matches = MispricingPipeline::run(&quotes, &events);

        info!(
            quotes = quotes.len(),
            sportsbook_events = events.len(),
            reports = matches.len(),
            signals = matches.iter().map(|r| r.actionable().count()).sum::<usize>(),
            "Mispricing analysis complete"
        );

        Ok(AnalysisOverview {
            series_ticker: query.series_ticker.clone().unwrap_or_default(),
            match_count: matches.len(),
            matches,
            generated_at: Utc::now(),
        })
    }
}
