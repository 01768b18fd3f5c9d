//! Kalshi REST API client with rate limiting.
//!
//! Provides typed access to the public market-data endpoints with
//! automatic rate limiting using the governor crate.
//!
//! # Example
//!
//! ```ignore
//! use mispricing_kalshi::{KalshiClient, KalshiClientConfig, MarketsQuery};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = KalshiClient::new(KalshiClientConfig::default())?;
//!
//!     let query = MarketsQuery::series("KXWCGAME", "open");
//!     let markets = client.get_all_markets(&query, 5).await?;
//!     println!("Found {} World Cup markets", markets.len());
//!
//!     Ok(())
//! }
//! ```

use crate::error::{KalshiError, Result};
use crate::types::{Market, MarketStatus, MarketsPage, MarketsQuery};
use chrono::{DateTime, Utc};
use governor::{Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::Client;
use serde::Deserialize;
use std::num::NonZeroU32;
use std::sync::Arc;

// =============================================================================
// Constants
// =============================================================================

/// Kalshi production API base URL.
pub const KALSHI_PROD_URL: &str = "https://api.elections.kalshi.com/trade-api/v2";

/// Largest page size accepted by `GET /markets`.
pub const MAX_PAGE_LIMIT: u32 = 1000;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for the Kalshi client.
#[derive(Debug, Clone)]
pub struct KalshiClientConfig {
    /// Base URL for the API.
    pub base_url: String,

    /// Requests per minute limit.
    pub requests_per_minute: NonZeroU32,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for KalshiClientConfig {
    fn default() -> Self {
        Self {
            base_url: KALSHI_PROD_URL.to_string(),
            requests_per_minute: nonzero!(60u32),
            timeout_secs: 20,
        }
    }
}

impl KalshiClientConfig {
    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the rate limit.
    #[must_use]
    pub fn with_rate_limit(mut self, requests_per_minute: NonZeroU32) -> Self {
        self.requests_per_minute = requests_per_minute;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

// =============================================================================
// API Response Types
// =============================================================================

/// Raw markets response from Kalshi API.
#[derive(Debug, Clone, Deserialize)]
struct RawMarketsResponse {
    markets: Option<Vec<RawMarket>>,
    cursor: Option<String>,
}

/// Raw market data from API.
#[derive(Debug, Clone, Deserialize)]
struct RawMarket {
    ticker: String,
    event_ticker: String,
    title: Option<String>,
    subtitle: Option<String>,
    yes_sub_title: Option<String>,
    status: Option<String>,
    yes_bid: Option<i64>,
    yes_ask: Option<i64>,
    no_bid: Option<i64>,
    no_ask: Option<i64>,
    last_price: Option<i64>,
    volume_24h: Option<i64>,
    close_time: Option<String>,
}

impl From<RawMarket> for Market {
    fn from(raw: RawMarket) -> Self {
        let cents = |v: Option<i64>| v.and_then(|p| u32::try_from(p).ok());

        Self {
            ticker: raw.ticker,
            event_ticker: raw.event_ticker,
            title: raw.title.unwrap_or_default(),
            subtitle: raw.subtitle,
            yes_sub_title: raw.yes_sub_title,
            status: MarketStatus::from_api_str(raw.status.as_deref()),
            yes_bid: cents(raw.yes_bid),
            yes_ask: cents(raw.yes_ask),
            no_bid: cents(raw.no_bid),
            no_ask: cents(raw.no_ask),
            last_price: cents(raw.last_price),
            volume_24h: raw.volume_24h,
            close_time: raw.close_time.and_then(|s| {
                DateTime::parse_from_rfc3339(&s)
                    .ok()
                    .map(|d| d.with_timezone(&Utc))
            }),
        }
    }
}

// =============================================================================
// KalshiClient
// =============================================================================

/// Kalshi REST API client.
///
/// Market data is public, so requests are unauthenticated; all of them
/// go through the rate limiter.
pub struct KalshiClient {
    /// Configuration.
    config: KalshiClientConfig,

    /// HTTP client.
    http: Client,

    /// Rate limiter.
    rate_limiter: Arc<
        RateLimiter<
            governor::state::NotKeyed,
            governor::state::InMemoryState,
            governor::clock::DefaultClock,
        >,
    >,
}

impl std::fmt::Debug for KalshiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KalshiClient")
            .field("base_url", &self.config.base_url)
            .field("requests_per_minute", &self.config.requests_per_minute)
            .finish_non_exhaustive()
    }
}

impl KalshiClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: KalshiClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| KalshiError::Network(format!("failed to build HTTP client: {e}")))?;

        let quota = Quota::per_minute(config.requests_per_minute);
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Ok(Self {
            config,
            http,
            rate_limiter,
        })
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Waits for rate limiter and makes a GET request.
    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}{}", self.config.base_url, path);

        tracing::debug!(url = %url, params = ?params, "GET");

        let response = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .query(params)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handles API response, converting errors appropriately.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(KalshiError::rate_limit(retry_after));
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(KalshiError::api(status.as_u16(), text));
        }

        let body = response.json::<T>().await?;
        Ok(body)
    }

    // =========================================================================
    // Market Endpoints
    // =========================================================================

    /// Gets one page of markets.
    ///
    /// # Errors
    /// Returns error if the page size is out of range or the API call fails.
    pub async fn get_markets(&self, query: &MarketsQuery) -> Result<MarketsPage> {
        if query.limit == 0 || query.limit > MAX_PAGE_LIMIT {
            return Err(KalshiError::InvalidRequest(format!(
                "limit must be between 1 and {MAX_PAGE_LIMIT}, got {}",
                query.limit
            )));
        }

        let response: RawMarketsResponse = self.get("/markets", &query.to_params()).await?;

        Ok(MarketsPage {
            markets: response
                .markets
                .unwrap_or_default()
                .into_iter()
                .map(Market::from)
                .collect(),
            cursor: response.cursor.filter(|c| !c.is_empty()),
        })
    }

    /// Gets every market matching the query, following the cursor for at
    /// most `max_pages` pages.
    ///
    /// # Errors
    /// Returns error if any page request fails.
    pub async fn get_all_markets(
        &self,
        query: &MarketsQuery,
        max_pages: u32,
    ) -> Result<Vec<Market>> {
        let max_pages = max_pages.max(1);
        let mut markets = Vec::new();
        let mut query = query.clone();

        for page_number in 1..=max_pages {
            let page = self.get_markets(&query).await?;
            markets.extend(page.markets);

            match page.cursor {
                Some(cursor) => {
                    if page_number == max_pages {
                        tracing::warn!(
                            max_pages,
                            fetched = markets.len(),
                            "Stopped paging markets at page limit"
                        );
                    }
                    query.cursor = Some(cursor);
                }
                None => break,
            }
        }

        tracing::info!(
            series = ?query.series_ticker,
            count = markets.len(),
            "Fetched Kalshi markets"
        );

        Ok(markets)
    }
}
