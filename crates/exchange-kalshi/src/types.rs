//! Data models for Kalshi market data.
//!
//! Kalshi quotes binary contracts in integer cents (0-100). A soccer
//! match is an *event* holding one binary market per outcome (home win,
//! away win, tie), each priced on its YES side.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Market Types
// =============================================================================

/// A Kalshi market (one binary contract).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    /// Market ticker (e.g., "KXWCGAME-26JUN11FRAESP-FRA").
    pub ticker: String,

    /// Event ticker this market belongs to.
    pub event_ticker: String,

    /// Market title (for match markets, "France vs Spain Winner?").
    pub title: String,

    /// Market subtitle.
    pub subtitle: Option<String>,

    /// Label of the outcome the YES side pays on (e.g., "France", "Tie").
    pub yes_sub_title: Option<String>,

    /// Whether the market is currently open for trading.
    pub status: MarketStatus,

    /// Yes bid price in cents.
    pub yes_bid: Option<u32>,

    /// Yes ask price in cents.
    pub yes_ask: Option<u32>,

    /// No bid price in cents.
    pub no_bid: Option<u32>,

    /// No ask price in cents.
    pub no_ask: Option<u32>,

    /// Last trade price in cents.
    pub last_price: Option<u32>,

    /// 24h volume in contracts.
    pub volume_24h: Option<i64>,

    /// Market close time.
    pub close_time: Option<DateTime<Utc>>,
}

/// Market status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketStatus {
    /// Market is open for trading.
    Open,
    /// Market is closed (no trading).
    Closed,
    /// Market has settled.
    Settled,
    /// Market is paused.
    Paused,
}

impl MarketStatus {
    /// Parses the API status string. Unknown values map to `Closed`.
    #[must_use]
    pub fn from_api_str(status: Option<&str>) -> Self {
        match status {
            Some("open" | "active") => Self::Open,
            Some("settled" | "finalized") => Self::Settled,
            Some("paused") => Self::Paused,
            _ => Self::Closed,
        }
    }
}

// =============================================================================
// Query Types
// =============================================================================

/// Filters for `GET /markets`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketsQuery {
    /// Series ticker (e.g., "KXWCGAME").
    pub series_ticker: Option<String>,
    /// Restrict to one event.
    pub event_ticker: Option<String>,
    /// Status filter (e.g., "open").
    pub status: Option<String>,
    /// Page size.
    pub limit: u32,
    /// Pagination cursor from a previous page.
    pub cursor: Option<String>,
}

impl MarketsQuery {
    /// Creates a query for every market of a series with the given status.
    pub fn series(series_ticker: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            series_ticker: Some(series_ticker.into()),
            status: Some(status.into()),
            limit: 200,
            ..Default::default()
        }
    }

    /// Sets the page size.
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the pagination cursor.
    #[must_use]
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Returns the query-string pairs, omitting unset and empty filters.
    #[must_use]
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("limit", self.limit.to_string())];

        let optional = [
            ("cursor", &self.cursor),
            ("series_ticker", &self.series_ticker),
            ("event_ticker", &self.event_ticker),
            ("status", &self.status),
        ];
        for (key, value) in optional {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                params.push((key, value.to_string()));
            }
        }

        params
    }
}

/// One page of markets.
#[derive(Debug, Clone, Default)]
pub struct MarketsPage {
    /// Markets on this page.
    pub markets: Vec<Market>,
    /// Cursor for the next page; `None` when exhausted.
    pub cursor: Option<String>,
}
