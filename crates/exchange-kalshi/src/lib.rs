//! Kalshi market-data integration for the mispricing tracker.
//!
//! This crate provides:
//! - REST client with rate limiting and cursor pagination for `GET /markets`
//! - Data models for markets and market queries
//! - Typed errors that carry the venue's retry-after hint
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
//!     for market in client.get_all_markets(&query, 5).await? {
//!         println!("{} {:?} ask={:?}", market.event_ticker, market.yes_sub_title, market.yes_ask);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /markets` - List markets (filters: `series_ticker`, `event_ticker`,
//!   `status`, `limit`, `cursor`)

pub mod client;
pub mod error;
pub mod types;

// Re-export main types for convenience
pub use client::{KalshiClient, KalshiClientConfig, KALSHI_PROD_URL, MAX_PAGE_LIMIT};
pub use error::{KalshiError, Result};
pub use types::{Market, MarketStatus, MarketsPage, MarketsQuery};
