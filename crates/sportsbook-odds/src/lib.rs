//! Sportsbook odds integration for the mispricing tracker.
//!
//! Wraps The Odds API to fetch three-way moneyline (`h2h`) odds from
//! several bookmakers per event. These odds are the reference side of the
//! comparison: each bookmaker's prices are de-vigged and averaged
//! downstream into a consensus fair probability.
//!
//! # Example
//!
//! ```ignore
//! use mispricing_odds::{OddsClient, OddsClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = OddsClient::new(OddsClientConfig::default().with_api_key("..."))?;
//!     for event in client.fetch_events().await? {
//!         println!("{} vs {}: {} books", event.home_team, event.away_team, event.bookmakers.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::{OddsClient, OddsClientConfig, DECIMAL_ODDS, FIFA_WORLD_CUP, ODDS_API_URL};
pub use error::{OddsError, Result};
pub use types::{Bookmaker, BookmakerMarket, Event, OutcomePrice, THREE_WAY_MONEYLINE};
