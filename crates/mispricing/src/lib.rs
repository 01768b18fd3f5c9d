//! Cross-market mispricing detection.
//!
//! Compares Kalshi binary-contract prices with a consensus fair probability
//! built from sportsbook three-way moneyline odds for the same match.
//!
//! # Overview
//!
//! ```text
//! Kalshi quotes ──► OutcomeGrouper ──► OutcomeSet ────────────────┐
//!                                                                  ▼
//! Sportsbook events ──► EventMatcher ──► ConsensusFairModel ──► MispricingEngine
//! ```
//!
//! With two bookmakers quoting Team A at 2.0 and 1.9, the vig-free
//! consensus for Team A is about 0.514. A Kalshi ask of 48 cents implies
//! 0.48, a spread of +0.034, which exceeds the 0.02 threshold: the
//! contract is flagged `Undervalued`.
//!
//! # Modules
//!
//! - [`types`]: Quotes, outcome sets, and result rows
//! - [`grouper`]: Group contract quotes by event
//! - [`matcher`]: Resolve a Kalshi match title to a sportsbook event
//! - [`consensus`]: Vig removal and cross-bookmaker averaging
//! - [`engine`]: Spread, expected value, and classification
//! - [`pipeline`]: The four stages chained over one snapshot
//! - [`service`]: Data-source traits and the fetching service
//!
//! All stages except [`service`] are pure and synchronous. Inputs that
//! cannot be carried through a stage are dropped rather than reported as
//! errors.
//!
//! # Example
//!
//! ```ignore
//! use mispricing_engine::{MispricingPipeline, RawQuote};
//!
//! let quotes: Vec<RawQuote> = markets.iter().map(RawQuote::from).collect();
//! for report in MispricingPipeline::run(&quotes, &sportsbook_events) {
//!     for row in report.actionable() {
//!         println!("{} {}: {:+.4} {}", report.title, row.outcome, row.spread, row.signal);
//!     }
//! }
//! ```

pub mod consensus;
pub mod engine;
pub mod grouper;
pub mod matcher;
pub mod pipeline;
pub mod service;
pub mod types;

pub use consensus::{ConsensusFairModel, ConsensusProbabilities};
pub use engine::{MispricingEngine, MISPRICING_THRESHOLD};
pub use grouper::OutcomeGrouper;
pub use matcher::{EventMatcher, Matchup};
pub use pipeline::MispricingPipeline;
pub use service::{
    AnalysisOverview, KalshiQuoteSource, MarketsOverview, MispricingService, OddsSource,
    QuoteSource, ServiceError,
};
pub use types::{
    implied_probability, round4, EventReport, MispricingResult, OutcomeQuote, OutcomeSet,
    RawQuote, Signal,
};
