//! Shared types for cross-market mispricing analysis.
//!
//! Prediction-market prices are integer cents, so a contract's implied
//! probability is `price / 100`. Sportsbook prices are decimal odds, whose
//! implied probability is `1 / odds`. Every probability reported here is a
//! plain `f64` in `[0, 1]`.
//!
//! Serialized field names follow the public JSON shape of the tracker's
//! HTTP API (`event_ticker`, `match`, `team`, ...).

use mispricing_kalshi::Market;
use serde::{Deserialize, Serialize};

// =============================================================================
// Numeric Helpers
// =============================================================================

/// Rounds to 4 decimal places, the precision of every reported figure.
#[must_use]
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Converts a price in cents to an implied probability; absent prices are 0.
#[must_use]
pub fn implied_probability(price_cents: Option<u32>) -> f64 {
    price_cents.map_or(0.0, |cents| f64::from(cents) / 100.0)
}

// =============================================================================
// Raw Quotes
// =============================================================================

/// One binary contract's top of book, tagged with its event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawQuote {
    /// Event identifier the contract belongs to.
    pub event_id: String,
    /// Event title (e.g. "France vs Spain Winner?").
    pub event_title: Option<String>,
    /// Outcome the contract pays on (e.g. "France", "Tie").
    pub outcome: Option<String>,
    /// Best bid in cents, 0-100.
    pub bid: Option<u32>,
    /// Best ask in cents, 0-100.
    pub ask: Option<u32>,
}

impl RawQuote {
    /// Creates a quote with no title, label, or prices.
    pub fn new(event_id: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            event_title: None,
            outcome: None,
            bid: None,
            ask: None,
        }
    }

    /// Sets the event title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.event_title = Some(title.into());
        self
    }

    /// Sets the outcome label.
    #[must_use]
    pub fn with_outcome(mut self, outcome: impl Into<String>) -> Self {
        self.outcome = Some(outcome.into());
        self
    }

    /// Sets bid and ask in cents.
    #[must_use]
    pub fn with_prices(mut self, bid: Option<u32>, ask: Option<u32>) -> Self {
        self.bid = bid;
        self.ask = ask;
        self
    }
}

impl From<&Market> for RawQuote {
    /// Takes the YES side of the market. Prices above 100 cents are
    /// outside the contract's range and treated as absent.
    fn from(market: &Market) -> Self {
        let in_range = |price: Option<u32>| price.filter(|cents| *cents <= 100);

        Self {
            event_id: market.event_ticker.clone(),
            event_title: Some(market.title.clone()).filter(|t| !t.is_empty()),
            outcome: market.yes_sub_title.clone(),
            bid: in_range(market.yes_bid),
            ask: in_range(market.yes_ask),
        }
    }
}

// =============================================================================
// Outcome Sets
// =============================================================================

/// One outcome of a grouped event with its implied probabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeQuote {
    #[serde(rename = "team")]
    pub outcome: Option<String>,
    #[serde(rename = "yes_bid")]
    pub bid: Option<u32>,
    #[serde(rename = "yes_ask")]
    pub ask: Option<u32>,
    pub implied_bid_prob: f64,
    pub implied_ask_prob: f64,
}

impl OutcomeQuote {
    #[must_use]
    pub fn from_raw(quote: &RawQuote) -> Self {
        Self {
            outcome: quote.outcome.clone(),
            bid: quote.bid,
            ask: quote.ask,
            implied_bid_prob: implied_probability(quote.bid),
            implied_ask_prob: implied_probability(quote.ask),
        }
    }

    /// Ask price in dollars (cents / 100), 0 if absent.
    #[must_use]
    pub fn ask_price(&self) -> f64 {
        implied_probability(self.ask)
    }
}

/// All outcome quotes of one prediction-market event.
///
/// Outcome labels are not deduplicated; every quote is its own entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeSet {
    #[serde(rename = "event_ticker")]
    pub event_id: String,
    #[serde(rename = "match")]
    pub title: Option<String>,
    pub total_bid_prob: f64,
    pub total_ask_prob: f64,
    /// Sum of bid probabilities minus 1.
    pub overround_bid: f64,
    /// Sum of ask probabilities minus 1.
    pub overround_ask: f64,
    pub outcomes: Vec<OutcomeQuote>,
}

impl OutcomeSet {
    /// Builds the set and its aggregate overround figures.
    pub fn new(
        event_id: impl Into<String>,
        title: Option<String>,
        outcomes: Vec<OutcomeQuote>,
    ) -> Self {
        let total_bid: f64 = outcomes.iter().map(|o| o.implied_bid_prob).sum();
        let total_ask: f64 = outcomes.iter().map(|o| o.implied_ask_prob).sum();

        Self {
            event_id: event_id.into(),
            title,
            total_bid_prob: round4(total_bid),
            total_ask_prob: round4(total_ask),
            overround_bid: round4(total_bid - 1.0),
            overround_ask: round4(total_ask - 1.0),
            outcomes,
        }
    }
}

// =============================================================================
// Results
// =============================================================================

/// Classification of one outcome's price against the consensus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    /// Prediction market prices the outcome below the consensus; buying is favorable.
    Undervalued,
    /// Prediction market prices the outcome above the consensus.
    Overvalued,
    /// Within the threshold.
    Fair,
}

impl Signal {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Undervalued => "Undervalued",
            Self::Overvalued => "Overvalued",
            Self::Fair => "Fair",
        }
    }

    /// Returns true for `Undervalued` and `Overvalued`.
    #[must_use]
    pub fn is_actionable(self) -> bool {
        !matches!(self, Self::Fair)
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of the mispricing report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MispricingResult {
    #[serde(rename = "team")]
    pub outcome: String,
    /// Prediction-market ask-implied probability.
    #[serde(rename = "kalshi_ask_probability")]
    pub ask_probability: f64,
    /// Consensus fair probability, 4 dp.
    #[serde(rename = "sportsbook_fair_probability")]
    pub fair_probability: f64,
    /// `fair - ask_probability`, 4 dp.
    pub spread: f64,
    /// `fair - ask price`, 4 dp.
    pub expected_value: f64,
    pub signal: Signal,
}

/// Per-event analysis output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventReport {
    #[serde(rename = "event_ticker")]
    pub event_id: String,
    #[serde(rename = "match")]
    pub title: String,
    pub analysis: Vec<MispricingResult>,
}

impl EventReport {
    /// Rows whose signal is not `Fair`.
    pub fn actionable(&self) -> impl Iterator<Item = &MispricingResult> {
        self.analysis.iter().filter(|r| r.signal.is_actionable())
    }
}
