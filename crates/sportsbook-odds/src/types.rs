//! Data models for sportsbook odds.
//!
//! Prices are decimal odds (e.g. 2.0 pays 2x the stake including the stake).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Market key of the three-way moneyline (home / away / draw).
pub const THREE_WAY_MONEYLINE: &str = "h2h";

/// One real-world match as seen by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Aggregator event id.
    #[serde(default)]
    pub id: String,

    /// Sport key (e.g., "soccer_fifa_world_cup").
    #[serde(default)]
    pub sport_key: String,

    /// Scheduled kick-off.
    #[serde(default)]
    pub commence_time: Option<DateTime<Utc>>,

    pub home_team: String,

    pub away_team: String,

    /// Per-bookmaker quotes, in the order the aggregator returned them.
    #[serde(default)]
    pub bookmakers: Vec<Bookmaker>,
}

impl Event {
    /// Creates an event with no bookmakers.
    pub fn new(home_team: impl Into<String>, away_team: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            sport_key: String::new(),
            commence_time: None,
            home_team: home_team.into(),
            away_team: away_team.into(),
            bookmakers: Vec::new(),
        }
    }

    /// Adds a bookmaker.
    #[must_use]
    pub fn with_bookmaker(mut self, bookmaker: Bookmaker) -> Self {
        self.bookmakers.push(bookmaker);
        self
    }
}

/// One bookmaker's markets for an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmaker {
    #[serde(default)]
    pub key: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub markets: Vec<BookmakerMarket>,
}

impl Bookmaker {
    /// Creates a bookmaker quoting a single three-way moneyline market.
    pub fn three_way(key: impl Into<String>, outcomes: &[(&str, f64)]) -> Self {
        let key = key.into();
        Self {
            title: key.clone(),
            key,
            markets: vec![BookmakerMarket::new(THREE_WAY_MONEYLINE, outcomes)],
        }
    }

    /// Returns the market the bookmaker listed first.
    #[must_use]
    pub fn primary_market(&self) -> Option<&BookmakerMarket> {
        self.markets.first()
    }
}

/// A bookmaker market: a key and its priced outcomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmakerMarket {
    pub key: String,

    #[serde(default)]
    pub outcomes: Vec<OutcomePrice>,
}

impl BookmakerMarket {
    /// Creates a market from `(name, decimal odds)` pairs.
    pub fn new(key: impl Into<String>, outcomes: &[(&str, f64)]) -> Self {
        Self {
            key: key.into(),
            outcomes: outcomes
                .iter()
                .map(|(name, price)| OutcomePrice {
                    name: (*name).to_string(),
                    price: *price,
                })
                .collect(),
        }
    }

    /// Returns true if this is the three-way moneyline market.
    #[must_use]
    pub fn is_three_way_moneyline(&self) -> bool {
        self.key == THREE_WAY_MONEYLINE
    }
}

/// An outcome name with its decimal odds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomePrice {
    pub name: String,
    pub price: f64,
}
