//! REST client for The Odds API (v4).
//!
//! Fetches current events with bookmaker odds for one sport. The request
//! always asks for decimal odds so prices convert to implied probability
//! as `1 / price`.

use crate::error::{OddsError, Result};
use crate::types::Event;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

// =============================================================================
// Constants
// =============================================================================

/// The Odds API v4 base URL.
pub const ODDS_API_URL: &str = "https://api.the-odds-api.com/v4";

/// Sport key for the FIFA World Cup.
pub const FIFA_WORLD_CUP: &str = "soccer_fifa_world_cup";

/// Odds format requested on every call; consensus math reads prices as decimal.
pub const DECIMAL_ODDS: &str = "decimal";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for the odds client.
#[derive(Debug, Clone)]
pub struct OddsClientConfig {
    /// Base URL for the API.
    pub base_url: String,

    /// API key; required.
    pub api_key: Option<SecretString>,

    /// Sport key.
    pub sport: String,

    /// Bookmaker regions (comma separated, e.g. "us,uk").
    pub regions: String,

    /// Market keys (comma separated).
    pub markets: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for OddsClientConfig {
    fn default() -> Self {
        Self {
            base_url: ODDS_API_URL.to_string(),
            api_key: None,
            sport: FIFA_WORLD_CUP.to_string(),
            regions: "us".to_string(),
            markets: "h2h".to_string(),
            timeout_secs: 20,
        }
    }
}

impl OddsClientConfig {
    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    /// Sets the sport key.
    #[must_use]
    pub fn with_sport(mut self, sport: impl Into<String>) -> Self {
        self.sport = sport.into();
        self
    }

    /// Sets the bookmaker regions.
    #[must_use]
    pub fn with_regions(mut self, regions: impl Into<String>) -> Self {
        self.regions = regions.into();
        self
    }

    /// Sets the market keys.
    #[must_use]
    pub fn with_markets(mut self, markets: impl Into<String>) -> Self {
        self.markets = markets.into();
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
// OddsClient
// =============================================================================

/// Sportsbook odds client.
pub struct OddsClient {
    config: OddsClientConfig,
    api_key: SecretString,
    http: Client,
}

impl std::fmt::Debug for OddsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OddsClient")
            .field("base_url", &self.config.base_url)
            .field("sport", &self.config.sport)
            .finish_non_exhaustive()
    }
}

impl OddsClient {
    /// Creates a new client.
    ///
    /// # Errors
    /// Returns `Configuration` if no API key is set, or `Network` if the
    /// HTTP client cannot be built.
    pub fn new(config: OddsClientConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.expose_secret().is_empty())
            .ok_or_else(|| OddsError::Configuration("odds API key is not set".to_string()))?;

        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| OddsError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            api_key,
            http,
        })
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Fetches all current events for the configured sport with bookmaker odds.
    ///
    /// # Errors
    /// Returns error if the API call fails or the body cannot be decoded.
    pub async fn fetch_events(&self) -> Result<Vec<Event>> {
        let url = format!("{}/sports/{}/odds", self.config.base_url, self.config.sport);

        tracing::debug!(url = %url, regions = %self.config.regions, "GET");

        let response = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .query(&[
                ("apiKey", self.api_key.expose_secret()),
                ("regions", self.config.regions.as_str()),
                ("markets", self.config.markets.as_str()),
                ("oddsFormat", DECIMAL_ODDS),
            ])
            .send()
            .await?;

        let status = response.status();
        let header = |name: &str| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let remaining = header("x-requests-remaining");
        let used = header("x-requests-used");

        tracing::debug!(
            status = status.as_u16(),
            requests_remaining = ?remaining,
            requests_used = ?used,
            "Odds API response"
        );

        if status.as_u16() == 429 {
            let retry_after = header("Retry-After")
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(OddsError::rate_limit(retry_after));
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(OddsError::api(status.as_u16(), text));
        }

        let events = response.json::<Vec<Event>>().await?;

        tracing::info!(
            sport = %self.config.sport,
            count = events.len(),
            "Fetched sportsbook events"
        );

        Ok(events)
    }
}
