use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub kalshi: KalshiConfig,
    pub odds: OddsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Returns the `host:port` bind address.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Prediction-market venue settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KalshiConfig {
    pub base_url: String,
    /// Series scanned when a request does not name one.
    pub series_ticker: String,
    /// Market status filter (e.g. "open").
    pub status: String,
    /// Markets requested per page (API maximum is 1000).
    pub page_limit: u32,
    /// Upper bound on cursor pages followed per request.
    pub max_pages: u32,
    pub requests_per_minute: u32,
    pub timeout_secs: u64,
}

impl Default for KalshiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.elections.kalshi.com/trade-api/v2".to_string(),
            series_ticker: "KXWCGAME".to_string(),
            status: "open".to_string(),
            page_limit: 200,
            max_pages: 5,
            requests_per_minute: 60,
            timeout_secs: 20,
        }
    }
}

/// Sportsbook odds aggregator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OddsConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub sport: String,
    pub regions: String,
    pub markets: String,
    pub timeout_secs: u64,
}

impl Default for OddsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.the-odds-api.com/v4".to_string(),
            api_key: None,
            sport: "soccer_fifa_world_cup".to_string(),
            regions: "us".to_string(),
            markets: "h2h".to_string(),
            timeout_secs: 20,
        }
    }
}
