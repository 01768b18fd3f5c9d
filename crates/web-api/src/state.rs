use mispricing_engine::MispricingService;
use mispricing_kalshi::MarketsQuery;

/// Query values used when a request omits them.
#[derive(Debug, Clone)]
pub struct QueryDefaults {
    pub series_ticker: String,
    pub status: String,
    pub page_limit: u32,
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            series_ticker: "KXWCGAME".to_string(),
            status: "open".to_string(),
            page_limit: 200,
        }
    }
}

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: MispricingService,
    pub defaults: QueryDefaults,
}

impl AppState {
    #[must_use]
    pub fn new(service: MispricingService, defaults: QueryDefaults) -> Self {
        Self { service, defaults }
    }

    /// Builds a markets query, falling back to the defaults for absent or
    /// empty values.
    #[must_use]
    pub fn query(&self, series_ticker: Option<String>, status: Option<String>) -> MarketsQuery {
        let series_ticker = series_ticker
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| self.defaults.series_ticker.clone());
        let status = status
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| self.defaults.status.clone());

        MarketsQuery::series(series_ticker, status).with_limit(self.defaults.page_limit)
    }
}
