//! Builds clients and the mispricing service from configuration.

use anyhow::{Context, Result};
use mispricing_core::{AppConfig, ConfigLoader, KalshiConfig, OddsConfig};
use mispricing_engine::{KalshiQuoteSource, MispricingService};
use mispricing_kalshi::{KalshiClient, KalshiClientConfig, MarketsQuery};
use mispricing_odds::{OddsClient, OddsClientConfig};
use mispricing_web_api::QueryDefaults;
use std::num::NonZeroU32;
use std::sync::Arc;

pub fn load_config(profile: Option<&str>) -> Result<AppConfig> {
    match profile {
        Some(profile) => ConfigLoader::load_with_profile(profile),
        None => ConfigLoader::load(),
    }
}

pub fn kalshi_client(config: &KalshiConfig) -> Result<KalshiClient> {
    let rate = NonZeroU32::new(config.requests_per_minute)
        .context("kalshi.requests_per_minute must be greater than zero")?;

    let client_config = KalshiClientConfig::default()
        .with_base_url(config.base_url.clone())
        .with_rate_limit(rate)
        .with_timeout_secs(config.timeout_secs);

    Ok(KalshiClient::new(client_config)?)
}

/// Returns `None` when no API key is configured.
pub fn odds_client(config: &OddsConfig) -> Result<Option<OddsClient>> {
    let Some(api_key) = config.api_key.as_deref().filter(|k| !k.is_empty()) else {
        return Ok(None);
    };

    let client_config = OddsClientConfig::default()
        .with_base_url(config.base_url.clone())
        .with_api_key(api_key)
        .with_sport(config.sport.clone())
        .with_regions(config.regions.clone())
        .with_markets(config.markets.clone())
        .with_timeout_secs(config.timeout_secs);

    Ok(Some(OddsClient::new(client_config)?))
}

pub fn build_service(config: &AppConfig) -> Result<MispricingService> {
    let kalshi = kalshi_client(&config.kalshi)?;
    let quotes = KalshiQuoteSource::new(kalshi, config.kalshi.max_pages);
    let service = MispricingService::new(Arc::new(quotes));

    match odds_client(&config.odds)? {
        Some(odds) => Ok(service.with_odds(Arc::new(odds))),
        None => {
            tracing::warn!("ODDS_API_KEY not set; sportsbook analysis is disabled");
            Ok(service)
        }
    }
}

pub fn query_defaults(config: &KalshiConfig) -> QueryDefaults {
    QueryDefaults {
        series_ticker: config.series_ticker.clone(),
        status: config.status.clone(),
        page_limit: config.page_limit,
    }
}

/// Builds a markets query, preferring command-line values over config.
pub fn markets_query(
    config: &KalshiConfig,
    series_ticker: Option<String>,
    status: Option<String>,
) -> MarketsQuery {
    MarketsQuery::series(
        series_ticker.unwrap_or_else(|| config.series_ticker.clone()),
        status.unwrap_or_else(|| config.status.clone()),
    )
    .with_limit(config.page_limit)
}
