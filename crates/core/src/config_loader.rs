use crate::config::AppConfig;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

const CONFIG_FILE: &str = "config/Config.toml";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads application configuration by layering defaults, TOML, and environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load() -> Result<AppConfig> {
        let config: AppConfig = Self::figment(None).extract()?;
        tracing::debug!(
            kalshi_url = %config.kalshi.base_url,
            odds_url = %config.odds.base_url,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Loads application configuration with a specific profile.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load_with_profile(profile: &str) -> Result<AppConfig> {
        let config: AppConfig = Self::figment(Some(profile)).extract()?;
        tracing::debug!(profile, "Configuration loaded");
        Ok(config)
    }

    /// Builds the provider stack. Later layers win:
    /// defaults, `config/Config.toml`, `config/Config.{profile}.toml`,
    /// `APP_*` variables (nested with `__`), then `ODDS_API_KEY`.
    #[must_use]
    pub fn figment(profile: Option<&str>) -> Figment {
        let mut figment =
            Figment::from(Serialized::defaults(AppConfig::default())).merge(Toml::file(CONFIG_FILE));

        if let Some(profile) = profile {
            figment = figment.merge(Toml::file(format!("config/Config.{profile}.toml")));
        }

        figment
            .merge(Env::prefixed("APP_").split("__"))
            .merge(
                Env::raw()
                    .only(&["ODDS_API_KEY"])
                    .map(|_| "odds.api_key".into()),
            )
    }
}
