pub mod config;
pub mod config_loader;

pub use config::{AppConfig, KalshiConfig, OddsConfig, ServerConfig};
pub use config_loader::ConfigLoader;
