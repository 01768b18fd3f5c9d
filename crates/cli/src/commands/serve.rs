//! Runs the web API.

use crate::context;
use anyhow::Result;
use clap::Args;
use mispricing_core::AppConfig;
use mispricing_web_api::{ApiServer, AppState};

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Bind address; defaults to `server.host:server.port`
    #[arg(short, long)]
    pub addr: Option<String>,
}

pub async fn run_serve(config: &AppConfig, args: ServeArgs) -> Result<()> {
    let addr = args.addr.unwrap_or_else(|| config.server.addr());
    tracing::info!("Starting web API server on {}", addr);

    let service = context::build_service(config)?;
    let state = AppState::new(service, context::query_defaults(&config.kalshi));

    ApiServer::new(state).serve(&addr).await
}
