use clap::{Parser, Subcommand};

mod commands;
mod context;

use commands::{MarketsArgs, ScanArgs, ServeArgs};

#[derive(Parser, Debug)]
#[command(name = "mispricing")]
#[command(about = "Kalshi vs sportsbook consensus mispricing tracker", long_about = None)]
struct Cli {
    /// Configuration profile layered over config/Config.toml
    #[arg(long, global = true, env = "APP_PROFILE")]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the web API server
    Serve(ServeArgs),
    /// List grouped Kalshi markets with implied probabilities
    Markets(MarketsArgs),
    /// Compare Kalshi prices against sportsbook consensus
    Scan(ScanArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = context::load_config(cli.profile.as_deref())?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(&config, args).await?,
        Commands::Markets(args) => commands::run_markets(&config, args).await?,
        Commands::Scan(args) => commands::run_scan(&config, args).await?,
    }

    Ok(())
}
