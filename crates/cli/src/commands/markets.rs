//! Lists grouped Kalshi markets with implied probabilities and overround.

use super::SeriesArgs;
use crate::context;
use anyhow::Result;
use clap::Args;
use mispricing_core::AppConfig;
use mispricing_engine::{MarketsOverview, OutcomeSet};
use std::fmt::Write as _;

#[derive(Args, Debug)]
pub struct MarketsArgs {
    #[command(flatten)]
    pub series: SeriesArgs,

    /// Print the JSON response instead of a table
    #[arg(long)]
    pub json: bool,
}

pub async fn run_markets(config: &AppConfig, args: MarketsArgs) -> Result<()> {
    let service = context::build_service(config)?;
    let query = context::markets_query(
        &config.kalshi,
        args.series.series_ticker,
        args.series.status,
    );

    let overview = service.markets(&query).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&overview)?);
    } else {
        print!("{}", render(&overview));
    }

    Ok(())
}

fn render(overview: &MarketsOverview) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}: {} matches",
        overview.series_ticker, overview.match_count
    );

    for set in &overview.matches {
        render_set(&mut out, set);
    }

    out
}

fn render_set(out: &mut String, set: &OutcomeSet) {
    let _ = writeln!(
        out,
        "\n{} ({})  overround bid {:+.4}  ask {:+.4}",
        set.title.as_deref().unwrap_or("<untitled>"),
        set.event_id,
        set.overround_bid,
        set.overround_ask
    );

    for quote in &set.outcomes {
        let _ = writeln!(
            out,
            "  {:<24} bid {:>5.4}  ask {:>5.4}",
            quote.outcome.as_deref().unwrap_or("?"),
            quote.implied_bid_prob,
            quote.implied_ask_prob
        );
    }
}
