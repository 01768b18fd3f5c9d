//! Runs the mispricing analysis once and prints the signals.

use super::SeriesArgs;
use crate::context;
use anyhow::Result;
use clap::Args;
use mispricing_core::AppConfig;
use mispricing_engine::{AnalysisOverview, MispricingResult};
use std::fmt::Write as _;

#[derive(Args, Debug)]
pub struct ScanArgs {
    #[command(flatten)]
    pub series: SeriesArgs,

    /// Print the JSON response instead of a table
    #[arg(long)]
    pub json: bool,

    /// Hide outcomes classified as Fair
    #[arg(long)]
    pub only_signals: bool,
}

pub async fn run_scan(config: &AppConfig, args: ScanArgs) -> Result<()> {
    let service = context::build_service(config)?;
    if !service.has_odds() {
        anyhow::bail!("scan requires a sportsbook API key (set ODDS_API_KEY)");
    }

    let query = context::markets_query(
        &config.kalshi,
        args.series.series_ticker,
        args.series.status,
    );

    let mut overview = service.analysis(&query).await?;

    if args.only_signals {
        for report in &mut overview.matches {
            report.analysis.retain(|row| row.signal.is_actionable());
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&overview)?);
    } else {
        print!("{}", render(&overview));
    }

    Ok(())
}

fn render(overview: &AnalysisOverview) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}: {} matched events ({})",
        overview.series_ticker,
        overview.match_count,
        overview.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    for report in &overview.matches {
        let _ = writeln!(out, "\n{} ({})", report.title, report.event_id);
        if report.analysis.is_empty() {
            let _ = writeln!(out, "  no comparable outcomes");
        }
        for row in &report.analysis {
            render_row(&mut out, row);
        }
    }

    out
}

fn render_row(out: &mut String, row: &MispricingResult) {
    let _ = writeln!(
        out,
        "  {:<24} ask {:.4}  fair {:.4}  spread {:+.4}  ev {:+.4}  {}",
        row.outcome,
        row.ask_probability,
        row.fair_probability,
        row.spread,
        row.expected_value,
        row.signal
    );
}
