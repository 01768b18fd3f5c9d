//! CLI commands for the mispricing tracker.

pub mod markets;
pub mod scan;
pub mod serve;

use clap::Args;

pub use markets::{run_markets, MarketsArgs};
pub use scan::{run_scan, ScanArgs};
pub use serve::{run_serve, ServeArgs};

/// Series selection shared by the query commands. Unset values come from
/// the `[kalshi]` config section.
#[derive(Args, Debug, Default)]
pub struct SeriesArgs {
    /// Kalshi series ticker (e.g. KXWCGAME)
    #[arg(long)]
    pub series_ticker: Option<String>,

    /// Market status filter (e.g. open, closed)
    #[arg(long)]
    pub status: Option<String>,
}
