use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use goals::SchemaVersion;

#[derive(Parser)]
#[command(name = "goal-uploader")]
#[command(
    about = "Synchronizes a strategy's position goals with its running strategy process",
    long_about = None
)]
pub struct Cli {
    /// Path to the uploader settings file.
    #[arg(long, global = true, default_value = "conf/uploader.toml")]
    pub config: String,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sets goals from an input file.
    Set {
        /// Strategy name; defaults to the file's Strategy column.
        #[arg(short, long)]
        strategy: Option<String>,

        /// Input goal file.
        #[arg(short, long)]
        input: String,
    },

    /// Resets targets to zero and closes the positions immediately.
    Close {
        #[arg(short, long)]
        strategy: String,

        /// Instruments to close, separated by `,` `|` or `;`; closes all
        /// targets when omitted.
        #[arg(short = 'n', long)]
        instruments: Option<String>,
    },

    /// Retrieves current goals.
    Get {
        #[arg(short, long)]
        strategy: String,

        /// Output filename (stdout when unspecified).
        #[arg(short, long)]
        output: Option<String>,

        /// Goal file schema version to emit.
        #[arg(short = 'v', long, default_value = "original")]
        version: SchemaVersion,
    },

    /// Retrieves order history.
    Orders {
        #[arg(short, long)]
        strategy: String,

        /// Start date, YYYY/MM/DD; unbounded when omitted.
        #[arg(short = 't', long, value_parser = parse_start_date)]
        start: Option<NaiveDate>,

        /// Output filename (stdout when unspecified).
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Retrieves transaction history.
    Transactions {
        #[arg(short, long)]
        strategy: String,

        /// Start date, YYYY/MM/DD; unbounded when omitted.
        #[arg(short = 't', long, value_parser = parse_start_date)]
        start: Option<NaiveDate>,

        /// Output filename (stdout when unspecified).
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Retrieves the PnL report.
    Pnl {
        #[arg(short, long)]
        strategy: String,

        /// Start date, YYYY/MM/DD; unbounded when omitted.
        #[arg(short = 't', long, value_parser = parse_start_date)]
        start: Option<NaiveDate>,

        /// Output filename (stdout when unspecified).
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Retrieves the end-of-day PnL report.
    EodPnl {
        #[arg(short, long)]
        strategy: String,

        /// Start date, YYYY/MM/DD; unbounded when omitted.
        #[arg(short = 't', long, value_parser = parse_start_date)]
        start: Option<NaiveDate>,

        /// Output filename (stdout when unspecified).
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn parse_start_date(value: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y/%m/%d")
        .map_err(|e| format!("invalid start date '{}': {}", value, e))
}

/// Splits an instrument list option the way operators type it.
pub fn split_instruments(list: &str) -> Vec<String> {
    list.split([',', '|', ';'])
        .filter(|symbol| !symbol.is_empty())
        .map(|symbol| symbol.to_string())
        .collect()
}
