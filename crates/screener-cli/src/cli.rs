//! CLI argument definitions for the screener.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `stocks` | Valuation metrics for every discovered symbol of a market |
//! | `detail` | Logo, description and one year of closes for one ticker |
//! | `segments` | Exchange segments queried for a market |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--log-level` | `warn` | Log filter, overridden by `RUST_LOG` |
//! | `--log-format` | `compact` | Log format (pretty, compact, json) |
//!
//! # Examples
//!
//! ```bash
//! # US market as a table
//! screener stocks --market US --format table
//!
//! # Cyprus, smaller batches, give up after 20 seconds
//! screener stocks --market CY --batch-size 10 --deadline-ms 20000 --pretty
//!
//! # One company
//! screener detail AAPL
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::logging::LogFormat;

/// Stock screener data pipeline
///
/// Discovers every listed common stock of a market, fetches valuation metrics
/// from Finnhub in throttled batches and prints normalized records. Without
/// FINNHUB_API_KEY a built-in dataset is printed instead.
#[derive(Debug, Parser)]
#[command(name = "screener", author, version, about = "Stock screener data pipeline")]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Log filter directive, e.g. `info` or `screener_core=debug`.
    ///
    /// `RUST_LOG` takes precedence when set.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Log output format. Logs always go to stderr.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns for terminal display.
    Table,
    /// Single JSON object output.
    Json,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch normalized valuation metrics for a market.
    Stocks(StocksArgs),
    /// Fetch logo, description and price history for one ticker.
    Detail(DetailArgs),
    /// List the exchange segments behind a market code.
    Segments(SegmentsArgs),
}

#[derive(Debug, Args)]
pub struct StocksArgs {
    /// Market code. Unknown codes fall back to US.
    #[arg(long, default_value = "US")]
    pub market: String,

    /// Symbols fetched concurrently per batch (env: SCREENER_BATCH_SIZE).
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Pause between batches in milliseconds (env: SCREENER_BATCH_DELAY_MS).
    #[arg(long)]
    pub batch_delay_ms: Option<u64>,

    /// Cap on discovered candidates for this market.
    #[arg(long)]
    pub max_candidates: Option<usize>,

    /// Hard ceiling on outbound requests per minute (env: SCREENER_REQUESTS_PER_MINUTE).
    #[arg(long)]
    pub requests_per_minute: Option<u32>,

    /// Stop fetching after this many milliseconds and keep partial results.
    #[arg(long)]
    pub deadline_ms: Option<u64>,
}

#[derive(Debug, Args)]
pub struct DetailArgs {
    /// Ticker symbol, e.g. AAPL.
    pub ticker: String,
}

#[derive(Debug, Args)]
pub struct SegmentsArgs {
    /// Market code; every market when omitted.
    #[arg(long)]
    pub market: Option<String>,
}
