use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use yield_tracker::config::ConfigOverrides;

/// DeFi yield tracker: wallet portfolio, protocol positions and yield
/// history rendered as a static dashboard.
#[derive(Parser)]
#[command(name = "yield-tracker", version, about)]
pub struct Cli {
    /// Debug-level logging (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render the full dashboard page as HTML
    Dashboard {
        #[command(flatten)]
        conn: ConnectionArgs,

        /// Yield history timeframe to show: daily, weekly or monthly
        #[arg(long, default_value = "daily")]
        timeframe: String,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Render the mock portfolio value chart as SVG
    Chart {
        /// Portfolio value the series oscillates around (USD)
        #[arg(long, default_value = "10000.0")]
        base_value: f64,

        #[arg(long, default_value = "Portfolio Value")]
        title: String,

        #[arg(long, default_value = "200.0")]
        height: f64,

        #[arg(long, default_value = "#007bff")]
        color: String,

        /// Random seed for the series
        #[arg(long)]
        seed: Option<u64>,

        /// Last day of the series, YYYY-MM-DD (default: today)
        #[arg(long)]
        as_of: Option<String>,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Print mock yield history
    Yields {
        #[arg(long, default_value = "daily")]
        timeframe: String,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        as_of: Option<String>,

        /// Print the full summary as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Aggregate protocol positions for an address
    Positions {
        #[command(flatten)]
        conn: ConnectionArgs,

        /// Wallet address (default: the demo account with --demo)
        #[arg(long)]
        address: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Output the JSON schema for the portfolio and yield payloads
    Schema,
}

/// Chain provider and pricing flags shared by the data commands.
#[derive(Args, Clone)]
pub struct ConnectionArgs {
    /// JSON-RPC endpoint (env: YIELD_TRACKER_RPC_URL)
    #[arg(long)]
    pub rpc_url: Option<String>,

    /// Use a built-in provider with a fixed account and 1.5 ETH
    #[arg(long)]
    pub demo: bool,

    /// ETH → USD rate (env: YIELD_TRACKER_ETH_USD, default 2500)
    #[arg(long)]
    pub eth_usd: Option<f64>,

    /// Seed for mock data (env: YIELD_TRACKER_SEED)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Simulated per-protocol latency in milliseconds
    #[arg(long)]
    pub latency_ms: Option<u64>,

    /// Pin "today", YYYY-MM-DD
    #[arg(long)]
    pub as_of: Option<String>,
}

impl ConnectionArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            rpc_url: self.rpc_url.clone(),
            demo: self.demo,
            eth_usd_rate: self.eth_usd,
            seed: self.seed,
            latency_ms: self.latency_ms,
            as_of: self.as_of.clone(),
        }
    }
}
