pub mod commands;
pub mod context;
pub mod output;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::core::models::log_query::SortOrder;

/// Filter, summarize and flag suspicious activity in user activity logs.
#[derive(Parser, Debug)]
#[command(name = "logsight", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log store to read from (overrides [store] path in config.toml)
    #[arg(long, global = true, env = "LOGSIGHT_STORE")]
    pub store: Option<String>,

    /// Path to alternative config directory
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Verbose output (debug diagnostics on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create .logsight/config.toml with default settings
    Init,

    /// List log records matching the filters
    Logs {
        #[command(flatten)]
        filter: FilterArgs,
        /// Sort by id
        #[arg(long, value_enum, default_value_t = Order::Asc)]
        order: Order,
        /// Show at most N records
        #[arg(long)]
        limit: Option<usize>,
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show aggregate statistics for the selected records
    Stats {
        #[command(flatten)]
        filter: FilterArgs,
        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Detect off-hours activity, public addresses, rare devices and spike days
    Anomalies {
        #[command(flatten)]
        filter: FilterArgs,
        /// Flagged records shown per check (default: [display] max_rows)
        #[arg(long)]
        show: Option<usize>,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print statistics and anomalies together as JSON
    Report {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Export matching records to CSV
    Export {
        #[command(flatten)]
        filter: FilterArgs,
        /// Sort by id
        #[arg(long, value_enum, default_value_t = Order::Asc)]
        order: Order,
        /// Output file
        #[arg(short, long, default_value = "report.csv")]
        output: String,
    },

    /// Append synthetic records to the log store
    Generate {
        /// Number of records to create
        #[arg(long, default_value_t = 1000)]
        count: usize,
        /// Spread timestamps over this many past days
        #[arg(long, default_value_t = 90)]
        days: u32,
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Record predicates shared by the query commands.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only this user (exact match)
    #[arg(long)]
    pub user: Option<String>,
    /// Only this action (exact match)
    #[arg(long)]
    pub action: Option<String>,
    /// From this day, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,
    /// Up to this day, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
}

/// Sort direction accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl From<Order> for SortOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::Asc => SortOrder::Asc,
            Order::Desc => SortOrder::Desc,
        }
    }
}
