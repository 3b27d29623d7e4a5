mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() {
    let args = Cli::parse();

    init_tracing(args.verbose);
    cli::context::init(args.config.as_deref(), args.store.as_deref());

    let result = match &args.command {
        Commands::Init => cli::commands::init::execute(),
        Commands::Logs {
            filter,
            order,
            limit,
            json,
        } => cli::commands::logs::execute(filter, *order, *limit, *json),
        Commands::Stats { filter, json } => cli::commands::stats::execute(filter, *json),
        Commands::Anomalies { filter, show, json } => {
            cli::commands::anomalies::execute(filter, *show, *json)
        }
        Commands::Report { filter } => cli::commands::report::execute(filter),
        Commands::Export {
            filter,
            order,
            output,
        } => cli::commands::export::execute(filter, *order, output),
        Commands::Generate { count, days, seed } => {
            cli::commands::generate::execute(*count, *days, *seed)
        }
    };

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr so they never mix with JSON on stdout.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
