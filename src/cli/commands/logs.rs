use colored::Colorize;

use crate::cli::commands::query_helpers::{build_query, load_config, load_records};
use crate::cli::{FilterArgs, Order, output};
use crate::core::errors::{LogsightError, Result};
use crate::core::models::log_record::{LogRecord, TIMESTAMP_FORMAT};
use crate::core::services::analysis_engine::AnalysisEngine;

/// Execute the `logsight logs` command.
///
/// Lists the records matching the filters, ordered by id.
pub fn execute(filter: &FilterArgs, order: Order, limit: Option<usize>, json: bool) -> Result<()> {
    let config = load_config()?;
    let query = build_query(filter, order.into());
    let engine = AnalysisEngine::new(config.detection.clone());
    let records = engine.query(load_records(&config)?, &query);

    let shown = limit.unwrap_or(records.len()).min(records.len());

    if json {
        let out = serde_json::to_string_pretty(&records[..shown]).map_err(|e| {
            LogsightError::ExportError {
                detail: format!("Failed to serialize records: {e}"),
            }
        })?;
        println!("{out}");
        return Ok(());
    }

    if records.is_empty() {
        output::header("logsight logs");
        output::warning("No results to display");
        if !query.is_unfiltered() {
            println!("  Try removing filters to see all records.");
        }
        return Ok(());
    }

    output::header(&format!("logsight logs ({} records)", records.len()));
    println!();
    print_table(&records[..shown]);
    output::more(records.len() - shown);

    Ok(())
}

/// Print records as aligned rows.
pub fn print_table(records: &[LogRecord]) {
    println!(
        "  {:>8} {:<14} {:<16} {:<19}  {:<15} {}",
        "ID".bold(),
        "User".bold(),
        "Action".bold(),
        "Timestamp".bold(),
        "IP".bold(),
        "Device".bold(),
    );
    for record in records {
        print_row(record);
    }
}

fn print_row(record: &LogRecord) {
    println!(
        "  {:>8} {:<14} {:<16} {:<19}  {:<15} {}",
        record.id.to_string().cyan(),
        record.username.yellow(),
        record.action.green(),
        record.timestamp.format(TIMESTAMP_FORMAT).to_string().magenta(),
        record.ip_address.cyan(),
        record.device.blue(),
    );
}
