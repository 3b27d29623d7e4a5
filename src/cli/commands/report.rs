use crate::cli::FilterArgs;
use crate::cli::commands::query_helpers::{build_query, load_config, load_records};
use crate::core::errors::{LogsightError, Result};
use crate::core::models::log_query::SortOrder;
use crate::core::services::analysis_engine::AnalysisEngine;

/// Execute the `logsight report` command.
///
/// Prints `{"stats": ..., "anomalies": ...}` for the selected records,
/// with `null` on both sides when nothing matches.
pub fn execute(filter: &FilterArgs) -> Result<()> {
    let config = load_config()?;
    let query = build_query(filter, SortOrder::Asc);
    let engine = AnalysisEngine::new(config.detection.clone());
    let report = engine.query_then_report(load_records(&config)?, &query);

    let out = serde_json::to_string_pretty(&report).map_err(|e| LogsightError::ExportError {
        detail: format!("Failed to serialize report: {e}"),
    })?;
    println!("{out}");

    Ok(())
}
