use std::path::Path;

use crate::adapters::export::csv_exporter::CsvExporter;
use crate::cli::commands::query_helpers::{build_query, load_config, load_records};
use crate::cli::{FilterArgs, Order, context, output};
use crate::core::errors::Result;
use crate::core::services::analysis_engine::AnalysisEngine;

/// Execute the `logsight export` command.
///
/// Writes the matching records to a CSV file. Nothing is written when
/// the selection is empty.
pub fn execute(filter: &FilterArgs, order: Order, out: &str) -> Result<()> {
    let out_path = Path::new(out);
    context::validate_output_path(out_path)?;

    let config = load_config()?;
    let query = build_query(filter, order.into());
    let engine = AnalysisEngine::new(config.detection.clone());
    let records = engine.query(load_records(&config)?, &query);

    output::header("logsight export");

    if records.is_empty() {
        output::warning("No data to export");
        return Ok(());
    }

    CsvExporter.write(out_path, &records)?;
    output::success(&format!(
        "Exported {} records to {}",
        records.len(),
        out_path.display()
    ));

    Ok(())
}
