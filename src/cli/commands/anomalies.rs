use colored::Colorize;

use crate::cli::commands::query_helpers::{build_query, load_config, load_records};
use crate::cli::{FilterArgs, output};
use crate::core::errors::{LogsightError, Result};
use crate::core::models::anomaly_report::AnomalyReport;
use crate::core::models::detection_config::DetectionConfig;
use crate::core::models::log_query::SortOrder;
use crate::core::models::log_record::{LogRecord, TIMESTAMP_FORMAT};
use crate::core::services::analysis_engine::AnalysisEngine;

/// Execute the `logsight anomalies` command.
///
/// Runs every heuristic over the selected records and prints the first
/// `show` hits of each, followed by the number left out.
pub fn execute(filter: &FilterArgs, show: Option<usize>, json: bool) -> Result<()> {
    let config = load_config()?;
    let query = build_query(filter, SortOrder::Asc);
    let engine = AnalysisEngine::new(config.detection.clone());
    let report = engine.query_then_detect(load_records(&config)?, &query);

    if json {
        let out = serde_json::to_string_pretty(&report).map_err(|e| LogsightError::ExportError {
            detail: format!("Failed to serialize anomaly report: {e}"),
        })?;
        println!("{out}");
        return Ok(());
    }

    output::header("🔍 logsight anomalies");

    let Some(report) = report else {
        output::warning("No data to analyze for the selected date range or filters");
        return Ok(());
    };

    let rows = show.unwrap_or(config.display.max_rows);
    print_report(&report, &config.detection, rows);

    println!();
    if report.is_clean() {
        output::success("No anomalies found");
    } else {
        output::warning(&format!("{} flags raised", report.flag_count()));
    }

    Ok(())
}

fn print_report(report: &AnomalyReport, detection: &DetectionConfig, rows: usize) {
    section(
        &format!(
            "Actions outside working hours ({}:00 - {}:00)",
            detection.working_hours_start, detection.working_hours_end
        ),
        &report.off_hours,
        rows,
        |r| r.timestamp.format(TIMESTAMP_FORMAT).to_string(),
    );

    section(
        "Activity from public or unrecognized addresses",
        &report.public_ip,
        rows,
        |r| r.ip_address.clone(),
    );

    section(
        &format!(
            "Unusual devices (seen in less than {}% of records)",
            detection.rare_device_ratio * 100.0
        ),
        &report.rare_device,
        rows,
        |r| r.device.clone(),
    );

    println!(
        "\n  {} {}",
        format!(
            "Days with an activity spike (> mean + {}·stddev):",
            detection.spike_sigma
        )
        .bold(),
        report.spike_days.len()
    );
    if report.spike_days.is_empty() {
        println!("    None.");
    }
    for day in &report.spike_days {
        output::warning(&format!("{} ({} actions)", day.date.format("%Y-%m-%d"), day.count));
    }
}

/// Print one heuristic's hits with `detail` as the last column.
fn section(title: &str, flagged: &[LogRecord], rows: usize, detail: impl Fn(&LogRecord) -> String) {
    println!("\n  {} {}", format!("{title}:").bold(), flagged.len());
    if flagged.is_empty() {
        println!("    None.");
        return;
    }

    for record in flagged.iter().take(rows) {
        println!(
            "    {:>8} {:<14} {:<16} {}",
            record.id.to_string().cyan(),
            record.username.yellow(),
            record.action.green(),
            detail(record).magenta(),
        );
    }
    output::more(flagged.len().saturating_sub(rows));
}
