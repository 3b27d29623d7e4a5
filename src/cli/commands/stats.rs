use colored::Colorize;

use crate::cli::commands::query_helpers::{build_query, load_config, load_records};
use crate::cli::{FilterArgs, output};
use crate::core::errors::{LogsightError, Result};
use crate::core::models::activity_stats::ActivityStats;
use crate::core::models::log_query::SortOrder;
use crate::core::services::analysis_engine::AnalysisEngine;

/// Width of the longest bar in the daily trend.
const TREND_WIDTH: usize = 40;

/// Execute the `logsight stats` command.
///
/// Summarizes the selected records: totals, averages, top actions
/// and the day-by-day activity trend.
pub fn execute(filter: &FilterArgs, json: bool) -> Result<()> {
    let config = load_config()?;
    let query = build_query(filter, SortOrder::Asc);
    let engine = AnalysisEngine::new(config.detection.clone());
    let stats = engine.query_then_aggregate(load_records(&config)?, &query);

    if json {
        let out = serde_json::to_string_pretty(&stats).map_err(|e| LogsightError::ExportError {
            detail: format!("Failed to serialize statistics: {e}"),
        })?;
        println!("{out}");
        return Ok(());
    }

    output::header("📊 logsight stats");

    let Some(stats) = stats else {
        output::warning("No data for the selected date range or filters");
        return Ok(());
    };

    print_summary(&stats);
    print_top_actions(&stats);
    print_trend(&stats);

    Ok(())
}

fn print_summary(stats: &ActivityStats) {
    println!("  Total actions:         {}", stats.total_actions.to_string().cyan());
    println!("  Days:                  {}", stats.unique_days.to_string().cyan());
    println!(
        "  Average actions/day:   {}",
        format!("{:.2}", stats.avg_actions_per_day).cyan()
    );
    println!("  Unique users:          {}", stats.unique_users.to_string().cyan());
}

fn print_top_actions(stats: &ActivityStats) {
    println!("\n{}", "  Top actions".bold());
    for entry in &stats.top_actions {
        println!("    {:<20} {}", entry.action.green(), entry.count.to_string().yellow());
    }
}

fn print_trend(stats: &ActivityStats) {
    println!("\n{}", "  Activity trend (actions per day)".bold());
    let peak = stats.peak_day_count();
    for day in &stats.daily_series {
        println!(
            "    {} {:>7} {}",
            day.date.format("%Y-%m-%d").to_string().dimmed(),
            day.count,
            output::bar(day.count, peak, TREND_WIDTH).blue(),
        );
    }
}
