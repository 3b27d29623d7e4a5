use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::adapters::stores::open_store;
use crate::cli::FilterArgs;
use crate::cli::{context, output};
use crate::config::app_config::AppConfig;
use crate::core::errors::{LogsightError, Result};
use crate::core::models::log_query::{LogQuery, SortOrder};
use crate::core::models::log_record::LogRecord;

/// Parse a `YYYY-MM-DD` day.
pub fn parse_day(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        LogsightError::InvalidDateInput {
            input: input.to_string(),
        }
    })
}

/// Turn an optional date argument into a filter bound.
///
/// An unparseable date warns and leaves the range open on that side.
pub fn date_bound(input: Option<&str>) -> Option<NaiveDate> {
    let raw = input?.trim();
    if raw.is_empty() {
        return None;
    }
    match parse_day(raw) {
        Ok(day) => Some(day),
        Err(e) => {
            tracing::debug!(input = raw, "ignoring invalid date bound");
            output::warning(&e.to_string());
            None
        }
    }
}

/// Build a `LogQuery` from command-line filters.
pub fn build_query(args: &FilterArgs, order: SortOrder) -> LogQuery {
    LogQuery {
        username: non_empty(args.user.as_deref()),
        action: non_empty(args.action.as_deref()),
        from: date_bound(args.from.as_deref()),
        to: date_bound(args.to.as_deref()),
        order,
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Load the project configuration from the active config directory.
pub fn load_config() -> Result<AppConfig> {
    AppConfig::load(context::config_dir())
}

/// Store path: `--store` wins over `[store] path`.
pub fn store_path(config: &AppConfig) -> PathBuf {
    context::store_override()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.store.path))
}

/// Load every record from the configured store; the store must exist.
pub fn load_records(config: &AppConfig) -> Result<Vec<LogRecord>> {
    let path = store_path(config);
    if !path.exists() {
        return Err(LogsightError::FileNotFound { path });
    }
    open_store(&path).load()
}
