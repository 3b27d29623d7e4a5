use chrono::NaiveDate;
use serde::Serialize;

/// How often one action occurs in a record set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionCount {
    pub action: String,
    pub count: usize,
}

/// Number of records on one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// Descriptive statistics over a non-empty record set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityStats {
    pub total_actions: usize,
    pub unique_days: usize,
    pub avg_actions_per_day: f64,
    pub unique_users: usize,
    /// At most five entries, most frequent first.
    pub top_actions: Vec<ActionCount>,
    /// Dates present in the input only, ascending.
    pub daily_series: Vec<DailyCount>,
}

impl ActivityStats {
    /// Highest single-day count, used to scale the trend chart.
    pub fn peak_day_count(&self) -> usize {
        self.daily_series.iter().map(|d| d.count).max().unwrap_or(0)
    }
}
