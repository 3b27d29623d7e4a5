use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;

use crate::core::models::activity_stats::{ActionCount, ActivityStats, DailyCount};
use crate::core::models::log_record::LogRecord;

/// How many actions `ActivityStats::top_actions` reports.
pub const TOP_ACTIONS: usize = 5;

/// Computes descriptive statistics over a record set.
pub struct AggregationService;

impl AggregationService {
    /// Summarize `records` in a single pass.
    ///
    /// Returns `None` for an empty slice so callers can render a
    /// "no data" message instead of dividing by zero days.
    pub fn aggregate(&self, records: &[LogRecord]) -> Option<ActivityStats> {
        if records.is_empty() {
            return None;
        }

        let mut per_day = DayTally::default();
        let mut users: HashSet<&str> = HashSet::new();
        // action -> (count, index of first occurrence)
        let mut actions: HashMap<&str, (usize, usize)> = HashMap::new();

        for (idx, record) in records.iter().enumerate() {
            per_day.add(record);
            users.insert(record.username.as_str());
            actions.entry(record.action.as_str()).or_insert((0, idx)).0 += 1;
        }

        let total_actions = records.len();
        let unique_days = per_day.len();

        let stats = ActivityStats {
            total_actions,
            unique_days,
            avg_actions_per_day: total_actions as f64 / unique_days as f64,
            unique_users: users.len(),
            top_actions: rank_actions(actions),
            daily_series: per_day.into_series(),
        };

        tracing::debug!(
            total = stats.total_actions,
            days = stats.unique_days,
            users = stats.unique_users,
            "aggregated activity"
        );
        Some(stats)
    }
}

/// Count records per calendar date, ascending by date.
pub fn daily_counts(records: &[LogRecord]) -> Vec<DailyCount> {
    let mut per_day = DayTally::default();
    for record in records {
        per_day.add(record);
    }
    per_day.into_series()
}

/// Running per-date record counts.
#[derive(Default)]
struct DayTally(BTreeMap<NaiveDate, usize>);

impl DayTally {
    fn add(&mut self, record: &LogRecord) {
        *self.0.entry(record.date()).or_default() += 1;
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn into_series(self) -> Vec<DailyCount> {
        self.0
            .into_iter()
            .map(|(date, count)| DailyCount { date, count })
            .collect()
    }
}

/// Most frequent first; equal counts keep first-seen order.
fn rank_actions(actions: HashMap<&str, (usize, usize)>) -> Vec<ActionCount> {
    let mut ranked: Vec<(&str, usize, usize)> = actions
        .into_iter()
        .map(|(action, (count, first))| (action, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .take(TOP_ACTIONS)
        .map(|(action, count, _)| ActionCount {
            action: action.to_string(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::log_record::TIMESTAMP_FORMAT;
    use chrono::{NaiveDate, NaiveDateTime};

    fn record(id: u64, user: &str, action: &str, ts: &str) -> LogRecord {
        LogRecord {
            id,
            username: user.to_string(),
            action: action.to_string(),
            timestamp: NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).unwrap(),
            ip_address: "192.168.0.10".to_string(),
            device: "Ubuntu Linux".to_string(),
        }
    }

    /// Records all on one day, one per action name in order.
    fn with_actions(actions: &[&str]) -> Vec<LogRecord> {
        actions
            .iter()
            .enumerate()
            .map(|(i, a)| record(i as u64 + 1, "u", a, "2024-05-01 10:00:00"))
            .collect()
    }

    #[test]
    fn empty_input_is_no_data() {
        assert!(AggregationService.aggregate(&[]).is_none());
    }

    #[test]
    fn alice_two_days_scenario() {
        let records = vec![
            record(1, "alice", "login", "2024-01-01 09:00:00"),
            record(2, "alice", "logout", "2024-01-01 17:00:00"),
            record(3, "alice", "login", "2024-01-02 09:00:00"),
        ];
        let stats = AggregationService.aggregate(&records).unwrap();

        assert_eq!(stats.total_actions, 3);
        assert_eq!(stats.unique_days, 2);
        assert_eq!(stats.avg_actions_per_day, 1.5);
        assert_eq!(stats.unique_users, 1);
    }

    #[test]
    fn daily_series_is_ascending_and_sums_to_total() {
        let records = vec![
            record(1, "a", "x", "2024-02-03 10:00:00"),
            record(2, "b", "x", "2024-01-15 10:00:00"),
            record(3, "c", "x", "2024-02-03 23:59:59"),
            record(4, "a", "x", "2024-01-20 00:00:00"),
        ];
        let stats = AggregationService.aggregate(&records).unwrap();

        let dates: Vec<NaiveDate> = stats.daily_series.iter().map(|d| d.date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 3).unwrap(),
            ]
        );
        let sum: usize = stats.daily_series.iter().map(|d| d.count).sum();
        assert_eq!(sum, stats.total_actions);
        assert_eq!(stats.peak_day_count(), 2);
    }

    #[test]
    fn gaps_in_dates_are_not_zero_filled() {
        let records = vec![
            record(1, "a", "x", "2024-01-01 10:00:00"),
            record(2, "a", "x", "2024-01-10 10:00:00"),
        ];
        let stats = AggregationService.aggregate(&records).unwrap();

        assert_eq!(stats.daily_series.len(), 2);
        assert_eq!(stats.unique_days, 2);
    }

    #[test]
    fn top_actions_ranked_by_count() {
        let records = with_actions(&["view", "login", "login", "upload", "login", "upload"]);
        let stats = AggregationService.aggregate(&records).unwrap();

        let ranked: Vec<(&str, usize)> = stats
            .top_actions
            .iter()
            .map(|a| (a.action.as_str(), a.count))
            .collect();
        assert_eq!(ranked, vec![("login", 3), ("upload", 2), ("view", 1)]);
    }

    #[test]
    fn top_actions_ties_keep_first_seen_order() {
        let records = with_actions(&["c", "a", "b", "a", "b", "c"]);
        let stats = AggregationService.aggregate(&records).unwrap();

        let names: Vec<&str> = stats.top_actions.iter().map(|a| a.action.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn top_actions_capped_at_five() {
        let records = with_actions(&["a", "b", "c", "d", "e", "f", "g", "a"]);
        let stats = AggregationService.aggregate(&records).unwrap();

        assert_eq!(stats.top_actions.len(), TOP_ACTIONS);
        assert_eq!(stats.top_actions[0].action, "a");
        assert_eq!(stats.top_actions[0].count, 2);
        // f and g lose the tie-break to earlier actions
        assert!(stats.top_actions.iter().all(|a| a.action != "f" && a.action != "g"));
    }

    #[test]
    fn top_action_counts_match_recount() {
        let records = with_actions(&["a", "b", "a", "c", "b", "a"]);
        let stats = AggregationService.aggregate(&records).unwrap();

        for entry in &stats.top_actions {
            let recount = records.iter().filter(|r| r.action == entry.action).count();
            assert_eq!(entry.count, recount);
        }
    }

    #[test]
    fn unique_users_is_case_sensitive() {
        let records = vec![
            record(1, "alice", "x", "2024-01-01 10:00:00"),
            record(2, "Alice", "x", "2024-01-01 11:00:00"),
            record(3, "alice", "x", "2024-01-01 12:00:00"),
        ];
        let stats = AggregationService.aggregate(&records).unwrap();

        assert_eq!(stats.unique_users, 2);
    }

    #[test]
    fn daily_counts_groups_by_naive_date() {
        let records = vec![
            record(1, "a", "x", "2024-01-01 23:59:59"),
            record(2, "a", "x", "2024-01-02 00:00:00"),
        ];
        let counts = daily_counts(&records);

        assert_eq!(counts.len(), 2);
        assert!(counts.iter().all(|d| d.count == 1));
    }

    #[test]
    fn daily_series_matches_daily_counts() {
        let records = vec![
            record(1, "a", "x", "2024-03-02 08:00:00"),
            record(2, "b", "y", "2024-03-01 09:00:00"),
            record(3, "a", "x", "2024-03-02 17:30:00"),
        ];
        let stats = AggregationService.aggregate(&records).unwrap();

        assert_eq!(stats.daily_series, daily_counts(&records));
        assert_eq!(stats.unique_days, 2);
    }
}
