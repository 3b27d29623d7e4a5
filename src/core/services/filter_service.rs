use chrono::NaiveDateTime;

use crate::core::models::log_query::{LogQuery, SortOrder};
use crate::core::models::log_record::LogRecord;

/// Selects the records matching a `LogQuery`.
pub struct FilterService;

impl FilterService {
    /// Keep records matching every predicate of `query`, ordered by id.
    ///
    /// - `username` and `action` are exact, case-sensitive matches
    /// - `from` is widened to the start of its day, `to` to the end of its day
    /// - no match is not an error: the result is simply empty
    pub fn filter(&self, records: Vec<LogRecord>, query: &LogQuery) -> Vec<LogRecord> {
        let total = records.len();
        let lower = query.from.and_then(|d| d.and_hms_opt(0, 0, 0));
        let upper = query.to.and_then(|d| d.and_hms_opt(23, 59, 59));

        let mut matched: Vec<LogRecord> = records
            .into_iter()
            .filter(|r| matches(r, query, lower, upper))
            .collect();

        match query.order {
            SortOrder::Asc => matched.sort_by_key(|r| r.id),
            SortOrder::Desc => matched.sort_by(|a, b| b.id.cmp(&a.id)),
        }

        tracing::debug!(total, matched = matched.len(), ?query, "filtered log records");
        matched
    }
}

fn matches(
    record: &LogRecord,
    query: &LogQuery,
    lower: Option<NaiveDateTime>,
    upper: Option<NaiveDateTime>,
) -> bool {
    if query
        .username
        .as_deref()
        .is_some_and(|u| record.username != u)
    {
        return false;
    }
    if query.action.as_deref().is_some_and(|a| record.action != a) {
        return false;
    }
    if lower.is_some_and(|from| record.timestamp < from) {
        return false;
    }
    if upper.is_some_and(|to| record.timestamp > to) {
        return false;
    }
    true
}
