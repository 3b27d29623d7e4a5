use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ordering applied to filtered records, by id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Optional predicates selecting a subset of the log.
///
/// `from` and `to` are whole days: `from` starts at 00:00:00 and `to`
/// ends at 23:59:59, both inclusive. `None` leaves that side open.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogQuery {
    pub username: Option<String>,
    pub action: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub order: SortOrder,
}

impl LogQuery {
    /// Returns true when no predicate is set.
    pub fn is_unfiltered(&self) -> bool {
        self.username.is_none() && self.action.is_none() && self.from.is_none() && self.to.is_none()
    }
}
