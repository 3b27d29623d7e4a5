use serde::Serialize;

use crate::core::models::activity_stats::DailyCount;
use crate::core::models::log_record::LogRecord;

/// Records flagged by each heuristic. A record may appear in several lists.
///
/// Lists are complete; truncating them for display is the caller's job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyReport {
    pub off_hours: Vec<LogRecord>,
    pub public_ip: Vec<LogRecord>,
    pub rare_device: Vec<LogRecord>,
    pub spike_days: Vec<DailyCount>,
}

impl AnomalyReport {
    /// Returns true if no heuristic flagged anything.
    pub fn is_clean(&self) -> bool {
        self.off_hours.is_empty()
            && self.public_ip.is_empty()
            && self.rare_device.is_empty()
            && self.spike_days.is_empty()
    }

    /// Total number of flags raised across all heuristics.
    pub fn flag_count(&self) -> usize {
        self.off_hours.len() + self.public_ip.len() + self.rare_device.len() + self.spike_days.len()
    }
}
