use crate::core::errors::Result;
use crate::core::models::log_record::{LogRecord, NewLogRecord};

/// Port for reading and appending activity-log records.
///
/// Stores own id assignment: ids are unique and increase with insertion.
pub trait LogStore: Send + Sync {
    /// Load every record, in storage order.
    fn load(&self) -> Result<Vec<LogRecord>>;

    /// Persist new records and return how many were written.
    fn append(&self, drafts: &[NewLogRecord]) -> Result<u64>;
}
