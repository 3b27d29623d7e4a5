use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Storage format for timestamps: second precision, no timezone.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the activity log.
///
/// Timestamps are naive local wall-clock times. Day grouping uses the
/// naive date as-is; no timezone conversion happens anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub id: u64,
    pub username: String,
    pub action: String,
    #[serde(with = "naive_timestamp")]
    pub timestamp: NaiveDateTime,
    /// Kept as raw text: degenerate inputs carry malformed or empty addresses.
    #[serde(default)]
    pub ip_address: String,
    #[serde(default)]
    pub device: String,
}

impl LogRecord {
    /// Calendar date of the record, taken from the naive timestamp.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// A record that has not been persisted yet and therefore has no id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLogRecord {
    pub username: String,
    pub action: String,
    pub timestamp: NaiveDateTime,
    pub ip_address: String,
    pub device: String,
}

impl NewLogRecord {
    /// Attach the id assigned by the store.
    pub fn into_record(self, id: u64) -> LogRecord {
        LogRecord {
            id,
            username: self.username,
            action: self.action,
            timestamp: self.timestamp,
            ip_address: self.ip_address,
            device: self.device,
        }
    }
}

/// Serde adapter writing timestamps as `YYYY-MM-DD HH:MM:SS`.
pub mod naive_timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&ts.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}
