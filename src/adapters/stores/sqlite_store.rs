use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use rusqlite::{Connection, params};

use crate::core::errors::{LogsightError, Result};
use crate::core::models::log_record::{LogRecord, NewLogRecord, TIMESTAMP_FORMAT};
use crate::core::traits::log_store::LogStore;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT,
    action TEXT,
    timestamp TEXT,
    ip_address TEXT,
    device TEXT
);
";

/// Log store backed by a SQLite `logs` table.
///
/// Timestamps are stored as `YYYY-MM-DD HH:MM:SS` text; ids come from
/// SQLite's AUTOINCREMENT.
pub struct SqliteLogStore {
    path: PathBuf,
}

/// One row as stored, before timestamp parsing.
struct RawRow {
    id: i64,
    username: Option<String>,
    action: Option<String>,
    timestamp: Option<String>,
    ip_address: Option<String>,
    device: Option<String>,
}

impl SqliteLogStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    fn open(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path).map_err(|e| store_error(&self.path, e))?;
        conn.execute_batch(SCHEMA)
            .map_err(|e| store_error(&self.path, e))?;
        Ok(conn)
    }
}

fn store_error(path: &Path, e: rusqlite::Error) -> LogsightError {
    LogsightError::StoreError {
        detail: format!("{}: {e}", path.display()),
    }
}

impl RawRow {
    fn into_record(self) -> Result<LogRecord> {
        let id = u64::try_from(self.id).map_err(|_| LogsightError::StoreError {
            detail: format!("Negative id {} in logs table", self.id),
        })?;
        let raw_ts = self.timestamp.unwrap_or_default();
        let timestamp = NaiveDateTime::parse_from_str(&raw_ts, TIMESTAMP_FORMAT).map_err(|e| {
            LogsightError::StoreError {
                detail: format!("Row {id}: invalid timestamp '{raw_ts}': {e}"),
            }
        })?;

        Ok(LogRecord {
            id,
            username: self.username.unwrap_or_default(),
            action: self.action.unwrap_or_default(),
            timestamp,
            ip_address: self.ip_address.unwrap_or_default(),
            device: self.device.unwrap_or_default(),
        })
    }
}

impl LogStore for SqliteLogStore {
    fn load(&self) -> Result<Vec<LogRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let conn = self.open()?;
        let mut stmt = conn
            .prepare("SELECT id, username, action, timestamp, ip_address, device FROM logs ORDER BY id")
            .map_err(|e| store_error(&self.path, e))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(RawRow {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    action: row.get(2)?,
                    timestamp: row.get(3)?,
                    ip_address: row.get(4)?,
                    device: row.get(5)?,
                })
            })
            .map_err(|e| store_error(&self.path, e))?;

        let mut records = Vec::new();
        for row in rows {
            let raw = row.map_err(|e| store_error(&self.path, e))?;
            records.push(raw.into_record()?);
        }

        tracing::debug!(path = %self.path.display(), count = records.len(), "loaded SQLite store");
        Ok(records)
    }

    fn append(&self, drafts: &[NewLogRecord]) -> Result<u64> {
        let mut conn = self.open()?;
        let tx = conn
            .transaction()
            .map_err(|e| store_error(&self.path, e))?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO logs (username, action, timestamp, ip_address, device) \
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                )
                .map_err(|e| store_error(&self.path, e))?;

            for draft in drafts {
                stmt.execute(params![
                    draft.username,
                    draft.action,
                    draft.timestamp.format(TIMESTAMP_FORMAT).to_string(),
                    draft.ip_address,
                    draft.device,
                ])
                .map_err(|e| store_error(&self.path, e))?;
            }
        }
        tx.commit().map_err(|e| store_error(&self.path, e))?;

        Ok(drafts.len() as u64)
    }
}
