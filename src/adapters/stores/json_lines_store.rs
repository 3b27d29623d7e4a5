use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Deserialize;

use crate::core::errors::{LogsightError, Result};
use crate::core::models::log_record::{LogRecord, NewLogRecord};
use crate::core::traits::log_store::LogStore;

#[derive(Deserialize)]
struct IdOnly {
    id: u64,
}

/// Log store that keeps one JSON object per line.
///
/// Appends never rewrite existing lines; new ids continue after the
/// highest id already in the file. The file is scanned for that id on the
/// first append only; later appends through the same store reuse it.
pub struct JsonLinesLogStore {
    path: PathBuf,
    next_id: Mutex<Option<u64>>,
}

impl JsonLinesLogStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            next_id: Mutex::new(None),
        }
    }

    /// One past the highest id on disk, reading only the `id` field.
    fn scan_next_id(&self) -> Result<u64> {
        if !self.path.exists() {
            return Ok(1);
        }

        let content = fs::read_to_string(&self.path)?;
        let mut max_id = 0u64;
        for (line_num, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let row: IdOnly = serde_json::from_str(line).map_err(|e| LogsightError::StoreError {
                detail: format!(
                    "Malformed record at {}:{}: {e}",
                    self.path.display(),
                    line_num + 1
                ),
            })?;
            max_id = max_id.max(row.id);
        }
        Ok(max_id + 1)
    }

    fn write_lines(&self, drafts: &[NewLogRecord], id: &mut u64) -> Result<u64> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| LogsightError::StoreError {
                detail: format!("Cannot open {}: {e}", self.path.display()),
            })?;
        let mut writer = BufWriter::new(file);

        for draft in drafts {
            let record = draft.clone().into_record(*id);
            let line = serde_json::to_string(&record).map_err(|e| LogsightError::StoreError {
                detail: format!("Failed to serialize record {id}: {e}"),
            })?;
            writeln!(writer, "{line}")?;
            *id += 1;
        }
        writer.flush()?;

        Ok(drafts.len() as u64)
    }
}

impl LogStore for JsonLinesLogStore {
    fn load(&self) -> Result<Vec<LogRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = fs::File::open(&self.path).map_err(|e| LogsightError::StoreError {
            detail: format!("Cannot read {}: {e}", self.path.display()),
        })?;

        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| LogsightError::StoreError {
                detail: format!("Error reading line {}: {e}", line_num + 1),
            })?;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let record: LogRecord =
                serde_json::from_str(trimmed).map_err(|e| LogsightError::StoreError {
                    detail: format!(
                        "Malformed record at {}:{}: {e}",
                        self.path.display(),
                        line_num + 1
                    ),
                })?;
            records.push(record);
        }

        tracing::debug!(path = %self.path.display(), count = records.len(), "loaded JSON lines store");
        Ok(records)
    }

    fn append(&self, drafts: &[NewLogRecord]) -> Result<u64> {
        let mut next_id = self.next_id.lock().map_err(|_| LogsightError::StoreError {
            detail: format!("Id counter for {} is poisoned", self.path.display()),
        })?;
        let mut id = match *next_id {
            Some(id) => id,
            None => self.scan_next_id()?,
        };

        let written = self.write_lines(drafts, &mut id);
        // a partial write leaves the file ahead of the counter; rescan next time
        *next_id = written.is_ok().then_some(id);
        written
    }
}
