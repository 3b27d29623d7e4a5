use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::errors::{LogsightError, Result};
use crate::core::models::log_record::{LogRecord, TIMESTAMP_FORMAT};

const HEADER: [&str; 6] = ["ID", "Username", "Action", "Timestamp", "IP", "Device"];

/// Writes records as RFC 4180 CSV.
pub struct CsvExporter;

impl CsvExporter {
    /// Write `records` to `path`, replacing any existing file.
    pub fn write(&self, path: &Path, records: &[LogRecord]) -> Result<()> {
        let file = File::create(path).map_err(|e| LogsightError::ExportError {
            detail: format!("Cannot create {}: {e}", path.display()),
        })?;
        let mut writer = BufWriter::new(file);

        self.write_to(&mut writer, records)
            .and_then(|_| writer.flush())
            .map_err(|e| LogsightError::ExportError {
                detail: format!("Failed writing {}: {e}", path.display()),
            })
    }

    /// Serialize into any writer; used by `write` and by tests.
    pub fn write_to<W: Write>(&self, out: &mut W, records: &[LogRecord]) -> std::io::Result<()> {
        write_row(out, &HEADER)?;
        for r in records {
            let id = r.id.to_string();
            let ts = r.timestamp.format(TIMESTAMP_FORMAT).to_string();
            write_row(
                out,
                &[
                    id.as_str(),
                    r.username.as_str(),
                    r.action.as_str(),
                    ts.as_str(),
                    r.ip_address.as_str(),
                    r.device.as_str(),
                ],
            )?;
        }
        Ok(())
    }
}

fn write_row<W: Write>(out: &mut W, fields: &[&str]) -> std::io::Result<()> {
    let line = fields
        .iter()
        .map(|f| escape_field(f))
        .collect::<Vec<_>>()
        .join(",");
    write!(out, "{line}\r\n")
}

/// Quote a field when it contains a separator, quote or line break.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
