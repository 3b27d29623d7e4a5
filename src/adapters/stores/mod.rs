pub mod json_lines_store;
pub mod sqlite_store;

use std::path::Path;

use crate::core::traits::log_store::LogStore;
use json_lines_store::JsonLinesLogStore;
use sqlite_store::SqliteLogStore;

/// Pick a store backend from the file extension.
///
/// `.db`, `.sqlite` and `.sqlite3` open SQLite; anything else is JSON lines.
pub fn open_store(path: &Path) -> Box<dyn LogStore> {
    let is_sqlite = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| matches!(e.to_ascii_lowercase().as_str(), "db" | "sqlite" | "sqlite3"));

    if is_sqlite {
        Box::new(SqliteLogStore::new(path))
    } else {
        Box::new(JsonLinesLogStore::new(path))
    }
}
