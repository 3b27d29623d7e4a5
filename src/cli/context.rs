use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::core::errors::{LogsightError, Result};

static CONFIG_DIR: OnceLock<PathBuf> = OnceLock::new();
static STORE_OVERRIDE: OnceLock<PathBuf> = OnceLock::new();

/// Initialize the global config directory and optional store override.
/// Without `--config`, the directory defaults to `.logsight`.
pub fn init(config_dir: Option<&str>, store: Option<&str>) {
    let dir = config_dir
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".logsight"));
    let _ = CONFIG_DIR.set(dir);

    if let Some(path) = store {
        let _ = STORE_OVERRIDE.set(PathBuf::from(path));
    }
}

/// Get the current config directory path.
pub fn config_dir() -> &'static Path {
    CONFIG_DIR
        .get()
        .map(|p| p.as_path())
        .unwrap_or(Path::new(".logsight"))
}

/// Store path given with `--store`, if any.
pub fn store_override() -> Option<&'static Path> {
    STORE_OVERRIDE.get().map(|p| p.as_path())
}

/// Validate a user-supplied output file name.
///
/// Rejects empty names and names that are directories.
pub fn validate_output_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(LogsightError::ExportError {
            detail: "output path must not be empty".into(),
        });
    }
    if path.is_dir() {
        return Err(LogsightError::ExportError {
            detail: format!("{} is a directory", path.display()),
        });
    }
    Ok(())
}
