use std::path::PathBuf;

/// All domain errors for logsight.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum LogsightError {
    #[error(
        "Invalid date: '{input}'\n\n  \
         Expected ISO 8601 (YYYY-MM-DD), e.g. 2026-01-15.\n  \
         The bound was ignored and the range left open on that side."
    )]
    InvalidDateInput { input: String },

    #[error(
        "File not found: {path}\n\n  \
         Check that the path is correct and the file exists.\n  \
         Run 'logsight generate' to create a sample log store."
    )]
    FileNotFound { path: PathBuf },

    #[error(
        "Invalid configuration: {detail}\n\n  \
         Check .logsight/config.toml or run 'logsight init' to start from defaults."
    )]
    InvalidConfig { detail: String },

    #[error("Invalid argument: {detail}")]
    InvalidArgument { detail: String },

    #[error("Log store error: {detail}")]
    StoreError { detail: String },

    #[error(
        "Export failed: {detail}\n\n  \
         Check that the target directory exists and is writable."
    )]
    ExportError { detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LogsightError>;
