use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::errors::{LogsightError, Result};
use crate::core::models::detection_config::DetectionConfig;

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Top-level logsight configuration read from `.logsight/config.toml`.
///
/// Every section is optional; a missing file means all defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreSection,
    pub detection: DetectionConfig,
    pub display: DisplaySection,
}

impl AppConfig {
    /// Load `{config_dir}/config.toml`, falling back to defaults if absent.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(CONFIG_FILE);
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content).map_err(|e| LogsightError::InvalidConfig {
            detail: format!("Failed to parse {}: {e}", config_path.display()),
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.detection.validate()?;

        if self.store.path.trim().is_empty() {
            return Err(LogsightError::InvalidConfig {
                detail: "[store] path must not be empty".into(),
            });
        }

        if self.display.max_rows == 0 {
            return Err(LogsightError::InvalidConfig {
                detail: "[display] max_rows must be at least 1".into(),
            });
        }

        Ok(())
    }

    /// Render the defaults as TOML, as written by `logsight init`.
    pub fn default_toml() -> Result<String> {
        toml::to_string_pretty(&Self::default()).map_err(|e| LogsightError::InvalidConfig {
            detail: format!("Failed to render default config: {e}"),
        })
    }
}

/// The `[store]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    /// `.db`/`.sqlite`/`.sqlite3` selects SQLite, anything else JSON lines.
    pub path: String,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            path: "activity_logs.db".to_string(),
        }
    }
}

/// The `[display]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    /// Flagged records printed per heuristic before "... and N more".
    pub max_rows: usize,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self { max_rows: 10 }
    }
}
