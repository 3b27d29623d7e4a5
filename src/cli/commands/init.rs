use crate::cli::{context, output};
use crate::config::app_config::{AppConfig, CONFIG_FILE};
use crate::core::errors::{LogsightError, Result};

/// Execute the `logsight init` command.
///
/// Creates the config directory and writes `config.toml` with defaults.
pub fn execute() -> Result<()> {
    let config_dir = context::config_dir();
    let config_path = config_dir.join(CONFIG_FILE);

    if config_path.exists() {
        return Err(LogsightError::InvalidConfig {
            detail: format!(
                "logsight is already initialized ({} exists)",
                config_path.display()
            ),
        });
    }

    output::header("logsight — Initializing project");

    std::fs::create_dir_all(config_dir)?;
    std::fs::write(&config_path, AppConfig::default_toml()?)?;
    output::success(&format!("Generated {} with defaults", config_path.display()));

    println!("\n  Next steps:");
    println!("    1. logsight generate --count 10000   Create sample data");
    println!("    2. logsight stats                    Summarize activity");
    println!("    3. logsight anomalies                Look for suspicious records");

    Ok(())
}
