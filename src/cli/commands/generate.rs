use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};

use crate::adapters::stores::open_store;
use crate::cli::commands::query_helpers::{load_config, store_path};
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::services::generator_service::GeneratorService;

/// Records generated and written per store transaction.
const BATCH_SIZE: usize = 10_000;

/// Execute the `logsight generate` command.
///
/// Appends `count` synthetic records spread over the last `days` days.
pub fn execute(count: usize, days: u32, seed: Option<u64>) -> Result<()> {
    let config = load_config()?;
    let path = store_path(&config);
    let mut generator = GeneratorService::new(seed, Local::now().naive_local(), days)?;
    let store = open_store(&path);

    output::header("logsight generate");

    let progress = progress_bar(count as u64);

    let mut remaining = count;
    let mut written = 0u64;
    while remaining > 0 {
        let size = remaining.min(BATCH_SIZE);
        written += store.append(&generator.batch(size))?;
        progress.inc(size as u64);
        remaining -= size;
    }
    progress.finish_and_clear();

    tracing::debug!(written, path = %path.display(), "generation finished");
    output::success(&format!("Wrote {written} records to {}", path.display()));

    Ok(())
}

fn progress_bar(len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    if let Ok(style) =
        ProgressStyle::with_template("  {spinner} [{bar:40}] {pos}/{len} records ({eta})")
    {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}
