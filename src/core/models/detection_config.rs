use serde::{Deserialize, Serialize};

use crate::core::errors::{LogsightError, Result};

/// Tunables for the anomaly heuristics.
///
/// Read from the `[detection]` section of `config.toml`; every field
/// falls back to its default when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// First working hour, inclusive.
    pub working_hours_start: u32,
    /// End of the working window, exclusive.
    pub working_hours_end: u32,
    /// A device seen in fewer than `len * ratio` records is rare.
    pub rare_device_ratio: f64,
    /// Days above `mean + sigma * stddev` count as spikes.
    pub spike_sigma: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            working_hours_start: 6,
            working_hours_end: 23,
            rare_device_ratio: 0.01,
            spike_sigma: 2.0,
        }
    }
}

impl DetectionConfig {
    /// Reject settings the heuristics cannot interpret.
    pub fn validate(&self) -> Result<()> {
        if self.working_hours_start >= self.working_hours_end || self.working_hours_end > 24 {
            return Err(LogsightError::InvalidConfig {
                detail: format!(
                    "working hours must satisfy start < end <= 24, got [{}, {})",
                    self.working_hours_start, self.working_hours_end
                ),
            });
        }

        if !self.rare_device_ratio.is_finite() || !(0.0..=1.0).contains(&self.rare_device_ratio) {
            return Err(LogsightError::InvalidConfig {
                detail: format!(
                    "rare_device_ratio must be between 0.0 and 1.0, got {}",
                    self.rare_device_ratio
                ),
            });
        }

        if !self.spike_sigma.is_finite() || self.spike_sigma < 0.0 {
            return Err(LogsightError::InvalidConfig {
                detail: format!("spike_sigma must be >= 0, got {}", self.spike_sigma),
            });
        }

        Ok(())
    }
}
