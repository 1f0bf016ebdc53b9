use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Tunables of the player core. Every field has a default, so a partial JSON
/// document is a valid configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// How long the hold key must stay down before a tap becomes a hold
    pub disambiguation_window_ms: u64,
    pub default_temporary_rate: f64,
    /// Rates selectable with Digit1, Digit2, ...
    pub temporary_rate_presets: Vec<f64>,
    pub position_save_interval_secs: u64,
    pub seek_step_secs: f64,
    pub volume_step: u8,
    pub min_rate: f64,
    pub max_rate: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            disambiguation_window_ms: 200,
            default_temporary_rate: 2.0,
            temporary_rate_presets: vec![1.25, 1.5, 2.0, 2.5, 3.0],
            position_save_interval_secs: 10,
            seek_step_secs: 10.0,
            volume_step: 10,
            min_rate: 0.25,
            max_rate: 4.0,
        }
    }
}

impl PlayerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::new(format!("cannot read {}: {}", path.as_ref().display(), e))
        })?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.disambiguation_window_ms == 0 {
            return Err(ConfigError::new("disambiguation_window_ms must be positive"));
        }
        if !(self.min_rate > 0.0 && self.min_rate < self.max_rate) {
            return Err(ConfigError::new(format!(
                "rate bounds [{}, {}] are not a valid positive range",
                self.min_rate, self.max_rate
            )));
        }
        if !(self.default_temporary_rate > 0.0) {
            return Err(ConfigError::new("default_temporary_rate must be positive"));
        }
        if self.temporary_rate_presets.is_empty() {
            return Err(ConfigError::new("temporary_rate_presets must not be empty"));
        }
        if let Some(bad) = self.temporary_rate_presets.iter().find(|r| !(**r > 0.0)) {
            return Err(ConfigError::new(format!(
                "temporary rate preset {} is not positive",
                bad
            )));
        }
        if self.position_save_interval_secs == 0 {
            return Err(ConfigError::new("position_save_interval_secs must be positive"));
        }
        Ok(())
    }

    pub fn disambiguation_window(&self) -> Duration {
        Duration::from_millis(self.disambiguation_window_ms)
    }

    pub fn position_save_interval(&self) -> Duration {
        Duration::from_secs(self.position_save_interval_secs)
    }
}
