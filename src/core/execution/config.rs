//! Configuration for the tag simulator
//!
//! Mirrors the `AppSettings` section hosts already ship, so the same JSON can
//! be handed straight to [`SimulatorConfig::from_json_str`].

use crate::core::builder::DEFAULT_NAMESPACE_INDEX;
use crate::core::errors::ConfigError;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_UPDATE_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SimulatorConfig {
    /// Tick interval in milliseconds. Non-positive values fall back to the default.
    pub update_interval_ms: i64,
    /// Namespace index for every created node id
    pub namespace_index: u16,
    /// Seed for the value generator; `None` seeds from entropy
    pub seed: Option<u64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SettingsFile {
    app_settings: SimulatorConfig,
}

impl SimulatorConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self {
            update_interval_ms: DEFAULT_UPDATE_INTERVAL_MS as i64,
            namespace_index: DEFAULT_NAMESPACE_INDEX,
            seed: None,
        }
    }

    /// Set the delay between ticks
    ///
    /// # Arguments
    /// * `interval_ms` - Tick interval in milliseconds; zero or negative
    ///   selects the default interval
    ///
    /// # Returns
    /// A new configuration with the specified interval
    pub fn with_update_interval_ms(mut self, interval_ms: i64) -> Self {
        self.update_interval_ms = interval_ms;
        self
    }

    /// Set the namespace index used for every node id
    ///
    /// # Arguments
    /// * `namespace_index` - Namespace index of the simulation nodes
    ///
    /// # Returns
    /// A new configuration with the specified namespace index
    pub fn with_namespace_index(mut self, namespace_index: u16) -> Self {
        self.namespace_index = namespace_index;
        self
    }

    /// Fix the generator seed for reproducible runs
    ///
    /// # Arguments
    /// * `seed` - Seed for the value generator
    ///
    /// # Returns
    /// A new configuration with the specified seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Effective delay between ticks
    pub fn tick_interval(&self) -> Duration {
        if self.update_interval_ms > 0 {
            Duration::from_millis(self.update_interval_ms as u64)
        } else {
            Duration::from_millis(DEFAULT_UPDATE_INTERVAL_MS)
        }
    }

    /// Parse settings JSON, either the settings object itself or a document
    /// with the settings nested under `AppSettings`
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if value.get("AppSettings").is_some() {
            let file: SettingsFile = serde_json::from_value(value)?;
            Ok(file.app_settings)
        } else {
            Ok(serde_json::from_value(value)?)
        }
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self::new()
    }
}
