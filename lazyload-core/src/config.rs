//! Registry configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Configuration for a [`LazyRegistry`](crate::LazyRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Name attached to every tracing event emitted by the registry.
    pub name: String,
    /// Measure how long each computation takes. When disabled, profile
    /// snapshots still count executions but report no durations.
    pub record_timings: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            name: "lazy_loader".to_string(),
            record_timings: true,
        }
    }
}

impl RegistryConfig {
    /// Create a new registry config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the registry name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Enable or disable timing measurement.
    pub fn with_timings(mut self, enabled: bool) -> Self {
        self.record_timings = enabled;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "name".to_string(),
                value: self.name.clone(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
