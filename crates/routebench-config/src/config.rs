//! Root configuration type.

use std::collections::HashSet;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::schema::{DriverConfig, HarnessSection, LoggingConfig, ProbeConfig, MAX_SETTLE_PASSES};
use crate::ConfigError;

/// Complete harness configuration.
///
/// Every section is optional in a file; missing sections take their defaults.
/// Use [`ConfigLoader`](crate::ConfigLoader) to layer files and environment
/// variables on top.
///
/// # Example
///
/// ```
/// use routebench_config::HarnessConfig;
///
/// let config = HarnessConfig::default();
/// assert!(config.probe.enabled);
/// assert!(config.harness.adapters.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    /// Handler behavior, selection and adapter filter.
    #[serde(default)]
    pub harness: HarnessSection,

    /// Memory probe settings.
    #[serde(default)]
    pub probe: ProbeConfig,

    /// Benchmark driver settings.
    #[serde(default)]
    pub driver: DriverConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HarnessConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - `probe.settle_passes` is outside `1..=64`
    /// - `harness.selection` is not a valid regex
    /// - `logging.level` is empty or not a valid filter
    ///
    /// Returns `ConfigError::ValidationError` if `harness.adapters` contains an
    /// empty or repeated name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_SETTLE_PASSES).contains(&self.probe.settle_passes) {
            return Err(ConfigError::invalid_value(
                "probe.settle_passes",
                format!("must be between 1 and {MAX_SETTLE_PASSES}"),
            ));
        }

        if let Some(pattern) = &self.harness.selection {
            if let Err(e) = Regex::new(pattern) {
                return Err(ConfigError::invalid_value("harness.selection", e.to_string()));
            }
        }

        if self.logging.enabled {
            if self.logging.level.trim().is_empty() {
                return Err(ConfigError::invalid_value("logging.level", "must not be empty"));
            }
            if let Err(e) = routebench_telemetry::create_env_filter(&self.logging.level) {
                return Err(ConfigError::invalid_value("logging.level", e.to_string()));
            }
        }

        let mut seen = HashSet::new();
        for name in &self.harness.adapters {
            if name.trim().is_empty() {
                return Err(ConfigError::validation_error("harness.adapters contains an empty name"));
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::validation_error(format!(
                    "duplicate adapter in harness.adapters: {name}"
                )));
            }
        }

        Ok(())
    }
}
