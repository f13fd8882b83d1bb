//! Layered configuration loading.
//!
//! This module provides the [`ConfigLoader`] for loading configuration from
//! defaults, files, and environment variables.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

use routebench_core::HandlerBehavior;
use routebench_telemetry::LogFormat;

use crate::{ConfigError, HarnessConfig};

/// Configuration loader with layered approach.
///
/// Later layers override earlier ones:
/// 1. Default values
/// 2. Configuration file (TOML or JSON)
/// 3. Environment variables
///
/// A file or string layer replaces the whole configuration before it. Keys
/// it leaves out take their default values, not the values of an earlier
/// file. Environment variables override individual keys.
///
/// # Example
///
/// ```no_run
/// use routebench_config::ConfigLoader;
///
/// # fn main() -> Result<(), routebench_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_optional_file("routebench.toml")?
///     .with_env_prefix("ROUTEBENCH")
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigLoader {
    config: HarnessConfig,
    env_prefix: Option<String>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: HarnessConfig::default(),
            env_prefix: None,
        }
    }

    /// Load configuration from a file.
    ///
    /// The format is chosen by extension: `.toml` or `.json`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - The file does not exist
    /// - The file cannot be read
    /// - The file contains invalid TOML/JSON
    /// - The file contains unknown fields
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;

        let file_config = Self::parse_file(&content, path)?;
        self.merge_config(file_config);

        Ok(self)
    }

    /// Load configuration from a file if it exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Load configuration from a string in the given format (`toml` or `json`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if parsing fails or the format is unsupported.
    ///
    /// # Example
    ///
    /// ```
    /// use routebench_config::ConfigLoader;
    ///
    /// let toml = r#"
    ///     [probe]
    ///     settle_passes = 8
    /// "#;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string(toml, "toml")
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.probe.settle_passes, 8);
    /// ```
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        let file_config = match format.to_lowercase().as_str() {
            "toml" => toml::from_str(content)?,
            "json" => serde_json::from_str(content)?,
            _ => {
                return Err(ConfigError::validation_error(format!(
                    "unsupported configuration format: {format}"
                )))
            }
        };

        self.merge_config(file_config);
        Ok(self)
    }

    /// Set environment variable prefix for overrides.
    ///
    /// Environment variables use the format `PREFIX__SECTION__KEY`.
    /// For example, with prefix "ROUTEBENCH":
    /// - `ROUTEBENCH__HARNESS__ADAPTERS=matchit,path-tree`
    /// - `ROUTEBENCH__PROBE__ENABLED=false`
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Load a `.env` file into the process environment, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a `.env` file exists but cannot be parsed.
    pub fn with_dotenv(self) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if e.not_found() => Ok(self),
            Err(e) => Err(ConfigError::validation_error(format!("invalid .env file: {e}"))),
        }
    }

    /// Finalize and return the loaded configuration.
    ///
    /// Applies environment variable overrides (if a prefix was set) and
    /// validates the result.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an environment variable cannot be parsed or
    /// validation fails.
    pub fn load(mut self) -> Result<HarnessConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            self.apply_env_overrides(&prefix)?;
        }

        self.config.validate()?;

        Ok(self.config)
    }

    fn parse_file(content: &str, path: &Path) -> Result<HarnessConfig, ConfigError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("toml") => Ok(toml::from_str(content)?),
            Some("json") => Ok(serde_json::from_str(content)?),
            _ => Err(ConfigError::validation_error(format!(
                "unsupported configuration file format: {}",
                path.display()
            ))),
        }
    }

    // Missing keys already took their serde defaults.
    fn merge_config(&mut self, file_config: HarnessConfig) {
        self.config = file_config;
    }

    fn apply_env_overrides(&mut self, prefix: &str) -> Result<(), ConfigError> {
        let marker = format!("{prefix}__");
        let env_vars: HashMap<String, String> = env::vars()
            .filter(|(k, _)| k.starts_with(&marker))
            .collect();

        for (key, value) in env_vars {
            self.apply_env_var(&key, &value, prefix)?;
        }

        Ok(())
    }

    fn apply_env_var(&mut self, key: &str, value: &str, prefix: &str) -> Result<(), ConfigError> {
        let key_without_prefix = key
            .strip_prefix(prefix)
            .and_then(|k| k.strip_prefix("__"))
            .ok_or_else(|| ConfigError::env_parse_error(key, "invalid key format"))?;

        let parts: Vec<&str> = key_without_prefix.split("__").collect();

        match parts.as_slice() {
            ["HARNESS", "HANDLER"] => {
                self.config.harness.handler = value
                    .parse::<HandlerBehavior>()
                    .map_err(|_| {
                        ConfigError::env_parse_error(key, "expected 'noop', 'echo_uri', or 'echo_param'")
                    })?;
            }
            ["HARNESS", "SELECTION"] => {
                self.config.harness.selection = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            ["HARNESS", "ADAPTERS"] => {
                self.config.harness.adapters = value
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect();
            }

            ["PROBE", "ENABLED"] => {
                self.config.probe.enabled = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }
            ["PROBE", "SETTLE_PASSES"] => {
                self.config.probe.settle_passes = value
                    .parse()
                    .map_err(|_| ConfigError::env_parse_error(key, "expected integer"))?;
            }

            ["DRIVER", "ALLOC_SAMPLE_ITERATIONS"] => {
                self.config.driver.alloc_sample_iterations = value
                    .parse()
                    .map_err(|_| ConfigError::env_parse_error(key, "expected integer"))?;
            }

            ["LOGGING", "ENABLED"] => {
                self.config.logging.enabled = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }
            ["LOGGING", "LEVEL"] => {
                self.config.logging.level = value.to_string();
            }
            ["LOGGING", "FORMAT"] => {
                self.config.logging.format = match value.to_lowercase().as_str() {
                    "json" => LogFormat::Json,
                    "pretty" => LogFormat::Pretty,
                    "compact" => LogFormat::Compact,
                    _ => {
                        return Err(ConfigError::env_parse_error(
                            key,
                            "expected 'json', 'pretty', or 'compact'",
                        ))
                    }
                };
            }
            ["LOGGING", "ANSI_ENABLED"] => {
                self.config.logging.ansi_enabled = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }
            ["LOGGING", "INCLUDE_LOCATION"] => {
                self.config.logging.include_location = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }

            _ => {}
        }

        Ok(())
    }
}

/// Parse a boolean from a string.
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::DEFAULT_SETTLE_PASSES;

    #[test]
    fn test_loader_new() {
        let config = ConfigLoader::new().load().unwrap();
        assert_eq!(config, HarnessConfig::default());
    }

    #[test]
    fn test_loader_with_string_toml() {
        let toml = r#"
            [harness]
            handler = "write"
            adapters = ["matchit"]
        "#;

        let config = ConfigLoader::new()
            .with_string(toml, "toml")
            .unwrap()
            .load()
            .unwrap();

        assert_eq!(config.harness.handler, HandlerBehavior::EchoParam);
        assert_eq!(config.harness.adapters, vec!["matchit".to_string()]);
        assert!(config.probe.enabled);
    }

    #[test]
    fn test_loader_with_string_json() {
        let json = r#"{"driver": {"alloc_sample_iterations": 0}}"#;

        let config = ConfigLoader::new()
            .with_string(json, "json")
            .unwrap()
            .load()
            .unwrap();

        assert_eq!(config.driver.alloc_sample_iterations, 0);
    }

    #[test]
    fn test_loader_with_string_unsupported_format() {
        let result = ConfigLoader::new().with_string("", "yaml");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_loader_with_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[probe]\nsettle_passes = 2\n\n[logging]\nlevel = \"warn\"").unwrap();

        let config = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap();
        assert_eq!(config.probe.settle_passes, 2);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_loader_with_file_unknown_field() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[probe]\nsettle = 2").unwrap();

        let result = ConfigLoader::new().with_file(file.path());
        assert!(matches!(result, Err(ConfigError::TomlError(_))));
    }

    #[test]
    fn test_loader_with_file_bad_extension() {
        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        let result = ConfigLoader::new().with_file(file.path());
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_loader_with_file_not_found() {
        let result = ConfigLoader::new().with_file("/nonexistent/routebench.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }

    #[test]
    fn test_loader_with_optional_file_not_found() {
        let loader = ConfigLoader::new()
            .with_optional_file("/nonexistent/routebench.toml")
            .unwrap();
        assert_eq!(loader.load().unwrap(), HarnessConfig::default());
    }

    #[test]
    fn test_load_validates() {
        let result = ConfigLoader::new()
            .with_string("[probe]\nsettle_passes = 0", "toml")
            .unwrap()
            .load();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_later_file_layer_replaces_earlier() {
        let config = ConfigLoader::new()
            .with_string("[probe]\nsettle_passes = 8\n\n[logging]\nlevel = \"warn\"", "toml")
            .unwrap()
            .with_string("[logging]\nformat = \"json\"", "toml")
            .unwrap()
            .load()
            .unwrap();

        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.probe.settle_passes, DEFAULT_SETTLE_PASSES);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("ON"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("no"), Some(false));
        assert_eq!(parse_bool("False"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool(""), None);
    }

    // Overrides are exercised through apply_env_var so the tests never
    // mutate the process environment.

    #[test]
    fn test_apply_env_var_harness() {
        let mut loader = ConfigLoader::new();
        loader.apply_env_var("TEST__HARNESS__HANDLER", "echo_uri", "TEST").unwrap();
        loader.apply_env_var("TEST__HARNESS__SELECTION", "^github", "TEST").unwrap();
        loader
            .apply_env_var("TEST__HARNESS__ADAPTERS", "matchit, path-tree,,", "TEST")
            .unwrap();

        assert_eq!(loader.config.harness.handler, HandlerBehavior::EchoUri);
        assert_eq!(loader.config.harness.selection.as_deref(), Some("^github"));
        assert_eq!(loader.config.harness.adapters, vec!["matchit", "path-tree"]);
    }

    #[test]
    fn test_apply_env_var_empty_selection_clears() {
        let mut loader = ConfigLoader::new();
        loader.config.harness.selection = Some("param".to_string());
        loader.apply_env_var("TEST__HARNESS__SELECTION", "", "TEST").unwrap();
        assert!(loader.config.harness.selection.is_none());
    }

    #[test]
    fn test_apply_env_var_probe_and_driver() {
        let mut loader = ConfigLoader::new();
        loader.apply_env_var("TEST__PROBE__ENABLED", "off", "TEST").unwrap();
        loader.apply_env_var("TEST__PROBE__SETTLE_PASSES", "16", "TEST").unwrap();
        loader
            .apply_env_var("TEST__DRIVER__ALLOC_SAMPLE_ITERATIONS", "500", "TEST")
            .unwrap();

        assert!(!loader.config.probe.enabled);
        assert_eq!(loader.config.probe.settle_passes, 16);
        assert_eq!(loader.config.driver.alloc_sample_iterations, 500);
    }

    #[test]
    fn test_apply_env_var_logging() {
        let mut loader = ConfigLoader::new();
        loader.apply_env_var("TEST__LOGGING__LEVEL", "debug", "TEST").unwrap();
        loader.apply_env_var("TEST__LOGGING__FORMAT", "pretty", "TEST").unwrap();
        loader.apply_env_var("TEST__LOGGING__INCLUDE_LOCATION", "yes", "TEST").unwrap();

        assert_eq!(loader.config.logging.level, "debug");
        assert_eq!(loader.config.logging.format, LogFormat::Pretty);
        assert!(loader.config.logging.include_location);
    }

    #[test]
    fn test_apply_env_var_invalid_values() {
        let mut loader = ConfigLoader::new();
        assert!(loader.apply_env_var("TEST__PROBE__SETTLE_PASSES", "many", "TEST").is_err());
        assert!(loader.apply_env_var("TEST__PROBE__ENABLED", "maybe", "TEST").is_err());
        assert!(loader.apply_env_var("TEST__HARNESS__HANDLER", "sleep", "TEST").is_err());
        assert!(loader.apply_env_var("TEST__LOGGING__FORMAT", "xml", "TEST").is_err());
    }

    #[test]
    fn test_apply_env_var_unknown_key_ignored() {
        let mut loader = ConfigLoader::new();
        loader.apply_env_var("TEST__SERVER__PORT", "80", "TEST").unwrap();
        assert_eq!(loader.config, HarnessConfig::default());
    }

    #[test]
    fn test_apply_env_var_bad_prefix() {
        let mut loader = ConfigLoader::new();
        let result = loader.apply_env_var("OTHER__PROBE__ENABLED", "true", "TEST");
        assert!(matches!(result, Err(ConfigError::EnvParseError { .. })));
    }

    #[test]
    fn test_complete_toml_config() {
        let toml = r#"
            [harness]
            handler = "echo_param"
            selection = "^param"
            adapters = ["matchit", "routefinder"]

            [probe]
            enabled = false
            settle_passes = 1

            [driver]
            alloc_sample_iterations = 100

            [logging]
            enabled = true
            level = "routebench=debug,warn"
            format = "json"
            ansi_enabled = false
            include_location = true
        "#;

        let config = ConfigLoader::new()
            .with_string(toml, "toml")
            .unwrap()
            .load()
            .unwrap();

        assert_eq!(config.harness.selection.as_deref(), Some("^param"));
        assert!(!config.probe.enabled);
        assert_eq!(config.driver.alloc_sample_iterations, 100);
        assert_eq!(config.logging.format, LogFormat::Json);
    }
}
