//! Configuration sections.

use routebench_core::HandlerBehavior;
use routebench_telemetry::{LogConfig, LogFormat};
use serde::{Deserialize, Serialize};

/// Default number of reclamation passes around a memory probe.
pub const DEFAULT_SETTLE_PASSES: u32 = 4;

/// Upper bound on reclamation passes.
pub const MAX_SETTLE_PASSES: u32 = 64;

/// Default iteration count for allocation reports.
pub const DEFAULT_ALLOC_SAMPLE_ITERATIONS: u64 = 10_000;

/// What gets benchmarked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct HarnessSection {
    /// Behavior attached to every route of a table build.
    #[serde(default)]
    pub handler: HandlerBehavior,

    /// Regex over benchmark ids. Overrides the command-line filter.
    #[serde(default)]
    pub selection: Option<String>,

    /// Adapter names to run. Empty runs every adapter.
    #[serde(default)]
    pub adapters: Vec<String>,
}

/// Memory probe settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ProbeConfig {
    /// Whether table builds are wrapped in a memory probe.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum reclamation passes before each heap reading.
    #[serde(default = "default_settle_passes")]
    pub settle_passes: u32,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            settle_passes: DEFAULT_SETTLE_PASSES,
        }
    }
}

/// Benchmark driver settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DriverConfig {
    /// Iterations counted for the allocation report. Zero disables it.
    #[serde(default = "default_alloc_sample_iterations")]
    pub alloc_sample_iterations: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            alloc_sample_iterations: DEFAULT_ALLOC_SAMPLE_ITERATIONS,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Filter directives (trace, debug, info, warn, error, or per-target).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include ANSI color codes in output.
    #[serde(default = "default_true")]
    pub ansi_enabled: bool,

    /// Include source file and line in logs.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            ansi_enabled: true,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    /// Converts to the subscriber configuration.
    #[must_use]
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            enabled: self.enabled,
            level: self.level.clone(),
            format: self.format,
            file_line_info: self.include_location,
            ansi: self.ansi_enabled,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_settle_passes() -> u32 {
    DEFAULT_SETTLE_PASSES
}

fn default_alloc_sample_iterations() -> u64 {
    DEFAULT_ALLOC_SAMPLE_ITERATIONS
}
