//! Harness-level error type.

use routebench_config::ConfigError;
use routebench_core::HarnessError;
use routebench_telemetry::TelemetryError;
use thiserror::Error;

/// Any error that stops a benchmark run before it starts.
#[derive(Debug, Error)]
pub enum BenchError {
    /// Configuration could not be loaded or validated.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The logging subscriber could not be installed.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),

    /// A route table, adapter, selection or heap sampler failed.
    #[error(transparent)]
    Harness(#[from] HarnessError),
}

/// Result type for harness operations.
pub type BenchResult<T> = Result<T, BenchError>;
