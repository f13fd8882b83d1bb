//! Structured logging for routebench.
//!
//! Router construction, memory probes, allocation reports and selection
//! warnings are emitted as `tracing` events. This crate installs the
//! subscriber that renders them.
//!
//! The subscriber is process-global and installed once, before any router is
//! built, so that routers which log through `tracing` themselves are filtered
//! by the same directives.
//!
//! # Example
//!
//! ```rust,ignore
//! use routebench_telemetry::{init_logging, LogConfig, LogFormat};
//!
//! init_logging(&LogConfig {
//!     level: "routebench=debug,warn".to_string(),
//!     format: LogFormat::Json,
//!     ..Default::default()
//! })?;
//! ```

pub mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, init_logging, LogConfig, LogFormat};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
