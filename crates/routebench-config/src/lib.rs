//! Typed configuration for the routebench harness.
//!
//! Configuration is layered: defaults, then an optional TOML or JSON file,
//! then `ROUTEBENCH__SECTION__KEY` environment variables. Unknown fields in a
//! file are rejected.
//!
//! - [`HarnessSection`] - handler behavior, selection regex, adapter filter
//! - [`ProbeConfig`] - memory probe switch and settle passes
//! - [`DriverConfig`] - allocation report sizing
//! - [`LoggingConfig`] - subscriber settings
//!
//! # Example
//!
//! ```no_run
//! use routebench_config::ConfigLoader;
//!
//! # fn main() -> Result<(), routebench_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_optional_file("routebench.toml")?
//!     .with_env_prefix("ROUTEBENCH")
//!     .load()?;
//!
//! println!("handler: {}", config.harness.handler);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [harness]
//! handler = "noop"          # noop | echo_uri | echo_param
//! selection = "^github"     # overrides the command-line filter
//! adapters = ["matchit"]    # empty runs every adapter
//!
//! [probe]
//! enabled = true
//! settle_passes = 4
//!
//! [driver]
//! alloc_sample_iterations = 10000
//!
//! [logging]
//! level = "info"
//! format = "compact"
//! ```

mod config;
mod error;
mod loader;
mod schema;

pub use config::HarnessConfig;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{
    DriverConfig, HarnessSection, LoggingConfig, ProbeConfig, DEFAULT_ALLOC_SAMPLE_ITERATIONS,
    DEFAULT_SETTLE_PASSES, MAX_SETTLE_PASSES,
};
