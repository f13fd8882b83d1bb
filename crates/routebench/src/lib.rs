//! Comparative benchmarks for Rust HTTP routers.
//!
//! routebench loads the same route tables into several router crates and
//! measures them side by side with criterion: single-request latency,
//! full-table replay, allocations per dispatch, and the heap footprint of a
//! built router.
//!
//! The benchmarks live in `benches/routers.rs`:
//!
//! ```text
//! cargo bench -p routebench --bench routers -- github
//! ```
//!
//! The filter after `--` selects benchmarks and memory probes alike. Set
//! `ROUTEBENCH__HARNESS__HANDLER=echo_param` (or `handler = "echo_param"` in
//! `routebench.toml`) to measure routers whose handlers write a path
//! parameter.
//!
//! # Crate Layout
//!
//! - [`alloc`] - counting global allocator and heap samplers
//! - [`driver`] - iteration shapes and criterion registration
//! - [`probe`] - heap delta around router construction
//! - [`selection`] - the benchmark filter
//! - [`harness`] - one-time initialization tying it together

pub mod alloc;
pub mod driver;
pub mod error;
pub mod harness;
pub mod probe;
pub mod selection;

pub use alloc::{AllocSnapshot, DefaultSampler, HeapSampler, TrackingAllocator, TrackingSampler};
pub use driver::{dispatch_request, dispatch_table, measure_allocations, AllocationReport, Driver};
pub use error::{BenchError, BenchResult};
pub use harness::{fatal, table_case, Harness};
pub use probe::{MemoryProbe, ProbeReading};
pub use selection::BenchSelection;

#[cfg(feature = "jemalloc")]
pub use alloc::JemallocSampler;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
