//! Benchmark driver.
//!
//! Two iteration shapes:
//!
//! - **Single request**: one request-target dispatched repeatedly. The query
//!   is reset before every dispatch, so handlers that read it see the same
//!   input each time.
//! - **Full table**: every route of a table dispatched once, in order, with
//!   one reusable request retargeted between routes.
//!
//! Routers are built by the caller before a benchmark is registered, so
//! construction never lands inside the timed closure. After timing, the
//! same iteration is replayed under the tracking allocator for a per-op
//! allocation report.

use std::fmt;

use criterion::measurement::Measurement;
use criterion::BenchmarkGroup;
use routebench_config::DriverConfig;
use routebench_core::{
    DispatchOutcome, DispatchableHandler, MockTransport, ResponseSink, RouteTable,
    SyntheticRequest,
};

use crate::alloc::{self, AllocSnapshot};
use crate::selection::BenchSelection;

/// One single-request iteration: reset the query, then dispatch.
pub fn dispatch_request(
    router: &dyn DispatchableHandler,
    request: &mut SyntheticRequest,
    query: &str,
    sink: &mut dyn ResponseSink,
) -> DispatchOutcome {
    request.reset_query(query);
    router.serve(request, sink)
}

/// One full-table iteration. Returns how many routes matched.
///
/// The router is called exactly `table.len()` times, in table order.
pub fn dispatch_table(
    router: &dyn DispatchableHandler,
    table: &RouteTable,
    request: &mut SyntheticRequest,
    sink: &mut dyn ResponseSink,
) -> usize {
    let mut matched = 0;
    for route in table {
        request.retarget_route(route);
        if router.serve(request, sink).is_matched() {
            matched += 1;
        }
    }
    matched
}

/// Allocation counts for one benchmark iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AllocationReport {
    /// Counts averaged over `iterations` runs.
    Measured {
        /// Iterations counted.
        iterations: u64,
        /// Allocation calls per iteration.
        allocs_per_op: f64,
        /// Bytes requested per iteration.
        bytes_per_op: f64,
    },
    /// The tracking allocator is not installed, so nothing was counted.
    Unavailable,
}

impl AllocationReport {
    fn from_delta(iterations: u64, delta: AllocSnapshot) -> Self {
        let n = iterations as f64;
        Self::Measured {
            iterations,
            allocs_per_op: delta.allocations as f64 / n,
            bytes_per_op: delta.allocated_bytes as f64 / n,
        }
    }
}

impl fmt::Display for AllocationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Measured {
                allocs_per_op,
                bytes_per_op,
                ..
            } => write!(f, "{allocs_per_op:.2} allocs/op {bytes_per_op:.0} B/op"),
            Self::Unavailable => f.write_str("allocs/op unavailable"),
        }
    }
}

/// Runs `iteration` after one warm-up call and counts the allocations of
/// `iterations` further calls.
///
/// Returns `None` when `iterations` is zero.
pub fn measure_allocations(
    iterations: u64,
    mut iteration: impl FnMut(),
) -> Option<AllocationReport> {
    if iterations == 0 {
        return None;
    }
    if !alloc::is_active() {
        return Some(AllocationReport::Unavailable);
    }

    iteration();
    let before = alloc::snapshot();
    for _ in 0..iterations {
        iteration();
    }
    let delta = alloc::snapshot().since(&before);

    Some(AllocationReport::from_delta(iterations, delta))
}

/// Registers benchmarks on criterion groups.
///
/// Benchmark ids are `{case}/{adapter}`. Ids outside the selection are
/// skipped before anything is registered.
#[derive(Debug, Clone, Copy)]
pub struct Driver<'h> {
    selection: &'h BenchSelection,
    alloc_sample_iterations: u64,
}

impl<'h> Driver<'h> {
    /// Creates a driver.
    pub fn new(selection: &'h BenchSelection, config: &DriverConfig) -> Self {
        Self {
            selection,
            alloc_sample_iterations: config.alloc_sample_iterations,
        }
    }

    /// Whether `{case}/{adapter}` is selected.
    pub fn is_selected(&self, case: &str, adapter: &str) -> bool {
        self.selection.matches(&format!("{case}/{adapter}"))
    }

    /// Benchmarks one request-target against a built router.
    ///
    /// Returns whether the benchmark was registered.
    pub fn bench_request<M: Measurement>(
        &self,
        group: &mut BenchmarkGroup<'_, M>,
        case: &str,
        adapter: &str,
        router: &dyn DispatchableHandler,
        mut request: SyntheticRequest,
    ) -> bool {
        let id = format!("{case}/{adapter}");
        if !self.selection.matches(&id) {
            return false;
        }

        let query = request.query().to_string();
        let mut sink = MockTransport::new();

        if !dispatch_request(router, &mut request, &query, &mut sink).is_matched() {
            tracing::warn!(benchmark = %id, uri = request.request_uri(), "request does not match");
        }

        group.bench_function(adapter, |b| {
            b.iter(|| dispatch_request(router, &mut request, &query, &mut sink));
        });

        self.report_allocations(&id, || {
            dispatch_request(router, &mut request, &query, &mut sink);
        });
        true
    }

    /// Benchmarks replaying every route of `table` against a built router.
    ///
    /// Returns whether the benchmark was registered.
    pub fn bench_routes<M: Measurement>(
        &self,
        group: &mut BenchmarkGroup<'_, M>,
        case: &str,
        adapter: &str,
        router: &dyn DispatchableHandler,
        table: &RouteTable,
    ) -> bool {
        let id = format!("{case}/{adapter}");
        if !self.selection.matches(&id) {
            return false;
        }

        let mut request = SyntheticRequest::get("/");
        let mut sink = MockTransport::new();

        let matched = dispatch_table(router, table, &mut request, &mut sink);
        if matched != table.len() {
            tracing::warn!(
                benchmark = %id,
                matched,
                routes = table.len(),
                "not every route matched"
            );
        }

        group.bench_function(adapter, |b| {
            b.iter(|| dispatch_table(router, table, &mut request, &mut sink));
        });

        self.report_allocations(&id, || {
            dispatch_table(router, table, &mut request, &mut sink);
        });
        true
    }

    fn report_allocations(&self, id: &str, iteration: impl FnMut()) {
        let Some(report) = measure_allocations(self.alloc_sample_iterations, iteration) else {
            return;
        };
        match report {
            AllocationReport::Measured {
                iterations,
                allocs_per_op,
                bytes_per_op,
            } => tracing::info!(
                benchmark = id,
                iterations,
                allocs_per_op,
                bytes_per_op,
                "allocation report"
            ),
            AllocationReport::Unavailable => {
                tracing::debug!(benchmark = id, "tracking allocator not installed");
            }
        }
        eprintln!("   {id}: {report}");
    }
}
