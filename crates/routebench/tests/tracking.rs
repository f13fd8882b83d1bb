//! Allocation accounting with the tracking allocator installed.

use routebench::{
    dispatch_table, measure_allocations, AllocationReport, BenchSelection, HeapSampler,
    MemoryProbe, TrackingAllocator, TrackingSampler,
};
use routebench_adapters::MatchitAdapter;
use routebench_config::ProbeConfig;
use routebench_core::tables::github_api;
use routebench_core::{HandlerBehavior, MockTransport, RouterAdapter, SyntheticRequest};

#[global_allocator]
static ALLOCATOR: TrackingAllocator = TrackingAllocator::system();

#[test]
fn test_tracking_allocator_is_active() {
    let _warm = vec![0u8; 8];
    assert!(routebench::alloc::is_active());
    assert!(TrackingSampler.heap_bytes().is_ok());
}

#[test]
fn test_allocations_counted_per_op() {
    let report = measure_allocations(100, || {
        std::hint::black_box(vec![0u8; 64]);
    })
    .unwrap();

    match report {
        AllocationReport::Measured {
            iterations,
            allocs_per_op,
            bytes_per_op,
        } => {
            assert_eq!(iterations, 100);
            // Other test threads may allocate concurrently.
            assert!(allocs_per_op >= 1.0);
            assert!(bytes_per_op >= 64.0);
        }
        AllocationReport::Unavailable => panic!("tracking allocator is installed"),
    }
}

#[test]
fn test_probe_reports_router_footprint() {
    let table = github_api().unwrap();
    let adapter = MatchitAdapter::new(HandlerBehavior::Noop);
    let selection = BenchSelection::new("^github_all/").unwrap();
    let probe = MemoryProbe::new(&selection, &ProbeConfig::default(), TrackingSampler);

    let reading = probe
        .measure("github_all/matchit", || adapter.build(&table))
        .unwrap()
        .expect("selected");

    // Concurrent tests can free memory between readings, so only the
    // returned router is checked for usability.
    let mut request = SyntheticRequest::get("/");
    let mut sink = MockTransport::new();
    assert_eq!(
        dispatch_table(reading.value.as_ref(), &table, &mut request, &mut sink),
        table.len()
    );
}

#[test]
fn test_probe_skips_unselected() {
    let selection = BenchSelection::new("^github_all/").unwrap();
    let probe = MemoryProbe::new(&selection, &ProbeConfig::default(), TrackingSampler);
    let result = probe
        .measure("static_all/matchit", || -> routebench_core::HarnessResult<()> {
            panic!("must not build")
        })
        .unwrap();
    assert!(result.is_none());
}
