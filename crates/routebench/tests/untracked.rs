//! Behavior when the tracking allocator is not the global allocator.

use std::alloc::{GlobalAlloc, Layout};

use routebench::{
    measure_allocations, AllocationReport, BenchSelection, HeapSampler, MemoryProbe,
    TrackingAllocator, TrackingSampler,
};
use routebench_config::ProbeConfig;
use routebench_core::HarnessError;

#[test]
fn test_allocation_report_unavailable() {
    let report = measure_allocations(10, || {
        std::hint::black_box(vec![0u8; 64]);
    });
    assert_eq!(report, Some(AllocationReport::Unavailable));
}

#[test]
fn test_tracking_sampler_errors() {
    assert!(matches!(
        TrackingSampler.heap_bytes(),
        Err(HarnessError::HeapStats(_))
    ));
}

#[test]
fn test_probe_surfaces_sampler_error() {
    let selection = BenchSelection::all();
    let probe = MemoryProbe::new(&selection, &ProbeConfig::default(), TrackingSampler);
    let result = probe.measure("github_all/matchit", || Ok(()));
    assert!(matches!(result, Err(HarnessError::HeapStats(_))));
}

#[test]
fn test_uninstalled_tracker_does_not_activate() {
    let tracker = TrackingAllocator::system();
    let layout = Layout::from_size_align(64, 8).unwrap();
    unsafe {
        let ptr = tracker.alloc(layout);
        assert!(!ptr.is_null());
        tracker.dealloc(ptr, layout);
    }

    assert!(!routebench::alloc::is_active());
    let report = measure_allocations(100, || {
        std::hint::black_box(vec![0u8; 64]);
    });
    assert_eq!(report, Some(AllocationReport::Unavailable));
    assert!(TrackingSampler.heap_bytes().is_err());
}
