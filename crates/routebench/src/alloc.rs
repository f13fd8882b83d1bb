//! Allocation accounting and heap sampling.
//!
//! [`TrackingAllocator`] wraps another global allocator and counts every
//! allocation in process-wide atomics. Install it in the benchmark binary:
//!
//! ```rust,ignore
//! #[global_allocator]
//! static ALLOCATOR: TrackingAllocator = TrackingAllocator::system();
//! ```
//!
//! The counters drive two readings: per-iteration allocation reports in the
//! driver, and the live-byte figure the memory probe samples through
//! [`TrackingSampler`]. With the `jemalloc` feature, [`JemallocSampler`] reads
//! jemalloc's own `stats.allocated` instead.
//!
//! # Safety
//!
//! The `GlobalAlloc` impl forwards every call to the wrapped allocator
//! unchanged and only updates relaxed atomics and a thread-local counter
//! around it. It never allocates.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};

use routebench_core::{HarnessError, HarnessResult};

static ALLOCATIONS: AtomicU64 = AtomicU64::new(0);
static ALLOCATED_BYTES: AtomicU64 = AtomicU64::new(0);
static LIVE_BYTES: AtomicU64 = AtomicU64::new(0);

thread_local! {
    // Allocations counted on this thread. Const-initialized and drop-free,
    // so touching it from the allocator never allocates.
    static THREAD_ALLOCATIONS: Cell<u64> = const { Cell::new(0) };
}

/// Global allocator wrapper that counts allocations.
#[derive(Debug, Default)]
pub struct TrackingAllocator<A = System> {
    inner: A,
}

impl<A> TrackingAllocator<A> {
    /// Wraps `inner`.
    pub const fn new(inner: A) -> Self {
        Self { inner }
    }
}

impl TrackingAllocator<System> {
    /// Wraps the system allocator.
    pub const fn system() -> Self {
        Self::new(System)
    }
}

#[inline]
fn record_alloc(size: usize) {
    let _ = THREAD_ALLOCATIONS.try_with(|count| count.set(count.get() + 1));
    ALLOCATIONS.fetch_add(1, Ordering::Relaxed);
    ALLOCATED_BYTES.fetch_add(size as u64, Ordering::Relaxed);
    LIVE_BYTES.fetch_add(size as u64, Ordering::Relaxed);
}

#[inline]
fn record_dealloc(size: usize) {
    LIVE_BYTES.fetch_sub(size as u64, Ordering::Relaxed);
}

unsafe impl<A: GlobalAlloc> GlobalAlloc for TrackingAllocator<A> {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        // SAFETY: same contract as the caller's.
        let ptr = unsafe { self.inner.alloc(layout) };
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        // SAFETY: same contract as the caller's.
        let ptr = unsafe { self.inner.alloc_zeroed(layout) };
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        // SAFETY: `ptr` was returned by this allocator, which forwards to `inner`.
        unsafe { self.inner.dealloc(ptr, layout) };
        record_dealloc(layout.size());
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        // SAFETY: `ptr` was returned by this allocator, which forwards to `inner`.
        let new_ptr = unsafe { self.inner.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() {
            record_dealloc(layout.size());
            record_alloc(new_size);
        }
        new_ptr
    }
}

/// Point-in-time copy of the allocation counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocSnapshot {
    /// Allocation calls, reallocations included.
    pub allocations: u64,
    /// Bytes requested across those calls.
    pub allocated_bytes: u64,
    /// Bytes currently allocated and not yet freed.
    pub live_bytes: u64,
}

impl AllocSnapshot {
    /// Counter growth between `earlier` and `self`.
    #[must_use]
    pub fn since(&self, earlier: &Self) -> Self {
        Self {
            allocations: self.allocations.saturating_sub(earlier.allocations),
            allocated_bytes: self.allocated_bytes.saturating_sub(earlier.allocated_bytes),
            live_bytes: self.live_bytes.saturating_sub(earlier.live_bytes),
        }
    }
}

/// Reads the allocation counters.
pub fn snapshot() -> AllocSnapshot {
    AllocSnapshot {
        allocations: ALLOCATIONS.load(Ordering::Relaxed),
        allocated_bytes: ALLOCATED_BYTES.load(Ordering::Relaxed),
        live_bytes: LIVE_BYTES.load(Ordering::Relaxed),
    }
}

/// Whether a [`TrackingAllocator`] is installed as the global allocator.
///
/// Makes one heap allocation through the global allocator and checks that
/// it was counted on this thread. A tracker that is used directly rather
/// than installed does not count.
pub fn is_active() -> bool {
    let before = thread_allocations();
    drop(std::hint::black_box(Box::new(0u64)));
    thread_allocations() != before
}

fn thread_allocations() -> u64 {
    THREAD_ALLOCATIONS.try_with(Cell::get).unwrap_or(0)
}

/// Source of heap-size readings for the memory probe.
pub trait HeapSampler {
    /// One reclamation pass. Makes deferred frees visible to the next reading.
    fn reclaim(&self) -> HarnessResult<()>;

    /// Bytes currently allocated by the process.
    fn heap_bytes(&self) -> HarnessResult<u64>;
}

/// Reads live bytes from the [`TrackingAllocator`] counters.
///
/// Frees are counted as they happen, so reclamation is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackingSampler;

impl HeapSampler for TrackingSampler {
    fn reclaim(&self) -> HarnessResult<()> {
        Ok(())
    }

    fn heap_bytes(&self) -> HarnessResult<u64> {
        if !is_active() {
            return Err(HarnessError::HeapStats(
                "TrackingAllocator is not the global allocator".to_string(),
            ));
        }
        Ok(snapshot().live_bytes)
    }
}

/// Reads `stats.allocated` from jemalloc.
///
/// jemalloc caches its statistics; advancing the epoch refreshes them.
#[cfg(feature = "jemalloc")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JemallocSampler;

#[cfg(feature = "jemalloc")]
impl HeapSampler for JemallocSampler {
    fn reclaim(&self) -> HarnessResult<()> {
        tikv_jemalloc_ctl::epoch::advance()
            .map(|_| ())
            .map_err(|e| HarnessError::HeapStats(e.to_string()))
    }

    fn heap_bytes(&self) -> HarnessResult<u64> {
        tikv_jemalloc_ctl::stats::allocated::read()
            .map(|bytes| bytes as u64)
            .map_err(|e| HarnessError::HeapStats(e.to_string()))
    }
}

/// Sampler used by the benchmark binary.
#[cfg(feature = "jemalloc")]
pub type DefaultSampler = JemallocSampler;

/// Sampler used by the benchmark binary.
#[cfg(not(feature = "jemalloc"))]
pub type DefaultSampler = TrackingSampler;
