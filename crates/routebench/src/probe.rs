//! Memory delta probe.
//!
//! Measures heap growth attributable to building one router. The built value
//! is held until after the second reading, so its footprint is what the delta
//! reports.

use routebench_config::ProbeConfig;
use routebench_core::HarnessResult;

use crate::alloc::HeapSampler;
use crate::selection::BenchSelection;

/// A value built under the probe, with the heap bytes it holds.
#[derive(Debug)]
pub struct ProbeReading<T> {
    /// The built value.
    pub value: T,
    /// Heap growth across the build, after settling.
    pub bytes: u64,
}

/// Wraps router construction in before/after heap readings.
#[derive(Debug)]
pub struct MemoryProbe<'a, S> {
    selection: &'a BenchSelection,
    sampler: S,
    enabled: bool,
    settle_passes: u32,
}

impl<'a, S: HeapSampler> MemoryProbe<'a, S> {
    /// Creates a probe gated by `selection`.
    pub fn new(selection: &'a BenchSelection, config: &ProbeConfig, sampler: S) -> Self {
        Self {
            selection,
            sampler,
            enabled: config.enabled,
            settle_passes: config.settle_passes.max(1),
        }
    }

    /// Whether `name` would be measured.
    pub fn is_active(&self, name: &str) -> bool {
        self.enabled && self.selection.matches(name)
    }

    /// Builds a value and reports the heap bytes it holds.
    ///
    /// Returns `Ok(None)` without calling `build` or touching the sampler
    /// when probing is disabled or `name` is not selected. Otherwise prints
    /// `   {name}: {bytes} Bytes` to stderr and hands the built value back.
    pub fn measure<T>(
        &self,
        name: &str,
        build: impl FnOnce() -> HarnessResult<T>,
    ) -> HarnessResult<Option<ProbeReading<T>>> {
        if !self.is_active(name) {
            return Ok(None);
        }

        let before = self.settle()?;
        let value = build()?;
        let after = self.settle()?;

        let bytes = after.saturating_sub(before);
        tracing::info!(probe = name, bytes, "memory probe");
        eprintln!("   {name}: {bytes} Bytes");
        Ok(Some(ProbeReading { value, bytes }))
    }

    // Reclaims until two consecutive readings agree or the pass budget runs
    // out, and returns the last reading.
    fn settle(&self) -> HarnessResult<u64> {
        self.sampler.reclaim()?;
        let mut last = self.sampler.heap_bytes()?;
        for _ in 1..self.settle_passes {
            self.sampler.reclaim()?;
            let bytes = self.sampler.heap_bytes()?;
            if bytes == last {
                break;
            }
            last = bytes;
        }
        Ok(last)
    }
}
