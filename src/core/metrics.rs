//! Pipeline metrics for observability
//!
//! Counters for both ends of the pipeline: what workers emitted, filtered,
//! or dropped, and what the listener consumed or failed to handle.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for pipeline observability
///
/// # Example
///
/// ```
/// use logfunnel::PipelineMetrics;
///
/// let metrics = PipelineMetrics::new();
/// metrics.record_emitted();
/// metrics.record_dropped();
/// assert_eq!(metrics.emitted_count(), 1);
/// assert_eq!(metrics.dropped_count(), 1);
/// ```
#[derive(Debug)]
pub struct PipelineMetrics {
    /// Records pushed onto the shared queue
    emitted: AtomicU64,

    /// Records silently dropped because the queue rejected the push
    dropped: AtomicU64,

    /// Records rejected by a severity threshold (producer or registry side)
    filtered: AtomicU64,

    /// Records the listener wrote to the sink
    consumed: AtomicU64,

    /// Per-record failures caught inside the listener loop
    handling_failures: AtomicU64,
}

impl PipelineMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            emitted: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            consumed: AtomicU64::new(0),
            handling_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn emitted_count(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn consumed_count(&self) -> u64 {
        self.consumed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn handling_failure_count(&self) -> u64 {
        self.handling_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_emitted(&self) -> u64 {
        self.emitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_consumed(&self) -> u64 {
        self.consumed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_handling_failure(&self) -> u64 {
        self.handling_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Drop rate as a percentage (0.0 - 100.0) of attempted emissions
    ///
    /// Returns 0.0 if nothing has been emitted yet.
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped_count() as f64;
        let total = self.emitted_count() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.emitted.store(0, Ordering::Relaxed);
        self.dropped.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.consumed.store(0, Ordering::Relaxed);
        self.handling_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for PipelineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for PipelineMetrics {
    /// Create a snapshot of the current counter values
    fn clone(&self) -> Self {
        Self {
            emitted: AtomicU64::new(self.emitted_count()),
            dropped: AtomicU64::new(self.dropped_count()),
            filtered: AtomicU64::new(self.filtered_count()),
            consumed: AtomicU64::new(self.consumed_count()),
            handling_failures: AtomicU64::new(self.handling_failure_count()),
        }
    }
}
