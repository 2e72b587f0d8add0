//! Hysteretic backpressure monitor for the shared queue
//!
//! Tracks an alarm level `n` against a baseline threshold `T`. The alarm
//! escalates when the observed depth exceeds `T·2^n` and de-escalates when
//! the depth falls below `T·2^(n-1)`, which leaves a band between the two
//! bounds where nothing changes. Only escalations are reported; drops are
//! silent, so operators see sustained growth without flapping noise.
//!
//! The monitor never blocks and performs no I/O of its own: a poll reads the
//! queue depth non-destructively and, on escalation, emits one WARNING
//! through the same pipeline it observes.

use super::emitter::EmitterHandle;
use super::error::{FunnelError, Result};
use super::log_level::LogLevel;
use super::queue::SharedQueue;
use super::record::ArgValue;

/// Default baseline threshold for queue-depth alarms
pub const DEFAULT_BACKPRESSURE_THRESHOLD: usize = 100;

const MONITOR_ORIGIN: &str = "funnel.backpressure";

#[derive(Debug)]
pub struct BackpressureMonitor {
    queue: SharedQueue,
    queue_name: String,
    threshold: usize,
    level: u32,
    last_size: usize,
}

impl BackpressureMonitor {
    /// Create a monitor over `queue`, alarming relative to `threshold`
    ///
    /// # Errors
    ///
    /// Returns [`FunnelError::InvalidConfiguration`] when `threshold` is 0,
    /// which would make the alarm fire on any non-empty queue and never
    /// leave a hysteresis band.
    pub fn new(queue: SharedQueue, queue_name: impl Into<String>, threshold: usize) -> Result<Self> {
        if threshold == 0 {
            return Err(FunnelError::config(
                "BackpressureMonitor",
                "threshold must be positive",
            ));
        }
        Ok(Self {
            queue,
            queue_name: queue_name.into(),
            threshold,
            level: 0,
            last_size: 0,
        })
    }

    /// Monitor with the default threshold of 100
    pub fn with_default_threshold(queue: SharedQueue, queue_name: impl Into<String>) -> Self {
        Self::new(queue, queue_name, DEFAULT_BACKPRESSURE_THRESHOLD)
            .unwrap_or_else(|_| unreachable!("default threshold is positive"))
    }

    /// Current alarm level; 0 means the pipeline is keeping up
    #[must_use]
    pub fn alarm_level(&self) -> u32 {
        self.level
    }

    /// Queue depth at the last observation
    #[must_use]
    pub fn last_size(&self) -> usize {
        self.last_size
    }

    /// `threshold · 2^exp`, saturating instead of wrapping on huge levels
    fn scaled_threshold(&self, exp: u32) -> usize {
        let factor = 1usize.checked_shl(exp).unwrap_or(usize::MAX);
        self.threshold.saturating_mul(factor)
    }

    /// Pure state transition on one observed depth
    ///
    /// Returns `true` when the alarm escalated (the caller reports it);
    /// de-escalation returns `false` and stays silent.
    pub fn observe(&mut self, size: usize) -> bool {
        self.last_size = size;
        if size > self.scaled_threshold(self.level) {
            self.level += 1;
            true
        } else {
            if self.level > 0 && size < self.scaled_threshold(self.level - 1) {
                self.level -= 1;
            }
            false
        }
    }

    /// Read the queue depth and update the alarm, warning on escalation
    ///
    /// Intended to be invoked from a periodic health-check caller at
    /// arbitrary intervals. The warning itself goes through `emitter`, back
    /// into the monitored queue, which costs one slot and keeps the alert
    /// in the same aggregated log as everything else.
    pub fn poll(&mut self, emitter: &EmitterHandle) {
        let size = self.queue.len();
        if self.observe(size) {
            emitter.emit(
                LogLevel::Warning,
                MONITOR_ORIGIN,
                "unprocessed {} size: {}",
                vec![
                    ArgValue::from(self.queue_name.as_str()),
                    ArgValue::from(size),
                ],
            );
        }
    }
}
