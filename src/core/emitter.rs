//! Producer-side binding onto the shared queue
//!
//! The emitter is what a worker's code logs through. It filters by a shared
//! minimum severity, stamps each record with timestamp and process id, and
//! pushes onto the shared queue. The push path performs no destination I/O
//! and never surfaces an error to the caller: if the queue rejects a record
//! the record is dropped and counted, because logging must never break
//! application logic.

use super::log_level::LogLevel;
use super::metrics::PipelineMetrics;
use super::queue::SharedQueue;
use super::record::{ArgValue, LogRecord, Message};
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Clone)]
pub struct EmitterHandle {
    queue: SharedQueue,
    min_level: Arc<RwLock<LogLevel>>,
    metrics: Arc<PipelineMetrics>,
}

impl EmitterHandle {
    #[must_use]
    pub fn new(queue: SharedQueue, min_level: LogLevel) -> Self {
        Self {
            queue,
            min_level: Arc::new(RwLock::new(min_level)),
            metrics: Arc::new(PipelineMetrics::new()),
        }
    }

    /// Emit a deferred-format record
    ///
    /// Records below the minimum severity are discarded before any
    /// allocation of a `LogRecord`. Queue rejection is swallowed.
    pub fn emit(
        &self,
        level: LogLevel,
        origin: impl Into<String>,
        template: impl Into<String>,
        args: Vec<ArgValue>,
    ) {
        if level < *self.min_level.read() {
            self.metrics.record_filtered();
            return;
        }

        let record = LogRecord::new(origin, level, Message::new(template, args));
        self.push(record);
    }

    /// Push an already-built record; same swallow-on-failure contract
    pub fn push(&self, record: LogRecord) {
        match self.queue.push(record) {
            Ok(()) => {
                self.metrics.record_emitted();
            }
            Err(_) => {
                // Queue torn down mid-shutdown; the record is lost but the
                // caller must not see a failure.
                self.metrics.record_dropped();
            }
        }
    }

    #[inline]
    pub fn debug(&self, origin: &str, message: impl Into<String>) {
        self.emit(LogLevel::Debug, origin, message, Vec::new());
    }

    #[inline]
    pub fn info(&self, origin: &str, message: impl Into<String>) {
        self.emit(LogLevel::Info, origin, message, Vec::new());
    }

    #[inline]
    pub fn warning(&self, origin: &str, message: impl Into<String>) {
        self.emit(LogLevel::Warning, origin, message, Vec::new());
    }

    #[inline]
    pub fn error(&self, origin: &str, message: impl Into<String>) {
        self.emit(LogLevel::Error, origin, message, Vec::new());
    }

    #[inline]
    pub fn critical(&self, origin: &str, message: impl Into<String>) {
        self.emit(LogLevel::Critical, origin, message, Vec::new());
    }

    /// Drain collaborator notices, emitting each at Info in arrival order
    ///
    /// Mirrors the pattern of flushing a database driver's notice list into
    /// the log after a batch of statements.
    pub fn drain_notices(&self, origin: &str, notices: &mut Vec<String>) {
        for notice in notices.drain(..) {
            self.emit(LogLevel::Info, origin, notice, Vec::new());
        }
    }

    pub fn set_min_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    #[must_use]
    pub fn min_level(&self) -> LogLevel {
        *self.min_level.read()
    }

    #[must_use]
    pub fn metrics(&self) -> &PipelineMetrics {
        &self.metrics
    }

    #[must_use]
    pub fn queue(&self) -> &SharedQueue {
        &self.queue
    }
}
