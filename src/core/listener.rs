//! The single consumer that owns destination I/O
//!
//! Exactly one listener drains the shared queue. It installs the rotating
//! sink, then blocks on the queue for the lifetime of the process group;
//! the shutdown sentinel is the only way out of the loop. Every record is
//! routed through the listener-owned registry, rendered, and appended; a
//! failure anywhere in that path is caught per record, reported to stderr
//! with the full error chain, and the loop keeps going.

use super::error::{FunnelError, Result};
use super::log_level::LogLevel;
use super::metrics::PipelineMetrics;
use super::queue::{QueueItem, SharedQueue};
use super::record::LogRecord;
use super::registry::LoggerRegistry;
use crate::sink::format::{LineFormatter, TimestampFormat};
use crate::sink::rotating::{RotatingFileSink, SinkConfig};
use std::sync::Arc;
use std::thread;

/// Listener lifecycle; the sentinel transition is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    Starting,
    Running,
    Stopped,
}

/// Listener configuration, consumed once at startup
#[derive(Clone)]
pub struct ListenerConfig {
    /// Destination file and rotation limits
    pub sink: SinkConfig,
    /// Registry default for origins without an explicit level; Debug by
    /// default so worker-side thresholds decide what reaches the file
    pub root_level: LogLevel,
    /// Explicit per-origin minimum severities
    pub origin_levels: Vec<(String, LogLevel)>,
    /// Timestamp layout for the output line
    pub timestamp_format: TimestampFormat,
}

impl ListenerConfig {
    #[must_use]
    pub fn new(sink: SinkConfig) -> Self {
        Self {
            sink,
            root_level: LogLevel::Debug,
            origin_levels: Vec::new(),
            timestamp_format: TimestampFormat::default(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_root_level(mut self, level: LogLevel) -> Self {
        self.root_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_origin_level(mut self, origin: impl Into<String>, level: LogLevel) -> Self {
        self.origin_levels.push((origin.into(), level));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }
}

pub struct ListenerLoop {
    queue: SharedQueue,
    config: ListenerConfig,
    registry: LoggerRegistry,
    formatter: LineFormatter,
    metrics: Arc<PipelineMetrics>,
    state: ListenerState,
}

impl ListenerLoop {
    /// Build a listener over `queue`
    ///
    /// # Errors
    ///
    /// Rejects an invalid sink configuration up front; the sink itself is
    /// not opened until [`run`](Self::run).
    pub fn new(queue: SharedQueue, config: ListenerConfig) -> Result<Self> {
        config.sink.validate()?;

        let mut registry = LoggerRegistry::new(config.root_level);
        for (origin, level) in &config.origin_levels {
            registry.set_level(origin.clone(), *level);
        }
        let formatter = LineFormatter::new().with_timestamp_format(config.timestamp_format.clone());

        Ok(Self {
            queue,
            config,
            registry,
            formatter,
            metrics: Arc::new(PipelineMetrics::new()),
            state: ListenerState::Starting,
        })
    }

    #[must_use]
    pub fn state(&self) -> ListenerState {
        self.state
    }

    /// Consumer-side counters, shareable before the loop starts
    #[must_use]
    pub fn metrics(&self) -> Arc<PipelineMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Drain the queue until the sentinel arrives
    ///
    /// Blocks the calling thread for the lifetime of the process group.
    /// Returns only after observing the sentinel; external shutdown must
    /// enqueue it rather than kill the thread, or queued records are lost.
    ///
    /// # Errors
    ///
    /// Fails if the sink cannot be installed or the listener already ran.
    /// Per-record failures are reported to stderr and do not end the loop.
    pub fn run(&mut self) -> Result<()> {
        if self.state != ListenerState::Starting {
            return Err(FunnelError::other("listener loop already started"));
        }

        let mut sink = RotatingFileSink::open(self.config.sink.clone())?;
        self.state = ListenerState::Running;

        loop {
            match self.queue.pop() {
                QueueItem::Shutdown => break,
                QueueItem::Record(record) => {
                    if let Err(e) = self.handle(&mut sink, &record) {
                        self.metrics.record_handling_failure();
                        Self::report_failure(&record, &e);
                    }
                }
            }
        }

        if let Err(e) = sink.flush() {
            eprintln!("[LISTENER ERROR] final flush failed: {}", e);
        }
        self.state = ListenerState::Stopped;
        Ok(())
    }

    /// Route one record: registry filter, render, append
    fn handle(&mut self, sink: &mut RotatingFileSink, record: &LogRecord) -> Result<()> {
        if !self.registry.accepts(&record.origin, record.level) {
            self.metrics.record_filtered();
            return Ok(());
        }

        let line = self.formatter.format(record)?;
        sink.append_line(&line)?;
        // Flush per record so a crash of the host process cannot strand
        // accepted records in the writer's buffer.
        sink.flush()?;
        self.metrics.record_consumed();
        Ok(())
    }

    /// Report a per-record failure with its full cause chain
    fn report_failure(record: &LogRecord, err: &FunnelError) {
        eprintln!(
            "[LISTENER ERROR] failed to handle record from '{}': {}",
            record.origin, err
        );
        let mut source = std::error::Error::source(err);
        while let Some(cause) = source {
            eprintln!("[LISTENER ERROR]   caused by: {}", cause);
            source = cause.source();
        }
    }

    /// Run the loop on a dedicated named thread
    ///
    /// # Errors
    ///
    /// Fails if the OS refuses to spawn the thread.
    pub fn spawn(mut self) -> Result<thread::JoinHandle<Result<()>>> {
        thread::Builder::new()
            .name("logfunnel-listener".to_string())
            .spawn(move || self.run())
            .map_err(FunnelError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::emitter::EmitterHandle;
    use tempfile::tempdir;

    fn test_config(dir: &tempfile::TempDir) -> ListenerConfig {
        ListenerConfig::new(SinkConfig::new(dir.path().join("test.log")))
    }

    #[test]
    fn test_new_listener_is_starting() {
        let dir = tempdir().unwrap();
        let listener = ListenerLoop::new(SharedQueue::new(), test_config(&dir)).unwrap();
        assert_eq!(listener.state(), ListenerState::Starting);
    }

    #[test]
    fn test_invalid_sink_config_rejected() {
        let dir = tempdir().unwrap();
        let config = ListenerConfig::new(
            SinkConfig::new(dir.path().join("test.log")).with_max_bytes(0),
        );
        assert!(ListenerLoop::new(SharedQueue::new(), config).is_err());
    }

    #[test]
    fn test_sentinel_stops_loop() {
        let dir = tempdir().unwrap();
        let queue = SharedQueue::new();
        let mut listener = ListenerLoop::new(queue.clone(), test_config(&dir)).unwrap();

        let emitter = EmitterHandle::new(queue.clone(), LogLevel::Debug);
        emitter.info("test", "only record");
        queue.push_shutdown().unwrap();

        listener.run().unwrap();
        assert_eq!(listener.state(), ListenerState::Stopped);
        assert_eq!(listener.metrics.consumed_count(), 1);
    }

    #[test]
    fn test_listener_not_restartable() {
        let dir = tempdir().unwrap();
        let queue = SharedQueue::new();
        let mut listener = ListenerLoop::new(queue.clone(), test_config(&dir)).unwrap();
        queue.push_shutdown().unwrap();
        listener.run().unwrap();

        assert!(listener.run().is_err());
    }

    #[test]
    fn test_config_builder() {
        let dir = tempdir().unwrap();
        let config = test_config(&dir)
            .with_root_level(LogLevel::Warning)
            .with_origin_level("worker.db", LogLevel::Debug);
        assert_eq!(config.root_level, LogLevel::Warning);
        assert_eq!(config.origin_levels.len(), 1);
    }
}
