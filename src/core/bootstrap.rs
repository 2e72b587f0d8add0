//! Per-worker bootstrap
//!
//! One-time wiring that runs at worker entry: installs the emitter binding
//! into a process-wide slot and hands the worker its stop flag. The call is
//! idempotent; repeated calls return the binding installed first, so a
//! double bootstrap cannot duplicate emitted records.
//!
//! Interrupt handling is deliberately NOT installed here. Shutdown decisions
//! belong to the explicit [`ShutdownFlag`](super::shutdown::ShutdownFlag):
//! worker main loops poll it at safe points instead of reacting to process
//! signals, so an interactive interrupt cannot tear a worker down while it
//! holds shared resources.

use super::emitter::EmitterHandle;
use super::log_level::LogLevel;
use super::queue::SharedQueue;
use super::shutdown::ShutdownFlag;
use std::sync::OnceLock;

/// Configuration for a worker's one-time setup
///
/// An explicit record with documented defaults rather than loose arguments.
#[derive(Clone)]
pub struct WorkerConfig {
    /// Handle to the shared queue, created at process-group startup
    pub queue: SharedQueue,
    /// Stop signal from the shutdown coordinator
    pub shutdown: ShutdownFlag,
    /// Minimum severity pushed onto the queue; defaults to Info
    pub min_level: LogLevel,
}

impl WorkerConfig {
    #[must_use]
    pub fn new(queue: SharedQueue, shutdown: ShutdownFlag) -> Self {
        Self {
            queue,
            shutdown,
            min_level: LogLevel::Info,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }
}

static EMITTER: OnceLock<EmitterHandle> = OnceLock::new();

/// Install the process-wide emitter binding
///
/// The first call wires `config` in and returns the installed handle; every
/// later call ignores its argument and returns the same handle. Use
/// [`EmitterHandle::new`] directly when a scoped, non-global binding is
/// wanted (tests do).
pub fn init_worker(config: &WorkerConfig) -> &'static EmitterHandle {
    EMITTER.get_or_init(|| EmitterHandle::new(config.queue.clone(), config.min_level))
}

/// The installed binding, if any worker bootstrap has run
#[must_use]
pub fn emitter() -> Option<&'static EmitterHandle> {
    EMITTER.get()
}
