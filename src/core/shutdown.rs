//! Shutdown coordination for the process group
//!
//! Shutdown is cooperative and message-based: the orchestrator sets the stop
//! flag, workers observe it at safe points and stop producing, and only then
//! is the sentinel enqueued. The listener drains everything ahead of the
//! sentinel before exiting, so no queued record is lost. Workers never
//! install their own interrupt handlers; an interactive interrupt must not
//! kill a worker mid-operation while it holds shared resources such as an
//! open transaction.

use super::error::Result;
use super::queue::SharedQueue;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Process-wide stop signal, polled by worker main loops
#[derive(Clone, Default)]
pub struct ShutdownFlag {
    stopped: Arc<AtomicBool>,
}

impl ShutdownFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// Pairs the stop flag with the sentinel enqueue
///
/// The intended sequence is `request_stop()` → workers drain their own work
/// and stop emitting → `finalize()`. Calling `finalize()` while producers
/// are still emitting loses none of their records, but records enqueued
/// after the sentinel are never processed.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    flag: ShutdownFlag,
    queue: SharedQueue,
}

impl ShutdownCoordinator {
    #[must_use]
    pub fn new(queue: SharedQueue) -> Self {
        Self {
            flag: ShutdownFlag::new(),
            queue,
        }
    }

    /// The flag handed to each worker at bootstrap
    #[must_use]
    pub fn flag(&self) -> ShutdownFlag {
        self.flag.clone()
    }

    /// Signal workers to stop producing
    pub fn request_stop(&self) {
        self.flag.set();
    }

    #[must_use]
    pub fn is_stop_requested(&self) -> bool {
        self.flag.is_set()
    }

    /// Enqueue the sentinel so the listener exits after draining
    pub fn finalize(&self) -> Result<()> {
        self.queue.push_shutdown()
    }
}
