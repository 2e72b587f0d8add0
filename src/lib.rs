//! # Logfunnel
//!
//! A single-host log aggregation pipeline: many concurrent workers push log
//! records onto one shared queue, a single listener thread drains it into a
//! rotating file, and a hysteretic backpressure monitor warns operators when
//! the pipeline falls behind.
//!
//! ## Design
//!
//! - **Workers never block and never fail on logging**: pushes are
//!   non-blocking and queue rejection is swallowed, because logging must not
//!   break application logic.
//! - **One writer**: only the listener touches the destination file; a bad
//!   record or a failed write is reported to stderr and the loop continues.
//! - **Cooperative shutdown**: a stop flag tells workers to wind down, then
//!   a sentinel on the queue ends the listener after it drains everything
//!   ahead of it.

pub mod core;
pub mod db;
pub mod macros;
pub mod sink;

pub mod prelude {
    pub use crate::core::{
        ArgValue, BackpressureMonitor, EmitterHandle, FunnelError, ListenerConfig, ListenerLoop,
        ListenerState, LogLevel, LogRecord, LoggerRegistry, Message, PipelineMetrics, QueueItem,
        Result, SharedQueue, ShutdownCoordinator, ShutdownFlag, DEFAULT_BACKPRESSURE_THRESHOLD,
    };
    pub use crate::db::{ConnectParams, Connector};
    pub use crate::sink::{
        LineFormatter, RotatingFileSink, SinkConfig, TimestampFormat, DEFAULT_BACKUP_COUNT,
        DEFAULT_MAX_BYTES,
    };
}

pub use core::{
    ArgValue, BackpressureMonitor, EmitterHandle, FunnelError, ListenerConfig, ListenerLoop,
    ListenerState, LogLevel, LogRecord, LoggerRegistry, Message, PipelineMetrics, QueueItem,
    Result, SharedQueue, ShutdownCoordinator, ShutdownFlag, DEFAULT_BACKPRESSURE_THRESHOLD,
};
pub use db::{ConnectParams, Connector};
pub use sink::{
    LineFormatter, RotatingFileSink, SinkConfig, TimestampFormat, DEFAULT_BACKUP_COUNT,
    DEFAULT_MAX_BYTES,
};

pub use core::bootstrap::{emitter, init_worker, WorkerConfig};
