//! Core pipeline types: records, the shared queue, producer and consumer

pub mod bootstrap;
pub mod emitter;
pub mod error;
pub mod listener;
pub mod log_level;
pub mod metrics;
pub mod monitor;
pub mod queue;
pub mod record;
pub mod registry;
pub mod shutdown;

pub use emitter::EmitterHandle;
pub use error::{FunnelError, Result};
pub use listener::{ListenerConfig, ListenerLoop, ListenerState};
pub use log_level::LogLevel;
pub use metrics::PipelineMetrics;
pub use monitor::{BackpressureMonitor, DEFAULT_BACKPRESSURE_THRESHOLD};
pub use queue::{QueueItem, SharedQueue};
pub use record::{ArgValue, LogRecord, Message};
pub use registry::LoggerRegistry;
pub use shutdown::{ShutdownCoordinator, ShutdownFlag};
