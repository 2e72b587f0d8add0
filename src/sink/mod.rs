//! Destination sink: formatting and the rotating file writer

pub mod format;
pub mod rotating;

pub use format::{LineFormatter, TimestampFormat};
pub use rotating::{RotatingFileSink, SinkConfig, DEFAULT_BACKUP_COUNT, DEFAULT_MAX_BYTES};
