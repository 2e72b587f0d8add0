//! Emission macros
//!
//! These capture the template literally and each argument as a typed
//! [`ArgValue`](crate::ArgValue), so formatting stays deferred until the
//! listener renders the record.
//!
//! # Examples
//!
//! ```
//! use logfunnel::prelude::*;
//! use logfunnel::info;
//!
//! let queue = SharedQueue::new();
//! let emitter = EmitterHandle::new(queue, LogLevel::Debug);
//!
//! info!(emitter, "worker.db", "connected");
//!
//! let rows = 128;
//! info!(emitter, "worker.db", "inserted {} rows", rows);
//! ```

/// Emit a record at an explicit level.
///
/// # Examples
///
/// ```
/// # use logfunnel::prelude::*;
/// # let emitter = EmitterHandle::new(SharedQueue::new(), LogLevel::Debug);
/// use logfunnel::log;
/// log!(emitter, LogLevel::Info, "worker", "plain message");
/// log!(emitter, LogLevel::Error, "worker", "exit code {}", 3);
/// ```
#[macro_export]
macro_rules! log {
    ($emitter:expr, $level:expr, $origin:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $emitter.emit(
            $level,
            $origin,
            $template,
            vec![$($crate::ArgValue::from($arg)),*],
        )
    };
}

/// Emit a debug-level record.
#[macro_export]
macro_rules! debug {
    ($emitter:expr, $origin:expr, $($arg:tt)+) => {
        $crate::log!($emitter, $crate::LogLevel::Debug, $origin, $($arg)+)
    };
}

/// Emit an info-level record.
#[macro_export]
macro_rules! info {
    ($emitter:expr, $origin:expr, $($arg:tt)+) => {
        $crate::log!($emitter, $crate::LogLevel::Info, $origin, $($arg)+)
    };
}

/// Emit a warning-level record.
#[macro_export]
macro_rules! warning {
    ($emitter:expr, $origin:expr, $($arg:tt)+) => {
        $crate::log!($emitter, $crate::LogLevel::Warning, $origin, $($arg)+)
    };
}

/// Emit an error-level record.
#[macro_export]
macro_rules! error {
    ($emitter:expr, $origin:expr, $($arg:tt)+) => {
        $crate::log!($emitter, $crate::LogLevel::Error, $origin, $($arg)+)
    };
}

/// Emit a critical-level record.
#[macro_export]
macro_rules! critical {
    ($emitter:expr, $origin:expr, $($arg:tt)+) => {
        $crate::log!($emitter, $crate::LogLevel::Critical, $origin, $($arg)+)
    };
}
