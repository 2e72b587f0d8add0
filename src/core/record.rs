//! Log record structure
//!
//! A record carries its message as a template plus captured argument values
//! rather than pre-rendered text. Rendering happens on the listener side, so
//! a bad template/argument pairing fails there, inside the per-record error
//! path, and never in the emitting worker.

use super::error::{FunnelError, Result};
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Write as _;

/// Captured value for a deferred message argument
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::String(s) => write!(f, "{}", s),
            ArgValue::Int(i) => write!(f, "{}", i),
            ArgValue::Uint(u) => write!(f, "{}", u),
            ArgValue::Float(fl) => write!(f, "{}", fl),
            ArgValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        ArgValue::String(s)
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        ArgValue::String(s.to_string())
    }
}

impl From<i64> for ArgValue {
    fn from(i: i64) -> Self {
        ArgValue::Int(i)
    }
}

impl From<i32> for ArgValue {
    fn from(i: i32) -> Self {
        ArgValue::Int(i64::from(i))
    }
}

impl From<u64> for ArgValue {
    fn from(u: u64) -> Self {
        ArgValue::Uint(u)
    }
}

impl From<u32> for ArgValue {
    fn from(u: u32) -> Self {
        ArgValue::Uint(u64::from(u))
    }
}

impl From<usize> for ArgValue {
    fn from(u: usize) -> Self {
        ArgValue::Uint(u as u64)
    }
}

impl From<f64> for ArgValue {
    fn from(f: f64) -> Self {
        ArgValue::Float(f)
    }
}

impl From<bool> for ArgValue {
    fn from(b: bool) -> Self {
        ArgValue::Bool(b)
    }
}

/// Deferred message: a `{}` placeholder template plus captured arguments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    template: String,
    args: Vec<ArgValue>,
}

impl Message {
    pub fn new(template: impl Into<String>, args: Vec<ArgValue>) -> Self {
        Self {
            template: template.into(),
            args,
        }
    }

    /// Message with no arguments; renders to the template verbatim
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            template: text.into(),
            args: Vec::new(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn args(&self) -> &[ArgValue] {
        &self.args
    }

    /// Substitute arguments into `{}` placeholders
    ///
    /// # Errors
    ///
    /// Returns [`FunnelError::RenderError`] when the placeholder count does
    /// not match the argument count.
    pub fn render(&self) -> Result<String> {
        let mut out = String::with_capacity(self.template.len() + 16 * self.args.len());
        let mut args = self.args.iter();
        let mut rest = self.template.as_str();
        let mut consumed = 0usize;

        while let Some(idx) = rest.find("{}") {
            out.push_str(&rest[..idx]);
            let arg = args.next().ok_or_else(|| {
                FunnelError::render(
                    &self.template,
                    format!(
                        "template expects more than {} argument(s)",
                        self.args.len()
                    ),
                )
            })?;
            consumed += 1;
            // Display on ArgValue cannot fail; write! to String is infallible
            let _ = write!(out, "{}", arg);
            rest = &rest[idx + 2..];
        }

        if args.next().is_some() {
            return Err(FunnelError::render(
                &self.template,
                format!(
                    "template has {} placeholder(s) but {} argument(s) were captured",
                    consumed,
                    self.args.len()
                ),
            ));
        }

        out.push_str(rest);
        Ok(out)
    }
}

/// An immutable emitted-event value, consumed exactly once by the listener
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    /// Hierarchical dotted origin name, e.g. `worker.depth`
    pub origin: String,
    pub level: LogLevel,
    pub message: Message,
    pub timestamp: DateTime<Utc>,
    /// Originating process identifier
    pub pid: u32,
}

impl LogRecord {
    pub fn new(origin: impl Into<String>, level: LogLevel, message: Message) -> Self {
        Self {
            origin: origin.into(),
            level,
            message,
            timestamp: Utc::now(),
            pid: std::process::id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain() {
        let msg = Message::plain("worker started");
        assert_eq!(msg.render().unwrap(), "worker started");
    }

    #[test]
    fn test_render_with_args() {
        let msg = Message::new(
            "connected to {} as {}",
            vec![ArgValue::from("trading"), ArgValue::from("obanalytics")],
        );
        assert_eq!(msg.render().unwrap(), "connected to trading as obanalytics");
    }

    #[test]
    fn test_render_numeric_args() {
        let msg = Message::new(
            "processed {} rows in {} ms",
            vec![ArgValue::from(1024u64), ArgValue::from(37i64)],
        );
        assert_eq!(msg.render().unwrap(), "processed 1024 rows in 37 ms");
    }

    #[test]
    fn test_render_too_few_args() {
        let msg = Message::new("a {} b {}", vec![ArgValue::from(1i64)]);
        let err = msg.render().unwrap_err();
        assert!(matches!(err, FunnelError::RenderError { .. }));
    }

    #[test]
    fn test_render_too_many_args() {
        let msg = Message::new("a {}", vec![ArgValue::from(1i64), ArgValue::from(2i64)]);
        let err = msg.render().unwrap_err();
        assert!(matches!(err, FunnelError::RenderError { .. }));
    }

    #[test]
    fn test_record_carries_pid_and_origin() {
        let record = LogRecord::new("worker.db", LogLevel::Info, Message::plain("hi"));
        assert_eq!(record.pid, std::process::id());
        assert_eq!(record.origin, "worker.db");
    }
}
