//! Fixed line layout for the aggregated log file
//!
//! `<timestamp> <pid> <origin> <severity> <message>`, with the pid
//! left-justified in 6 columns and the severity in 8, so columns line up
//! across records from different workers.

use crate::core::error::Result;
use crate::core::record::LogRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp format options for the line layout
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// `2019-06-01 12:30:45,123`, the default aggregation-file format
    #[default]
    Standard,

    /// RFC 3339: `2019-06-01T12:30:45+00:00`
    Rfc3339,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Standard => {
                datetime.format("%Y-%m-%d %H:%M:%S,%3f").to_string()
            }
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }
}

/// Renders records into single sanitized lines
#[derive(Debug, Clone, Default)]
pub struct LineFormatter {
    timestamp_format: TimestampFormat,
}

impl LineFormatter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Replace line breaks and tabs so one record is always one line
    ///
    /// Keeps a hostile or sloppy message from injecting fake records into
    /// the aggregated file.
    fn sanitize(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    /// Render one record into its line (no trailing newline)
    ///
    /// # Errors
    ///
    /// Propagates [`FunnelError::RenderError`](crate::core::FunnelError) from
    /// a template/argument mismatch.
    pub fn format(&self, record: &LogRecord) -> Result<String> {
        let message = record.message.render()?;
        Ok(format!(
            "{} {:<6} {} {:<8} {}",
            self.timestamp_format.format(&record.timestamp),
            record.pid,
            record.origin,
            record.level.to_str(),
            Self::sanitize(&message)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_level::LogLevel;
    use crate::core::record::{ArgValue, Message};
    use chrono::TimeZone;

    fn record_at_epoch(level: LogLevel, origin: &str, message: Message) -> LogRecord {
        let mut record = LogRecord::new(origin, level, message);
        record.timestamp = Utc.with_ymd_and_hms(2019, 6, 1, 12, 30, 45).unwrap();
        record.pid = 4242;
        record
    }

    #[test]
    fn test_standard_layout() {
        let record = record_at_epoch(
            LogLevel::Info,
            "worker.depth",
            Message::plain("batch done"),
        );
        let line = LineFormatter::new().format(&record).unwrap();
        assert_eq!(
            line,
            "2019-06-01 12:30:45,000 4242   worker.depth INFO     batch done"
        );
    }

    #[test]
    fn test_severity_field_width() {
        let record = record_at_epoch(LogLevel::Critical, "w", Message::plain("x"));
        let line = LineFormatter::new().format(&record).unwrap();
        // CRITICAL fills the 8-column field exactly
        assert!(line.contains(" w CRITICAL x"));

        let record = record_at_epoch(LogLevel::Error, "w", Message::plain("x"));
        let line = LineFormatter::new().format(&record).unwrap();
        assert!(line.contains(" w ERROR    x"));
    }

    #[test]
    fn test_render_failure_propagates() {
        let record = record_at_epoch(
            LogLevel::Info,
            "w",
            Message::new("{} {}", vec![ArgValue::from(1i64)]),
        );
        assert!(LineFormatter::new().format(&record).is_err());
    }

    #[test]
    fn test_sanitize_keeps_single_line() {
        let record = record_at_epoch(
            LogLevel::Info,
            "w",
            Message::plain("a\nERROR fake\tline\r"),
        );
        let line = LineFormatter::new().format(&record).unwrap();
        assert!(!line.contains('\n'));
        assert!(!line.contains('\t'));
        assert!(line.contains("a\\nERROR fake\\tline\\r"));
    }

    #[test]
    fn test_rfc3339_timestamp() {
        let record = record_at_epoch(LogLevel::Info, "w", Message::plain("x"));
        let line = LineFormatter::new()
            .with_timestamp_format(TimestampFormat::Rfc3339)
            .format(&record)
            .unwrap();
        assert!(line.starts_with("2019-06-01T12:30:45"));
    }
}
