//! Size-bounded, generation-limited destination file writer
//!
//! The active file grows until the next append would push it past
//! `max_bytes`; the sink then closes it, shifts generation suffixes
//! (`app.log.1` → `app.log.2`, …, oldest deleted past `backup_count`),
//! reopens a fresh active file, and completes the append. At most
//! `backup_count + 1` files exist at any time. The sink is exclusively
//! owned by the listener; failures surface to the caller and never
//! propagate past the current record.

use crate::core::error::{FunnelError, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Default rotation threshold: 16 MiB
pub const DEFAULT_MAX_BYTES: u64 = 1 << 24;

/// Default number of retained generations
pub const DEFAULT_BACKUP_COUNT: usize = 20;

/// Destination file location and rotation limits
///
/// Consumed once at listener startup and validated at construction.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Active output file location
    pub path: PathBuf,
    /// Rotation threshold in bytes; defaults to 16 MiB
    pub max_bytes: u64,
    /// Retained generations; defaults to 20. Zero truncates in place.
    pub backup_count: usize,
}

impl SinkConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_bytes: DEFAULT_MAX_BYTES,
            backup_count: DEFAULT_BACKUP_COUNT,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_backup_count(mut self, backup_count: usize) -> Self {
        self.backup_count = backup_count;
        self
    }

    /// Validate once, before the sink is installed
    ///
    /// # Errors
    ///
    /// Rejects a zero `max_bytes` (every append would rotate) and a path
    /// without a file name.
    pub fn validate(&self) -> Result<()> {
        if self.max_bytes == 0 {
            return Err(FunnelError::config("SinkConfig", "max_bytes must be positive"));
        }
        if self.path.file_name().is_none() {
            return Err(FunnelError::config(
                "SinkConfig",
                format!("'{}' has no file name", self.path.display()),
            ));
        }
        Ok(())
    }
}

pub struct RotatingFileSink {
    config: SinkConfig,
    writer: Option<BufWriter<File>>,
    current_size: u64,
}

impl RotatingFileSink {
    /// Open the sink, creating parent directories as needed
    ///
    /// An existing active file is appended to; its current size counts
    /// toward the rotation threshold.
    pub fn open(config: SinkConfig) -> Result<Self> {
        config.validate()?;

        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    FunnelError::io_operation(
                        "creating log directory",
                        format!("cannot create '{}'", parent.display()),
                        e,
                    )
                })?;
            }
        }

        let file = Self::open_append(&config.path)?;
        let current_size = file
            .metadata()
            .map_err(|e| {
                FunnelError::sink_write(
                    config.path.display().to_string(),
                    format!("cannot read file metadata: {}", e),
                )
            })?
            .len();

        Ok(Self {
            config,
            writer: Some(BufWriter::new(file)),
            current_size,
        })
    }

    fn open_append(path: &Path) -> Result<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                FunnelError::sink_write(
                    path.display().to_string(),
                    format!("cannot open: {}", e),
                )
            })
    }

    /// Append one formatted line, rotating first if it would not fit
    ///
    /// A line longer than `max_bytes` on its own still lands in a fresh
    /// file without triggering a second rotation.
    pub fn append_line(&mut self, line: &str) -> Result<()> {
        let upcoming = line.len() as u64 + 1;
        if self.current_size > 0 && self.current_size + upcoming > self.config.max_bytes {
            self.rotate()?;
        }

        let path = self.config.path.display().to_string();
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| FunnelError::sink_write(path.clone(), "writer not open"))?;

        writer
            .write_all(line.as_bytes())
            .and_then(|()| writer.write_all(b"\n"))
            .map_err(|e| {
                FunnelError::sink_write(path, format!("cannot append record: {}", e))
            })?;
        self.current_size += upcoming;
        Ok(())
    }

    /// Close, shift generations, reopen fresh
    fn rotate(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| {
                FunnelError::sink_rotation(
                    self.config.path.display().to_string(),
                    format!("cannot flush before rotation: {}", e),
                )
            })?;
        }

        if self.config.backup_count == 0 {
            // No generations retained: start the active file over.
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&self.config.path)
                .map_err(|e| {
                    FunnelError::sink_rotation(
                        self.config.path.display().to_string(),
                        format!("cannot truncate active file: {}", e),
                    )
                })?;
            self.writer = Some(BufWriter::new(file));
            self.current_size = 0;
            return Ok(());
        }

        let oldest = self.generation_path(self.config.backup_count);
        if oldest.exists() {
            fs::remove_file(&oldest).map_err(|e| {
                FunnelError::sink_rotation(
                    self.config.path.display().to_string(),
                    format!("cannot delete oldest generation '{}': {}", oldest.display(), e),
                )
            })?;
        }

        for i in (1..self.config.backup_count).rev() {
            let from = self.generation_path(i);
            let to = self.generation_path(i + 1);
            if from.exists() {
                fs::rename(&from, &to).map_err(|e| {
                    FunnelError::sink_rotation(
                        self.config.path.display().to_string(),
                        format!("cannot shift '{}': {}", from.display(), e),
                    )
                })?;
            }
        }

        if self.config.path.exists() {
            fs::rename(&self.config.path, self.generation_path(1)).map_err(|e| {
                FunnelError::sink_rotation(
                    self.config.path.display().to_string(),
                    format!("cannot shift active file: {}", e),
                )
            })?;
        }

        let file = Self::open_append(&self.config.path)?;
        self.writer = Some(BufWriter::new(file));
        self.current_size = 0;
        Ok(())
    }

    /// `app.log.3`-style path for generation `index`
    fn generation_path(&self, index: usize) -> PathBuf {
        let mut path = self.config.path.clone();
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("funnel.log");
        path.set_file_name(format!("{}.{}", filename, index));
        path
    }

    pub fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush().map_err(|e| {
                FunnelError::sink_write(
                    self.config.path.display().to_string(),
                    format!("cannot flush: {}", e),
                )
            })?;
        }
        Ok(())
    }

    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    #[must_use]
    pub fn config(&self) -> &SinkConfig {
        &self.config
    }
}

impl Drop for RotatingFileSink {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn sink_files(dir: &Path, stem: &str) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_str().unwrap().starts_with(stem))
            .count()
    }

    #[test]
    fn test_config_defaults() {
        let config = SinkConfig::new("/var/log/funnel.log");
        assert_eq!(config.max_bytes, 1 << 24);
        assert_eq!(config.backup_count, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_zero_max_bytes() {
        let config = SinkConfig::new("/var/log/funnel.log").with_max_bytes(0);
        assert!(matches!(
            config.validate().unwrap_err(),
            FunnelError::InvalidConfiguration { .. }
        ));
    }

    #[test]
    fn test_append_grows_active_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.log");
        let mut sink = RotatingFileSink::open(SinkConfig::new(&path)).unwrap();

        sink.append_line("hello").unwrap();
        sink.flush().unwrap();

        assert_eq!(sink.current_size(), 6);
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[test]
    fn test_reopen_counts_existing_size() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.log");
        {
            let mut sink = RotatingFileSink::open(SinkConfig::new(&path)).unwrap();
            sink.append_line("first").unwrap();
        }
        let sink = RotatingFileSink::open(SinkConfig::new(&path)).unwrap();
        assert_eq!(sink.current_size(), 6);
    }

    #[test]
    fn test_rotation_on_threshold_crossing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rot.log");
        let config = SinkConfig::new(&path).with_max_bytes(40).with_backup_count(3);
        let mut sink = RotatingFileSink::open(config).unwrap();

        // Each line is 20 bytes with the newline; two fit, the third rotates.
        for _ in 0..3 {
            sink.append_line("0123456789012345678").unwrap();
        }
        sink.flush().unwrap();

        let gen1 = path.with_file_name("rot.log.1");
        assert!(gen1.exists());
        assert_eq!(fs::read_to_string(&gen1).unwrap().lines().count(), 2);
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_generation_bound_holds() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bound.log");
        let config = SinkConfig::new(&path).with_max_bytes(30).with_backup_count(2);
        let mut sink = RotatingFileSink::open(config).unwrap();

        for i in 0..50 {
            sink.append_line(&format!("record number {:04}", i)).unwrap();
        }
        sink.flush().unwrap();

        // Active file + at most 2 generations.
        assert!(sink_files(dir.path(), "bound.log") <= 3);
        assert!(path.with_file_name("bound.log.1").exists());
        assert!(path.with_file_name("bound.log.2").exists());
        assert!(!path.with_file_name("bound.log.3").exists());
    }

    #[test]
    fn test_generations_shift_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shift.log");
        let config = SinkConfig::new(&path).with_max_bytes(10).with_backup_count(3);
        let mut sink = RotatingFileSink::open(config).unwrap();

        sink.append_line("aaaaaaaaa").unwrap(); // fills the active file
        sink.append_line("bbbbbbbbb").unwrap(); // rotates: a -> .1
        sink.append_line("ccccccccc").unwrap(); // rotates: a -> .2, b -> .1
        sink.flush().unwrap();

        assert!(fs::read_to_string(path.with_file_name("shift.log.2"))
            .unwrap()
            .starts_with("aaa"));
        assert!(fs::read_to_string(path.with_file_name("shift.log.1"))
            .unwrap()
            .starts_with("bbb"));
        assert!(fs::read_to_string(&path).unwrap().starts_with("ccc"));
    }

    #[test]
    fn test_zero_backup_count_truncates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trunc.log");
        let config = SinkConfig::new(&path).with_max_bytes(10).with_backup_count(0);
        let mut sink = RotatingFileSink::open(config).unwrap();

        sink.append_line("aaaaaaaaa").unwrap();
        sink.append_line("bbbbbbbbb").unwrap();
        sink.flush().unwrap();

        assert_eq!(sink_files(dir.path(), "trunc.log"), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "bbbbbbbbb\n");
    }

    #[test]
    fn test_oversized_line_lands_in_fresh_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("big.log");
        let config = SinkConfig::new(&path).with_max_bytes(10).with_backup_count(2);
        let mut sink = RotatingFileSink::open(config).unwrap();

        let long = "x".repeat(50);
        sink.append_line("small").unwrap();
        sink.append_line(&long).unwrap(); // rotates once, then writes whole line
        sink.flush().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap().trim_end(), long);
        assert!(path.with_file_name("big.log.1").exists());
    }
}
