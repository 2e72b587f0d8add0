//! Hierarchical logger registry, owned by the listener
//!
//! Origin names are dotted paths (`worker.depth.matcher`). Each name may
//! carry its own minimum severity; names without one inherit from the
//! nearest dotted ancestor, falling back to the registry's root level.
//! Entries are created lazily on first lookup and live exactly as long as
//! the listener that owns the registry; there is no process-global state.

use super::log_level::LogLevel;
use std::collections::HashMap;

#[derive(Debug)]
struct OriginEntry {
    level: Option<LogLevel>,
}

#[derive(Debug)]
pub struct LoggerRegistry {
    root_level: LogLevel,
    origins: HashMap<String, OriginEntry>,
}

impl LoggerRegistry {
    #[must_use]
    pub fn new(root_level: LogLevel) -> Self {
        Self {
            root_level,
            origins: HashMap::new(),
        }
    }

    /// Pin an explicit minimum severity for an origin and its descendants
    pub fn set_level(&mut self, origin: impl Into<String>, level: LogLevel) {
        self.origins
            .insert(origin.into(), OriginEntry { level: Some(level) });
    }

    /// Effective minimum severity for an origin
    ///
    /// Walks `a.b.c` → `a.b` → `a`, taking the first explicit level; the
    /// root default applies when no ancestor has one.
    #[must_use]
    pub fn effective_level(&self, origin: &str) -> LogLevel {
        let mut name = origin;
        loop {
            if let Some(entry) = self.origins.get(name) {
                if let Some(level) = entry.level {
                    return level;
                }
            }
            match name.rfind('.') {
                Some(idx) => name = &name[..idx],
                None => return self.root_level,
            }
        }
    }

    /// Filter decision for one record, creating the origin entry lazily
    pub fn accepts(&mut self, origin: &str, level: LogLevel) -> bool {
        if !self.origins.contains_key(origin) {
            self.origins
                .insert(origin.to_string(), OriginEntry { level: None });
        }
        level >= self.effective_level(origin)
    }

    /// Number of origins seen so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.origins.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }
}
