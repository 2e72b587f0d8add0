//! The shared record queue connecting workers to the listener
//!
//! Backed by an unbounded crossbeam channel: pushes never block a producer,
//! pops block the single consumer until a value arrives, and `len()` reads
//! the depth non-destructively for the backpressure monitor. Records from a
//! single producer are delivered in emission order; no cross-producer
//! ordering is guaranteed.

use super::error::{FunnelError, Result};
use super::record::LogRecord;
use crossbeam_channel::{unbounded, Receiver, Sender};

/// A value carried by the shared queue
#[derive(Debug, Clone)]
pub enum QueueItem {
    Record(LogRecord),
    /// Sentinel: no more records, shut the listener down
    Shutdown,
}

/// Cloneable handle to the shared queue
///
/// Created once at process-group startup and shared by reference with every
/// worker and the listener. Each handle holds both endpoints, so the channel
/// stays connected for as long as any handle is alive and the sentinel is
/// the listener's only termination path.
#[derive(Debug, Clone)]
pub struct SharedQueue {
    tx: Sender<QueueItem>,
    rx: Receiver<QueueItem>,
}

impl SharedQueue {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    /// Push a record; non-blocking (the queue is unbounded)
    ///
    /// # Errors
    ///
    /// Returns [`FunnelError::QueueClosed`] if the channel has been torn
    /// down. Callers on the emission path swallow this and drop the record.
    pub fn push(&self, record: LogRecord) -> Result<()> {
        self.tx
            .send(QueueItem::Record(record))
            .map_err(|_| FunnelError::QueueClosed)
    }

    /// Enqueue the shutdown sentinel
    ///
    /// Records pushed before the sentinel are still drained by the listener.
    pub fn push_shutdown(&self) -> Result<()> {
        self.tx
            .send(QueueItem::Shutdown)
            .map_err(|_| FunnelError::QueueClosed)
    }

    /// Block until a value is available
    ///
    /// Only the listener calls this. Because every handle keeps a sender
    /// alive, disconnection can only happen during teardown; it is treated
    /// as a shutdown.
    pub fn pop(&self) -> QueueItem {
        self.rx.recv().unwrap_or(QueueItem::Shutdown)
    }

    /// Current queue depth, read non-destructively
    #[must_use]
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

impl Default for SharedQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_level::LogLevel;
    use crate::core::record::Message;

    fn record(n: i64) -> LogRecord {
        LogRecord::new(
            "test",
            LogLevel::Info,
            Message::new("record {}", vec![n.into()]),
        )
    }

    #[test]
    fn test_push_pop_fifo() {
        let queue = SharedQueue::new();
        for i in 0..5 {
            queue.push(record(i)).unwrap();
        }
        assert_eq!(queue.len(), 5);

        for i in 0..5 {
            match queue.pop() {
                QueueItem::Record(r) => {
                    assert_eq!(r.message.render().unwrap(), format!("record {}", i));
                }
                QueueItem::Shutdown => panic!("unexpected sentinel"),
            }
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn test_sentinel_ordering() {
        let queue = SharedQueue::new();
        queue.push(record(1)).unwrap();
        queue.push_shutdown().unwrap();
        queue.push(record(2)).unwrap();

        assert!(matches!(queue.pop(), QueueItem::Record(_)));
        assert!(matches!(queue.pop(), QueueItem::Shutdown));
    }

    #[test]
    fn test_clone_shares_channel() {
        let queue = SharedQueue::new();
        let other = queue.clone();
        other.push(record(7)).unwrap();
        assert_eq!(queue.len(), 1);
        assert!(matches!(queue.pop(), QueueItem::Record(_)));
    }

    #[test]
    fn test_concurrent_producers() {
        let queue = SharedQueue::new();
        let mut handles = vec![];
        for _ in 0..4 {
            let q = queue.clone();
            handles.push(std::thread::spawn(move || {
                for i in 0..25 {
                    q.push(record(i)).unwrap();
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(queue.len(), 100);
    }
}
