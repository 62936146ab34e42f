//! Stock listeners.
//!
//! - [`LoggingListener`] reports every event through `tracing`
//! - [`EventCounter`] keeps per-kind totals

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::info;

use crate::block::Sizer;
use crate::errors::ListenerError;
use crate::events::{BinEvent, EventKind};
use crate::notifier::BinListener;

/// Reports events as `info`-level tracing events tagged with its name.
#[derive(Clone, Debug)]
pub struct LoggingListener {
    name: String,
}

impl LoggingListener {
    /// Create a logger with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl<T> BinListener<T> for LoggingListener {
    fn name(&self) -> &str {
        &self.name
    }

    fn update(&self, event: &BinEvent<'_, T>) -> Result<(), ListenerError> {
        let bin = event.bin();
        match event {
            BinEvent::BinCreated { .. } => {
                info!(logger = %self.name, bin_id = %bin.id(), capacity = bin.capacity(), "bin created");
            }
            BinEvent::BlockAdded { block, .. } => {
                info!(
                    logger = %self.name,
                    bin_id = %bin.id(),
                    size = block.size(),
                    occupied = bin.occupied(),
                    "block added"
                );
            }
            BinEvent::BlockIgnored { block, .. } => {
                info!(
                    logger = %self.name,
                    bin_id = %bin.id(),
                    size = block.size(),
                    capacity = bin.capacity(),
                    "block ignored"
                );
            }
        }
        Ok(())
    }
}

/// Counts events per kind. Safe to share across threads.
#[derive(Debug, Default)]
pub struct EventCounter {
    created: AtomicUsize,
    added: AtomicUsize,
    ignored: AtomicUsize,
}

impl EventCounter {
    /// Create a counter with all totals at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// `BinCreated` events seen.
    pub fn created(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }

    /// `BlockAdded` events seen.
    pub fn added(&self) -> usize {
        self.added.load(Ordering::Relaxed)
    }

    /// `BlockIgnored` events seen.
    pub fn ignored(&self) -> usize {
        self.ignored.load(Ordering::Relaxed)
    }

    /// Total for one kind.
    pub fn count(&self, kind: EventKind) -> usize {
        match kind {
            EventKind::BinCreated => self.created(),
            EventKind::BlockAdded => self.added(),
            EventKind::BlockIgnored => self.ignored(),
        }
    }

    /// Sum over all kinds.
    pub fn total(&self) -> usize {
        self.created() + self.added() + self.ignored()
    }
}

impl<T> BinListener<T> for EventCounter {
    fn name(&self) -> &str {
        "event-counter"
    }

    fn update(&self, event: &BinEvent<'_, T>) -> Result<(), ListenerError> {
        let counter = match event.kind() {
            EventKind::BinCreated => &self.created,
            EventKind::BlockAdded => &self.added,
            EventKind::BlockIgnored => &self.ignored,
        };
        let _ = counter.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tracing::Level;

    use super::*;
    use crate::bin::{Bin, BinId};
    use crate::block::Block;
    use crate::logging::test_utils::capture_logs;

    #[test]
    fn counter_starts_at_zero() {
        let counter = EventCounter::new();
        assert_eq!(counter.total(), 0);
    }

    #[test]
    fn counter_tracks_each_kind() {
        let counter = EventCounter::new();
        let mut bin = Bin::new(10, BinId::new(0)).unwrap();
        let big = Block::fixed("big", 11);

        BinListener::<&str>::update(&counter, &BinEvent::BinCreated { bin: &bin }).unwrap();
        assert!(bin.add(Block::fixed("a", 3)));
        BinListener::<&str>::update(
            &counter,
            &BinEvent::BlockAdded {
                bin: &bin,
                block: bin.last().unwrap(),
            },
        )
        .unwrap();
        BinListener::<&str>::update(
            &counter,
            &BinEvent::BlockIgnored {
                bin: &bin,
                block: &big,
            },
        )
        .unwrap();

        assert_eq!(counter.created(), 1);
        assert_eq!(counter.added(), 1);
        assert_eq!(counter.ignored(), 1);
        assert_eq!(counter.count(EventKind::BlockAdded), 1);
        assert_eq!(counter.total(), 3);
    }

    #[test]
    fn logging_listener_reports_bin_created() {
        let (logs, _guard) = capture_logs();
        let logger = LoggingListener::new("Logger1");
        let bin = Bin::<()>::new(100, BinId::new(0)).unwrap();

        logger.update(&BinEvent::BinCreated { bin: &bin }).unwrap();

        assert!(logs.has_event(Level::INFO, "bin created"));
        let events = logs.events();
        assert!(
            events[0]
                .fields
                .iter()
                .any(|(k, v)| k == "logger" && v == "Logger1")
        );
        assert!(
            events[0]
                .fields
                .iter()
                .any(|(k, v)| k == "bin_id" && v == "0")
        );
    }

    #[test]
    fn logging_listener_reports_block_size() {
        let (logs, _guard) = capture_logs();
        let logger = LoggingListener::new("Logger2");
        let mut bin = Bin::new(100, BinId::new(4)).unwrap();
        assert!(bin.add(Block::fixed("a", 30)));

        logger
            .update(&BinEvent::BlockAdded {
                bin: &bin,
                block: bin.last().unwrap(),
            })
            .unwrap();

        assert!(logs.has_event(Level::INFO, "block added"));
        let events = logs.events();
        assert!(events[0].fields.iter().any(|(k, v)| k == "size" && v == "30"));
    }

    #[test]
    fn logging_listener_reports_ignored() {
        let (logs, _guard) = capture_logs();
        let logger = LoggingListener::new("Logger3");
        let bin = Bin::new(10, BinId::new(1)).unwrap();
        let block = Block::fixed("big", 50);

        logger
            .update(&BinEvent::BlockIgnored {
                bin: &bin,
                block: &block,
            })
            .unwrap();

        assert!(logs.has_event(Level::INFO, "block ignored"));
    }

    #[test]
    fn logging_listener_name() {
        let logger = LoggingListener::new("audit");
        assert_eq!(BinListener::<()>::name(&logger), "audit");
    }
}
