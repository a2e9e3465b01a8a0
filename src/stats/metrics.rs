//! Statistics for the event hub

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use serde::Serialize;

/// Live hub counters
///
/// Updated by the connection registry and the broadcast loop, read by the
/// stats endpoint.
#[derive(Debug)]
pub struct HubStats {
    started_at: Instant,
    events_broadcast: AtomicU64,
    deliveries: AtomicU64,
    failed_writes: AtomicU64,
    connections_opened: AtomicU64,
    connections_closed: AtomicU64,
}

impl HubStats {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            events_broadcast: AtomicU64::new(0),
            deliveries: AtomicU64::new(0),
            failed_writes: AtomicU64::new(0),
            connections_opened: AtomicU64::new(0),
            connections_closed: AtomicU64::new(0),
        }
    }

    pub(crate) fn record_broadcast(&self, delivered: usize, failed: usize) {
        self.events_broadcast.fetch_add(1, Ordering::Relaxed);
        self.deliveries.fetch_add(delivered as u64, Ordering::Relaxed);
        self.failed_writes.fetch_add(failed as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_opened(&self) {
        self.connections_opened.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_closed(&self) {
        self.connections_closed.fetch_add(1, Ordering::Relaxed);
    }

    /// Get duration since the hub started
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Point-in-time copy of all counters
    pub fn snapshot(&self) -> HubStatsSnapshot {
        let opened = self.connections_opened.load(Ordering::Relaxed);
        let closed = self.connections_closed.load(Ordering::Relaxed);

        HubStatsSnapshot {
            uptime_secs: self.uptime().as_secs(),
            events_broadcast: self.events_broadcast.load(Ordering::Relaxed),
            deliveries: self.deliveries.load(Ordering::Relaxed),
            failed_writes: self.failed_writes.load(Ordering::Relaxed),
            connections_opened: opened,
            connections_closed: closed,
            active_connections: opened.saturating_sub(closed),
        }
    }
}

impl Default for HubStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable copy of [`HubStats`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HubStatsSnapshot {
    pub uptime_secs: u64,
    pub events_broadcast: u64,
    pub deliveries: u64,
    pub failed_writes: u64,
    pub connections_opened: u64,
    pub connections_closed: u64,
    pub active_connections: u64,
}
