//! Connection registry
//!
//! The set of live client connections. Request handlers register new
//! connections while the broadcast loop iterates and prunes, so every
//! operation goes through one mutex. A registration that arrives while a
//! delivery is in progress waits for it and does not see that event.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Mutex;

use crate::stats::HubStats;

use super::error::SinkError;
use super::event::EventFrame;
use super::sink::EventSink;

/// Identifier assigned to a connection at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Outcome of delivering one frame to every member
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Connections the frame was written to
    pub delivered: usize,
    /// Connections removed because their write failed or timed out
    pub pruned: Vec<ConnectionId>,
}

/// Guarded set of live connections
pub struct ConnectionRegistry<S> {
    members: Mutex<HashMap<ConnectionId, S>>,
    next_id: AtomicU64,
    stats: Arc<HubStats>,
}

impl<S: EventSink> ConnectionRegistry<S> {
    /// Create an empty registry with its own statistics
    pub fn new() -> Self {
        Self::with_stats(Arc::new(HubStats::new()))
    }

    /// Create an empty registry reporting into `stats`
    pub fn with_stats(stats: Arc<HubStats>) -> Self {
        Self {
            members: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            stats,
        }
    }

    pub fn stats(&self) -> &Arc<HubStats> {
        &self.stats
    }

    /// Add a connection; it receives every event delivered from now on
    pub async fn register(&self, sink: S) -> ConnectionId {
        let id = ConnectionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut members = self.members.lock().await;
        members.insert(id, sink);
        self.stats.record_opened();

        tracing::info!(
            connection = %id,
            connections = members.len(),
            "Connection registered"
        );

        id
    }

    /// Remove a connection
    ///
    /// Returns `false` if it was already gone (e.g. pruned by a failed write).
    pub async fn remove(&self, id: ConnectionId) -> bool {
        let mut members = self.members.lock().await;
        let removed = members.remove(&id).is_some();

        if removed {
            self.stats.record_closed();
            tracing::info!(
                connection = %id,
                connections = members.len(),
                "Connection removed"
            );
        }

        removed
    }

    pub async fn contains(&self, id: ConnectionId) -> bool {
        self.members.lock().await.contains_key(&id)
    }

    pub async fn len(&self) -> usize {
        self.members.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.members.lock().await.is_empty()
    }

    /// Write `frame` to every member
    ///
    /// Writes run concurrently, each bounded by `write_timeout`. A member whose
    /// write fails or times out is removed before the lock is released and is
    /// never retried. Removed sinks are closed in the background after the
    /// lock is released.
    pub async fn deliver(&self, frame: &EventFrame, write_timeout: Duration) -> DeliveryReport {
        let mut members = self.members.lock().await;

        let writes = FuturesUnordered::new();
        for (id, sink) in members.iter_mut() {
            let id = *id;
            writes.push(async move {
                let result = match tokio::time::timeout(write_timeout, sink.send(frame)).await {
                    Ok(result) => result,
                    Err(_) => Err(SinkError::Timeout),
                };
                (id, result)
            });
        }
        let results: Vec<(ConnectionId, Result<(), SinkError>)> = writes.collect().await;

        let mut report = DeliveryReport::default();
        let mut dead = Vec::new();

        for (id, result) in results {
            match result {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    tracing::warn!(connection = %id, error = %e, "Write failed, dropping connection");
                    if let Some(sink) = members.remove(&id) {
                        self.stats.record_closed();
                        dead.push(sink);
                    }
                    report.pruned.push(id);
                }
            }
        }

        self.stats
            .record_broadcast(report.delivered, report.pruned.len());
        drop(members);

        if !dead.is_empty() {
            tokio::spawn(close_all(dead, write_timeout));
        }

        report
    }
}

/// Best-effort close of pruned sinks, each bounded by `close_timeout`
async fn close_all<S: EventSink>(mut sinks: Vec<S>, close_timeout: Duration) {
    let mut closes = FuturesUnordered::new();
    for sink in sinks.iter_mut() {
        closes.push(async move {
            let _ = tokio::time::timeout(close_timeout, sink.close()).await;
        });
    }
    while closes.next().await.is_some() {}
}

impl<S: EventSink> Default for ConnectionRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hub::testing::{MockBehavior, MockLog, MockSink};

    const TIMEOUT: Duration = Duration::from_millis(100);

    async fn wait_closed(log: &MockLog) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while !log.closed() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("pruned sink was never closed");
    }

    #[tokio::test]
    async fn test_register_remove() {
        let registry = ConnectionRegistry::new();
        let (sink, _log) = MockSink::new();

        let id = registry.register(sink).await;
        assert!(registry.contains(id).await);
        assert_eq!(registry.len().await, 1);

        assert!(registry.remove(id).await);
        assert!(!registry.remove(id).await);
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let registry = ConnectionRegistry::new();
        let a = registry.register(MockSink::new().0).await;
        let b = registry.register(MockSink::new().0).await;

        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_deliver_to_all_members() {
        let registry = ConnectionRegistry::new();
        let mut logs = Vec::new();
        for _ in 0..3 {
            let (sink, log) = MockSink::new();
            registry.register(sink).await;
            logs.push(log);
        }

        let report = registry.deliver(&EventFrame::from("hit"), TIMEOUT).await;

        assert_eq!(report.delivered, 3);
        assert!(report.pruned.is_empty());
        for log in logs {
            assert_eq!(log.frames(), vec!["hit".to_string()]);
        }
    }

    #[tokio::test]
    async fn test_failed_write_prunes_connection() {
        let registry = ConnectionRegistry::new();
        let (good, good_log) = MockSink::new();
        let (bad, bad_log) = MockSink::with_behavior(MockBehavior::Fail);
        registry.register(good).await;
        let bad_id = registry.register(bad).await;

        let report = registry.deliver(&EventFrame::from("one"), TIMEOUT).await;
        assert_eq!(report.delivered, 1);
        assert_eq!(report.pruned, vec![bad_id]);
        assert!(!registry.contains(bad_id).await);
        wait_closed(&bad_log).await;

        let report = registry.deliver(&EventFrame::from("two"), TIMEOUT).await;
        assert_eq!(report.delivered, 1);
        assert!(report.pruned.is_empty());
        assert_eq!(good_log.frames(), vec!["one".to_string(), "two".to_string()]);
        assert!(bad_log.frames().is_empty());

        let stats = registry.stats().snapshot();
        assert_eq!(stats.failed_writes, 1);
        assert_eq!(stats.active_connections, 1);
    }

    #[tokio::test]
    async fn test_slow_write_times_out() {
        let registry = ConnectionRegistry::new();
        let (fast, fast_log) = MockSink::new();
        let (slow, _slow_log) = MockSink::with_behavior(MockBehavior::Stall);
        registry.register(fast).await;
        let slow_id = registry.register(slow).await;

        let started = std::time::Instant::now();
        let report = registry
            .deliver(&EventFrame::from("hit"), Duration::from_millis(50))
            .await;

        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(report.delivered, 1);
        assert_eq!(report.pruned, vec![slow_id]);
        assert_eq!(fast_log.frames(), vec!["hit".to_string()]);
    }

    #[tokio::test]
    async fn test_hung_close_does_not_hold_delivery() {
        let registry = Arc::new(ConnectionRegistry::new());
        let (fast, fast_log) = MockSink::new();
        let (hung, hung_log) = MockSink::with_behavior(MockBehavior::Hang);
        registry.register(fast).await;
        let hung_id = registry.register(hung).await;

        let write_timeout = Duration::from_millis(500);
        let report = tokio::time::timeout(
            Duration::from_millis(900),
            registry.deliver(&EventFrame::from("hit"), write_timeout),
        )
        .await
        .expect("delivery waited on a hung close");

        assert_eq!(report.pruned, vec![hung_id]);
        assert_eq!(fast_log.frames(), vec!["hit".to_string()]);
        assert!(!hung_log.closed());

        // Lock is free while the close is still pending
        let len = tokio::time::timeout(Duration::from_millis(100), registry.len())
            .await
            .expect("registry still locked");
        assert_eq!(len, 1);
    }

    #[tokio::test]
    async fn test_deliver_to_empty_registry() {
        let registry: ConnectionRegistry<MockSink> = ConnectionRegistry::new();
        let report = registry.deliver(&EventFrame::from("hit"), TIMEOUT).await;

        assert_eq!(report, DeliveryReport::default());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_register_remove_deliver() {
        let registry = Arc::new(ConnectionRegistry::new());

        // Long-lived members that must survive the churn
        let mut stable = Vec::new();
        for _ in 0..8 {
            let (sink, log) = MockSink::new();
            stable.push((registry.register(sink).await, log));
        }

        let mut tasks = Vec::new();
        for _ in 0..16 {
            let registry = Arc::clone(&registry);
            tasks.push(tokio::spawn(async move {
                for _ in 0..25 {
                    let id = registry.register(MockSink::new().0).await;
                    tokio::task::yield_now().await;
                    assert!(registry.remove(id).await);
                }
            }));
        }

        let broadcaster = {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move {
                for i in 0..50 {
                    let frame = EventFrame::from(i.to_string());
                    let report = registry.deliver(&frame, TIMEOUT).await;
                    assert!(report.pruned.is_empty());
                    assert!(report.delivered >= 8);
                }
            })
        };

        for task in tasks {
            task.await.unwrap();
        }
        broadcaster.await.unwrap();

        assert_eq!(registry.len().await, 8);
        let expected: Vec<String> = (0..50).map(|i| i.to_string()).collect();
        for (id, log) in stable {
            assert!(registry.contains(id).await);
            assert_eq!(log.frames(), expected);
        }
    }
}
