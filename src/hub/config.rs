//! Hub configuration

use std::time::Duration;

/// Default event bus capacity
pub const DEFAULT_EVENT_CAPACITY: usize = 4;

/// Default per-connection write timeout
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(2);

/// Configuration for the event bus and broadcast loop
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Number of events the bus holds before producers block
    pub event_capacity: usize,

    /// Upper bound on a single write to one connection
    pub write_timeout: Duration,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            event_capacity: DEFAULT_EVENT_CAPACITY,
            write_timeout: DEFAULT_WRITE_TIMEOUT,
        }
    }
}

impl HubConfig {
    /// Set the event bus capacity (at least 1)
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity.max(1);
        self
    }

    /// Set the per-connection write timeout
    pub fn write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = timeout;
        self
    }
}
