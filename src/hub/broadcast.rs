//! Broadcast loop
//!
//! Drains the event bus one event at a time and pushes each event to every
//! registered connection. There is no backlog: a connection only sees events
//! delivered after it registered.

use std::sync::Arc;

use tokio::task::JoinHandle;

use super::bus::EventReceiver;
use super::config::HubConfig;
use super::event::ButtonHit;
use super::registry::{ConnectionRegistry, DeliveryReport};
use super::sink::EventSink;

/// Single consumer of the event bus
pub struct BroadcastLoop<S> {
    receiver: EventReceiver,
    registry: Arc<ConnectionRegistry<S>>,
    config: HubConfig,
}

impl<S: EventSink> BroadcastLoop<S> {
    pub fn new(
        receiver: EventReceiver,
        registry: Arc<ConnectionRegistry<S>>,
        config: HubConfig,
    ) -> Self {
        Self {
            receiver,
            registry,
            config,
        }
    }

    /// Run until every event sender has been dropped
    pub async fn run(mut self) {
        tracing::info!(
            write_timeout_ms = self.config.write_timeout.as_millis() as u64,
            "Broadcast loop started"
        );

        while let Some(hit) = self.receiver.recv().await {
            self.dispatch(hit).await;
        }

        tracing::info!("Event bus closed, broadcast loop stopped");
    }

    /// Deliver a single event to the current members
    pub async fn dispatch(&self, hit: ButtonHit) -> DeliveryReport {
        let frame = match hit.to_frame() {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!(error = %e, color = %hit.color, "Failed to serialize event");
                return DeliveryReport::default();
            }
        };

        let report = self
            .registry
            .deliver(&frame, self.config.write_timeout)
            .await;

        tracing::debug!(
            payload = frame.as_str(),
            delivered = report.delivered,
            pruned = report.pruned.len(),
            "Broadcast event"
        );

        report
    }

    /// Spawn the loop on the runtime
    ///
    /// Returns a handle that can be used to abort the task.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}
