//! Bounded event bus
//!
//! Many producers (one per buzzer) feed a single consumer, the broadcast
//! loop. The bus is bounded: once `capacity` events are queued, producers
//! wait for space. Nothing on this path waits on client network I/O.

use tokio::sync::mpsc;

use super::error::HubError;
use super::event::ButtonHit;

/// Create a bus holding at most `capacity` queued events
pub fn channel(capacity: usize) -> (EventSender, EventReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (EventSender { tx }, EventReceiver { rx })
}

/// Producer side of the bus
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::Sender<ButtonHit>,
}

impl EventSender {
    /// Enqueue an event, waiting for space if the bus is full
    pub async fn publish(&self, hit: ButtonHit) -> Result<(), HubError> {
        self.tx.send(hit).await.map_err(|_| HubError::BusClosed)
    }

    /// Enqueue an event or reject it immediately if the bus is full
    pub fn try_publish(&self, hit: ButtonHit) -> Result<(), HubError> {
        self.tx.try_send(hit).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => HubError::BusFull,
            mpsc::error::TrySendError::Closed(_) => HubError::BusClosed,
        })
    }

    /// Enqueue from a thread outside the async runtime, blocking it while full
    ///
    /// Intended for driver callbacks running on their own OS threads.
    ///
    /// # Panics
    ///
    /// Panics if called from within an async execution context.
    pub fn blocking_publish(&self, hit: ButtonHit) -> Result<(), HubError> {
        self.tx.blocking_send(hit).map_err(|_| HubError::BusClosed)
    }

    /// Free slots left before producers start waiting
    pub fn remaining_capacity(&self) -> usize {
        self.tx.capacity()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer side of the bus
#[derive(Debug)]
pub struct EventReceiver {
    rx: mpsc::Receiver<ButtonHit>,
}

impl EventReceiver {
    /// Wait for the next event
    ///
    /// Returns `None` once every sender has been dropped and the queue is
    /// drained.
    pub async fn recv(&mut self) -> Option<ButtonHit> {
        self.rx.recv().await
    }
}
