//! Live event hub
//!
//! Relays buzzer hits to every connected viewer.
//!
//! # Architecture
//!
//! ```text
//!   [red]   [green]   [blue]   [yellow]        producers
//!     │        │         │         │
//!     └────────┴────┬────┴─────────┘
//!                   ▼
//!          EventBus (bounded mpsc)              backpressure when full
//!                   │
//!                   ▼
//!            BroadcastLoop ── serialize once ──┐
//!                                              ▼
//!                              Arc<ConnectionRegistry>
//!                         ┌──────────────────────────────┐
//!                         │ Mutex<HashMap<ConnectionId,  │
//!                         │               EventSink>>    │
//!                         └──────┬──────────┬────────────┘
//!                                ▼          ▼
//!                             [client]   [client] ...   write w/ timeout,
//!                                                       prune on failure
//! ```
//!
//! Delivery is at most once and best effort. Events are not persisted and
//! late joiners get no backlog.

pub mod broadcast;
pub mod bus;
pub mod config;
pub mod error;
pub mod event;
pub mod registry;
pub mod sink;

#[cfg(test)]
pub(crate) mod testing;

pub use broadcast::BroadcastLoop;
pub use bus::{channel, EventReceiver, EventSender};
pub use config::HubConfig;
pub use error::{HubError, SinkError};
pub use event::{ButtonColor, ButtonHit, EventFrame};
pub use registry::{ConnectionId, ConnectionRegistry, DeliveryReport};
pub use sink::EventSink;
