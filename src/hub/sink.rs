//! Write side of a live client connection

use std::future::Future;

use super::error::SinkError;
use super::event::EventFrame;

/// A connection that event frames can be pushed to
///
/// Implemented by the websocket write half in the server and by in-memory
/// sinks in tests.
pub trait EventSink: Send + 'static {
    /// Write one frame to the peer
    fn send(&mut self, frame: &EventFrame) -> impl Future<Output = Result<(), SinkError>> + Send;

    /// Best-effort close after the connection has been dropped from the hub
    fn close(&mut self) -> impl Future<Output = ()> + Send {
        async {}
    }
}
