//! Hub error types
//!
//! Error types for the event bus and connection writes.

use thiserror::Error;

/// Error type for event bus operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HubError {
    /// Bus is at capacity (only from non-blocking publish)
    #[error("Event bus full")]
    BusFull,
    /// Broadcast loop has gone away
    #[error("Event bus closed")]
    BusClosed,
    /// Input named a color that has no buzzer
    #[error("Unknown button color: {0}")]
    UnknownColor(String),
}

/// Error writing a frame to one connection
#[derive(Debug, Error)]
pub enum SinkError {
    /// Peer has closed the connection
    #[error("Connection closed")]
    Closed,
    /// Write did not complete within the write timeout
    #[error("Write timed out")]
    Timeout,
    /// Transport-level failure
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SinkError {
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        SinkError::Transport(Box::new(err))
    }
}
