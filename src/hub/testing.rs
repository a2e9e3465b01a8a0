//! In-memory sinks for hub tests

use std::sync::{Arc, Mutex};

use super::error::SinkError;
use super::event::EventFrame;
use super::sink::EventSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MockBehavior {
    /// Record every frame
    Accept,
    /// Fail every write
    Fail,
    /// Never complete a write
    Stall,
    /// Never complete a write or a close
    Hang,
}

#[derive(Debug, Default)]
struct LogInner {
    frames: Vec<String>,
    closed: bool,
}

/// Shared view of what a `MockSink` received
#[derive(Debug, Clone, Default)]
pub(crate) struct MockLog {
    inner: Arc<Mutex<LogInner>>,
}

impl MockLog {
    pub(crate) fn frames(&self) -> Vec<String> {
        self.inner.lock().unwrap().frames.clone()
    }

    pub(crate) fn closed(&self) -> bool {
        self.inner.lock().unwrap().closed
    }
}

pub(crate) struct MockSink {
    behavior: MockBehavior,
    log: MockLog,
}

impl MockSink {
    pub(crate) fn new() -> (Self, MockLog) {
        Self::with_behavior(MockBehavior::Accept)
    }

    pub(crate) fn with_behavior(behavior: MockBehavior) -> (Self, MockLog) {
        let log = MockLog::default();
        (
            Self {
                behavior,
                log: log.clone(),
            },
            log,
        )
    }
}

impl EventSink for MockSink {
    async fn send(&mut self, frame: &EventFrame) -> Result<(), SinkError> {
        match self.behavior {
            MockBehavior::Accept => {
                self.log
                    .inner
                    .lock()
                    .unwrap()
                    .frames
                    .push(frame.as_str().to_string());
                Ok(())
            }
            MockBehavior::Fail => Err(SinkError::Closed),
            MockBehavior::Stall | MockBehavior::Hang => {
                std::future::pending::<()>().await;
                Ok(())
            }
        }
    }

    async fn close(&mut self) {
        if self.behavior == MockBehavior::Hang {
            std::future::pending::<()>().await;
        }
        self.log.inner.lock().unwrap().closed = true;
    }
}
