//! Websocket subscriptions
//!
//! A client that opens `/socket` is registered with the hub and from then on
//! receives every button hit as a text frame. The read half is drained only
//! to notice when the client goes away.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures_util::stream::{SplitSink, StreamExt};
use futures_util::SinkExt;

use crate::hub::{ConnectionRegistry, EventFrame, EventSink, SinkError};

use super::routes::AppState;

/// Write half of a subscribed websocket
pub struct WsSink(SplitSink<WebSocket, Message>);

impl EventSink for WsSink {
    async fn send(&mut self, frame: &EventFrame) -> Result<(), SinkError> {
        self.0
            .send(Message::Text(frame.as_str().to_owned().into()))
            .await
            .map_err(SinkError::transport)
    }

    async fn close(&mut self) {
        let _ = self.0.close().await;
    }
}

/// `GET /socket`
pub(crate) async fn subscribe(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let registry = Arc::clone(&state.registry);

    ws.on_failed_upgrade(|e: axum::Error| tracing::warn!(error = %e, "Websocket upgrade failed"))
        .on_upgrade(move |socket| serve_socket(socket, registry))
}

async fn serve_socket(socket: WebSocket, registry: Arc<ConnectionRegistry<WsSink>>) {
    let (sink, mut stream) = socket.split();
    let id = registry.register(WsSink(sink)).await;

    while let Some(msg) = stream.next().await {
        match msg {
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(connection = %id, error = %e, "Websocket read error");
                break;
            }
        }
    }

    // Already gone if a failed write pruned it first
    registry.remove(id).await;
}
