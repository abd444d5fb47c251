use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::ApiState;

pub async fn subscribe(ws: WebSocketUpgrade, State(state): State<Arc<ApiState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Forwards every published schedule to the client until either side closes.
async fn handle_socket(socket: WebSocket, state: Arc<ApiState>) {
    let connection_id = Uuid::new_v4();
    let mut updates = state.booking.subscribe();
    let (mut sender, mut receiver) = socket.split();
    info!("WebSocket client {} connected", connection_id);

    let mut send_task = tokio::spawn(async move {
        loop {
            match updates.recv().await {
                Ok(message) => {
                    if sender.send(Message::Text(message)).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(
                        "WebSocket client {} lagged, {} updates dropped",
                        connection_id, skipped
                    );
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(message)) = receiver.next().await {
            if let Message::Close(_) = message {
                break;
            }
            debug!("Ignoring message from WebSocket client {}", connection_id);
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    info!("WebSocket client {} disconnected", connection_id);
}
