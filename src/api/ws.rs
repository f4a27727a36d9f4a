//! WebSocket subscription endpoint.
//!
//! Each connected socket is one subscriber on the distributor. The server
//! emits `positionUpdate` frames carrying a serialized snapshot; inbound
//! client messages are ignored apart from the close handshake.

use crate::api::AppState;
use crate::distributor::Distributor;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tracing::info;

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state.distributor))
}

async fn handle_socket(socket: WebSocket, distributor: Arc<Distributor>) {
    let (id, mut updates) = distributor.subscribe().await;
    info!(subscriber = %id, "client connected");

    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            update = updates.recv() => {
                let Some(snapshot) = update else { break };
                let frame = serde_json::json!({
                    "event": "positionUpdate",
                    "data": &*snapshot,
                });
                let text = match serde_json::to_string(&frame) {
                    Ok(text) => text,
                    Err(_) => continue,
                };
                if sink.send(Message::Text(text)).await.is_err() {
                    break;
                }
            }
            inbound = stream.next() => {
                match inbound {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    // No inbound protocol beyond the connection lifecycle.
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    distributor.unsubscribe(id);
    info!(subscriber = %id, "client disconnected");
}
