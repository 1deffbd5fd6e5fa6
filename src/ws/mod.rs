pub mod handlers;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::dispatch::AppState;
use crate::protocol::{ServerMessage, PROTOCOL_VERSION};

/// WebSocket upgrade handler
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// First frame on every connection, so the client learns its own id
fn welcome(id: &str) -> ServerMessage {
    ServerMessage::Welcome {
        player_id: id.to_string(),
        protocol: PROTOCOL_VERSION.to_string(),
        server_now: chrono::Utc::now().to_rfc3339(),
    }
}

/// Serialize and send one message. Only transport failures are errors.
async fn send_message(
    sender: &mut SplitSink<WebSocket, Message>,
    msg: &ServerMessage,
) -> Result<(), axum::Error> {
    match serde_json::to_string(msg) {
        Ok(json) => sender.send(Message::Text(json.into())).await,
        Err(e) => {
            tracing::error!("Failed to serialize server message: {}", e);
            Ok(())
        }
    }
}

/// Handle individual WebSocket connection
async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let id = ulid::Ulid::new().to_string();

    if send_message(&mut sender, &welcome(&id)).await.is_err() {
        tracing::error!("Failed to send welcome message");
        return;
    }

    let (tx, mut outbound_rx) = mpsc::unbounded_channel();
    state.connect(id.clone(), tx);

    loop {
        tokio::select! {
            // Messages routed to this connection by the dispatcher
            outbound = outbound_rx.recv() => {
                match outbound {
                    Some(msg) => {
                        if send_message(&mut sender, &msg).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }

            // Handle client messages
            ws_msg = receiver.next() => {
                match ws_msg {
                    Some(Ok(Message::Text(text))) => {
                        tracing::debug!("Received message from {}: {}", id, text.as_str());

                        match handlers::parse_client_message(text.as_str()) {
                            Ok(client_msg) => state.dispatch(id.clone(), client_msg),
                            Err(error) => {
                                if send_message(&mut sender, &error).await.is_err() {
                                    break;
                                }
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) => {
                        tracing::info!("WebSocket closed by {}", id);
                        break;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if sender.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!("WebSocket error on {}: {}", id, e);
                        break;
                    }
                    None => break,
                }
            }
        }
    }

    state.disconnect(id.clone());
    tracing::info!("WebSocket connection closed for {}", id);
}
