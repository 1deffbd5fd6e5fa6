//! The single task that owns all game state
//!
//! Socket tasks only parse frames and push [`Event`]s into an unbounded channel.
//! The dispatcher handles them strictly in arrival order, so every intent runs
//! to completion before the next one starts.

use crate::broadcast::{ConnectionHub, PlayerSender};
use crate::protocol::ClientMessage;
use crate::state::Registry;
use crate::types::ConnectionId;
use crate::ws::handlers;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};

#[derive(Debug)]
pub enum Event {
    Connected {
        id: ConnectionId,
        sender: PlayerSender,
    },
    Message {
        id: ConnectionId,
        msg: ClientMessage,
    },
    Disconnected {
        id: ConnectionId,
    },
    Status {
        reply: oneshot::Sender<StatusSnapshot>,
    },
}

/// Point-in-time counters for the status endpoint
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub sessions: usize,
    pub players: usize,
    pub connections: usize,
}

/// Cloneable handle to the dispatcher, shared by every connection
#[derive(Clone)]
pub struct AppState {
    events: mpsc::UnboundedSender<Event>,
}

impl AppState {
    /// Start the dispatcher task. Must be called inside a tokio runtime.
    pub fn spawn(registry: Registry) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_dispatcher(registry, rx));
        Self { events: tx }
    }

    pub fn connect(&self, id: ConnectionId, sender: PlayerSender) {
        self.send(Event::Connected { id, sender });
    }

    pub fn dispatch(&self, id: ConnectionId, msg: ClientMessage) {
        self.send(Event::Message { id, msg });
    }

    pub fn disconnect(&self, id: ConnectionId) {
        self.send(Event::Disconnected { id });
    }

    /// `None` if the dispatcher is gone
    pub async fn status(&self) -> Option<StatusSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.send(Event::Status { reply });
        rx.await.ok()
    }

    fn send(&self, event: Event) {
        if self.events.send(event).is_err() {
            tracing::error!("Dispatcher has stopped, dropping event");
        }
    }
}

async fn run_dispatcher(mut registry: Registry, mut events: mpsc::UnboundedReceiver<Event>) {
    let mut hub = ConnectionHub::new();
    tracing::info!("Dispatcher started");

    while let Some(event) = events.recv().await {
        match event {
            Event::Connected { id, sender } => {
                tracing::info!("Client connected: {}", id);
                hub.register(id, sender);
            }
            Event::Message { id, msg } => {
                tracing::debug!("Message from {}: {:?}", id, msg);
                let outbound = handlers::handle_message(&mut registry, &id, msg);
                hub.deliver_all(outbound);
            }
            Event::Disconnected { id } => {
                tracing::info!("Client disconnected: {}", id);
                hub.unregister(&id);
                let outbound = handlers::handle_disconnect(&mut registry, &id);
                hub.deliver_all(outbound);
            }
            Event::Status { reply } => {
                let _ = reply.send(StatusSnapshot {
                    sessions: registry.len(),
                    players: registry.player_count(),
                    connections: hub.len(),
                });
            }
        }
    }

    tracing::info!("Dispatcher stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ServerMessage;
    use crate::types::SessionConfig;
    use crate::words::Catalog;

    fn spawn() -> AppState {
        AppState::spawn(Registry::with_seed(
            Catalog::builtin(),
            SessionConfig::default(),
            5,
        ))
    }

    #[tokio::test]
    async fn test_status_counts() {
        let state = spawn();
        let (tx, mut rx) = mpsc::unbounded_channel();
        state.connect("c1".to_string(), tx);
        state.dispatch(
            "c1".to_string(),
            ClientMessage::CreateGame {
                player_name: "A".to_string(),
                selected_category: None,
            },
        );

        assert!(matches!(
            rx.recv().await,
            Some(ServerMessage::GameCreated { .. })
        ));
        assert_eq!(
            state.status().await,
            Some(StatusSnapshot {
                sessions: 1,
                players: 1,
                connections: 1,
            })
        );

        state.disconnect("c1".to_string());
        assert_eq!(
            state.status().await,
            Some(StatusSnapshot {
                sessions: 0,
                players: 0,
                connections: 0,
            })
        );
    }

    #[tokio::test]
    async fn test_disconnect_notifies_remaining_players() {
        let state = spawn();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        state.connect("c1".to_string(), tx1);
        state.connect("c2".to_string(), tx2);

        state.dispatch(
            "c1".to_string(),
            ClientMessage::CreateGame {
                player_name: "A".to_string(),
                selected_category: None,
            },
        );
        let Some(ServerMessage::GameCreated { game_id, .. }) = rx1.recv().await else {
            panic!("Expected GameCreated");
        };

        state.dispatch(
            "c2".to_string(),
            ClientMessage::JoinGame {
                game_id,
                player_name: "B".to_string(),
            },
        );
        assert!(matches!(
            rx1.recv().await,
            Some(ServerMessage::PlayerJoined { .. })
        ));
        assert!(matches!(
            rx2.recv().await,
            Some(ServerMessage::PlayerJoined { .. })
        ));

        state.disconnect("c2".to_string());
        match rx1.recv().await {
            Some(ServerMessage::PlayerLeft { players }) => {
                assert_eq!(players.len(), 1);
                assert_eq!(players[0].id, "c1");
            }
            other => panic!("Expected PlayerLeft, got {:?}", other),
        }
    }
}
