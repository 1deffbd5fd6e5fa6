//! Outbound delivery
//!
//! State operations never send anything themselves. They return a list of
//! [`Outbound`] messages, and the dispatcher hands those to a [`ConnectionHub`]
//! which knows the live sender for every connected participant.

use crate::protocol::ServerMessage;
use crate::types::ConnectionId;
use std::collections::HashMap;
use tokio::sync::mpsc;

/// Per-connection sender for outbound messages
pub type PlayerSender = mpsc::UnboundedSender<ServerMessage>;

#[derive(Debug, Clone, PartialEq)]
pub enum Recipients {
    /// Unicast to a single connection
    One(ConnectionId),
    /// Everyone listed (typically a session roster snapshot)
    Many(Vec<ConnectionId>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outbound {
    pub to: Recipients,
    pub message: ServerMessage,
}

impl Outbound {
    pub fn to_one(id: impl Into<ConnectionId>, message: ServerMessage) -> Self {
        Self {
            to: Recipients::One(id.into()),
            message,
        }
    }

    pub fn to_many(ids: Vec<ConnectionId>, message: ServerMessage) -> Self {
        Self {
            to: Recipients::Many(ids),
            message,
        }
    }

    /// Whether `id` receives this message
    pub fn reaches(&self, id: &str) -> bool {
        match &self.to {
            Recipients::One(target) => target == id,
            Recipients::Many(targets) => targets.iter().any(|t| t == id),
        }
    }
}

/// Registry of live connection senders
#[derive(Debug, Default)]
pub struct ConnectionHub {
    senders: HashMap<ConnectionId, PlayerSender>,
}

impl ConnectionHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: ConnectionId, sender: PlayerSender) {
        tracing::debug!("Connection {} registered", id);
        self.senders.insert(id, sender);
    }

    pub fn unregister(&mut self, id: &str) {
        if self.senders.remove(id).is_some() {
            tracing::debug!("Connection {} unregistered", id);
        }
    }

    pub fn len(&self) -> usize {
        self.senders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }

    /// Deliver one outbound message. Missing or closed connections are skipped.
    pub fn deliver(&self, outbound: Outbound) {
        match outbound.to {
            Recipients::One(id) => self.send_to(&id, outbound.message),
            Recipients::Many(ids) => {
                for id in &ids {
                    self.send_to(id, outbound.message.clone());
                }
            }
        }
    }

    pub fn deliver_all(&self, outbound: impl IntoIterator<Item = Outbound>) {
        for item in outbound {
            self.deliver(item);
        }
    }

    fn send_to(&self, id: &str, message: ServerMessage) {
        match self.senders.get(id) {
            Some(sender) => {
                if sender.send(message).is_err() {
                    tracing::warn!("Connection {} is closed, dropping message", id);
                }
            }
            None => tracing::debug!("Connection {} not registered, skipping", id),
        }
    }
}
