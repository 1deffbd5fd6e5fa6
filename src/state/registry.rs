use super::{GameError, Session};
use crate::broadcast::Outbound;
use crate::protocol::ServerMessage;
use crate::types::*;
use crate::words::Catalog;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// Safe character set for session codes (excludes 0/O, 1/I/L to avoid confusion)
const CODE_CHARS: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";
const CODE_LENGTH: usize = 6;

fn generate_session_code<R: Rng>(rng: &mut R) -> SessionId {
    (0..CODE_LENGTH)
        .map(|_| CODE_CHARS[rng.random_range(0..CODE_CHARS.len())] as char)
        .collect()
}

/// All live sessions, plus the word catalog and randomness they draw from.
///
/// Owned by exactly one task; every method takes `&mut self` and runs to
/// completion, so intents against a session are applied one at a time.
pub struct Registry {
    sessions: HashMap<SessionId, Session>,
    catalog: Catalog,
    config: SessionConfig,
    rng: StdRng,
}

impl Registry {
    pub fn new(catalog: Catalog, config: SessionConfig) -> Self {
        Self::with_rng(catalog, config, StdRng::from_os_rng())
    }

    /// Deterministic registry for tests and replays
    pub fn with_seed(catalog: Catalog, config: SessionConfig, seed: u64) -> Self {
        Self::with_rng(catalog, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(catalog: Catalog, config: SessionConfig, rng: StdRng) -> Self {
        Self {
            sessions: HashMap::new(),
            catalog,
            config,
            rng,
        }
    }

    /// Open a new session in `Waiting` with the creator as its only player
    pub fn create(
        &mut self,
        creator_id: ConnectionId,
        player_name: String,
        requested_category: Option<String>,
    ) -> (SessionId, Participant) {
        let id = loop {
            let code = generate_session_code(&mut self.rng);
            if !self.sessions.contains_key(&code) {
                break code;
            }
            // Collision - try again (extremely rare with ~887M combinations)
        };

        let creator = Participant::new(creator_id, player_name);
        let session = Session::new(
            id.clone(),
            creator.clone(),
            requested_category,
            self.config.clone(),
        );
        self.sessions.insert(id.clone(), session);

        tracing::info!("Session {} created by {} ({})", id, creator.name, creator.id);
        (id, creator)
    }

    pub fn get(&self, id: &str) -> Option<&Session> {
        self.sessions.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Session> {
        self.sessions.get_mut(id)
    }

    /// Delete a session. No-op if it does not exist.
    pub fn remove(&mut self, id: &str) {
        if self.sessions.remove(id).is_some() {
            tracing::info!("Session {} removed", id);
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Total players across all sessions
    pub fn player_count(&self) -> usize {
        self.sessions.values().map(|s| s.players.len()).sum()
    }

    pub fn join(
        &mut self,
        session_id: &str,
        player_id: ConnectionId,
        player_name: String,
    ) -> Result<Vec<Outbound>, GameError> {
        let session = self.sessions.get_mut(session_id).ok_or(GameError::NotFound)?;
        session.join(player_id, player_name)
    }

    pub fn start(&mut self, session_id: &str) -> Vec<Outbound> {
        match self.sessions.get_mut(session_id) {
            Some(session) => session.start(&self.catalog, &mut self.rng),
            None => Vec::new(),
        }
    }

    pub fn submit_description(
        &mut self,
        session_id: &str,
        player_id: &str,
        text: String,
    ) -> Vec<Outbound> {
        match self.sessions.get_mut(session_id) {
            Some(session) => session.submit_description(player_id, text),
            None => Vec::new(),
        }
    }

    pub fn start_voting(&mut self, session_id: &str) -> Vec<Outbound> {
        match self.sessions.get_mut(session_id) {
            Some(session) => session.start_voting(),
            None => Vec::new(),
        }
    }

    pub fn submit_vote(
        &mut self,
        session_id: &str,
        voter_id: &str,
        voted_for_id: ConnectionId,
    ) -> Vec<Outbound> {
        match self.sessions.get_mut(session_id) {
            Some(session) => session.submit_vote(voter_id, voted_for_id),
            None => Vec::new(),
        }
    }

    /// Disconnect cleanup: drop the connection from every session it is in,
    /// delete sessions left empty and tell the rest who remains.
    pub fn remove_participant(&mut self, connection_id: &str) -> Vec<Outbound> {
        let mut outbound = Vec::new();
        let mut emptied = Vec::new();

        for (id, session) in self.sessions.iter_mut() {
            if !session.remove_player(connection_id) {
                continue;
            }
            tracing::info!("Player {} left session {}", connection_id, id);

            if session.is_empty() {
                emptied.push(id.clone());
            } else {
                outbound.push(Outbound::to_many(
                    session.player_ids(),
                    ServerMessage::PlayerLeft {
                        players: session.players.clone(),
                    },
                ));
            }
        }

        for id in emptied {
            self.remove(&id);
        }

        outbound
    }
}
