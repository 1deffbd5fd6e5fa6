use super::score::{apply_scores, score_entries};
use super::vote::resolve_votes;
use super::GameError;
use crate::broadcast::Outbound;
use crate::protocol::ServerMessage;
use crate::types::*;
use crate::words::Catalog;
use rand::seq::IndexedRandom;
use rand::Rng;

/// One game instance and its whole lifecycle
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub phase: Phase,
    /// Join order
    pub players: Vec<Participant>,
    /// Chosen at creation; `None` means pick at random on every start
    pub selected_category: Option<String>,
    pub category: Option<String>,
    pub secret_word: Option<String>,
    pub impostor: Option<ImpostorRef>,
    pub description_round: DescriptionRound,
    pub descriptions: Descriptions,
    pub votes: Votes,
    /// Completed vote cycles + 1
    pub round: u32,
    pub config: SessionConfig,
}

impl Session {
    pub fn new(
        id: SessionId,
        creator: Participant,
        selected_category: Option<String>,
        config: SessionConfig,
    ) -> Self {
        Self {
            id,
            phase: Phase::Waiting,
            players: vec![creator],
            selected_category: selected_category.filter(|c| !c.is_empty()),
            category: None,
            secret_word: None,
            impostor: None,
            description_round: 1,
            descriptions: Descriptions::new(),
            votes: Votes::new(),
            round: 1,
            config,
        }
    }

    pub fn player(&self, id: &str) -> Option<&Participant> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn has_player(&self, id: &str) -> bool {
        self.player(id).is_some()
    }

    pub fn player_ids(&self) -> Vec<ConnectionId> {
        self.players.iter().map(|p| p.id.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Broadcast to the current roster
    fn to_all(&self, message: ServerMessage) -> Outbound {
        Outbound::to_many(self.player_ids(), message)
    }

    pub fn join(&mut self, id: ConnectionId, name: String) -> Result<Vec<Outbound>, GameError> {
        if self.phase != Phase::Waiting {
            return Err(GameError::AlreadyStarted);
        }
        if self.players.iter().any(|p| p.name == name) {
            return Err(GameError::NameTaken);
        }

        tracing::info!("Player {} ({}) joined session {}", name, id, self.id);
        self.players.push(Participant::new(id, name));

        Ok(vec![self.to_all(ServerMessage::PlayerJoined {
            players: self.players.clone(),
        })])
    }

    /// Assign category, word and impostor, then tell everyone their role
    pub fn start<R: Rng>(&mut self, catalog: &Catalog, rng: &mut R) -> Vec<Outbound> {
        if self.phase != Phase::Waiting {
            tracing::info!("Restarting session {} from {:?}", self.id, self.phase);
        }
        let Some(impostor) = self.players.choose(rng) else {
            return Vec::new();
        };
        let impostor = ImpostorRef {
            id: impostor.id.clone(),
            name: impostor.name.clone(),
            score: impostor.score,
        };

        let category = match &self.selected_category {
            Some(selected) if catalog.contains(selected) => selected.clone(),
            Some(selected) => {
                tracing::warn!(
                    "Unknown category {:?} in session {}, picking one at random",
                    selected,
                    self.id
                );
                catalog.random_category(rng).to_string()
            }
            None => catalog.random_category(rng).to_string(),
        };
        let Some(word) = catalog.random_word(&category, rng).map(str::to_string) else {
            return Vec::new();
        };

        tracing::info!(
            "Session {} started round {} with category {}",
            self.id,
            self.round,
            category
        );

        let outbound = self
            .players
            .iter()
            .map(|p| {
                let is_imposter = p.id == impostor.id;
                Outbound::to_one(
                    p.id.clone(),
                    ServerMessage::GameStarted {
                        topic: category.clone(),
                        secret_word: (!is_imposter).then(|| word.clone()),
                        is_imposter,
                    },
                )
            })
            .collect();

        self.phase = Phase::Describing;
        self.category = Some(category);
        self.secret_word = Some(word);
        self.impostor = Some(impostor);
        self.description_round = 1;
        self.descriptions.clear();
        self.votes.clear();

        outbound
    }

    /// Record a clue. Completes the round once the number of authors in it
    /// matches the live roster size. Late clues are still taken while voting.
    pub fn submit_description(&mut self, player_id: &str, text: String) -> Vec<Outbound> {
        let active = matches!(self.phase, Phase::Describing | Phase::Voting);
        if !active || !self.has_player(player_id) {
            tracing::debug!(
                "Ignoring description from {} in session {} ({:?})",
                player_id,
                self.id,
                self.phase
            );
            return Vec::new();
        }

        let round = self.descriptions.entry(self.description_round).or_default();
        round.insert(player_id.to_string(), text);
        if round.len() != self.players.len() {
            return Vec::new();
        }

        self.description_round += 1;
        tracing::info!(
            "Session {} completed description round {}",
            self.id,
            self.description_round - 1
        );

        vec![self.to_all(ServerMessage::AllDescriptionsSubmitted {
            descriptions: self.descriptions.clone(),
            players: self.players.clone(),
            current_round: self.description_round,
            max_rounds: self.config.max_description_rounds,
        })]
    }

    /// Open the ballot. Also valid while voting is already open, which
    /// re-sends the clue history.
    pub fn start_voting(&mut self) -> Vec<Outbound> {
        if self.impostor.is_none() {
            tracing::debug!("Ignoring start voting for session {} in {:?}", self.id, self.phase);
            return Vec::new();
        }

        self.phase = Phase::Voting;
        tracing::info!("Session {} is voting", self.id);

        vec![self.to_all(ServerMessage::VotingStarted {
            descriptions: self.descriptions.clone(),
            players: self.players.clone(),
        })]
    }

    /// Record a ballot. Resolves the cycle once the number of voters matches the
    /// live roster size.
    pub fn submit_vote(&mut self, voter_id: &str, voted_for_id: ConnectionId) -> Vec<Outbound> {
        if self.phase != Phase::Voting || !self.has_player(voter_id) {
            tracing::debug!(
                "Ignoring vote from {} in session {} ({:?})",
                voter_id,
                self.id,
                self.phase
            );
            return Vec::new();
        }
        let Some(mut impostor) = self.impostor.clone() else {
            return Vec::new();
        };

        self.votes.insert(voter_id.to_string(), voted_for_id);
        if self.votes.len() != self.players.len() {
            return Vec::new();
        }

        self.phase = Phase::Results;
        let outcome = resolve_votes(&self.votes, &impostor.id);
        apply_scores(&mut self.players, &impostor.id, outcome.impostor_caught);
        if let Some(player) = self.player(&impostor.id) {
            impostor.score = player.score;
        }

        tracing::info!(
            "Session {} round {} resolved: impostor {} {}",
            self.id,
            self.round,
            impostor.name,
            if outcome.impostor_caught { "caught" } else { "survived" }
        );

        let results = ServerMessage::RoundResults {
            imposter_caught: outcome.impostor_caught,
            imposter: impostor,
            most_voted_players: outcome.most_voted,
            votes: std::mem::take(&mut self.votes),
            scores: score_entries(&self.players),
            is_tie: outcome.is_tie,
        };
        let outbound = vec![self.to_all(results)];

        self.reset_for_next_cycle();
        outbound
    }

    /// Back to `Waiting`, keeping players and scores
    fn reset_for_next_cycle(&mut self) {
        self.phase = Phase::Waiting;
        self.category = None;
        self.secret_word = None;
        self.impostor = None;
        self.descriptions.clear();
        self.votes.clear();
        self.round += 1;
        self.description_round = 1;
    }

    /// Drop a participant without touching the phase. Returns whether they were here.
    pub fn remove_player(&mut self, id: &str) -> bool {
        let before = self.players.len();
        self.players.retain(|p| p.id != id);
        self.players.len() != before
    }
}
