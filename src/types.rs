use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opaque ID types for type safety
pub type SessionId = String;
pub type ConnectionId = String;

/// Description round number (1-based)
pub type DescriptionRound = u32;

/// Descriptions keyed by round, then by author connection id
pub type Descriptions = BTreeMap<DescriptionRound, BTreeMap<ConnectionId, String>>;

/// Ballots keyed by voter, value is the accused connection id
pub type Votes = BTreeMap<ConnectionId, ConnectionId>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Waiting,
    #[serde(alias = "playing")]
    Describing,
    Voting,
    Results,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participant {
    pub id: ConnectionId,
    pub name: String,
    pub score: u32,
}

impl Participant {
    pub fn new(id: ConnectionId, name: String) -> Self {
        Self { id, name, score: 0 }
    }
}

/// The participant designated as impostor, captured when the round starts.
/// Stays valid even if that connection leaves mid-round.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImpostorRef {
    pub id: ConnectionId,
    pub name: String,
    /// Refreshed from the roster when votes resolve
    pub score: u32,
}

/// Name + cumulative score, as shown on the results screen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

/// Per-session tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Advertised to clients, not enforced as a cap
    pub max_description_rounds: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_description_rounds: 3,
        }
    }
}
