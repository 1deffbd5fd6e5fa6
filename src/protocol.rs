use crate::types::*;
use serde::{Deserialize, Serialize};

pub const PROTOCOL_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "t", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    CreateGame {
        player_name: String,
        /// Missing or empty means "pick a random category at start"
        #[serde(default, alias = "selectedTopic")]
        selected_category: Option<String>,
    },
    JoinGame {
        game_id: SessionId,
        player_name: String,
    },
    StartGame {
        game_id: SessionId,
    },
    SubmitDescription {
        game_id: SessionId,
        description: String,
    },
    StartVoting {
        game_id: SessionId,
    },
    SubmitVote {
        game_id: SessionId,
        voted_for_id: ConnectionId,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "t", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    /// First frame on every connection, tells the client its own id
    Welcome {
        player_id: ConnectionId,
        protocol: String,
        server_now: String,
    },
    GameCreated {
        game_id: SessionId,
        player_name: String,
    },
    Error {
        message: String,
    },
    PlayerJoined {
        players: Vec<Participant>,
    },
    GameStarted {
        topic: String,
        secret_word: Option<String>,
        is_imposter: bool,
    },
    AllDescriptionsSubmitted {
        descriptions: Descriptions,
        players: Vec<Participant>,
        current_round: DescriptionRound,
        max_rounds: u32,
    },
    VotingStarted {
        descriptions: Descriptions,
        players: Vec<Participant>,
    },
    RoundResults {
        imposter_caught: bool,
        imposter: ImpostorRef,
        most_voted_players: Vec<ConnectionId>,
        votes: Votes,
        scores: Vec<ScoreEntry>,
        is_tie: bool,
    },
    PlayerLeft {
        players: Vec<Participant>,
    },
}

impl ServerMessage {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_wire_format() {
        let msg: ClientMessage = serde_json::from_str(
            r#"{"t":"submitVote","gameId":"ABC234","votedForId":"01J0000000000000000000000"}"#,
        )
        .unwrap();

        assert_eq!(
            msg,
            ClientMessage::SubmitVote {
                game_id: "ABC234".to_string(),
                voted_for_id: "01J0000000000000000000000".to_string(),
            }
        );
    }

    #[test]
    fn test_create_game_category_is_optional() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"t":"createGame","playerName":"A"}"#).unwrap();
        assert_eq!(
            msg,
            ClientMessage::CreateGame {
                player_name: "A".to_string(),
                selected_category: None,
            }
        );

        let msg: ClientMessage =
            serde_json::from_str(r#"{"t":"createGame","playerName":"A","selectedTopic":"Food"}"#)
                .unwrap();
        assert_eq!(
            msg,
            ClientMessage::CreateGame {
                player_name: "A".to_string(),
                selected_category: Some("Food".to_string()),
            }
        );
    }

    #[test]
    fn test_unknown_message_is_rejected() {
        let result = serde_json::from_str::<ClientMessage>(r#"{"t":"hostResetGame"}"#);
        assert!(result.is_err());

        let result = serde_json::from_str::<ClientMessage>(r#"{"t":"joinGame","gameId":"X"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_game_started_serializes_null_word_for_imposter() {
        let msg = ServerMessage::GameStarted {
            topic: "Food".to_string(),
            secret_word: None,
            is_imposter: true,
        };
        let json: serde_json::Value = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["t"], "gameStarted");
        assert_eq!(json["topic"], "Food");
        assert!(json["secretWord"].is_null());
        assert_eq!(json["isImposter"], true);
    }

    #[test]
    fn test_descriptions_serialize_by_round() {
        let mut descriptions = Descriptions::new();
        descriptions
            .entry(1)
            .or_default()
            .insert("p1".to_string(), "round and cheesy".to_string());

        let msg = ServerMessage::VotingStarted {
            descriptions,
            players: vec![Participant::new("p1".to_string(), "A".to_string())],
        };
        let json: serde_json::Value = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["t"], "votingStarted");
        assert_eq!(json["descriptions"]["1"]["p1"], "round and cheesy");
        assert_eq!(json["players"][0]["name"], "A");
        assert_eq!(json["players"][0]["score"], 0);
    }
}
