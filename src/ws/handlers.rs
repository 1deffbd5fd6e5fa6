//! Client message dispatch
//!
//! Maps each inbound intent onto the registry and returns the messages to
//! deliver. Nothing here touches a socket, so the whole game can be driven from
//! tests.

use crate::broadcast::Outbound;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::Registry;
use crate::types::ConnectionId;

/// Parse a text frame, or produce the error reply for the sender
pub fn parse_client_message(text: &str) -> Result<ClientMessage, ServerMessage> {
    serde_json::from_str(text).map_err(|e| {
        tracing::warn!("Failed to parse client message: {}", e);
        ServerMessage::error(format!("Invalid message format: {}", e))
    })
}

/// Apply one intent from `from` and return the resulting notifications
pub fn handle_message(
    registry: &mut Registry,
    from: &ConnectionId,
    msg: ClientMessage,
) -> Vec<Outbound> {
    match msg {
        ClientMessage::CreateGame {
            player_name,
            selected_category,
        } => {
            let (game_id, creator) = registry.create(from.clone(), player_name, selected_category);
            vec![Outbound::to_one(
                from.clone(),
                ServerMessage::GameCreated {
                    game_id,
                    player_name: creator.name,
                },
            )]
        }

        ClientMessage::JoinGame {
            game_id,
            player_name,
        } => {
            tracing::info!("Join request for {} as {}", game_id, player_name);
            match registry.join(&game_id, from.clone(), player_name) {
                Ok(outbound) => outbound,
                Err(e) => {
                    tracing::info!("Join to {} rejected: {}", game_id, e);
                    vec![Outbound::to_one(from.clone(), ServerMessage::error(e.to_string()))]
                }
            }
        }

        ClientMessage::StartGame { game_id } => registry.start(&game_id),

        ClientMessage::SubmitDescription {
            game_id,
            description,
        } => registry.submit_description(&game_id, from, description),

        ClientMessage::StartVoting { game_id } => registry.start_voting(&game_id),

        ClientMessage::SubmitVote {
            game_id,
            voted_for_id,
        } => registry.submit_vote(&game_id, from, voted_for_id),
    }
}

/// Connection closed: remove it from whatever it joined
pub fn handle_disconnect(registry: &mut Registry, from: &ConnectionId) -> Vec<Outbound> {
    registry.remove_participant(from)
}
