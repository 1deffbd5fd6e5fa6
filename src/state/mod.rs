mod registry;
mod score;
mod session;
mod vote;

pub use registry::Registry;
pub use session::Session;

/// Errors surfaced to the connection that sent the intent
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Game not found")]
    NotFound,

    #[error("Game already started")]
    AlreadyStarted,

    #[error("Player name already taken")]
    NameTaken,
}
