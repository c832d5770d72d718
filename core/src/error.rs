use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid card index")]
    InvalidIndex,
    #[error("Deck must hold every symbol exactly twice")]
    InvalidDeck,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Unknown level name")]
    UnknownLevel,
}

pub type Result<T> = core::result::Result<T, GameError>;
