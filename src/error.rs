//! Centralized error types for the game.
//!
//! The simulation itself has no failure paths; these cover startup (layout parsing,
//! configuration, SDL) and the excuse lookup, which never escapes its own module.

/// Main error type for the game.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Map parsing error: {0}")]
    MapParse(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl From<figment::Error> for GameError {
    fn from(error: figment::Error) -> Self {
        GameError::Config(Box::new(error))
    }
}

/// Error type for map parsing operations.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown character in board: {0:?}")]
    UnknownCharacter(char),
    #[error("Row {row} has {found} columns, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
    #[error("Board has no rows")]
    EmptyBoard,
}

/// Errors produced by an excuse source.
///
/// Callers of [`crate::excuse::ExcuseLookup`] never see these; they are logged and
/// replaced by the fallback text.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ExcuseError {
    #[error("Excuse lookup failed: {0}")]
    LookupFailed(String),

    #[error("Excuse lookup timed out after {0}ms")]
    TimedOut(u128),

    #[error("Excuse source went away before answering")]
    Disconnected,
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
