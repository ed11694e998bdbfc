//! Domain-level error type used across services and adapters.
//!
//! This error type is transport-agnostic. Every mutating operation either
//! fully validates and saves once, or returns one of these errors without
//! touching persisted state.

use thiserror::Error;

/// Entities that can be missing from storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Player,
    Lobby,
    Game,
    Board,
}

/// State-machine preconditions that can reject an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PreconditionKind {
    /// Game has reached the Scoring phase
    GameComplete,
    /// Game has been abandoned
    GameAbandoned,
    /// Game has not reached the Scoring phase yet
    GameNotComplete,
    /// Not this player's turn to announce
    NotPlayerTurn,
    /// Placement attempted before a letter was announced
    LetterNotAnnounced,
    /// Player already placed this turn
    AlreadyPlaced,
    /// Position outside the grid
    OutOfBounds,
    /// Target cell already holds a letter
    CellOccupied,
    /// Player is already a member of the lobby
    AlreadyInLobby,
    /// Lobby has an active game
    GameInProgress,
    /// Lobby has no active game
    NoGameInProgress,
    /// Not enough player-role members to start
    InsufficientPlayers,
    /// Dictionary words have not been loaded
    DictionaryNotLoaded,
}

/// Authority checks that can reject an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AuthorizationKind {
    /// Requester is not the lobby host
    NotHost,
    /// Target player is not a bot
    NotABot,
    /// Player is not a lobby member / not in the game roster
    NotAMember,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Missing resource in domain terms
    #[error("not found {0:?}: {1}")]
    NotFound(NotFoundKind, String),
    /// Operation illegal in the current state
    #[error("precondition failed {0:?}: {1}")]
    PreconditionFailed(PreconditionKind, String),
    /// Requester lacks the required authority
    #[error("authorization failed {0:?}: {1}")]
    AuthorizationFailed(AuthorizationKind, String),
    /// Malformed input (non-letter character, unknown strategy name, ...)
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl DomainError {
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }

    pub fn precondition(kind: PreconditionKind, detail: impl Into<String>) -> Self {
        Self::PreconditionFailed(kind, detail.into())
    }

    pub fn authorization(kind: AuthorizationKind, detail: impl Into<String>) -> Self {
        Self::AuthorizationFailed(kind, detail.into())
    }

    pub fn invalid_input(detail: impl Into<String>) -> Self {
        Self::InvalidInput(detail.into())
    }

    /// Precondition kind, if this is a precondition failure.
    pub fn precondition_kind(&self) -> Option<PreconditionKind> {
        match self {
            Self::PreconditionFailed(kind, _) => Some(*kind),
            _ => None,
        }
    }
}
