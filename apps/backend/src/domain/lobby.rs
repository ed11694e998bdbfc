use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::game::{GameId, GameSummary};
use crate::domain::player::{Player, PlayerId};

/// Default grid dimension for new lobbies.
pub const DEFAULT_GRID_SIZE: usize = 5;

/// Human-readable identifier for joining lobbies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LobbyCode(String);

impl LobbyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for LobbyCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<&str> for LobbyCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

/// Lobby state machine: Waiting <-> InGame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LobbyState {
    /// No game in progress
    Waiting,
    /// Game currently active
    InGame,
}

/// Distinguishes players from spectators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    Player,
    Spectator,
}

/// A player's membership in a lobby.
#[derive(Debug, Clone, PartialEq)]
pub struct LobbyMember {
    pub player: Player,
    pub role: MemberRole,
    pub is_host: bool,
    pub joined_at: OffsetDateTime,
}

/// Configurable settings for games in a lobby.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LobbyConfig {
    pub grid_size: usize,
}

impl Default for LobbyConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
        }
    }
}

/// A group of players who can play games together.
///
/// Invariant: exactly one member has `is_host` whenever the lobby is
/// non-empty. At most one game is active at a time; completed games leave a
/// summary in `game_history`.
#[derive(Debug, Clone, PartialEq)]
pub struct Lobby {
    pub code: LobbyCode,
    pub state: LobbyState,
    /// All members, players and spectators, in join order
    pub members: Vec<LobbyMember>,
    pub config: LobbyConfig,
    /// Append-only record of completed games
    pub game_history: Vec<GameSummary>,
    /// None while in the Waiting state
    pub current_game: Option<GameId>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Lobby {
    /// The current host member, if any.
    pub fn host(&self) -> Option<&LobbyMember> {
        self.members.iter().find(|m| m.is_host)
    }

    /// The member with the given player id, if present.
    pub fn member(&self, player_id: &PlayerId) -> Option<&LobbyMember> {
        self.members.iter().find(|m| m.player.id == *player_id)
    }

    pub fn member_mut(&mut self, player_id: &PlayerId) -> Option<&mut LobbyMember> {
        self.members.iter_mut().find(|m| m.player.id == *player_id)
    }

    /// All members with the player role, in join order.
    pub fn players(&self) -> impl Iterator<Item = &LobbyMember> {
        self.members.iter().filter(|m| m.role == MemberRole::Player)
    }

    /// All members with the spectator role, in join order.
    pub fn spectators(&self) -> impl Iterator<Item = &LobbyMember> {
        self.members
            .iter()
            .filter(|m| m.role == MemberRole::Spectator)
    }

    /// True when the requester currently holds host authority.
    pub fn is_host(&self, player_id: &PlayerId) -> bool {
        self.host().is_some_and(|h| h.player.id == *player_id)
    }
}
